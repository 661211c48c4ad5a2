//! Core abstractions shared by providers and widget tasks

pub mod blocks;
pub mod config;
pub mod currency;
pub mod error;
pub mod feed;
pub mod format;
pub mod log;
pub mod task;
pub mod weather;
pub mod workspace;

// Re-export main types for cleaner imports
pub use currency::{Currency, CurrencyRatioProvider};
pub use error::{Error, Result};
pub use feed::{FeedEntry, FeedSource};
pub use task::Task;
pub use weather::{WeatherProvider, WeatherReading};
pub use workspace::{BlockRef, Page, WorkspaceApi};
