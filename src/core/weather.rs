//! Daily weather abstractions

use crate::core::error::Result;
use async_trait::async_trait;
use serde::Deserialize;

/// Today's forecast. Temperatures keep their JSON representation so that
/// `25` renders as `25` and `25.5` as `25.5`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WeatherReading {
    pub max: serde_json::Number,
    pub min: serde_json::Number,
    pub sunrise: String,
    pub sunset: String,
}

#[async_trait]
pub trait WeatherProvider: Send + Sync {
    async fn daily(&self, latitude: f64, longitude: f64) -> Result<WeatherReading>;
}
