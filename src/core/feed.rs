//! Syndication feed abstractions

use crate::core::error::Result;
use async_trait::async_trait;

/// The newest item of a feed; only these fields are consumed.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedEntry {
    pub title: String,
    pub description: String,
    pub link: String,
}

#[async_trait]
pub trait FeedSource: Send + Sync {
    async fn latest_entry(&self, url: &str) -> Result<FeedEntry>;
}
