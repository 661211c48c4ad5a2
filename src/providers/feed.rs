use crate::core::error::{Error, Result};
use crate::core::feed::{FeedEntry, FeedSource};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Fetches RSS/Atom documents over HTTP and reads their first entry.
pub struct HttpFeedSource {
    client: reqwest::Client,
}

impl HttpFeedSource {
    pub fn new(client: reqwest::Client) -> Self {
        HttpFeedSource { client }
    }
}

fn feed_error(url: &str, message: impl ToString) -> Error {
    Error::Feed {
        url: url.to_string(),
        message: message.to_string(),
    }
}

pub fn parse_latest(url: &str, body: &[u8]) -> Result<FeedEntry> {
    let feed = feed_rs::parser::parse(body).map_err(|e| feed_error(url, e))?;
    let entry = feed
        .entries
        .into_iter()
        .next()
        .ok_or_else(|| feed_error(url, "Feed has no entries"))?;

    let link = entry
        .links
        .first()
        .map(|l| l.href.clone())
        .ok_or_else(|| feed_error(url, "Latest entry has no link"))?;

    Ok(FeedEntry {
        title: entry.title.map(|t| t.content).unwrap_or_default(),
        description: entry
            .summary
            .map(|t| t.content)
            .or_else(|| entry.content.and_then(|c| c.body))
            .unwrap_or_default(),
        link,
    })
}

#[async_trait]
impl FeedSource for HttpFeedSource {
    #[instrument(skip(self))]
    async fn latest_entry(&self, url: &str) -> Result<FeedEntry> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| feed_error(url, e))?;

        if !response.status().is_success() {
            return Err(feed_error(url, format!("HTTP error: {}", response.status())));
        }

        let body = response.bytes().await.map_err(|e| feed_error(url, e))?;
        debug!(bytes = body.len(), "Received feed");
        parse_latest(url, &body)
    }
}
