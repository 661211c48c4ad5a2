use crate::core::blocks::{self, Block};
use crate::core::config::HeadlineConfig;
use crate::core::error::Result;
use crate::core::feed::{FeedEntry, FeedSource};
use crate::core::task::Task;
use crate::core::workspace::WorkspaceApi;
use crate::reconcile::replace_children;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

/// Cuts the description at the first footer marker.
pub fn strip_footer(description: &str, marker: &str) -> String {
    let body = match description.find(marker) {
        Some(idx) if !marker.is_empty() => &description[..idx],
        _ => description,
    };
    body.trim().to_string()
}

pub fn entry_blocks(entry: &FeedEntry, footer_marker: &str) -> Vec<Block> {
    vec![
        Block::from(blocks::heading(&format!("🗞️ {}", entry.title))),
        Block::from(blocks::paragraph(
            &strip_footer(&entry.description, footer_marker),
            None,
        )),
        Block::from(blocks::paragraph("🔗 Read on", Some(&entry.link))),
    ]
}

/// Replaces a block's children with the newest entry of each feed.
pub struct HeadlineTask {
    api: Arc<dyn WorkspaceApi>,
    feeds: Arc<dyn FeedSource>,
    config: HeadlineConfig,
}

impl HeadlineTask {
    pub fn new(
        api: Arc<dyn WorkspaceApi>,
        feeds: Arc<dyn FeedSource>,
        config: HeadlineConfig,
    ) -> Self {
        HeadlineTask { api, feeds, config }
    }
}

#[async_trait]
impl Task for HeadlineTask {
    fn name(&self) -> &'static str {
        "headline"
    }

    async fn run(&self) -> Result<()> {
        let mut children = Vec::with_capacity(self.config.feeds.len() * 3);
        for url in &self.config.feeds {
            let entry = self.feeds.latest_entry(url).await?;
            debug!(%url, title = %entry.title, "Latest headline");
            children.extend(entry_blocks(&entry, &self.config.footer_marker));
        }

        replace_children(self.api.as_ref(), &self.config.block_id, children).await
    }
}
