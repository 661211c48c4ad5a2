use crate::core::blocks;
use crate::core::config::MessageConfig;
use crate::core::error::Result;
use crate::core::task::Task;
use crate::core::workspace::WorkspaceApi;
use async_trait::async_trait;
use std::sync::Arc;

/// Overwrites a paragraph block with a fixed message.
pub struct MessageTask {
    api: Arc<dyn WorkspaceApi>,
    config: MessageConfig,
}

impl MessageTask {
    pub fn new(api: Arc<dyn WorkspaceApi>, config: MessageConfig) -> Self {
        MessageTask { api, config }
    }
}

#[async_trait]
impl Task for MessageTask {
    fn name(&self) -> &'static str {
        "message"
    }

    async fn run(&self) -> Result<()> {
        self.api
            .update_block(
                &self.config.block_id,
                &blocks::paragraph(&self.config.content, None),
            )
            .await
    }
}
