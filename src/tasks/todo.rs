use crate::core::blocks::{self, Block};
use crate::core::config::ToDoConfig;
use crate::core::error::Result;
use crate::core::task::Task;
use crate::core::workspace::WorkspaceApi;
use crate::reconcile::replace_children;
use async_trait::async_trait;
use std::sync::Arc;

pub struct ToDoTask {
    api: Arc<dyn WorkspaceApi>,
    config: ToDoConfig,
}

impl ToDoTask {
    pub fn new(api: Arc<dyn WorkspaceApi>, config: ToDoConfig) -> Self {
        ToDoTask { api, config }
    }

    pub fn blocks(&self) -> Vec<Block> {
        self.config
            .items
            .iter()
            .map(|item| Block::from(blocks::to_do(item)))
            .collect()
    }
}

#[async_trait]
impl Task for ToDoTask {
    fn name(&self) -> &'static str {
        "todo"
    }

    async fn run(&self) -> Result<()> {
        replace_children(self.api.as_ref(), &self.config.block_id, self.blocks()).await
    }
}
