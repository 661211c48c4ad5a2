//! Remote workspace abstraction: databases, pages and blocks.

use crate::core::blocks::{Block, BlockContent};
use crate::core::error::Result;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Map, Value};

/// A database row as returned by a query.
#[derive(Debug, Clone, Deserialize)]
pub struct Page {
    pub id: String,
    #[serde(default)]
    pub properties: Map<String, Value>,
}

/// A child block reference; only its id is needed to remove it.
#[derive(Debug, Clone, Deserialize)]
pub struct BlockRef {
    pub id: String,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

#[async_trait]
pub trait WorkspaceApi: Send + Sync {
    async fn query_database(&self, database_id: &str, filter: Option<Value>) -> Result<Vec<Page>>;

    async fn create_page(&self, database_id: &str, properties: Value) -> Result<()>;

    async fn update_page_properties(&self, page_id: &str, properties: Value) -> Result<()>;

    async fn archive_page(&self, page_id: &str) -> Result<()>;

    async fn list_children(&self, block_id: &str) -> Result<Vec<BlockRef>>;

    async fn delete_block(&self, block_id: &str) -> Result<()>;

    async fn append_children(&self, block_id: &str, children: &[Block]) -> Result<()>;

    async fn update_block(&self, block_id: &str, content: &BlockContent) -> Result<()>;
}
