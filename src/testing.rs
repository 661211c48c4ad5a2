//! In-memory `WorkspaceApi` that records every call in order.

use crate::core::blocks::{Block, BlockContent};
use crate::core::error::{Error, Result};
use crate::core::workspace::{BlockRef, Page, WorkspaceApi};
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Query {
        database_id: String,
        filter: Option<Value>,
    },
    CreatePage {
        database_id: String,
        properties: Value,
    },
    UpdatePage {
        page_id: String,
        properties: Value,
    },
    Archive(String),
    ListChildren(String),
    Delete(String),
    Append {
        block_id: String,
        children: Vec<Block>,
    },
    UpdateBlock {
        block_id: String,
        content: BlockContent,
    },
}

#[derive(Default)]
pub struct RecordingApi {
    calls: Mutex<Vec<Call>>,
    children: HashMap<String, Vec<String>>,
    rows: HashMap<String, Vec<Page>>,
    fail_append: bool,
}

impl RecordingApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_children(mut self, block_id: &str, ids: &[&str]) -> Self {
        self.children.insert(
            block_id.to_string(),
            ids.iter().map(|id| id.to_string()).collect(),
        );
        self
    }

    pub fn with_rows(mut self, database_id: &str, rows: Vec<(&str, Value)>) -> Self {
        let pages = rows
            .into_iter()
            .map(|(id, properties)| Page {
                id: id.to_string(),
                properties: match properties {
                    Value::Object(map) => map,
                    _ => Map::new(),
                },
            })
            .collect();
        self.rows.insert(database_id.to_string(), pages);
        self
    }

    pub fn failing_append(mut self) -> Self {
        self.fail_append = true;
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl WorkspaceApi for RecordingApi {
    async fn query_database(&self, database_id: &str, filter: Option<Value>) -> Result<Vec<Page>> {
        self.record(Call::Query {
            database_id: database_id.to_string(),
            filter,
        });
        Ok(self.rows.get(database_id).cloned().unwrap_or_default())
    }

    async fn create_page(&self, database_id: &str, properties: Value) -> Result<()> {
        self.record(Call::CreatePage {
            database_id: database_id.to_string(),
            properties,
        });
        Ok(())
    }

    async fn update_page_properties(&self, page_id: &str, properties: Value) -> Result<()> {
        self.record(Call::UpdatePage {
            page_id: page_id.to_string(),
            properties,
        });
        Ok(())
    }

    async fn archive_page(&self, page_id: &str) -> Result<()> {
        self.record(Call::Archive(page_id.to_string()));
        Ok(())
    }

    async fn list_children(&self, block_id: &str) -> Result<Vec<BlockRef>> {
        self.record(Call::ListChildren(block_id.to_string()));
        Ok(self
            .children
            .get(block_id)
            .map(|ids| {
                ids.iter()
                    .map(|id| BlockRef {
                        id: id.clone(),
                        kind: None,
                    })
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn delete_block(&self, block_id: &str) -> Result<()> {
        self.record(Call::Delete(block_id.to_string()));
        Ok(())
    }

    async fn append_children(&self, block_id: &str, children: &[Block]) -> Result<()> {
        self.record(Call::Append {
            block_id: block_id.to_string(),
            children: children.to_vec(),
        });
        if self.fail_append {
            return Err(Error::remote(
                &format!("blocks/{block_id}/children"),
                Some(500),
                "append failed",
            ));
        }
        Ok(())
    }

    async fn update_block(&self, block_id: &str, content: &BlockContent) -> Result<()> {
        self.record(Call::UpdateBlock {
            block_id: block_id.to_string(),
            content: content.clone(),
        });
        Ok(())
    }
}
