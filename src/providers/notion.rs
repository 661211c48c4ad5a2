use crate::core::blocks::{Block, BlockContent};
use crate::core::error::{Error, Result};
use crate::core::workspace::{BlockRef, Page, WorkspaceApi};
use async_trait::async_trait;
use reqwest::{Method, Url};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tracing::{debug, instrument};

pub const NOTION_VERSION: &str = "2022-06-28";
const PAGE_SIZE: &str = "100";

fn truncate_str(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &s[..idx]),
        None => s.to_string(),
    }
}

#[derive(Debug, Deserialize)]
struct Paginated<T> {
    results: Vec<T>,
    #[serde(default)]
    has_more: bool,
    next_cursor: Option<String>,
}

/// `WorkspaceApi` backed by the Notion REST API.
pub struct NotionClient {
    client: reqwest::Client,
    base_url: String,
    token: String,
}

impl NotionClient {
    pub fn new(client: reqwest::Client, base_url: &str, token: &str) -> Self {
        NotionClient {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        }
    }

    async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        endpoint: &str,
        query: &[(&str, &str)],
        body: Option<Value>,
    ) -> Result<T> {
        let mut url = Url::parse(&format!("{}/{}", self.base_url, endpoint))
            .map_err(|e| Error::remote(endpoint, None, e))?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        debug!(%method, %url, "Calling Notion");

        let mut request = self
            .client
            .request(method, url)
            .bearer_auth(&self.token)
            .header("Notion-Version", NOTION_VERSION);
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| Error::remote(endpoint, None, e))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(Error::remote(
                endpoint,
                Some(status.as_u16()),
                truncate_str(&message, 200),
            ));
        }

        let text = response
            .text()
            .await
            .map_err(|e| Error::remote(endpoint, None, e))?;
        serde_json::from_str(&text).map_err(|e| {
            Error::remote(
                endpoint,
                None,
                format!("Failed to parse response: {e}; body: {}", truncate_str(&text, 200)),
            )
        })
    }
}

#[async_trait]
impl WorkspaceApi for NotionClient {
    #[instrument(skip(self, filter))]
    async fn query_database(&self, database_id: &str, filter: Option<Value>) -> Result<Vec<Page>> {
        let endpoint = format!("databases/{database_id}/query");
        let mut pages = Vec::new();
        let mut cursor: Option<String> = None;
        loop {
            let mut body = json!({});
            if let Some(filter) = &filter {
                body["filter"] = filter.clone();
            }
            if let Some(cursor) = &cursor {
                body["start_cursor"] = json!(cursor);
            }

            let page: Paginated<Page> = self.send(Method::POST, &endpoint, &[], Some(body)).await?;
            pages.extend(page.results);
            match page.next_cursor {
                Some(next) if page.has_more => cursor = Some(next),
                _ => break,
            }
        }
        debug!(rows = pages.len(), "Database queried");
        Ok(pages)
    }

    #[instrument(skip(self, properties))]
    async fn create_page(&self, database_id: &str, properties: Value) -> Result<()> {
        let body = json!({
            "parent": {"database_id": database_id},
            "properties": properties,
        });
        let _: Value = self.send(Method::POST, "pages", &[], Some(body)).await?;
        Ok(())
    }

    #[instrument(skip(self, properties))]
    async fn update_page_properties(&self, page_id: &str, properties: Value) -> Result<()> {
        let endpoint = format!("pages/{page_id}");
        let body = json!({ "properties": properties });
        let _: Value = self.send(Method::PATCH, &endpoint, &[], Some(body)).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn archive_page(&self, page_id: &str) -> Result<()> {
        let endpoint = format!("pages/{page_id}");
        let body = json!({ "archived": true });
        let _: Value = self.send(Method::PATCH, &endpoint, &[], Some(body)).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn list_children(&self, block_id: &str) -> Result<Vec<BlockRef>> {
        let endpoint = format!("blocks/{block_id}/children");
        let mut children = Vec::new();
        let mut cursor: Option<String> = None;
        loop {
            let mut query = vec![("page_size", PAGE_SIZE)];
            if let Some(cursor) = &cursor {
                query.push(("start_cursor", cursor.as_str()));
            }

            let page: Paginated<BlockRef> = self.send(Method::GET, &endpoint, &query, None).await?;
            children.extend(page.results);
            match page.next_cursor {
                Some(next) if page.has_more => cursor = Some(next),
                _ => break,
            }
        }
        Ok(children)
    }

    #[instrument(skip(self))]
    async fn delete_block(&self, block_id: &str) -> Result<()> {
        let endpoint = format!("blocks/{block_id}");
        let _: Value = self.send(Method::DELETE, &endpoint, &[], None).await?;
        Ok(())
    }

    #[instrument(skip(self, children), fields(count = children.len()))]
    async fn append_children(&self, block_id: &str, children: &[Block]) -> Result<()> {
        let endpoint = format!("blocks/{block_id}/children");
        let body = json!({ "children": children });
        let _: Value = self.send(Method::PATCH, &endpoint, &[], Some(body)).await?;
        Ok(())
    }

    #[instrument(skip(self, content), fields(kind = content.kind()))]
    async fn update_block(&self, block_id: &str, content: &BlockContent) -> Result<()> {
        let endpoint = format!("blocks/{block_id}");
        let body = serde_json::to_value(content)
            .map_err(|e| Error::remote(&endpoint, None, e))?;
        let _: Value = self.send(Method::PATCH, &endpoint, &[], Some(body)).await?;
        Ok(())
    }
}
