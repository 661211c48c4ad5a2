use crate::core::blocks;
use crate::core::config::HabitConfig;
use crate::core::error::{Error, Result};
use crate::core::task::Task;
use crate::core::workspace::WorkspaceApi;
use async_trait::async_trait;
use chrono::NaiveDate;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::debug;

pub fn on_or_before(today: NaiveDate) -> Value {
    json!({
        "property": "Created time",
        "date": {"on_or_before": today.format("%Y-%m-%d").to_string()}
    })
}

/// Points a callout at the most recent habit-tracker entry.
pub struct HabitTask {
    api: Arc<dyn WorkspaceApi>,
    config: HabitConfig,
    today: NaiveDate,
}

impl HabitTask {
    pub fn new(api: Arc<dyn WorkspaceApi>, config: HabitConfig, today: NaiveDate) -> Self {
        HabitTask { api, config, today }
    }
}

#[async_trait]
impl Task for HabitTask {
    fn name(&self) -> &'static str {
        "habit"
    }

    async fn run(&self) -> Result<()> {
        let database_id = &self.config.database_id;
        let rows = self
            .api
            .query_database(database_id, Some(on_or_before(self.today)))
            .await?;
        let latest = rows.first().ok_or_else(|| {
            Error::remote(
                &format!("databases/{database_id}/query"),
                None,
                format!("No habit entries on or before {}", self.today),
            )
        })?;
        debug!(page = %latest.id, "Latest habit entry");

        self.api
            .update_block(&self.config.block_id, &blocks::callout(&latest.id))
            .await
    }
}
