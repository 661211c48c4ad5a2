use crate::core::blocks;
use crate::core::config::BirthdayConfig;
use crate::core::error::Result;
use crate::core::format::format_birthday;
use crate::core::task::Task;
use crate::core::workspace::WorkspaceApi;
use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::Arc;
use tracing::warn;

/// Shows a countdown to the next birthday. Only the first record is used.
pub struct BirthdayTask {
    api: Arc<dyn WorkspaceApi>,
    config: BirthdayConfig,
    today: NaiveDate,
}

impl BirthdayTask {
    pub fn new(api: Arc<dyn WorkspaceApi>, config: BirthdayConfig, today: NaiveDate) -> Self {
        BirthdayTask { api, config, today }
    }
}

#[async_trait]
impl Task for BirthdayTask {
    fn name(&self) -> &'static str {
        "birthday"
    }

    async fn run(&self) -> Result<()> {
        let Some(next) = self.config.birthdays.first() else {
            warn!("No birthdays supplied, leaving block unchanged");
            return Ok(());
        };

        let text = format_birthday(next, self.today)?;
        self.api
            .update_block(&self.config.block_id, &blocks::code(&text))
            .await
    }
}
