use crate::core::blocks;
use crate::core::config::BudgetConfig;
use crate::core::currency::{Currency, CurrencyRatioProvider};
use crate::core::error::{Error, Result};
use crate::core::format::budget_expression;
use crate::core::task::Task;
use crate::core::workspace::WorkspaceApi;
use async_trait::async_trait;
use serde_json::{Number, Value, json};
use std::sync::Arc;
use tracing::{debug, info};

/// Page property that stores each currency's USD ratio, in update order.
pub const RATE_PROPERTIES: [(Currency, &str); 3] = [
    (Currency::Pln, "PlnUsdRate"),
    (Currency::Eur, "EurUsdRate"),
    (Currency::Byn, "BynUsdRate"),
];

/// Refreshes exchange ratios on the budget page, then shows the budget
/// database's computed total in an equation block.
pub struct BudgetTask {
    api: Arc<dyn WorkspaceApi>,
    resolver: Arc<dyn CurrencyRatioProvider>,
    config: BudgetConfig,
}

impl BudgetTask {
    pub fn new(
        api: Arc<dyn WorkspaceApi>,
        resolver: Arc<dyn CurrencyRatioProvider>,
        config: BudgetConfig,
    ) -> Self {
        BudgetTask {
            api,
            resolver,
            config,
        }
    }

    async fn update_rate(&self, currency: Currency, property: &str) -> Result<()> {
        let ratio = self.resolver.resolve(currency).await?;
        debug!(%currency, ratio, "Storing ratio");
        self.api
            .update_page_properties(
                &self.config.page_id,
                json!({ property: { "number": ratio } }),
            )
            .await
    }

    async fn read_total(&self) -> Result<Number> {
        let rows = self
            .api
            .query_database(&self.config.database_id, None)
            .await?;
        let total = rows
            .first()
            .and_then(|row| row.properties.get("Total"))
            .and_then(|total| total.pointer("/formula/number"));
        match total {
            Some(Value::Number(n)) => Ok(n.clone()),
            _ => Err(Error::remote(
                &format!("databases/{}/query", self.config.database_id),
                None,
                "First row has no numeric Total formula",
            )),
        }
    }
}

#[async_trait]
impl Task for BudgetTask {
    fn name(&self) -> &'static str {
        "budget"
    }

    async fn run(&self) -> Result<()> {
        for (currency, property) in RATE_PROPERTIES {
            self.update_rate(currency, property).await?;
        }

        let total = self.read_total().await?;
        info!(%total, "Budget total");
        self.api
            .update_block(
                &self.config.block_id,
                &blocks::equation(&budget_expression(&total)),
            )
            .await
    }
}
