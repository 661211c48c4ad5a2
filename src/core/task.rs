//! The unit of work the driver runs for each dashboard widget.

use crate::core::error::Result;
use async_trait::async_trait;

#[async_trait]
pub trait Task: Send + Sync {
    /// Short widget name used in logs.
    fn name(&self) -> &'static str;

    async fn run(&self) -> Result<()>;
}
