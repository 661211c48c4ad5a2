//! Replaces every child of a block with a freshly built set.
//!
//! The three phases (list, delete each, append once) are not transactional:
//! if the append fails after the deletes, the block is left empty and the
//! error is returned to the caller. One writer per block is assumed.

use crate::core::blocks::Block;
use crate::core::error::Result;
use crate::core::workspace::WorkspaceApi;
use tracing::{debug, instrument};

#[instrument(skip(api, children), fields(new = children.len()))]
pub async fn replace_children(
    api: &dyn WorkspaceApi,
    block_id: &str,
    children: Vec<Block>,
) -> Result<()> {
    let current = api.list_children(block_id).await?;
    debug!(existing = current.len(), "Removing current children");

    for child in &current {
        let kind = child.kind.as_deref().unwrap_or("unknown");
        debug!(id = %child.id, kind, "Deleting child");
        api.delete_block(&child.id).await?;
    }

    api.append_children(block_id, &children).await
}
