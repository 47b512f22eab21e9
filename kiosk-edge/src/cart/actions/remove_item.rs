//! RemoveItem command handler
//!
//! Deletes the line with the exact derived key. Absent lines are a no-op.

use shared::cart::{CartEvent, CartEventType, EventPayload, RemovalReason, Selection};

use crate::cart::reducer::selection_key;
use crate::cart::traits::{CartError, CommandContext, CommandHandler, CommandMetadata};
use crate::utils::validation::validate_selection;

/// RemoveItem action
#[derive(Debug, Clone)]
pub struct RemoveItemAction {
    pub selection: Selection,
}

impl CommandHandler for RemoveItemAction {
    fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        metadata: &CommandMetadata,
    ) -> Result<Vec<CartEvent>, CartError> {
        validate_selection(&self.selection)?;

        let key = selection_key(&self.selection);
        let Some(line) = ctx.snapshot().get(&key) else {
            return Ok(vec![]);
        };
        let payload = EventPayload::ItemRemoved {
            key,
            product_id: line.product_id,
            quantity: line.quantity,
            reason: RemovalReason::Removed,
        };

        let seq = ctx.next_sequence();
        Ok(vec![CartEvent::new(
            seq,
            metadata.command_id.clone(),
            Some(metadata.timestamp),
            CartEventType::ItemRemoved,
            payload,
        )])
    }
}
