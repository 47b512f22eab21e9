//! UpdateQty command handler
//!
//! Applies a signed delta to one line. The target is resolved in order:
//!
//! 1. explicit selection (variant or add-ons given): the exact key
//! 2. bare product id: the base line of the product
//! 3. no base line: the only line of the product, or, when there are
//!    several, whatever the [`AmbiguityPolicy`] decides
//!
//! A line whose quantity drops to zero or below is removed.

use shared::cart::{
    CartEvent, CartEventType, CartLine, CartSnapshot, EventPayload, RemovalReason, Selection,
};
use tracing::debug;

use crate::cart::reducer::{base_key, selection_key};
use crate::cart::traits::{
    AmbiguityPolicy, CartError, CommandContext, CommandHandler, CommandMetadata,
};
use crate::utils::validation::{checked_line_quantity, validate_selection};

/// UpdateQty action
#[derive(Debug, Clone)]
pub struct UpdateQtyAction {
    pub selection: Selection,
    pub delta: i32,
}

/// Resolve the line an update addresses. `Ok(None)` means nothing to update.
fn resolve_target<'a>(
    snapshot: &'a CartSnapshot,
    selection: &Selection,
    policy: AmbiguityPolicy,
) -> Result<Option<&'a CartLine>, CartError> {
    if selection.is_explicit() {
        return Ok(snapshot.get(&selection_key(selection)));
    }

    let product_id = selection.product_id;
    if let Some(base) = snapshot.get(&base_key(product_id)) {
        return Ok(Some(base));
    }

    let candidates: Vec<&CartLine> = snapshot.lines_for_product(product_id).collect();
    match (candidates.as_slice(), policy) {
        ([], _) => Ok(None),
        ([only], _) => Ok(Some(*only)),
        (many, AmbiguityPolicy::Reject) => Err(CartError::AmbiguousSelection {
            product_id,
            candidates: many.len(),
        }),
        // Lines keep insertion order, so the last candidate is the newest
        (many, AmbiguityPolicy::MostRecent) => Ok(many.last().copied()),
    }
}

impl CommandHandler for UpdateQtyAction {
    fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        metadata: &CommandMetadata,
    ) -> Result<Vec<CartEvent>, CartError> {
        validate_selection(&self.selection)?;

        if self.delta == 0 {
            return Ok(vec![]);
        }

        let Some(line) = resolve_target(ctx.snapshot(), &self.selection, ctx.policy())? else {
            debug!(
                product_id = self.selection.product_id,
                "[UpdateQty] No matching line, nothing to update"
            );
            return Ok(vec![]);
        };

        let key = line.key.clone();
        let product_id = line.product_id;
        let current = line.quantity;
        let next = checked_line_quantity(current, self.delta)?;

        let (event_type, payload) = if next <= 0 {
            (
                CartEventType::ItemRemoved,
                EventPayload::ItemRemoved {
                    key,
                    product_id,
                    quantity: current,
                    reason: RemovalReason::Depleted,
                },
            )
        } else {
            (
                CartEventType::QuantityAdjusted,
                EventPayload::QuantityAdjusted {
                    key,
                    product_id,
                    delta: self.delta,
                    quantity: next,
                },
            )
        };

        let seq = ctx.next_sequence();
        Ok(vec![CartEvent::new(
            seq,
            metadata.command_id.clone(),
            Some(metadata.timestamp),
            event_type,
            payload,
        )])
    }
}
