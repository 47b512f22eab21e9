//! QuantityAdjusted event applier

use crate::cart::traits::EventApplier;
use shared::cart::{CartEvent, CartSnapshot, EventPayload};

/// QuantityAdjusted applier
pub struct QuantityAdjustedApplier;

impl EventApplier for QuantityAdjustedApplier {
    fn apply(&self, snapshot: &mut CartSnapshot, event: &CartEvent) {
        if let EventPayload::QuantityAdjusted { key, quantity, .. } = &event.payload {
            // The event carries the resulting quantity, not just the delta,
            // so replaying it is deterministic
            if *quantity <= 0 {
                snapshot.remove(key);
            } else if let Some(line) = snapshot.get_mut(key) {
                line.quantity = *quantity;
            }

            snapshot.last_sequence = event.sequence;
            snapshot.updated_at = event.timestamp;
        }
    }
}
