//! CartCleared event applier

use crate::cart::traits::EventApplier;
use shared::cart::{CartEvent, CartSnapshot, EventPayload};

/// CartCleared applier
pub struct CartClearedApplier;

impl EventApplier for CartClearedApplier {
    fn apply(&self, snapshot: &mut CartSnapshot, event: &CartEvent) {
        if let EventPayload::CartCleared { .. } = &event.payload {
            snapshot.lines.clear();

            snapshot.last_sequence = event.sequence;
            snapshot.updated_at = event.timestamp;
        }
    }
}
