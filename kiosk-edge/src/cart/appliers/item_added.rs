//! ItemAdded event applier
//!
//! Applies the ItemAdded event, merging into an existing line with the same key.

use crate::cart::traits::EventApplier;
use shared::cart::{CartEvent, CartLine, CartSnapshot, EventPayload};

/// ItemAdded applier
pub struct ItemAddedApplier;

impl EventApplier for ItemAddedApplier {
    fn apply(&self, snapshot: &mut CartSnapshot, event: &CartEvent) {
        if let EventPayload::ItemAdded { line } = &event.payload {
            add_or_merge_line(snapshot, line);

            snapshot.last_sequence = event.sequence;
            snapshot.updated_at = event.timestamp;
        }
    }
}

/// Add a line, merging with the existing line if the key matches
///
/// A merged line keeps its position; a new line is appended.
pub(crate) fn add_or_merge_line(snapshot: &mut CartSnapshot, line: &CartLine) {
    if let Some(existing) = snapshot.get_mut(&line.key) {
        existing.quantity += line.quantity;
    } else {
        snapshot.lines.push(line.clone());
    }
}
