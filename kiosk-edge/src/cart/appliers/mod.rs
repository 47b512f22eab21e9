//! Event applier implementations
//!
//! Each applier implements the `EventApplier` trait and handles
//! one specific event type. Appliers are PURE functions.

use enum_dispatch::enum_dispatch;

use crate::cart::traits::EventApplier;
use shared::cart::{CartEvent, CartSnapshot, EventPayload};

mod cart_cleared;
mod item_added;
mod item_removed;
mod quantity_adjusted;

pub use cart_cleared::CartClearedApplier;
pub use item_added::ItemAddedApplier;
pub use item_removed::ItemRemovedApplier;
pub use quantity_adjusted::QuantityAdjustedApplier;

/// EventAction enum - dispatches to concrete applier implementations
///
/// Uses enum_dispatch for zero-cost static dispatch.
#[enum_dispatch(EventApplier)]
pub enum EventAction {
    ItemAdded(ItemAddedApplier),
    QuantityAdjusted(QuantityAdjustedApplier),
    ItemRemoved(ItemRemovedApplier),
    CartCleared(CartClearedApplier),
}

/// Convert CartEvent reference to EventAction
///
/// This is the ONLY place with a match on EventPayload.
impl From<&CartEvent> for EventAction {
    fn from(event: &CartEvent) -> Self {
        match &event.payload {
            EventPayload::ItemAdded { .. } => EventAction::ItemAdded(ItemAddedApplier),
            EventPayload::QuantityAdjusted { .. } => {
                EventAction::QuantityAdjusted(QuantityAdjustedApplier)
            }
            EventPayload::ItemRemoved { .. } => EventAction::ItemRemoved(ItemRemovedApplier),
            EventPayload::CartCleared { .. } => EventAction::CartCleared(CartClearedApplier),
        }
    }
}
