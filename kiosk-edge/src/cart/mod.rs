//! Cart Event Sourcing Module
//!
//! The cart store is driven by commands and mutated only by events:
//!
//! - **manager**: CartManager for command processing and event generation
//! - **actions**: one command handler per intent (add / update / remove / clear)
//! - **appliers**: one pure event applier per event type
//! - **reducer**: line key derivation
//!
//! # Architecture
//!
//! ```text
//! Command → CartManager → CommandAction → Event(s)
//!                 ↓                          ↓
//!              Broadcast               EventAction → CartSnapshot
//!                 ↓
//!           All Subscribers
//! ```

pub mod traits;

pub mod actions;
pub mod appliers;
pub mod manager;
pub mod reducer;

#[cfg(test)]
pub(crate) mod testing;

// Re-exports
pub use manager::{CartManager, EVENT_LOG_CAPACITY};
pub use reducer::{generate_line_key, selection_to_line};
pub use traits::{AmbiguityPolicy, CartError, ProductLookup};

// Re-export shared types for convenience
pub use shared::cart::{
    CartCommand, CartCommandPayload, CartEvent, CartEventType, CartLine, CartSnapshot,
    CommandError, CommandErrorCode, CommandResponse, EventPayload, LineKey, RemovalReason,
    Selection, SyncResponse,
};
