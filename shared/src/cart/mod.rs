//! Cart Event Sourcing Module
//!
//! This module provides types for the cart store:
//! - Commands: Intents dispatched by the UI (add / update / remove / clear)
//! - Events: Immutable facts recorded after command processing
//! - Snapshot: Current cart state computed from the event stream

pub mod command;
pub mod event;
pub mod snapshot;
pub mod types;

// Re-exports
pub use command::{CartCommand, CartCommandPayload};
pub use event::{CartEvent, CartEventType, EventPayload, RemovalReason};
pub use snapshot::CartSnapshot;
pub use types::*;
