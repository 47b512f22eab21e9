//! Cart commands - intents dispatched against the cart store

use super::types::Selection;
use serde::{Deserialize, Serialize};

/// Cart command
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartCommand {
    /// Unique command id (idempotency key)
    pub command_id: String,
    /// Client timestamp (Unix milliseconds)
    pub timestamp: i64,
    pub payload: CartCommandPayload,
}

impl CartCommand {
    pub fn new(payload: CartCommandPayload) -> Self {
        Self {
            command_id: uuid::Uuid::new_v4().to_string(),
            timestamp: chrono::Utc::now().timestamp_millis(),
            payload,
        }
    }

    /// Build a command with a caller-chosen id (retries reuse the same id)
    pub fn with_id(command_id: impl Into<String>, payload: CartCommandPayload) -> Self {
        Self {
            command_id: command_id.into(),
            timestamp: chrono::Utc::now().timestamp_millis(),
            payload,
        }
    }
}

/// Command payload variants
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CartCommandPayload {
    /// Add `quantity` units of a selection, merging with an existing line
    AddItem { selection: Selection, quantity: i32 },
    /// Apply a signed delta to the line the selection resolves to
    UpdateQty { selection: Selection, delta: i32 },
    /// Delete the line at the exact derived key
    RemoveItem { selection: Selection },
    /// Empty the cart
    ClearCart,
}
