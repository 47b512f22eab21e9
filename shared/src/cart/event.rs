//! Cart events - immutable facts recorded after command processing

use super::types::{CartLine, LineKey};
use serde::{Deserialize, Serialize};

/// Cart event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartEvent {
    /// Event unique ID
    pub event_id: String,
    /// Sequence number, strictly increasing per manager instance
    pub sequence: u64,
    /// Server timestamp (Unix milliseconds)
    pub timestamp: i64,
    /// Client timestamp preserved from the command
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_timestamp: Option<i64>,
    /// Command that triggered this event
    pub command_id: String,
    pub event_type: CartEventType,
    pub payload: EventPayload,
}

impl CartEvent {
    pub fn new(
        sequence: u64,
        command_id: String,
        client_timestamp: Option<i64>,
        event_type: CartEventType,
        payload: EventPayload,
    ) -> Self {
        Self {
            event_id: uuid::Uuid::new_v4().to_string(),
            sequence,
            timestamp: chrono::Utc::now().timestamp_millis(),
            client_timestamp,
            command_id,
            event_type,
            payload,
        }
    }
}

/// Event type enumeration
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CartEventType {
    ItemAdded,
    QuantityAdjusted,
    ItemRemoved,
    CartCleared,
}

impl std::fmt::Display for CartEventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CartEventType::ItemAdded => write!(f, "ITEM_ADDED"),
            CartEventType::QuantityAdjusted => write!(f, "QUANTITY_ADJUSTED"),
            CartEventType::ItemRemoved => write!(f, "ITEM_REMOVED"),
            CartEventType::CartCleared => write!(f, "CART_CLEARED"),
        }
    }
}

/// Why a line left the cart
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RemovalReason {
    /// Explicit removeItem
    Removed,
    /// Quantity dropped to zero or below through updateQty
    Depleted,
}

/// Event payload variants
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventPayload {
    /// `line.quantity` is the amount added, not the merged total
    ItemAdded { line: CartLine },

    QuantityAdjusted {
        key: LineKey,
        product_id: i64,
        delta: i32,
        /// Quantity after the adjustment (always >= 1)
        quantity: i32,
    },

    ItemRemoved {
        key: LineKey,
        product_id: i64,
        /// Quantity the line held before removal
        quantity: i32,
        reason: RemovalReason,
    },

    CartCleared {
        /// Number of lines dropped
        line_count: usize,
    },
}

impl EventPayload {
    pub fn event_type(&self) -> CartEventType {
        match self {
            EventPayload::ItemAdded { .. } => CartEventType::ItemAdded,
            EventPayload::QuantityAdjusted { .. } => CartEventType::QuantityAdjusted,
            EventPayload::ItemRemoved { .. } => CartEventType::ItemRemoved,
            EventPayload::CartCleared { .. } => CartEventType::CartCleared,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_event_type() {
        let payload = EventPayload::ItemRemoved {
            key: LineKey::new("2_base_noaddons"),
            product_id: 2,
            quantity: 1,
            reason: RemovalReason::Depleted,
        };
        assert_eq!(payload.event_type(), CartEventType::ItemRemoved);
        assert_eq!(payload.event_type().to_string(), "ITEM_REMOVED");

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["type"], "ITEM_REMOVED");
        assert_eq!(json["reason"], "DEPLETED");
        assert_eq!(json["key"], "2_base_noaddons");
    }

    #[test]
    fn test_event_new_sets_server_fields() {
        let event = CartEvent::new(
            3,
            "cmd-1".to_string(),
            Some(1_700_000_000_000),
            CartEventType::CartCleared,
            EventPayload::CartCleared { line_count: 2 },
        );
        assert_eq!(event.sequence, 3);
        assert!(!event.event_id.is_empty());
        assert!(event.timestamp > 0);
        assert_eq!(event.client_timestamp, Some(1_700_000_000_000));
    }
}
