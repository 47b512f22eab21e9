//! Shared types for the cart store

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ErrorCode;

// ============================================================================
// Line identity
// ============================================================================

/// Derived identity of a cart line
///
/// Format: `{product_id}_{variant_id|base}_{sorted addon ids joined by '+'|noaddons}`.
/// Two selections that normalize to the same key merge into one line.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LineKey(String);

impl LineKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LineKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// Selection
// ============================================================================

/// Caller-side description of a cart line
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Selection {
    pub product_id: i64,
    /// None selects the base (no-variant) line
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variant_id: Option<String>,
    /// Add-on ids; order and duplicates are irrelevant for identity
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub addons: Vec<String>,
}

impl Selection {
    /// Base selection of a product
    pub fn product(product_id: i64) -> Self {
        Self {
            product_id,
            variant_id: None,
            addons: Vec::new(),
        }
    }

    pub fn with_variant(mut self, variant_id: impl Into<String>) -> Self {
        self.variant_id = Some(variant_id.into());
        self
    }

    pub fn with_addons<I, S>(mut self, addons: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.addons = addons.into_iter().map(Into::into).collect();
        self
    }

    /// True when the caller named a variant or at least one add-on,
    /// i.e. the selection addresses exactly one key.
    pub fn is_explicit(&self) -> bool {
        self.variant_id.is_some() || !self.addons.is_empty()
    }
}

// ============================================================================
// Cart Line
// ============================================================================

/// One distinct purchasable selection and its quantity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CartLine {
    /// Derived identity
    pub key: LineKey,
    pub product_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variant_id: Option<String>,
    /// Normalized: sorted and de-duplicated
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub addons: Vec<String>,
    /// Always >= 1 while the line is stored
    pub quantity: i32,
}

impl CartLine {
    /// Selection that addresses exactly this line
    pub fn selection(&self) -> Selection {
        Selection {
            product_id: self.product_id,
            variant_id: self.variant_id.clone(),
            addons: self.addons.clone(),
        }
    }
}

// ============================================================================
// Command Response
// ============================================================================

/// Response to a cart command
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandResponse {
    /// The command ID this responds to
    pub command_id: String,
    /// Whether the command succeeded
    pub success: bool,
    /// Sequence of the last event produced (None for no-ops and duplicates)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_sequence: Option<u64>,
    /// Error details if failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<CommandError>,
}

impl CommandResponse {
    pub fn success(command_id: String, last_sequence: Option<u64>) -> Self {
        Self {
            command_id,
            success: true,
            last_sequence,
            error: None,
        }
    }

    pub fn error(command_id: String, error: CommandError) -> Self {
        Self {
            command_id,
            success: false,
            last_sequence: None,
            error: Some(error),
        }
    }

    pub fn duplicate(command_id: String) -> Self {
        Self {
            command_id,
            success: true,
            last_sequence: None,
            error: None,
        }
    }

    /// Error code of a failed command
    pub fn error_code(&self) -> Option<&CommandErrorCode> {
        self.error.as_ref().map(|e| &e.code)
    }
}

/// Command error
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandError {
    pub code: CommandErrorCode,
    pub message: String,
}

impl CommandError {
    pub fn new(code: CommandErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

/// Command error codes
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CommandErrorCode {
    InvalidQuantity,
    InvalidSelection,
    AmbiguousSelection,
    ProductNotFound,
    VariantNotFound,
    AddonNotFound,
}

impl CommandErrorCode {
    /// Map to the unified numeric error code
    pub fn error_code(&self) -> ErrorCode {
        match self {
            CommandErrorCode::InvalidQuantity => ErrorCode::InvalidQuantity,
            CommandErrorCode::InvalidSelection => ErrorCode::InvalidSelection,
            CommandErrorCode::AmbiguousSelection => ErrorCode::AmbiguousSelection,
            CommandErrorCode::ProductNotFound => ErrorCode::ProductNotFound,
            CommandErrorCode::VariantNotFound => ErrorCode::VariantNotFound,
            CommandErrorCode::AddonNotFound => ErrorCode::AddonNotFound,
        }
    }
}

// ============================================================================
// Sync
// ============================================================================

/// Sync response for subscribers that missed events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncResponse {
    /// Manager instance epoch; a change means the subscriber must do a full reload
    pub epoch: String,
    /// Retained events after the requested sequence
    pub events: Vec<super::event::CartEvent>,
    /// Latest sequence known to the manager
    pub current_sequence: u64,
    /// True when events older than the request were already evicted
    pub requires_full_sync: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_builder() {
        let sel = Selection::product(7)
            .with_variant("full")
            .with_addons(["raita", "salan"]);
        assert_eq!(sel.product_id, 7);
        assert_eq!(sel.variant_id.as_deref(), Some("full"));
        assert_eq!(sel.addons, vec!["raita".to_string(), "salan".to_string()]);
        assert!(sel.is_explicit());
        assert!(!Selection::product(7).is_explicit());
        assert!(Selection::product(7).with_addons(["raita"]).is_explicit());
    }

    #[test]
    fn test_line_key_serializes_as_plain_string() {
        let key = LineKey::new("1_full_noaddons");
        assert_eq!(serde_json::to_string(&key).unwrap(), "\"1_full_noaddons\"");
        assert_eq!(key.to_string(), "1_full_noaddons");
    }

    #[test]
    fn test_command_error_code_mapping() {
        assert_eq!(
            CommandErrorCode::AmbiguousSelection.error_code(),
            ErrorCode::AmbiguousSelection
        );
        let json = serde_json::to_string(&CommandErrorCode::VariantNotFound).unwrap();
        assert_eq!(json, "\"VARIANT_NOT_FOUND\"");
    }
}
