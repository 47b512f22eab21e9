//! Core traits and shared types for the cart pipeline
//!
//! - [`CommandHandler`]: turns a validated command into events (never mutates)
//! - [`EventApplier`]: applies one event to the snapshot (pure mutation)
//! - [`ProductLookup`]: the only view of the catalog the cart depends on

use enum_dispatch::enum_dispatch;
use shared::cart::{CartEvent, CartSnapshot};
use shared::models::Product;
use std::str::FromStr;
use thiserror::Error;

// ============================================================================
// Errors
// ============================================================================

/// Cart command errors
///
/// Missing targets are not errors: update / remove on an absent line is a no-op.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CartError {
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(String),

    #[error("Invalid selection: {0}")]
    InvalidSelection(String),

    #[error(
        "Product {product_id} has {candidates} cart lines and no base line; pass the variant and add-ons"
    )]
    AmbiguousSelection { product_id: i64, candidates: usize },

    #[error("Product not found: {0}")]
    ProductNotFound(i64),

    #[error("Variant {variant_id} not found for product {product_id}")]
    VariantNotFound { product_id: i64, variant_id: String },

    #[error("Add-on {addon_id} not found for product {product_id}")]
    AddonNotFound { product_id: i64, addon_id: String },
}

// ============================================================================
// Ambiguity policy
// ============================================================================

/// How `updateQty` resolves a bare product id when there is no base line
/// and the product has several lines in the cart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AmbiguityPolicy {
    /// Reject with [`CartError::AmbiguousSelection`]
    #[default]
    Reject,
    /// Adjust the most recently inserted line of the product
    MostRecent,
}

impl FromStr for AmbiguityPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reject" => Ok(Self::Reject),
            "most_recent" | "most-recent" | "last" => Ok(Self::MostRecent),
            other => Err(format!("unknown ambiguity policy: {other}")),
        }
    }
}

// ============================================================================
// Catalog seam
// ============================================================================

/// Read-only product lookup used for selection validation and billing
pub trait ProductLookup: Send + Sync {
    fn product(&self, product_id: i64) -> Option<&Product>;
}

// ============================================================================
// Command handling
// ============================================================================

/// Metadata carried from the command into every event it produces
#[derive(Debug, Clone)]
pub struct CommandMetadata {
    pub command_id: String,
    /// Client timestamp (Unix milliseconds)
    pub timestamp: i64,
}

/// Read-only view of the store handed to command handlers
pub struct CommandContext<'a> {
    snapshot: &'a CartSnapshot,
    catalog: Option<&'a dyn ProductLookup>,
    policy: AmbiguityPolicy,
    sequence: u64,
}

impl<'a> CommandContext<'a> {
    pub fn new(
        snapshot: &'a CartSnapshot,
        catalog: Option<&'a dyn ProductLookup>,
        policy: AmbiguityPolicy,
        current_sequence: u64,
    ) -> Self {
        Self {
            snapshot,
            catalog,
            policy,
            sequence: current_sequence,
        }
    }

    pub fn snapshot(&self) -> &CartSnapshot {
        self.snapshot
    }

    pub fn catalog(&self) -> Option<&dyn ProductLookup> {
        self.catalog
    }

    pub fn policy(&self) -> AmbiguityPolicy {
        self.policy
    }

    /// Allocate the next event sequence number
    pub fn next_sequence(&mut self) -> u64 {
        self.sequence += 1;
        self.sequence
    }
}

/// Command handler: validates a command and returns the events it produces
pub trait CommandHandler {
    fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        metadata: &CommandMetadata,
    ) -> Result<Vec<CartEvent>, CartError>;
}

/// Event applier: applies one event to the snapshot
#[enum_dispatch]
pub trait EventApplier {
    fn apply(&self, snapshot: &mut CartSnapshot, event: &CartEvent);
}
