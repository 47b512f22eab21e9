//! Shared types for the kiosk
//!
//! Common types used across crates: catalog models, cart commands / events /
//! snapshots, error codes and the paginated query envelope.

pub mod cart;
pub mod error;
pub mod intent;
pub mod models;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use error::{AppError, AppResult, ErrorCode};
pub use intent::{CatalogQuery, PaginatedResponse};
