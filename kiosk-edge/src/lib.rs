//! Kiosk Edge - self-service food ordering kiosk core
//!
//! # Overview
//!
//! - **Cart** (`cart`): event-sourced cart store keyed by product, variant and add-ons
//! - **Catalog** (`catalog`): menu loading, category filtering and pagination
//! - **Billing** (`billing`): decimal-exact unit prices, subtotal and tax
//! - **Auth** (`auth`): mock OTP login persisted in a flag file
//!
//! # Layout
//!
//! ```text
//! kiosk-edge/src/
//! ├── core/          # configuration
//! ├── cart/          # commands, events, manager
//! ├── catalog/       # menu service
//! ├── billing/       # bill computation
//! ├── auth/          # login state
//! └── utils/         # logger, validation
//! ```

pub mod auth;
pub mod billing;
pub mod cart;
pub mod catalog;
pub mod core;
pub mod utils;

// Re-export public types
pub use auth::{AuthError, AuthService, FileFlagStore, MemoryFlagStore, OtpVerifier};
pub use billing::{Bill, BillLine, calculate_bill};
pub use cart::{AmbiguityPolicy, CartError, CartManager, ProductLookup, Selection};
pub use catalog::{CatalogError, CatalogService};
pub use core::Config;

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// Load `.env` and install the logger
///
/// Reads `LOG_LEVEL` and `LOG_DIR` directly since logging must be up
/// before [`Config`] is built.
pub fn setup_environment() -> std::io::Result<()> {
    dotenv::dotenv().ok();

    let log_level = std::env::var("LOG_LEVEL").ok();
    let log_dir = std::env::var("LOG_DIR").ok().filter(|d| !d.trim().is_empty());
    init_logger_with_file(log_level.as_deref(), log_dir.as_deref())
}
