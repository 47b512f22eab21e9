//! Read-side intents (catalog queries)

pub mod query;

pub use query::{CatalogQuery, PaginatedResponse};
