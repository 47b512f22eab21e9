//! Product catalog

pub mod service;

pub use service::{
    CatalogError, CatalogResult, CatalogService, DEFAULT_PAGE_SIZE, PAGE_WINDOW, page_numbers,
};
