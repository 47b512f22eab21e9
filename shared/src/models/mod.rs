//! Catalog models

pub mod category;
pub mod product;

pub use category::CategoryItem;
pub use product::{Addon, Product, Variant};
