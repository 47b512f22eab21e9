//! Category Model

use serde::{Deserialize, Serialize};

/// Category (or sub-category) tile derived from the catalog
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryItem {
    pub name: String,
    /// Thumbnail of the first product seen in this category
    pub thumbnail: String,
}
