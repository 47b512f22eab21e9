//! Catalog query types
//!
//! List queries over the product catalog and the paginated envelope they return.

use serde::{Deserialize, Serialize};

/// Catalog query - category filter plus pagination
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CatalogQuery {
    /// No category means every product
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Only honored together with `category`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_category: Option<String>,
    /// Page number (1-based)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Items per page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

impl CatalogQuery {
    /// Every product
    pub fn all() -> Self {
        Self::default()
    }

    /// Products of one category
    pub fn category(category: impl Into<String>) -> Self {
        Self {
            category: Some(category.into()),
            ..Self::default()
        }
    }

    /// Narrow to a sub-category
    pub fn sub_category(mut self, sub_category: impl Into<String>) -> Self {
        self.sub_category = Some(sub_category.into());
        self
    }

    /// Add pagination
    pub fn paginate(mut self, page: u32, limit: u32) -> Self {
        self.page = Some(page);
        self.limit = Some(limit);
        self
    }
}

/// Paginated response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    /// Items on this page
    pub data: Vec<T>,
    /// Total matching items
    pub total: u64,
    /// Current page (1-based)
    pub page: u32,
    /// Items per page
    pub limit: u32,
    /// Total pages
    pub total_pages: u32,
    /// 1-based index of the first item shown (0 when empty)
    pub start_index: u64,
    /// 1-based index of the last item shown (0 when empty)
    pub end_index: u64,
}

impl<T> PaginatedResponse<T> {
    pub fn new(data: Vec<T>, total: u64, page: u32, limit: u32) -> Self {
        let total_pages = if limit > 0 {
            total.div_ceil(u64::from(limit)) as u32
        } else {
            1
        };

        let (start_index, end_index) = if data.is_empty() {
            (0, 0)
        } else {
            let start = u64::from(page.saturating_sub(1)) * u64::from(limit) + 1;
            (start, start + data.len() as u64 - 1)
        };

        Self {
            data,
            total,
            page,
            limit,
            total_pages,
            start_index,
            end_index,
        }
    }
}
