//! Catalog Service - read-only product catalog
//!
//! Loaded once from JSON (the embedded menu or a file) and kept in memory.
//! Listing helpers mirror the kiosk menu screen: category tiles,
//! sub-category tiles, a filtered product grid and its page buttons.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use shared::error::{AppError, ErrorCode};
use shared::intent::{CatalogQuery, PaginatedResponse};
use shared::models::{CategoryItem, Product};
use thiserror::Error;

use crate::cart::ProductLookup;
use crate::utils::validation::validate_selection_id;

/// Menu bundled with the binary
const EMBEDDED_MENU: &str = include_str!("menu.json");

/// Default number of products per page
pub const DEFAULT_PAGE_SIZE: u32 = 12;

/// Maximum number of page buttons shown at once
pub const PAGE_WINDOW: u32 = 5;

/// Upper bound for any catalog price or price delta
pub const MAX_PRICE: f64 = 1_000_000.0;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Duplicate product id: {0}")]
    DuplicateProduct(i64),

    #[error("Invalid catalog entry: {0}")]
    Invalid(String),
}

pub type CatalogResult<T> = Result<T, CatalogError>;

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        AppError::with_message(ErrorCode::CatalogInvalid, err.to_string())
    }
}

/// In-memory product catalog
#[derive(Debug, Clone)]
pub struct CatalogService {
    /// Products in fixture order
    products: Vec<Product>,
    /// product id -> position in `products`
    index: HashMap<i64, usize>,
    page_size: u32,
}

impl CatalogService {
    /// Build from a product list, rejecting entries the cart could not address
    pub fn new(products: Vec<Product>) -> CatalogResult<Self> {
        let mut index = HashMap::with_capacity(products.len());
        for (pos, product) in products.iter().enumerate() {
            validate_product(product)?;
            if index.insert(product.id, pos).is_some() {
                return Err(CatalogError::DuplicateProduct(product.id));
            }
        }
        Ok(Self {
            products,
            index,
            page_size: DEFAULT_PAGE_SIZE,
        })
    }

    /// Parse a JSON array of products
    pub fn from_json(json: &str) -> CatalogResult<Self> {
        let products: Vec<Product> = serde_json::from_str(json)?;
        Self::new(products)
    }

    /// The menu bundled with the binary
    pub fn embedded() -> CatalogResult<Self> {
        Self::from_json(EMBEDDED_MENU)
    }

    /// Load a JSON catalog file
    pub fn load(path: impl AsRef<Path>) -> CatalogResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let catalog = Self::from_json(&json)?;
        tracing::info!(path = %path.display(), products = catalog.len(), "Catalog loaded");
        Ok(catalog)
    }

    /// Override the default page size (0 is ignored)
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        if page_size > 0 {
            self.page_size = page_size;
        }
        self
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    // ========== Lookup ==========

    pub fn get_product(&self, id: i64) -> Option<&Product> {
        self.index.get(&id).map(|&pos| &self.products[pos])
    }

    /// All products in catalog order
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Whether the product exists and offers a variant choice
    pub fn has_variants(&self, id: i64) -> bool {
        self.get_product(id).is_some_and(Product::has_variants)
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    // ========== Listing ==========

    /// Distinct categories in first-seen order, each with its first thumbnail
    pub fn categories(&self) -> Vec<CategoryItem> {
        distinct_tiles(self.products.iter(), |p| &p.category)
    }

    /// Distinct sub-categories of one category in first-seen order
    pub fn sub_categories(&self, category: &str) -> Vec<CategoryItem> {
        distinct_tiles(
            self.products.iter().filter(|p| p.category == category),
            |p| &p.sub_category,
        )
    }

    /// Products matching the query's category filter (pagination ignored)
    ///
    /// The sub-category is only honored together with a category.
    pub fn filter(&self, query: &CatalogQuery) -> Vec<&Product> {
        let Some(category) = query.category.as_deref() else {
            return self.products.iter().collect();
        };
        self.products
            .iter()
            .filter(|p| p.category == category)
            .filter(|p| {
                query
                    .sub_category
                    .as_deref()
                    .is_none_or(|sub| p.sub_category == sub)
            })
            .collect()
    }

    /// One page of the filtered products
    ///
    /// `page` is 1-based and clamped into `1..=total_pages`.
    pub fn page(&self, query: &CatalogQuery) -> PaginatedResponse<Product> {
        let matches = self.filter(query);
        let limit = query.limit.filter(|&l| l > 0).unwrap_or(self.page_size);
        let total = matches.len() as u64;
        let total_pages = total.div_ceil(u64::from(limit)).max(1) as u32;
        let page = query.page.unwrap_or(1).clamp(1, total_pages);

        let start = (page as usize - 1) * limit as usize;
        let data: Vec<Product> = matches
            .into_iter()
            .skip(start)
            .take(limit as usize)
            .cloned()
            .collect();

        tracing::debug!(
            category = ?query.category,
            sub_category = ?query.sub_category,
            page,
            limit,
            total,
            "Catalog page"
        );
        PaginatedResponse::new(data, total, page, limit)
    }
}

impl ProductLookup for CatalogService {
    fn product(&self, product_id: i64) -> Option<&Product> {
        self.get_product(product_id)
    }
}

/// Page buttons to show: at most [`PAGE_WINDOW`] consecutive pages around `page`
pub fn page_numbers(page: u32, total_pages: u32) -> Vec<u32> {
    let mut start = page.saturating_sub(2).max(1);
    let end = total_pages.min(start.saturating_add(PAGE_WINDOW - 1));
    if end.saturating_sub(start) + 1 < PAGE_WINDOW {
        start = end.saturating_sub(PAGE_WINDOW - 1).max(1);
    }
    (start..=end).collect()
}

fn distinct_tiles<'a>(
    products: impl Iterator<Item = &'a Product>,
    name: impl Fn(&'a Product) -> &'a String,
) -> Vec<CategoryItem> {
    let mut seen = HashSet::new();
    let mut tiles = Vec::new();
    for product in products {
        let key = name(product);
        if seen.insert(key) {
            tiles.push(CategoryItem {
                name: key.clone(),
                thumbnail: product.thumbnail.clone(),
            });
        }
    }
    tiles
}

fn validate_product(product: &Product) -> CatalogResult<()> {
    if product.id <= 0 {
        return Err(CatalogError::Invalid(format!(
            "product id must be positive, got {}",
            product.id
        )));
    }
    if !product.price.is_finite() || !(0.0..=MAX_PRICE).contains(&product.price) {
        return Err(CatalogError::Invalid(format!(
            "product {} has invalid price {}",
            product.id, product.price
        )));
    }

    let ids = product
        .variants
        .iter()
        .map(|v| (&v.id, v.price, "variant"))
        .chain(product.addons.iter().map(|a| (&a.id, a.price, "add-on")));
    for (id, price, kind) in ids {
        validate_selection_id(id, kind)
            .map_err(|e| CatalogError::Invalid(format!("product {}: {e}", product.id)))?;
        if !price.is_finite() || price.abs() > MAX_PRICE {
            return Err(CatalogError::Invalid(format!(
                "product {} {kind} {id} has invalid price",
                product.id
            )));
        }
    }
    Ok(())
}
