//! Product Model

use serde::{Deserialize, Serialize};

/// Product entity (read-only catalog entry)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub category: String,
    pub sub_category: String,
    /// Base price; variant and add-on prices are added on top
    pub price: f64,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub stock: i32,
    #[serde(default)]
    pub thumbnail: String,
    /// Empty when the product has no variant choice
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub variants: Vec<Variant>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub addons: Vec<Addon>,
}

impl Product {
    /// Whether the product offers a variant choice
    pub fn has_variants(&self) -> bool {
        !self.variants.is_empty()
    }

    pub fn variant(&self, variant_id: &str) -> Option<&Variant> {
        self.variants.iter().find(|v| v.id == variant_id)
    }

    pub fn addon(&self, addon_id: &str) -> Option<&Addon> {
        self.addons.iter().find(|a| a.id == addon_id)
    }
}

/// Product variant (portion size, etc.)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Variant {
    pub id: String,
    pub name: String,
    /// Delta added to the product base price
    pub price: f64,
}

/// Product add-on
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Addon {
    pub id: String,
    pub name: String,
    /// Added once per unit
    pub price: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_without_optional_lists() {
        let json = r#"{
            "id": 2,
            "title": "Mutton Dum Biriyani",
            "category": "biriyani",
            "subCategory": "mutton-biriyani",
            "price": 299
        }"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id, 2);
        assert_eq!(product.sub_category, "mutton-biriyani");
        assert!(!product.has_variants());
        assert!(product.addons.is_empty());
    }

    #[test]
    fn test_variant_and_addon_lookup() {
        let json = r#"{
            "id": 1,
            "title": "Chicken Biriyani",
            "category": "biriyani",
            "subCategory": "chicken-biriyani",
            "price": 219,
            "variants": [{ "id": "full", "name": "Full Plate", "price": 80 }],
            "addons": [{ "id": "raita", "name": "Raita", "price": 25 }]
        }"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert!(product.has_variants());
        assert_eq!(product.variant("full").map(|v| v.price), Some(80.0));
        assert!(product.variant("jumbo").is_none());
        assert_eq!(product.addon("raita").map(|a| a.name.as_str()), Some("Raita"));
    }
}
