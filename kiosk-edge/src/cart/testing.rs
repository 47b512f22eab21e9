//! Test fixtures shared by the cart unit tests

use std::collections::HashMap;

use shared::models::{Addon, Product, Variant};

use super::traits::{CommandMetadata, ProductLookup};

#[derive(Debug, Default)]
pub struct TestCatalog {
    products: HashMap<i64, Product>,
}

impl TestCatalog {
    /// Biryani (1) with half/full/jumbo variants, fries (2) plain,
    /// burger (10) with cheese and mayo add-ons
    pub fn kiosk() -> Self {
        let mut catalog = Self::default();
        catalog.insert(product(
            1,
            "Chicken Biryani",
            120.0,
            vec![
                variant("half", "Half", 0.0),
                variant("full", "Full", 80.0),
                variant("jumbo", "Jumbo", 150.0),
            ],
            vec![addon("raita", "Raita", 15.0)],
        ));
        catalog.insert(product(2, "French Fries", 60.0, vec![], vec![]));
        catalog.insert(product(
            10,
            "Veg Burger",
            90.0,
            vec![],
            vec![
                addon("extra-cheese", "Extra Cheese", 20.0),
                addon("mayo", "Mayo", 10.0),
            ],
        ));
        catalog
    }

    pub fn insert(&mut self, product: Product) {
        self.products.insert(product.id, product);
    }
}

impl ProductLookup for TestCatalog {
    fn product(&self, product_id: i64) -> Option<&Product> {
        self.products.get(&product_id)
    }
}

pub fn product(
    id: i64,
    title: &str,
    price: f64,
    variants: Vec<Variant>,
    addons: Vec<Addon>,
) -> Product {
    Product {
        id,
        title: title.to_string(),
        description: String::new(),
        category: "Food".to_string(),
        sub_category: "Main".to_string(),
        price,
        rating: 4.0,
        stock: 10,
        thumbnail: format!("/images/{id}.png"),
        variants,
        addons,
    }
}

pub fn variant(id: &str, name: &str, price: f64) -> Variant {
    Variant {
        id: id.to_string(),
        name: name.to_string(),
        price,
    }
}

pub fn addon(id: &str, name: &str, price: f64) -> Addon {
    Addon {
        id: id.to_string(),
        name: name.to_string(),
        price,
    }
}

pub fn metadata() -> CommandMetadata {
    CommandMetadata {
        command_id: "cmd-1".to_string(),
        timestamp: 1_234_567_890,
    }
}
