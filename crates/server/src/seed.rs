//! First-boot demo catalog.
//!
//! A fresh install gets a browsable shop rather than an empty page. The
//! seed runs only when the `products` collection has never been persisted;
//! an initialized-but-emptied catalog stays empty.

use paper_cart_core::ProductId;

use crate::models::Product;
use crate::store::{DocumentStore, StoreError};

/// Seed the demo catalog if the `products` collection does not exist yet.
pub async fn ensure_demo_catalog(store: &dyn DocumentStore) -> Result<(), StoreError> {
    if store.exists("products").await? {
        return Ok(());
    }

    let catalog = demo_catalog();
    let documents = catalog
        .iter()
        .map(serde_json::to_value)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|err| StoreError::Encode {
            collection: "products".to_owned(),
            source: err,
        })?;

    store.persist("products", &documents).await?;
    tracing::info!(count = documents.len(), "seeded demo catalog");
    Ok(())
}

fn demo_product(
    id: i64,
    name: &str,
    price: f64,
    category: &str,
    color: &str,
    description: &str,
    rating: f64,
) -> Product {
    Product {
        id: ProductId::new(id),
        name: name.to_owned(),
        price,
        category: category.to_owned(),
        image: format!(
            "https://via.placeholder.com/300x200/{color}/ffffff?text={}",
            name.replace(' ', "+")
        ),
        description: description.to_owned(),
        rating,
        reviews: Vec::new(),
    }
}

fn demo_catalog() -> Vec<Product> {
    vec![
        demo_product(
            1,
            "Nike Air Max",
            120.0,
            "Shoes",
            "6c00ff",
            "Premium running shoes with air cushioning for maximum comfort.",
            4.5,
        ),
        demo_product(
            2,
            "Leather Jacket",
            250.0,
            "Clothing",
            "ff006e",
            "Stylish genuine leather jacket for all occasions.",
            4.2,
        ),
        demo_product(
            3,
            "Smart Watch",
            199.0,
            "Electronics",
            "ff9500",
            "Feature-packed smartwatch with health tracking.",
            4.7,
        ),
        demo_product(
            4,
            "Backpack",
            75.0,
            "Accessories",
            "00c896",
            "Durable travel backpack with multiple compartments.",
            4.3,
        ),
        demo_product(
            5,
            "Sunglasses",
            60.0,
            "Accessories",
            "6c00ff",
            "UV400 protected polarized sunglasses.",
            4.0,
        ),
        demo_product(
            6,
            "Headphones",
            150.0,
            "Electronics",
            "ff006e",
            "Noise cancelling wireless headphones.",
            4.6,
        ),
        demo_product(
            7,
            "Running Shoes",
            95.0,
            "Shoes",
            "ff9500",
            "Lightweight running shoes for peak performance.",
            4.4,
        ),
        demo_product(
            8,
            "Denim Jeans",
            80.0,
            "Clothing",
            "00c896",
            "Classic slim fit denim jeans.",
            4.1,
        ),
    ]
}
