//! Catalog repository.

use std::sync::Arc;

use paper_cart_core::{ProductId, ReviewId};

use super::{RepositoryError, locale_date, next_id};
use crate::models::{Product, Review};
use crate::store::{Collection, DocumentStore};

/// Fields for a new catalog item. `name`, `price`, and `category` are
/// validated as present and non-empty at the route layer.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub price: f64,
    pub category: String,
    /// Stored upload path or external URL; empty means "use a generated
    /// placeholder keyed by the product name".
    pub image: String,
    pub description: String,
}

/// Catalog fields to patch. A `None` field is untouched.
///
/// The route layer also maps explicitly-empty strings and a zero price to
/// `None`, preserving the documented "empty means not supplied" update
/// semantics as explicit sentinels rather than an implicit falsy check.
#[derive(Debug, Default, Clone)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub category: Option<String>,
    pub description: Option<String>,
}

/// Repository over the `products` collection.
#[derive(Clone)]
pub struct ProductRepository {
    products: Collection<Product>,
}

impl ProductRepository {
    #[must_use]
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            products: Collection::new(store, "products"),
        }
    }

    /// Full catalog scan.
    pub async fn list(&self) -> Result<Vec<Product>, RepositoryError> {
        Ok(self.products.all().await?)
    }

    /// Exact-id lookup.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no item has this id.
    pub async fn get(&self, id: ProductId) -> Result<Product, RepositoryError> {
        let products = self.products.all().await?;
        products
            .into_iter()
            .find(|product| product.id == id)
            .ok_or(RepositoryError::NotFound("Product"))
    }

    /// Insert a new catalog item.
    pub async fn create(&self, new: NewProduct) -> Result<Product, RepositoryError> {
        self.products
            .mutate(move |products| {
                let image = if new.image.is_empty() {
                    Product::placeholder_image(&new.name)
                } else {
                    new.image
                };

                let product = Product {
                    id: ProductId::new(next_id(
                        products.iter().map(|product| product.id.as_i64()),
                    )),
                    name: new.name,
                    price: new.price,
                    category: new.category,
                    image,
                    description: new.description,
                    rating: 0.0,
                    reviews: Vec::new(),
                };
                products.push(product.clone());
                Ok(product)
            })
            .await
    }

    /// Apply a field patch.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the item does not exist.
    pub async fn update(
        &self,
        id: ProductId,
        patch: ProductPatch,
    ) -> Result<Product, RepositoryError> {
        self.products
            .mutate(move |products| {
                let product = products
                    .iter_mut()
                    .find(|product| product.id == id)
                    .ok_or(RepositoryError::NotFound("Product"))?;

                if let Some(name) = patch.name {
                    product.name = name;
                }
                if let Some(price) = patch.price {
                    product.price = price;
                }
                if let Some(category) = patch.category {
                    product.category = category;
                }
                if let Some(description) = patch.description {
                    product.description = description;
                }

                Ok(product.clone())
            })
            .await
    }

    /// Delete a catalog item. Deleting an absent id is a success.
    pub async fn delete(&self, id: ProductId) -> Result<(), RepositoryError> {
        self.products
            .mutate(move |products| {
                products.retain(|product| product.id != id);
                Ok(())
            })
            .await
    }

    /// Append a review and recompute the item's derived rating.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the item does not exist.
    pub async fn add_review(
        &self,
        id: ProductId,
        user_name: String,
        rating: f64,
        comment: String,
    ) -> Result<Review, RepositoryError> {
        self.products
            .mutate(move |products| {
                let product = products
                    .iter_mut()
                    .find(|product| product.id == id)
                    .ok_or(RepositoryError::NotFound("Product"))?;

                let review = Review {
                    id: ReviewId::new(next_id(
                        product.reviews.iter().map(|review| review.id.as_i64()),
                    )),
                    user_name,
                    rating,
                    comment,
                    date: locale_date(),
                };
                product.reviews.push(review.clone());
                product.recompute_rating();

                Ok(review)
            })
            .await
    }
}
