//! Catalog item documents.

use serde::{Deserialize, Serialize};

use paper_cart_core::{ProductId, ReviewId};

/// A catalog item as persisted in the `products` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: f64,
    pub category: String,
    /// Stored upload path (`/uploads/...`) or an external image URL.
    pub image: String,
    #[serde(default)]
    pub description: String,
    /// Derived: mean of `reviews[].rating` rounded to one decimal place,
    /// `0.0` while there are no reviews. Maintained by
    /// [`Product::recompute_rating`] after every review append.
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub reviews: Vec<Review>,
}

impl Product {
    /// Recompute the derived `rating` aggregate from the review list.
    pub fn recompute_rating(&mut self) {
        if self.reviews.is_empty() {
            self.rating = 0.0;
            return;
        }

        let sum: f64 = self.reviews.iter().map(|review| review.rating).sum();
        #[allow(clippy::cast_precision_loss)]
        let mean = sum / self.reviews.len() as f64;
        self.rating = (mean * 10.0).round() / 10.0;
    }

    /// Placeholder image URL used when a product is created without one.
    #[must_use]
    pub fn placeholder_image(name: &str) -> String {
        format!(
            "https://via.placeholder.com/300x200?text={}",
            urlencoding::encode(name)
        )
    }
}

/// A customer review. Reviews are appended, never removed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    /// Unique within the owning product's review list.
    pub id: ReviewId,
    pub user_name: String,
    pub rating: f64,
    pub comment: String,
    /// Locale-style creation date (`M/D/YYYY`).
    pub date: String,
}
