//! Purchase order documents.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use paper_cart_core::OrderId;

/// Status a freshly placed order starts in. The status field is open-ended
/// text, not a closed enum: the status-update operation stores whatever the
/// caller sends.
pub const INITIAL_STATUS: &str = "Pending";

/// A purchase order as persisted in the `orders` collection.
///
/// `user_id` is a reference, not a foreign key: the account may have been
/// deleted since, and matching against it is loose (string-coercing), so it
/// is kept as raw JSON rather than a typed id. `items` and `address` are
/// opaque line-item payloads, validated for presence only.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    #[serde(default)]
    pub user_id: Value,
    #[serde(default)]
    pub user_name: String,
    pub items: Value,
    pub total: f64,
    #[serde(default)]
    pub address: Value,
    pub status: String,
    /// Locale-style creation date (`M/D/YYYY`).
    pub date: String,
    /// Locale-style creation time (`H:MM:SS AM/PM`).
    pub time: String,
}

impl Order {
    /// Loose owner match: the stored `userId` and the path parameter are
    /// both coerced to their string form before comparison, so an order
    /// stored with a numeric id still matches the textual path segment.
    #[must_use]
    pub fn belongs_to(&self, user_id: &str) -> bool {
        match &self.user_id {
            Value::String(stored) => stored == user_id,
            Value::Number(stored) => stored.to_string() == user_id,
            _ => false,
        }
    }
}
