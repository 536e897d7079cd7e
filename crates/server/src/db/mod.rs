//! Domain repositories over the collection store.
//!
//! One repository per collection, each a thin layer that owns its
//! [`Collection`] handle and expresses the permitted mutations: create,
//! field-patch, list-toggle, status-transition, and aggregate-recompute.
//! Nothing outside this module and the store touches persisted state.
//!
//! [`Collection`]: crate::store::Collection

pub mod orders;
pub mod products;
pub mod users;

pub use orders::OrderRepository;
pub use products::ProductRepository;
pub use users::UserRepository;

use chrono::Utc;
use thiserror::Error;

use crate::store::StoreError;

/// Errors surfaced by repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// A unique constraint was violated (currently only account email).
    #[error("{0}")]
    Duplicate(String),

    /// Credential comparison failed.
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Id lookup miss. Carries the entity name for the response message.
    #[error("{0} not found")]
    NotFound(&'static str),

    /// The underlying store failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Next document id for a collection: one past the current maximum.
///
/// Only ever called under the collection's write lock, which is what makes
/// the counter collision-free under concurrent creation.
pub(crate) fn next_id<I>(ids: I) -> i64
where
    I: IntoIterator<Item = i64>,
{
    ids.into_iter().max().unwrap_or(0) + 1
}

/// Locale-style date string (`M/D/YYYY`), as stored on reviews and orders.
pub(crate) fn locale_date() -> String {
    Utc::now().format("%-m/%-d/%Y").to_string()
}

/// Locale-style time string (`H:MM:SS AM/PM`), as stored on orders.
pub(crate) fn locale_time() -> String {
    Utc::now().format("%-I:%M:%S %p").to_string()
}
