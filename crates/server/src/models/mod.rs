//! Domain document types.
//!
//! These are the shapes persisted in the three collections. Wire and disk
//! representation are the same camelCase JSON; `#[serde(default)]` keeps
//! documents written by older deployments decodable.

pub mod order;
pub mod product;
pub mod user;

pub use order::Order;
pub use product::{Product, Review};
pub use user::{PublicUser, User, UserSummary};
