//! Account documents.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use paper_cart_core::{Email, ProductId, UserId};

/// An account document as persisted in the `users` collection.
///
/// `password` is an opaque credential compared by exact equality; it never
/// appears in any response payload, which is why the public views below
/// exist.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: Email,
    pub password: String,
    #[serde(default)]
    pub avatar: String,
    /// Wishlist is a set: toggle inserts when absent, removes when present.
    #[serde(default)]
    pub wishlist: Vec<ProductId>,
    #[serde(default)]
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// The credential-free view returned by signup, login, and profile
    /// updates.
    #[must_use]
    pub fn public(&self) -> PublicUser {
        PublicUser {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            avatar: self.avatar.clone(),
            wishlist: self.wishlist.clone(),
            is_admin: self.is_admin,
        }
    }

    /// The masked row returned by the account listing.
    #[must_use]
    pub fn summary(&self) -> UserSummary {
        UserSummary {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            created_at: self.created_at,
        }
    }
}

/// Account view with the credential stripped.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub id: UserId,
    pub name: String,
    pub email: Email,
    pub avatar: String,
    pub wishlist: Vec<ProductId>,
    pub is_admin: bool,
}

/// Masked listing row: id, name, email, and creation time only.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: UserId,
    pub name: String,
    pub email: Email,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User {
            id: UserId::new(1),
            name: "Ann".to_owned(),
            email: Email::parse("ann@x.com").unwrap(),
            password: "pw".to_owned(),
            avatar: String::new(),
            wishlist: vec![ProductId::new(3)],
            is_admin: false,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_public_view_has_no_password() {
        let json = serde_json::to_value(sample_user().public()).unwrap();
        assert!(json.get("password").is_none());
        assert_eq!(json["wishlist"], serde_json::json!([3]));
    }

    #[test]
    fn test_summary_is_masked() {
        let json = serde_json::to_value(sample_user().summary()).unwrap();
        assert!(json.get("password").is_none());
        assert!(json.get("wishlist").is_none());
        assert!(json.get("createdAt").is_some());
    }

    #[test]
    fn test_decodes_document_missing_optional_fields() {
        let user: User = serde_json::from_value(serde_json::json!({
            "id": 7,
            "name": "Ann",
            "email": "ann@x.com",
            "password": "pw",
            "createdAt": "2026-08-06T00:00:00Z"
        }))
        .unwrap();

        assert!(user.wishlist.is_empty());
        assert!(user.avatar.is_empty());
        assert!(!user.is_admin);
    }
}
