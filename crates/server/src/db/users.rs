//! Account repository.

use std::sync::Arc;

use chrono::Utc;

use paper_cart_core::{Email, ProductId, UserId};

use super::{RepositoryError, next_id};
use crate::models::{User, UserSummary};
use crate::store::{Collection, DocumentStore};

/// Profile fields to patch. A `None` field is untouched.
///
/// For `name`, `email`, and `password` an explicitly-empty value also means
/// "not supplied" and is skipped; the route layer filters those out before
/// building the patch. `avatar` is different: an empty string is a real
/// value that clears the avatar.
#[derive(Debug, Default, Clone)]
pub struct ProfilePatch {
    pub name: Option<String>,
    pub email: Option<Email>,
    pub password: Option<String>,
    pub avatar: Option<String>,
}

/// Repository over the `users` collection.
#[derive(Clone)]
pub struct UserRepository {
    users: Collection<User>,
}

impl UserRepository {
    #[must_use]
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            users: Collection::new(store, "users"),
        }
    }

    /// Create an account.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Duplicate` if the email is already
    /// registered.
    pub async fn create(
        &self,
        name: String,
        email: Email,
        password: String,
    ) -> Result<User, RepositoryError> {
        self.users
            .mutate(move |users| {
                if users.iter().any(|user| user.email == email) {
                    return Err(RepositoryError::Duplicate(
                        "Email already registered".to_owned(),
                    ));
                }

                let user = User {
                    id: UserId::new(next_id(users.iter().map(|user| user.id.as_i64()))),
                    name,
                    email,
                    password,
                    avatar: String::new(),
                    wishlist: Vec::new(),
                    is_admin: false,
                    created_at: Utc::now(),
                };
                users.push(user.clone());
                Ok(user)
            })
            .await
    }

    /// Look up an account by credential equality.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::InvalidCredentials` when no account matches
    /// both email and password exactly.
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<User, RepositoryError> {
        let users = self.users.all().await?;
        users
            .into_iter()
            .find(|user| user.email.as_str() == email && user.password == password)
            .ok_or(RepositoryError::InvalidCredentials)
    }

    /// Apply a profile patch.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the account does not exist.
    pub async fn update_profile(
        &self,
        id: UserId,
        patch: ProfilePatch,
    ) -> Result<User, RepositoryError> {
        self.users
            .mutate(move |users| {
                let user = users
                    .iter_mut()
                    .find(|user| user.id == id)
                    .ok_or(RepositoryError::NotFound("User"))?;

                if let Some(name) = patch.name {
                    user.name = name;
                }
                if let Some(email) = patch.email {
                    user.email = email;
                }
                if let Some(password) = patch.password {
                    user.password = password;
                }
                if let Some(avatar) = patch.avatar {
                    user.avatar = avatar;
                }

                Ok(user.clone())
            })
            .await
    }

    /// Toggle a product in the account's wishlist: insert if absent, remove
    /// if present. Two consecutive calls with the same product restore the
    /// original wishlist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the account does not exist.
    pub async fn toggle_wishlist(
        &self,
        id: UserId,
        product_id: ProductId,
    ) -> Result<Vec<ProductId>, RepositoryError> {
        self.users
            .mutate(move |users| {
                let user = users
                    .iter_mut()
                    .find(|user| user.id == id)
                    .ok_or(RepositoryError::NotFound("User"))?;

                if user.wishlist.contains(&product_id) {
                    user.wishlist.retain(|&entry| entry != product_id);
                } else {
                    user.wishlist.push(product_id);
                }

                Ok(user.wishlist.clone())
            })
            .await
    }

    /// Masked listing of every account. Passwords never leave the
    /// repository through this path.
    pub async fn list_summaries(&self) -> Result<Vec<UserSummary>, RepositoryError> {
        let users = self.users.all().await?;
        Ok(users.iter().map(User::summary).collect())
    }

    /// Delete an account. Deleting an absent id is a success, not an error.
    pub async fn delete(&self, id: UserId) -> Result<(), RepositoryError> {
        self.users
            .mutate(move |users| {
                users.retain(|user| user.id != id);
                Ok(())
            })
            .await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn repo() -> UserRepository {
        UserRepository::new(Arc::new(MemoryStore::new()))
    }

    fn email(s: &str) -> Email {
        Email::parse(s).unwrap()
    }

    async fn create_ann(repo: &UserRepository) -> User {
        repo.create("Ann".to_owned(), email("ann@x.com"), "pw".to_owned())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_create_assigns_unique_ids() {
        let repo = repo();
        let ann = create_ann(&repo).await;
        let bob = repo
            .create("Bob".to_owned(), email("bob@x.com"), "pw".to_owned())
            .await
            .unwrap();

        assert_ne!(ann.id, bob.id);
        assert!(!ann.is_admin);
        assert!(ann.wishlist.is_empty());
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_email() {
        let repo = repo();
        create_ann(&repo).await;

        let result = repo
            .create("Ann Again".to_owned(), email("ann@x.com"), "pw2".to_owned())
            .await;
        assert!(matches!(result, Err(RepositoryError::Duplicate(_))));

        // The duplicate must not have been persisted.
        assert_eq!(repo.list_summaries().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_authenticate() {
        let repo = repo();
        create_ann(&repo).await;

        assert!(repo.authenticate("ann@x.com", "pw").await.is_ok());
        assert!(matches!(
            repo.authenticate("ann@x.com", "wrong").await,
            Err(RepositoryError::InvalidCredentials)
        ));
        assert!(matches!(
            repo.authenticate("nobody@x.com", "pw").await,
            Err(RepositoryError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn test_update_profile_applies_supplied_fields_only() {
        let repo = repo();
        let ann = create_ann(&repo).await;

        let updated = repo
            .update_profile(
                ann.id,
                ProfilePatch {
                    name: Some("Anna".to_owned()),
                    avatar: Some(String::new()),
                    ..ProfilePatch::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.name, "Anna");
        assert_eq!(updated.email, ann.email);
        assert_eq!(updated.password, "pw");
        assert_eq!(updated.avatar, "");
    }

    #[tokio::test]
    async fn test_update_profile_missing_user() {
        let repo = repo();
        let result = repo
            .update_profile(UserId::new(999), ProfilePatch::default())
            .await;
        assert!(matches!(result, Err(RepositoryError::NotFound("User"))));
    }

    #[tokio::test]
    async fn test_wishlist_toggle_is_an_involution() {
        let repo = repo();
        let ann = create_ann(&repo).await;
        let product = ProductId::new(3);

        let added = repo.toggle_wishlist(ann.id, product).await.unwrap();
        assert_eq!(added, vec![product]);

        let removed = repo.toggle_wishlist(ann.id, product).await.unwrap();
        assert!(removed.is_empty());
    }

    #[tokio::test]
    async fn test_wishlist_never_duplicates() {
        let repo = repo();
        let ann = create_ann(&repo).await;

        repo.toggle_wishlist(ann.id, ProductId::new(3)).await.unwrap();
        repo.toggle_wishlist(ann.id, ProductId::new(5)).await.unwrap();
        let wishlist = repo.toggle_wishlist(ann.id, ProductId::new(3)).await.unwrap();

        assert_eq!(wishlist, vec![ProductId::new(5)]);
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let repo = repo();
        let ann = create_ann(&repo).await;

        repo.delete(ann.id).await.unwrap();
        assert!(repo.list_summaries().await.unwrap().is_empty());

        // Deleting again is still a success and changes nothing.
        repo.delete(ann.id).await.unwrap();
        assert!(repo.list_summaries().await.unwrap().is_empty());
    }
}
