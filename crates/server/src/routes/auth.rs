//! Account routes: signup, login, profile updates, wishlist toggling.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use paper_cart_core::{Email, ProductId, UserId};

use crate::db::RepositoryError;
use crate::db::users::ProfilePatch;
use crate::error::{AppError, Result};
use crate::extract::{LenientJson, loose_id, supplied};
use crate::models::PublicUser;
use crate::state::AppState;

/// Response carrying the credential-free account view.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub success: bool,
    pub message: String,
    pub user: PublicUser,
}

impl UserResponse {
    fn new(message: &str, user: PublicUser) -> Self {
        Self {
            success: true,
            message: message.to_owned(),
            user,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct SignupRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// POST /api/signup
pub async fn signup(
    State(state): State<AppState>,
    LenientJson(req): LenientJson<SignupRequest>,
) -> Result<(StatusCode, Json<UserResponse>)> {
    let (Some(name), Some(email), Some(password)) = (
        supplied(req.name),
        supplied(req.email),
        supplied(req.password),
    ) else {
        return Err(AppError::BadRequest("All fields required".to_owned()));
    };

    let email = Email::parse(&email).map_err(|err| AppError::BadRequest(err.to_string()))?;
    let user = state.users().create(name, email, password).await?;

    Ok((
        StatusCode::CREATED,
        Json(UserResponse::new("Account created!", user.public())),
    ))
}

#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// POST /api/login
pub async fn login(
    State(state): State<AppState>,
    LenientJson(req): LenientJson<LoginRequest>,
) -> Result<Json<UserResponse>> {
    let (Some(email), Some(password)) = (supplied(req.email), supplied(req.password)) else {
        return Err(AppError::BadRequest("All fields required".to_owned()));
    };

    let user = state.users().authenticate(&email, &password).await?;
    Ok(Json(UserResponse::new("Login successful!", user.public())))
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    #[serde(default)]
    pub user_id: Value,
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    /// Unlike the other fields, an explicitly-empty avatar is applied: it
    /// clears the stored avatar.
    pub avatar: Option<String>,
}

/// POST /api/profile/update
pub async fn update_profile(
    State(state): State<AppState>,
    LenientJson(req): LenientJson<UpdateProfileRequest>,
) -> Result<Json<UserResponse>> {
    let id = loose_id(&req.user_id)
        .ok_or(AppError::Repository(RepositoryError::NotFound("User")))?;

    let email = match supplied(req.email) {
        Some(raw) => {
            Some(Email::parse(&raw).map_err(|err| AppError::BadRequest(err.to_string()))?)
        }
        None => None,
    };

    let patch = ProfilePatch {
        name: supplied(req.name),
        email,
        password: supplied(req.password),
        avatar: req.avatar,
    };

    let user = state.users().update_profile(UserId::new(id), patch).await?;
    Ok(Json(UserResponse::new("Profile updated!", user.public())))
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleWishlistRequest {
    #[serde(default)]
    pub user_id: Value,
    #[serde(default)]
    pub product_id: Value,
}

/// Response carrying the account's wishlist after a toggle.
#[derive(Debug, Serialize)]
pub struct WishlistResponse {
    pub success: bool,
    pub wishlist: Vec<ProductId>,
}

/// POST /api/wishlist/toggle
pub async fn toggle_wishlist(
    State(state): State<AppState>,
    LenientJson(req): LenientJson<ToggleWishlistRequest>,
) -> Result<Json<WishlistResponse>> {
    let user_id = loose_id(&req.user_id)
        .ok_or(AppError::Repository(RepositoryError::NotFound("User")))?;
    let product_id = loose_id(&req.product_id)
        .ok_or_else(|| AppError::BadRequest("Valid productId required".to_owned()))?;

    let wishlist = state
        .users()
        .toggle_wishlist(UserId::new(user_id), ProductId::new(product_id))
        .await?;

    Ok(Json(WishlistResponse {
        success: true,
        wishlist,
    }))
}
