//! Admin account routes: listing and deletion.

use axum::Json;
use axum::extract::{Path, State};
use serde::Serialize;

use paper_cart_core::UserId;

use crate::error::Result;
use crate::extract::ApiMessage;
use crate::models::UserSummary;
use crate::state::AppState;

/// Response carrying the masked account listing.
#[derive(Debug, Serialize)]
pub struct UsersResponse {
    pub success: bool,
    pub users: Vec<UserSummary>,
}

/// GET /api/users
pub async fn list(State(state): State<AppState>) -> Result<Json<UsersResponse>> {
    let users = state.users().list_summaries().await?;
    Ok(Json(UsersResponse {
        success: true,
        users,
    }))
}

/// DELETE /api/users/delete/{id}
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<UserId>,
) -> Result<Json<ApiMessage>> {
    state.users().delete(id).await?;
    Ok(Json(ApiMessage::ok("User deleted!")))
}
