//! Order routes.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use paper_cart_core::OrderId;

use crate::db::orders::NewOrder;
use crate::error::{AppError, Result};
use crate::extract::{ApiMessage, LenientJson, loose_f64, supplied};
use crate::models::Order;
use crate::state::AppState;

/// Response carrying one order.
#[derive(Debug, Serialize)]
pub struct OrderResponse {
    pub success: bool,
    pub message: String,
    pub order: Order,
}

/// Response carrying a list of orders.
#[derive(Debug, Serialize)]
pub struct OrdersResponse {
    pub success: bool,
    pub orders: Vec<Order>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrderBody {
    #[serde(default)]
    pub user_id: Value,
    pub user_name: Option<String>,
    #[serde(default)]
    pub items: Value,
    #[serde(default)]
    pub total: Value,
    #[serde(default)]
    pub address: Value,
}

/// POST /api/orders/place
pub async fn place(
    State(state): State<AppState>,
    LenientJson(body): LenientJson<PlaceOrderBody>,
) -> Result<(StatusCode, Json<OrderResponse>)> {
    // An order is only as valid as its line items and total; zero counts
    // as absent for the total, mirroring the creation-side price check.
    let Some(total) = loose_f64(&body.total).filter(|total| *total != 0.0) else {
        return Err(AppError::BadRequest("Invalid order data".to_owned()));
    };
    if body.items.is_null() {
        return Err(AppError::BadRequest("Invalid order data".to_owned()));
    }

    let order = state
        .orders()
        .place(NewOrder {
            user_id: body.user_id,
            user_name: body.user_name.unwrap_or_default(),
            items: body.items,
            total,
            address: body.address,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(OrderResponse {
            success: true,
            message: "Order placed!".to_owned(),
            order,
        }),
    ))
}

/// GET /api/orders/user/{user_id}
///
/// The path parameter stays textual: the stored `userId` is loosely
/// matched, so numeric and string forms both find their orders.
pub async fn for_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<OrdersResponse>> {
    let orders = state.orders().list_for_user(&user_id).await?;
    Ok(Json(OrdersResponse {
        success: true,
        orders,
    }))
}

/// GET /api/orders/all
pub async fn list_all(State(state): State<AppState>) -> Result<Json<OrdersResponse>> {
    let orders = state.orders().list_all().await?;
    Ok(Json(OrdersResponse {
        success: true,
        orders,
    }))
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateStatusBody {
    pub status: Option<String>,
}

/// POST /api/orders/status/{id}
pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<OrderId>,
    LenientJson(body): LenientJson<UpdateStatusBody>,
) -> Result<Json<ApiMessage>> {
    let status = supplied(body.status)
        .ok_or_else(|| AppError::BadRequest("Status is required".to_owned()))?;

    state.orders().update_status(id, status).await?;
    Ok(Json(ApiMessage::ok("Status updated!")))
}

/// DELETE /api/orders/delete/{id}
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<OrderId>,
) -> Result<Json<ApiMessage>> {
    state.orders().delete(id).await?;
    Ok(Json(ApiMessage::ok("Order deleted!")))
}
