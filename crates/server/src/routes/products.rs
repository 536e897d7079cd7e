//! Catalog routes.

use axum::extract::{FromRequest, Multipart, Path, Request, State};
use axum::http::{StatusCode, header};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use paper_cart_core::ProductId;

use crate::db::products::{NewProduct, ProductPatch};
use crate::error::{AppError, Result};
use crate::extract::{ApiMessage, LenientJson, loose_f64, supplied};
use crate::models::{Product, Review};
use crate::state::AppState;

/// Response carrying one catalog item. Mutations set a message; plain
/// fetches leave it out.
#[derive(Debug, Serialize)]
pub struct ProductResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub message: String,
    pub product: Product,
}

/// Response carrying the full catalog.
#[derive(Debug, Serialize)]
pub struct ProductsResponse {
    pub success: bool,
    pub products: Vec<Product>,
}

/// GET /api/products
pub async fn list(State(state): State<AppState>) -> Result<Json<ProductsResponse>> {
    let products = state.products().list().await?;
    Ok(Json(ProductsResponse {
        success: true,
        products,
    }))
}

/// GET /api/products/{id}
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Json<ProductResponse>> {
    let product = state.products().get(id).await?;
    Ok(Json(ProductResponse {
        success: true,
        message: String::new(),
        product,
    }))
}

/// Accumulated creation fields, from either body flavor.
#[derive(Debug, Default)]
struct ProductDraft {
    name: Option<String>,
    price: Option<f64>,
    category: Option<String>,
    image: Option<String>,
    description: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct AddProductBody {
    name: Option<String>,
    #[serde(default)]
    price: Value,
    category: Option<String>,
    image: Option<String>,
    description: Option<String>,
}

/// POST /api/products/add
///
/// Accepts either a JSON body or `multipart/form-data` with an optional
/// `image` file part; an uploaded file wins over an `image` text field.
pub async fn add(
    State(state): State<AppState>,
    req: Request,
) -> Result<(StatusCode, Json<ProductResponse>)> {
    let is_multipart = req
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("multipart/form-data"));

    let draft = if is_multipart {
        read_multipart(&state, req).await?
    } else {
        read_json(req).await
    };

    // Zero is treated as "price not supplied", like the empty string for
    // the text fields.
    let (Some(name), Some(price), Some(category)) = (
        supplied(draft.name),
        draft.price.filter(|price| *price > 0.0),
        supplied(draft.category),
    ) else {
        return Err(AppError::BadRequest("Required fields missing".to_owned()));
    };

    let product = state
        .products()
        .create(NewProduct {
            name,
            price,
            category,
            image: draft.image.unwrap_or_default(),
            description: draft.description.unwrap_or_default(),
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ProductResponse {
            success: true,
            message: "Product added!".to_owned(),
            product,
        }),
    ))
}

async fn read_json(req: Request) -> ProductDraft {
    let LenientJson(body) = LenientJson::<AddProductBody>::from_request(req, &())
        .await
        .unwrap_or_else(|never| match never {});

    ProductDraft {
        name: body.name,
        price: loose_f64(&body.price),
        category: body.category,
        image: body.image,
        description: body.description,
    }
}

async fn read_multipart(state: &AppState, req: Request) -> Result<ProductDraft> {
    let bad_request = |err: axum::extract::multipart::MultipartError| {
        AppError::BadRequest(err.to_string())
    };

    let mut multipart = Multipart::from_request(req, &()).await.map_err(|err| {
        AppError::BadRequest(err.to_string())
    })?;

    let mut draft = ProductDraft::default();
    while let Some(field) = multipart.next_field().await.map_err(bad_request)? {
        let Some(field_name) = field.name().map(str::to_owned) else {
            continue;
        };

        match field_name.as_str() {
            "image" => {
                if let Some(file_name) = field.file_name().map(str::to_owned) {
                    let content_type = field
                        .content_type()
                        .map(str::to_owned)
                        .unwrap_or_default();
                    let data = field.bytes().await.map_err(bad_request)?;
                    if !data.is_empty() {
                        let reference = state
                            .uploads()
                            .save_image(&file_name, &content_type, data)
                            .await?;
                        draft.image = Some(reference);
                    }
                } else if draft.image.is_none() {
                    // Text field: an external image URL.
                    draft.image = Some(field.text().await.map_err(bad_request)?);
                }
            }
            "name" => draft.name = Some(field.text().await.map_err(bad_request)?),
            "price" => {
                let raw = field.text().await.map_err(bad_request)?;
                draft.price = loose_f64(&Value::String(raw));
            }
            "category" => draft.category = Some(field.text().await.map_err(bad_request)?),
            "description" => draft.description = Some(field.text().await.map_err(bad_request)?),
            _ => {
                // Drain unknown parts so the stream stays consumable.
                let _ = field.bytes().await;
            }
        }
    }

    Ok(draft)
}

#[derive(Debug, Default, Deserialize)]
pub struct EditProductBody {
    name: Option<String>,
    #[serde(default)]
    price: Value,
    category: Option<String>,
    description: Option<String>,
}

/// POST /api/products/edit/{id}
pub async fn edit(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
    LenientJson(body): LenientJson<EditProductBody>,
) -> Result<Json<ProductResponse>> {
    let patch = ProductPatch {
        name: supplied(body.name),
        price: loose_f64(&body.price).filter(|price| *price != 0.0),
        category: supplied(body.category),
        description: supplied(body.description),
    };

    let product = state.products().update(id, patch).await?;
    Ok(Json(ProductResponse {
        success: true,
        message: "Product updated!".to_owned(),
        product,
    }))
}

/// DELETE /api/products/delete/{id}
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Json<ApiMessage>> {
    state.products().delete(id).await?;
    Ok(Json(ApiMessage::ok("Product deleted!")))
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewBody {
    pub user_name: Option<String>,
    #[serde(default)]
    pub rating: Value,
    pub comment: Option<String>,
}

/// Response carrying the appended review.
#[derive(Debug, Serialize)]
pub struct ReviewResponse {
    pub success: bool,
    pub message: String,
    pub review: Review,
}

/// POST /api/products/{id}/review
pub async fn add_review(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
    LenientJson(body): LenientJson<ReviewBody>,
) -> Result<(StatusCode, Json<ReviewResponse>)> {
    let rating = loose_f64(&body.rating)
        .ok_or_else(|| AppError::BadRequest("Valid rating required".to_owned()))?;

    let review = state
        .products()
        .add_review(
            id,
            body.user_name.unwrap_or_default(),
            rating,
            body.comment.unwrap_or_default(),
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ReviewResponse {
            success: true,
            message: "Review added!".to_owned(),
            review,
        }),
    ))
}
