//! Request decoding and response envelope helpers.
//!
//! The API accepts whatever the client sends and funnels it into ordinary
//! field validation: a malformed body is not an error in itself, it is a
//! body with no usable fields. [`LenientJson`] implements that recovery,
//! and the coercion helpers implement the loose typing (numbers that may
//! arrive as strings, ids that may arrive as numbers) inherited from the
//! wire format.

use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// The shared `{success, message}` response envelope.
#[derive(Debug, Serialize)]
pub struct ApiMessage {
    pub success: bool,
    pub message: String,
}

impl ApiMessage {
    /// A success envelope.
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    /// A failure envelope.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// JSON body extractor that recovers malformed or absent bodies to
/// `T::default()` instead of rejecting the request. Callers then fail the
/// ordinary "required field missing" validation rather than a generic
/// parse error.
#[derive(Debug)]
pub struct LenientJson<T>(pub T);

impl<S, T> FromRequest<S> for LenientJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Default,
{
    type Rejection = std::convert::Infallible;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await.unwrap_or_default();
        let value = serde_json::from_slice(&bytes).unwrap_or_else(|err| {
            if !bytes.is_empty() {
                tracing::debug!(error = %err, "unparseable request body, treating as empty");
            }
            T::default()
        });
        Ok(Self(value))
    }
}

/// Coerce a JSON value that should be an id: accepts a number or a string
/// holding one.
pub(crate) fn loose_id(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

/// Coerce a JSON value that should be numeric: accepts a number or a string
/// holding one. Non-finite results are rejected.
pub(crate) fn loose_f64(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    parsed.filter(|n| n.is_finite())
}

/// A string option where `None` and `Some("")` both mean "not supplied",
/// the documented patch semantics for most fields.
pub(crate) fn supplied(field: Option<String>) -> Option<String> {
    field.filter(|value| !value.is_empty())
}
