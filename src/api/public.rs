//! Public API types

use axum::Json;
use axum::response::{IntoResponse, Response};
use http::StatusCode;
use serde::Serialize;
use serde_json::json;

// Responses

/// Envelope for successful asset responses
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Json<Self> {
        Json(Self {
            success: true,
            data,
        })
    }
}

// Errors

/// A single rejected request parameter
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

#[derive(Debug)]
pub enum ApiError {
    /// Request parameters failed validation
    InvalidParams(Vec<FieldError>),
    /// A well-formed request this service won't handle
    BadRequest(String),
    Unauthorized,
    NotFound(&'static str),
    Internal(anyhow::Error),
}

/// Convert `ApiError` into an Axum compatible response.
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::InvalidParams(details) => (
                StatusCode::BAD_REQUEST,
                json!({
                    "success": false,
                    "error": "Invalid parameters",
                    "details": details,
                }),
            ),
            ApiError::BadRequest(message) => (
                StatusCode::BAD_REQUEST,
                json!({ "success": false, "error": message }),
            ),
            ApiError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                json!({ "success": false, "error": "Unauthorized" }),
            ),
            ApiError::NotFound(message) => (
                StatusCode::NOT_FOUND,
                json!({ "success": false, "error": message }),
            ),
            ApiError::Internal(err) => {
                // Always log the error, never send it to the client
                tracing::error!("{:#}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "success": false, "error": "Internal server error" }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

/// Enables using `?` on functions that return `Result<_,
/// anyhow::Error>` to turn them into `Result<_, ApiError>`
impl<E> From<E> for ApiError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self::Internal(err.into())
    }
}

// Re-export public types from each route

pub mod assets {
    pub use crate::api::routes::assets::public::*;
}

pub mod auth {
    pub use crate::api::routes::auth::public::*;
}

pub mod user {
    pub use crate::api::routes::user::public::*;
}
