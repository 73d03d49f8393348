//! # Error Handling Middleware
//!
//! Maps domain errors to HTTP status codes and `{"error": message}` bodies
//! so every endpoint fails the same way.

use axum::{
    Json,
    extract::{FromRequest, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use calhub_core::{availability::SlotError, errors::CalError, providers::ProviderError};
use serde_json::json;

/// Application error wrapper that provides HTTP status code mapping
///
/// # Example
///
/// ```
/// use axum::Json;
/// use calhub_api::middleware::error_handling::AppError;
/// use calhub_core::errors::CalError;
///
/// async fn handler(found: bool) -> Result<Json<&'static str>, AppError> {
///     if !found {
///         return Err(AppError(CalError::NotFound("Task not found".to_string())));
///     }
///     Ok(Json("ok"))
/// }
/// # fn main() {}
/// ```
#[derive(Debug)]
pub struct AppError(pub CalError);

impl AppError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            CalError::NotFound(_) => StatusCode::NOT_FOUND,
            CalError::Validation(_) => StatusCode::BAD_REQUEST,
            CalError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            CalError::NotConnected(_) => StatusCode::UNAUTHORIZED,
            CalError::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            CalError::Upstream(_) => StatusCode::BAD_GATEWAY,
            CalError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            CalError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("Request failed: {:?}", self.0);
        }

        let body = Json(json!({ "error": self.0.message() }));
        (status, body).into_response()
    }
}

impl From<CalError> for AppError {
    fn from(err: CalError) -> Self {
        AppError(err)
    }
}

/// Malformed, mistyped or non-JSON request bodies are client mistakes.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError(CalError::Validation(rejection.body_text()))
    }
}

/// Store failures surface as database errors.
impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        AppError(CalError::Database(err))
    }
}

/// A stored schedule the engine refuses is a 422, not a client mistake.
impl From<SlotError> for AppError {
    fn from(err: SlotError) -> Self {
        AppError(CalError::Unprocessable(err.to_string()))
    }
}

/// JSON body extractor whose rejections use the `{"error": message}` shape.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// Converts a provider failure, naming the service in the not-connected
/// message (e.g. "Outlook not connected").
pub fn provider_error(err: ProviderError, service: &str) -> AppError {
    match err {
        ProviderError::NotConnected => {
            AppError(CalError::NotConnected(format!("{} not connected", service)))
        }
        ProviderError::Upstream(reason) => AppError(CalError::Upstream(reason)),
    }
}
