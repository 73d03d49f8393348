//! # Caller Identity
//!
//! Sessions are issued upstream. The gateway in front of this service
//! authenticates the caller and forwards their id in the `X-User-Id` header;
//! [`CurrentUser`] reads it and rejects requests without a valid UUID.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use calhub_core::errors::CalError;
use uuid::Uuid;

use super::error_handling::AppError;

pub const USER_ID_HEADER: &str = "x-user-id";

/// The authenticated caller. Extract it before any body extractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentUser(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = parts.headers.get(USER_ID_HEADER).ok_or_else(|| {
            AppError(CalError::Unauthenticated("Missing X-User-Id header".to_string()))
        })?;

        let user_id = header
            .to_str()
            .ok()
            .and_then(|value| Uuid::parse_str(value.trim()).ok())
            .ok_or_else(|| {
                AppError(CalError::Unauthenticated("Invalid X-User-Id header".to_string()))
            })?;

        Ok(CurrentUser(user_id))
    }
}
