//! Caller identity extraction.
//!
//! Token verification happens upstream; by the time a request reaches this
//! service the gateway has set `X-User-Id` to the verified user's id.

use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::domain::foundation::{CommandMetadata, UserId};

use super::error::ErrorResponse;

pub const USER_ID_HEADER: &str = "X-User-Id";
pub const CORRELATION_ID_HEADER: &str = "X-Correlation-Id";

/// The calling user, taken from the `X-User-Id` header.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
    pub correlation_id: Option<String>,
}

impl AuthenticatedUser {
    /// Metadata for commands issued on behalf of this caller.
    pub fn metadata(&self) -> CommandMetadata {
        let metadata = CommandMetadata::new(self.user_id);
        match &self.correlation_id {
            Some(id) => metadata.with_correlation_id(id.clone()),
            None => metadata,
        }
    }
}

/// Rejection for a missing or malformed `X-User-Id` header.
pub struct AuthenticationRequired;

impl IntoResponse for AuthenticationRequired {
    fn into_response(self) -> Response {
        let error = ErrorResponse::new("AUTHENTICATION_REQUIRED", "Authentication is required");
        (StatusCode::UNAUTHORIZED, Json(error)).into_response()
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AuthenticationRequired;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_id = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse::<UserId>().ok())
            .ok_or(AuthenticationRequired)?;

        let correlation_id = parts
            .headers
            .get(CORRELATION_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        Ok(AuthenticatedUser {
            user_id,
            correlation_id,
        })
    }
}
