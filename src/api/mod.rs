//! API handlers for BookSwap REST endpoints

pub mod books;
pub mod borrows;
pub mod health;
pub mod openapi;
pub mod users;

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use crate::{error::AppError, AppState};

/// Header carrying the caller identity, asserted by the upstream gateway
/// after the external identity provider has authenticated the request.
pub const USER_ID_HEADER: &str = "x-user-id";

/// Extractor for the authenticated caller's opaque user id
pub struct AuthenticatedUser(pub String);

#[async_trait]
impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &AppState) -> Result<Self, Self::Rejection> {
        let user_id = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| AppError::Authentication("Missing X-User-Id header".to_string()))?;

        Ok(AuthenticatedUser(user_id.to_string()))
    }
}
