//! User profile mirror model and related types
//!
//! Identity is owned by the external provider; the local store only keeps a
//! denormalized profile keyed by the provider's opaque id.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Denormalized profile mirror of an externally-managed identity
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct UserProfile {
    /// Opaque identifier from the external identity provider
    pub id: String,
    pub name: String,
    pub email: String,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Upsert profile request (callers may only write their own mirror)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpsertProfile {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    pub avatar_url: Option<String>,
}
