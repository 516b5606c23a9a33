//! Book (catalog listing) model and related types

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::enums::{Condition, Genre};

/// Book listing (DB + API)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: Uuid,
    pub title: String,
    pub author: String,
    pub genre: Genre,
    pub condition: Condition,
    pub description: Option<String>,
    /// Asking price; absent for loan-only listings
    #[schema(value_type = Option<String>)]
    pub price: Option<Decimal>,
    pub available: bool,
    /// Opaque identifier from the external identity provider
    pub owner_id: String,
    pub cover_url: Option<String>,
    pub cover_key: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create book request.
/// Genre and condition arrive as codes and are parsed against the closed sets.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBook {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "Author is required"))]
    pub author: String,
    pub genre: String,
    pub condition: String,
    pub description: Option<String>,
    #[schema(value_type = Option<String>)]
    pub price: Option<Decimal>,
    pub cover_url: Option<String>,
    pub cover_key: Option<String>,
}

/// Partial update of a book listing (owner only)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateBook {
    #[validate(length(min = 1, message = "Title must not be blank"))]
    pub title: Option<String>,
    #[validate(length(min = 1, message = "Author must not be blank"))]
    pub author: Option<String>,
    pub genre: Option<String>,
    pub condition: Option<String>,
    pub description: Option<String>,
    #[schema(value_type = Option<String>)]
    pub price: Option<Decimal>,
    pub available: Option<bool>,
    pub cover_url: Option<String>,
    pub cover_key: Option<String>,
}

/// Validated values for a new listing, enums already parsed
#[derive(Debug, Clone)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub genre: Genre,
    pub condition: Condition,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub owner_id: String,
    pub cover_url: Option<String>,
    pub cover_key: Option<String>,
}

/// Validated column values for a book update, enums already parsed
#[derive(Debug, Clone)]
pub struct BookPatch {
    pub title: Option<String>,
    pub author: Option<String>,
    pub genre: Option<Genre>,
    pub condition: Option<Condition>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub available: Option<bool>,
    pub cover_url: Option<String>,
    pub cover_key: Option<String>,
}
