//! Borrow record model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::enums::BorrowStatus;

/// Borrow record linking a borrower to a book and its lender.
///
/// The `book_*` fields are a snapshot of the catalog entry taken when the
/// request was created. They are never re-joined against the catalog, so
/// later edits to the listing do not rewrite borrow history.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BorrowRecord {
    pub id: Uuid,
    pub book_id: Uuid,
    pub book_title: String,
    pub book_author: String,
    pub book_cover_url: Option<String>,
    pub book_description: Option<String>,
    pub lender_id: String,
    pub borrower_id: String,
    pub borrower_email: String,
    /// Agreed loan duration in days, fixed at request time
    pub days_left: i32,
    pub status: BorrowStatus,
    pub created_at: DateTime<Utc>,
    pub decided_at: Option<DateTime<Utc>>,
    pub returned_at: Option<DateTime<Utc>>,
}

/// Create borrow request. The borrower is the authenticated caller; the
/// lender and the book snapshot are resolved server-side from the catalog.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBorrowRequest {
    pub book_id: Uuid,
    #[validate(email(message = "Invalid email format"))]
    pub borrower_email: String,
    /// Requested loan duration; defaults to the configured duration (14 days)
    pub days_left: Option<i32>,
}

/// Fields stamped into a new borrow record by the service
#[derive(Debug, Clone)]
pub struct NewBorrowRecord {
    pub book_id: Uuid,
    pub book_title: String,
    pub book_author: String,
    pub book_cover_url: Option<String>,
    pub book_description: Option<String>,
    pub lender_id: String,
    pub borrower_id: String,
    pub borrower_email: String,
    pub days_left: i32,
}
