//! Borrow records repository for database operations

use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::borrow::{BorrowRecord, NewBorrowRecord},
    models::enums::BorrowStatus,
};

#[derive(Clone)]
pub struct BorrowsRepository {
    pool: Pool<Postgres>,
}

impl BorrowsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get borrow record by ID
    pub async fn get_by_id(&self, id: Uuid) -> AppResult<BorrowRecord> {
        sqlx::query_as::<_, BorrowRecord>("SELECT * FROM borrow_records WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Borrow record with id {} not found", id)))
    }

    /// Create a new borrow record in the `requested` state
    pub async fn create(&self, record: &NewBorrowRecord) -> AppResult<BorrowRecord> {
        let created = sqlx::query_as::<_, BorrowRecord>(
            r#"
            INSERT INTO borrow_records (book_id, book_title, book_author, book_cover_url,
                                        book_description, lender_id, borrower_id,
                                        borrower_email, days_left, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, 'requested')
            RETURNING *
            "#,
        )
        .bind(record.book_id)
        .bind(&record.book_title)
        .bind(&record.book_author)
        .bind(&record.book_cover_url)
        .bind(&record.book_description)
        .bind(&record.lender_id)
        .bind(&record.borrower_id)
        .bind(&record.borrower_email)
        .bind(record.days_left)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    /// Move a record from `from` to `to`, stamping the decision/return time.
    ///
    /// The status guard in the WHERE clause makes the transition a
    /// compare-and-set: a concurrent transition on the same record leaves
    /// exactly one winner and this returns None for the loser.
    pub async fn transition(
        &self,
        id: Uuid,
        from: BorrowStatus,
        to: BorrowStatus,
    ) -> AppResult<Option<BorrowRecord>> {
        let updated = sqlx::query_as::<_, BorrowRecord>(
            r#"
            UPDATE borrow_records
            SET status = $3,
                decided_at = CASE WHEN $3 IN ('approved', 'declined') THEN NOW() ELSE decided_at END,
                returned_at = CASE WHEN $3 = 'returned' THEN NOW() ELSE returned_at END
            WHERE id = $1 AND status = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(from)
        .bind(to)
        .fetch_optional(&self.pool)
        .await?;

        Ok(updated)
    }

    /// List records where the given identity is the lender, newest first
    pub async fn list_by_lender(
        &self,
        lender_id: &str,
        status: Option<BorrowStatus>,
    ) -> AppResult<Vec<BorrowRecord>> {
        let records = match status {
            Some(status) => {
                sqlx::query_as::<_, BorrowRecord>(
                    r#"
                    SELECT * FROM borrow_records
                    WHERE lender_id = $1 AND status = $2
                    ORDER BY created_at DESC
                    "#,
                )
                .bind(lender_id)
                .bind(status)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, BorrowRecord>(
                    "SELECT * FROM borrow_records WHERE lender_id = $1 ORDER BY created_at DESC",
                )
                .bind(lender_id)
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(records)
    }

    /// List records where the given identity is the borrower, newest first
    pub async fn list_by_borrower(&self, borrower_id: &str) -> AppResult<Vec<BorrowRecord>> {
        let records = sqlx::query_as::<_, BorrowRecord>(
            "SELECT * FROM borrow_records WHERE borrower_id = $1 ORDER BY created_at DESC",
        )
        .bind(borrower_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    /// Whether the borrower already has a live request (requested or approved) for this book
    pub async fn has_open_request(&self, book_id: Uuid, borrower_id: &str) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM borrow_records
                WHERE book_id = $1 AND borrower_id = $2 AND status IN ('requested', 'approved')
            )
            "#,
        )
        .bind(book_id)
        .bind(borrower_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }
}
