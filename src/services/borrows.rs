//! Borrow request and approval service

use uuid::Uuid;
use validator::Validate;

use crate::{
    config::LendingConfig,
    error::{AppError, AppResult},
    models::borrow::{BorrowRecord, CreateBorrowRequest, NewBorrowRecord},
    models::enums::BorrowStatus,
    repository::Repository,
};

#[derive(Clone)]
pub struct BorrowsService {
    repository: Repository,
    lending: LendingConfig,
}

impl BorrowsService {
    pub fn new(repository: Repository, lending: LendingConfig) -> Self {
        Self { repository, lending }
    }

    /// Create a borrow request for a book on behalf of the caller.
    ///
    /// The lender and the book snapshot are resolved from the catalog here,
    /// not trusted from the request body. The snapshot keeps the record
    /// stable against later catalog edits.
    pub async fn create_request(
        &self,
        borrower_id: &str,
        request: CreateBorrowRequest,
    ) -> AppResult<BorrowRecord> {
        request
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let days_left = resolve_loan_days(request.days_left, &self.lending)?;

        let book = self.repository.books.get_by_id(request.book_id).await?;

        if book.owner_id == borrower_id {
            return Err(AppError::Validation(
                "You cannot borrow your own book".to_string(),
            ));
        }
        if !book.available {
            return Err(AppError::Conflict(
                "Book is not available for borrowing".to_string(),
            ));
        }
        if self
            .repository
            .borrows
            .has_open_request(book.id, borrower_id)
            .await?
        {
            return Err(AppError::Conflict(
                "You already have an open request for this book".to_string(),
            ));
        }

        let record = self
            .repository
            .borrows
            .create(&NewBorrowRecord {
                book_id: book.id,
                book_title: book.title,
                book_author: book.author,
                book_cover_url: book.cover_url,
                book_description: book.description,
                lender_id: book.owner_id,
                borrower_id: borrower_id.to_string(),
                borrower_email: request.borrower_email,
                days_left,
            })
            .await?;

        tracing::info!(
            borrow_id = %record.id,
            book_id = %record.book_id,
            lender = %record.lender_id,
            borrower = %record.borrower_id,
            "borrow requested"
        );

        Ok(record)
    }

    /// Lender approves a pending request; the book goes off the shelf
    pub async fn approve(&self, caller_id: &str, id: Uuid) -> AppResult<BorrowRecord> {
        let record = self.transition(caller_id, id, BorrowStatus::Approved).await?;
        self.repository.books.set_available(record.book_id, false).await?;
        Ok(record)
    }

    /// Lender declines a pending request
    pub async fn decline(&self, caller_id: &str, id: Uuid) -> AppResult<BorrowRecord> {
        self.transition(caller_id, id, BorrowStatus::Declined).await
    }

    /// Lender records the book as returned; the book is listed again
    pub async fn mark_returned(&self, caller_id: &str, id: Uuid) -> AppResult<BorrowRecord> {
        let record = self.transition(caller_id, id, BorrowStatus::Returned).await?;
        self.repository.books.set_available(record.book_id, true).await?;
        Ok(record)
    }

    /// Requests against the caller's books, optionally filtered by status
    pub async fn list_incoming(
        &self,
        lender_id: &str,
        status: Option<BorrowStatus>,
    ) -> AppResult<Vec<BorrowRecord>> {
        self.repository.borrows.list_by_lender(lender_id, status).await
    }

    /// The caller's own requests
    pub async fn list_outgoing(&self, borrower_id: &str) -> AppResult<Vec<BorrowRecord>> {
        self.repository.borrows.list_by_borrower(borrower_id).await
    }

    /// Borrow records a lender has approved
    pub async fn list_approved_books(&self, lender_id: &str) -> AppResult<Vec<BorrowRecord>> {
        self.repository
            .borrows
            .list_by_lender(lender_id, Some(BorrowStatus::Approved))
            .await
    }

    /// Run one lender-triggered state machine transition
    async fn transition(
        &self,
        caller_id: &str,
        id: Uuid,
        to: BorrowStatus,
    ) -> AppResult<BorrowRecord> {
        let record = self.repository.borrows.get_by_id(id).await?;

        if record.lender_id != caller_id {
            return Err(AppError::Authorization(
                "Only the lender may decide on this borrow request".to_string(),
            ));
        }
        if !record.status.can_transition_to(to) {
            return Err(AppError::Conflict(format!(
                "Cannot move borrow request from {} to {}",
                record.status, to
            )));
        }

        // The repository re-checks the current status, so a concurrent
        // decision on the same record cannot double-fire.
        let updated = self
            .repository
            .borrows
            .transition(id, record.status, to)
            .await?
            .ok_or_else(|| {
                AppError::Conflict("Borrow request was decided concurrently".to_string())
            })?;

        tracing::info!(borrow_id = %id, status = %to, "borrow transition");

        Ok(updated)
    }
}

/// Resolve the loan duration for a new request against the lending rules
fn resolve_loan_days(requested: Option<i32>, lending: &LendingConfig) -> AppResult<i32> {
    let days = requested.unwrap_or(lending.default_loan_days);
    if days < 1 || days > lending.max_loan_days {
        return Err(AppError::Validation(format!(
            "Loan duration must be between 1 and {} days",
            lending.max_loan_days
        )));
    }
    Ok(days)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lending() -> LendingConfig {
        LendingConfig {
            default_loan_days: 14,
            max_loan_days: 60,
        }
    }

    #[test]
    fn omitted_duration_falls_back_to_default() {
        assert_eq!(resolve_loan_days(None, &lending()).unwrap(), 14);
    }

    #[test]
    fn explicit_duration_is_kept() {
        assert_eq!(resolve_loan_days(Some(7), &lending()).unwrap(), 7);
        assert_eq!(resolve_loan_days(Some(60), &lending()).unwrap(), 60);
    }

    #[test]
    fn out_of_range_duration_is_rejected() {
        assert!(resolve_loan_days(Some(0), &lending()).is_err());
        assert!(resolve_loan_days(Some(-3), &lending()).is_err());
        assert!(resolve_loan_days(Some(61), &lending()).is_err());
    }
}
