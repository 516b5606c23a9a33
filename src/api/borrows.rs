//! Borrow request and approval endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::borrow::{BorrowRecord, CreateBorrowRequest},
};

use super::AuthenticatedUser;

/// Borrow creation acknowledgment
#[derive(Serialize, ToSchema)]
pub struct BorrowResponse {
    /// Borrow record ID
    pub id: Uuid,
    /// Status message
    pub message: String,
}

/// Borrow record listing response
#[derive(Serialize, ToSchema)]
pub struct BorrowRequestsResponse {
    pub requests: Vec<BorrowRecord>,
}

/// Approved books listing response
#[derive(Serialize, ToSchema)]
pub struct ApprovedBooksResponse {
    pub approved_books: Vec<BorrowRecord>,
}

/// Incoming request filters
#[derive(Debug, Deserialize, IntoParams)]
pub struct IncomingQuery {
    /// Filter by status code (requested, approved, declined, returned)
    pub status: Option<String>,
}

/// Approved books query
#[derive(Debug, Deserialize, IntoParams)]
pub struct ApprovedBooksQuery {
    /// Lender identity to list approvals for
    pub lender_id: Option<String>,
}

/// Create a borrow request for a book
#[utoipa::path(
    post,
    path = "/borrow-requests",
    tag = "borrows",
    request_body = CreateBorrowRequest,
    responses(
        (status = 201, description = "Borrow request recorded", body = BorrowResponse),
        (status = 400, description = "Invalid request"),
        (status = 401, description = "No caller identity"),
        (status = 404, description = "No such book"),
        (status = 409, description = "Book not available or request already open")
    )
)]
pub async fn create_borrow_request(
    State(state): State<crate::AppState>,
    AuthenticatedUser(user_id): AuthenticatedUser,
    Json(request): Json<CreateBorrowRequest>,
) -> AppResult<(StatusCode, Json<BorrowResponse>)> {
    let record = state.services.borrows.create_request(&user_id, request).await?;

    Ok((
        StatusCode::CREATED,
        Json(BorrowResponse {
            id: record.id,
            message: "Book borrowed successfully".to_string(),
        }),
    ))
}

/// List borrow requests against the caller's books
#[utoipa::path(
    get,
    path = "/borrow-requests",
    tag = "borrows",
    params(IncomingQuery),
    responses(
        (status = 200, description = "Requests where the caller is the lender", body = BorrowRequestsResponse),
        (status = 400, description = "Invalid status filter"),
        (status = 401, description = "No caller identity")
    )
)]
pub async fn list_incoming(
    State(state): State<crate::AppState>,
    AuthenticatedUser(user_id): AuthenticatedUser,
    Query(query): Query<IncomingQuery>,
) -> AppResult<Json<BorrowRequestsResponse>> {
    let status = query
        .status
        .as_deref()
        .map(str::parse)
        .transpose()
        .map_err(|e: String| AppError::Validation(e))?;

    let requests = state.services.borrows.list_incoming(&user_id, status).await?;
    Ok(Json(BorrowRequestsResponse { requests }))
}

/// List the caller's own borrow requests
#[utoipa::path(
    get,
    path = "/borrow-requests/outgoing",
    tag = "borrows",
    responses(
        (status = 200, description = "Requests where the caller is the borrower", body = BorrowRequestsResponse),
        (status = 401, description = "No caller identity")
    )
)]
pub async fn list_outgoing(
    State(state): State<crate::AppState>,
    AuthenticatedUser(user_id): AuthenticatedUser,
) -> AppResult<Json<BorrowRequestsResponse>> {
    let requests = state.services.borrows.list_outgoing(&user_id).await?;
    Ok(Json(BorrowRequestsResponse { requests }))
}

/// Approve a pending borrow request (lender only)
#[utoipa::path(
    post,
    path = "/borrow-requests/{id}/approve",
    tag = "borrows",
    params(
        ("id" = Uuid, Path, description = "Borrow record ID")
    ),
    responses(
        (status = 200, description = "Request approved", body = BorrowRecord),
        (status = 403, description = "Caller is not the lender"),
        (status = 404, description = "No such borrow record"),
        (status = 409, description = "Request is not pending")
    )
)]
pub async fn approve_borrow_request(
    State(state): State<crate::AppState>,
    AuthenticatedUser(user_id): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<BorrowRecord>> {
    let record = state.services.borrows.approve(&user_id, id).await?;
    Ok(Json(record))
}

/// Decline a pending borrow request (lender only)
#[utoipa::path(
    post,
    path = "/borrow-requests/{id}/decline",
    tag = "borrows",
    params(
        ("id" = Uuid, Path, description = "Borrow record ID")
    ),
    responses(
        (status = 200, description = "Request declined", body = BorrowRecord),
        (status = 403, description = "Caller is not the lender"),
        (status = 404, description = "No such borrow record"),
        (status = 409, description = "Request is not pending")
    )
)]
pub async fn decline_borrow_request(
    State(state): State<crate::AppState>,
    AuthenticatedUser(user_id): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<BorrowRecord>> {
    let record = state.services.borrows.decline(&user_id, id).await?;
    Ok(Json(record))
}

/// Record an approved loan as returned (lender only)
#[utoipa::path(
    post,
    path = "/borrow-requests/{id}/return",
    tag = "borrows",
    params(
        ("id" = Uuid, Path, description = "Borrow record ID")
    ),
    responses(
        (status = 200, description = "Loan closed", body = BorrowRecord),
        (status = 403, description = "Caller is not the lender"),
        (status = 404, description = "No such borrow record"),
        (status = 409, description = "Loan is not approved")
    )
)]
pub async fn return_borrow_request(
    State(state): State<crate::AppState>,
    AuthenticatedUser(user_id): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<BorrowRecord>> {
    let record = state.services.borrows.mark_returned(&user_id, id).await?;
    Ok(Json(record))
}

/// List borrow records a lender has approved
#[utoipa::path(
    get,
    path = "/approved-books",
    tag = "borrows",
    params(ApprovedBooksQuery),
    responses(
        (status = 200, description = "Approved borrow records for the lender", body = ApprovedBooksResponse),
        (status = 400, description = "Missing or blank lender_id")
    )
)]
pub async fn list_approved_books(
    State(state): State<crate::AppState>,
    Query(query): Query<ApprovedBooksQuery>,
) -> AppResult<Json<ApprovedBooksResponse>> {
    // Boundary validation: reject before touching the store
    let lender_id = query
        .lender_id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .ok_or_else(|| AppError::Validation("lender_id is required".to_string()))?;

    let approved_books = state.services.borrows.list_approved_books(lender_id).await?;
    Ok(Json(ApprovedBooksResponse { approved_books }))
}
