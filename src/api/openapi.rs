//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{books, borrows, health, users};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "BookSwap API",
        version = "1.0.0",
        description = "Peer-to-peer book exchange and lending REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Books
        books::list_books,
        books::get_book,
        books::create_book,
        books::update_book,
        // Borrows
        borrows::create_borrow_request,
        borrows::list_incoming,
        borrows::list_outgoing,
        borrows::approve_borrow_request,
        borrows::decline_borrow_request,
        borrows::return_borrow_request,
        borrows::list_approved_books,
        // Users
        users::list_users,
        users::update_my_profile,
    ),
    components(
        schemas(
            // Books
            crate::models::book::Book,
            crate::models::book::CreateBook,
            crate::models::book::UpdateBook,
            crate::models::enums::Genre,
            crate::models::enums::Condition,
            books::BooksResponse,
            // Borrows
            crate::models::borrow::BorrowRecord,
            crate::models::borrow::CreateBorrowRequest,
            crate::models::enums::BorrowStatus,
            borrows::BorrowResponse,
            borrows::BorrowRequestsResponse,
            borrows::ApprovedBooksResponse,
            // Users
            crate::models::user::UserProfile,
            crate::models::user::UpsertProfile,
            users::UsersResponse,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "books", description = "Book catalog management"),
        (name = "borrows", description = "Borrow requests and lender approvals"),
        (name = "users", description = "User profile mirror")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
