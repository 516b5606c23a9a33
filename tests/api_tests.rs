//! API integration tests
//!
//! Run against a live server with: cargo test -- --ignored

use reqwest::Client;
use serde_json::{json, Value};
use uuid::Uuid;

const BASE_URL: &str = "http://localhost:8080/api/v1";

/// Fresh opaque identity for each test, as the identity provider would mint
fn new_identity() -> String {
    format!("user-{}", Uuid::new_v4())
}

async fn create_book(client: &Client, owner: &str, title: &str) -> String {
    let response = client
        .post(format!("{}/books", BASE_URL))
        .header("X-User-Id", owner)
        .json(&json!({
            "title": title,
            "author": "Frank Herbert",
            "genre": "science_fiction",
            "condition": "good"
        }))
        .send()
        .await
        .expect("Failed to send create book request");

    assert_eq!(response.status(), 201);

    let body: Value = response.json().await.expect("Failed to parse response");
    body["id"].as_str().expect("No book ID").to_string()
}

async fn create_borrow_request(client: &Client, borrower: &str, book_id: &str) -> String {
    let response = client
        .post(format!("{}/borrow-requests", BASE_URL))
        .header("X-User-Id", borrower)
        .json(&json!({
            "book_id": book_id,
            "borrower_email": "borrower@example.com"
        }))
        .send()
        .await
        .expect("Failed to send borrow request");

    assert_eq!(response.status(), 201);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "Book borrowed successfully");
    body["id"].as_str().expect("No borrow ID").to_string()
}

async fn approved_books(client: &Client, lender: &str) -> Vec<Value> {
    let response = client
        .get(format!("{}/approved-books?lender_id={}", BASE_URL, lender))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 200);

    let body: Value = response.json().await.expect("Failed to parse response");
    body["approved_books"]
        .as_array()
        .expect("approved_books is not an array")
        .clone()
}

#[tokio::test]
#[ignore]
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_create_book_requires_identity() {
    let client = Client::new();

    let response = client
        .post(format!("{}/books", BASE_URL))
        .json(&json!({
            "title": "Dune",
            "author": "Frank Herbert",
            "genre": "science_fiction",
            "condition": "good"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 401);
}

#[tokio::test]
#[ignore]
async fn test_create_book_rejects_blank_title() {
    let client = Client::new();

    let response = client
        .post(format!("{}/books", BASE_URL))
        .header("X-User-Id", new_identity())
        .json(&json!({
            "title": "   ",
            "author": "Frank Herbert",
            "genre": "science_fiction",
            "condition": "good"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_create_book_rejects_unknown_genre() {
    let client = Client::new();

    let response = client
        .post(format!("{}/books", BASE_URL))
        .header("X-User-Id", new_identity())
        .json(&json!({
            "title": "Dune",
            "author": "Frank Herbert",
            "genre": "space_opera",
            "condition": "good"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_create_and_list_book() {
    let client = Client::new();
    let owner = new_identity();

    let book_id = create_book(&client, &owner, "Dune").await;

    let response = client
        .get(format!("{}/books", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 200);

    let body: Value = response.json().await.expect("Failed to parse response");
    let books = body["books"].as_array().expect("books is not an array");
    assert!(books.iter().any(|b| b["id"] == book_id.as_str()));

    let created = books.iter().find(|b| b["id"] == book_id.as_str()).unwrap();
    assert_eq!(created["available"], true);
    assert_eq!(created["owner_id"], owner.as_str());
}

#[tokio::test]
#[ignore]
async fn test_list_books_is_idempotent() {
    let client = Client::new();

    let first: Value = client
        .get(format!("{}/books", BASE_URL))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    let second: Value = client
        .get(format!("{}/books", BASE_URL))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");

    let ids = |body: &Value| {
        let mut ids: Vec<String> = body["books"]
            .as_array()
            .expect("books is not an array")
            .iter()
            .map(|b| b["id"].as_str().unwrap().to_string())
            .collect();
        ids.sort();
        ids
    };

    assert_eq!(ids(&first), ids(&second));
}

#[tokio::test]
#[ignore]
async fn test_approved_books_requires_lender_id() {
    let client = Client::new();

    let response = client
        .get(format!("{}/approved-books", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 400);

    let response = client
        .get(format!("{}/approved-books?lender_id=", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_cannot_borrow_own_book() {
    let client = Client::new();
    let owner = new_identity();

    let book_id = create_book(&client, &owner, "Dune").await;

    let response = client
        .post(format!("{}/borrow-requests", BASE_URL))
        .header("X-User-Id", &owner)
        .json(&json!({
            "book_id": book_id,
            "borrower_email": "owner@example.com"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_borrow_flow_approve_and_return() {
    let client = Client::new();
    let lender = new_identity();
    let borrower = new_identity();

    let book_id = create_book(&client, &lender, "Dune").await;
    let borrow_id = create_borrow_request(&client, &borrower, &book_id).await;

    // A pending request is not yet an approval
    assert!(approved_books(&client, &lender).await.is_empty());

    // Lender approves
    let response = client
        .post(format!("{}/borrow-requests/{}/approve", BASE_URL, borrow_id))
        .header("X-User-Id", &lender)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 200);

    let record: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(record["status"], "approved");
    assert_eq!(record["borrower_id"], borrower.as_str());
    assert_eq!(record["days_left"], 14);
    assert_eq!(record["book_title"], "Dune");

    let approved = approved_books(&client, &lender).await;
    assert_eq!(approved.len(), 1);
    assert_eq!(approved[0]["id"], borrow_id.as_str());

    // The book is off the shelf while on loan
    let book: Value = client
        .get(format!("{}/books/{}", BASE_URL, book_id))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    assert_eq!(book["available"], false);

    // Lender records the return
    let response = client
        .post(format!("{}/borrow-requests/{}/return", BASE_URL, borrow_id))
        .header("X-User-Id", &lender)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 200);

    let record: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(record["status"], "returned");

    // Closed loans drop out of the approved listing
    assert!(approved_books(&client, &lender).await.is_empty());

    let book: Value = client
        .get(format!("{}/books/{}", BASE_URL, book_id))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    assert_eq!(book["available"], true);
}

#[tokio::test]
#[ignore]
async fn test_approved_books_only_lists_that_lender() {
    let client = Client::new();
    let lender_a = new_identity();
    let lender_b = new_identity();
    let borrower = new_identity();

    let book_a = create_book(&client, &lender_a, "Dune").await;
    let book_b = create_book(&client, &lender_b, "Hyperion").await;

    let borrow_a = create_borrow_request(&client, &borrower, &book_a).await;
    let borrow_b = create_borrow_request(&client, &borrower, &book_b).await;

    for (lender, borrow_id) in [(&lender_a, &borrow_a), (&lender_b, &borrow_b)] {
        let response = client
            .post(format!("{}/borrow-requests/{}/approve", BASE_URL, borrow_id))
            .header("X-User-Id", lender.as_str())
            .send()
            .await
            .expect("Failed to send request");
        assert_eq!(response.status(), 200);
    }

    let approved = approved_books(&client, &lender_a).await;
    assert_eq!(approved.len(), 1);
    assert!(approved.iter().all(|r| r["lender_id"] == lender_a.as_str()));
    assert!(approved.iter().all(|r| r["id"] != borrow_b.as_str()));
}

#[tokio::test]
#[ignore]
async fn test_only_lender_can_approve() {
    let client = Client::new();
    let lender = new_identity();
    let borrower = new_identity();

    let book_id = create_book(&client, &lender, "Dune").await;
    let borrow_id = create_borrow_request(&client, &borrower, &book_id).await;

    let response = client
        .post(format!("{}/borrow-requests/{}/approve", BASE_URL, borrow_id))
        .header("X-User-Id", &borrower)
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 403);
}

#[tokio::test]
#[ignore]
async fn test_declined_request_cannot_be_approved() {
    let client = Client::new();
    let lender = new_identity();
    let borrower = new_identity();

    let book_id = create_book(&client, &lender, "Dune").await;
    let borrow_id = create_borrow_request(&client, &borrower, &book_id).await;

    let response = client
        .post(format!("{}/borrow-requests/{}/decline", BASE_URL, borrow_id))
        .header("X-User-Id", &lender)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 200);

    let response = client
        .post(format!("{}/borrow-requests/{}/approve", BASE_URL, borrow_id))
        .header("X-User-Id", &lender)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 409);
}

#[tokio::test]
#[ignore]
async fn test_incoming_requests_listing() {
    let client = Client::new();
    let lender = new_identity();
    let borrower = new_identity();

    let book_id = create_book(&client, &lender, "Dune").await;
    let borrow_id = create_borrow_request(&client, &borrower, &book_id).await;

    let response = client
        .get(format!("{}/borrow-requests?status=requested", BASE_URL))
        .header("X-User-Id", &lender)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 200);

    let body: Value = response.json().await.expect("Failed to parse response");
    let requests = body["requests"].as_array().expect("requests is not an array");
    assert!(requests.iter().any(|r| r["id"] == borrow_id.as_str()));

    // Unknown status filter is a validation error
    let response = client
        .get(format!("{}/borrow-requests?status=pending", BASE_URL))
        .header("X-User-Id", &lender)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_profile_upsert_roundtrip() {
    let client = Client::new();
    let user = new_identity();

    let response = client
        .put(format!("{}/users/me", BASE_URL))
        .header("X-User-Id", &user)
        .json(&json!({
            "name": "Paul Atreides",
            "email": "paul@example.com"
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 200);

    let response = client
        .get(format!("{}/users", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 200);

    let body: Value = response.json().await.expect("Failed to parse response");
    let users = body["users"].as_array().expect("users is not an array");
    assert!(users.iter().any(|u| u["id"] == user.as_str()));
}
