//! API integration tests
//!
//! These run against a live server with a migrated database.
//! Run with: cargo test -- --ignored

use reqwest::Client;
use serde_json::{json, Value};
use std::time::{SystemTime, UNIX_EPOCH};

const BASE_URL: &str = "http://localhost:8080/api/v1";

/// Unique email suffix so repeated runs do not collide on the unique index
fn unique_email(prefix: &str) -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock before epoch")
        .as_nanos();
    format!("{}+{}@example.org", prefix, nanos)
}

async fn create_book(client: &Client, title: &str, stock: i32) -> i64 {
    let response = client
        .post(format!("{}/books", BASE_URL))
        .json(&json!({
            "title": title,
            "author": "Test Author",
            "stock": stock
        }))
        .send()
        .await
        .expect("Failed to create book");

    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    body["id"].as_i64().expect("No book ID")
}

async fn create_member(client: &Client, name: &str) -> i64 {
    let response = client
        .post(format!("{}/members", BASE_URL))
        .json(&json!({
            "name": name,
            "email": unique_email(name)
        }))
        .send()
        .await
        .expect("Failed to create member");

    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    body["id"].as_i64().expect("No member ID")
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
async fn test_create_get_and_delete_book() {
    let client = Client::new();
    let book_id = create_book(&client, "A Wizard of Earthsea", 3).await;

    let response = client
        .get(format!("{}/books/{}", BASE_URL, book_id))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["title"], "A Wizard of Earthsea");
    assert_eq!(body["stock"], 3);

    let response = client
        .delete(format!("{}/books/{}", BASE_URL, book_id))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 204);
}

#[tokio::test]
#[ignore]
async fn test_duplicate_member_email_is_rejected() {
    let client = Client::new();
    let email = unique_email("dup");

    let response = client
        .post(format!("{}/members", BASE_URL))
        .json(&json!({ "name": "First", "email": email }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);

    let response = client
        .post(format!("{}/members", BASE_URL))
        .json(&json!({ "name": "Second", "email": email }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 409);
}

#[tokio::test]
#[ignore]
async fn test_issue_and_return_flow() {
    let client = Client::new();
    let book_id = create_book(&client, "The Left Hand of Darkness", 1).await;
    let member_id = create_member(&client, "flow").await;

    // Issue the only copy
    let response = client
        .post(format!("{}/transactions", BASE_URL))
        .json(&json!({ "member_id": member_id, "book_id": book_id }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "Issued successfully");
    let transaction_id = body["transaction_id"].as_i64().expect("No transaction ID");
    assert!(body["due_date"].is_string());

    // The shelf is now empty
    let response = client
        .post(format!("{}/transactions", BASE_URL))
        .json(&json!({ "member_id": member_id, "book_id": book_id }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 409);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "Out of stock");

    // Return it
    let response = client
        .post(format!("{}/transactions/{}/return", BASE_URL, transaction_id))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "Book returned successfully");

    // A second return is refused
    let response = client
        .post(format!("{}/transactions/{}/return", BASE_URL, transaction_id))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 409);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "Book already returned");
}

#[tokio::test]
#[ignore]
async fn test_issue_unknown_book() {
    let client = Client::new();
    let member_id = create_member(&client, "nobook").await;

    let response = client
        .post(format!("{}/transactions", BASE_URL))
        .json(&json!({ "member_id": member_id, "book_id": 0 }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 404);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "Book not found");
}

#[tokio::test]
#[ignore]
async fn test_member_transactions_listing() {
    let client = Client::new();
    let book_id = create_book(&client, "The Lathe of Heaven", 2).await;
    let member_id = create_member(&client, "history").await;

    let response = client
        .post(format!("{}/transactions", BASE_URL))
        .json(&json!({ "member_id": member_id, "book_id": book_id }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);

    let response = client
        .get(format!("{}/members/{}/transactions", BASE_URL, member_id))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    let transactions = body.as_array().expect("Expected an array");
    assert_eq!(transactions.len(), 1);
    assert_eq!(transactions[0]["book"]["title"], "The Lathe of Heaven");
    assert!(transactions[0]["returned_date"].is_null());
}

#[tokio::test]
#[ignore]
async fn test_list_books() {
    let client = Client::new();

    let response = client
        .get(format!("{}/books", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body.is_array());
}
