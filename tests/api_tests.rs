//! API integration tests
//!
//! These tests drive a running server (`cargo run`) backed by a real
//! database. Run with: cargo test -- --ignored

use reqwest::Client;
use serde_json::{json, Value};
use std::time::{SystemTime, UNIX_EPOCH};

const BASE_URL: &str = "http://localhost:3000";

/// Generate a unique valid ISBN-13 (978 prefix, correct check digit)
fn unique_isbn() -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .subsec_nanos() as u64;
    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_micros() as u64;

    let group = nanos % 10;
    let registrant = seed % 100;
    let publication = (seed / 100) % 1_000_000;

    let digits = format!("978{}{:02}{:06}", group, registrant, publication);
    let sum: u32 = digits
        .chars()
        .enumerate()
        .map(|(i, c)| {
            let d = c.to_digit(10).unwrap();
            if i % 2 == 0 { d } else { d * 3 }
        })
        .sum();
    let check = (10 - (sum % 10)) % 10;

    format!(
        "{}-{}-{:02}-{:06}-{}",
        &digits[..3],
        group,
        registrant,
        publication,
        check
    )
}

/// Create an author and return its id
async fn create_author(client: &Client, first_name: &str, last_name: &str) -> i64 {
    let response = client
        .post(format!("{}/authors", BASE_URL))
        .json(&json!({
            "firstName": first_name,
            "lastName": last_name,
        }))
        .send()
        .await
        .expect("Failed to send create author request");

    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["success"], true);
    body["data"]["id"].as_i64().expect("No author ID")
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
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
async fn test_create_author_returns_envelope() {
    let client = Client::new();

    let response = client
        .post(format!("{}/authors", BASE_URL))
        .json(&json!({
            "firstName": "Tanjin",
            "lastName": "Alam",
            "bio": "A test author",
            "birthDate": "1980-01-01"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["success"], true);
    assert_eq!(body["statusCode"], 201);
    assert_eq!(body["message"], "Success");
    assert_eq!(body["data"]["firstName"], "Tanjin");
    assert_eq!(body["data"]["lastName"], "Alam");
    assert_eq!(body["data"]["birthDate"], "1980-01-01");
    assert!(body["data"]["id"].as_i64().expect("No author ID") > 0);
}

#[tokio::test]
#[ignore]
async fn test_create_author_validation_failure() {
    let client = Client::new();

    let response = client
        .post(format!("{}/authors", BASE_URL))
        .json(&json!({
            "firstName": "",
            "lastName": "Alam"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 422);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Validation failed");
    assert!(body["error"]["firstName"].is_array());
    assert_eq!(body["path"], "/authors");
    assert_eq!(body["method"], "POST");
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
#[ignore]
async fn test_get_missing_author_returns_enveloped_404() {
    let client = Client::new();

    let response = client
        .get(format!("{}/authors/999999", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 404);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["success"], false);
    assert_eq!(body["statusCode"], 404);
    assert_eq!(body["message"], "Author with ID 999999 not found");
    assert_eq!(body["method"], "GET");
}

#[tokio::test]
#[ignore]
async fn test_create_book_with_missing_author_fails() {
    let client = Client::new();

    let response = client
        .post(format!("{}/books", BASE_URL))
        .json(&json!({
            "title": "Orphan Book",
            "isbn": unique_isbn(),
            "authorId": 999999
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_duplicate_isbn_conflicts() {
    let client = Client::new();
    let author_id = create_author(&client, "Iris", "Dupont").await;
    let isbn = unique_isbn();

    let first = client
        .post(format!("{}/books", BASE_URL))
        .json(&json!({ "title": "First", "isbn": isbn, "authorId": author_id }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(first.status(), 201);

    let second = client
        .post(format!("{}/books", BASE_URL))
        .json(&json!({ "title": "Second", "isbn": isbn, "authorId": author_id }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(second.status(), 409);

    let body: Value = second.json().await.expect("Failed to parse response");
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Duplicate entry found");
    assert_eq!(body["error"], "isbn already exists");
}

#[tokio::test]
#[ignore]
async fn test_create_book_embeds_author() {
    let client = Client::new();
    let author_id = create_author(&client, "Jules", "Verne").await;

    let response = client
        .post(format!("{}/books", BASE_URL))
        .json(&json!({
            "title": "The Great Novel",
            "isbn": unique_isbn(),
            "publishedDate": "2024-01-15",
            "genre": "Fantasy",
            "authorId": author_id
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["title"], "The Great Novel");
    assert_eq!(body["data"]["publishedDate"], "2024-01-15");
    assert_eq!(body["data"]["genre"], "Fantasy");
    assert_eq!(body["data"]["authorId"], author_id);
    assert_eq!(body["data"]["author"]["id"], author_id);
}

#[tokio::test]
#[ignore]
async fn test_pagination_has_next_page() {
    let client = Client::new();

    // Unique marker so parallel data does not interfere with the counts
    let marker = format!(
        "Paginated{}",
        SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_nanos()
    );
    for i in 0..5 {
        create_author(&client, &format!("Author{}", i), &marker).await;
    }

    let first_page: Value = client
        .get(format!(
            "{}/authors?page=0&limit=1&lastName={}",
            BASE_URL, marker
        ))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");

    assert_eq!(first_page["data"]["total"], 5);
    assert_eq!(first_page["data"]["item"].as_array().unwrap().len(), 1);
    assert_eq!(first_page["data"]["hasNextPage"], true);

    let last_page: Value = client
        .get(format!(
            "{}/authors?page=4&limit=1&lastName={}",
            BASE_URL, marker
        ))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");

    assert_eq!(last_page["data"]["hasNextPage"], false);
}

#[tokio::test]
#[ignore]
async fn test_pagination_limit_cap() {
    let client = Client::new();

    let response = client
        .get(format!("{}/authors?limit=101", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "Invalid pagination params: Max limit is 100");
}

#[tokio::test]
#[ignore]
async fn test_pagination_rejects_garbage() {
    let client = Client::new();

    let response = client
        .get(format!("{}/books?page=abc", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);

    let response = client
        .get(format!("{}/books?limit=-1", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_partial_update_keeps_other_fields() {
    let client = Client::new();
    let author_id = create_author(&client, "Margaret", "Atwood").await;

    let response = client
        .patch(format!("{}/authors/{}", BASE_URL, author_id))
        .json(&json!({ "bio": "Updated bio only" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 200);

    // Re-fetch and verify the untouched fields survived
    let body: Value = client
        .get(format!("{}/authors/{}", BASE_URL, author_id))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");

    assert_eq!(body["data"]["firstName"], "Margaret");
    assert_eq!(body["data"]["lastName"], "Atwood");
    assert_eq!(body["data"]["bio"], "Updated bio only");
}

#[tokio::test]
#[ignore]
async fn test_delete_author_cascades_to_books() {
    let client = Client::new();
    let author_id = create_author(&client, "Tanjin", "Alam").await;

    let response = client
        .post(format!("{}/books", BASE_URL))
        .json(&json!({
            "title": "T",
            "isbn": unique_isbn(),
            "authorId": author_id
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    let book_id = body["data"]["id"].as_i64().expect("No book ID");

    // Delete the author: 204, no body
    let response = client
        .delete(format!("{}/authors/{}", BASE_URL, author_id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 204);

    // The book was cascade soft-deleted
    let response = client
        .get(format!("{}/books/{}", BASE_URL, book_id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 404);

    // And the author itself is gone
    let response = client
        .get(format!("{}/authors/{}", BASE_URL, author_id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_delete_missing_book_distinct_message() {
    let client = Client::new();

    let response = client
        .delete(format!("{}/books/999999", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 404);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "Book not found during delete operation");
}

#[tokio::test]
#[ignore]
async fn test_book_list_filters() {
    let client = Client::new();
    let author_id = create_author(&client, "Filter", "Target").await;

    let marker = format!(
        "Filterable{}",
        SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_nanos()
    );
    let response = client
        .post(format!("{}/books", BASE_URL))
        .json(&json!({
            "title": marker,
            "isbn": unique_isbn(),
            "authorId": author_id
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);

    // Case-insensitive partial title match combined with exact authorId
    let body: Value = client
        .get(format!(
            "{}/books?title={}&authorId={}",
            BASE_URL,
            marker.to_lowercase(),
            author_id
        ))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");

    assert_eq!(body["data"]["total"], 1);
    assert_eq!(body["data"]["item"][0]["title"], marker);
}
