//! Tests for the chat graph endpoints

mod common;

use common::{create_test_server, login_user, register_user, MockEmailSender};
use axum_test::TestServer;
use serde_json::{json, Value};

/// Register two users and return their session cookies
async fn two_users(server: &TestServer, email_sender: &MockEmailSender) -> (String, String) {
    register_user(server, email_sender, "Alice", "alice@example.com", "pw1234").await;
    register_user(server, email_sender, "Bob", "bob@example.com", "pw5678").await;
    let alice = login_user(server, "alice@example.com", "pw1234").await;
    let bob = login_user(server, "bob@example.com", "pw5678").await;
    (alice, bob)
}

/// Look up a user's id via search, as a client would
async fn find_user_id(server: &TestServer, session: &str, query: &str) -> u64 {
    let response = server
        .post("/searchUsers")
        .add_cookie(cookie::Cookie::new("jwtoken", session.to_string()))
        .json(&json!({ "queryName": query }))
        .await;
    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    body[0]["id"].as_u64().expect("No id in search result")
}

#[tokio::test]
async fn test_add_chat_and_list() {
    let (server, email_sender) = create_test_server();
    let (alice, bob) = two_users(&server, &email_sender).await;
    let bob_id = find_user_id(&server, &alice, "bob").await;

    let response = server
        .post("/addChat")
        .add_cookie(cookie::Cookie::new("jwtoken", alice.clone()))
        .json(&json!({ "otherUserId": bob_id }))
        .await;
    assert_eq!(response.status_code(), 201);
    let body: Value = response.json();
    assert_eq!(body["message"], "Chat created successfully");

    // Both members see the chat, with name snapshots and their own id
    for session in [&alice, &bob] {
        let response = server
            .get("/getChats")
            .add_cookie(cookie::Cookie::new("jwtoken", session.to_string()))
            .await;
        assert_eq!(response.status_code(), 200);
        let body: Value = response.json();
        let chats = body["message"].as_array().unwrap();
        assert_eq!(chats.len(), 1);

        let names: Vec<&str> = chats[0]["members"]
            .as_array()
            .unwrap()
            .iter()
            .map(|m| m["name"].as_str().unwrap())
            .collect();
        assert!(names.contains(&"Alice"));
        assert!(names.contains(&"Bob"));
        assert!(chats[0]["lastMessage"].is_null());
        assert!(body["loggedUserId"].is_u64());
    }
}

/// Pair uniqueness is symmetric: B->A fails after A->B
#[tokio::test]
async fn test_duplicate_chat_rejected_symmetrically() {
    let (server, email_sender) = create_test_server();
    let (alice, bob) = two_users(&server, &email_sender).await;
    let bob_id = find_user_id(&server, &alice, "bob").await;
    let alice_id = find_user_id(&server, &bob, "alice").await;

    let response = server
        .post("/addChat")
        .add_cookie(cookie::Cookie::new("jwtoken", alice))
        .json(&json!({ "otherUserId": bob_id }))
        .await;
    assert_eq!(response.status_code(), 201);

    let response = server
        .post("/addChat")
        .add_cookie(cookie::Cookie::new("jwtoken", bob))
        .json(&json!({ "otherUserId": alice_id }))
        .await;
    assert_eq!(response.status_code(), 422);
    let body: Value = response.json();
    assert_eq!(body["error"], "Chat already exists");
}

#[tokio::test]
async fn test_self_chat_rejected() {
    let (server, email_sender) = create_test_server();

    register_user(&server, &email_sender, "Alice", "alice@example.com", "pw1234").await;
    let alice = login_user(&server, "alice@example.com", "pw1234").await;

    let claims = chatd::SessionIssuer::new("test-secret").verify(&alice).unwrap();

    let response = server
        .post("/addChat")
        .add_cookie(cookie::Cookie::new("jwtoken", alice))
        .json(&json!({ "otherUserId": claims.id }))
        .await;
    assert_eq!(response.status_code(), 422);
    let body: Value = response.json();
    assert_eq!(body["error"], "Cannot create chat with yourself");
}

#[tokio::test]
async fn test_unknown_target_rejected() {
    let (server, email_sender) = create_test_server();

    register_user(&server, &email_sender, "Alice", "alice@example.com", "pw1234").await;
    let alice = login_user(&server, "alice@example.com", "pw1234").await;

    let response = server
        .post("/addChat")
        .add_cookie(cookie::Cookie::new("jwtoken", alice))
        .json(&json!({ "otherUserId": 9999 }))
        .await;
    assert_eq!(response.status_code(), 404);
    let body: Value = response.json();
    assert_eq!(body["error"], "User not found");
}

#[tokio::test]
async fn test_chat_endpoints_require_authentication() {
    let (server, _email_sender) = create_test_server();

    for response in [
        server.get("/getChats").await,
        server
            .post("/searchUsers")
            .json(&json!({ "queryName": "alice" }))
            .await,
        server
            .post("/addChat")
            .json(&json!({ "otherUserId": 1 }))
            .await,
    ] {
        assert_eq!(response.status_code(), 401);
        let body: Value = response.json();
        assert_eq!(body["loginError"], "Login first");
    }
}

#[tokio::test]
async fn test_search_users() {
    let (server, email_sender) = create_test_server();
    let (alice, _bob) = two_users(&server, &email_sender).await;

    // Case-insensitive substring match
    let response = server
        .post("/searchUsers")
        .add_cookie(cookie::Cookie::new("jwtoken", alice.clone()))
        .json(&json!({ "queryName": "BO" }))
        .await;
    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    let hits = body.as_array().unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0]["name"], "Bob");
    assert_eq!(hits[0]["email"], "bob@example.com");
    // Password material never reaches the wire
    assert!(hits[0].get("password").is_none());
    assert!(hits[0].get("password_hash").is_none());

    // The caller is excluded from results
    let response = server
        .post("/searchUsers")
        .add_cookie(cookie::Cookie::new("jwtoken", alice.clone()))
        .json(&json!({ "queryName": "alice" }))
        .await;
    assert_eq!(response.status_code(), 404);
    let body: Value = response.json();
    assert_eq!(body["error"], "No users found");

    // Empty query is a validation error
    let response = server
        .post("/searchUsers")
        .add_cookie(cookie::Cookie::new("jwtoken", alice))
        .json(&json!({ "queryName": "" }))
        .await;
    assert_eq!(response.status_code(), 422);
}

#[tokio::test]
async fn test_missing_other_user_id_rejected() {
    let (server, email_sender) = create_test_server();

    register_user(&server, &email_sender, "Alice", "alice@example.com", "pw1234").await;
    let alice = login_user(&server, "alice@example.com", "pw1234").await;

    let response = server
        .post("/addChat")
        .add_cookie(cookie::Cookie::new("jwtoken", alice))
        .json(&json!({}))
        .await;
    assert_eq!(response.status_code(), 422);
    let body: Value = response.json();
    assert_eq!(body["error"], "All fields are required");
}
