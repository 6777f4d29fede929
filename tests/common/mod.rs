//! Common test utilities for integration tests

use std::sync::{Arc, RwLock};

use axum_test::TestServer;
use chatd::{
    routes, AppState, EmailSender, InMemoryChatStore, InMemoryUserStore, SessionIssuer,
};
use serde_json::json;

/// Mock e-mail sender that captures OTP codes
#[derive(Default, Clone)]
pub struct MockEmailSender {
    /// Captured (email, code) pairs
    pub sent: Arc<RwLock<Vec<(String, String)>>>,
}

impl MockEmailSender {
    pub fn new() -> Self {
        Self {
            sent: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Get the last code sent to an email
    pub fn get_code(&self, email: &str) -> Option<String> {
        self.sent
            .read()
            .unwrap()
            .iter()
            .rev()
            .find(|(e, _)| e == email)
            .map(|(_, c)| c.clone())
    }

    /// How many mails were sent to an email
    pub fn sent_count(&self, email: &str) -> usize {
        self.sent.read().unwrap().iter().filter(|(e, _)| e == email).count()
    }
}

impl EmailSender for MockEmailSender {
    fn send_verification(&self, email: &str, code: &str) -> Result<(), String> {
        self.sent
            .write()
            .unwrap()
            .push((email.to_string(), code.to_string()));
        Ok(())
    }

    fn send_password_reset(&self, email: &str, code: &str) -> Result<(), String> {
        self.sent
            .write()
            .unwrap()
            .push((email.to_string(), code.to_string()));
        Ok(())
    }
}

/// Create a test server with mock email sender
pub fn create_test_server() -> (TestServer, MockEmailSender) {
    let email_sender = MockEmailSender::new();

    let state = Arc::new(AppState::new(
        InMemoryUserStore::new(),
        InMemoryChatStore::new(),
        email_sender.clone(),
        SessionIssuer::new("test-secret"),
    ));

    let app = routes::create_router(state);
    let server = TestServer::new(app).expect("Failed to create test server");

    (server, email_sender)
}

/// Helper to drive the full registration flow for a user
pub async fn register_user(
    server: &TestServer,
    email_sender: &MockEmailSender,
    name: &str,
    email: &str,
    password: &str,
) {
    let response = server
        .post("/register")
        .json(&json!({
            "name": name,
            "email": email,
            "password": password,
            "cpassword": password,
        }))
        .await;
    assert_eq!(response.status_code(), 202);

    let code = email_sender.get_code(email).expect("No OTP sent");

    let response = server
        .post("/otpverification")
        .json(&json!({ "enteredOtp": code }))
        .await;
    assert_eq!(response.status_code(), 201);
}

/// Helper to log in and return the session cookie value
pub async fn login_user(server: &TestServer, email: &str, password: &str) -> String {
    let response = server
        .post("/login")
        .json(&json!({ "email": email, "password": password }))
        .await;
    assert_eq!(response.status_code(), 200);

    response
        .maybe_cookie("jwtoken")
        .expect("No session cookie")
        .value()
        .to_string()
}
