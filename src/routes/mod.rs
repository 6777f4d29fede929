//! HTTP routes

mod auth;
mod chats;
mod login;
mod register;
mod reset;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower_cookies::CookieManagerLayer;
use tower_http::trace::TraceLayer;

use crate::email::EmailSender;
use crate::state::AppState;
use crate::store::{ChatStore, UserStore};

/// Generic `{message}` response body
#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

/// Create the router with all routes
pub fn create_router<U, C, E>(state: Arc<AppState<U, C, E>>) -> Router
where
    U: UserStore + 'static,
    C: ChatStore + 'static,
    E: EmailSender + 'static,
{
    Router::new()
        .route("/", get(home))
        .route("/register", post(register::register))
        .route("/otpverification", post(register::otp_verification))
        .route("/login", post(login::login))
        .route("/logout", get(login::logout))
        .route(
            "/reset-password",
            post(reset::request_reset).put(reset::confirm_reset),
        )
        .route("/getChats", get(chats::get_chats))
        .route("/searchUsers", post(chats::search_users))
        .route("/addChat", post(chats::add_chat))
        .layer(TraceLayer::new_for_http())
        .layer(CookieManagerLayer::new())
        .with_state(state)
}

/// GET /
async fn home() -> Json<MessageResponse> {
    Json(MessageResponse::new("home page of server"))
}

/// Accept an OTP field sent as either a JSON string or a bare number;
/// legacy clients did both.
pub(crate) fn deserialize_code<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum CodeField {
        Number(u64),
        Text(String),
    }

    Ok(match CodeField::deserialize(deserializer)? {
        CodeField::Number(n) => n.to_string(),
        CodeField::Text(s) => s,
    })
}
