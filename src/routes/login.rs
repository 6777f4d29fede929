//! Login and logout endpoints

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use tower_cookies::Cookies;

use super::MessageResponse;
use crate::crypto::verify_password;
use crate::email::EmailSender;
use crate::error::ApiError;
use crate::state::AppState;
use crate::store::{ChatStore, UserStore};

#[derive(Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// POST /login
///
/// Unknown e-mail and wrong password yield the identical error so the
/// response never confirms whether an address is registered.
pub async fn login<U, C, E>(
    State(state): State<Arc<AppState<U, C, E>>>,
    cookies: Cookies,
    Json(req): Json<LoginRequest>,
) -> Result<Json<MessageResponse>, ApiError>
where
    U: UserStore,
    C: ChatStore,
    E: EmailSender,
{
    if req.email.is_empty() || req.password.is_empty() {
        return Err(ApiError::MissingFields);
    }

    let user = state
        .users
        .get_user_by_email(&req.email)?
        .ok_or(ApiError::InvalidCredentials)?;

    let valid = verify_password(&req.password, &user.password_hash)
        .map_err(|e| ApiError::Internal(e.to_string()))?;
    if !valid {
        return Err(ApiError::InvalidCredentials);
    }

    let token = state
        .sessions
        .issue(user.id, &user.name)
        .map_err(|e| ApiError::Internal(e.to_string()))?;
    super::auth::set_session_cookie(&cookies, &token);

    tracing::info!(user_id = user.id.0, "User logged in");

    Ok(Json(MessageResponse::new("Login successful")))
}

/// GET /logout
///
/// Clears the session cookie. Tokens are stateless and stay valid until
/// their expiry claim lapses.
pub async fn logout(cookies: Cookies) -> Json<MessageResponse> {
    super::auth::clear_session_cookie(&cookies);
    Json(MessageResponse::new("Logged out"))
}
