//! Session-cookie authentication helpers

use tower_cookies::{Cookie, Cookies};

use crate::error::ApiError;
use crate::store::UserId;
use crate::token::SessionIssuer;

/// Cookie carrying the session token, named as the legacy clients expect
pub const SESSION_COOKIE: &str = "jwtoken";

/// Identity claims of the authenticated caller
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: UserId,
    pub name: String,
}

/// Require a valid session cookie; any failure (missing cookie included)
/// yields the same authentication error.
pub fn require_login(cookies: &Cookies, sessions: &SessionIssuer) -> Result<AuthUser, ApiError> {
    let cookie = cookies
        .get(SESSION_COOKIE)
        .ok_or(ApiError::NotAuthenticated)?;
    let claims = sessions
        .verify(cookie.value())
        .map_err(|_| ApiError::NotAuthenticated)?;
    Ok(AuthUser {
        id: UserId(claims.id),
        name: claims.name,
    })
}

/// Helper to set the session cookie
pub fn set_session_cookie(cookies: &Cookies, token: &str) {
    let cookie = Cookie::build((SESSION_COOKIE, token.to_string()))
        .path("/")
        .http_only(true)
        .build();
    cookies.add(cookie);
}

/// Helper to clear the session cookie
pub fn clear_session_cookie(cookies: &Cookies) {
    let cookie = Cookie::build((SESSION_COOKIE, ""))
        .path("/")
        .http_only(true)
        .max_age(tower_cookies::cookie::time::Duration::ZERO)
        .build();
    cookies.add(cookie);
}
