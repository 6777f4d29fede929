//! API error types

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("All fields are required")]
    MissingFields,

    #[error("Both passwords must be same")]
    PasswordMismatch,

    #[error("Email already registered")]
    EmailTaken,

    #[error("Invalid OTP")]
    InvalidOtp,

    #[error("Invalid details")]
    InvalidCredentials,

    #[error("Invalid E-mail")]
    EmailNotFound,

    #[error("User not found")]
    UserNotFound,

    #[error("Cannot create chat with yourself")]
    SelfChat,

    #[error("Chat already exists")]
    ChatExists,

    #[error("No chats found")]
    NoChats,

    #[error("No users found")]
    NoUsersFound,

    #[error("No pending password reset")]
    NoPendingReset,

    #[error("Login first")]
    NotAuthenticated,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::MissingFields => (StatusCode::UNPROCESSABLE_ENTITY, "All fields are required"),
            ApiError::PasswordMismatch => {
                (StatusCode::UNPROCESSABLE_ENTITY, "Both passwords must be same")
            }
            ApiError::EmailTaken => (StatusCode::UNPROCESSABLE_ENTITY, "Email already registered"),
            ApiError::InvalidOtp => (StatusCode::UNPROCESSABLE_ENTITY, "Invalid OTP"),
            ApiError::InvalidCredentials => (StatusCode::UNPROCESSABLE_ENTITY, "Invalid details"),
            ApiError::EmailNotFound => (StatusCode::NOT_FOUND, "Invalid E-mail"),
            ApiError::UserNotFound => (StatusCode::NOT_FOUND, "User not found"),
            ApiError::SelfChat => {
                (StatusCode::UNPROCESSABLE_ENTITY, "Cannot create chat with yourself")
            }
            ApiError::ChatExists => (StatusCode::UNPROCESSABLE_ENTITY, "Chat already exists"),
            ApiError::NoChats => (StatusCode::NOT_FOUND, "No chats found"),
            ApiError::NoUsersFound => (StatusCode::NOT_FOUND, "No users found"),
            ApiError::NoPendingReset => {
                (StatusCode::UNAUTHORIZED, "No pending password reset")
            }
            ApiError::NotAuthenticated => (StatusCode::UNAUTHORIZED, "Login first"),
            ApiError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Something went wrong!")
            }
        };

        // The legacy auth middleware reported failures under a different key
        let body = match &self {
            ApiError::NotAuthenticated => json!({ "loginError": message }),
            _ => json!({ "error": message }),
        };

        (status, axum::Json(body)).into_response()
    }
}
