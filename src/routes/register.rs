//! Registration endpoints

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::MessageResponse;
use crate::crypto::hash_password;
use crate::email::EmailSender;
use crate::error::ApiError;
use crate::otp::{OtpPurpose, PendingRegistration, StagedAction};
use crate::state::AppState;
use crate::store::{ChatStore, UserStore};

#[derive(Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub cpassword: String,
}

/// POST /register
///
/// Stages a pending registration and dispatches the OTP. No account is
/// committed and no password is hashed until the code is confirmed, so
/// throwaway registrations never reach the store.
pub async fn register<U, C, E>(
    State(state): State<Arc<AppState<U, C, E>>>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError>
where
    U: UserStore,
    C: ChatStore,
    E: EmailSender,
{
    if req.name.is_empty()
        || req.email.is_empty()
        || req.password.is_empty()
        || req.cpassword.is_empty()
    {
        return Err(ApiError::MissingFields);
    }
    if req.password != req.cpassword {
        return Err(ApiError::PasswordMismatch);
    }

    // Uniqueness against committed accounts; re-checked at commit time
    if state.users.get_user_by_email(&req.email)?.is_some() {
        return Err(ApiError::EmailTaken);
    }

    // Replaces any prior unconsumed challenge for this e-mail
    let code = state.otp.issue(
        OtpPurpose::Registration,
        &req.email,
        StagedAction::Registration(PendingRegistration {
            name: req.name,
            email: req.email.clone(),
            password: req.password,
        }),
    );

    if let Err(e) = state.mailer.send_verification(&req.email, &code) {
        // A failed send must leave no pending state behind
        state.otp.revoke(OtpPurpose::Registration, &req.email);
        return Err(ApiError::Internal(e));
    }

    Ok((
        StatusCode::ACCEPTED,
        Json(MessageResponse::new("OTP sent to your E-mail")),
    ))
}

#[derive(Deserialize)]
pub struct OtpVerificationRequest {
    #[serde(
        rename = "enteredOtp",
        default,
        deserialize_with = "super::deserialize_code"
    )]
    pub entered_otp: String,
}

/// POST /otpverification
///
/// Confirms a pending registration. The matched challenge is consumed
/// before the commit; if the store fails afterwards the client must
/// re-register for a fresh code.
pub async fn otp_verification<U, C, E>(
    State(state): State<Arc<AppState<U, C, E>>>,
    Json(req): Json<OtpVerificationRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError>
where
    U: UserStore,
    C: ChatStore,
    E: EmailSender,
{
    if req.entered_otp.is_empty() {
        return Err(ApiError::InvalidOtp);
    }

    let action = state
        .otp
        .verify(OtpPurpose::Registration, &req.entered_otp)
        .ok_or(ApiError::InvalidOtp)?;
    let StagedAction::Registration(pending) = action else {
        return Err(ApiError::InvalidOtp);
    };

    let password_hash =
        hash_password(&pending.password).map_err(|e| ApiError::Internal(e.to_string()))?;
    state
        .users
        .create_user(&pending.name, &pending.email, &password_hash)?;

    tracing::info!(email = %pending.email, "Account registered");

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Registered successfully")),
    ))
}
