//! Password reset endpoints

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::MessageResponse;
use crate::crypto::hash_password;
use crate::email::EmailSender;
use crate::error::ApiError;
use crate::otp::{OtpPurpose, PendingReset, StagedAction};
use crate::state::AppState;
use crate::store::{ChatStore, UserStore};

#[derive(Deserialize)]
pub struct ResetRequest {
    #[serde(rename = "resetEmail", default)]
    pub reset_email: String,
}

/// POST /reset-password
///
/// The 404 for unknown addresses is part of the legacy wire contract.
pub async fn request_reset<U, C, E>(
    State(state): State<Arc<AppState<U, C, E>>>,
    Json(req): Json<ResetRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError>
where
    U: UserStore,
    C: ChatStore,
    E: EmailSender,
{
    if req.reset_email.is_empty() {
        return Err(ApiError::MissingFields);
    }

    let user = state
        .users
        .get_user_by_email(&req.reset_email)?
        .ok_or(ApiError::EmailNotFound)?;

    let code = state.otp.issue(
        OtpPurpose::PasswordReset,
        &req.reset_email,
        StagedAction::Reset(PendingReset { user_id: user.id }),
    );

    if let Err(e) = state.mailer.send_password_reset(&req.reset_email, &code) {
        state.otp.revoke(OtpPurpose::PasswordReset, &req.reset_email);
        return Err(ApiError::Internal(e));
    }

    Ok((
        StatusCode::ACCEPTED,
        Json(MessageResponse::new("OTP sent to your E-mail")),
    ))
}

#[derive(Deserialize)]
pub struct ConfirmResetRequest {
    #[serde(
        rename = "enteredResetOtp",
        default,
        deserialize_with = "super::deserialize_code"
    )]
    pub entered_reset_otp: String,
    #[serde(rename = "newPassword", default)]
    pub new_password: String,
    #[serde(rename = "newCPassword", default)]
    pub new_cpassword: String,
}

/// PUT /reset-password
///
/// A code that resolves no live reset challenge is reported as the
/// "no pending reset" gate (401), distinct from the registration flow's
/// invalid-OTP outcome.
pub async fn confirm_reset<U, C, E>(
    State(state): State<Arc<AppState<U, C, E>>>,
    Json(req): Json<ConfirmResetRequest>,
) -> Result<Json<MessageResponse>, ApiError>
where
    U: UserStore,
    C: ChatStore,
    E: EmailSender,
{
    if req.entered_reset_otp.is_empty()
        || req.new_password.is_empty()
        || req.new_cpassword.is_empty()
    {
        return Err(ApiError::MissingFields);
    }
    if req.new_password != req.new_cpassword {
        return Err(ApiError::PasswordMismatch);
    }

    let action = state
        .otp
        .verify(OtpPurpose::PasswordReset, &req.entered_reset_otp)
        .ok_or(ApiError::NoPendingReset)?;
    let StagedAction::Reset(pending) = action else {
        return Err(ApiError::NoPendingReset);
    };

    let password_hash =
        hash_password(&req.new_password).map_err(|e| ApiError::Internal(e.to_string()))?;
    state.users.update_password(pending.user_id, &password_hash)?;

    tracing::info!(user_id = pending.user_id.0, "Password reset completed");

    Ok(Json(MessageResponse::new("Password changed successfully")))
}
