//! One-time-password challenges
//!
//! Challenges are keyed per purpose and recipient so that unrelated users
//! never disturb each other's pending state. Each challenge carries the
//! staged payload (registration profile or reset target) that is released
//! exactly once, on successful verification.

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::{DateTime, Duration, Utc};

use crate::crypto::generate_otp_code;
use crate::store::UserId;

/// How long a challenge stays verifiable
pub const OTP_TTL_MINUTES: i64 = 15;

/// What a challenge proves control of an e-mail address for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OtpPurpose {
    Registration,
    PasswordReset,
}

/// Staged account data held until the registration code is confirmed
#[derive(Debug, Clone)]
pub struct PendingRegistration {
    pub name: String,
    pub email: String,
    /// Raw password; hashed only after proof of e-mail ownership
    pub password: String,
}

/// Staged reset target held until the reset code is confirmed
#[derive(Debug, Clone)]
pub struct PendingReset {
    pub user_id: UserId,
}

/// Payload released when a challenge is consumed
#[derive(Debug, Clone)]
pub enum StagedAction {
    Registration(PendingRegistration),
    Reset(PendingReset),
}

#[derive(Debug, Clone)]
struct Challenge {
    code: String,
    created_at: DateTime<Utc>,
    action: StagedAction,
}

/// Keyed store of live OTP challenges
pub struct OtpRegistry {
    challenges: RwLock<HashMap<(OtpPurpose, String), Challenge>>,
}

impl OtpRegistry {
    pub fn new() -> Self {
        Self {
            challenges: RwLock::new(HashMap::new()),
        }
    }

    /// Stage a challenge for `identity`, replacing any prior unconsumed
    /// challenge for the same purpose and recipient. Returns the code for
    /// the caller to dispatch; if dispatch fails the caller must
    /// [`revoke`](Self::revoke) so no pending state survives a failed send.
    pub fn issue(&self, purpose: OtpPurpose, identity: &str, action: StagedAction) -> String {
        let code = generate_otp_code();
        let now = Utc::now();
        let mut challenges = self.challenges.write().unwrap();
        challenges.retain(|_, c| now - c.created_at <= Duration::minutes(OTP_TTL_MINUTES));
        challenges.insert(
            (purpose, identity.to_string()),
            Challenge {
                code: code.clone(),
                created_at: now,
                action,
            },
        );
        code
    }

    /// Drop a staged challenge (e.g. after a failed mail dispatch)
    pub fn revoke(&self, purpose: OtpPurpose, identity: &str) {
        self.challenges
            .write()
            .unwrap()
            .remove(&(purpose, identity.to_string()));
    }

    /// Consume the live challenge for `purpose` whose code matches the
    /// submitted value, returning its staged payload.
    ///
    /// Single-use: a matched challenge is removed under the write lock, so
    /// exactly one verification can succeed per issued code. A matched but
    /// expired challenge is discarded and verification fails. "No live
    /// challenge" and "code mismatch" are indistinguishable to the caller.
    pub fn verify(&self, purpose: OtpPurpose, submitted: &str) -> Option<StagedAction> {
        let code = normalize_code(submitted)?;
        let mut challenges = self.challenges.write().unwrap();
        let key = challenges
            .iter()
            .find(|((p, _), c)| *p == purpose && c.code == code)
            .map(|(key, _)| key.clone())?;
        let challenge = challenges.remove(&key)?;
        if Utc::now() - challenge.created_at > Duration::minutes(OTP_TTL_MINUTES) {
            return None;
        }
        Some(challenge.action)
    }

    #[cfg(test)]
    fn backdate(&self, purpose: OtpPurpose, identity: &str, minutes: i64) {
        let mut challenges = self.challenges.write().unwrap();
        if let Some(challenge) = challenges.get_mut(&(purpose, identity.to_string())) {
            challenge.created_at = Utc::now() - Duration::minutes(minutes);
        }
    }
}

impl Default for OtpRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Coerce a submitted code to the canonical zero-padded form.
///
/// The legacy clients sent the code as either a string or a bare number,
/// so `"7123"` and `7123` both match an issued `007123`. Non-numeric
/// input never matches anything.
fn normalize_code(submitted: &str) -> Option<String> {
    submitted
        .trim()
        .parse::<u32>()
        .ok()
        .filter(|n| *n < 1_000_000)
        .map(|n| format!("{n:06}"))
}
