//! Chat application backend.
//!
//! Account registration with e-mail OTP verification, credential login
//! issuing a signed session token, OTP-driven password reset, and a
//! minimal social graph (user search, pairwise chats).

pub mod config;
pub mod crypto;
pub mod email;
pub mod error;
pub mod otp;
pub mod routes;
pub mod state;
pub mod store;
pub mod token;

pub use config::Config;
pub use email::{ConsoleEmailSender, EmailSender, SmtpConfig, SmtpEmailSender};
pub use error::ApiError;
pub use otp::{OtpPurpose, OtpRegistry};
pub use state::AppState;
pub use store::{ChatStore, InMemoryChatStore, InMemoryUserStore, UserStore};
pub use token::SessionIssuer;
