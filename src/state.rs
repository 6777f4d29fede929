//! Application state

use crate::email::EmailSender;
use crate::otp::OtpRegistry;
use crate::store::{ChatStore, UserStore};
use crate::token::SessionIssuer;

/// Shared application state, generic over the store and mailer backends
pub struct AppState<U, C, E> {
    pub users: U,
    pub chats: C,
    pub mailer: E,
    pub otp: OtpRegistry,
    pub sessions: SessionIssuer,
}

impl<U, C, E> AppState<U, C, E>
where
    U: UserStore,
    C: ChatStore,
    E: EmailSender,
{
    pub fn new(users: U, chats: C, mailer: E, sessions: SessionIssuer) -> Self {
        Self {
            users,
            chats,
            mailer,
            otp: OtpRegistry::new(),
            sessions,
        }
    }
}
