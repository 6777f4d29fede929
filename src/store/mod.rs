//! Storage abstractions

pub mod memory;
pub mod models;

pub use memory::{InMemoryChatStore, InMemoryUserStore};
pub use models::*;

use crate::error::ApiError;

/// Result type for store operations
pub type StoreResult<T> = Result<T, ApiError>;

/// Trait for user account storage
pub trait UserStore: Send + Sync {
    /// Create a new account. E-mail uniqueness is enforced here, at commit
    /// time: fails with [`ApiError::EmailTaken`] if the address is taken.
    fn create_user(&self, name: &str, email: &str, password_hash: &str) -> StoreResult<UserId>;

    /// Get a user by ID
    fn get_user(&self, user_id: UserId) -> StoreResult<Option<User>>;

    /// Get a user by e-mail address (exact, case-sensitive match)
    fn get_user_by_email(&self, email: &str) -> StoreResult<Option<User>>;

    /// Replace a user's password hash
    fn update_password(&self, user_id: UserId, password_hash: &str) -> StoreResult<()>;

    /// Case-insensitive substring search on display names
    fn search_by_name(&self, query: &str) -> StoreResult<Vec<User>>;
}

/// Trait for the chat graph
pub trait ChatStore: Send + Sync {
    /// Create a chat between two members. At most one chat may exist per
    /// unordered user pair; fails with [`ApiError::ChatExists`] if either
    /// ordering is already linked.
    fn create_chat(&self, requester: ChatMember, target: ChatMember) -> StoreResult<ChatId>;

    /// All chats where `user_id` appears as either member, ordered by last
    /// message time descending; chats with no messages yet sort last.
    fn chats_for_user(&self, user_id: UserId) -> StoreResult<Vec<Chat>>;
}
