//! Data models for storage

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unique user identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub u64);

/// Unique chat identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChatId(pub u64);

/// A committed user account.
///
/// Deliberately not serializable: the password hash must never reach the
/// wire. Responses use [`UserProfile`].
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Public projection of a user, safe to serialize
#[derive(Debug, Clone, Serialize)]
pub struct UserProfile {
    pub id: UserId,
    pub name: String,
    pub email: String,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
        }
    }
}

/// A chat member snapshot. The display name is captured at chat creation
/// and not live-joined, so it goes stale if the user renames.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMember {
    pub user_id: UserId,
    pub name: String,
}

/// A pairwise chat relationship
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Chat {
    pub id: ChatId,
    pub members: [ChatMember; 2],
    pub last_message: Option<String>,
    pub last_message_at: Option<DateTime<Utc>>,
}

impl Chat {
    /// Whether `user_id` is one of the two members
    pub fn involves(&self, user_id: UserId) -> bool {
        self.members.iter().any(|m| m.user_id == user_id)
    }

    /// Whether this chat links the given unordered pair
    pub fn links(&self, a: UserId, b: UserId) -> bool {
        self.involves(a) && self.involves(b)
    }
}
