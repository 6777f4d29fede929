//! In-memory storage implementations

use std::cmp::Reverse;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

use chrono::{DateTime, Utc};

use super::{Chat, ChatId, ChatMember, ChatStore, StoreResult, User, UserId, UserStore};
use crate::error::ApiError;

/// In-memory user store
pub struct InMemoryUserStore {
    users: RwLock<HashMap<UserId, User>>,
    next_user_id: AtomicU64,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self {
            users: RwLock::new(HashMap::new()),
            next_user_id: AtomicU64::new(1),
        }
    }
}

impl Default for InMemoryUserStore {
    fn default() -> Self {
        Self::new()
    }
}

impl UserStore for InMemoryUserStore {
    fn create_user(&self, name: &str, email: &str, password_hash: &str) -> StoreResult<UserId> {
        let mut users = self.users.write().unwrap();
        if users.values().any(|u| u.email == email) {
            return Err(ApiError::EmailTaken);
        }
        let id = UserId(self.next_user_id.fetch_add(1, Ordering::SeqCst));
        users.insert(
            id,
            User {
                id,
                name: name.to_string(),
                email: email.to_string(),
                password_hash: password_hash.to_string(),
                created_at: Utc::now(),
            },
        );
        Ok(id)
    }

    fn get_user(&self, user_id: UserId) -> StoreResult<Option<User>> {
        Ok(self.users.read().unwrap().get(&user_id).cloned())
    }

    fn get_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let users = self.users.read().unwrap();
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    fn update_password(&self, user_id: UserId, password_hash: &str) -> StoreResult<()> {
        let mut users = self.users.write().unwrap();
        if let Some(user) = users.get_mut(&user_id) {
            user.password_hash = password_hash.to_string();
            Ok(())
        } else {
            Err(ApiError::UserNotFound)
        }
    }

    fn search_by_name(&self, query: &str) -> StoreResult<Vec<User>> {
        let needle = query.to_lowercase();
        let users = self.users.read().unwrap();
        Ok(users
            .values()
            .filter(|u| u.name.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }
}

/// In-memory chat store
pub struct InMemoryChatStore {
    chats: RwLock<HashMap<ChatId, Chat>>,
    next_chat_id: AtomicU64,
}

impl InMemoryChatStore {
    pub fn new() -> Self {
        Self {
            chats: RwLock::new(HashMap::new()),
            next_chat_id: AtomicU64::new(1),
        }
    }

    /// Record last-message metadata on a chat (for testing purposes)
    pub fn set_last_message(
        &self,
        chat_id: ChatId,
        text: &str,
        at: DateTime<Utc>,
    ) -> StoreResult<()> {
        let mut chats = self.chats.write().unwrap();
        if let Some(chat) = chats.get_mut(&chat_id) {
            chat.last_message = Some(text.to_string());
            chat.last_message_at = Some(at);
            Ok(())
        } else {
            Err(ApiError::NoChats)
        }
    }
}

impl Default for InMemoryChatStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatStore for InMemoryChatStore {
    fn create_chat(&self, requester: ChatMember, target: ChatMember) -> StoreResult<ChatId> {
        let mut chats = self.chats.write().unwrap();
        // Symmetric check: one chat per unordered pair
        if chats
            .values()
            .any(|c| c.links(requester.user_id, target.user_id))
        {
            return Err(ApiError::ChatExists);
        }
        let id = ChatId(self.next_chat_id.fetch_add(1, Ordering::SeqCst));
        chats.insert(
            id,
            Chat {
                id,
                members: [requester, target],
                last_message: None,
                last_message_at: None,
            },
        );
        Ok(id)
    }

    fn chats_for_user(&self, user_id: UserId) -> StoreResult<Vec<Chat>> {
        let chats = self.chats.read().unwrap();
        let mut result: Vec<Chat> = chats
            .values()
            .filter(|c| c.involves(user_id))
            .cloned()
            .collect();
        // Most recent activity first; chats with no messages yet sort last
        result.sort_by_key(|c| Reverse(c.last_message_at));
        Ok(result)
    }
}
