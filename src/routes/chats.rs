//! Chat graph endpoints (authenticated)

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use tower_cookies::Cookies;

use super::MessageResponse;
use crate::email::EmailSender;
use crate::error::ApiError;
use crate::state::AppState;
use crate::store::{Chat, ChatMember, ChatStore, UserId, UserProfile, UserStore};

#[derive(Serialize)]
pub struct ChatsResponse {
    pub message: Vec<Chat>,
    #[serde(rename = "loggedUserId")]
    pub logged_user_id: UserId,
}

/// GET /getChats
pub async fn get_chats<U, C, E>(
    State(state): State<Arc<AppState<U, C, E>>>,
    cookies: Cookies,
) -> Result<Json<ChatsResponse>, ApiError>
where
    U: UserStore,
    C: ChatStore,
    E: EmailSender,
{
    let auth = super::auth::require_login(&cookies, &state.sessions)?;

    let chats = state.chats.chats_for_user(auth.id)?;
    if chats.is_empty() {
        return Err(ApiError::NoChats);
    }

    Ok(Json(ChatsResponse {
        message: chats,
        logged_user_id: auth.id,
    }))
}

#[derive(Deserialize)]
pub struct SearchUsersRequest {
    #[serde(rename = "queryName", default)]
    pub query_name: String,
}

/// POST /searchUsers
///
/// Responses carry [`UserProfile`] projections, so password material
/// never reaches the wire. The caller is excluded from the results.
pub async fn search_users<U, C, E>(
    State(state): State<Arc<AppState<U, C, E>>>,
    cookies: Cookies,
    Json(req): Json<SearchUsersRequest>,
) -> Result<Json<Vec<UserProfile>>, ApiError>
where
    U: UserStore,
    C: ChatStore,
    E: EmailSender,
{
    let auth = super::auth::require_login(&cookies, &state.sessions)?;

    if req.query_name.is_empty() {
        return Err(ApiError::MissingFields);
    }

    let profiles: Vec<UserProfile> = state
        .users
        .search_by_name(&req.query_name)?
        .into_iter()
        .filter(|u| u.id != auth.id)
        .map(UserProfile::from)
        .collect();

    if profiles.is_empty() {
        return Err(ApiError::NoUsersFound);
    }

    Ok(Json(profiles))
}

#[derive(Deserialize)]
pub struct AddChatRequest {
    #[serde(rename = "otherUserId")]
    pub other_user_id: Option<u64>,
}

/// POST /addChat
pub async fn add_chat<U, C, E>(
    State(state): State<Arc<AppState<U, C, E>>>,
    cookies: Cookies,
    Json(req): Json<AddChatRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError>
where
    U: UserStore,
    C: ChatStore,
    E: EmailSender,
{
    let auth = super::auth::require_login(&cookies, &state.sessions)?;

    let other_user_id = req.other_user_id.ok_or(ApiError::MissingFields)?;
    if other_user_id == auth.id.0 {
        return Err(ApiError::SelfChat);
    }

    let target = state
        .users
        .get_user(UserId(other_user_id))?
        .ok_or(ApiError::UserNotFound)?;

    // Names are snapshotted at creation, not live-joined
    state.chats.create_chat(
        ChatMember {
            user_id: auth.id,
            name: auth.name,
        },
        ChatMember {
            user_id: target.id,
            name: target.name,
        },
    )?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Chat created successfully")),
    ))
}
