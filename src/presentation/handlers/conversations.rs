use axum::Json;
use axum::extract::{Path, Query, State};
use serde::{Deserialize, Serialize};

use crate::application::ports::{MessageStore, Responder};
use crate::domain::{Conversation, ConversationId, ConversationSummary};
use crate::presentation::state::AppState;

use super::ApiError;

#[derive(Debug, Deserialize)]
pub struct ListConversationsQuery {
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct ConversationListResponse {
    pub conversations: Vec<ConversationSummary>,
    pub count: usize,
}

#[derive(Debug, Deserialize)]
pub struct UpdateModeRequest {
    pub mode: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

pub async fn list_conversations_handler<S, R>(
    State(state): State<AppState<S, R>>,
    Query(query): Query<ListConversationsQuery>,
) -> Result<Json<ConversationListResponse>, ApiError>
where
    S: MessageStore + ?Sized + 'static,
    R: Responder + ?Sized + 'static,
{
    let limit = query.limit.unwrap_or(state.settings.chat.summary_limit);

    let conversations = state
        .conversation_repository
        .get_all_conversation_summaries(limit)
        .await?;

    Ok(Json(ConversationListResponse {
        count: conversations.len(),
        conversations,
    }))
}

pub async fn get_conversation_handler<S, R>(
    State(state): State<AppState<S, R>>,
    Path(conversation_id): Path<String>,
) -> Result<Json<Conversation>, ApiError>
where
    S: MessageStore + ?Sized + 'static,
    R: Responder + ?Sized + 'static,
{
    state
        .conversation_repository
        .get_conversation_detail(&ConversationId::from_string(conversation_id))
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound)
}

pub async fn delete_conversation_handler<S, R>(
    State(state): State<AppState<S, R>>,
    Path(conversation_id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError>
where
    S: MessageStore + ?Sized + 'static,
    R: Responder + ?Sized + 'static,
{
    let deleted = state
        .conversation_repository
        .delete_conversation(&ConversationId::from_string(conversation_id))
        .await?;

    if !deleted {
        return Err(ApiError::NotFound);
    }

    Ok(Json(MessageResponse {
        message: "Conversation deleted successfully".to_string(),
    }))
}

pub async fn update_mode_handler<S, R>(
    State(state): State<AppState<S, R>>,
    Path(conversation_id): Path<String>,
    Json(request): Json<UpdateModeRequest>,
) -> Result<Json<MessageResponse>, ApiError>
where
    S: MessageStore + ?Sized + 'static,
    R: Responder + ?Sized + 'static,
{
    if request.mode.trim().is_empty() {
        return Err(ApiError::BadRequest("Mode must not be empty".to_string()));
    }

    let updated = state
        .conversation_repository
        .update_conversation_mode(&ConversationId::from_string(conversation_id), &request.mode)
        .await?;

    if !updated {
        return Err(ApiError::NotFound);
    }

    Ok(Json(MessageResponse {
        message: "Mode updated".to_string(),
    }))
}
