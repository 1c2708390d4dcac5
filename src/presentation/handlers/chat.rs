use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};

use crate::application::ports::{MessageStore, Responder};
use crate::domain::{ConversationId, DEFAULT_MODE};
use crate::infrastructure::observability::sanitize_prompt;
use crate::presentation::state::AppState;

use super::ApiError;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub mode: Option<String>,
    #[serde(default)]
    pub conversation_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
    pub conversation_id: String,
}

#[tracing::instrument(skip(state, request), fields(mode = ?request.mode))]
pub async fn chat_handler<S, R>(
    State(state): State<AppState<S, R>>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError>
where
    S: MessageStore + ?Sized + 'static,
    R: Responder + ?Sized + 'static,
{
    tracing::debug!(prompt = %sanitize_prompt(&request.message), "Processing chat message");

    if request.message.trim().is_empty() {
        tracing::warn!("Chat request with empty message");
        return Err(ApiError::BadRequest("Message must not be empty".to_string()));
    }

    let mode = request
        .mode
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| DEFAULT_MODE.to_string());

    let conversation_id = request
        .conversation_id
        .filter(|id| !id.is_empty())
        .map(ConversationId::from_string);

    let reply = state
        .chat_service
        .chat(&request.message, &mode, conversation_id)
        .await?;

    Ok(Json(ChatResponse {
        response: reply.response,
        conversation_id: reply.conversation_id.to_string(),
    }))
}
