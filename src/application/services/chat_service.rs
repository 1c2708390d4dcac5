use std::sync::Arc;

use tracing::instrument;

use crate::application::ports::{MessageStore, Responder, ResponderError, StoreError};
use crate::domain::{ConversationId, MessageRole};

use super::ConversationRepository;

/// Runs one chat turn: persist the user message, window the history, ask the
/// responder, persist the reply.
pub struct ChatService<S, R>
where
    S: MessageStore + ?Sized,
    R: Responder + ?Sized,
{
    conversations: Arc<ConversationRepository<S>>,
    responder: Arc<R>,
    history_window: usize,
}

impl<S, R> ChatService<S, R>
where
    S: MessageStore + ?Sized,
    R: Responder + ?Sized,
{
    pub fn new(
        conversations: Arc<ConversationRepository<S>>,
        responder: Arc<R>,
        history_window: usize,
    ) -> Self {
        Self {
            conversations,
            responder,
            history_window,
        }
    }

    /// The user message stays persisted even if the responder fails.
    #[instrument(skip(self, message), fields(mode = %mode))]
    pub async fn chat(
        &self,
        message: &str,
        mode: &str,
        conversation_id: Option<ConversationId>,
    ) -> Result<ChatReply, ChatError> {
        let conversation_id = match conversation_id {
            Some(id) => id,
            None => self.conversations.create_conversation(mode).await?,
        };

        let conversation_id = self
            .conversations
            .add_message(&conversation_id, MessageRole::User, message)
            .await?;

        let history = self
            .conversations
            .get_recent_history(&conversation_id, self.history_window)
            .await?;

        let response = self.responder.generate(&history, mode).await?;

        let conversation_id = self
            .conversations
            .add_message(&conversation_id, MessageRole::Assistant, &response)
            .await?;

        tracing::info!(conversation_id = %conversation_id, "Chat turn completed");

        Ok(ChatReply {
            response,
            conversation_id,
        })
    }
}

#[derive(Debug, Clone)]
pub struct ChatReply {
    pub response: String,
    pub conversation_id: ConversationId,
}

#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("store: {0}")]
    Store(#[from] StoreError),
    #[error("responder: {0}")]
    Responder(#[from] ResponderError),
}
