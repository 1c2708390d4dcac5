use std::sync::Arc;

use tracing::{debug, instrument, warn};

use crate::application::ports::{MessageStore, StoreError};
use crate::domain::{
    Conversation, ConversationId, ConversationSummary, DEFAULT_MODE, HistoryMessage, Message,
    MessageRole, derive_title,
};

pub const DEFAULT_HISTORY_WINDOW: usize = 10;
pub const DEFAULT_SUMMARY_LIMIT: usize = 50;

/// Owns the conversation lifecycle on top of a [`MessageStore`].
///
/// Store failures propagate unchanged; nothing here retries.
pub struct ConversationRepository<S>
where
    S: MessageStore + ?Sized,
{
    store: Arc<S>,
}

impl<S> ConversationRepository<S>
where
    S: MessageStore + ?Sized,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    #[instrument(skip(self))]
    pub async fn create_conversation(&self, mode: &str) -> Result<ConversationId, StoreError> {
        let conversation = Conversation::new(mode);
        self.store.insert(&conversation).await?;

        debug!(conversation_id = %conversation.id, "Conversation created");
        Ok(conversation.id)
    }

    /// Appends a message and returns the id it was actually stored under.
    ///
    /// An unknown `conversation_id` is replaced by a freshly created
    /// conversation in the default mode; the returned id differs from the
    /// requested one in that case.
    #[instrument(skip(self, content), fields(conversation_id = %conversation_id, role = %role))]
    pub async fn add_message(
        &self,
        conversation_id: &ConversationId,
        role: MessageRole,
        content: &str,
    ) -> Result<ConversationId, StoreError> {
        let message = Message::new(role, content);

        let mut target = conversation_id.clone();
        let matched = self.store.append_message(&target, &message).await?;

        if matched == 0 {
            let replacement = self.create_conversation(DEFAULT_MODE).await?;
            warn!(
                requested_id = %conversation_id,
                replacement_id = %replacement,
                "Conversation not found, appending to a new conversation"
            );
            self.store.append_message(&replacement, &message).await?;
            target = replacement;
        }

        if role == MessageRole::User {
            self.assign_title(&target, content).await;
        }

        Ok(target)
    }

    /// Best effort: a failure here is logged and never fails the append.
    async fn assign_title(&self, conversation_id: &ConversationId, content: &str) {
        let title = derive_title(content);

        match self.store.set_title_if_unset(conversation_id, &title).await {
            Ok(true) => debug!(conversation_id = %conversation_id, "Conversation titled"),
            Ok(false) => {}
            Err(e) => warn!(
                conversation_id = %conversation_id,
                error = %e,
                "Failed to set conversation title"
            ),
        }
    }

    /// Suffix of at most `last_n` messages in stored order. Empty when the
    /// conversation does not exist.
    #[instrument(skip(self), fields(conversation_id = %conversation_id))]
    pub async fn get_recent_history(
        &self,
        conversation_id: &ConversationId,
        last_n: usize,
    ) -> Result<Vec<HistoryMessage>, StoreError> {
        let conversation = self.store.find_by_conversation_id(conversation_id).await?;

        Ok(conversation
            .map(|c| c.recent_history(last_n))
            .unwrap_or_default())
    }

    /// Summaries ordered by most recent activity first.
    #[instrument(skip(self))]
    pub async fn get_all_conversation_summaries(
        &self,
        limit: usize,
    ) -> Result<Vec<ConversationSummary>, StoreError> {
        let conversations = self.store.list_sorted_by_updated_desc(limit).await?;

        Ok(conversations.iter().map(Conversation::summary).collect())
    }

    #[instrument(skip(self), fields(conversation_id = %conversation_id))]
    pub async fn get_conversation_detail(
        &self,
        conversation_id: &ConversationId,
    ) -> Result<Option<Conversation>, StoreError> {
        self.store.find_by_conversation_id(conversation_id).await
    }

    #[instrument(skip(self), fields(conversation_id = %conversation_id))]
    pub async fn delete_conversation(
        &self,
        conversation_id: &ConversationId,
    ) -> Result<bool, StoreError> {
        let deleted = self.store.delete(conversation_id).await?;
        Ok(deleted > 0)
    }

    #[instrument(skip(self), fields(conversation_id = %conversation_id))]
    pub async fn update_conversation_mode(
        &self,
        conversation_id: &ConversationId,
        mode: &str,
    ) -> Result<bool, StoreError> {
        let matched = self.store.set_mode(conversation_id, mode).await?;
        Ok(matched > 0)
    }
}
