use async_trait::async_trait;

use crate::domain::{Conversation, ConversationId, Message};

use super::StoreError;

/// Keyed document store holding one document per conversation.
///
/// Every mutation is a single atomic operation against one document; callers
/// never read-modify-write.
#[async_trait]
pub trait MessageStore: Send + Sync {
    /// Persists a new document. Fails with `DuplicateId` if the id is taken.
    async fn insert(&self, conversation: &Conversation) -> Result<(), StoreError>;

    async fn find_by_conversation_id(
        &self,
        id: &ConversationId,
    ) -> Result<Option<Conversation>, StoreError>;

    /// Pushes `message` onto the document and sets `updated_at` to the message
    /// timestamp. Returns the number of matched documents (0 or 1).
    async fn append_message(
        &self,
        id: &ConversationId,
        message: &Message,
    ) -> Result<u64, StoreError>;

    /// Sets the title only if it is still unset. Returns whether it was written.
    async fn set_title_if_unset(&self, id: &ConversationId, title: &str)
    -> Result<bool, StoreError>;

    /// Returns the number of matched documents.
    async fn set_mode(&self, id: &ConversationId, mode: &str) -> Result<u64, StoreError>;

    async fn list_sorted_by_updated_desc(
        &self,
        limit: usize,
    ) -> Result<Vec<Conversation>, StoreError>;

    /// Returns the number of deleted documents.
    async fn delete(&self, id: &ConversationId) -> Result<u64, StoreError>;

    /// Releases the underlying client. Called once at shutdown.
    async fn close(&self) {}
}
