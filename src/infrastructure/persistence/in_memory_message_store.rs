use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::application::ports::{MessageStore, StoreError};
use crate::domain::{Conversation, ConversationId, Message};

/// Process-local store with the same atomicity as the PostgreSQL one: every
/// mutation happens under a single write lock.
#[derive(Default)]
pub struct InMemoryMessageStore {
    conversations: RwLock<HashMap<ConversationId, Conversation>>,
}

impl InMemoryMessageStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.conversations.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.conversations.read().await.is_empty()
    }
}

#[async_trait]
impl MessageStore for InMemoryMessageStore {
    async fn insert(&self, conversation: &Conversation) -> Result<(), StoreError> {
        let mut conversations = self.conversations.write().await;
        if conversations.contains_key(&conversation.id) {
            return Err(StoreError::DuplicateId(conversation.id.to_string()));
        }
        conversations.insert(conversation.id.clone(), conversation.clone());
        Ok(())
    }

    async fn find_by_conversation_id(
        &self,
        id: &ConversationId,
    ) -> Result<Option<Conversation>, StoreError> {
        Ok(self.conversations.read().await.get(id).cloned())
    }

    async fn append_message(
        &self,
        id: &ConversationId,
        message: &Message,
    ) -> Result<u64, StoreError> {
        let mut conversations = self.conversations.write().await;
        match conversations.get_mut(id) {
            Some(conversation) => {
                conversation.messages.push(message.clone());
                conversation.updated_at = message.timestamp;
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn set_title_if_unset(
        &self,
        id: &ConversationId,
        title: &str,
    ) -> Result<bool, StoreError> {
        let mut conversations = self.conversations.write().await;
        match conversations.get_mut(id) {
            Some(conversation) if conversation.title.is_none() => {
                conversation.title = Some(title.to_string());
                conversation.updated_at = Utc::now();
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn set_mode(&self, id: &ConversationId, mode: &str) -> Result<u64, StoreError> {
        let mut conversations = self.conversations.write().await;
        match conversations.get_mut(id) {
            Some(conversation) => {
                conversation.mode = mode.to_string();
                conversation.updated_at = Utc::now();
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn list_sorted_by_updated_desc(
        &self,
        limit: usize,
    ) -> Result<Vec<Conversation>, StoreError> {
        let conversations = self.conversations.read().await;
        let mut sorted: Vec<Conversation> = conversations.values().cloned().collect();
        sorted.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        sorted.truncate(limit);
        Ok(sorted)
    }

    async fn delete(&self, id: &ConversationId) -> Result<u64, StoreError> {
        let removed = self.conversations.write().await.remove(id);
        Ok(u64::from(removed.is_some()))
    }
}
