use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{ConversationId, HistoryMessage, Message};

pub const DEFAULT_MODE: &str = "default";
pub const UNTITLED: &str = "Untitled";

/// Aggregate root: one document per conversation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Conversation {
    #[serde(rename = "conversation_id")]
    pub id: ConversationId,
    pub title: Option<String>,
    pub mode: String,
    pub messages: Vec<Message>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Conversation {
    pub fn new(mode: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: ConversationId::new(),
            title: None,
            mode: mode.into(),
            messages: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// The last `last_n` messages in stored order, timestamps stripped.
    pub fn recent_history(&self, last_n: usize) -> Vec<HistoryMessage> {
        let start = self.messages.len().saturating_sub(last_n);
        self.messages[start..]
            .iter()
            .map(Message::to_history)
            .collect()
    }

    pub fn summary(&self) -> ConversationSummary {
        ConversationSummary {
            conversation_id: self.id.clone(),
            title: self.title.clone().unwrap_or_else(|| UNTITLED.to_string()),
            mode: if self.mode.is_empty() {
                DEFAULT_MODE.to_string()
            } else {
                self.mode.clone()
            },
            message_count: self.messages.len(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new(DEFAULT_MODE)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConversationSummary {
    pub conversation_id: ConversationId,
    pub title: String,
    pub mode: String,
    pub message_count: usize,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
