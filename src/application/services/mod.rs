mod chat_service;
mod conversation_repository;

pub use chat_service::{ChatError, ChatReply, ChatService};
pub use conversation_repository::{
    ConversationRepository, DEFAULT_HISTORY_WINDOW, DEFAULT_SUMMARY_LIMIT,
};
