mod chat;
mod conversations;
mod error;
mod health;
mod modes;

pub use chat::{ChatRequest, ChatResponse, chat_handler};
pub use conversations::{
    ConversationListResponse, MessageResponse, UpdateModeRequest, delete_conversation_handler,
    get_conversation_handler, list_conversations_handler, update_mode_handler,
};
pub use error::{ApiError, CONVERSATION_NOT_FOUND, ErrorResponse};
pub use health::{HealthResponse, health_handler};
pub use modes::{ModesResponse, modes_handler};
