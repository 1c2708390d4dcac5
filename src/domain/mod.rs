mod conversation;
mod conversation_id;
mod message;
mod message_role;
mod title;

pub use conversation::{Conversation, ConversationSummary, DEFAULT_MODE, UNTITLED};
pub use conversation_id::ConversationId;
pub use message::{HistoryMessage, Message};
pub use message_role::MessageRole;
pub use title::{TITLE_MAX_CHARS, derive_title};
