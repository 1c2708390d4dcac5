mod chat_completion_responder;
mod scaffold_responder;
mod system_prompts;

pub use chat_completion_responder::{ChatCompletionResponder, create_chat_completion_responder};
pub use scaffold_responder::ScaffoldResponder;
pub use system_prompts::SystemPrompts;
