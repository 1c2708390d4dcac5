use std::sync::Arc;

use crate::application::ports::{MessageStore, Responder};
use crate::application::services::{ChatService, ConversationRepository};
use crate::infrastructure::llm::SystemPrompts;
use crate::presentation::config::Settings;

pub struct AppState<S, R>
where
    S: MessageStore + ?Sized,
    R: Responder + ?Sized,
{
    pub conversation_repository: Arc<ConversationRepository<S>>,
    pub chat_service: Arc<ChatService<S, R>>,
    pub system_prompts: Arc<SystemPrompts>,
    pub settings: Settings,
}

impl<S, R> AppState<S, R>
where
    S: MessageStore + ?Sized,
    R: Responder + ?Sized,
{
    /// Wires the repository and chat service around one shared store handle.
    pub fn new(
        store: Arc<S>,
        responder: Arc<R>,
        system_prompts: Arc<SystemPrompts>,
        settings: Settings,
    ) -> Self {
        let conversation_repository = Arc::new(ConversationRepository::new(store));
        let chat_service = Arc::new(ChatService::new(
            Arc::clone(&conversation_repository),
            responder,
            settings.chat.history_window,
        ));

        Self {
            conversation_repository,
            chat_service,
            system_prompts,
            settings,
        }
    }
}

impl<S, R> Clone for AppState<S, R>
where
    S: MessageStore + ?Sized,
    R: Responder + ?Sized,
{
    fn clone(&self) -> Self {
        Self {
            conversation_repository: Arc::clone(&self.conversation_repository),
            chat_service: Arc::clone(&self.chat_service),
            system_prompts: Arc::clone(&self.system_prompts),
            settings: self.settings.clone(),
        }
    }
}
