use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::application::ports::{Responder, ResponderError};
use crate::domain::HistoryMessage;
use crate::presentation::config::LlmSettings;

use super::SystemPrompts;

/// Responder backed by an OpenAI-compatible `/chat/completions` endpoint.
pub struct ChatCompletionResponder {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
    max_tokens: usize,
    temperature: f32,
    prompts: Arc<SystemPrompts>,
}

#[derive(Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: usize,
    temperature: f32,
}

#[derive(Serialize, Deserialize, Clone)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

impl ChatCompletionResponder {
    fn build_messages(&self, history: &[HistoryMessage], mode: &str) -> Vec<ChatMessage> {
        let system = ChatMessage {
            role: "system".to_string(),
            content: self.prompts.get(mode).to_string(),
        };

        std::iter::once(system)
            .chain(history.iter().map(|m| ChatMessage {
                role: m.role.as_str().to_string(),
                content: m.content.clone(),
            }))
            .collect()
    }
}

#[async_trait]
impl Responder for ChatCompletionResponder {
    #[tracing::instrument(skip(self, history), fields(model = %self.model, history_len = history.len()))]
    async fn generate(
        &self,
        history: &[HistoryMessage],
        mode: &str,
    ) -> Result<String, ResponderError> {
        let request_body = ChatCompletionRequest {
            model: self.model.clone(),
            messages: self.build_messages(history, mode),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request_body)
            .send()
            .await
            .map_err(|e| ResponderError::ApiRequestFailed(e.to_string()))?;

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(ResponderError::RateLimited);
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ResponderError::ApiRequestFailed(format!(
                "HTTP {}: {}",
                status, body
            )));
        }

        let completion_response: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| ResponderError::InvalidResponse(e.to_string()))?;

        completion_response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| ResponderError::InvalidResponse("empty choices".to_string()))
    }
}

pub fn create_chat_completion_responder(
    settings: &LlmSettings,
    prompts: Arc<SystemPrompts>,
) -> Result<ChatCompletionResponder, ResponderError> {
    let base_url = match settings.provider.as_str() {
        "groq" => "https://api.groq.com/openai/v1".to_string(),
        "openai" => "https://api.openai.com/v1".to_string(),
        "compatible" => settings
            .base_url
            .clone()
            .ok_or_else(|| {
                ResponderError::InvalidResponse(
                    "base_url required for compatible provider".to_string(),
                )
            })?
            .trim_end_matches('/')
            .to_string(),
        _ => {
            return Err(ResponderError::InvalidResponse(format!(
                "unknown provider: {}",
                settings.provider
            )));
        }
    };

    Ok(ChatCompletionResponder {
        client: Client::new(),
        base_url,
        api_key: settings.api_key.clone(),
        model: settings.chat_model.clone(),
        max_tokens: settings.max_tokens,
        temperature: settings.temperature,
        prompts,
    })
}
