use std::time::Duration;

use async_trait::async_trait;

use crate::application::ports::{Responder, ResponderError};
use crate::domain::{HistoryMessage, MessageRole};
use crate::presentation::config::ScaffoldSettings;

/// Deterministic responder for scaffold mode and tests. Echoes the latest user
/// message along with the mode and the size of the window it was given.
pub struct ScaffoldResponder {
    delay: Duration,
}

impl ScaffoldResponder {
    pub fn new(config: &ScaffoldSettings) -> Self {
        Self {
            delay: Duration::from_millis(config.mock_response_delay_ms),
        }
    }
}

impl Default for ScaffoldResponder {
    fn default() -> Self {
        Self {
            delay: Duration::ZERO,
        }
    }
}

#[async_trait]
impl Responder for ScaffoldResponder {
    async fn generate(
        &self,
        history: &[HistoryMessage],
        mode: &str,
    ) -> Result<String, ResponderError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let last_user = history
            .iter()
            .rev()
            .find(|m| m.role == MessageRole::User)
            .map(|m| m.content.as_str())
            .unwrap_or_default();

        Ok(format!(
            "[{}] You said: \"{}\" ({} messages in context)",
            mode,
            last_user,
            history.len()
        ))
    }
}
