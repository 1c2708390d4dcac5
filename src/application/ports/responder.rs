use async_trait::async_trait;

use crate::domain::HistoryMessage;

/// Text generation boundary: ordered history plus a mode in, reply text out.
#[async_trait]
pub trait Responder: Send + Sync {
    async fn generate(
        &self,
        history: &[HistoryMessage],
        mode: &str,
    ) -> Result<String, ResponderError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ResponderError {
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("rate limited")]
    RateLimited,
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}
