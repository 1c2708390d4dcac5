#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store not configured: {0}")]
    Configuration(String),
    #[error("store unavailable: {0}")]
    Unavailable(String),
    #[error("malformed document: {0}")]
    MalformedDocument(String),
    #[error("duplicate conversation id: {0}")]
    DuplicateId(String),
}
