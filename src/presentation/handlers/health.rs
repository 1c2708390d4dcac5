use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Serialize;

use crate::application::ports::{MessageStore, Responder};
use crate::presentation::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
    pub version: String,
    pub database: String,
}

pub async fn health_handler<S, R>(State(state): State<AppState<S, R>>) -> impl IntoResponse
where
    S: MessageStore + ?Sized + 'static,
    R: Responder + ?Sized + 'static,
{
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            message: "Custom AI Assistant is running!".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            database: state.settings.storage.provider.as_str().to_string(),
        }),
    )
}
