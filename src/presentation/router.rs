use axum::Router;
use axum::middleware;
use axum::routing::{get, patch, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::application::ports::{MessageStore, Responder};
use crate::infrastructure::observability::request_id_middleware;
use crate::presentation::handlers::{
    chat_handler, delete_conversation_handler, get_conversation_handler, health_handler,
    list_conversations_handler, modes_handler, update_mode_handler,
};
use crate::presentation::state::AppState;

pub fn create_router<S, R>(state: AppState<S, R>) -> Router
where
    S: MessageStore + ?Sized + 'static,
    R: Responder + ?Sized + 'static,
{
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    Router::new()
        .route("/", get(health_handler::<S, R>))
        .route("/health", get(health_handler::<S, R>))
        .route("/chat", post(chat_handler::<S, R>))
        .route("/modes", get(modes_handler::<S, R>))
        .route("/conversation", get(list_conversations_handler::<S, R>))
        .route(
            "/conversation/{conversation_id}",
            get(get_conversation_handler::<S, R>).delete(delete_conversation_handler::<S, R>),
        )
        .route(
            "/conversation/{conversation_id}/mode",
            patch(update_mode_handler::<S, R>),
        )
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}
