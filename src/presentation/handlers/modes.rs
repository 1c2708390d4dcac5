use axum::Json;
use axum::extract::State;
use serde::Serialize;

use crate::application::ports::{MessageStore, Responder};
use crate::presentation::state::AppState;

#[derive(Serialize)]
pub struct ModesResponse {
    pub modes: Vec<String>,
}

pub async fn modes_handler<S, R>(State(state): State<AppState<S, R>>) -> Json<ModesResponse>
where
    S: MessageStore + ?Sized + 'static,
    R: Responder + ?Sized + 'static,
{
    Json(ModesResponse {
        modes: state.system_prompts.modes(),
    })
}
