use crate::{state::AppState, supabase};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tracing::error;

/// Fetches the posyandu list again and swaps it in.
/// The old list keeps serving until the new one is ready.
pub async fn reload(State(state): State<Arc<AppState>>) -> Result<Response, StatusCode> {
    let repository = supabase::load_repository(&state.client, &state.source)
        .await
        .map_err(|err| {
            error!("Failed to reload posyandu: {err}");
            StatusCode::BAD_GATEWAY
        })?;
    let count = repository.len();
    *state.repository.write().await = repository;
    Ok(count.to_string().into_response())
}
