use crate::{
    api::{Params, count, observer, presenter},
    dto::FacilityDto,
    state::AppState,
};
use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

pub async fn search(
    Query(params): Query<Params>,
    State(state): State<Arc<AppState>>,
) -> Result<Response, StatusCode> {
    let query = params.get("q").ok_or(StatusCode::BAD_REQUEST)?;
    let count = count(&params, 5)?;
    let observer = observer(&params)?;
    let presenter = presenter(&params, &state.presenter);
    let repository = state.repository.read().await;
    let result: Vec<_> = repository
        .search_by_name(query)
        .into_iter()
        .take(count)
        .map(|facility| FacilityDto::from(facility, &facility.proximity(observer), &presenter))
        .collect();
    Ok(Json(result).into_response())
}
