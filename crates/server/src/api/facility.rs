use crate::{
    api::{Params, count, observer, presenter},
    dto::{FacilityDetailDto, FacilityDto},
    state::AppState,
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sikembang::shared::Coordinate;
use std::sync::Arc;

/// Where the map centers when the device location is unknown.
const FALLBACK_LOCATION: Coordinate = Coordinate::new(-7.9826, 112.6308);

pub async fn list(
    Query(params): Query<Params>,
    State(state): State<Arc<AppState>>,
) -> Result<Response, StatusCode> {
    let observer = observer(&params)?;
    let presenter = presenter(&params, &state.presenter);
    let repository = state.repository.read().await;
    let result: Vec<_> = repository
        .facilities
        .iter()
        .map(|facility| FacilityDto::from(facility, &facility.proximity(observer), &presenter))
        .collect();
    Ok(Json(result).into_response())
}

pub async fn detail(
    Path(id): Path<String>,
    Query(params): Query<Params>,
    State(state): State<Arc<AppState>>,
) -> Result<Response, StatusCode> {
    let observer = observer(&params)?;
    let presenter = presenter(&params, &state.presenter);
    let repository = state.repository.read().await;
    let facility = repository
        .facility_by_id(&id)
        .ok_or(StatusCode::NOT_FOUND)?;
    let proximity = facility.proximity(observer);
    Ok(Json(FacilityDetailDto::from(facility, &proximity, &presenter)).into_response())
}

pub async fn near(
    Query(params): Query<Params>,
    State(state): State<Arc<AppState>>,
) -> Result<Response, StatusCode> {
    let observer = observer(&params)?.unwrap_or(FALLBACK_LOCATION);
    let count = count(&params, 10)?;
    let presenter = presenter(&params, &state.presenter);
    let repository = state.repository.read().await;
    let result: Vec<_> = repository
        .nearest(Some(observer), count)
        .into_iter()
        .map(|(facility, proximity)| FacilityDto::from(facility, &proximity, &presenter))
        .collect();
    Ok(Json(result).into_response())
}
