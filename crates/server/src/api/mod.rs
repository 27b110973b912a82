mod facility;
mod reload;
mod search;

pub use facility::*;
pub use reload::*;
pub use search::*;

use axum::http::StatusCode;
use sikembang::{
    proximity::{Locale, Presenter},
    shared::Coordinate,
};
use std::collections::HashMap;

type Params = HashMap<String, String>;

/// The user's location from `lat` and `lon`.
/// Both missing means the location is unknown, anything else half-given or
/// out of range is a bad request.
fn observer(params: &Params) -> Result<Option<Coordinate>, StatusCode> {
    match (params.get("lat"), params.get("lon")) {
        (None, None) => Ok(None),
        (Some(lat), Some(lon)) => {
            let latitude = lat.parse().map_err(|_| StatusCode::BAD_REQUEST)?;
            let longitude = lon.parse().map_err(|_| StatusCode::BAD_REQUEST)?;
            Coordinate::from_parts(Some(latitude), Some(longitude))
                .map(Some)
                .ok_or(StatusCode::BAD_REQUEST)
        }
        _ => Err(StatusCode::BAD_REQUEST),
    }
}

fn count(params: &Params, default: usize) -> Result<usize, StatusCode> {
    match params.get("count") {
        Some(value) => value.parse().map_err(|_| StatusCode::BAD_REQUEST),
        None => Ok(default),
    }
}

fn presenter(params: &Params, default: &Presenter) -> Presenter {
    match params.get("lang") {
        Some(tag) => Presenter::new(default.theme, Locale::from_tag(tag)),
        None => *default,
    }
}
