mod api;
mod config;
mod dto;
mod state;
mod supabase;

use crate::{config::Config, state::AppState};
use axum::{
    Router,
    routing::{get, post},
};
use sikembang::proximity::{Presenter, Theme};
use std::sync::Arc;
use tracing::{error, info};

fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/posyandu", get(api::list))
        .route("/posyandu/{id}", get(api::detail))
        .route("/near", get(api::near))
        .route("/search", get(api::search))
        .route("/reload", post(api::reload))
        .with_state(state)
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().init();
    dotenvy::dotenv().ok();

    info!("Starting server...");
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            error!("Invalid configuration: {err}");
            std::process::exit(1);
        }
    };

    info!("Loading data...");
    let client = reqwest::Client::new();
    let repository = match supabase::load_repository(&client, &config.source).await {
        Ok(repository) => repository,
        Err(err) => {
            error!("Failed to load posyandu: {err}");
            std::process::exit(1);
        }
    };
    let presenter = Presenter::new(Theme::default(), config.locale);
    let state = Arc::new(AppState::new(config.source, presenter, repository));

    let listener = match tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port)).await {
        Ok(listener) => listener,
        Err(err) => {
            error!("Failed to bind port {}: {err}", config.port);
            std::process::exit(1);
        }
    };
    info!("Listening to port {}", config.port);
    if let Err(err) = axum::serve(listener, app(state)).await {
        error!("Server stopped: {err}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DataSource;
    use axum::{
        body::{Body, to_bytes},
        http::{Request, StatusCode},
    };
    use serde_json::Value;
    use sikembang::{
        repository::{Facility, OperatingHours, Repository, Status},
        shared::Coordinate,
    };
    use tower::ServiceExt;

    fn facility(id: &str, name: &str, coordinate: Option<Coordinate>) -> Facility {
        Facility {
            id: id.into(),
            name: name.into(),
            normalized_name: sikembang::shared::normalize(name).into(),
            coordinate,
            status: Status::Active,
            hours: OperatingHours {
                monday: "08:00 - 12:00".into(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    fn state() -> Arc<AppState> {
        let repository = Repository::new().with_facilities([
            facility("1", "Posyandu Melati", Some(Coordinate::new(-6.9147, 107.6098))),
            facility("2", "Posyandu Mawar", Some(Coordinate::new(-6.9200, 107.6100))),
            facility("3", "Posyandu Kenanga", None),
        ]);
        Arc::new(AppState::new(
            DataSource::Snapshot("unused.zip".into()),
            Presenter::default(),
            repository,
        ))
    }

    async fn get_json(uri: &str) -> (StatusCode, Value) {
        let response = app(state())
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    #[tokio::test]
    async fn list_without_location() {
        let (status, body) = get_json("/posyandu").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 3);
        assert_eq!(body[0]["distance"], "Tidak tersedia");
        assert_eq!(body[0]["eta"], "-");
        assert_eq!(body[0]["status_color"], "#4CAF50");
    }

    #[tokio::test]
    async fn near_ranks_closest_first() {
        let (status, body) = get_json("/near?lat=-6.9175&lon=107.6191&count=5").await;
        assert_eq!(status, StatusCode::OK);
        let ids: Vec<_> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|facility| facility["id"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(ids.last().map(String::as_str), Some("3"));
        assert_eq!(body[2]["distance"], "Tidak tersedia");
        assert!(body[0]["distance"].as_str().unwrap().ends_with(" km"));
    }

    #[tokio::test]
    async fn detail_in_english() {
        let (status, body) = get_json("/posyandu/1?lang=en").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "Open");
        assert_eq!(body["distance"], "Not available");
        assert_eq!(body["hours"].as_array().unwrap().len(), 7);
        assert_eq!(body["hours"][0]["day"], "Monday");
        assert_eq!(body["hours"][1]["day"], "Tuesday");
        assert_eq!(body["hours"][1]["hours"], "Closed");
        assert!(
            body["navigation_uri"]
                .as_str()
                .unwrap()
                .starts_with("https://www.google.com/maps/dir/?api=1&destination=")
        );
    }

    #[tokio::test]
    async fn unknown_facility() {
        let (status, _) = get_json("/posyandu/404").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn bad_location() {
        let (status, _) = get_json("/posyandu?lat=-6.9").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn search_by_name() {
        let (status, body) = get_json("/search?q=mawar").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["id"], "2");
    }
}
