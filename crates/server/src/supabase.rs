use crate::config::{DataSource, SupabaseConfig};
use sikembang::{
    repository::{Facility, Repository},
    source::{self, FacilityStore, Snapshot},
};
use std::time::Instant;
use thiserror::Error;
use tracing::info;

const FACILITY_TABLE: &str = "posyandu";

#[derive(Error, Debug)]
pub enum Error {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Could not read data: {0}")]
    Source(#[from] source::Error),
    #[error("Background load failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Fetches every row of the posyandu table through the PostgREST endpoint.
pub async fn fetch_facilities(
    client: &reqwest::Client,
    config: &SupabaseConfig,
) -> Result<Vec<Facility>, Error> {
    let body = client
        .get(format!("{}/rest/v1/{FACILITY_TABLE}?select=*", config.url))
        .header("apikey", &config.key)
        .bearer_auth(&config.key)
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;
    Ok(source::decode_supabase(&body)?)
}

pub async fn load_repository(
    client: &reqwest::Client,
    source: &DataSource,
) -> Result<Repository, Error> {
    let now = Instant::now();
    let repository = match source {
        DataSource::Supabase(config) => {
            let facilities = fetch_facilities(client, config).await?;
            Repository::new().with_facilities(facilities)
        }
        DataSource::Snapshot(path) => {
            let path = path.clone();
            // Reading and parsing the archive blocks.
            let facilities =
                tokio::task::spawn_blocking(move || Snapshot::default().from_zip(path).facilities())
                    .await??;
            Repository::new().with_facilities(facilities)
        }
    };
    info!(
        "Loaded {} posyandu in {:?}",
        repository.len(),
        now.elapsed()
    );
    Ok(repository)
}
