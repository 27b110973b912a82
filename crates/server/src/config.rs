use sikembang::proximity::Locale;
use std::{env, path::PathBuf};
use thiserror::Error;

const DEFAULT_PORT: u16 = 3000;

#[derive(Error, Debug)]
pub enum Error {
    #[error("{0} is not a valid port")]
    InvalidPort(String),
    #[error("Set SUPABASE_URL and SUPABASE_KEY, or SIKEMBANG_SNAPSHOT")]
    MissingSource,
}

#[derive(Debug, Clone)]
pub struct SupabaseConfig {
    pub url: String,
    pub key: String,
}

#[derive(Debug, Clone)]
pub enum DataSource {
    Supabase(SupabaseConfig),
    Snapshot(PathBuf),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub source: DataSource,
    pub locale: Locale,
}

impl Config {
    /// Reads the process environment, after `.env` has been applied.
    /// A snapshot wins over Supabase when both are configured.
    pub fn from_env() -> Result<Self, Error> {
        let port = match env::var("SIKEMBANG_PORT") {
            Ok(value) => value.parse().map_err(|_| Error::InvalidPort(value))?,
            Err(_) => DEFAULT_PORT,
        };

        let source = if let Ok(path) = env::var("SIKEMBANG_SNAPSHOT") {
            DataSource::Snapshot(path.into())
        } else {
            match (env::var("SUPABASE_URL"), env::var("SUPABASE_KEY")) {
                (Ok(url), Ok(key)) => DataSource::Supabase(SupabaseConfig {
                    url: url.trim_end_matches('/').to_string(),
                    key,
                }),
                _ => return Err(Error::MissingSource),
            }
        };

        let locale = env::var("SIKEMBANG_LOCALE")
            .map(|tag| Locale::from_tag(&tag))
            .unwrap_or_default();

        Ok(Self {
            port,
            source,
            locale,
        })
    }
}
