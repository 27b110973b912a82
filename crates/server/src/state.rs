use crate::config::DataSource;
use sikembang::{proximity::Presenter, repository::Repository};
use tokio::sync::RwLock;

pub struct AppState {
    pub source: DataSource,
    pub presenter: Presenter,
    pub client: reqwest::Client,
    pub repository: RwLock<Repository>,
}

impl AppState {
    pub fn new(source: DataSource, presenter: Presenter, repository: Repository) -> Self {
        Self {
            source,
            presenter,
            client: reqwest::Client::new(),
            repository: RwLock::new(repository),
        }
    }
}
