use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Catalog file could not be parsed: {0}")]
    Csv(#[from] csv::Error),

    #[error("Catalog registry could not be parsed: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Request to Wikidata failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected response body: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Wikidata API error {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("Unknown catalog '{0}'")]
    UnknownCatalog(String),

    #[error("Invalid Wikidata identifier '{0}'")]
    InvalidIdentifier(String),
}

pub type Result<T> = std::result::Result<T, CatalogError>;
