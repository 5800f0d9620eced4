use thiserror::Error;

pub type Result<T> = std::result::Result<T, PageError>;

#[derive(Error, Debug)]
pub enum PageError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to load {location}: status {status}")]
    Status { location: String, status: u16 },

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Invalid resource location: {0}")]
    InvalidLocation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Catalog error: {0}")]
    Catalog(#[from] portfolio_catalog::CatalogError),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Theme storage error: {0}")]
    Storage(String),
}
