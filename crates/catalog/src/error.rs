use thiserror::Error;

/// Result type for catalog operations
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Errors that can occur while loading catalog inputs
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Catalog payload is not valid JSON
    #[error("Invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Tag dictionary entry has a pattern that does not compile
    #[error("Invalid tag pattern for '{label}': {reason}")]
    InvalidPattern { label: String, reason: String },
}

impl CatalogError {
    /// Create an invalid pattern error
    pub fn invalid_pattern(label: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidPattern {
            label: label.into(),
            reason: reason.into(),
        }
    }
}
