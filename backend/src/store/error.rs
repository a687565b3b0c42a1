use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("document encoding error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("invalid stored timestamp: {0}")]
    Timestamp(#[from] chrono::ParseError),
    #[error("{collection}/{id} not found")]
    NotFound { collection: String, id: String },
    #[error("precondition failed: {0}")]
    PreconditionFailed(String),
    #[error("{0}")]
    InvariantViolated(String),
    #[error("invalid document: {0}")]
    InvalidDocument(String),
    #[error("document store lock poisoned")]
    Poisoned,
}

impl StoreError {
    pub fn not_found(collection: &str, id: &str) -> Self {
        StoreError::NotFound {
            collection: collection.to_string(),
            id: id.to_string(),
        }
    }
}
