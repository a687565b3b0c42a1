use thiserror::Error;

#[derive(Debug, Error)]
pub enum VssError {
    #[error("VSS API base URL is not configured: no system default server and no VSS_API_BASE_URL")]
    NotConfigured,
    #[error("VSS API base URL {0:?} is not a valid URL")]
    InvalidBaseUrl(String),
    #[error("{0} is required")]
    MissingArgument(&'static str),
    #[error("network error calling VSS API: {0}")]
    Network(#[from] reqwest::Error),
    #[error("{message}")]
    Api { status: u16, message: String },
    #[error("failed to parse VSS API response: {0}")]
    Decode(String),
}
