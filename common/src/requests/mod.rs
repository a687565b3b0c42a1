//! JSON payloads of the HTTP API.

pub mod admin;
pub mod cameras;
pub mod suggestions;
pub mod vss;

use serde::{Deserialize, Serialize};

/// Body of every non-VSS error response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
