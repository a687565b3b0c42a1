//! Payloads exchanged with the video search and summarization (VSS) API.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Image,
    Video,
}

impl MediaType {
    pub fn as_str(self) -> &'static str {
        match self {
            MediaType::Image => "image",
            MediaType::Video => "video",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "image" => Some(MediaType::Image),
            "video" => Some(MediaType::Video),
            _ => None,
        }
    }
}

/// Default `purpose` of uploaded files.
pub const DEFAULT_PURPOSE: &str = "vision";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VssFile {
    pub id: String,
    #[serde(default)]
    pub bytes: Option<u64>,
    pub filename: String,
    pub purpose: String,
    pub media_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VssFileList {
    pub data: Vec<VssFile>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VssFileUpload {
    pub id: String,
    pub filename: String,
    pub purpose: String,
    pub media_type: MediaType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bytes: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VssStreamDetails {
    pub id: String,
    pub status: String,
    #[serde(default)]
    pub camera_id: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    #[serde(default)]
    pub output_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VssLiveStream {
    pub id: String,
    #[serde(rename = "livestreamUrl")]
    pub livestream_url: String,
    #[serde(default)]
    pub description: Option<String>,
    pub chunk_duration: f64,
    pub summary_duration: f64,
}

/// Live streams, always wrapped in `data` even when the API answers with a
/// bare array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VssLiveStreamList {
    pub data: Vec<VssLiveStream>,
}
