use serde::{Deserialize, Serialize};

/// A tenant account. Created unapproved at signup; a system administrator
/// toggles `approved` and may pin a default processing server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub billing_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub approved: bool,
    #[serde(default)]
    pub default_server_id: Option<String>,
}
