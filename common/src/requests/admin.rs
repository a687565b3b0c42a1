use crate::model::alert::{AlertStatus, Severity};
use crate::model::configuration::TimeSpan;
use crate::model::server::{Protocol, ServerStatus};
use crate::model::user::Role;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub email: String,
    /// Id issued by the identity provider; generated when absent.
    #[serde(default)]
    pub user_id: Option<String>,
    pub organization_name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub billing_address: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupResponse {
    pub organization_id: String,
    pub user_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinOrganizationRequest {
    pub email: String,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub role: Option<Role>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateRoleRequest {
    pub role: Role,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApprovalRequest {
    pub approved: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DefaultServerRequest {
    #[serde(default)]
    pub server_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateServerRequest {
    pub name: String,
    pub ip_address_with_port: String,
    #[serde(default)]
    pub protocol: Protocol,
    #[serde(default)]
    pub status: ServerStatus,
    #[serde(default)]
    pub is_system_default: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGroupRequest {
    pub organization_id: String,
    #[serde(default)]
    pub user_id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub default_camera_scene_context: Option<String>,
    #[serde(default)]
    pub default_ai_detection_target: Option<String>,
    /// Comma-separated list as typed in the form.
    #[serde(default)]
    pub default_alert_events: Option<String>,
    #[serde(default)]
    pub default_video_chunks: Option<TimeSpan>,
    #[serde(default)]
    pub default_num_frames: Option<u32>,
    #[serde(default)]
    pub default_video_overlap: Option<TimeSpan>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatedResponse {
    pub id: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FetchAlertsQuery {
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub severity: Option<Severity>,
    #[serde(default)]
    pub status: Option<AlertStatus>,
    #[serde(default)]
    pub limit: Option<usize>,
    #[serde(default)]
    pub language: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FetchAlertsResponse {
    pub alerts: Vec<crate::model::alert::Alert>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
