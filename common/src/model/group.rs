use crate::model::configuration::TimeSpan;
use serde::{Deserialize, Serialize};

/// Optional camera grouping. The `default_*` fields seed the configuration of
/// cameras added to the group through the wizard.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub name: String,
    pub organization_id: String,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub cameras: Vec<String>,
    #[serde(default)]
    pub default_camera_scene_context: Option<String>,
    #[serde(default)]
    pub default_ai_detection_target: Option<String>,
    #[serde(default)]
    pub default_alert_events: Option<Vec<String>>,
    #[serde(default)]
    pub default_video_chunks: Option<TimeSpan>,
    #[serde(default)]
    pub default_num_frames: Option<u32>,
    #[serde(default)]
    pub default_video_overlap: Option<TimeSpan>,
}
