//! Suggestion endpoints. Request fields are optional on the wire so that a
//! missing field is answered with a 400 and a message instead of a parse error.

use crate::model::configuration::AlertEvent;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestDetectionTargetsRequest {
    #[serde(default)]
    pub camera_scene_context: Option<String>,
    #[serde(default)]
    pub scene_description: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestDetectionTargetsResponse {
    /// Comma-separated list, e.g. `people, vehicles, packages`.
    pub suggested_targets: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestAlertEventsRequest {
    #[serde(default)]
    pub camera_scene_context: Option<String>,
    #[serde(default)]
    pub ai_detection_target: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestAlertEventsResponse {
    pub suggested_alerts: Vec<AlertEvent>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupAlertEventsRequest {
    #[serde(default)]
    pub ai_detection_target: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupAlertEventsResponse {
    /// Comma-separated, prefixed events such as `security: after-hours activity`.
    pub suggested_alert_events: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneDescriptionRequest {
    /// Data URI (`data:image/jpeg;base64,...`) or bare base64 JPEG.
    #[serde(default)]
    pub image_data: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneDescriptionResponse {
    pub scene_description: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeCameraFeedRequest {
    #[serde(default)]
    pub camera_feed_data_uri: Option<String>,
    #[serde(default)]
    pub prompt: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeCameraFeedResponse {
    pub event_detected: bool,
    pub alert_message: String,
}
