use crate::model::configuration::{AlertEvent, TimeSpan};
use crate::validation::{self, ValidationError};
use serde::{Deserialize, Serialize};

/// Which group a new camera joins.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum GroupAssignment {
    #[default]
    None,
    Existing {
        #[serde(rename = "groupId")]
        group_id: String,
    },
    New(NewGroup),
}

/// A group created together with the camera, carrying its defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewGroup {
    pub name: String,
    #[serde(default)]
    pub default_camera_scene_context: Option<String>,
    #[serde(default)]
    pub default_ai_detection_target: Option<String>,
    #[serde(default)]
    pub default_alert_events: Vec<String>,
    #[serde(default)]
    pub default_video_chunks: Option<TimeSpan>,
    #[serde(default)]
    pub default_num_frames: Option<u32>,
    #[serde(default)]
    pub default_video_overlap: Option<TimeSpan>,
}

/// The AI configuration entered on the last wizard step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigurationDraft {
    #[serde(default)]
    pub scene_description: Option<String>,
    pub camera_scene_context: String,
    pub ai_detection_target: String,
    pub alert_events: Vec<AlertEvent>,
    pub video_chunks: TimeSpan,
    pub video_overlap: TimeSpan,
    pub num_frames: u32,
}

impl ConfigurationDraft {
    pub fn validate(&self, errors: &mut Vec<ValidationError>) {
        validation::required(
            "cameraSceneContext",
            &self.camera_scene_context,
            "This field is required.",
            errors,
        );
        validation::required(
            "aiDetectionTarget",
            &self.ai_detection_target,
            "AI detection target is required.",
            errors,
        );
        if self.alert_events.iter().all(|e| e.name.trim().is_empty()) {
            errors.push(ValidationError::new("alertEvents", "Alert events are required."));
        }
        if self.video_chunks.value <= 0.0 {
            errors.push(ValidationError::new("videoChunks", "Must be greater than zero"));
        }
        if self.video_overlap.value < 0.0 {
            errors.push(ValidationError::new("videoOverlap", "Must not be negative"));
        }
        if self.num_frames == 0 {
            errors.push(ValidationError::new("numFrames", "Must be greater than zero"));
        }
    }

    /// Alert events with blank names dropped and fields trimmed.
    pub fn cleaned_alert_events(&self) -> Vec<AlertEvent> {
        self.alert_events
            .iter()
            .filter(|e| !e.name.trim().is_empty())
            .map(|e| AlertEvent::new(e.name.trim(), e.condition.trim()))
            .collect()
    }
}

/// The wizard submission persisted by `POST /api/cameras`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCameraRequest {
    pub organization_id: String,
    #[serde(default)]
    pub user_id: Option<String>,
    pub camera_name: String,
    pub rtsp_url: String,
    #[serde(default)]
    pub rtsp_username: Option<String>,
    #[serde(default)]
    pub rtsp_password: Option<String>,
    #[serde(default)]
    pub group: GroupAssignment,
    #[serde(default)]
    pub snapshot_gcs_object_name: Option<String>,
    pub configuration: ConfigurationDraft,
}

impl CreateCameraRequest {
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();
        validation::required(
            "organizationId",
            &self.organization_id,
            "Organization is required.",
            &mut errors,
        );
        validation::required("cameraName", &self.camera_name, "Camera name is required.", &mut errors);
        validation::rtsp_url(&self.rtsp_url, &mut errors);
        match &self.group {
            GroupAssignment::New(group) => validation::required(
                "newGroupName",
                &group.name,
                "New group name is required when adding a new group.",
                &mut errors,
            ),
            GroupAssignment::Existing { group_id } => {
                validation::required("group", group_id, "Group is required.", &mut errors)
            }
            GroupAssignment::None => {}
        }
        self.configuration.validate(&mut errors);
        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCameraResponse {
    pub camera_id: String,
    pub configuration_id: String,
    #[serde(default)]
    pub group_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateConfigurationResponse {
    pub configuration_id: String,
    pub previous_config_id: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotRequest {
    pub rtsp_url: String,
    #[serde(default)]
    pub rtsp_username: Option<String>,
    #[serde(default)]
    pub rtsp_password: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotResponse {
    pub snapshot_data_uri: String,
    pub resolution: String,
}

/// Prompts sent to VSS for one camera, built from its current configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VssPromptsResponse {
    pub configuration_id: String,
    pub base_prompt: String,
    pub caption_prompt: String,
    pub summary_prompt: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> ConfigurationDraft {
        ConfigurationDraft {
            scene_description: None,
            camera_scene_context: "Loading dock".into(),
            ai_detection_target: "people, forklifts".into(),
            alert_events: vec![AlertEvent::new("Forklift near person", "")],
            video_chunks: TimeSpan::seconds(10.0),
            video_overlap: TimeSpan::seconds(2.0),
            num_frames: 5,
        }
    }

    fn request() -> CreateCameraRequest {
        CreateCameraRequest {
            organization_id: "org-1".into(),
            user_id: None,
            camera_name: "Dock".into(),
            rtsp_url: "rtsp://10.0.0.7/stream1".into(),
            rtsp_username: None,
            rtsp_password: None,
            group: GroupAssignment::None,
            snapshot_gcs_object_name: None,
            configuration: draft(),
        }
    }

    #[test]
    fn valid_request_passes() {
        assert!(request().validate().is_ok());
    }

    #[test]
    fn new_group_requires_a_name() {
        let mut req = request();
        req.group = GroupAssignment::New(NewGroup::default());
        let errors = req.validate().unwrap_err();
        assert_eq!(errors[0].field, "newGroupName");
    }

    #[test]
    fn blank_alert_events_are_rejected_and_cleaned() {
        let mut req = request();
        req.configuration.alert_events = vec![AlertEvent::new("  ", "x")];
        let errors = req.validate().unwrap_err();
        assert!(errors.iter().any(|e| e.field == "alertEvents"));

        let mut d = draft();
        d.alert_events.push(AlertEvent::new(" ", ""));
        d.alert_events.push(AlertEvent::new(" Loitering ", " over 5 min "));
        assert_eq!(
            d.cleaned_alert_events(),
            vec![
                AlertEvent::new("Forklift near person", ""),
                AlertEvent::new("Loitering", "over 5 min")
            ]
        );
    }

    #[test]
    fn group_assignment_is_tagged() {
        let json = serde_json::to_value(GroupAssignment::Existing { group_id: "g1".into() }).unwrap();
        assert_eq!(json, serde_json::json!({"type": "existing", "groupId": "g1"}));
        let parsed: GroupAssignment = serde_json::from_value(serde_json::json!({"type": "none"})).unwrap();
        assert_eq!(parsed, GroupAssignment::None);
    }
}
