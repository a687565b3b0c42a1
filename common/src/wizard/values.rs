use super::WizardError;
use crate::model::configuration::{split_alert_events, AlertEvent, TimeSpan, TimeUnit};
use crate::model::group::Group;
use crate::requests::cameras::{ConfigurationDraft, NewGroup};
use crate::validation::{self, ValidationError};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum GroupChoice {
    #[default]
    None,
    Existing(String),
    AddNew,
}

/// Inline "add new group" sub-form. Numeric fields are kept as typed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewGroupFields {
    pub name: String,
    pub camera_scene_context: String,
    pub ai_detection_target: String,
    /// Comma-separated list.
    pub alert_events: String,
    pub video_chunks_value: String,
    pub video_chunks_unit: TimeUnit,
    pub num_frames: String,
    pub video_overlap_value: String,
    pub video_overlap_unit: TimeUnit,
}

impl NewGroupFields {
    fn validate(&self, errors: &mut Vec<ValidationError>) {
        validation::required(
            "newGroupName",
            &self.name,
            "New group name is required when adding a new group.",
            errors,
        );
        validation::optional_number("groupDefaultVideoChunksValue", &self.video_chunks_value, errors);
        validation::optional_number("groupDefaultNumFrames", &self.num_frames, errors);
        validation::optional_number("groupDefaultVideoOverlapValue", &self.video_overlap_value, errors);
    }

    pub fn to_new_group(&self) -> Result<NewGroup, WizardError> {
        let mut errors = Vec::new();
        self.validate(&mut errors);
        if !errors.is_empty() {
            return Err(WizardError::Invalid(errors));
        }
        let defaults = self.as_group_defaults();
        Ok(NewGroup {
            name: self.name.trim().to_string(),
            default_camera_scene_context: defaults.default_camera_scene_context,
            default_ai_detection_target: defaults.default_ai_detection_target,
            default_alert_events: defaults.default_alert_events.unwrap_or_default(),
            default_video_chunks: defaults.default_video_chunks,
            default_num_frames: defaults.default_num_frames,
            default_video_overlap: defaults.default_video_overlap,
        })
    }

    /// The sub-form read as group defaults; blank or unparsable fields are unset.
    pub(super) fn as_group_defaults(&self) -> Group {
        let text = |s: &str| {
            let s = s.trim();
            (!s.is_empty()).then(|| s.to_string())
        };
        let span = |value: &str, unit: TimeUnit| {
            value
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .map(|value| TimeSpan { value, unit })
        };
        let events = split_alert_events(&self.alert_events);
        Group {
            name: self.name.trim().to_string(),
            default_camera_scene_context: text(&self.camera_scene_context),
            default_ai_detection_target: text(&self.ai_detection_target),
            default_alert_events: (!events.is_empty()).then_some(events),
            default_video_chunks: span(&self.video_chunks_value, self.video_chunks_unit),
            default_num_frames: self
                .num_frames
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|n| n.is_finite() && *n >= 1.0)
                .map(|n| n as u32),
            default_video_overlap: span(&self.video_overlap_value, self.video_overlap_unit),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConnectionValues {
    pub rtsp_url: String,
    pub rtsp_username: String,
    pub rtsp_password: String,
    pub camera_name: String,
    pub group: GroupChoice,
    pub new_group: NewGroupFields,
}

impl ConnectionValues {
    pub fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        validation::rtsp_url(&self.rtsp_url, &mut errors);
        validation::required("cameraName", &self.camera_name, "Camera name is required.", &mut errors);
        if self.group == GroupChoice::AddNew {
            self.new_group.validate(&mut errors);
        }
        errors
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SceneAnalysisValues {
    pub snapshot_data_uri: Option<String>,
    pub camera_scene_context: String,
    pub scene_description: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AiConfigurationValues {
    pub camera_scene_context: String,
    pub ai_detection_target: String,
    pub alert_events: Vec<AlertEvent>,
    pub video_chunks_value: String,
    pub video_chunks_unit: TimeUnit,
    pub num_frames: String,
    pub video_overlap_value: String,
    pub video_overlap_unit: TimeUnit,
}

impl AiConfigurationValues {
    pub(super) fn to_draft(
        &self,
        scene: &SceneAnalysisValues,
    ) -> Result<ConfigurationDraft, WizardError> {
        let mut errors = Vec::new();
        let alert_events: Vec<AlertEvent> = self
            .alert_events
            .iter()
            .filter(|e| !e.name.trim().is_empty())
            .map(|e| AlertEvent::new(e.name.trim(), e.condition.trim()))
            .collect();
        let chunks = validation::number(
            "videoChunksValue",
            &self.video_chunks_value,
            "Video chunks value is required.",
            &mut errors,
        );
        let frames = validation::number(
            "numFrames",
            &self.num_frames,
            "Number of frames is required.",
            &mut errors,
        );
        let overlap = validation::number(
            "videoOverlapValue",
            &self.video_overlap_value,
            "Video overlap value is required.",
            &mut errors,
        );
        let (Some(chunks), Some(frames), Some(overlap)) = (chunks, frames, overlap) else {
            validation::required(
                "cameraSceneContext",
                &self.camera_scene_context,
                "This field is required.",
                &mut errors,
            );
            validation::required(
                "aiDetectionTarget",
                &self.ai_detection_target,
                "AI detection target is required.",
                &mut errors,
            );
            if alert_events.is_empty() {
                errors.push(ValidationError::new("alertEvents", "Alert events are required."));
            }
            return Err(WizardError::Invalid(errors));
        };

        let draft = ConfigurationDraft {
            scene_description: {
                let s = scene.scene_description.trim();
                (!s.is_empty()).then(|| s.to_string())
            },
            camera_scene_context: self.camera_scene_context.trim().to_string(),
            ai_detection_target: self.ai_detection_target.trim().to_string(),
            alert_events,
            video_chunks: TimeSpan {
                value: chunks,
                unit: self.video_chunks_unit,
            },
            video_overlap: TimeSpan {
                value: overlap,
                unit: self.video_overlap_unit,
            },
            num_frames: if frames >= 1.0 { frames as u32 } else { 0 },
        };
        draft.validate(&mut errors);
        if errors.is_empty() {
            Ok(draft)
        } else {
            Err(WizardError::Invalid(errors))
        }
    }
}
