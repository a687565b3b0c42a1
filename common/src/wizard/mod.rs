//! State of the three-step add-camera wizard.
//!
//! The wizard holds the form values of every step at once. Moving forward
//! validates the current step; moving back never clears anything, with the
//! single exception of the new-group fields, which are dropped as soon as the
//! group selection leaves "add new group".

mod values;

pub use values::{
    AiConfigurationValues, ConnectionValues, GroupChoice, NewGroupFields, SceneAnalysisValues,
};

use crate::model::configuration::{
    AlertEvent, TimeSpan, DEFAULT_NUM_FRAMES, DEFAULT_VIDEO_CHUNKS_SECS,
    DEFAULT_VIDEO_OVERLAP_SECS,
};
use crate::model::group::Group;
use crate::requests::cameras::{CreateCameraRequest, GroupAssignment};
use crate::validation::{self, ValidationError};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStep {
    Connection,
    SceneAnalysis,
    AiConfiguration,
}

impl WizardStep {
    pub fn number(&self) -> u8 {
        match self {
            WizardStep::Connection => 1,
            WizardStep::SceneAnalysis => 2,
            WizardStep::AiConfiguration => 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum WizardError {
    #[error("expected step {expected:?}, wizard is at {actual:?}")]
    WrongStep {
        expected: WizardStep,
        actual: WizardStep,
    },
    #[error("{}", validation::describe(.0))]
    Invalid(Vec<ValidationError>),
    #[error("a submission is already in flight")]
    AlreadySubmitting,
    #[error("no alert event at index {0}")]
    NoSuchAlertEvent(usize),
}

#[derive(Debug, Clone)]
pub struct AddCameraWizard {
    step: WizardStep,
    connection: ConnectionValues,
    scene: SceneAnalysisValues,
    ai: AiConfigurationValues,
    ai_prefilled: bool,
    submitting: bool,
}

impl Default for AddCameraWizard {
    fn default() -> Self {
        Self::new()
    }
}

impl AddCameraWizard {
    pub fn new() -> Self {
        Self {
            step: WizardStep::Connection,
            connection: ConnectionValues::default(),
            scene: SceneAnalysisValues::default(),
            ai: AiConfigurationValues::default(),
            ai_prefilled: false,
            submitting: false,
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn connection(&self) -> &ConnectionValues {
        &self.connection
    }

    pub fn scene_analysis(&self) -> &SceneAnalysisValues {
        &self.scene
    }

    pub fn ai_configuration(&self) -> &AiConfigurationValues {
        &self.ai
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Edits the step 3 form in place.
    pub fn ai_configuration_mut(&mut self) -> Result<&mut AiConfigurationValues, WizardError> {
        self.expect_step(WizardStep::AiConfiguration)?;
        Ok(&mut self.ai)
    }

    pub fn select_group(&mut self, choice: GroupChoice) {
        if self.connection.group == GroupChoice::AddNew && choice != GroupChoice::AddNew {
            self.connection.new_group = NewGroupFields::default();
        }
        self.connection.group = choice;
    }

    /// Stores the step 1 values and advances. Invalid values are kept so the
    /// form shows what was typed, but the wizard stays on step 1.
    pub fn submit_connection(&mut self, mut values: ConnectionValues) -> Result<(), WizardError> {
        self.expect_step(WizardStep::Connection)?;
        if values.group != GroupChoice::AddNew {
            values.new_group = NewGroupFields::default();
        }
        let errors = values.validate();
        self.connection = values;
        if !errors.is_empty() {
            return Err(WizardError::Invalid(errors));
        }
        self.step = WizardStep::SceneAnalysis;
        Ok(())
    }

    /// Records the result of the snapshot action run between steps 1 and 2.
    pub fn set_snapshot(&mut self, data_uri: Option<String>) {
        self.scene.snapshot_data_uri = data_uri;
    }

    /// Stores the step 2 values and advances. `group` is the selected
    /// existing group, if any; on the first entry into step 3 its defaults
    /// (or the new-group fields) seed the AI configuration form.
    pub fn submit_scene_analysis(
        &mut self,
        values: SceneAnalysisValues,
        group: Option<&Group>,
    ) -> Result<(), WizardError> {
        self.expect_step(WizardStep::SceneAnalysis)?;
        let snapshot = values
            .snapshot_data_uri
            .clone()
            .or_else(|| self.scene.snapshot_data_uri.take());
        self.scene = SceneAnalysisValues {
            snapshot_data_uri: snapshot,
            ..values
        };
        if !self.ai_prefilled {
            let defaults = match &self.connection.group {
                GroupChoice::Existing(_) => group.cloned().unwrap_or_default(),
                GroupChoice::AddNew => self.connection.new_group.as_group_defaults(),
                GroupChoice::None => Group::default(),
            };
            self.ai = prefill(&defaults, &self.scene);
            self.ai_prefilled = true;
        }
        self.step = WizardStep::AiConfiguration;
        Ok(())
    }

    /// Moves one step back without touching any entered values.
    pub fn back(&mut self) -> WizardStep {
        self.step = match self.step {
            WizardStep::Connection | WizardStep::SceneAnalysis => WizardStep::Connection,
            WizardStep::AiConfiguration => WizardStep::SceneAnalysis,
        };
        self.step
    }

    pub fn add_alert_event(&mut self) -> Result<usize, WizardError> {
        self.expect_step(WizardStep::AiConfiguration)?;
        self.ai.alert_events.push(AlertEvent::new("", ""));
        Ok(self.ai.alert_events.len() - 1)
    }

    pub fn remove_alert_event(&mut self, index: usize) -> Result<AlertEvent, WizardError> {
        self.expect_step(WizardStep::AiConfiguration)?;
        if index >= self.ai.alert_events.len() {
            return Err(WizardError::NoSuchAlertEvent(index));
        }
        Ok(self.ai.alert_events.remove(index))
    }

    pub fn update_alert_event(
        &mut self,
        index: usize,
        name: &str,
        condition: &str,
    ) -> Result<(), WizardError> {
        self.expect_step(WizardStep::AiConfiguration)?;
        let event = self
            .ai
            .alert_events
            .get_mut(index)
            .ok_or(WizardError::NoSuchAlertEvent(index))?;
        event.name = name.to_string();
        event.condition = condition.to_string();
        Ok(())
    }

    /// Replaces the alert event list, e.g. with AI suggestions.
    pub fn replace_alert_events(&mut self, events: Vec<AlertEvent>) -> Result<(), WizardError> {
        self.expect_step(WizardStep::AiConfiguration)?;
        self.ai.alert_events = events;
        Ok(())
    }

    /// Validates step 3 and assembles the request persisted by the backend.
    pub fn submission(
        &self,
        organization_id: &str,
        user_id: Option<&str>,
    ) -> Result<CreateCameraRequest, WizardError> {
        self.expect_step(WizardStep::AiConfiguration)?;
        let configuration = self.ai.to_draft(&self.scene)?;
        let group = match &self.connection.group {
            GroupChoice::None => GroupAssignment::None,
            GroupChoice::Existing(id) => GroupAssignment::Existing {
                group_id: id.clone(),
            },
            GroupChoice::AddNew => {
                GroupAssignment::New(self.connection.new_group.to_new_group()?)
            }
        };
        let request = CreateCameraRequest {
            organization_id: organization_id.to_string(),
            user_id: user_id.map(str::to_string),
            camera_name: self.connection.camera_name.trim().to_string(),
            rtsp_url: self.connection.rtsp_url.trim().to_string(),
            rtsp_username: non_blank(&self.connection.rtsp_username),
            rtsp_password: non_blank(&self.connection.rtsp_password),
            group,
            snapshot_gcs_object_name: None,
            configuration,
        };
        request.validate().map_err(WizardError::Invalid)?;
        Ok(request)
    }

    /// Builds the submission and marks it in flight. A second call before
    /// `finish_submit` is refused.
    pub fn begin_submit(
        &mut self,
        organization_id: &str,
        user_id: Option<&str>,
    ) -> Result<CreateCameraRequest, WizardError> {
        if self.submitting {
            return Err(WizardError::AlreadySubmitting);
        }
        let request = self.submission(organization_id, user_id)?;
        self.submitting = true;
        Ok(request)
    }

    /// Ends an in-flight submission. A successful write resets the wizard;
    /// a failed one keeps every value so the user can resubmit.
    pub fn finish_submit(&mut self, succeeded: bool) {
        if succeeded {
            *self = Self::new();
        } else {
            self.submitting = false;
        }
    }

    fn expect_step(&self, expected: WizardStep) -> Result<(), WizardError> {
        if self.step == expected {
            Ok(())
        } else {
            Err(WizardError::WrongStep {
                expected,
                actual: self.step,
            })
        }
    }
}

fn prefill(defaults: &Group, scene: &SceneAnalysisValues) -> AiConfigurationValues {
    let context = [
        defaults.default_camera_scene_context.as_deref().unwrap_or(""),
        scene.camera_scene_context.as_str(),
    ]
    .iter()
    .map(|s| s.trim())
    .filter(|s| !s.is_empty())
    .collect::<Vec<_>>()
    .join("\n\n");

    let chunks = defaults
        .default_video_chunks
        .unwrap_or(TimeSpan::seconds(DEFAULT_VIDEO_CHUNKS_SECS));
    let overlap = defaults
        .default_video_overlap
        .unwrap_or(TimeSpan::seconds(DEFAULT_VIDEO_OVERLAP_SECS));

    AiConfigurationValues {
        camera_scene_context: context,
        ai_detection_target: defaults.default_ai_detection_target.clone().unwrap_or_default(),
        alert_events: defaults
            .default_alert_events
            .iter()
            .flatten()
            .map(|name| AlertEvent::new(name.as_str(), ""))
            .collect(),
        video_chunks_value: format_number(chunks.value),
        video_chunks_unit: chunks.unit,
        num_frames: defaults.default_num_frames.unwrap_or(DEFAULT_NUM_FRAMES).to_string(),
        video_overlap_value: format_number(overlap.value),
        video_overlap_unit: overlap.unit,
    }
}

fn format_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::configuration::TimeUnit;

    fn connection() -> ConnectionValues {
        ConnectionValues {
            rtsp_url: "rtsp://10.1.1.4:554/live".into(),
            camera_name: "Loading bay".into(),
            ..Default::default()
        }
    }

    fn scene(context: &str) -> SceneAnalysisValues {
        SceneAnalysisValues {
            camera_scene_context: context.into(),
            scene_description: "Pallets near a roller door.".into(),
            ..Default::default()
        }
    }

    fn at_step_three(wizard: &mut AddCameraWizard) {
        wizard.submit_connection(connection()).unwrap();
        wizard.submit_scene_analysis(scene("Warehouse dock"), None).unwrap();
    }

    #[test]
    fn connection_step_rejects_bad_url_and_keeps_values() {
        let mut wizard = AddCameraWizard::new();
        let mut values = connection();
        values.rtsp_url = "http://cam/live".into();
        let err = wizard.submit_connection(values).unwrap_err();
        match err {
            WizardError::Invalid(errors) => assert_eq!(
                errors[0].message,
                "Invalid RTSP URL format. Must start with rtsp://"
            ),
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(wizard.step(), WizardStep::Connection);
        assert_eq!(wizard.connection().camera_name, "Loading bay");
    }

    #[test]
    fn new_group_needs_a_name() {
        let mut wizard = AddCameraWizard::new();
        let mut values = connection();
        values.group = GroupChoice::AddNew;
        let err = wizard.submit_connection(values).unwrap_err();
        assert_eq!(
            err.to_string(),
            "newGroupName: New group name is required when adding a new group."
        );
    }

    #[test]
    fn back_navigation_preserves_values() {
        let mut wizard = AddCameraWizard::new();
        at_step_three(&mut wizard);
        wizard.ai_configuration_mut().unwrap().ai_detection_target = "forklifts".into();

        assert_eq!(wizard.back(), WizardStep::SceneAnalysis);
        assert_eq!(wizard.back(), WizardStep::Connection);
        assert_eq!(wizard.connection().rtsp_url, "rtsp://10.1.1.4:554/live");
        assert_eq!(wizard.scene_analysis().camera_scene_context, "Warehouse dock");

        wizard.submit_connection(wizard.connection().clone()).unwrap();
        wizard
            .submit_scene_analysis(scene("Different context"), None)
            .unwrap();
        // step 3 was already filled in, so it is not pre-populated again
        assert_eq!(wizard.ai_configuration().ai_detection_target, "forklifts");
        assert_eq!(wizard.ai_configuration().camera_scene_context, "Warehouse dock");
    }

    #[test]
    fn leaving_add_new_clears_new_group_fields() {
        let mut wizard = AddCameraWizard::new();
        wizard.select_group(GroupChoice::AddNew);
        let mut values = connection();
        values.group = GroupChoice::AddNew;
        values.new_group.name = "Docks".into();
        values.new_group.num_frames = "8".into();
        wizard.submit_connection(values).unwrap();
        wizard.back();
        assert_eq!(wizard.connection().new_group.name, "Docks");

        wizard.select_group(GroupChoice::Existing("g-1".into()));
        assert_eq!(wizard.connection().new_group, NewGroupFields::default());
    }

    #[test]
    fn defaults_come_from_selected_group() {
        let group = Group {
            name: "Docks".into(),
            default_camera_scene_context: Some("Outdoor loading area".into()),
            default_ai_detection_target: Some("trucks, people".into()),
            default_alert_events: Some(vec!["Truck idle".into(), "Person on ramp".into()]),
            default_video_chunks: Some(TimeSpan {
                value: 1.0,
                unit: TimeUnit::Minutes,
            }),
            default_num_frames: Some(12),
            ..Default::default()
        };
        let mut wizard = AddCameraWizard::new();
        let mut values = connection();
        values.group = GroupChoice::Existing("g-1".into());
        wizard.submit_connection(values).unwrap();
        wizard
            .submit_scene_analysis(scene("North gate"), Some(&group))
            .unwrap();

        let ai = wizard.ai_configuration();
        assert_eq!(ai.camera_scene_context, "Outdoor loading area\n\nNorth gate");
        assert_eq!(ai.ai_detection_target, "trucks, people");
        assert_eq!(
            ai.alert_events,
            vec![AlertEvent::new("Truck idle", ""), AlertEvent::new("Person on ramp", "")]
        );
        assert_eq!(ai.video_chunks_value, "1");
        assert_eq!(ai.video_chunks_unit, TimeUnit::Minutes);
        assert_eq!(ai.num_frames, "12");
        assert_eq!(ai.video_overlap_value, "2");
    }

    #[test]
    fn fallback_chunking_without_group() {
        let mut wizard = AddCameraWizard::new();
        at_step_three(&mut wizard);
        let ai = wizard.ai_configuration();
        assert_eq!(ai.camera_scene_context, "Warehouse dock");
        assert_eq!(ai.video_chunks_value, "10");
        assert_eq!(ai.video_overlap_value, "2");
        assert_eq!(ai.num_frames, "5");
        assert!(ai.alert_events.is_empty());
    }

    #[test]
    fn alert_event_list_is_editable() {
        let mut wizard = AddCameraWizard::new();
        at_step_three(&mut wizard);
        let first = wizard.add_alert_event().unwrap();
        let second = wizard.add_alert_event().unwrap();
        wizard.update_alert_event(first, "Fire", "smoke visible").unwrap();
        wizard.update_alert_event(second, "Fall", "").unwrap();
        assert_eq!(wizard.remove_alert_event(first).unwrap().name, "Fire");
        assert_eq!(wizard.ai_configuration().alert_events, vec![AlertEvent::new("Fall", "")]);
        assert_eq!(
            wizard.remove_alert_event(4),
            Err(WizardError::NoSuchAlertEvent(4))
        );
    }

    #[test]
    fn alert_events_need_step_three() {
        let mut wizard = AddCameraWizard::new();
        assert!(matches!(
            wizard.add_alert_event(),
            Err(WizardError::WrongStep { .. })
        ));
    }

    #[test]
    fn submission_reports_missing_fields() {
        let mut wizard = AddCameraWizard::new();
        at_step_three(&mut wizard);
        let err = wizard.submission("org-1", None).unwrap_err();
        let WizardError::Invalid(errors) = err else {
            panic!("expected validation errors");
        };
        let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
        assert!(fields.contains(&"aiDetectionTarget"));
        assert!(fields.contains(&"alertEvents"));
    }

    #[test]
    fn submit_guard_and_reset() {
        let mut wizard = AddCameraWizard::new();
        let mut values = connection();
        values.group = GroupChoice::AddNew;
        values.new_group.name = "Docks".into();
        values.new_group.alert_events = "Truck idle, , Spill".into();
        wizard.submit_connection(values).unwrap();
        wizard.submit_scene_analysis(scene("Dock"), None).unwrap();
        {
            let ai = wizard.ai_configuration_mut().unwrap();
            ai.ai_detection_target = "trucks".into();
        }

        let request = wizard.begin_submit("org-1", Some("user-1")).unwrap();
        assert_eq!(request.configuration.alert_events.len(), 2);
        assert_eq!(request.configuration.video_chunks.as_seconds(), 10.0);
        let GroupAssignment::New(group) = &request.group else {
            panic!("expected a new group");
        };
        assert_eq!(group.default_alert_events, vec!["Truck idle", "Spill"]);
        assert_eq!(
            wizard.begin_submit("org-1", Some("user-1")),
            Err(WizardError::AlreadySubmitting)
        );

        wizard.finish_submit(false);
        assert!(!wizard.is_submitting());
        assert_eq!(wizard.step(), WizardStep::AiConfiguration);

        wizard.begin_submit("org-1", None).unwrap();
        wizard.finish_submit(true);
        assert_eq!(wizard.step(), WizardStep::Connection);
        assert!(wizard.connection().camera_name.is_empty());
    }
}
