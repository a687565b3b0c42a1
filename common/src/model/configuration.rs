use serde::{Deserialize, Serialize};

pub const DEFAULT_VIDEO_CHUNKS_SECS: f64 = 10.0;
pub const DEFAULT_VIDEO_OVERLAP_SECS: f64 = 2.0;
pub const DEFAULT_NUM_FRAMES: u32 = 5;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    #[default]
    Seconds,
    Minutes,
}

/// A duration as entered in the forms: a number and its unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeSpan {
    pub value: f64,
    pub unit: TimeUnit,
}

impl TimeSpan {
    pub fn seconds(value: f64) -> Self {
        Self {
            value,
            unit: TimeUnit::Seconds,
        }
    }

    pub fn as_seconds(&self) -> f64 {
        match self.unit {
            TimeUnit::Seconds => self.value,
            TimeUnit::Minutes => self.value * 60.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertEvent {
    pub name: String,
    pub condition: String,
}

impl AlertEvent {
    pub fn new(name: impl Into<String>, condition: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            condition: condition.into(),
        }
    }
}

/// Snapshot of a camera's AI parameters. Configurations are never edited in
/// place: a change writes a new document whose `previous_config_id` points at
/// the one it replaces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Configuration {
    pub camera_id: String,
    pub organization_id: String,
    #[serde(default)]
    pub scene_description: Option<String>,
    pub camera_scene_context: String,
    pub ai_detection_target: String,
    pub alert_events: Vec<AlertEvent>,
    pub video_chunks: TimeSpan,
    pub video_overlap: TimeSpan,
    pub num_frames: u32,
    #[serde(default)]
    pub previous_config_id: Option<String>,
}

impl Configuration {
    pub fn alert_event_names(&self) -> Vec<String> {
        self.alert_events.iter().map(|e| e.name.clone()).collect()
    }
}

/// Splits a comma-separated alert event list, trimming entries and dropping
/// empty ones: `"a,, b ,"` gives `["a", "b"]`.
pub fn split_alert_events(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
