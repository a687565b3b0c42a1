//! Prompts handed to the video search and summarization service for a
//! camera, derived from its current configuration.

use common::model::configuration::Configuration;

const DEFAULT_SCENE: &str = "a typical scene";
const DEFAULT_TARGET: &str = "objects and events of interest";
const DEFAULT_EVENTS: &str = "relevant events";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VssPrompts {
    pub base: String,
    pub caption: String,
    pub summary: String,
}

pub fn build(configuration: &Configuration) -> VssPrompts {
    let scene = or_default(&configuration.camera_scene_context, DEFAULT_SCENE);
    let target = or_default(&configuration.ai_detection_target, DEFAULT_TARGET);
    let names: Vec<String> = configuration
        .alert_event_names()
        .into_iter()
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
        .collect();
    let events = if names.is_empty() {
        DEFAULT_EVENTS.to_string()
    } else {
        names.join(", ")
    };

    VssPrompts {
        base: format!(
            "Write a concise and clear dense caption for the provided video feed of a scene in {scene}. \
             Focus on identifying and describing events related to {target}, particularly those that could be classified as {events}. \
             Pay exceptionally granular details, describing actions, object states, and interactions precisely for any situations that might indicate these alerts. \
             Include timestamps for the start and end of each distinct observation or activity in the format HH:MM:SS.ms."
        ),
        caption: format!(
            "Summarize the events observed in the video segments from {scene} based on the detailed descriptions. \
             Format each summary as a bullet point in the format start_time:end_time:detailed_event_description. \
             Use timestamps in the format HH.MM.SS.ms. \
             Focus specifically on irregular or notable activities related to {target} or matching the conditions of {events}. \
             Ignore routine or regular activities. Do not return anything else except the bullet points."
        ),
        summary: format!(
            "You are a monitoring system for a {scene}. \
             Given the captions in the format start_time:end_time:caption, aggregate and summarize these events. \
             If an event description is the same across multiple captions, aggregate them in the format start_time1:end_time1,...,start_timek:end_timek:event_description. \
             If any two adjacent end times and start times are within a few tenths of a second, merge the captions in the format start_time1:end_time2. \
             The output should only contain bullet points. \
             Cluster the output into the following categories: Unsafe Behavior, Operational Inefficiencies, Potential Equipment Damage, and Unauthorized Personnel. \
             Assign each aggregated event to the most relevant category."
        ),
    }
}

fn or_default<'a>(value: &'a str, default: &'a str) -> &'a str {
    let value = value.trim();
    if value.is_empty() {
        default
    } else {
        value
    }
}
