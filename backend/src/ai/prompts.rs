//! Prompt templates of the suggestion flows.
//!
//! Templates use `{{field}}` placeholders and `{{#if field}}...{{/if}}`
//! sections that are dropped when the field is blank.

use regex::{Captures, Regex};
use std::sync::LazyLock;

pub const DETECTION_TARGETS: &str = "Based on the following camera scene context and optional scene description, suggest a list of common objects, events, or behaviors that an AI model should typically detect in this environment. Provide the suggestions as a comma-separated list. Respond in {{language}}.

Camera Scene Context:
{{cameraSceneContext}}

{{#if sceneDescription}}Scene Description (from snapshot):
{{sceneDescription}}
{{/if}}

Suggested AI Detection Targets (comma-separated list):";

pub const ALERT_EVENTS: &str = r#"Considering the following camera scene context and the desired AI detection targets, suggest a list of specific events or conditions that should trigger an alert. For each suggested alert, provide a concise name and a brief description of the condition.
Format the output as a JSON array of objects, where each object has 'name' and 'condition' keys. Respond in {{language}}.

Example Output:
[
  {"name": "Unauthorized Entry", "condition": "Detect a person entering the restricted zone after hours"},
  {"name": "Package Left", "condition": "Identify a package left unattended for more than 10 minutes"}
]

Camera Scene Context:
{{cameraSceneContext}}

AI Detection Targets:
{{aiDetectionTarget}}

Suggested Alert Events (JSON Array):"#;

pub const GROUP_ALERT_EVENTS: &str = r#"You are an AI assistant helping to configure security camera alerts.
Based on the following "AI Detection Target" provided by the user, suggest a list of relevant "Alert Events".
The "Alert Events" should be specific and actionable.
Format the output as a comma-separated string. Each event should be concise and use a prefix like "safety:" or "security:".
For example, if the detection target is "people entering a restricted warehouse zone after hours without authorization",
suggested alert events might be: "security: unauthorized zone entry, security: after-hours activity, safety: potential trespassing".

AI Detection Target:
{{aiDetectionTarget}}

Provide your suggested alert events below in {{language}}:"#;

pub const DESCRIBE_IMAGE: &str = "You are an AI assistant that describes scenes from images.
Provide a concise and informative description of the scene captured in the following image.
Respond in {{language}}.

Scene Description:";

pub const CAMERA_FEED: &str = "You are an AI agent specializing in analyzing security camera footage. You will use the camera feed and the user-provided prompt to determine if the event described in the prompt is detected in the camera feed. If the event is detected, set eventDetected to true and provide an appropriate alert message. If the event is not detected, set eventDetected to false and provide a message indicating that the event was not detected. Respond in {{language}}.

User Prompt: {{prompt}}";

static SECTIONS: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"(?s)\{\{#if (\w+)\}\}(.*?)\{\{/if\}\}"));
static FIELDS: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"\{\{(\w+)\}\}"));

/// Fills `template` with `vars`. Unknown placeholders render empty.
pub fn render(template: &str, vars: &[(&str, &str)]) -> Result<String, regex::Error> {
    let sections = SECTIONS.as_ref().map_err(Clone::clone)?;
    let fields = FIELDS.as_ref().map_err(Clone::clone)?;
    let lookup = |name: &str| {
        vars.iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| *value)
            .unwrap_or("")
    };

    let kept = sections.replace_all(template, |caps: &Captures| {
        if lookup(&caps[1]).trim().is_empty() {
            String::new()
        } else {
            caps[2].to_string()
        }
    });
    Ok(fields
        .replace_all(&kept, |caps: &Captures| lookup(&caps[1]).to_string())
        .into_owned())
}
