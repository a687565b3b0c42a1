//! # Suggestion Flows
//!
//! Each flow renders its prompt, calls the model and checks the answer's
//! shape. Flows never fail: a malformed answer or a failed call produces a
//! payload of the normal shape carrying a localized `Error:` text, so a
//! caller in the middle of the camera wizard always gets something to show.

mod alert_events;
mod camera_feed;
mod describe_image;
mod detection_targets;
mod group_alert_events;

pub use alert_events::suggest_alert_events;
pub use camera_feed::analyze_camera_feed;
pub use describe_image::describe_image;
pub use detection_targets::suggest_detection_targets;
pub use group_alert_events::generate_group_alert_events;

use super::media::InlineMedia;
use super::{prompts, CompletionModel, CompletionRequest, ModelError, PromptKind};
use common::language::{Locale, DEFAULT_LANGUAGE};
use serde_json::Value;

/// Texts of the two failure sentinels of one flow, per locale.
struct Sentinels {
    format: [&'static str; 3],
    invocation: [&'static str; 3],
}

impl Sentinels {
    fn format(&self, locale: Locale) -> String {
        let [en, es, pt] = self.format;
        locale.pick(en, es, pt).to_string()
    }

    /// `Error: ` followed by the failure's own message, or by the localized
    /// fallback when the failure carries none.
    fn invocation(&self, locale: Locale, err: &ModelError) -> String {
        let message = err.to_string();
        let message = message.trim();
        if message.is_empty() {
            let [en, es, pt] = self.invocation;
            format!("Error: {}", locale.pick(en, es, pt))
        } else {
            format!("Error: {message}")
        }
    }
}

const FORMAT_SUGGESTIONS: [&str; 3] = [
    "Error: AI failed to generate suggestions in the expected format.",
    "Error: La IA no generó sugerencias en el formato esperado.",
    "Erro: A IA não conseguiu gerar sugestões no formato esperado.",
];

/// Language code sent to the model; blank means English.
pub fn language_or_default(language: Option<&str>) -> String {
    language
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .unwrap_or(DEFAULT_LANGUAGE)
        .to_string()
}

async fn invoke(
    model: &dyn CompletionModel,
    kind: PromptKind,
    template: &str,
    vars: &[(&str, &str)],
    media: Option<InlineMedia>,
    response_schema: Value,
) -> Result<Value, ModelError> {
    let prompt = prompts::render(template, vars)
        .map_err(|e| ModelError::Unavailable(format!("invalid prompt template: {e}")))?;
    model
        .generate(CompletionRequest {
            kind,
            prompt,
            media,
            response_schema,
        })
        .await
}

/// Non-blank string field of a model answer.
fn text_field(output: &Value, field: &str) -> Option<String> {
    output
        .get(field)
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .map(str::to_string)
}
