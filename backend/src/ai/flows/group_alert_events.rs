use super::{invoke, text_field, Sentinels, FORMAT_SUGGESTIONS};
use crate::ai::gemini::object_schema;
use crate::ai::{prompts, CompletionModel, PromptKind};
use common::language::Locale;
use common::requests::suggestions::GroupAlertEventsResponse;
use log::{error, warn};
use serde_json::json;

const SENTINELS: Sentinels = Sentinels {
    format: FORMAT_SUGGESTIONS,
    invocation: [
        "Failed to communicate with the AI model.",
        "Falló la comunicación con el modelo IA.",
        "Falha na comunicação com o modelo de IA.",
    ],
};

pub async fn generate_group_alert_events(
    model: &dyn CompletionModel,
    ai_detection_target: &str,
    language: &str,
) -> GroupAlertEventsResponse {
    let locale = Locale::from_code(language);
    let schema = object_schema(&[("suggestedAlertEvents", json!({"type": "STRING"}))]);
    let vars = [("aiDetectionTarget", ai_detection_target), ("language", language)];

    let outcome = invoke(
        model,
        PromptKind::GroupAlertEvents,
        prompts::GROUP_ALERT_EVENTS,
        &vars,
        None,
        schema,
    )
    .await;
    let suggested_alert_events = match outcome {
        Ok(output) => text_field(&output, "suggestedAlertEvents").unwrap_or_else(|| {
            warn!("Model {} returned no suggestedAlertEvents: {output}", model.name());
            SENTINELS.format(locale)
        }),
        Err(e) => {
            error!("Group alert event suggestion failed: {e}");
            SENTINELS.invocation(locale, &e)
        }
    };
    GroupAlertEventsResponse {
        suggested_alert_events,
    }
}
