use super::{invoke, Sentinels, FORMAT_SUGGESTIONS};
use crate::ai::gemini::object_schema;
use crate::ai::{prompts, CompletionModel, PromptKind};
use common::language::Locale;
use common::model::configuration::AlertEvent;
use common::requests::suggestions::SuggestAlertEventsResponse;
use log::{error, warn};
use serde_json::{json, Value};

const SENTINELS: Sentinels = Sentinels {
    format: FORMAT_SUGGESTIONS,
    invocation: [
        "Failed to communicate with the AI model.",
        "Falló la comunicación con el modelo IA.",
        "Falha na comunicação com o modelo de IA.",
    ],
};

/// Suggests named alert conditions for a scene and its detection targets.
///
/// A failure is reported as a single entry whose name is the error text and
/// whose condition is empty.
pub async fn suggest_alert_events(
    model: &dyn CompletionModel,
    camera_scene_context: &str,
    ai_detection_target: &str,
    language: &str,
) -> SuggestAlertEventsResponse {
    let locale = Locale::from_code(language);
    let schema = object_schema(&[(
        "suggestedAlerts",
        json!({
            "type": "ARRAY",
            "items": {
                "type": "OBJECT",
                "properties": {
                    "name": {"type": "STRING"},
                    "condition": {"type": "STRING"}
                },
                "required": ["name", "condition"]
            }
        }),
    )]);
    let vars = [
        ("cameraSceneContext", camera_scene_context),
        ("aiDetectionTarget", ai_detection_target),
        ("language", language),
    ];

    let outcome = invoke(
        model,
        PromptKind::AlertEvents,
        prompts::ALERT_EVENTS,
        &vars,
        None,
        schema,
    )
    .await;
    let suggested_alerts = match outcome {
        Ok(output) => parse_alerts(&output).unwrap_or_else(|| {
            warn!("Model {} returned malformed suggestedAlerts: {output}", model.name());
            vec![AlertEvent::new(SENTINELS.format(locale), "")]
        }),
        Err(e) => {
            error!("Alert event suggestion failed: {e}");
            vec![AlertEvent::new(SENTINELS.invocation(locale, &e), "")]
        }
    };
    SuggestAlertEventsResponse { suggested_alerts }
}

/// A non-empty array of `{name, condition}` objects with string values.
fn parse_alerts(output: &Value) -> Option<Vec<AlertEvent>> {
    let items = output.get("suggestedAlerts")?.as_array()?;
    if items.is_empty() {
        return None;
    }
    items
        .iter()
        .map(|item| {
            let name = item.get("name")?.as_str()?;
            let condition = item.get("condition")?.as_str()?;
            Some(AlertEvent::new(name, condition))
        })
        .collect()
}
