use super::{invoke, text_field, Sentinels, FORMAT_SUGGESTIONS};
use crate::ai::gemini::object_schema;
use crate::ai::{prompts, CompletionModel, PromptKind};
use common::language::Locale;
use common::requests::suggestions::SuggestDetectionTargetsResponse;
use log::{error, warn};
use serde_json::json;

const SENTINELS: Sentinels = Sentinels {
    format: FORMAT_SUGGESTIONS,
    invocation: [
        "Failed to communicate with the AI model for detection target suggestions.",
        "Falló la comunicación con el modelo IA para sugerencias de objetivos de detección.",
        "Falha na comunicação com o modelo de IA para sugestões de alvos de deteção.",
    ],
};

/// Suggests what the camera's AI should watch for, as a comma-separated list.
pub async fn suggest_detection_targets(
    model: &dyn CompletionModel,
    camera_scene_context: &str,
    scene_description: Option<&str>,
    language: &str,
) -> SuggestDetectionTargetsResponse {
    let locale = Locale::from_code(language);
    let schema = object_schema(&[("suggestedTargets", json!({"type": "STRING"}))]);
    let vars = [
        ("cameraSceneContext", camera_scene_context),
        ("sceneDescription", scene_description.unwrap_or("")),
        ("language", language),
    ];

    let suggested_targets = match invoke(
        model,
        PromptKind::DetectionTargets,
        prompts::DETECTION_TARGETS,
        &vars,
        None,
        schema,
    )
    .await
    {
        Ok(output) => text_field(&output, "suggestedTargets").unwrap_or_else(|| {
            warn!("Model {} returned no suggestedTargets: {output}", model.name());
            SENTINELS.format(locale)
        }),
        Err(e) => {
            error!("Detection target suggestion failed: {e}");
            SENTINELS.invocation(locale, &e)
        }
    };
    SuggestDetectionTargetsResponse { suggested_targets }
}
