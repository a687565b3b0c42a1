use super::{invoke, Sentinels};
use crate::ai::gemini::object_schema;
use crate::ai::media::InlineMedia;
use crate::ai::{prompts, CompletionModel, PromptKind};
use common::language::Locale;
use common::requests::suggestions::AnalyzeCameraFeedResponse;
use log::{error, warn};
use serde_json::{json, Value};

const SENTINELS: Sentinels = Sentinels {
    format: [
        "Error: AI failed to analyze the camera feed.",
        "Error: La IA no pudo analizar la imagen de la cámara.",
        "Erro: A IA não conseguiu analisar a imagem da câmera.",
    ],
    invocation: [
        "Failed to communicate with the AI model for camera feed analysis.",
        "Falló la comunicación con el modelo IA para el análisis de la cámara.",
        "Falha na comunicação com o modelo de IA para análise da câmera.",
    ],
};

/// Asks whether the event described by `prompt` is visible in a frame.
/// Failures report `eventDetected: false` with the error as the message.
pub async fn analyze_camera_feed(
    model: &dyn CompletionModel,
    frame: InlineMedia,
    prompt: &str,
    language: &str,
) -> AnalyzeCameraFeedResponse {
    let locale = Locale::from_code(language);
    let schema = object_schema(&[
        ("eventDetected", json!({"type": "BOOLEAN"})),
        ("alertMessage", json!({"type": "STRING"})),
    ]);

    let outcome = invoke(
        model,
        PromptKind::CameraFeedAnalysis,
        prompts::CAMERA_FEED,
        &[("prompt", prompt), ("language", language)],
        Some(frame),
        schema,
    )
    .await;
    match outcome {
        Ok(output) => parse(&output).unwrap_or_else(|| {
            warn!("Model {} returned a malformed feed analysis: {output}", model.name());
            AnalyzeCameraFeedResponse {
                event_detected: false,
                alert_message: SENTINELS.format(locale),
            }
        }),
        Err(e) => {
            error!("Camera feed analysis failed: {e}");
            AnalyzeCameraFeedResponse {
                event_detected: false,
                alert_message: SENTINELS.invocation(locale, &e),
            }
        }
    }
}

fn parse(output: &Value) -> Option<AnalyzeCameraFeedResponse> {
    Some(AnalyzeCameraFeedResponse {
        event_detected: output.get("eventDetected")?.as_bool()?,
        alert_message: output.get("alertMessage")?.as_str()?.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::testing::ScriptedModel;

    fn frame() -> InlineMedia {
        InlineMedia::from_bytes("image/jpeg", b"frame")
    }

    #[actix_web::test]
    async fn detection_is_reported() {
        let model = ScriptedModel::answering(json!({
            "eventDetected": true,
            "alertMessage": "A person is climbing the fence."
        }));
        let out = analyze_camera_feed(&model, frame(), "person climbing fence", "en").await;
        assert!(out.event_detected);
        assert_eq!(out.alert_message, "A person is climbing the fence.");
        assert!(model.last_prompt().ends_with("User Prompt: person climbing fence"));
    }

    #[actix_web::test]
    async fn failure_is_not_a_detection() {
        let model = ScriptedModel::failing("model overloaded");
        let out = analyze_camera_feed(&model, frame(), "smoke", "en").await;
        assert!(!out.event_detected);
        assert_eq!(out.alert_message, "Error: model overloaded");
    }

    #[actix_web::test]
    async fn wrong_types_are_malformed() {
        let model = ScriptedModel::answering(json!({"eventDetected": "yes", "alertMessage": "x"}));
        let out = analyze_camera_feed(&model, frame(), "smoke", "pt").await;
        assert!(!out.event_detected);
        assert_eq!(out.alert_message, "Erro: A IA não conseguiu analisar a imagem da câmera.");
    }
}
