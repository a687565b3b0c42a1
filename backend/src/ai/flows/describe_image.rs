use super::{invoke, text_field, Sentinels};
use crate::ai::gemini::object_schema;
use crate::ai::media::InlineMedia;
use crate::ai::{prompts, CompletionModel, PromptKind};
use common::language::Locale;
use log::{error, warn};
use serde_json::json;

const SENTINELS: Sentinels = Sentinels {
    format: [
        "Error: AI failed to generate a description.",
        "Error: La IA no pudo generar una descripción.",
        "Erro: A IA não conseguiu gerar uma descrição.",
    ],
    invocation: [
        "Failed to communicate with the AI model for image description.",
        "Falló la comunicación con el modelo IA para la descripción de la imagen.",
        "Falha na comunicação com o modelo de IA para descrição da imagem.",
    ],
};

/// Describes the scene in a snapshot. Returns the description text.
pub async fn describe_image(model: &dyn CompletionModel, image: InlineMedia, language: &str) -> String {
    let locale = Locale::from_code(language);
    let schema = object_schema(&[("description", json!({"type": "STRING"}))]);

    match invoke(
        model,
        PromptKind::SceneDescription,
        prompts::DESCRIBE_IMAGE,
        &[("language", language)],
        Some(image),
        schema,
    )
    .await
    {
        Ok(output) => text_field(&output, "description").unwrap_or_else(|| {
            warn!("Model {} returned no description: {output}", model.name());
            SENTINELS.format(locale)
        }),
        Err(e) => {
            error!("Image description failed: {e}");
            SENTINELS.invocation(locale, &e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::testing::ScriptedModel;

    fn image() -> InlineMedia {
        InlineMedia::from_bytes("image/jpeg", b"\xff\xd8\xff")
    }

    #[actix_web::test]
    async fn sends_image_inline() {
        let model = ScriptedModel::answering(json!({"description": "An empty parking lot."}));
        let out = describe_image(&model, image(), "en").await;
        assert_eq!(out, "An empty parking lot.");
        let requests = model.requests.lock().unwrap();
        assert_eq!(requests[0].media, Some(image()));
        assert_eq!(requests[0].kind, PromptKind::SceneDescription);
    }

    #[actix_web::test]
    async fn missing_description_is_localized() {
        let model = ScriptedModel::answering(json!({}));
        assert_eq!(
            describe_image(&model, image(), "es").await,
            "Error: La IA no pudo generar una descripción."
        );
    }
}
