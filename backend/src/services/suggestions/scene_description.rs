use crate::ai::flows::{self, language_or_default};
use crate::ai::media::{InlineMedia, MediaError};
use crate::error::ApiError;
use crate::state::AppState;
use actix_web::{web, HttpResponse, Responder, ResponseError};
use common::requests::suggestions::{SceneDescriptionRequest, SceneDescriptionResponse};

/// `POST /api/suggest-scene-description`
///
/// `imageData` may be a data URI or bare base64, which is treated as JPEG.
pub async fn process(
    state: web::Data<AppState>,
    payload: web::Json<SceneDescriptionRequest>,
) -> impl Responder {
    match describe(&state, payload.into_inner()).await {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(e) => e.error_response(),
    }
}

pub async fn describe(
    state: &AppState,
    request: SceneDescriptionRequest,
) -> Result<SceneDescriptionResponse, ApiError> {
    let image = InlineMedia::parse(request.image_data.as_deref().unwrap_or_default()).map_err(
        |e| match e {
            MediaError::Missing => {
                ApiError::bad_request("Image data is missing from the request body")
            }
            other => ApiError::bad_request(other.to_string()),
        },
    )?;
    let language = language_or_default(request.language.as_deref());
    let scene_description = flows::describe_image(state.model.as_ref(), image, &language).await;
    Ok(SceneDescriptionResponse { scene_description })
}

#[cfg(test)]
mod tests {
    use crate::ai::simulated::PLACEHOLDER_SCENE;
    use crate::services::test_app;
    use crate::state::testing::state;
    use actix_web::{http::StatusCode, test};
    use serde_json::{json, Value};

    #[actix_web::test]
    async fn describes_data_uri() {
        let (_dir, state) = state();
        let app = test_app!(state);
        let req = test::TestRequest::post()
            .uri("/api/suggest-scene-description")
            .set_json(json!({"imageData": "data:image/jpeg;base64,/9j/4AAQ"}))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["sceneDescription"], PLACEHOLDER_SCENE);
    }

    #[actix_web::test]
    async fn missing_and_broken_images_are_rejected() {
        let (_dir, state) = state();
        let app = test_app!(state);
        for (payload, message) in [
            (json!({}), "Image data is missing from the request body"),
            (json!({"imageData": "@@@"}), "image data is not valid base64"),
        ] {
            let req = test::TestRequest::post()
                .uri("/api/suggest-scene-description")
                .set_json(payload)
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
            let body: Value = test::read_body_json(resp).await;
            assert_eq!(body["error"], message);
        }
    }
}
