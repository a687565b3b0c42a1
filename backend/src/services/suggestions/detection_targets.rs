use crate::ai::flows::{self, language_or_default};
use crate::error::ApiError;
use crate::services::non_blank;
use crate::state::AppState;
use actix_web::{web, HttpResponse, Responder, ResponseError};
use common::requests::suggestions::{SuggestDetectionTargetsRequest, SuggestDetectionTargetsResponse};

/// `POST /api/suggest-detection-targets`
///
/// # Returns
/// - `200 OK` with `{suggestedTargets}`.
/// - `400 Bad Request` when `cameraSceneContext` is missing or blank.
pub async fn process(
    state: web::Data<AppState>,
    payload: web::Json<SuggestDetectionTargetsRequest>,
) -> impl Responder {
    match suggest(&state, payload.into_inner()).await {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(e) => e.error_response(),
    }
}

pub async fn suggest(
    state: &AppState,
    request: SuggestDetectionTargetsRequest,
) -> Result<SuggestDetectionTargetsResponse, ApiError> {
    let context = non_blank(request.camera_scene_context.as_deref())
        .ok_or_else(|| ApiError::bad_request("cameraSceneContext is required"))?;
    let description = non_blank(request.scene_description.as_deref());
    let language = language_or_default(request.language.as_deref());
    Ok(flows::suggest_detection_targets(
        state.model.as_ref(),
        &context,
        description.as_deref(),
        &language,
    )
    .await)
}
