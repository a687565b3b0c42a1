use crate::ai::flows::{self, language_or_default};
use crate::ai::media::InlineMedia;
use crate::error::ApiError;
use crate::services::non_blank;
use crate::state::AppState;
use actix_web::{web, HttpResponse, Responder, ResponseError};
use common::requests::suggestions::{AnalyzeCameraFeedRequest, AnalyzeCameraFeedResponse};

pub async fn process(
    state: web::Data<AppState>,
    payload: web::Json<AnalyzeCameraFeedRequest>,
) -> impl Responder {
    match analyze(&state, payload.into_inner()).await {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(e) => e.error_response(),
    }
}

pub async fn analyze(
    state: &AppState,
    request: AnalyzeCameraFeedRequest,
) -> Result<AnalyzeCameraFeedResponse, ApiError> {
    let frame = InlineMedia::parse(request.camera_feed_data_uri.as_deref().unwrap_or_default())
        .map_err(|e| ApiError::bad_request(format!("cameraFeedDataUri: {e}")))?;
    let prompt = non_blank(request.prompt.as_deref())
        .ok_or_else(|| ApiError::bad_request("prompt is required"))?;
    let language = language_or_default(request.language.as_deref());
    Ok(flows::analyze_camera_feed(state.model.as_ref(), frame, &prompt, &language).await)
}
