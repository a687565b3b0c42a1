use crate::ai::vss_prompts;
use crate::error::ApiError;
use crate::state::AppState;
use crate::store::{collections, DocumentStore};
use actix_web::{web, HttpResponse, Responder, ResponseError};
use common::model::camera::Camera;
use common::model::configuration::Configuration;
use common::model::document::Document;
use common::requests::cameras::VssPromptsResponse;

/// `GET /api/cameras/{camera_id}/vss-prompts`
///
/// # Returns
/// - `200 OK` with the base, caption and summary prompts of the current configuration.
/// - `404 Not Found` when the camera does not exist or has no configuration yet.
pub async fn process(state: web::Data<AppState>, camera_id: web::Path<String>) -> impl Responder {
    match prompts_for(&state.store, &camera_id) {
        Ok(prompts) => HttpResponse::Ok().json(prompts),
        Err(e) => e.error_response(),
    }
}

pub fn prompts_for(store: &DocumentStore, camera_id: &str) -> Result<VssPromptsResponse, ApiError> {
    let camera: Document<Camera> = store.fetch(collections::CAMERAS, camera_id)?;
    let configuration_id = camera.data.current_config_id.ok_or_else(|| {
        ApiError::NotFound(format!("Camera {camera_id} has no configuration"))
    })?;
    let configuration: Document<Configuration> =
        store.fetch(collections::CONFIGURATIONS, &configuration_id)?;
    let prompts = vss_prompts::build(&configuration.data);
    Ok(VssPromptsResponse {
        configuration_id,
        base_prompt: prompts.base,
        caption_prompt: prompts.caption,
        summary_prompt: prompts.summary,
    })
}
