use crate::error::ApiError;
use crate::state::AppState;
use crate::store::{collections, DocumentStore, Filter};
use actix_web::{web, HttpResponse, Responder, ResponseError};
use common::model::camera::Camera;
use common::model::document::Document;
use common::model::organization::Organization;

/// `GET /api/organizations/{organization_id}/cameras`
pub async fn process(state: web::Data<AppState>, organization_id: web::Path<String>) -> impl Responder {
    match list_cameras(&state.store, &organization_id) {
        Ok(cameras) => HttpResponse::Ok().json(cameras),
        Err(e) => e.error_response(),
    }
}

pub fn list_cameras(
    store: &DocumentStore,
    organization_id: &str,
) -> Result<Vec<Document<Camera>>, ApiError> {
    store.fetch::<Organization>(collections::ORGANIZATIONS, organization_id)?;
    Ok(store.list(
        collections::CAMERAS,
        &[Filter::eq("organizationId", organization_id)],
    )?)
}
