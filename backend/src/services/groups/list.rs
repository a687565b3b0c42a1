use crate::error::ApiError;
use crate::state::AppState;
use crate::store::{collections, DocumentStore, Filter};
use actix_web::{web, HttpResponse, Responder, ResponseError};
use common::model::document::Document;
use common::model::group::Group;
use common::model::organization::Organization;

/// `GET /api/organizations/{organization_id}/groups`
pub async fn process(state: web::Data<AppState>, organization_id: web::Path<String>) -> impl Responder {
    match list_groups(&state.store, &organization_id) {
        Ok(groups) => HttpResponse::Ok().json(groups),
        Err(e) => e.error_response(),
    }
}

pub fn list_groups(
    store: &DocumentStore,
    organization_id: &str,
) -> Result<Vec<Document<Group>>, ApiError> {
    store.fetch::<Organization>(collections::ORGANIZATIONS, organization_id)?;
    Ok(store.list(
        collections::GROUPS,
        &[Filter::eq("organizationId", organization_id)],
    )?)
}
