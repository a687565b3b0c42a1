use crate::error::ApiError;
use crate::state::AppState;
use crate::store::{collections, DocumentStore, Filter};
use actix_web::{web, HttpResponse, Responder, ResponseError};
use common::model::document::Document;
use common::model::organization::Organization;
use common::model::user::User;

/// `GET /api/organizations/{organization_id}/users`
pub async fn process(state: web::Data<AppState>, organization_id: web::Path<String>) -> impl Responder {
    match list_members(&state.store, &organization_id) {
        Ok(users) => HttpResponse::Ok().json(users),
        Err(e) => e.error_response(),
    }
}

pub fn list_members(
    store: &DocumentStore,
    organization_id: &str,
) -> Result<Vec<Document<User>>, ApiError> {
    store.fetch::<Organization>(collections::ORGANIZATIONS, organization_id)?;
    Ok(store.list(
        collections::USERS,
        &[Filter::eq("organizationId", organization_id)],
    )?)
}
