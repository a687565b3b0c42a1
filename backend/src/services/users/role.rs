//! `PUT /api/users/{user_id}/role` with `{"role": "..."}`.
//!
//! Demoting the last `user-admin` of an organization, or the last
//! `system-admin`, is refused with `409 Conflict` and nothing is written.

use super::guard_role_loss;
use crate::error::ApiError;
use crate::state::AppState;
use crate::store::{collections, DocumentStore, WriteBatch};
use actix_web::{web, HttpResponse, Responder, ResponseError};
use common::model::document::Document;
use common::model::user::{Role, User};
use common::requests::admin::UpdateRoleRequest;
use log::info;
use serde_json::json;

pub async fn process(
    state: web::Data<AppState>,
    user_id: web::Path<String>,
    payload: web::Json<UpdateRoleRequest>,
) -> impl Responder {
    match update_role(&state.store, &user_id, payload.role) {
        Ok(user) => HttpResponse::Ok().json(user),
        Err(e) => e.error_response(),
    }
}

pub fn update_role(
    store: &DocumentStore,
    user_id: &str,
    role: Role,
) -> Result<Document<User>, ApiError> {
    let current: Document<User> = store.fetch(collections::USERS, user_id)?;
    if current.data.role == role {
        return Ok(current);
    }

    let mut batch = WriteBatch::new();
    guard_role_loss(&mut batch, user_id, &current.data);
    batch.update(collections::USERS, user_id, json!({ "role": role.as_str() }));
    store.commit(batch)?;

    info!(
        "User {user_id} role changed from {} to {}",
        current.data.role.as_str(),
        role.as_str()
    );
    Ok(store.fetch(collections::USERS, user_id)?)
}
