//! `POST /api/organizations/{organization_id}/users`: adds a user to an
//! existing organization, as `user` unless another role is requested.
//! System administrators are not tied to organizations and cannot join one.

use crate::error::ApiError;
use crate::services::non_blank;
use crate::state::AppState;
use crate::store::{collections, DocumentStore, WriteBatch};
use actix_web::{web, HttpResponse, Responder, ResponseError};
use common::model::organization::Organization;
use common::model::user::{Role, User};
use common::requests::admin::{CreatedResponse, JoinOrganizationRequest};
use log::info;
use serde_json::Value;

pub async fn process(
    state: web::Data<AppState>,
    organization_id: web::Path<String>,
    payload: web::Json<JoinOrganizationRequest>,
) -> impl Responder {
    match join(&state.store, &organization_id, payload.into_inner()) {
        Ok(id) => HttpResponse::Created().json(CreatedResponse { id }),
        Err(e) => e.error_response(),
    }
}

pub fn join(
    store: &DocumentStore,
    organization_id: &str,
    request: JoinOrganizationRequest,
) -> Result<String, ApiError> {
    let email = non_blank(Some(request.email.as_str()))
        .ok_or_else(|| ApiError::bad_request("email: Email is required."))?;
    let role = request.role.unwrap_or(Role::User);
    if role == Role::SystemAdmin {
        return Err(ApiError::bad_request(
            "role: system-admin users do not belong to an organization.",
        ));
    }
    store.fetch::<Organization>(collections::ORGANIZATIONS, organization_id)?;

    let user_id = non_blank(request.user_id.as_deref()).unwrap_or_else(DocumentStore::new_id);
    let mut batch = WriteBatch::new();
    batch.require_exists(collections::ORGANIZATIONS, organization_id);
    if let Some(existing) = store.get::<User>(collections::USERS, &user_id)? {
        if existing.data.organization_id.is_some() {
            return Err(ApiError::Conflict(format!(
                "User {user_id} already belongs to an organization"
            )));
        }
        batch.require_field_equals(collections::USERS, &user_id, "organizationId", Value::Null);
    }
    batch.set(
        collections::USERS,
        &user_id,
        &User {
            email,
            role,
            organization_id: Some(organization_id.to_string()),
        },
    )?;
    store.commit(batch)?;

    info!("User {user_id} joined organization {organization_id} as {}", role.as_str());
    Ok(user_id)
}
