//! # Organization Signup
//!
//! `POST /api/organizations/signup` registers a new tenant. The organization
//! starts unapproved and the signing-up user becomes its `user-admin`. Both
//! documents are written in a single batch, so a failure leaves neither.
//!
//! A user that already belongs to an organization cannot sign up again.

use crate::error::ApiError;
use crate::services::non_blank;
use crate::state::AppState;
use crate::store::{collections, DocumentStore, WriteBatch};
use actix_web::{web, HttpResponse, Responder, ResponseError};
use common::model::organization::Organization;
use common::model::user::{Role, User};
use common::requests::admin::{SignupRequest, SignupResponse};
use common::validation::{self, ValidationError};
use log::info;
use serde_json::Value;

/// # Returns
/// - `201 Created` with `{organizationId, userId}`.
/// - `400 Bad Request` when the email or organization name is blank.
/// - `409 Conflict` when the user already belongs to an organization.
pub async fn process(state: web::Data<AppState>, payload: web::Json<SignupRequest>) -> impl Responder {
    match signup(&state.store, payload.into_inner()) {
        Ok(response) => HttpResponse::Created().json(response),
        Err(e) => e.error_response(),
    }
}

pub fn signup(store: &DocumentStore, request: SignupRequest) -> Result<SignupResponse, ApiError> {
    let mut errors: Vec<ValidationError> = Vec::new();
    validation::required("email", &request.email, "Email is required.", &mut errors);
    validation::required(
        "organizationName",
        &request.organization_name,
        "Organization name is required.",
        &mut errors,
    );
    if !errors.is_empty() {
        return Err(ApiError::invalid(&errors));
    }

    let user_id = non_blank(request.user_id.as_deref()).unwrap_or_else(DocumentStore::new_id);
    let organization_id = DocumentStore::new_id();

    let mut batch = WriteBatch::new();
    if let Some(existing) = store.get::<User>(collections::USERS, &user_id)? {
        if existing.data.organization_id.is_some() {
            return Err(ApiError::Conflict(format!(
                "User {user_id} already belongs to an organization"
            )));
        }
        batch.require_field_equals(collections::USERS, &user_id, "organizationId", Value::Null);
    }

    let organization = Organization {
        name: request.organization_name.trim().to_string(),
        phone: non_blank(request.phone.as_deref()),
        billing_address: non_blank(request.billing_address.as_deref()),
        description: non_blank(request.description.as_deref()),
        approved: false,
        default_server_id: None,
    };
    let user = User {
        email: request.email.trim().to_string(),
        role: Role::UserAdmin,
        organization_id: Some(organization_id.clone()),
    };
    batch
        .set(collections::ORGANIZATIONS, &organization_id, &organization)?
        .set(collections::USERS, &user_id, &user)?;
    store.commit(batch)?;

    info!("Organization {organization_id} signed up by user {user_id}");
    Ok(SignupResponse {
        organization_id,
        user_id,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_app;
    use crate::state::testing::state;
    use actix_web::{http::StatusCode, test};
    use common::model::document::Document;
    use serde_json::json;

    #[actix_web::test]
    async fn creates_unapproved_organization_and_admin() {
        let (_dir, state) = state();
        let store = state.store.clone();
        let app = test_app!(state);
        let req = test::TestRequest::post()
            .uri("/api/organizations/signup")
            .set_json(json!({
                "email": "ana@example.com",
                "userId": "uid-ana",
                "organizationName": " Acme Security ",
                "phone": "  "
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: SignupResponse = test::read_body_json(resp).await;
        assert_eq!(body.user_id, "uid-ana");

        let org: Document<Organization> = store
            .fetch(collections::ORGANIZATIONS, &body.organization_id)
            .unwrap();
        assert_eq!(org.data.name, "Acme Security");
        assert!(!org.data.approved);
        assert_eq!(org.data.phone, None);

        let user: Document<User> = store.fetch(collections::USERS, "uid-ana").unwrap();
        assert_eq!(user.data.role, Role::UserAdmin);
        assert_eq!(user.data.organization_id, Some(body.organization_id));
    }

    #[actix_web::test]
    async fn second_signup_by_the_same_user_conflicts() {
        let (_dir, state) = state();
        let request = || SignupRequest {
            email: "ana@example.com".into(),
            user_id: Some("uid-ana".into()),
            organization_name: "Acme".into(),
            phone: None,
            billing_address: None,
            description: None,
        };
        signup(&state.store, request()).unwrap();
        assert!(matches!(
            signup(&state.store, request()),
            Err(ApiError::Conflict(_))
        ));
        assert_eq!(state.store.count(collections::ORGANIZATIONS, &[]).unwrap(), 1);
    }

    #[actix_web::test]
    async fn blank_fields_are_rejected() {
        let (_dir, state) = state();
        let app = test_app!(state);
        let req = test::TestRequest::post()
            .uri("/api/organizations/signup")
            .set_json(json!({"email": "", "organizationName": ""}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
