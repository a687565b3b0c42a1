//! `DELETE /api/servers/{server_id}`
//!
//! The current system default cannot be deleted; another server has to be
//! made the default first. Organizations that pinned the deleted server lose
//! that preference in the same batch.

use crate::error::ApiError;
use crate::state::AppState;
use crate::store::{collections, DocumentStore, Filter, WriteBatch};
use actix_web::{web, HttpResponse, Responder, ResponseError};
use common::model::document::Document;
use common::model::organization::Organization;
use common::model::server::Server;
use log::info;
use serde_json::{json, Value};

pub async fn process(state: web::Data<AppState>, server_id: web::Path<String>) -> impl Responder {
    match delete_server(&state.store, &server_id) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(e) => e.error_response(),
    }
}

pub fn delete_server(store: &DocumentStore, server_id: &str) -> Result<(), ApiError> {
    let current: Document<Server> = store.fetch(collections::SERVERS, server_id)?;
    if current.data.is_system_default {
        return Err(ApiError::Conflict(
            "The system default server cannot be deleted.".to_string(),
        ));
    }

    let mut batch = WriteBatch::new();
    batch
        .require_field_equals(collections::SERVERS, server_id, "isSystemDefault", false)
        .delete(collections::SERVERS, server_id);
    let pinned = store.list::<Organization>(
        collections::ORGANIZATIONS,
        &[Filter::eq("defaultServerId", server_id)],
    )?;
    for organization in &pinned {
        batch.update(
            collections::ORGANIZATIONS,
            &organization.id,
            json!({ "defaultServerId": Value::Null }),
        );
    }
    store.commit(batch)?;

    info!(
        "Server {server_id} deleted, cleared from {} organization(s)",
        pinned.len()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::servers::testing::server;
    use crate::services::test_app;
    use crate::state::testing::state;
    use actix_web::{http::StatusCode, test};

    #[actix_web::test]
    async fn deleting_clears_organization_preferences() {
        let (_dir, state) = state();
        let store = state.store.clone();
        let edge = store.add(collections::SERVERS, &server("edge", "10.0.0.1:8100", false)).unwrap();
        let org = store
            .add(
                collections::ORGANIZATIONS,
                &Organization {
                    name: "Acme".into(),
                    phone: None,
                    billing_address: None,
                    description: None,
                    approved: true,
                    default_server_id: Some(edge.clone()),
                },
            )
            .unwrap();
        let app = test_app!(state);

        let req = test::TestRequest::delete()
            .uri(&format!("/api/servers/{edge}"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);
        assert!(store.get::<Server>(collections::SERVERS, &edge).unwrap().is_none());
        let org: Document<Organization> = store.fetch(collections::ORGANIZATIONS, &org).unwrap();
        assert_eq!(org.data.default_server_id, None);
    }

    #[actix_web::test]
    async fn default_server_cannot_be_deleted() {
        let (_dir, state) = state();
        let edge = state
            .store
            .add(collections::SERVERS, &server("edge", "10.0.0.1:8100", true))
            .unwrap();
        assert!(matches!(
            delete_server(&state.store, &edge),
            Err(ApiError::Conflict(_))
        ));
        assert!(state.store.get::<Server>(collections::SERVERS, &edge).unwrap().is_some());
    }
}
