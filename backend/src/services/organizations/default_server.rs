//! # Organization Default Server
//!
//! `PUT /api/organizations/{organization_id}/default-server` with
//! `{"serverId": "..."}` pins a processing server for the organization;
//! `{"serverId": null}` clears the preference. The server must exist, and the
//! batch re-checks that inside the transaction so a concurrent delete wins
//! cleanly with a `409`.

use crate::error::ApiError;
use crate::services::non_blank;
use crate::state::AppState;
use crate::store::{collections, DocumentStore, WriteBatch};
use actix_web::{web, HttpResponse, Responder, ResponseError};
use common::model::document::Document;
use common::model::organization::Organization;
use common::model::server::Server;
use common::requests::admin::DefaultServerRequest;
use serde_json::json;

pub async fn process(
    state: web::Data<AppState>,
    organization_id: web::Path<String>,
    payload: web::Json<DefaultServerRequest>,
) -> impl Responder {
    let server_id = non_blank(payload.server_id.as_deref());
    match set_default_server(&state.store, &organization_id, server_id.as_deref()) {
        Ok(organization) => HttpResponse::Ok().json(organization),
        Err(e) => e.error_response(),
    }
}

pub fn set_default_server(
    store: &DocumentStore,
    organization_id: &str,
    server_id: Option<&str>,
) -> Result<Document<Organization>, ApiError> {
    store.fetch::<Organization>(collections::ORGANIZATIONS, organization_id)?;

    let mut batch = WriteBatch::new();
    batch.require_exists(collections::ORGANIZATIONS, organization_id);
    if let Some(server_id) = server_id {
        store.fetch::<Server>(collections::SERVERS, server_id)?;
        batch.require_exists(collections::SERVERS, server_id);
    }
    batch.update(
        collections::ORGANIZATIONS,
        organization_id,
        json!({ "defaultServerId": server_id }),
    );
    store.commit(batch)?;

    Ok(store.fetch(collections::ORGANIZATIONS, organization_id)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_app;
    use crate::state::testing::state;
    use actix_web::{http::StatusCode, test};
    use common::model::server::{Protocol, ServerStatus};

    fn seed(store: &DocumentStore) -> (String, String) {
        let org = store
            .add(
                collections::ORGANIZATIONS,
                &Organization {
                    name: "Acme".into(),
                    phone: None,
                    billing_address: None,
                    description: None,
                    approved: true,
                    default_server_id: None,
                },
            )
            .unwrap();
        let server = store
            .add(
                collections::SERVERS,
                &Server {
                    name: "edge-1".into(),
                    ip_address_with_port: "10.0.0.5:8100".into(),
                    protocol: Protocol::Http,
                    status: ServerStatus::Online,
                    is_system_default: false,
                },
            )
            .unwrap();
        (org, server)
    }

    #[actix_web::test]
    async fn pins_and_clears_the_server() {
        let (_dir, state) = state();
        let store = state.store.clone();
        let (org, server) = seed(&store);
        let app = test_app!(state);

        let req = test::TestRequest::put()
            .uri(&format!("/api/organizations/{org}/default-server"))
            .set_json(json!({"serverId": server}))
            .to_request();
        let body: Document<Organization> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body.data.default_server_id.as_deref(), Some(server.as_str()));

        let req = test::TestRequest::put()
            .uri(&format!("/api/organizations/{org}/default-server"))
            .set_json(json!({"serverId": null}))
            .to_request();
        let body: Document<Organization> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body.data.default_server_id, None);
    }

    #[actix_web::test]
    async fn unknown_server_is_not_found() {
        let (_dir, state) = state();
        let store = state.store.clone();
        let (org, _) = seed(&store);
        let app = test_app!(state);
        let req = test::TestRequest::put()
            .uri(&format!("/api/organizations/{org}/default-server"))
            .set_json(json!({"serverId": "ghost"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let org: Document<Organization> = store.fetch(collections::ORGANIZATIONS, &org).unwrap();
        assert_eq!(org.data.default_server_id, None);
    }
}
