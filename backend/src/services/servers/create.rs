//! `POST /api/servers` registers a processing server. When the request marks
//! it as the system default, the previous default is cleared in the same
//! batch.

use super::make_default;
use crate::error::ApiError;
use crate::state::AppState;
use crate::store::{collections, DocumentStore, WriteBatch};
use actix_web::{web, HttpResponse, Responder, ResponseError};
use common::model::server::Server;
use common::requests::admin::{CreateServerRequest, CreatedResponse};
use common::validation::{self, ValidationError};
use log::info;

pub async fn process(
    state: web::Data<AppState>,
    payload: web::Json<CreateServerRequest>,
) -> impl Responder {
    match create_server(&state, payload.into_inner()).await {
        Ok(id) => HttpResponse::Created().json(CreatedResponse { id }),
        Err(e) => e.error_response(),
    }
}

pub async fn create_server(state: &AppState, request: CreateServerRequest) -> Result<String, ApiError> {
    let mut errors: Vec<ValidationError> = Vec::new();
    validation::required("name", &request.name, "Server name is required.", &mut errors);
    validation::required(
        "ipAddressWithPort",
        &request.ip_address_with_port,
        "IP address and port are required.",
        &mut errors,
    );
    if !errors.is_empty() {
        return Err(ApiError::invalid(&errors));
    }

    let server = Server {
        name: request.name.trim().to_string(),
        ip_address_with_port: request.ip_address_with_port.trim().to_string(),
        protocol: request.protocol,
        status: request.status,
        is_system_default: request.is_system_default,
    };
    let id = DocumentStore::new_id();
    let mut batch = WriteBatch::new();
    batch.set(collections::SERVERS, &id, &server)?;
    if server.is_system_default {
        make_default(&state.store, &mut batch, &id)?;
    }
    state.store.commit(batch)?;

    if server.is_system_default {
        state.vss.resolver().invalidate().await;
        info!("Server {id} ({}) registered as system default", server.base_url());
    } else {
        info!("Server {id} ({}) registered", server.base_url());
    }
    Ok(id)
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
    async fn new_default_replaces_the_old_one() {
        let (_dir, state) = state();
        let store = state.store.clone();
        let app = test_app!(state);

        let mut ids = Vec::new();
        for (name, address) in [("edge-1", "10.0.0.5:8100"), ("edge-2", "10.0.0.6:8100")] {
            let req = test::TestRequest::post()
                .uri("/api/servers")
                .set_json(json!({
                    "name": name,
                    "ipAddressWithPort": address,
                    "protocol": "https",
                    "isSystemDefault": true
                }))
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::CREATED);
            let body: CreatedResponse = test::read_body_json(resp).await;
            ids.push(body.id);
        }

        let first: Document<Server> = store.fetch(collections::SERVERS, &ids[0]).unwrap();
        let second: Document<Server> = store.fetch(collections::SERVERS, &ids[1]).unwrap();
        assert!(!first.data.is_system_default);
        assert!(second.data.is_system_default);
        assert_eq!(second.data.base_url(), "https://10.0.0.6:8100");
    }

    #[actix_web::test]
    async fn non_default_server_leaves_defaults_alone() {
        let (_dir, state) = state();
        let request = |default| CreateServerRequest {
            name: "edge".into(),
            ip_address_with_port: "10.0.0.5:8100".into(),
            protocol: Default::default(),
            status: Default::default(),
            is_system_default: default,
        };
        let default_id = create_server(&state, request(true)).await.unwrap();
        create_server(&state, request(false)).await.unwrap();
        let default: Document<Server> = state.store.fetch(collections::SERVERS, &default_id).unwrap();
        assert!(default.data.is_system_default);
    }

    #[actix_web::test]
    async fn address_is_required() {
        let (_dir, state) = state();
        let request = CreateServerRequest {
            name: "edge".into(),
            ip_address_with_port: " ".into(),
            protocol: Default::default(),
            status: Default::default(),
            is_system_default: false,
        };
        assert!(matches!(
            create_server(&state, request).await,
            Err(ApiError::BadRequest(_))
        ));
    }
}
