//! # System Default Server
//!
//! - `PUT /api/servers/{server_id}/default` makes the server the only default.
//! - `DELETE /api/servers/{server_id}/default` stops it being the default.
//!   Since a default must always exist once chosen, unsetting the current
//!   default is refused with `409`; unsetting a non-default is a no-op.

use super::{make_default, DEFAULT_REQUIRED};
use crate::error::ApiError;
use crate::state::AppState;
use crate::store::{collections, Bound, Filter, WriteBatch};
use actix_web::{web, HttpResponse, Responder, ResponseError};
use common::model::document::Document;
use common::model::server::Server;
use log::info;
use serde_json::json;

pub async fn set(state: web::Data<AppState>, server_id: web::Path<String>) -> impl Responder {
    match set_default(&state, &server_id).await {
        Ok(server) => HttpResponse::Ok().json(server),
        Err(e) => e.error_response(),
    }
}

pub async fn unset(state: web::Data<AppState>, server_id: web::Path<String>) -> impl Responder {
    match unset_default(&state, &server_id).await {
        Ok(server) => HttpResponse::Ok().json(server),
        Err(e) => e.error_response(),
    }
}

pub async fn set_default(state: &AppState, server_id: &str) -> Result<Document<Server>, ApiError> {
    let store = &state.store;
    let current: Document<Server> = store.fetch(collections::SERVERS, server_id)?;
    let mut batch = WriteBatch::new();
    batch
        .require_exists(collections::SERVERS, server_id)
        .update(
            collections::SERVERS,
            server_id,
            json!({ "isSystemDefault": true }),
        );
    make_default(store, &mut batch, server_id)?;
    store.commit(batch)?;
    state.vss.resolver().invalidate().await;

    info!(
        "Server {server_id} ({}) is now the system default",
        current.data.base_url()
    );
    Ok(store.fetch(collections::SERVERS, server_id)?)
}

pub async fn unset_default(state: &AppState, server_id: &str) -> Result<Document<Server>, ApiError> {
    let store = &state.store;
    let current: Document<Server> = store.fetch(collections::SERVERS, server_id)?;
    if !current.data.is_system_default {
        return Ok(current);
    }
    let mut batch = WriteBatch::new();
    batch
        .update(
            collections::SERVERS,
            server_id,
            json!({ "isSystemDefault": false }),
        )
        .ensure_count(
            collections::SERVERS,
            vec![Filter::eq("isSystemDefault", true)],
            Bound::AtLeast(1),
            DEFAULT_REQUIRED,
        );
    store.commit(batch)?;
    state.vss.resolver().invalidate().await;
    Ok(store.fetch(collections::SERVERS, server_id)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::servers::testing::server;
    use crate::services::test_app;
    use crate::state::testing::state;
    use actix_web::{http::StatusCode, test};
    use serde_json::Value;

    #[actix_web::test]
    async fn switching_default_keeps_exactly_one() {
        let (_dir, state) = state();
        let a = state.store.add(collections::SERVERS, &server("a", "10.0.0.1:8100", true)).unwrap();
        let b = state.store.add(collections::SERVERS, &server("b", "10.0.0.2:8100", false)).unwrap();

        let updated = set_default(&state, &b).await.unwrap();
        assert!(updated.data.is_system_default);
        let defaults = state
            .store
            .list::<Server>(collections::SERVERS, &[Filter::eq("isSystemDefault", true)])
            .unwrap();
        assert_eq!(defaults.len(), 1);
        assert_eq!(defaults[0].id, b);
        assert_ne!(defaults[0].id, a);
    }

    #[actix_web::test]
    async fn default_change_refreshes_the_vss_base_url() {
        let (_dir, state) = state();
        let a = state.store.add(collections::SERVERS, &server("a", "10.0.0.1:8100", true)).unwrap();
        let b = state.store.add(collections::SERVERS, &server("b", "10.0.0.2:8100", false)).unwrap();
        assert_eq!(state.vss.resolver().base_url().await.unwrap(), "http://10.0.0.1:8100");

        set_default(&state, &b).await.unwrap();
        assert_eq!(state.vss.resolver().base_url().await.unwrap(), "http://10.0.0.2:8100");
        set_default(&state, &a).await.unwrap();
        assert_eq!(state.vss.resolver().base_url().await.unwrap(), "http://10.0.0.1:8100");
    }

    #[actix_web::test]
    async fn unsetting_the_only_default_conflicts() {
        let (_dir, state) = state();
        let a = state.store.add(collections::SERVERS, &server("a", "10.0.0.1:8100", true)).unwrap();
        let b = state.store.add(collections::SERVERS, &server("b", "10.0.0.2:8100", false)).unwrap();
        let store = state.store.clone();
        let app = test_app!(state);

        let req = test::TestRequest::delete()
            .uri(&format!("/api/servers/{a}/default"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CONFLICT);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "A system default server is required.");
        let a_doc: Document<Server> = store.fetch(collections::SERVERS, &a).unwrap();
        assert!(a_doc.data.is_system_default);

        let req = test::TestRequest::delete()
            .uri(&format!("/api/servers/{b}/default"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn unknown_server_is_not_found() {
        let (_dir, state) = state();
        assert!(matches!(
            set_default(&state, "ghost").await,
            Err(ApiError::NotFound(_))
        ));
    }
}
