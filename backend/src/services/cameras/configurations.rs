//! # Configuration History
//!
//! Configurations are immutable. Changing a camera's AI parameters appends a
//! new configuration whose `previousConfigId` is the camera's current one and
//! moves the camera's `currentConfigId` to it, in one batch guarded by the
//! `currentConfigId` that was read. Two editors saving at the same time
//! therefore cannot both win: the second gets `409 Conflict`.
//!
//! The history is read by following `previousConfigId` from the current
//! configuration, newest first.

use super::configuration_from;
use crate::error::ApiError;
use crate::state::AppState;
use crate::store::{collections, DocumentStore, WriteBatch};
use actix_web::{web, HttpResponse, Responder, ResponseError};
use common::model::camera::Camera;
use common::model::configuration::Configuration;
use common::model::document::Document;
use common::requests::cameras::{ConfigurationDraft, UpdateConfigurationResponse};
use log::{info, warn};
use serde_json::{json, Value};
use std::collections::HashSet;

/// `POST /api/cameras/{camera_id}/configurations`
pub async fn append(
    state: web::Data<AppState>,
    camera_id: web::Path<String>,
    payload: web::Json<ConfigurationDraft>,
) -> impl Responder {
    match append_configuration(&state.store, &camera_id, &payload) {
        Ok(response) => HttpResponse::Created().json(response),
        Err(e) => e.error_response(),
    }
}

/// `GET /api/cameras/{camera_id}/configurations`
pub async fn history(state: web::Data<AppState>, camera_id: web::Path<String>) -> impl Responder {
    match configuration_history(&state.store, &camera_id) {
        Ok(configurations) => HttpResponse::Ok().json(configurations),
        Err(e) => e.error_response(),
    }
}

pub fn append_configuration(
    store: &DocumentStore,
    camera_id: &str,
    draft: &ConfigurationDraft,
) -> Result<UpdateConfigurationResponse, ApiError> {
    let mut errors = Vec::new();
    draft.validate(&mut errors);
    if !errors.is_empty() {
        return Err(ApiError::invalid(&errors));
    }
    let camera: Document<Camera> = store.fetch(collections::CAMERAS, camera_id)?;
    commit_configuration(store, &camera, draft)
}

/// Writes `draft` as the successor of the configuration `camera` pointed at
/// when it was read.
fn commit_configuration(
    store: &DocumentStore,
    camera: &Document<Camera>,
    draft: &ConfigurationDraft,
) -> Result<UpdateConfigurationResponse, ApiError> {
    let previous_config_id = camera.data.current_config_id.clone();
    let configuration_id = DocumentStore::new_id();
    let configuration = configuration_from(
        draft,
        &camera.id,
        &camera.data.organization_id,
        previous_config_id.clone(),
    );

    let mut batch = WriteBatch::new();
    batch
        .require_field_equals(
            collections::CAMERAS,
            &camera.id,
            "currentConfigId",
            Value::from(previous_config_id.clone()),
        )
        .set(collections::CONFIGURATIONS, &configuration_id, &configuration)?
        .update(
            collections::CAMERAS,
            &camera.id,
            json!({ "currentConfigId": configuration_id }),
        );
    store.commit(batch).map_err(|e| match ApiError::from(e) {
        ApiError::Conflict(_) => ApiError::Conflict(format!(
            "The configuration of camera {} was changed by someone else; reload and try again.",
            camera.id
        )),
        other => other,
    })?;

    info!(
        "Camera {} now uses configuration {configuration_id} (previous: {})",
        camera.id,
        previous_config_id.as_deref().unwrap_or("none")
    );
    Ok(UpdateConfigurationResponse {
        configuration_id,
        previous_config_id,
    })
}

pub fn configuration_history(
    store: &DocumentStore,
    camera_id: &str,
) -> Result<Vec<Document<Configuration>>, ApiError> {
    let camera: Document<Camera> = store.fetch(collections::CAMERAS, camera_id)?;
    let mut history = Vec::new();
    let mut seen = HashSet::new();
    let mut next = camera.data.current_config_id;
    while let Some(id) = next {
        if !seen.insert(id.clone()) {
            warn!("Configuration chain of camera {camera_id} loops back to {id}");
            break;
        }
        let Some(configuration) = store.get::<Configuration>(collections::CONFIGURATIONS, &id)?
        else {
            warn!("Configuration {id} of camera {camera_id} is missing; history truncated");
            break;
        };
        next = configuration.data.previous_config_id.clone();
        history.push(configuration);
    }
    Ok(history)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::cameras::create::create_camera;
    use crate::services::cameras::testing::{draft, organization, request};
    use crate::services::test_app;
    use crate::state::testing::state;
    use actix_web::{http::StatusCode, test};
    use common::requests::cameras::GroupAssignment;

    #[actix_web::test]
    async fn appending_chains_configurations() {
        let (_dir, state) = state();
        let store = state.store.clone();
        let org = store.add(collections::ORGANIZATIONS, &organization(true)).unwrap();
        let created = create_camera(&store, request(&org, GroupAssignment::None)).unwrap();
        let app = test_app!(state);

        let req = test::TestRequest::post()
            .uri(&format!("/api/cameras/{}/configurations", created.camera_id))
            .set_json(draft("Loading dock, night shift"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let appended: UpdateConfigurationResponse = test::read_body_json(resp).await;
        assert_eq!(
            appended.previous_config_id.as_deref(),
            Some(created.configuration_id.as_str())
        );

        let req = test::TestRequest::get()
            .uri(&format!("/api/cameras/{}/configurations", created.camera_id))
            .to_request();
        let history: Vec<Document<Configuration>> = test::call_and_read_body_json(&app, req).await;
        let ids: Vec<&str> = history.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(
            ids,
            vec![appended.configuration_id.as_str(), created.configuration_id.as_str()]
        );
        assert_eq!(history[0].data.camera_scene_context, "Loading dock, night shift");
    }

    #[actix_web::test]
    async fn stale_read_conflicts() {
        let (_dir, state) = state();
        let store = &state.store;
        let org = store.add(collections::ORGANIZATIONS, &organization(true)).unwrap();
        let created = create_camera(store, request(&org, GroupAssignment::None)).unwrap();
        let stale: Document<Camera> = store.fetch(collections::CAMERAS, &created.camera_id).unwrap();

        append_configuration(store, &created.camera_id, &draft("first editor")).unwrap();
        let second = commit_configuration(store, &stale, &draft("second editor"));
        assert!(matches!(second, Err(ApiError::Conflict(_))));

        let history = configuration_history(store, &created.camera_id).unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].data.camera_scene_context, "first editor");
    }

    #[actix_web::test]
    async fn camera_without_configuration_has_empty_history() {
        let (_dir, state) = state();
        let store = &state.store;
        let org = store.add(collections::ORGANIZATIONS, &organization(true)).unwrap();
        let created = create_camera(store, request(&org, GroupAssignment::None)).unwrap();
        let mut batch = WriteBatch::new();
        batch.update(
            collections::CAMERAS,
            &created.camera_id,
            json!({ "currentConfigId": null }),
        );
        store.commit(batch).unwrap();

        assert!(configuration_history(store, &created.camera_id).unwrap().is_empty());
        let appended = append_configuration(store, &created.camera_id, &draft("fresh")).unwrap();
        assert_eq!(appended.previous_config_id, None);
    }

    #[actix_web::test]
    async fn invalid_draft_is_rejected() {
        let (_dir, state) = state();
        let mut bad = draft("dock");
        bad.num_frames = 0;
        assert!(matches!(
            append_configuration(&state.store, "any", &bad),
            Err(ApiError::BadRequest(_))
        ));
    }
}
