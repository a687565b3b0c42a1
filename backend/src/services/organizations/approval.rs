//! # Organization Approval
//!
//! `PUT /api/organizations/{organization_id}/approval` with `{"approved": bool}`.
//!
//! Approving an organization also releases its cameras that were parked in
//! `waiting_for_approval`, moving them to `pending_setup` in the same batch.
//! Revoking approval leaves camera statuses untouched.

use crate::error::ApiError;
use crate::state::AppState;
use crate::store::{collections, DocumentStore, Filter, WriteBatch};
use actix_web::{web, HttpResponse, Responder, ResponseError};
use common::model::camera::{Camera, ProcessingStatus};
use common::model::document::Document;
use common::model::organization::Organization;
use common::requests::admin::ApprovalRequest;
use log::info;
use serde_json::json;

pub async fn process(
    state: web::Data<AppState>,
    organization_id: web::Path<String>,
    payload: web::Json<ApprovalRequest>,
) -> impl Responder {
    match set_approval(&state.store, &organization_id, payload.approved) {
        Ok(organization) => HttpResponse::Ok().json(organization),
        Err(e) => e.error_response(),
    }
}

pub fn set_approval(
    store: &DocumentStore,
    organization_id: &str,
    approved: bool,
) -> Result<Document<Organization>, ApiError> {
    store.fetch::<Organization>(collections::ORGANIZATIONS, organization_id)?;

    let mut batch = WriteBatch::new();
    batch
        .require_exists(collections::ORGANIZATIONS, organization_id)
        .update(
            collections::ORGANIZATIONS,
            organization_id,
            json!({ "approved": approved }),
        );

    let mut released = 0;
    if approved {
        let waiting = store.list::<Camera>(
            collections::CAMERAS,
            &[
                Filter::eq("organizationId", organization_id),
                Filter::eq(
                    "processingStatus",
                    ProcessingStatus::WaitingForApproval.as_str(),
                ),
            ],
        )?;
        for camera in &waiting {
            batch.update(
                collections::CAMERAS,
                &camera.id,
                json!({ "processingStatus": ProcessingStatus::PendingSetup.as_str() }),
            );
        }
        released = waiting.len();
    }
    store.commit(batch)?;

    info!("Organization {organization_id} approved={approved}, {released} camera(s) released");
    Ok(store.fetch(collections::ORGANIZATIONS, organization_id)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_app;
    use crate::state::testing::state;
    use actix_web::{http::StatusCode, test};

    fn camera(organization_id: &str, status: ProcessingStatus) -> Camera {
        Camera {
            camera_name: "Dock".into(),
            rtsp_url: "rtsp://10.0.0.9/stream".into(),
            rtsp_username: None,
            rtsp_password: None,
            organization_id: organization_id.into(),
            user_id: None,
            group_id: None,
            current_config_id: None,
            processing_status: status,
            snapshot_gcs_object_name: None,
            resolution: None,
        }
    }

    fn organization() -> Organization {
        Organization {
            name: "Acme".into(),
            phone: None,
            billing_address: None,
            description: None,
            approved: false,
            default_server_id: None,
        }
    }

    #[actix_web::test]
    async fn approval_releases_waiting_cameras() {
        let (_dir, state) = state();
        let store = state.store.clone();
        let org_id = store.add(collections::ORGANIZATIONS, &organization()).unwrap();
        let other_org = store.add(collections::ORGANIZATIONS, &organization()).unwrap();
        let waiting = store
            .add(collections::CAMERAS, &camera(&org_id, ProcessingStatus::WaitingForApproval))
            .unwrap();
        let failed = store
            .add(collections::CAMERAS, &camera(&org_id, ProcessingStatus::Failed))
            .unwrap();
        let elsewhere = store
            .add(collections::CAMERAS, &camera(&other_org, ProcessingStatus::WaitingForApproval))
            .unwrap();

        let app = test_app!(state);
        let req = test::TestRequest::put()
            .uri(&format!("/api/organizations/{org_id}/approval"))
            .set_json(json!({"approved": true}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Document<Organization> = test::read_body_json(resp).await;
        assert!(body.data.approved);

        let status = |id: &str| {
            store
                .fetch::<Camera>(collections::CAMERAS, id)
                .unwrap()
                .data
                .processing_status
        };
        assert_eq!(status(&waiting), ProcessingStatus::PendingSetup);
        assert_eq!(status(&failed), ProcessingStatus::Failed);
        assert_eq!(status(&elsewhere), ProcessingStatus::WaitingForApproval);
    }

    #[actix_web::test]
    async fn revoking_keeps_camera_statuses() {
        let (_dir, state) = state();
        let store = state.store.clone();
        let org_id = store.add(collections::ORGANIZATIONS, &organization()).unwrap();
        set_approval(&store, &org_id, true).unwrap();
        let cam = store
            .add(collections::CAMERAS, &camera(&org_id, ProcessingStatus::RunningNormal))
            .unwrap();

        let org = set_approval(&store, &org_id, false).unwrap();
        assert!(!org.data.approved);
        let cam: Document<Camera> = store.fetch(collections::CAMERAS, &cam).unwrap();
        assert_eq!(cam.data.processing_status, ProcessingStatus::RunningNormal);
    }

    #[actix_web::test]
    async fn unknown_organization_is_not_found() {
        let (_dir, state) = state();
        assert!(matches!(
            set_approval(&state.store, "nope", true),
            Err(ApiError::NotFound(_))
        ));
    }
}
