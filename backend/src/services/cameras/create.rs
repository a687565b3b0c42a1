//! # Camera Creation
//!
//! `POST /api/cameras` persists a finished add-camera wizard. Everything the
//! submission produces is written in one batch:
//!
//! 1.  **Group**: for a new group, the group document with the camera already
//!     listed; for an existing group, the camera id is appended to its
//!     `cameras` array (the group must belong to the same organization).
//! 2.  **Camera**: `pending_setup` when the organization is approved,
//!     `waiting_for_approval` otherwise, pointing at its first configuration.
//! 3.  **Configuration**: the AI parameters, with no previous configuration.
//!
//! The batch also re-checks the organization's approval flag, so a camera can
//! never be stored with a status that contradicts a concurrent approval change.

use super::configuration_from;
use crate::error::ApiError;
use crate::services::non_blank;
use crate::state::AppState;
use crate::store::{collections, DocumentStore, WriteBatch};
use actix_web::{web, HttpResponse, Responder, ResponseError};
use common::model::camera::{Camera, ProcessingStatus};
use common::model::document::Document;
use common::model::group::Group;
use common::model::organization::Organization;
use common::requests::cameras::{CreateCameraRequest, CreateCameraResponse, GroupAssignment};
use log::info;

pub async fn process(
    state: web::Data<AppState>,
    payload: web::Json<CreateCameraRequest>,
) -> impl Responder {
    match create_camera(&state.store, payload.into_inner()) {
        Ok(response) => HttpResponse::Created().json(response),
        Err(e) => e.error_response(),
    }
}

pub fn create_camera(
    store: &DocumentStore,
    request: CreateCameraRequest,
) -> Result<CreateCameraResponse, ApiError> {
    request.validate().map_err(|errors| ApiError::invalid(&errors))?;
    let organization_id = request.organization_id.trim();
    let organization: Document<Organization> =
        store.fetch(collections::ORGANIZATIONS, organization_id)?;

    let camera_id = DocumentStore::new_id();
    let configuration_id = DocumentStore::new_id();
    let user_id = non_blank(request.user_id.as_deref());

    let mut batch = WriteBatch::new();
    batch.require_field_equals(
        collections::ORGANIZATIONS,
        organization_id,
        "approved",
        organization.data.approved,
    );

    let group_id = match &request.group {
        GroupAssignment::None => None,
        GroupAssignment::Existing { group_id } => {
            let group_id = group_id.trim();
            let group: Document<Group> = store.fetch(collections::GROUPS, group_id)?;
            if group.data.organization_id != organization_id {
                return Err(ApiError::bad_request(format!(
                    "group: Group {group_id} belongs to another organization."
                )));
            }
            batch
                .require_field_equals(
                    collections::GROUPS,
                    group_id,
                    "organizationId",
                    organization_id,
                )
                .array_union(collections::GROUPS, group_id, "cameras", camera_id.as_str());
            Some(group_id.to_string())
        }
        GroupAssignment::New(new_group) => {
            let group_id = DocumentStore::new_id();
            let events: Vec<String> = new_group
                .default_alert_events
                .iter()
                .map(|e| e.trim())
                .filter(|e| !e.is_empty())
                .map(str::to_string)
                .collect();
            let group = Group {
                name: new_group.name.trim().to_string(),
                organization_id: organization_id.to_string(),
                user_id: user_id.clone(),
                cameras: vec![camera_id.clone()],
                default_camera_scene_context: non_blank(
                    new_group.default_camera_scene_context.as_deref(),
                ),
                default_ai_detection_target: non_blank(
                    new_group.default_ai_detection_target.as_deref(),
                ),
                default_alert_events: (!events.is_empty()).then_some(events),
                default_video_chunks: new_group.default_video_chunks,
                default_num_frames: new_group.default_num_frames,
                default_video_overlap: new_group.default_video_overlap,
            };
            batch.set(collections::GROUPS, &group_id, &group)?;
            Some(group_id)
        }
    };

    let camera = Camera {
        camera_name: request.camera_name.trim().to_string(),
        rtsp_url: request.rtsp_url.trim().to_string(),
        rtsp_username: non_blank(request.rtsp_username.as_deref()),
        rtsp_password: non_blank(request.rtsp_password.as_deref()),
        organization_id: organization_id.to_string(),
        user_id,
        group_id: group_id.clone(),
        current_config_id: Some(configuration_id.clone()),
        processing_status: ProcessingStatus::initial(organization.data.approved),
        snapshot_gcs_object_name: non_blank(request.snapshot_gcs_object_name.as_deref()),
        resolution: None,
    };
    let configuration =
        configuration_from(&request.configuration, &camera_id, organization_id, None);
    batch
        .set(collections::CAMERAS, &camera_id, &camera)?
        .set(collections::CONFIGURATIONS, &configuration_id, &configuration)?;
    store.commit(batch)?;

    info!(
        "Camera {camera_id} added to organization {organization_id} as {}",
        camera.processing_status.as_str()
    );
    Ok(CreateCameraResponse {
        camera_id,
        configuration_id,
        group_id,
    })
}
