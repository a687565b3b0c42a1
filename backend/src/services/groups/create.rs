//! # Group Creation
//!
//! `POST /api/groups` stores a group for an existing organization. The
//! `defaultAlertEvents` form field is a comma-separated list; it is split,
//! trimmed and stripped of empty entries before it is saved.

use crate::error::ApiError;
use crate::services::non_blank;
use crate::state::AppState;
use crate::store::{collections, DocumentStore, WriteBatch};
use actix_web::{web, HttpResponse, Responder, ResponseError};
use common::model::configuration::split_alert_events;
use common::model::group::Group;
use common::model::organization::Organization;
use common::requests::admin::{CreateGroupRequest, CreatedResponse};
use common::validation::{self, ValidationError};
use log::info;

pub async fn process(state: web::Data<AppState>, payload: web::Json<CreateGroupRequest>) -> impl Responder {
    match create_group(&state.store, payload.into_inner()) {
        Ok(id) => HttpResponse::Created().json(CreatedResponse { id }),
        Err(e) => e.error_response(),
    }
}

pub fn create_group(store: &DocumentStore, request: CreateGroupRequest) -> Result<String, ApiError> {
    let mut errors: Vec<ValidationError> = Vec::new();
    validation::required(
        "organizationId",
        &request.organization_id,
        "Organization is required.",
        &mut errors,
    );
    validation::required("name", &request.name, "Group name is required.", &mut errors);
    if let Some(span) = request.default_video_chunks {
        if span.value <= 0.0 {
            errors.push(ValidationError::new(
                "defaultVideoChunks",
                "Video chunks must be a positive number.",
            ));
        }
    }
    if let Some(span) = request.default_video_overlap {
        if span.value < 0.0 {
            errors.push(ValidationError::new(
                "defaultVideoOverlap",
                "Video overlap cannot be negative.",
            ));
        }
    }
    if request.default_num_frames == Some(0) {
        errors.push(ValidationError::new(
            "defaultNumFrames",
            "Number of frames must be a positive integer.",
        ));
    }
    if !errors.is_empty() {
        return Err(ApiError::invalid(&errors));
    }
    store.fetch::<Organization>(collections::ORGANIZATIONS, &request.organization_id)?;

    let default_alert_events = request
        .default_alert_events
        .as_deref()
        .map(split_alert_events)
        .filter(|events| !events.is_empty());
    let group = Group {
        name: request.name.trim().to_string(),
        organization_id: request.organization_id.clone(),
        user_id: non_blank(request.user_id.as_deref()),
        cameras: Vec::new(),
        default_camera_scene_context: non_blank(request.default_camera_scene_context.as_deref()),
        default_ai_detection_target: non_blank(request.default_ai_detection_target.as_deref()),
        default_alert_events,
        default_video_chunks: request.default_video_chunks,
        default_num_frames: request.default_num_frames,
        default_video_overlap: request.default_video_overlap,
    };

    let id = DocumentStore::new_id();
    let mut batch = WriteBatch::new();
    batch
        .require_exists(collections::ORGANIZATIONS, &request.organization_id)
        .set(collections::GROUPS, &id, &group)?;
    store.commit(batch)?;

    info!("Group {id} created for organization {}", request.organization_id);
    Ok(id)
}
