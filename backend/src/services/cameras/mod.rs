//! # Camera Service Module
//!
//! Cameras and their configuration history.
//!
//! ## Sub-modules:
//! - `create`: persists a finished add-camera wizard (optional new group, camera, first configuration).
//! - `list` / `get`: read cameras; the per-organization listing is registered by the organizations scope.
//! - `configurations`: appends a configuration and walks the history chain.
//! - `vss_prompts`: the VSS prompts derived from the current configuration.
//! - `snapshot`: the connection test run before the scene-analysis step.

mod configurations;
mod create;
mod get;
pub(super) mod list;
mod snapshot;
mod vss_prompts;

use actix_web::web::{get, post, scope};
use actix_web::Scope;
use common::model::configuration::Configuration;
use common::requests::cameras::ConfigurationDraft;

const API_PATH: &str = "/api/cameras";

/// # Registered Routes:
///
/// *   **`POST /`**: `create::process`
/// *   **`POST /snapshot`**: `snapshot::process`
/// *   **`GET /{camera_id}`**: `get::process`
/// *   **`POST /{camera_id}/configurations`**: `configurations::append`
/// *   **`GET /{camera_id}/configurations`**: `configurations::history`
/// *   **`GET /{camera_id}/vss-prompts`**: `vss_prompts::process`
pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("", post().to(create::process))
        .route("/snapshot", post().to(snapshot::process))
        .route("/{camera_id}", get().to(get::process))
        .route("/{camera_id}/configurations", post().to(configurations::append))
        .route("/{camera_id}/configurations", get().to(configurations::history))
        .route("/{camera_id}/vss-prompts", get().to(vss_prompts::process))
}

/// The stored configuration for a validated draft.
fn configuration_from(
    draft: &ConfigurationDraft,
    camera_id: &str,
    organization_id: &str,
    previous_config_id: Option<String>,
) -> Configuration {
    Configuration {
        camera_id: camera_id.to_string(),
        organization_id: organization_id.to_string(),
        scene_description: draft
            .scene_description
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string),
        camera_scene_context: draft.camera_scene_context.trim().to_string(),
        ai_detection_target: draft.ai_detection_target.trim().to_string(),
        alert_events: draft.cleaned_alert_events(),
        video_chunks: draft.video_chunks,
        video_overlap: draft.video_overlap,
        num_frames: draft.num_frames,
        previous_config_id,
    }
}
