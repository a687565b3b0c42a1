//! # Group Service Module
//!
//! Camera groups and the configuration defaults they hand to new cameras.
//! Groups of an organization are listed through
//! `GET /api/organizations/{organization_id}/groups`.

mod create;
mod get;
pub(super) mod list;

use actix_web::web::{get, post, scope};
use actix_web::Scope;

const API_PATH: &str = "/api/groups";

/// # Registered Routes:
///
/// *   **`POST /`**: `create::process`
/// *   **`GET /{group_id}`**: `get::process`
pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("", post().to(create::process))
        .route("/{group_id}", get().to(get::process))
}
