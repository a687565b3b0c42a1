//! # Organization Service Module
//!
//! Tenant accounts and everything addressed through an organization id.
//! Actix scopes do not fall through, so the per-organization listings of
//! users, groups and cameras are registered here and delegate to the
//! handlers of their own areas.
//!
//! ## Sub-modules:
//! - `signup`: creates an unapproved organization together with its first administrator.
//! - `list` / `get`: read organizations.
//! - `approval`: a system administrator approves or suspends an organization.
//! - `default_server`: pins (or clears) the organization's preferred processing server.

mod approval;
mod default_server;
mod get;
mod list;
mod signup;

use super::{cameras, groups, users};
use actix_web::web::{get, post, put, scope};
use actix_web::Scope;

const API_PATH: &str = "/api/organizations";

/// # Registered Routes:
///
/// *   **`POST /signup`**: `signup::process`
/// *   **`GET /`**: `list::process`
/// *   **`GET /{organization_id}`**: `get::process`
/// *   **`PUT /{organization_id}/approval`**: `approval::process`
/// *   **`PUT /{organization_id}/default-server`**: `default_server::process`
/// *   **`POST /{organization_id}/users`**: `users::join::process`
/// *   **`GET /{organization_id}/users`**: `users::list::process`
/// *   **`GET /{organization_id}/groups`**: `groups::list::process`
/// *   **`GET /{organization_id}/cameras`**: `cameras::list::process`
pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("/signup", post().to(signup::process))
        .route("", get().to(list::process))
        .route("/{organization_id}", get().to(get::process))
        .route("/{organization_id}/approval", put().to(approval::process))
        .route(
            "/{organization_id}/default-server",
            put().to(default_server::process),
        )
        .route("/{organization_id}/users", post().to(users::join::process))
        .route("/{organization_id}/users", get().to(users::list::process))
        .route("/{organization_id}/groups", get().to(groups::list::process))
        .route("/{organization_id}/cameras", get().to(cameras::list::process))
}
