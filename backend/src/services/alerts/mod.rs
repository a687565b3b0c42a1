//! # Alert Service Module
//!
//! The alert feed shown on the dashboard. Alerts are not persisted yet; the
//! feed serves a fixed set of sample alerts with timestamps relative to the
//! time of the request.

mod fetch;

use actix_web::web::{get, scope};
use actix_web::Scope;

const API_PATH: &str = "/api/alerts";

/// # Registered Routes:
///
/// *   **`GET /`**: `fetch::process`, filtered by `source`, `severity`, `status`, `limit` and `language`.
pub fn configure_routes() -> Scope {
    scope(API_PATH).route("", get().to(fetch::process))
}
