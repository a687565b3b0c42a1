//! # VSS Proxy Module
//!
//! Exposes the video search and summarization API to the browser under
//! `/api/vss`, so the client never needs the VSS address. Every route answers
//! with the `{"status": "success", "data": ...}` /
//! `{"status": "error", "message": ...}` envelope, except file content, which
//! is streamed back with its original content type on success.
//!
//! Status codes on failure:
//! - `503` when no VSS base URL can be resolved.
//! - `400` when a required id or field is missing.
//! - the upstream status for upstream `4xx` answers.
//! - `500` for everything else (network, upstream `5xx`, undecodable answers).

mod files;
mod status;
mod streams;
mod summarize;

use crate::vss::VssError;
use actix_web::http::StatusCode;
use actix_web::web::{delete, get, post, scope};
use actix_web::{HttpResponse, Scope};
use common::requests::vss::VssEnvelope;
use log::warn;
use serde::Serialize;

const API_PATH: &str = "/api/vss";

/// # Registered Routes:
///
/// *   **`POST /files`**, **`GET /files`**: `files::upload`, `files::list`
/// *   **`GET /files/{file_id}`**, **`DELETE /files/{file_id}`**: `files::get`, `files::delete`
/// *   **`GET /files/{file_id}/content`**: `files::content`
/// *   **`GET /health`**, **`GET /models`**, **`GET /metrics`**: `status::*`
/// *   **`POST /summarize`**, **`POST /recommended-config`**: `summarize::*`
/// *   **`POST /streams`**, **`GET /streams`**: `streams::start`, `streams::list`
/// *   **`GET /streams/{stream_id}`**, **`DELETE /streams/{stream_id}`**: `streams::get`, `streams::stop`
/// *   **`GET /live-streams`**, **`GET /live-streams/{stream_id}`**: `streams::list_live`, `streams::get_live`
pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("/files", post().to(files::upload))
        .route("/files", get().to(files::list))
        .route("/files/{file_id}", get().to(files::get))
        .route("/files/{file_id}", delete().to(files::delete))
        .route("/files/{file_id}/content", get().to(files::content))
        .route("/health", get().to(status::health))
        .route("/models", get().to(status::models))
        .route("/metrics", get().to(status::metrics))
        .route("/summarize", post().to(summarize::summarize))
        .route("/recommended-config", post().to(summarize::recommended_config))
        .route("/streams", post().to(streams::start))
        .route("/streams", get().to(streams::list))
        .route("/streams/{stream_id}", get().to(streams::get))
        .route("/streams/{stream_id}", delete().to(streams::stop))
        .route("/live-streams", get().to(streams::list_live))
        .route("/live-streams/{stream_id}", get().to(streams::get_live))
}

fn status_for(error: &VssError) -> StatusCode {
    match error {
        VssError::NotConfigured | VssError::InvalidBaseUrl(_) => StatusCode::SERVICE_UNAVAILABLE,
        VssError::MissingArgument(_) => StatusCode::BAD_REQUEST,
        VssError::Api { status, .. } if (400..500).contains(status) => {
            StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_REQUEST)
        }
        VssError::Api { .. } | VssError::Network(_) | VssError::Decode(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

fn error_message(error: &VssError) -> String {
    match error {
        VssError::NotConfigured | VssError::InvalidBaseUrl(_) => {
            format!("VSS API configuration error: {error}")
        }
        other => other.to_string(),
    }
}

/// Renders an error envelope.
fn failure(action: &str, error: VssError) -> HttpResponse {
    let status = status_for(&error);
    warn!("VSS proxy {action} failed with {status}: {error}");
    HttpResponse::build(status).json(VssEnvelope::<()>::Error {
        message: error_message(&error),
    })
}

/// Renders a failure envelope with `400` for requests rejected before any
/// upstream call.
fn bad_request(message: impl Into<String>) -> HttpResponse {
    HttpResponse::BadRequest().json(VssEnvelope::<()>::Error {
        message: message.into(),
    })
}

fn respond<T: Serialize>(action: &str, result: Result<T, VssError>) -> HttpResponse {
    match result {
        Ok(data) => HttpResponse::Ok().json(VssEnvelope::Success { data }),
        Err(e) => failure(action, e),
    }
}

#[cfg(test)]
mod testing {
    use crate::ai::simulated::SimulatedModel;
    use crate::state::testing::state_with;
    use crate::state::AppState;
    use crate::test_support::{spawn_upstream, Log, Recorded, Reply};
    use std::sync::Arc;
    use tempfile::TempDir;

    /// App state whose VSS fallback URL points at an in-process upstream.
    pub async fn state_with_upstream<F>(reply: F) -> (TempDir, AppState, Log)
    where
        F: Fn(&Recorded) -> Reply + Send + Sync + Clone + 'static,
    {
        let (url, log) = spawn_upstream(reply).await;
        let (dir, state) = state_with(Arc::new(SimulatedModel), Some(url));
        (dir, state, log)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_client_errors_keep_their_status() {
        let not_found = VssError::Api {
            status: 404,
            message: "VSS API Error (404 - Code: NotFound): no such file".into(),
        };
        assert_eq!(status_for(&not_found), StatusCode::NOT_FOUND);
        let upstream_down = VssError::Api {
            status: 502,
            message: "bad gateway".into(),
        };
        assert_eq!(status_for(&upstream_down), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(status_for(&VssError::NotConfigured), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(
            status_for(&VssError::MissingArgument("stream id")),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn configuration_errors_are_labelled() {
        assert!(error_message(&VssError::NotConfigured).starts_with("VSS API configuration error: "));
    }
}
