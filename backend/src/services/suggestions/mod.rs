//! # Suggestion Endpoints
//!
//! AI assistance used while configuring a camera. Every endpoint validates
//! its required fields, then runs the matching flow from `ai::flows`; the
//! flows never fail, so once a request is valid the answer is always `200`
//! with either real suggestions or a localized `Error:` text in their place.
//!
//! | Route | Handler |
//! |---|---|
//! | `POST /api/suggest-detection-targets` | `detection_targets::process` |
//! | `POST /api/suggest-alert-events` | `alert_events::process` |
//! | `POST /api/suggest-scene-description` | `scene_description::process` |
//! | `POST /api/suggest-group-alert-events` | `group_alert_events::process` |
//! | `POST /api/analyze-camera-feed` | `camera_feed::process` |

mod alert_events;
mod camera_feed;
mod detection_targets;
mod group_alert_events;
mod scene_description;

use actix_web::web::{self, post};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/suggest-detection-targets", post().to(detection_targets::process))
        .route("/api/suggest-alert-events", post().to(alert_events::process))
        .route("/api/suggest-scene-description", post().to(scene_description::process))
        .route("/api/suggest-group-alert-events", post().to(group_alert_events::process))
        .route("/api/analyze-camera-feed", post().to(camera_feed::process));
}
