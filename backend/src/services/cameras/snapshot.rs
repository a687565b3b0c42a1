//! # Connection Test Snapshot
//!
//! `POST /api/cameras/snapshot` is what the wizard calls before the scene
//! analysis step. Frame grabbing from the RTSP stream is simulated: after the
//! URL passes validation, a placeholder test-card frame is rendered and
//! returned as a JPEG data URI together with its resolution.

use crate::ai::media::InlineMedia;
use crate::error::ApiError;
use actix_web::{web, HttpResponse, Responder, ResponseError};
use common::requests::cameras::{SnapshotRequest, SnapshotResponse};
use common::validation;
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use log::info;
use std::io::Cursor;

const WIDTH: u32 = 640;
const HEIGHT: u32 = 360;

pub async fn process(payload: web::Json<SnapshotRequest>) -> impl Responder {
    match take_snapshot(&payload) {
        Ok(snapshot) => HttpResponse::Ok().json(snapshot),
        Err(e) => e.error_response(),
    }
}

pub fn take_snapshot(request: &SnapshotRequest) -> Result<SnapshotResponse, ApiError> {
    let mut errors = Vec::new();
    validation::rtsp_url(&request.rtsp_url, &mut errors);
    if !errors.is_empty() {
        return Err(ApiError::invalid(&errors));
    }
    info!(
        "Connection test for {} (credentials: {})",
        request.rtsp_url.trim(),
        if request.rtsp_username.is_some() { "yes" } else { "no" }
    );

    let jpeg = placeholder_frame()
        .map_err(|e| ApiError::Internal(format!("Failed to render snapshot: {e}")))?;
    Ok(SnapshotResponse {
        snapshot_data_uri: InlineMedia::from_bytes("image/jpeg", &jpeg).to_data_uri(),
        resolution: format!("{WIDTH}x{HEIGHT}"),
    })
}

/// Dark test card: vertical bars over a horizontal gradient.
fn placeholder_frame() -> Result<Vec<u8>, image::ImageError> {
    let frame = RgbImage::from_fn(WIDTH, HEIGHT, |x, y| {
        let shade = (40 + x * 60 / WIDTH + y * 30 / HEIGHT) as u8;
        if (x / 80) % 2 == 0 {
            Rgb([shade, shade, shade + 10])
        } else {
            Rgb([shade / 2, shade / 2, shade / 2 + 5])
        }
    });
    let mut bytes = Vec::new();
    DynamicImage::ImageRgb8(frame).write_to(&mut Cursor::new(&mut bytes), ImageFormat::Jpeg)?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_app;
    use crate::state::testing::state;
    use actix_web::{http::StatusCode, test};
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;
    use image::GenericImageView;
    use serde_json::{json, Value};

    #[actix_web::test]
    async fn snapshot_is_a_decodable_jpeg() {
        let snapshot = take_snapshot(&SnapshotRequest {
            rtsp_url: "RTSP://10.0.0.7:554/stream1".into(),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(snapshot.resolution, "640x360");
        let data = snapshot
            .snapshot_data_uri
            .strip_prefix("data:image/jpeg;base64,")
            .unwrap();
        let bytes = STANDARD.decode(data).unwrap();
        let decoded = image::load_from_memory_with_format(&bytes, ImageFormat::Jpeg).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (WIDTH, HEIGHT));
    }

    #[actix_web::test]
    async fn non_rtsp_url_is_rejected() {
        let (_dir, state) = state();
        let app = test_app!(state);
        let req = test::TestRequest::post()
            .uri("/api/cameras/snapshot")
            .set_json(json!({"rtspUrl": "http://10.0.0.7/stream"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "rtspUrl: Invalid RTSP URL format. Must start with rtsp://");
    }
}
