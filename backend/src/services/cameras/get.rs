use crate::error::ApiError;
use crate::state::AppState;
use crate::store::collections;
use actix_web::{web, HttpResponse, Responder, ResponseError};
use common::model::camera::Camera;

/// `GET /api/cameras/{camera_id}`
pub async fn process(state: web::Data<AppState>, camera_id: web::Path<String>) -> impl Responder {
    match state
        .store
        .fetch::<Camera>(collections::CAMERAS, &camera_id)
        .map_err(ApiError::from)
    {
        Ok(camera) => HttpResponse::Ok().json(camera),
        Err(e) => e.error_response(),
    }
}
