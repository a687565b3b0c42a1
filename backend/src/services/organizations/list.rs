use crate::error::ApiError;
use crate::state::AppState;
use crate::store::collections;
use actix_web::{web, HttpResponse, Responder, ResponseError};
use common::model::organization::Organization;

/// `GET /api/organizations`: every organization, oldest first.
pub async fn process(state: web::Data<AppState>) -> impl Responder {
    match state
        .store
        .list::<Organization>(collections::ORGANIZATIONS, &[])
        .map_err(ApiError::from)
    {
        Ok(organizations) => HttpResponse::Ok().json(organizations),
        Err(e) => e.error_response(),
    }
}
