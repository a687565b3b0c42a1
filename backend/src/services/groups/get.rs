use crate::error::ApiError;
use crate::state::AppState;
use crate::store::collections;
use actix_web::{web, HttpResponse, Responder, ResponseError};
use common::model::group::Group;

/// `GET /api/groups/{group_id}`
pub async fn process(state: web::Data<AppState>, group_id: web::Path<String>) -> impl Responder {
    match state
        .store
        .fetch::<Group>(collections::GROUPS, &group_id)
        .map_err(ApiError::from)
    {
        Ok(group) => HttpResponse::Ok().json(group),
        Err(e) => e.error_response(),
    }
}
