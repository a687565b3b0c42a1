use crate::error::ApiError;
use crate::state::AppState;
use crate::store::collections;
use actix_web::{web, HttpResponse, Responder, ResponseError};
use common::model::server::Server;

/// `GET /api/servers`
pub async fn process(state: web::Data<AppState>) -> impl Responder {
    match state
        .store
        .list::<Server>(collections::SERVERS, &[])
        .map_err(ApiError::from)
    {
        Ok(servers) => HttpResponse::Ok().json(servers),
        Err(e) => e.error_response(),
    }
}
