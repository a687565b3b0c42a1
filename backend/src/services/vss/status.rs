use super::respond;
use crate::state::AppState;
use actix_web::{web, Responder};

/// `GET /api/vss/health`: the readiness text reported by VSS.
pub async fn health(state: web::Data<AppState>) -> impl Responder {
    respond("health check", state.vss.health().await)
}

pub async fn models(state: web::Data<AppState>) -> impl Responder {
    respond("list models", state.vss.list_models().await)
}

/// `GET /api/vss/metrics`: the Prometheus exposition as a string in `data`.
pub async fn metrics(state: web::Data<AppState>) -> impl Responder {
    respond("metrics", state.vss.metrics().await)
}
