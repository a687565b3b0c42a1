use super::respond;
use crate::state::AppState;
use actix_web::{web, Responder};
use serde_json::Value;

pub async fn start(state: web::Data<AppState>, payload: web::Json<Value>) -> impl Responder {
    respond("start stream", state.vss.start_stream(&payload).await)
}

pub async fn list(state: web::Data<AppState>) -> impl Responder {
    respond("list streams", state.vss.list_streams().await)
}

pub async fn get(state: web::Data<AppState>, stream_id: web::Path<String>) -> impl Responder {
    respond("get stream", state.vss.get_stream(&stream_id).await)
}

pub async fn stop(state: web::Data<AppState>, stream_id: web::Path<String>) -> impl Responder {
    respond("stop stream", state.vss.stop_stream(&stream_id).await)
}

/// `GET /api/vss/live-streams`: always `{"data": [...]}` inside the envelope.
pub async fn list_live(state: web::Data<AppState>) -> impl Responder {
    respond("list live streams", state.vss.list_live_streams().await)
}

pub async fn get_live(state: web::Data<AppState>, stream_id: web::Path<String>) -> impl Responder {
    respond("get live stream", state.vss.get_live_stream(&stream_id).await)
}
