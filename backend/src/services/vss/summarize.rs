use super::{bad_request, respond};
use crate::state::AppState;
use actix_web::{web, Responder};
use common::requests::vss::SummarizeFields;
use serde_json::Value;

/// `POST /api/vss/summarize`
///
/// The body is forwarded as-is once `id`, `prompt` and `model` are present.
pub async fn summarize(state: web::Data<AppState>, payload: web::Json<Value>) -> impl Responder {
    let fields: SummarizeFields = serde_json::from_value(payload.0.clone()).unwrap_or_default();
    let present = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.trim().is_empty());
    if !(present(&fields.id) && present(&fields.prompt) && present(&fields.model)) {
        return bad_request("Missing required fields (id, prompt, or model) in request body");
    }
    respond("summarize", state.vss.summarize(&payload).await)
}

pub async fn recommended_config(
    state: web::Data<AppState>,
    payload: web::Json<Value>,
) -> impl Responder {
    respond(
        "recommended config",
        state.vss.recommended_config(&payload).await,
    )
}
