use crate::ai::flows::{self, language_or_default};
use crate::error::ApiError;
use crate::services::non_blank;
use crate::state::AppState;
use actix_web::{web, HttpResponse, Responder, ResponseError};
use common::requests::suggestions::{GroupAlertEventsRequest, GroupAlertEventsResponse};

pub async fn process(
    state: web::Data<AppState>,
    payload: web::Json<GroupAlertEventsRequest>,
) -> impl Responder {
    match suggest(&state, payload.into_inner()).await {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(e) => e.error_response(),
    }
}

pub async fn suggest(
    state: &AppState,
    request: GroupAlertEventsRequest,
) -> Result<GroupAlertEventsResponse, ApiError> {
    let target = non_blank(request.ai_detection_target.as_deref())
        .ok_or_else(|| ApiError::bad_request("aiDetectionTarget is required"))?;
    let language = language_or_default(request.language.as_deref());
    Ok(flows::generate_group_alert_events(state.model.as_ref(), &target, &language).await)
}

#[cfg(test)]
mod tests {
    use crate::services::test_app;
    use crate::state::testing::state;
    use actix_web::test;
    use common::model::configuration::split_alert_events;
    use serde_json::{json, Value};

    #[actix_web::test]
    async fn suggestions_split_into_prefixed_events() {
        let (_dir, state) = state();
        let app = test_app!(state);
        let req = test::TestRequest::post()
            .uri("/api/suggest-group-alert-events")
            .set_json(json!({"aiDetectionTarget": "people after hours"}))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        let events = split_alert_events(body["suggestedAlertEvents"].as_str().unwrap());
        assert_eq!(events.len(), 3);
        assert!(events.iter().all(|e| e.starts_with("security:") || e.starts_with("safety:")));
    }
}
