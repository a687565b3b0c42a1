use crate::ai::flows::{self, language_or_default};
use crate::error::ApiError;
use crate::services::non_blank;
use crate::state::AppState;
use actix_web::{web, HttpResponse, Responder, ResponseError};
use common::requests::suggestions::{SuggestAlertEventsRequest, SuggestAlertEventsResponse};

pub async fn process(
    state: web::Data<AppState>,
    payload: web::Json<SuggestAlertEventsRequest>,
) -> impl Responder {
    match suggest(&state, payload.into_inner()).await {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(e) => e.error_response(),
    }
}

pub async fn suggest(
    state: &AppState,
    request: SuggestAlertEventsRequest,
) -> Result<SuggestAlertEventsResponse, ApiError> {
    let (Some(context), Some(target)) = (
        non_blank(request.camera_scene_context.as_deref()),
        non_blank(request.ai_detection_target.as_deref()),
    ) else {
        return Err(ApiError::bad_request(
            "Missing cameraSceneContext or aiDetectionTarget",
        ));
    };
    let language = language_or_default(request.language.as_deref());
    Ok(flows::suggest_alert_events(state.model.as_ref(), &context, &target, &language).await)
}

#[cfg(test)]
mod tests {
    use crate::services::test_app;
    use crate::state::testing::state;
    use actix_web::{http::StatusCode, test};
    use serde_json::{json, Value};

    #[actix_web::test]
    async fn answers_with_named_conditions() {
        let (_dir, state) = state();
        let app = test_app!(state);
        let req = test::TestRequest::post()
            .uri("/api/suggest-alert-events")
            .set_json(json!({"cameraSceneContext": "Yard", "aiDetectionTarget": "vehicles"}))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        let alerts = body["suggestedAlerts"].as_array().unwrap();
        assert_eq!(alerts.len(), 3);
        assert_eq!(alerts[1]["name"], "Vehicle Entered Zone");
    }

    #[actix_web::test]
    async fn both_fields_are_required() {
        let (_dir, state) = state();
        let app = test_app!(state);
        let req = test::TestRequest::post()
            .uri("/api/suggest-alert-events")
            .set_json(json!({"cameraSceneContext": "Yard"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
