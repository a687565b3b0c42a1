use crate::error::ApiError;
use crate::state::AppState;
use crate::store::collections;
use actix_web::{web, HttpResponse, Responder, ResponseError};
use common::model::organization::Organization;

/// `GET /api/organizations/{organization_id}`
///
/// # Returns
/// - `200 OK` with the organization document.
/// - `404 Not Found` for an unknown id.
pub async fn process(state: web::Data<AppState>, organization_id: web::Path<String>) -> impl Responder {
    match state
        .store
        .fetch::<Organization>(collections::ORGANIZATIONS, &organization_id)
        .map_err(ApiError::from)
    {
        Ok(organization) => HttpResponse::Ok().json(organization),
        Err(e) => e.error_response(),
    }
}

#[cfg(test)]
mod tests {
    use crate::services::test_app;
    use crate::state::testing::state;
    use actix_web::{http::StatusCode, test};
    use serde_json::Value;

    #[actix_web::test]
    async fn unknown_organization_is_not_found() {
        let (_dir, state) = state();
        let app = test_app!(state);
        let req = test::TestRequest::get()
            .uri("/api/organizations/missing")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "organizations/missing not found");
    }
}
