use super::guard_role_loss;
use crate::error::ApiError;
use crate::state::AppState;
use crate::store::{collections, DocumentStore, WriteBatch};
use actix_web::{web, HttpResponse, Responder, ResponseError};
use common::model::document::Document;
use common::model::user::User;
use log::info;

/// `DELETE /api/users/{user_id}`
///
/// # Returns
/// - `204 No Content` once removed.
/// - `404 Not Found` for an unknown user.
/// - `409 Conflict` when the user is the last administrator of its kind.
pub async fn process(state: web::Data<AppState>, user_id: web::Path<String>) -> impl Responder {
    match remove_user(&state.store, &user_id) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(e) => e.error_response(),
    }
}

pub fn remove_user(store: &DocumentStore, user_id: &str) -> Result<(), ApiError> {
    let current: Document<User> = store.fetch(collections::USERS, user_id)?;
    let mut batch = WriteBatch::new();
    guard_role_loss(&mut batch, user_id, &current.data);
    batch.delete(collections::USERS, user_id);
    store.commit(batch)?;
    info!("User {user_id} removed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_app;
    use crate::services::users::testing::put_user;
    use crate::state::testing::state;
    use actix_web::{http::StatusCode, test};
    use common::model::user::Role;

    #[actix_web::test]
    async fn removes_plain_user() {
        let (_dir, state) = state();
        let store = state.store.clone();
        put_user(&store, "ana", Role::UserAdmin, Some("acme"));
        put_user(&store, "bo", Role::User, Some("acme"));
        let app = test_app!(state);

        let req = test::TestRequest::delete().uri("/api/users/bo").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);
        assert!(store.get::<User>(collections::USERS, "bo").unwrap().is_none());

        let req = test::TestRequest::delete().uri("/api/users/bo").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn last_admin_cannot_be_removed() {
        let (_dir, state) = state();
        let store = &state.store;
        put_user(store, "ana", Role::UserAdmin, Some("acme"));
        put_user(store, "root", Role::SystemAdmin, None);
        assert!(matches!(remove_user(store, "ana"), Err(ApiError::Conflict(_))));
        assert!(matches!(remove_user(store, "root"), Err(ApiError::Conflict(_))));
        assert!(store.get::<User>(collections::USERS, "ana").unwrap().is_some());
    }
}
