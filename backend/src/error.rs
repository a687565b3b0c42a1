use crate::store::StoreError;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use common::requests::ErrorResponse;
use common::validation::{self, ValidationError};
use log::error;
use thiserror::Error;

/// Failure of a JSON endpoint, rendered as `{"error": "..."}`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    Unavailable(String),
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn invalid(errors: &[ValidationError]) -> Self {
        ApiError::BadRequest(validation::describe(errors))
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { .. } => ApiError::NotFound(err.to_string()),
            StoreError::PreconditionFailed(_) | StoreError::InvariantViolated(_) => {
                ApiError::Conflict(err.to_string())
            }
            StoreError::Sqlite(_) | StoreError::Poisoned => {
                error!("Document store unavailable: {err}");
                ApiError::Unavailable(format!("Document store unavailable: {err}"))
            }
            StoreError::Serde(_) | StoreError::Timestamp(_) | StoreError::InvalidDocument(_) => {
                error!("Document store failure: {err}");
                ApiError::Internal(err.to_string())
            }
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_errors_map_to_statuses() {
        let conflict: ApiError = StoreError::InvariantViolated("last admin".into()).into();
        assert_eq!(conflict.status_code(), StatusCode::CONFLICT);
        assert_eq!(conflict.to_string(), "last admin");

        let missing: ApiError = StoreError::not_found("cameras", "c1").into();
        assert_eq!(missing.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(missing.to_string(), "cameras/c1 not found");

        let down: ApiError = StoreError::Poisoned.into();
        assert_eq!(down.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
