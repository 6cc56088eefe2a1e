//! HTTP error type
//!
//! Handlers return [`AppError`]; it renders as `{"error": message, "status": code}`.
//! Internal and database failures are logged and answered with a generic
//! message.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use crm_core_api::ApiError;
use serde_json::json;
use thiserror::Error;

use crate::storage::StorageError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

pub type AppResult<T> = Result<T, AppError>;

impl From<Box<dyn std::error::Error + Send + Sync>> for AppError {
    fn from(err: Box<dyn std::error::Error + Send + Sync>) -> Self {
        AppError::Api(ApiError::from(err))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Api(ApiError::from(errors))
    }
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Api(err) => match err {
                ApiError::NotFound(_) => StatusCode::NOT_FOUND,
                ApiError::ValidationError(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
                ApiError::Conflict(_) => StatusCode::CONFLICT,
                ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
                ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
                ApiError::InternalError(_) | ApiError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            AppError::Storage(StorageError::Rejected(_)) => StatusCode::BAD_REQUEST,
            AppError::Database(_) | AppError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The message shown to clients.
    fn public_message(&self) -> String {
        match self {
            AppError::Api(err) => match err {
                ApiError::ValidationError(msg)
                | ApiError::NotFound(msg)
                | ApiError::Conflict(msg)
                | ApiError::Unauthorized(msg)
                | ApiError::Forbidden(msg)
                | ApiError::BadRequest(msg) => msg.clone(),
                ApiError::InternalError(_) | ApiError::DatabaseError(_) => "Internal server error".to_string(),
            },
            AppError::Storage(StorageError::Rejected(msg)) => msg.clone(),
            AppError::Database(_) | AppError::Storage(_) => "Internal server error".to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "Request rejected");
        }

        let body = Json(json!({
            "error": self.public_message(),
            "status": status.as_u16(),
        }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_json(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_not_found_body() {
        let (status, body) = body_json(ApiError::not_found("Business", 7).into()).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Business with ID 7 not found");
        assert_eq!(body["status"], 404);
    }

    #[tokio::test]
    async fn test_internal_details_are_hidden() {
        let (status, body) = body_json(ApiError::DatabaseError("relation missing".to_string()).into()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Internal server error");
    }

    #[test]
    fn test_status_mapping() {
        let cases = [
            (ApiError::ValidationError(String::new()), StatusCode::BAD_REQUEST),
            (ApiError::BadRequest(String::new()), StatusCode::BAD_REQUEST),
            (ApiError::Conflict(String::new()), StatusCode::CONFLICT),
            (ApiError::Unauthorized(String::new()), StatusCode::UNAUTHORIZED),
            (ApiError::Forbidden(String::new()), StatusCode::FORBIDDEN),
        ];
        for (err, status) in cases {
            assert_eq!(AppError::from(err).status_code(), status);
        }
        assert_eq!(
            AppError::from(StorageError::Rejected("too big".to_string())).status_code(),
            StatusCode::BAD_REQUEST
        );
    }
}
