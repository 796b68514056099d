//! HTTP Error Handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::application::{ApplicationError, FormErrors, RepositoryError};

/// 统一错误响应格式
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub errno: i32,
    pub error: String,
    pub data: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(errno: i32, error: impl Into<String>) -> Self {
        Self {
            errno,
            error: error.into(),
            data: None,
        }
    }

    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = Some(data);
        self
    }
}

/// 错误码定义
pub mod errno {
    pub const BAD_REQUEST: i32 = 400;
    pub const NOT_FOUND: i32 = 404;
    pub const CONFLICT: i32 = 409;
    pub const INTERNAL_ERROR: i32 = 500;
}

/// 表单校验失败的响应数据
#[derive(Debug, Serialize)]
struct ValidationData {
    errors: FormErrors,
    #[serde(skip_serializing_if = "Option::is_none")]
    editor: Option<serde_json::Value>,
}

/// API 错误
#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    /// 表单校验失败，editor 为编辑页上下文（若有）
    Validation {
        errors: FormErrors,
        editor: Option<serde_json::Value>,
    },
    Internal(String),
    Conflict(String),
}

impl ApiError {
    pub fn validation(errors: FormErrors) -> Self {
        ApiError::Validation {
            errors,
            editor: None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let response = match self {
            ApiError::NotFound(msg) => {
                tracing::warn!(errno = errno::NOT_FOUND, error = %msg, "Resource not found");
                ErrorResponse::new(errno::NOT_FOUND, msg)
            }
            ApiError::Validation { errors, editor } => {
                tracing::warn!(errno = errno::BAD_REQUEST, errors = %errors, "Validation failed");
                let data = serde_json::to_value(ValidationData { errors, editor })
                    .unwrap_or(serde_json::Value::Null);
                ErrorResponse::new(errno::BAD_REQUEST, "Validation failed").with_data(data)
            }
            ApiError::Internal(msg) => {
                tracing::error!(errno = errno::INTERNAL_ERROR, error = %msg, "Internal server error");
                ErrorResponse::new(errno::INTERNAL_ERROR, msg)
            }
            ApiError::Conflict(msg) => {
                tracing::warn!(errno = errno::CONFLICT, error = %msg, "Resource conflict");
                ErrorResponse::new(errno::CONFLICT, msg)
            }
        };

        (StatusCode::OK, Json(response)).into_response()
    }
}

impl From<RepositoryError> for ApiError {
    fn from(e: RepositoryError) -> Self {
        match e {
            RepositoryError::NotFound(msg) => ApiError::NotFound(msg),
            RepositoryError::Duplicate(msg) => ApiError::Conflict(msg),
            _ => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<ApplicationError> for ApiError {
    fn from(e: ApplicationError) -> Self {
        match e {
            ApplicationError::NotFound { resource_type, id } => {
                ApiError::NotFound(format!("{} not found: {}", resource_type, id))
            }
            ApplicationError::Validation(errors) => ApiError::validation(errors),
            ApplicationError::RepositoryError(e) => e.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(error: ApiError) -> serde_json::Value {
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_not_found_errno() {
        let json = body_json(ApplicationError::not_found("Book", "42").into()).await;
        assert_eq!(json["errno"], 404);
        assert_eq!(json["error"], "Book not found: 42");
        assert!(json["data"].is_null());
    }

    #[tokio::test]
    async fn test_validation_carries_field_errors() {
        let mut errors = FormErrors::new();
        errors.add("rating", "Ensure this value is less than or equal to 5.");
        let json = body_json(ApiError::validation(errors)).await;

        assert_eq!(json["errno"], 400);
        assert_eq!(json["data"]["errors"][0]["field"], "rating");
        assert!(json["data"].get("editor").is_none());
    }

    #[tokio::test]
    async fn test_duplicate_from_handler_is_conflict() {
        let err = ApplicationError::from(RepositoryError::Duplicate("link".to_string()));
        let json = body_json(err.into()).await;
        assert_eq!(json["errno"], 409);
        assert_eq!(json["error"], "link");
    }

    #[tokio::test]
    async fn test_database_error_is_internal() {
        let err = ApplicationError::from(RepositoryError::DatabaseError("locked".to_string()));
        let json = body_json(err.into()).await;
        assert_eq!(json["errno"], 500);
    }
}
