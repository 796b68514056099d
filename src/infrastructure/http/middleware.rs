//! HTTP Middleware
//!
//! 传输层错误日志（路由未匹配、提取器拒绝等）

use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;

/// HTTP 状态码错误日志中间件
///
/// 只记录 4xx/5xx 状态码。业务错误以 errno 返回（HTTP 200），
/// 在 `ApiError::into_response` 中记录
pub async fn error_logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let started = Instant::now();

    let response = next.run(request).await;
    let status = response.status();
    let elapsed_ms = started.elapsed().as_millis() as u64;

    if status.is_server_error() {
        tracing::error!(
            method = %method,
            uri = %uri,
            status = status.as_u16(),
            elapsed_ms = elapsed_ms,
            "HTTP server error"
        );
    } else if status.is_client_error() {
        tracing::warn!(
            method = %method,
            uri = %uri,
            status = status.as_u16(),
            elapsed_ms = elapsed_ms,
            "HTTP client error"
        );
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{header::CONTENT_TYPE, Method, Request as HttpRequest, StatusCode},
        routing::post,
        Form, Router,
    };
    use tower::util::ServiceExt;

    use crate::application::forms::ReviewForm;

    async fn echo_rating(Form(form): Form<ReviewForm>) -> String {
        form.rating.unwrap_or_default()
    }

    fn create_test_router() -> Router {
        Router::new()
            .route("/reviews", post(echo_rating))
            .layer(axum::middleware::from_fn(error_logging_middleware))
    }

    #[tokio::test]
    async fn test_form_post_passes_through() {
        let request = HttpRequest::builder()
            .method(Method::POST)
            .uri("/reviews")
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from("rating=4"))
            .unwrap();

        let response = create_test_router().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unknown_route_is_client_error() {
        let request = HttpRequest::builder()
            .uri("/missing")
            .body(Body::empty())
            .unwrap();

        let response = create_test_router().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_wrong_content_type_is_rejected() {
        let request = HttpRequest::builder()
            .method(Method::POST)
            .uri("/reviews")
            .header(CONTENT_TYPE, "text/plain")
            .body(Body::from("rating=4"))
            .unwrap();

        let response = create_test_router().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    }
}
