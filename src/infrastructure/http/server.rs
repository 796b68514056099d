//! HTTP Server
//!
//! Axum HTTP 服务器启动和配置

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::Router;
use http::header::{HeaderName, AUTHORIZATION, CONTENT_TYPE};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use super::handlers::SESSION_HEADER;
use super::middleware::error_logging_middleware;
use super::routes::create_routes;
use super::state::AppState;

/// 请求体大小上限（表单与 JSON）
const MAX_BODY_BYTES: usize = 1024 * 1024;

/// 服务器配置
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

impl ServerConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// 构建带全部中间件的 Router
pub fn build_router(state: Arc<AppState>) -> Router {
    // CORS 配置 - 允许所有来源的跨域请求
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers([
            AUTHORIZATION,
            CONTENT_TYPE,
            HeaderName::from_static(SESSION_HEADER),
        ])
        .expose_headers(Any)
        .max_age(std::time::Duration::from_secs(3600));

    create_routes()
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(middleware::from_fn(error_logging_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// HTTP 服务器
pub struct HttpServer {
    config: ServerConfig,
    state: Arc<AppState>,
}

impl HttpServer {
    /// 创建新的 HTTP 服务器
    pub fn new(config: ServerConfig, state: AppState) -> Self {
        Self {
            config,
            state: Arc::new(state),
        }
    }

    /// 启动服务器（带优雅关闭）
    pub async fn run_with_shutdown<F>(self, shutdown_signal: F) -> Result<(), std::io::Error>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let router = build_router(self.state.clone());
        let addr = self.config.addr();

        info!("Starting HTTP server on {} (with graceful shutdown)", addr);

        let listener = TcpListener::bind(&addr).await?;
        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal)
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::adapters::LogMailer;
    use crate::infrastructure::events::EventPublisher;
    use crate::infrastructure::memory::InMemoryFlashStore;
    use crate::infrastructure::persistence::sqlite::{
        test_pool, SqliteBookRepository, SqliteContributorRepository, SqlitePublisherRepository,
        SqliteReviewRepository,
    };
    use axum::body::{to_bytes, Body};
    use axum::http::{Method, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::util::ServiceExt;

    async fn test_router() -> Router {
        let pool = test_pool().await;
        let state = AppState::new(
            Arc::new(SqlitePublisherRepository::new(pool.clone())),
            Arc::new(SqliteBookRepository::new(pool.clone())),
            Arc::new(SqliteContributorRepository::new(pool.clone())),
            Arc::new(SqliteReviewRepository::new(pool)),
            Arc::new(InMemoryFlashStore::new()),
            Arc::new(LogMailer::new()),
            EventPublisher::new().arc(),
        );
        build_router(Arc::new(state))
    }

    async fn send(router: &Router, request: Request<Body>) -> Value {
        let response = router.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn get(router: &Router, uri: &str) -> Value {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        send(router, request).await
    }

    async fn post_form(router: &Router, uri: &str, body: &str) -> Value {
        let request = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .header(SESSION_HEADER, "tab-1")
            .body(Body::from(body.to_string()))
            .unwrap();
        send(router, request).await
    }

    async fn post_json(router: &Router, uri: &str, body: Value) -> Value {
        let request = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        send(router, request).await
    }

    /// 创建出版社和一本图书，返回图书 ID
    async fn seed_book(router: &Router) -> String {
        let saved = post_form(
            router,
            "/api/publishers",
            "name=Packt&website=packtpub.com&email=info%40packtpub.com",
        )
        .await;
        assert_eq!(saved["errno"], 0);
        let publisher_id = saved["data"]["publisher"]["id"].as_str().unwrap().to_string();

        let book = post_json(
            router,
            "/api/admin/books",
            json!({
                "publisher_id": publisher_id,
                "title": "Web Development with Django",
                "publication_date": "2021-02-25",
                "isbn": "9781839212505",
            }),
        )
        .await;
        assert_eq!(book["errno"], 0);
        book["data"]["id"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_ping() {
        let router = test_router().await;
        let json = get(&router, "/api/ping").await;
        assert_eq!(json["status"], "ok");
    }

    #[tokio::test]
    async fn test_review_flow() {
        let router = test_router().await;
        let book_id = seed_book(&router).await;

        let editor = get(&router, &format!("/api/books/{book_id}/reviews")).await;
        assert_eq!(editor["data"]["model_type"], "Review");
        assert_eq!(editor["data"]["related_model_type"], "Book");
        assert!(editor["data"]["review"].is_null());

        let saved = post_form(
            &router,
            &format!("/api/books/{book_id}/reviews"),
            "content=Thorough&rating=5&creator=alice",
        )
        .await;
        assert_eq!(saved["errno"], 0);
        assert_eq!(
            saved["data"]["message"],
            "Review for \"Web Development with Django\" created."
        );
        assert_eq!(saved["data"]["redirect"], format!("/api/books/{book_id}"));

        let detail = send(
            &router,
            Request::builder()
                .uri(format!("/api/books/{book_id}"))
                .header(SESSION_HEADER, "tab-1")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(detail["data"]["rating"], 5.0);
        assert_eq!(detail["data"]["book"]["isbn13"], "978-1-83-921250-5");
        assert_eq!(detail["data"]["reviews"].as_array().unwrap().len(), 1);
        assert_eq!(detail["data"]["messages"][0]["level"], "success");

        let listing = get(&router, "/api/books").await;
        assert_eq!(listing["data"][0]["number_of_reviews"], 1);
    }

    #[tokio::test]
    async fn test_invalid_review_answers_validation_errno() {
        let router = test_router().await;
        let book_id = seed_book(&router).await;

        let json = post_form(
            &router,
            &format!("/api/books/{book_id}/reviews"),
            "content=Too+good&rating=7&creator=alice",
        )
        .await;
        assert_eq!(json["errno"], 400);
        assert_eq!(json["data"]["errors"][0]["field"], "rating");
        assert_eq!(json["data"]["editor"]["book"]["id"], book_id.as_str());

        let listing = get(&router, "/api/books").await;
        assert_eq!(listing["data"][0]["number_of_reviews"], 0);
        assert!(listing["data"][0]["rating"].is_null());
    }

    #[tokio::test]
    async fn test_unknown_ids_answer_not_found() {
        let router = test_router().await;
        let json = get(&router, "/api/books/not-a-uuid").await;
        assert_eq!(json["errno"], 404);

        let json = get(&router, &format!("/api/books/{}", uuid::Uuid::new_v4())).await;
        assert_eq!(json["errno"], 404);

        let json = get(&router, &format!("/api/publishers/{}", uuid::Uuid::new_v4())).await;
        assert_eq!(json["errno"], 404);
    }

    #[tokio::test]
    async fn test_search_endpoint() {
        let router = test_router().await;
        seed_book(&router).await;

        let json = get(&router, "/api/search?search=django&search_in=title").await;
        assert_eq!(json["data"]["search_text"], "django");
        assert_eq!(json["data"]["books"].as_array().unwrap().len(), 1);

        let json = get(&router, "/api/search?search=dj").await;
        assert!(json["data"]["books"].as_array().unwrap().is_empty());
        assert_eq!(json["data"]["errors"][0]["field"], "search");
    }

    #[tokio::test]
    async fn test_publisher_update_message() {
        let router = test_router().await;
        let created = post_form(
            &router,
            "/api/publishers",
            "name=Packt&website=https%3A%2F%2Fpacktpub.com&email=info%40packtpub.com&email_on_save=on",
        )
        .await;
        let redirect = created["data"]["redirect"].as_str().unwrap().to_string();

        let updated = post_form(
            &router,
            &redirect,
            "name=Packt+Publishing&website=https%3A%2F%2Fpacktpub.com&email=info%40packtpub.com",
        )
        .await;
        assert_eq!(
            updated["data"]["message"],
            "Publisher \"Packt Publishing\" was updated."
        );

        let editor = send(
            &router,
            Request::builder()
                .uri(&redirect)
                .header(SESSION_HEADER, "tab-1")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(editor["data"]["publisher"]["name"], "Packt Publishing");
        assert_eq!(editor["data"]["messages"].as_array().unwrap().len(), 2);
    }
}
