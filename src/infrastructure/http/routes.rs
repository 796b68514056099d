//! HTTP Routes
//!
//! API Endpoints:
//! - /api/ping                                  GET        健康检查
//! - /api/books                                 GET        图书列表（平均评分、书评数）
//! - /api/books/:book_id                        GET        图书详情（取走提示消息）
//! - /api/search?search=&search_in=             GET        按标题/贡献者搜索
//! - /api/books/:book_id/reviews                GET/POST   新建书评（编辑页 / 提交）
//! - /api/books/:book_id/reviews/:review_id     GET/POST   编辑书评
//! - /api/publishers                            GET/POST   出版社列表 / 新建出版社
//! - /api/publishers/new                        GET        新建出版社编辑页
//! - /api/publishers/:publisher_id              GET/POST   编辑出版社
//! - /api/admin/contributors                    GET/POST   贡献者列表 / 新建
//! - /api/admin/books                           POST       新建图书
//! - /api/admin/books/:book_id                  DELETE     删除图书
//! - /api/admin/books/:book_id/contributors     POST       添加图书贡献者
//! - /api/admin/publishers/:publisher_id        DELETE     删除出版社
//! - /ws/events                                 WS         目录事件

use axum::{
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;

use super::handlers;
use super::state::AppState;

/// 创建所有路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        .nest("/api", api_routes())
        .route("/ws/events", get(handlers::events_websocket_handler))
}

/// API 路由
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ping", get(handlers::ping))
        .route("/search", get(handlers::search_books))
        .nest("/books", book_routes())
        .nest("/publishers", publisher_routes())
        .nest("/admin", admin_routes())
}

/// Book / Review 路由
fn book_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(handlers::list_books))
        .route("/:book_id", get(handlers::get_book))
        .route(
            "/:book_id/reviews",
            get(handlers::open_review_create).post(handlers::create_review),
        )
        .route(
            "/:book_id/reviews/:review_id",
            get(handlers::open_review_edit).post(handlers::update_review),
        )
}

/// Publisher 路由
fn publisher_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/",
            get(handlers::list_publishers).post(handlers::create_publisher),
        )
        .route("/new", get(handlers::open_publisher_create))
        .route(
            "/:publisher_id",
            get(handlers::open_publisher_edit).post(handlers::update_publisher),
        )
}

/// Admin 路由
fn admin_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/contributors",
            get(handlers::list_contributors).post(handlers::create_contributor),
        )
        .route("/books", post(handlers::create_book))
        .route("/books/:book_id", delete(handlers::delete_book))
        .route(
            "/books/:book_id/contributors",
            post(handlers::add_book_contributor),
        )
        .route("/publishers/:publisher_id", delete(handlers::delete_publisher))
}
