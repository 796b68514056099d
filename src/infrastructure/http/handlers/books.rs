//! Book HTTP Handlers

use axum::{
    extract::{Path, Query, State},
    http::HeaderMap,
    Json,
};
use std::sync::Arc;

use super::{parse_id, request_key};
use crate::application::forms::SearchForm;
use crate::application::{GetBookDetail, ListBooks, SearchBooks};
use crate::infrastructure::http::dto::{
    ApiResponse, BookDetailResponse, BookListingResponse, SearchResponse,
};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 列出所有图书（含平均评分和书评数）
pub async fn list_books(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<BookListingResponse>>>, ApiError> {
    let listings = state.list_books_handler.handle(ListBooks).await?;
    Ok(Json(ApiResponse::success(
        listings.iter().map(BookListingResponse::from).collect(),
    )))
}

/// 图书详情，同时取走该会话的提示消息
pub async fn get_book(
    State(state): State<Arc<AppState>>,
    Path(book_id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<ApiResponse<BookDetailResponse>>, ApiError> {
    let query = GetBookDetail {
        book_id: parse_id(&book_id, "Book")?,
        request_key: request_key(&headers),
    };
    let detail = state.get_book_detail_handler.handle(query).await?;
    Ok(Json(ApiResponse::success(BookDetailResponse::from(detail))))
}

/// 搜索图书：?search=...&search_in=title|contributor
pub async fn search_books(
    State(state): State<Arc<AppState>>,
    Query(form): Query<SearchForm>,
) -> Result<Json<ApiResponse<SearchResponse>>, ApiError> {
    let results = state.search_books_handler.handle(SearchBooks { form }).await?;
    Ok(Json(ApiResponse::success(SearchResponse::from(results))))
}
