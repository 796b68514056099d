//! Catalog Administration HTTP Handlers (JSON)

use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use super::parse_id;
use crate::application::forms::{BookContributorForm, ContributorForm};
use crate::application::{
    AddBookContributor, CreateBook, CreateContributor, DeleteBook, DeletePublisher,
    ListContributors,
};
use crate::domain::catalog::{ContributorId, PublisherId};
use crate::infrastructure::http::dto::{
    AddBookContributorRequest, ApiResponse, BookContributorResponse, BookResponse,
    ContributorResponse, CreateBookRequest, Empty,
};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 列出所有贡献者（按姓、名）
pub async fn list_contributors(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<ContributorResponse>>>, ApiError> {
    let contributors = state
        .list_contributors_handler
        .handle(ListContributors)
        .await?;
    Ok(Json(ApiResponse::success(
        contributors.iter().map(ContributorResponse::from).collect(),
    )))
}

/// 创建贡献者
pub async fn create_contributor(
    State(state): State<Arc<AppState>>,
    Json(form): Json<ContributorForm>,
) -> Result<Json<ApiResponse<ContributorResponse>>, ApiError> {
    let contributor = state
        .create_contributor_handler
        .handle(CreateContributor { form })
        .await?;
    Ok(Json(ApiResponse::success(ContributorResponse::from(&contributor))))
}

/// 创建图书
pub async fn create_book(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateBookRequest>,
) -> Result<Json<ApiResponse<BookResponse>>, ApiError> {
    let cmd = CreateBook {
        publisher_id: PublisherId::from_uuid(req.publisher_id),
        form: req.book,
    };
    let book = state.create_book_handler.handle(cmd).await?;
    Ok(Json(ApiResponse::success(BookResponse::from(&book))))
}

/// 为图书添加贡献者
pub async fn add_book_contributor(
    State(state): State<Arc<AppState>>,
    Path(book_id): Path<String>,
    Json(req): Json<AddBookContributorRequest>,
) -> Result<Json<ApiResponse<BookContributorResponse>>, ApiError> {
    let cmd = AddBookContributor {
        book_id: parse_id(&book_id, "Book")?,
        contributor_id: ContributorId::from_uuid(req.contributor_id),
        form: BookContributorForm { role: req.role },
    };
    let link = state.add_book_contributor_handler.handle(cmd).await?;
    Ok(Json(ApiResponse::success(BookContributorResponse {
        id: link.id().as_uuid(),
        book_id: link.book_id().as_uuid(),
        contributor_id: link.contributor_id().as_uuid(),
        role: link.role().as_str().to_string(),
    })))
}

/// 删除出版社（级联删除其图书）
pub async fn delete_publisher(
    State(state): State<Arc<AppState>>,
    Path(publisher_id): Path<String>,
) -> Result<Json<ApiResponse<Empty>>, ApiError> {
    let cmd = DeletePublisher {
        publisher_id: parse_id(&publisher_id, "Publisher")?,
    };
    state.delete_publisher_handler.handle(cmd).await?;
    Ok(Json(ApiResponse::ok()))
}

/// 删除图书
pub async fn delete_book(
    State(state): State<Arc<AppState>>,
    Path(book_id): Path<String>,
) -> Result<Json<ApiResponse<Empty>>, ApiError> {
    let cmd = DeleteBook {
        book_id: parse_id(&book_id, "Book")?,
    };
    state.delete_book_handler.handle(cmd).await?;
    Ok(Json(ApiResponse::ok()))
}
