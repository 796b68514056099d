//! Review Editor HTTP Handlers
//!
//! GET 返回编辑页上下文，POST 提交表单（application/x-www-form-urlencoded）

use axum::{
    extract::{Path, State},
    http::HeaderMap,
    Form, Json,
};
use std::sync::Arc;

use super::{parse_id, request_key};
use crate::application::forms::ReviewForm;
use crate::application::{OpenReviewEditor, SaveReview, SaveReviewOutcome};
use crate::domain::catalog::BookId;
use crate::domain::review::ReviewId;
use crate::infrastructure::http::dto::{ApiResponse, ReviewEditorResponse, SavedReviewResponse};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 新建书评的编辑页
pub async fn open_review_create(
    State(state): State<Arc<AppState>>,
    Path(book_id): Path<String>,
) -> Result<Json<ApiResponse<ReviewEditorResponse>>, ApiError> {
    open_editor(&state, parse_id(&book_id, "Book")?, None).await
}

/// 编辑已有书评的编辑页
pub async fn open_review_edit(
    State(state): State<Arc<AppState>>,
    Path((book_id, review_id)): Path<(String, String)>,
) -> Result<Json<ApiResponse<ReviewEditorResponse>>, ApiError> {
    let book_id = parse_id(&book_id, "Book")?;
    let review_id = parse_id(&review_id, "Review")?;
    open_editor(&state, book_id, Some(review_id)).await
}

/// 提交新书评
pub async fn create_review(
    State(state): State<Arc<AppState>>,
    Path(book_id): Path<String>,
    headers: HeaderMap,
    Form(form): Form<ReviewForm>,
) -> Result<Json<ApiResponse<SavedReviewResponse>>, ApiError> {
    let cmd = SaveReview {
        book_id: parse_id(&book_id, "Book")?,
        review_id: None,
        form,
        request_key: request_key(&headers),
    };
    save(&state, cmd).await
}

/// 提交书评修改
pub async fn update_review(
    State(state): State<Arc<AppState>>,
    Path((book_id, review_id)): Path<(String, String)>,
    headers: HeaderMap,
    Form(form): Form<ReviewForm>,
) -> Result<Json<ApiResponse<SavedReviewResponse>>, ApiError> {
    let cmd = SaveReview {
        book_id: parse_id(&book_id, "Book")?,
        review_id: Some(parse_id(&review_id, "Review")?),
        form,
        request_key: request_key(&headers),
    };
    save(&state, cmd).await
}

async fn open_editor(
    state: &AppState,
    book_id: BookId,
    review_id: Option<ReviewId>,
) -> Result<Json<ApiResponse<ReviewEditorResponse>>, ApiError> {
    let context = state
        .open_review_editor_handler
        .handle(OpenReviewEditor { book_id, review_id })
        .await?;
    Ok(Json(ApiResponse::success(ReviewEditorResponse::from(&context))))
}

async fn save(
    state: &AppState,
    cmd: SaveReview,
) -> Result<Json<ApiResponse<SavedReviewResponse>>, ApiError> {
    match state.save_review_handler.handle(cmd).await? {
        SaveReviewOutcome::Saved(saved) => {
            Ok(Json(ApiResponse::success(SavedReviewResponse::from(saved))))
        }
        SaveReviewOutcome::Invalid { context, errors } => Err(ApiError::Validation {
            errors,
            editor: serde_json::to_value(ReviewEditorResponse::from(&context)).ok(),
        }),
    }
}
