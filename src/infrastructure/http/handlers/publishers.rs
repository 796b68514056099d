//! Publisher Editor HTTP Handlers

use axum::{
    extract::{Path, State},
    http::HeaderMap,
    Form, Json,
};
use std::sync::Arc;

use super::{parse_id, request_key};
use crate::application::forms::PublisherForm;
use crate::application::{
    ListPublishers, OpenPublisherEditor, SavePublisher, SavePublisherOutcome,
};
use crate::infrastructure::http::dto::{
    ApiResponse, PublisherEditorResponse, PublisherResponse, SavedPublisherResponse,
};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 列出所有出版社（按名称）
pub async fn list_publishers(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<PublisherResponse>>>, ApiError> {
    let publishers = state.list_publishers_handler.handle(ListPublishers).await?;
    Ok(Json(ApiResponse::success(
        publishers.iter().map(PublisherResponse::from).collect(),
    )))
}

/// 新建出版社的编辑页
pub async fn open_publisher_create(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<ApiResponse<PublisherEditorResponse>>, ApiError> {
    let query = OpenPublisherEditor {
        publisher_id: None,
        request_key: request_key(&headers),
    };
    let context = state.open_publisher_editor_handler.handle(query).await?;
    Ok(Json(ApiResponse::success(PublisherEditorResponse::from(context))))
}

/// 编辑出版社的编辑页，同时取走该会话的提示消息
pub async fn open_publisher_edit(
    State(state): State<Arc<AppState>>,
    Path(publisher_id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<ApiResponse<PublisherEditorResponse>>, ApiError> {
    let query = OpenPublisherEditor {
        publisher_id: Some(parse_id(&publisher_id, "Publisher")?),
        request_key: request_key(&headers),
    };
    let context = state.open_publisher_editor_handler.handle(query).await?;
    Ok(Json(ApiResponse::success(PublisherEditorResponse::from(context))))
}

/// 提交新出版社
pub async fn create_publisher(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Form(form): Form<PublisherForm>,
) -> Result<Json<ApiResponse<SavedPublisherResponse>>, ApiError> {
    let cmd = SavePublisher {
        publisher_id: None,
        email_on_save: form.email_on_save(),
        form,
        request_key: request_key(&headers),
    };
    save(&state, cmd).await
}

/// 提交出版社修改
pub async fn update_publisher(
    State(state): State<Arc<AppState>>,
    Path(publisher_id): Path<String>,
    headers: HeaderMap,
    Form(form): Form<PublisherForm>,
) -> Result<Json<ApiResponse<SavedPublisherResponse>>, ApiError> {
    let cmd = SavePublisher {
        publisher_id: Some(parse_id(&publisher_id, "Publisher")?),
        email_on_save: form.email_on_save(),
        form,
        request_key: request_key(&headers),
    };
    save(&state, cmd).await
}

async fn save(
    state: &AppState,
    cmd: SavePublisher,
) -> Result<Json<ApiResponse<SavedPublisherResponse>>, ApiError> {
    match state.save_publisher_handler.handle(cmd).await? {
        SavePublisherOutcome::Saved(saved) => {
            Ok(Json(ApiResponse::success(SavedPublisherResponse::from(saved))))
        }
        SavePublisherOutcome::Invalid { context, errors } => Err(ApiError::Validation {
            errors,
            editor: serde_json::to_value(PublisherEditorResponse::from(context)).ok(),
        }),
    }
}
