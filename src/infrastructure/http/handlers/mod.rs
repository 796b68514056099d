//! HTTP Handlers

mod admin;
mod books;
mod ping;
mod publishers;
mod reviews;
mod websocket;

pub use admin::*;
pub use books::*;
pub use ping::*;
pub use publishers::*;
pub use reviews::*;
pub use websocket::*;

use axum::http::HeaderMap;
use uuid::Uuid;

use crate::infrastructure::http::error::ApiError;

/// 提示消息的会话键请求头
pub const SESSION_HEADER: &str = "x-bookr-session";

const ANONYMOUS_SESSION: &str = "anonymous";

/// 从请求头取会话键，缺省为 anonymous
fn request_key(headers: &HeaderMap) -> String {
    headers
        .get(SESSION_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(ANONYMOUS_SESSION)
        .to_string()
}

/// 解析路径中的 ID，格式错误按资源不存在处理
fn parse_id<T: From<Uuid>>(raw: &str, resource_type: &str) -> Result<T, ApiError> {
    Uuid::parse_str(raw)
        .map(T::from)
        .map_err(|_| ApiError::NotFound(format!("{} not found: {}", resource_type, raw)))
}
