//! Editor Queries - 编辑页入口

use crate::domain::catalog::{BookId, PublisherId};
use crate::domain::review::ReviewId;

/// 打开书评编辑页（review_id 为空时为新建）
#[derive(Debug, Clone)]
pub struct OpenReviewEditor {
    pub book_id: BookId,
    pub review_id: Option<ReviewId>,
}

/// 打开出版社编辑页（publisher_id 为空时为新建）
#[derive(Debug, Clone)]
pub struct OpenPublisherEditor {
    pub publisher_id: Option<PublisherId>,
    pub request_key: String,
}
