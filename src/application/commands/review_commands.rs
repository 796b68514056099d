//! Review Commands

use crate::application::forms::ReviewForm;
use crate::domain::catalog::BookId;
use crate::domain::review::ReviewId;

/// 保存书评命令（review_id 为空时新建）
#[derive(Debug, Clone)]
pub struct SaveReview {
    pub book_id: BookId,
    pub review_id: Option<ReviewId>,
    pub form: ReviewForm,
    /// 提示消息的会话键
    pub request_key: String,
}
