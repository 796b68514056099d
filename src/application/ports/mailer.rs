//! Publisher Mailer Port - 出版社保存通知
//!
//! 出版社表单中的 "email_on_save" 指示只透传给该端口，
//! 不落库。邮件如何发送由外部服务决定。

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use crate::domain::catalog::PublisherId;

/// Mailer 错误
#[derive(Debug, Error)]
pub enum MailError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Mail service rejected request: {status} {message}")]
    Rejected { status: u16, message: String },

    #[error("Timeout")]
    Timeout,
}

/// 保存通知内容
#[derive(Debug, Clone, Serialize)]
pub struct PublisherSavedNotice {
    pub publisher_id: PublisherId,
    pub name: String,
    pub email: String,
    pub website: String,
    /// true: 新建；false: 更新
    pub created: bool,
}

/// Publisher Mailer Port
#[async_trait]
pub trait PublisherMailerPort: Send + Sync {
    async fn send_saved_notice(&self, notice: &PublisherSavedNotice) -> Result<(), MailError>;
}
