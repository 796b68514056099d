//! Log Mailer - 未配置邮件服务时使用
//!
//! 只记录日志，不发送任何请求

use async_trait::async_trait;

use crate::application::ports::{MailError, PublisherMailerPort, PublisherSavedNotice};

/// 仅记录日志的 Mailer
#[derive(Debug, Default)]
pub struct LogMailer;

impl LogMailer {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl PublisherMailerPort for LogMailer {
    async fn send_saved_notice(&self, notice: &PublisherSavedNotice) -> Result<(), MailError> {
        tracing::info!(
            publisher_id = %notice.publisher_id,
            to = %notice.email,
            created = notice.created,
            "Mail service not configured, publisher notice logged only"
        );
        Ok(())
    }
}
