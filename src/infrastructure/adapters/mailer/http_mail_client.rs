//! HTTP Mail Client - 调用外部邮件 webhook
//!
//! 实现 PublisherMailerPort trait
//!
//! 外部邮件 API:
//! POST {webhook_url}
//! Request: {"from": "...", "to": "...", "subject": "...", "publisher": {...}}  (JSON)
//! Response: 2xx 表示已受理

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

use crate::application::ports::{MailError, PublisherMailerPort, PublisherSavedNotice};

/// 邮件请求体 (JSON)
#[derive(Debug, Serialize)]
struct MailHttpRequest<'a> {
    from: &'a str,
    to: &'a str,
    subject: String,
    publisher: &'a PublisherSavedNotice,
}

/// HTTP 邮件客户端配置
#[derive(Debug, Clone)]
pub struct HttpMailClientConfig {
    /// webhook 地址
    pub webhook_url: String,
    /// 发件人
    pub from_address: String,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
    /// 失败后的重试次数
    pub max_retries: u32,
    /// 首次重试前的等待时间（毫秒），之后每次翻倍
    pub retry_backoff_ms: u64,
}

impl Default for HttpMailClientConfig {
    fn default() -> Self {
        Self {
            webhook_url: "http://localhost:8025/api/send".to_string(),
            from_address: "noreply@bookr.local".to_string(),
            timeout_secs: 10,
            max_retries: 0,
            retry_backoff_ms: 500,
        }
    }
}

impl HttpMailClientConfig {
    pub fn new(webhook_url: impl Into<String>) -> Self {
        Self {
            webhook_url: webhook_url.into(),
            ..Default::default()
        }
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    pub fn with_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    pub fn with_backoff(mut self, millis: u64) -> Self {
        self.retry_backoff_ms = millis;
        self
    }

    /// 第 `attempt` 次重试前的等待时间（从 1 开始计数）
    fn retry_delay(&self, attempt: u32) -> Duration {
        let factor = 1u64 << attempt.saturating_sub(1).min(6);
        Duration::from_millis(self.retry_backoff_ms.saturating_mul(factor))
    }
}

/// HTTP 邮件客户端
pub struct HttpMailClient {
    client: Client,
    config: HttpMailClientConfig,
}

impl HttpMailClient {
    pub fn new(config: HttpMailClientConfig) -> Result<Self, MailError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| MailError::NetworkError(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn subject(notice: &PublisherSavedNotice) -> String {
        if notice.created {
            format!("Publisher \"{}\" was created.", notice.name)
        } else {
            format!("Publisher \"{}\" was updated.", notice.name)
        }
    }

    async fn send_once(&self, body: &MailHttpRequest<'_>) -> Result<(), MailError> {
        let response = self
            .client
            .post(&self.config.webhook_url)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    MailError::Timeout
                } else if e.is_connect() {
                    MailError::NetworkError(format!("Cannot connect to mail service: {}", e))
                } else {
                    MailError::NetworkError(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(MailError::Rejected {
                status: status.as_u16(),
                message,
            });
        }
        Ok(())
    }
}

fn is_retryable(err: &MailError) -> bool {
    match err {
        MailError::Timeout | MailError::NetworkError(_) => true,
        MailError::Rejected { status, .. } => *status >= 500,
    }
}

#[async_trait]
impl PublisherMailerPort for HttpMailClient {
    async fn send_saved_notice(&self, notice: &PublisherSavedNotice) -> Result<(), MailError> {
        let body = MailHttpRequest {
            from: &self.config.from_address,
            to: &notice.email,
            subject: Self::subject(notice),
            publisher: notice,
        };

        let mut attempt = 0;
        loop {
            match self.send_once(&body).await {
                Ok(()) => {
                    tracing::info!(
                        publisher_id = %notice.publisher_id,
                        to = %notice.email,
                        attempt = attempt + 1,
                        "Publisher notice sent"
                    );
                    return Ok(());
                }
                Err(e) if attempt < self.config.max_retries && is_retryable(&e) => {
                    attempt += 1;
                    let delay = self.config.retry_delay(attempt);
                    tracing::warn!(
                        publisher_id = %notice.publisher_id,
                        error = %e,
                        attempt = attempt,
                        delay_ms = delay.as_millis() as u64,
                        "Mail webhook failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }
}
