//! Notification Port - 一次性提示消息
//!
//! 成功提示按请求方的会话 key 暂存，下一个视图读取后清空。
//! 尽力而为：写入不会失败，也不阻塞调用方。

use chrono::{DateTime, Utc};
use serde::Serialize;

/// 消息级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    Success,
}

/// 提示消息
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Success,
            message: message.into(),
            created_at: Utc::now(),
        }
    }
}

/// Notification Port
pub trait NotificationPort: Send + Sync {
    /// 追加一条消息
    fn push(&self, key: &str, notification: Notification);

    /// 取出并清空该 key 下的所有消息
    fn drain(&self, key: &str) -> Vec<Notification>;
}
