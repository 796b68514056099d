//! Event Publisher Implementation
//!
//! 目录变更事件的广播，WebSocket 订阅者与外部通知服务均可消费

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::broadcast;

use crate::domain::catalog::{BookId, PublisherId};
use crate::domain::review::ReviewId;

/// 目录事件类型
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum CatalogEvent {
    /// 新书评
    ReviewCreated {
        review_id: ReviewId,
        book_id: BookId,
        book_title: String,
        rating: i32,
    },
    /// 书评已编辑
    ReviewUpdated {
        review_id: ReviewId,
        book_id: BookId,
        book_title: String,
        rating: i32,
    },
    /// 出版社已保存
    PublisherSaved {
        publisher_id: PublisherId,
        name: String,
        created: bool,
        email_on_save: bool,
    },
    /// 出版社已删除（其图书一并删除）
    PublisherDeleted {
        publisher_id: PublisherId,
    },
    /// 新图书
    BookCreated {
        book_id: BookId,
        title: String,
    },
    /// 图书已删除
    BookDeleted {
        book_id: BookId,
    },
}

/// 事件发布器
pub struct EventPublisher {
    channel: broadcast::Sender<CatalogEvent>,
}

impl EventPublisher {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(100);
        Self { channel: tx }
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// 订阅目录事件
    pub fn subscribe(&self) -> broadcast::Receiver<CatalogEvent> {
        self.channel.subscribe()
    }

    /// 发布事件（无订阅者时丢弃）
    pub fn publish(&self, event: CatalogEvent) {
        if let Err(e) = self.channel.send(event) {
            tracing::debug!(error = %e, "Failed to publish catalog event (no receivers)");
        }
    }
}

impl Default for EventPublisher {
    fn default() -> Self {
        Self::new()
    }
}
