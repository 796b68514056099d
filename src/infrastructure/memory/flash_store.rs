//! In-Memory Flash Message Store
//!
//! NotificationPort 的内存实现，按会话 key 暂存提示消息。
//! 未被读取的消息在 TTL 后过期；key 数量有上限，超出时淘汰最久未写入的 key。

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use std::sync::Arc;

use crate::application::ports::{Notification, NotificationPort};

/// 默认消息保留时间（秒）
const DEFAULT_FLASH_TTL_SECS: u64 = 3600;

/// 默认最多保留的 key 数量
const DEFAULT_FLASH_MAX_KEYS: usize = 10_000;

/// 内存提示消息存储
pub struct InMemoryFlashStore {
    messages: DashMap<String, Vec<Notification>>,
    ttl: Duration,
    max_keys: usize,
}

impl InMemoryFlashStore {
    pub fn new() -> Self {
        Self::with_limits(DEFAULT_FLASH_TTL_SECS, DEFAULT_FLASH_MAX_KEYS)
    }

    pub fn with_limits(ttl_secs: u64, max_keys: usize) -> Self {
        Self {
            messages: DashMap::new(),
            ttl: Duration::seconds(ttl_secs as i64),
            max_keys: max_keys.max(1),
        }
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// 当前持有消息的 key 数量
    pub fn pending_keys(&self) -> usize {
        self.messages.len()
    }

    /// 删除所有消息都已过期的 key，返回删除数量
    pub fn evict_expired(&self) -> usize {
        let cutoff = Utc::now() - self.ttl;
        let before = self.messages.len();
        self.messages
            .retain(|_, messages| last_written(messages).is_some_and(|at| at > cutoff));
        let evicted = before.saturating_sub(self.messages.len());
        if evicted > 0 {
            tracing::debug!(evicted = evicted, "Expired flash messages evicted");
        }
        evicted
    }

    /// 新 key 将超出上限时淘汰最久未写入的 key
    fn make_room_for(&self, key: &str) {
        if self.messages.contains_key(key) || self.messages.len() < self.max_keys {
            return;
        }
        let oldest = self
            .messages
            .iter()
            .min_by_key(|entry| last_written(entry.value()))
            .map(|entry| entry.key().clone());
        if let Some(oldest) = oldest {
            self.messages.remove(&oldest);
            tracing::debug!(key = %oldest, "Flash store full, oldest key evicted");
        }
    }
}

fn last_written(messages: &[Notification]) -> Option<DateTime<Utc>> {
    messages.iter().map(|n| n.created_at).max()
}

impl Default for InMemoryFlashStore {
    fn default() -> Self {
        Self::new()
    }
}

impl NotificationPort for InMemoryFlashStore {
    fn push(&self, key: &str, notification: Notification) {
        tracing::debug!(key = %key, message = %notification.message, "Flash message queued");
        self.evict_expired();
        self.make_room_for(key);
        self.messages
            .entry(key.to_string())
            .or_default()
            .push(notification);
    }

    fn drain(&self, key: &str) -> Vec<Notification> {
        let cutoff = Utc::now() - self.ttl;
        self.messages
            .remove(key)
            .map(|(_, messages)| messages)
            .unwrap_or_default()
            .into_iter()
            .filter(|n| n.created_at > cutoff)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn aged(message: &str, age_secs: i64) -> Notification {
        let mut notification = Notification::success(message);
        notification.created_at = Utc::now() - Duration::seconds(age_secs);
        notification
    }

    #[test]
    fn test_push_and_drain() {
        let store = InMemoryFlashStore::new();
        store.push("s1", Notification::success("first"));
        store.push("s1", Notification::success("second"));
        store.push("s2", Notification::success("other"));

        let drained = store.drain("s1");
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[0].message, "first");
        assert_eq!(drained[1].message, "second");

        // 读取后清空
        assert!(store.drain("s1").is_empty());
        assert_eq!(store.pending_keys(), 1);
    }

    #[test]
    fn test_drain_unknown_key() {
        let store = InMemoryFlashStore::new();
        assert!(store.drain("nobody").is_empty());
    }

    #[test]
    fn test_undrained_keys_expire() {
        let store = InMemoryFlashStore::with_limits(60, 100);
        store.push("stale", aged("old news", 120));
        store.push("fresh", Notification::success("new"));

        assert_eq!(store.pending_keys(), 1);
        assert!(store.drain("stale").is_empty());
        assert_eq!(store.drain("fresh").len(), 1);
    }

    #[test]
    fn test_drain_skips_expired_messages() {
        let store = InMemoryFlashStore::with_limits(60, 100);
        store.push("s1", Notification::success("new"));
        store.messages.entry("s1".to_string()).or_default().push(aged("old", 120));

        let drained = store.drain("s1");
        assert_eq!(drained.len(), 1);
        assert_eq!(drained[0].message, "new");
    }

    #[test]
    fn test_key_count_is_bounded() {
        let store = InMemoryFlashStore::with_limits(3600, 100);
        for i in 0..1000 {
            store.push(&format!("session-{i}"), aged("saved", 1000 - i));
        }

        assert_eq!(store.pending_keys(), 100);
        // 最早写入的 key 被淘汰，最新的保留
        assert!(store.drain("session-0").is_empty());
        assert_eq!(store.drain("session-999").len(), 1);
    }
}
