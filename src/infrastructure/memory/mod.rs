//! Memory Layer - In-Memory State Management
//!
//! 实现 NotificationPort，管理按会话暂存的提示消息

mod flash_store;

pub use flash_store::InMemoryFlashStore;
