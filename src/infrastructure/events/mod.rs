//! Events - 目录变更事件广播

mod publisher;

pub use publisher::{CatalogEvent, EventPublisher};
