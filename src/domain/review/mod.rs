//! Review Context - 书评限界上下文
//!
//! 职责:
//! - 书评聚合
//! - 创建/编辑时间戳语义

mod aggregate;
mod value_objects;

pub use aggregate::Review;
pub use value_objects::{CreatorRef, ReviewId};
