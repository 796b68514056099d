//! 应用层 - 命令（写操作）
//!
//! CQRS 命令侧：处理所有写操作

mod catalog_commands;
mod publisher_commands;
mod review_commands;

pub mod handlers;

pub use catalog_commands::*;
pub use publisher_commands::*;
pub use review_commands::*;
