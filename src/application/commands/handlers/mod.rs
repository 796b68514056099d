//! Command Handlers 实现
//!
//! 所有 CommandHandler 的具体实现

mod catalog_handlers;
mod publisher_handlers;
mod review_handlers;

pub use catalog_handlers::*;
pub use publisher_handlers::*;
pub use review_handlers::*;
