//! Bookr - 图书书评目录服务
//!
//! 架构设计: DDD + CQRS + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Catalog Context: 出版社、图书、贡献者
//! - Review Context: 书评
//! - 评分聚合
//!
//! 应用层 (application/):
//! - Forms: 表单校验
//! - Ports: 端口定义（Repositories, Notification, Mailer）
//! - Commands: CQRS 命令处理器（书评/出版社编辑流程、目录管理）
//! - Queries: CQRS 查询处理器（列表、详情、搜索、编辑页）
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: RESTful API + WebSocket
//! - Memory: 提示消息存储
//! - Persistence: SQLite 存储
//! - Adapters: 出版社通知邮件
//! - Events: WebSocket 事件发布

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
