//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod mailer;
mod notifier;
mod repositories;

pub use mailer::{MailError, PublisherMailerPort, PublisherSavedNotice};
pub use notifier::{Notification, NotificationLevel, NotificationPort};
pub use repositories::{
    BookContribution, BookRepositoryPort, ContributorRepositoryPort, PublisherRepositoryPort,
    RepositoryError, ReviewRepositoryPort,
};
