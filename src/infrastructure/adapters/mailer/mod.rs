//! Mailer Adapter - 出版社保存通知

mod http_mail_client;
mod log_mailer;

pub use http_mail_client::{HttpMailClient, HttpMailClientConfig};
pub use log_mailer::LogMailer;
