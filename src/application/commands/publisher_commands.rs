//! Publisher Commands

use crate::application::forms::PublisherForm;
use crate::domain::catalog::PublisherId;

/// 保存出版社命令（publisher_id 为空时新建）
#[derive(Debug, Clone)]
pub struct SavePublisher {
    pub publisher_id: Option<PublisherId>,
    pub form: PublisherForm,
    /// 保存后是否通知出版社，不随出版社持久化
    pub email_on_save: bool,
    pub request_key: String,
}

/// 删除出版社命令（级联删除其图书）
#[derive(Debug, Clone)]
pub struct DeletePublisher {
    pub publisher_id: PublisherId,
}
