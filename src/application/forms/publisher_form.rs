//! 出版社表单

use serde::Deserialize;

use super::fields::{bounded_text, checkbox, email, url};
use super::FormErrors;

/// 出版社表单原始提交
///
/// `email_on_save` 是一次性的指示，不属于出版社实体，
/// 由 [`PublisherForm::email_on_save`] 单独取出传给工作流。
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PublisherForm {
    pub name: Option<String>,
    pub website: Option<String>,
    pub email: Option<String>,
    pub email_on_save: Option<String>,
}

/// 校验通过的出版社字段
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidPublisher {
    pub name: String,
    pub website: String,
    pub email: String,
}

impl PublisherForm {
    pub fn new(name: &str, website: &str, email: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            website: Some(website.to_string()),
            email: Some(email.to_string()),
            email_on_save: None,
        }
    }

    pub fn with_email_on_save(mut self, flag: bool) -> Self {
        self.email_on_save = flag.then(|| "on".to_string());
        self
    }

    /// 保存后是否发送通知邮件
    pub fn email_on_save(&self) -> bool {
        checkbox(self.email_on_save.as_deref())
    }

    pub fn validate(&self) -> Result<ValidPublisher, FormErrors> {
        let mut errors = FormErrors::new();

        let name = bounded_text(self.name.as_deref(), 50, "name", &mut errors);
        let website = url(self.website.as_deref(), "website", &mut errors);
        let email = email(self.email.as_deref(), "email", &mut errors);

        match (name, website, email) {
            (Some(name), Some(website), Some(email)) => Ok(ValidPublisher {
                name,
                website,
                email,
            }),
            _ => Err(errors),
        }
    }
}
