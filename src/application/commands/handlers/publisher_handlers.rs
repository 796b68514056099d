//! Publisher Command Handlers

use std::sync::Arc;

use crate::application::commands::{DeletePublisher, SavePublisher};
use crate::application::error::ApplicationError;
use crate::application::forms::FormErrors;
use crate::application::ports::{
    Notification, NotificationPort, PublisherMailerPort, PublisherRepositoryPort,
    PublisherSavedNotice,
};
use crate::application::queries::handlers::{resolve_publisher, PublisherEditorContext};
use crate::domain::catalog::Publisher;
use crate::infrastructure::events::{CatalogEvent, EventPublisher};

/// 出版社保存成功
#[derive(Debug, Clone)]
pub struct SavedPublisher {
    pub publisher: Publisher,
    pub created: bool,
    pub message: String,
    /// 保存后跳转的编辑页地址
    pub redirect: String,
}

/// 出版社保存结果
#[derive(Debug, Clone)]
pub enum SavePublisherOutcome {
    Saved(SavedPublisher),
    /// 表单无效，未写入任何数据
    Invalid {
        context: PublisherEditorContext,
        errors: FormErrors,
    },
}

/// SavePublisher Handler - 新建或编辑出版社
pub struct SavePublisherHandler {
    publisher_repo: Arc<dyn PublisherRepositoryPort>,
    notifier: Arc<dyn NotificationPort>,
    mailer: Arc<dyn PublisherMailerPort>,
    event_publisher: Arc<EventPublisher>,
}

impl SavePublisherHandler {
    pub fn new(
        publisher_repo: Arc<dyn PublisherRepositoryPort>,
        notifier: Arc<dyn NotificationPort>,
        mailer: Arc<dyn PublisherMailerPort>,
        event_publisher: Arc<EventPublisher>,
    ) -> Self {
        Self {
            publisher_repo,
            notifier,
            mailer,
            event_publisher,
        }
    }

    pub async fn handle(
        &self,
        cmd: SavePublisher,
    ) -> Result<SavePublisherOutcome, ApplicationError> {
        let existing = resolve_publisher(self.publisher_repo.as_ref(), cmd.publisher_id).await?;

        let valid = match cmd.form.validate() {
            Ok(valid) => valid,
            Err(errors) => {
                tracing::debug!(errors = %errors, "Publisher form invalid");
                return Ok(SavePublisherOutcome::Invalid {
                    context: PublisherEditorContext::new(existing, Vec::new()),
                    errors,
                });
            }
        };

        let (publisher, created) = match existing {
            Some(mut publisher) => {
                publisher.update(valid.name, valid.website, valid.email);
                (publisher, false)
            }
            None => (Publisher::new(valid.name, valid.website, valid.email), true),
        };

        self.publisher_repo.save(&publisher).await?;

        let message = if created {
            format!("Publisher \"{}\" was created.", publisher.name())
        } else {
            format!("Publisher \"{}\" was updated.", publisher.name())
        };
        self.notifier
            .push(&cmd.request_key, Notification::success(message.clone()));

        if cmd.email_on_save {
            self.notify_publisher(&publisher, created);
        }

        self.event_publisher.publish(CatalogEvent::PublisherSaved {
            publisher_id: publisher.id(),
            name: publisher.name().to_string(),
            created,
            email_on_save: cmd.email_on_save,
        });

        tracing::info!(
            publisher_id = %publisher.id(),
            name = %publisher.name(),
            created = created,
            email_on_save = cmd.email_on_save,
            "Publisher saved"
        );

        Ok(SavePublisherOutcome::Saved(SavedPublisher {
            redirect: format!("/api/publishers/{}", publisher.id()),
            publisher,
            created,
            message,
        }))
    }

    /// 后台发送通知邮件，不阻塞保存请求；失败只记录日志
    fn notify_publisher(&self, publisher: &Publisher, created: bool) {
        let notice = PublisherSavedNotice {
            publisher_id: publisher.id(),
            name: publisher.name().to_string(),
            email: publisher.email().to_string(),
            website: publisher.website().to_string(),
            created,
        };
        let mailer = self.mailer.clone();

        tokio::spawn(async move {
            if let Err(e) = mailer.send_saved_notice(&notice).await {
                tracing::warn!(
                    publisher_id = %notice.publisher_id,
                    error = %e,
                    "Failed to send publisher notice"
                );
            }
        });
    }
}

/// DeletePublisher Handler - 级联删除图书、书评与贡献者关联
pub struct DeletePublisherHandler {
    publisher_repo: Arc<dyn PublisherRepositoryPort>,
    event_publisher: Arc<EventPublisher>,
}

impl DeletePublisherHandler {
    pub fn new(
        publisher_repo: Arc<dyn PublisherRepositoryPort>,
        event_publisher: Arc<EventPublisher>,
    ) -> Self {
        Self {
            publisher_repo,
            event_publisher,
        }
    }

    pub async fn handle(&self, cmd: DeletePublisher) -> Result<(), ApplicationError> {
        let publisher = self
            .publisher_repo
            .find_by_id(cmd.publisher_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Publisher", cmd.publisher_id))?;

        self.publisher_repo.delete(publisher.id()).await?;
        self.event_publisher.publish(CatalogEvent::PublisherDeleted {
            publisher_id: publisher.id(),
        });

        tracing::info!(
            publisher_id = %publisher.id(),
            name = %publisher.name(),
            "Publisher deleted"
        );

        Ok(())
    }
}
