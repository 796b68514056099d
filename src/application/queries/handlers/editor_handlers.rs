//! Editor Query Handlers

use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::{
    BookRepositoryPort, Notification, NotificationPort, PublisherRepositoryPort,
    ReviewRepositoryPort,
};
use crate::application::queries::{OpenPublisherEditor, OpenReviewEditor};
use crate::domain::catalog::{Book, BookId, Publisher, PublisherId};
use crate::domain::review::{Review, ReviewId};

// ============================================================================
// Editor contexts
// ============================================================================

/// 书评编辑页上下文
#[derive(Debug, Clone)]
pub struct ReviewEditorContext {
    pub model_type: &'static str,
    pub related_model_type: &'static str,
    pub book: Book,
    /// 编辑模式下的已有书评
    pub review: Option<Review>,
}

impl ReviewEditorContext {
    fn new(book: Book, review: Option<Review>) -> Self {
        Self {
            model_type: "Review",
            related_model_type: "Book",
            book,
            review,
        }
    }
}

/// 出版社编辑页上下文
#[derive(Debug, Clone)]
pub struct PublisherEditorContext {
    pub model_type: &'static str,
    pub publisher: Option<Publisher>,
    pub messages: Vec<Notification>,
}

impl PublisherEditorContext {
    pub(crate) fn new(publisher: Option<Publisher>, messages: Vec<Notification>) -> Self {
        Self {
            model_type: "Publisher",
            publisher,
            messages,
        }
    }
}

/// 解析书评编辑的前置条件：图书必须存在，编辑时书评必须属于该图书
pub(crate) async fn resolve_review_editor(
    book_repo: &dyn BookRepositoryPort,
    review_repo: &dyn ReviewRepositoryPort,
    book_id: BookId,
    review_id: Option<ReviewId>,
) -> Result<ReviewEditorContext, ApplicationError> {
    let book = book_repo
        .find_by_id(book_id)
        .await?
        .ok_or_else(|| ApplicationError::not_found("Book", book_id))?;

    let review = match review_id {
        Some(review_id) => Some(
            review_repo
                .find_for_book(book_id, review_id)
                .await?
                .ok_or_else(|| ApplicationError::not_found("Review", review_id))?,
        ),
        None => None,
    };

    Ok(ReviewEditorContext::new(book, review))
}

/// 解析出版社编辑的前置条件：提供的 ID 必须存在
pub(crate) async fn resolve_publisher(
    publisher_repo: &dyn PublisherRepositoryPort,
    publisher_id: Option<PublisherId>,
) -> Result<Option<Publisher>, ApplicationError> {
    match publisher_id {
        Some(id) => publisher_repo
            .find_by_id(id)
            .await?
            .map(Some)
            .ok_or_else(|| ApplicationError::not_found("Publisher", id)),
        None => Ok(None),
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// OpenReviewEditor Handler
pub struct OpenReviewEditorHandler {
    book_repo: Arc<dyn BookRepositoryPort>,
    review_repo: Arc<dyn ReviewRepositoryPort>,
}

impl OpenReviewEditorHandler {
    pub fn new(
        book_repo: Arc<dyn BookRepositoryPort>,
        review_repo: Arc<dyn ReviewRepositoryPort>,
    ) -> Self {
        Self {
            book_repo,
            review_repo,
        }
    }

    pub async fn handle(
        &self,
        query: OpenReviewEditor,
    ) -> Result<ReviewEditorContext, ApplicationError> {
        resolve_review_editor(
            self.book_repo.as_ref(),
            self.review_repo.as_ref(),
            query.book_id,
            query.review_id,
        )
        .await
    }
}

/// OpenPublisherEditor Handler
pub struct OpenPublisherEditorHandler {
    publisher_repo: Arc<dyn PublisherRepositoryPort>,
    notifier: Arc<dyn NotificationPort>,
}

impl OpenPublisherEditorHandler {
    pub fn new(
        publisher_repo: Arc<dyn PublisherRepositoryPort>,
        notifier: Arc<dyn NotificationPort>,
    ) -> Self {
        Self {
            publisher_repo,
            notifier,
        }
    }

    pub async fn handle(
        &self,
        query: OpenPublisherEditor,
    ) -> Result<PublisherEditorContext, ApplicationError> {
        let publisher = resolve_publisher(self.publisher_repo.as_ref(), query.publisher_id).await?;
        // 保存后重定向到编辑页，在这里展示上一次保存的提示
        let messages = self.notifier.drain(&query.request_key);
        Ok(PublisherEditorContext::new(publisher, messages))
    }
}
