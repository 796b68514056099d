//! Review Command Handlers

use std::sync::Arc;

use crate::application::commands::SaveReview;
use crate::application::error::ApplicationError;
use crate::application::forms::FormErrors;
use crate::application::ports::{
    BookRepositoryPort, Notification, NotificationPort, ReviewRepositoryPort,
};
use crate::application::queries::handlers::{resolve_review_editor, ReviewEditorContext};
use crate::domain::review::Review;
use crate::infrastructure::events::{CatalogEvent, EventPublisher};

/// 书评保存成功
#[derive(Debug, Clone)]
pub struct SavedReview {
    pub review: Review,
    pub book_title: String,
    pub created: bool,
    pub message: String,
    /// 保存后跳转的图书详情地址
    pub redirect: String,
}

/// 书评保存结果
#[derive(Debug, Clone)]
pub enum SaveReviewOutcome {
    Saved(SavedReview),
    /// 表单无效，未写入任何数据
    Invalid {
        context: ReviewEditorContext,
        errors: FormErrors,
    },
}

/// SaveReview Handler - 新建或编辑书评
pub struct SaveReviewHandler {
    book_repo: Arc<dyn BookRepositoryPort>,
    review_repo: Arc<dyn ReviewRepositoryPort>,
    notifier: Arc<dyn NotificationPort>,
    event_publisher: Arc<EventPublisher>,
}

impl SaveReviewHandler {
    pub fn new(
        book_repo: Arc<dyn BookRepositoryPort>,
        review_repo: Arc<dyn ReviewRepositoryPort>,
        notifier: Arc<dyn NotificationPort>,
        event_publisher: Arc<EventPublisher>,
    ) -> Self {
        Self {
            book_repo,
            review_repo,
            notifier,
            event_publisher,
        }
    }

    pub async fn handle(&self, cmd: SaveReview) -> Result<SaveReviewOutcome, ApplicationError> {
        // 先解析图书和书评，再处理表单
        let context = resolve_review_editor(
            self.book_repo.as_ref(),
            self.review_repo.as_ref(),
            cmd.book_id,
            cmd.review_id,
        )
        .await?;

        let valid = match cmd.form.validate() {
            Ok(valid) => valid,
            Err(errors) => {
                tracing::debug!(book_id = %cmd.book_id, errors = %errors, "Review form invalid");
                return Ok(SaveReviewOutcome::Invalid { context, errors });
            }
        };

        let book = context.book;
        let (review, created) = match context.review {
            Some(mut review) => {
                review.revise(valid.creator, valid.content, valid.rating);
                review.bind_to(book.id());
                (review, false)
            }
            None => (
                Review::new(book.id(), valid.creator, valid.content, valid.rating),
                true,
            ),
        };

        self.review_repo.save(&review).await?;

        let message = if created {
            format!("Review for \"{}\" created.", book.title())
        } else {
            format!("Review for \"{}\" updated.", book.title())
        };
        self.notifier
            .push(&cmd.request_key, Notification::success(message.clone()));

        let event = if created {
            CatalogEvent::ReviewCreated {
                review_id: review.id(),
                book_id: book.id(),
                book_title: book.title().to_string(),
                rating: review.rating(),
            }
        } else {
            CatalogEvent::ReviewUpdated {
                review_id: review.id(),
                book_id: book.id(),
                book_title: book.title().to_string(),
                rating: review.rating(),
            }
        };
        self.event_publisher.publish(event);

        tracing::info!(
            review_id = %review.id(),
            book_id = %book.id(),
            rating = review.rating(),
            created = created,
            "Review saved"
        );

        Ok(SaveReviewOutcome::Saved(SavedReview {
            redirect: format!("/api/books/{}", book.id()),
            book_title: book.title().to_string(),
            review,
            created,
            message,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::forms::ReviewForm;
    use crate::application::ports::PublisherRepositoryPort;
    use crate::domain::catalog::{Book, Publisher};
    use crate::domain::review::ReviewId;
    use crate::infrastructure::memory::InMemoryFlashStore;
    use crate::infrastructure::persistence::sqlite::{
        test_pool, SqliteBookRepository, SqlitePublisherRepository, SqliteReviewRepository,
    };
    use chrono::NaiveDate;

    struct Fixture {
        handler: SaveReviewHandler,
        books: Arc<SqliteBookRepository>,
        reviews: Arc<SqliteReviewRepository>,
        flash: Arc<InMemoryFlashStore>,
        events: Arc<EventPublisher>,
        book: Book,
    }

    async fn fixture() -> Fixture {
        let pool = test_pool().await;
        let publishers = SqlitePublisherRepository::new(pool.clone());
        let books = Arc::new(SqliteBookRepository::new(pool.clone()));
        let reviews = Arc::new(SqliteReviewRepository::new(pool));
        let flash = Arc::new(InMemoryFlashStore::new());
        let events = EventPublisher::new().arc();

        let publisher = Publisher::new(
            "Penguin".to_string(),
            "https://www.penguin.com".to_string(),
            "hello@penguin.com".to_string(),
        );
        publishers.save(&publisher).await.unwrap();
        let book = Book::new(
            "Brave New World".to_string(),
            NaiveDate::from_ymd_opt(1932, 1, 1).unwrap(),
            "9780099518471".to_string(),
            publisher.id(),
        );
        books.save(&book).await.unwrap();

        Fixture {
            handler: SaveReviewHandler::new(
                books.clone(),
                reviews.clone(),
                flash.clone(),
                events.clone(),
            ),
            books,
            reviews,
            flash,
            events,
            book,
        }
    }

    fn save(book: &Book, review_id: Option<ReviewId>, rating: &str) -> SaveReview {
        SaveReview {
            book_id: book.id(),
            review_id,
            form: ReviewForm::new("Unsettling and sharp.", rating, "alice"),
            request_key: "anonymous".to_string(),
        }
    }

    fn saved(outcome: SaveReviewOutcome) -> SavedReview {
        match outcome {
            SaveReviewOutcome::Saved(saved) => saved,
            SaveReviewOutcome::Invalid { errors, .. } => panic!("unexpected errors: {errors}"),
        }
    }

    #[tokio::test]
    async fn test_create_review() {
        let f = fixture().await;
        let mut rx = f.events.subscribe();

        let saved = saved(f.handler.handle(save(&f.book, None, "4")).await.unwrap());

        assert!(saved.created);
        assert_eq!(saved.message, "Review for \"Brave New World\" created.");
        assert_eq!(saved.redirect, format!("/api/books/{}", f.book.id()));
        assert_eq!(saved.review.book_id(), f.book.id());
        assert!(saved.review.edited_at().is_none());

        let stored = f.reviews.find_by_book(f.book.id()).await.unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].rating(), 4);

        let messages = f.flash.drain("anonymous");
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].message, saved.message);
        assert!(matches!(
            rx.recv().await.unwrap(),
            CatalogEvent::ReviewCreated { rating: 4, .. }
        ));
    }

    #[tokio::test]
    async fn test_out_of_range_rating_persists_nothing() {
        let f = fixture().await;

        let outcome = f.handler.handle(save(&f.book, None, "7")).await.unwrap();

        match outcome {
            SaveReviewOutcome::Invalid { context, errors } => {
                assert!(errors.has("rating"));
                assert_eq!(context.book.id(), f.book.id());
                assert!(context.review.is_none());
            }
            SaveReviewOutcome::Saved(_) => panic!("rating 7 must be rejected"),
        }
        assert!(f.reviews.find_by_book(f.book.id()).await.unwrap().is_empty());
        assert!(f.flash.drain("anonymous").is_empty());
    }

    #[tokio::test]
    async fn test_edit_sets_edited_at_and_keeps_created_at() {
        let f = fixture().await;
        let created = saved(f.handler.handle(save(&f.book, None, "3")).await.unwrap());
        f.flash.drain("anonymous");

        let updated = saved(
            f.handler
                .handle(save(&f.book, Some(created.review.id()), "5"))
                .await
                .unwrap(),
        );

        assert!(!updated.created);
        assert_eq!(updated.message, "Review for \"Brave New World\" updated.");
        let stored = f
            .reviews
            .find_for_book(f.book.id(), created.review.id())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.rating(), 5);
        assert_eq!(stored.created_at(), created.review.created_at());
        assert!(stored.edited_at().unwrap() >= stored.created_at());
    }

    #[tokio::test]
    async fn test_review_of_another_book_is_not_found() {
        let f = fixture().await;
        let created = saved(f.handler.handle(save(&f.book, None, "3")).await.unwrap());

        let other = Book::new(
            "Island".to_string(),
            NaiveDate::from_ymd_opt(1962, 1, 1).unwrap(),
            "9780099477730".to_string(),
            f.book.publisher_id(),
        );
        f.books.save(&other).await.unwrap();

        let err = f
            .handler
            .handle(save(&other, Some(created.review.id()), "1"))
            .await
            .unwrap_err();
        assert!(err.is_not_found());

        let stored = f.reviews.find_by_book(f.book.id()).await.unwrap();
        assert_eq!(stored[0].rating(), 3);
    }

    #[tokio::test]
    async fn test_unknown_book_is_checked_before_the_form() {
        let f = fixture().await;
        let mut cmd = save(&f.book, None, "not a number");
        cmd.book_id = crate::domain::catalog::BookId::new();

        let err = f.handler.handle(cmd).await.unwrap_err();
        assert!(err.is_not_found());
    }
}
