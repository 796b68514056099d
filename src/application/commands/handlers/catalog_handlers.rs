//! Catalog Command Handlers - 目录管理

use std::sync::Arc;

use crate::application::commands::{AddBookContributor, CreateBook, CreateContributor, DeleteBook};
use crate::application::error::ApplicationError;
use crate::application::ports::{
    BookRepositoryPort, ContributorRepositoryPort, PublisherRepositoryPort,
};
use crate::domain::catalog::{Book, BookContributor, Contributor};
use crate::infrastructure::events::{CatalogEvent, EventPublisher};

// ============================================================================
// CreateContributor
// ============================================================================

/// CreateContributor Handler
pub struct CreateContributorHandler {
    contributor_repo: Arc<dyn ContributorRepositoryPort>,
}

impl CreateContributorHandler {
    pub fn new(contributor_repo: Arc<dyn ContributorRepositoryPort>) -> Self {
        Self { contributor_repo }
    }

    pub async fn handle(&self, cmd: CreateContributor) -> Result<Contributor, ApplicationError> {
        let valid = cmd.form.validate()?;
        let contributor = Contributor::new(valid.first_names, valid.last_names, valid.email);
        self.contributor_repo.save(&contributor).await?;

        tracing::info!(
            contributor_id = %contributor.id(),
            name = %contributor.initialled_name(),
            "Contributor created"
        );

        Ok(contributor)
    }
}

// ============================================================================
// CreateBook
// ============================================================================

/// CreateBook Handler
pub struct CreateBookHandler {
    book_repo: Arc<dyn BookRepositoryPort>,
    publisher_repo: Arc<dyn PublisherRepositoryPort>,
    event_publisher: Arc<EventPublisher>,
}

impl CreateBookHandler {
    pub fn new(
        book_repo: Arc<dyn BookRepositoryPort>,
        publisher_repo: Arc<dyn PublisherRepositoryPort>,
        event_publisher: Arc<EventPublisher>,
    ) -> Self {
        Self {
            book_repo,
            publisher_repo,
            event_publisher,
        }
    }

    pub async fn handle(&self, cmd: CreateBook) -> Result<Book, ApplicationError> {
        self.publisher_repo
            .find_by_id(cmd.publisher_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Publisher", cmd.publisher_id))?;

        let valid = cmd.form.validate()?;
        let book = Book::new(valid.title, valid.publication_date, valid.isbn, cmd.publisher_id);
        self.book_repo.save(&book).await?;

        self.event_publisher.publish(CatalogEvent::BookCreated {
            book_id: book.id(),
            title: book.title().to_string(),
        });
        tracing::info!(book_id = %book.id(), title = %book.title(), "Book created");

        Ok(book)
    }
}

// ============================================================================
// AddBookContributor
// ============================================================================

/// AddBookContributor Handler
pub struct AddBookContributorHandler {
    book_repo: Arc<dyn BookRepositoryPort>,
    contributor_repo: Arc<dyn ContributorRepositoryPort>,
}

impl AddBookContributorHandler {
    pub fn new(
        book_repo: Arc<dyn BookRepositoryPort>,
        contributor_repo: Arc<dyn ContributorRepositoryPort>,
    ) -> Self {
        Self {
            book_repo,
            contributor_repo,
        }
    }

    pub async fn handle(&self, cmd: AddBookContributor) -> Result<BookContributor, ApplicationError> {
        let book = self
            .book_repo
            .find_by_id(cmd.book_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Book", cmd.book_id))?;
        let contributor = self
            .contributor_repo
            .find_by_id(cmd.contributor_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Contributor", cmd.contributor_id))?;

        let role = cmd.form.validate()?;
        let link = BookContributor::new(book.id(), contributor.id(), role);
        self.book_repo.add_contributor(&link).await?;

        tracing::info!(link = %link.describe(&contributor, &book), "Book contributor added");

        Ok(link)
    }
}

// ============================================================================
// DeleteBook
// ============================================================================

/// DeleteBook Handler - 级联删除书评与贡献者关联
pub struct DeleteBookHandler {
    book_repo: Arc<dyn BookRepositoryPort>,
    event_publisher: Arc<EventPublisher>,
}

impl DeleteBookHandler {
    pub fn new(book_repo: Arc<dyn BookRepositoryPort>, event_publisher: Arc<EventPublisher>) -> Self {
        Self {
            book_repo,
            event_publisher,
        }
    }

    pub async fn handle(&self, cmd: DeleteBook) -> Result<(), ApplicationError> {
        let book = self
            .book_repo
            .find_by_id(cmd.book_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Book", cmd.book_id))?;

        self.book_repo.delete(book.id()).await?;
        self.event_publisher
            .publish(CatalogEvent::BookDeleted { book_id: book.id() });

        tracing::info!(book_id = %book.id(), title = %book.title(), "Book deleted");
        Ok(())
    }
}
