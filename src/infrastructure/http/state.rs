//! Application State
//!
//! 包含所有 Command/Query Handlers 的应用状态

use std::sync::Arc;

use crate::application::{
    // Command handlers
    AddBookContributorHandler, CreateBookHandler, CreateContributorHandler, DeleteBookHandler,
    DeletePublisherHandler, SavePublisherHandler, SaveReviewHandler,
    // Query handlers
    GetBookDetailHandler, ListBooksHandler, ListContributorsHandler, ListPublishersHandler,
    OpenPublisherEditorHandler, OpenReviewEditorHandler, SearchBooksHandler,
    // Ports
    BookRepositoryPort, ContributorRepositoryPort, NotificationPort, PublisherMailerPort,
    PublisherRepositoryPort, ReviewRepositoryPort,
};
use crate::infrastructure::events::EventPublisher;

/// 应用状态
pub struct AppState {
    // ========== Ports ==========
    pub event_publisher: Arc<EventPublisher>,

    // ========== Command Handlers ==========
    pub save_review_handler: SaveReviewHandler,
    pub save_publisher_handler: SavePublisherHandler,
    pub delete_publisher_handler: DeletePublisherHandler,
    pub create_contributor_handler: CreateContributorHandler,
    pub create_book_handler: CreateBookHandler,
    pub add_book_contributor_handler: AddBookContributorHandler,
    pub delete_book_handler: DeleteBookHandler,

    // ========== Query Handlers ==========
    pub list_books_handler: ListBooksHandler,
    pub get_book_detail_handler: GetBookDetailHandler,
    pub search_books_handler: SearchBooksHandler,
    pub open_review_editor_handler: OpenReviewEditorHandler,
    pub open_publisher_editor_handler: OpenPublisherEditorHandler,
    pub list_publishers_handler: ListPublishersHandler,
    pub list_contributors_handler: ListContributorsHandler,
}

impl AppState {
    /// 创建应用状态
    pub fn new(
        publisher_repo: Arc<dyn PublisherRepositoryPort>,
        book_repo: Arc<dyn BookRepositoryPort>,
        contributor_repo: Arc<dyn ContributorRepositoryPort>,
        review_repo: Arc<dyn ReviewRepositoryPort>,
        notifier: Arc<dyn NotificationPort>,
        mailer: Arc<dyn PublisherMailerPort>,
        event_publisher: Arc<EventPublisher>,
    ) -> Self {
        Self {
            // Ports
            event_publisher: event_publisher.clone(),

            // Command handlers
            save_review_handler: SaveReviewHandler::new(
                book_repo.clone(),
                review_repo.clone(),
                notifier.clone(),
                event_publisher.clone(),
            ),
            save_publisher_handler: SavePublisherHandler::new(
                publisher_repo.clone(),
                notifier.clone(),
                mailer,
                event_publisher.clone(),
            ),
            delete_publisher_handler: DeletePublisherHandler::new(
                publisher_repo.clone(),
                event_publisher.clone(),
            ),
            create_contributor_handler: CreateContributorHandler::new(contributor_repo.clone()),
            create_book_handler: CreateBookHandler::new(
                book_repo.clone(),
                publisher_repo.clone(),
                event_publisher.clone(),
            ),
            add_book_contributor_handler: AddBookContributorHandler::new(
                book_repo.clone(),
                contributor_repo.clone(),
            ),
            delete_book_handler: DeleteBookHandler::new(book_repo.clone(), event_publisher),

            // Query handlers
            list_books_handler: ListBooksHandler::new(book_repo.clone(), review_repo.clone()),
            get_book_detail_handler: GetBookDetailHandler::new(
                book_repo.clone(),
                publisher_repo.clone(),
                review_repo.clone(),
                notifier.clone(),
            ),
            search_books_handler: SearchBooksHandler::new(
                book_repo.clone(),
                contributor_repo.clone(),
            ),
            open_review_editor_handler: OpenReviewEditorHandler::new(book_repo, review_repo),
            open_publisher_editor_handler: OpenPublisherEditorHandler::new(
                publisher_repo.clone(),
                notifier,
            ),
            list_publishers_handler: ListPublishersHandler::new(publisher_repo),
            list_contributors_handler: ListContributorsHandler::new(contributor_repo),
        }
    }
}
