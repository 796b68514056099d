//! 应用层 - 用例编排
//!
//! 包含：
//! - forms: 表单校验
//! - ports: 六边形架构端口定义（Repository、Notification、Mailer）
//! - commands: CQRS 命令及处理器
//! - queries: CQRS 查询及处理器
//! - error: 应用层错误定义

pub mod commands;
pub mod error;
pub mod forms;
pub mod ports;
pub mod queries;

// Re-exports
pub use commands::{
    // Review commands
    SaveReview,
    // Publisher commands
    DeletePublisher,
    SavePublisher,
    // Catalog commands
    AddBookContributor,
    CreateBook,
    CreateContributor,
    DeleteBook,
    // Handlers
    handlers::{
        AddBookContributorHandler, CreateBookHandler, CreateContributorHandler, DeleteBookHandler,
        DeletePublisherHandler, SavePublisherHandler, SavePublisherOutcome, SaveReviewHandler,
        SaveReviewOutcome, SavedPublisher, SavedReview,
    },
};

pub use error::ApplicationError;

pub use forms::{FieldError, FormErrors};

pub use ports::{
    // Repositories
    BookContribution,
    BookRepositoryPort,
    ContributorRepositoryPort,
    PublisherRepositoryPort,
    RepositoryError,
    ReviewRepositoryPort,
    // Notifications
    Notification,
    NotificationLevel,
    NotificationPort,
    // Mailer
    MailError,
    PublisherMailerPort,
    PublisherSavedNotice,
};

pub use queries::{
    // Catalog queries
    GetBookDetail,
    ListBooks,
    ListContributors,
    ListPublishers,
    SearchBooks,
    // Editor queries
    OpenPublisherEditor,
    OpenReviewEditor,
    // Handlers
    handlers::{
        BookDetail, BookListing, GetBookDetailHandler, ListBooksHandler, ListContributorsHandler,
        ListPublishersHandler, OpenPublisherEditorHandler, OpenReviewEditorHandler,
        PublisherEditorContext, ReviewEditorContext, SearchBooksHandler, SearchResults,
    },
};
