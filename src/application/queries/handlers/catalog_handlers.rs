//! Catalog Query Handlers

use std::collections::HashSet;
use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::forms::{FormErrors, SearchMode};
use crate::application::ports::{
    BookContribution, BookRepositoryPort, ContributorRepositoryPort, Notification,
    NotificationPort, PublisherRepositoryPort, ReviewRepositoryPort,
};
use crate::application::queries::{
    GetBookDetail, ListBooks, ListContributors, ListPublishers, SearchBooks,
};
use crate::domain::average_rating;
use crate::domain::catalog::{Book, Contributor, Publisher};
use crate::domain::review::Review;

// ============================================================================
// Response DTOs
// ============================================================================

/// 图书列表项
#[derive(Debug, Clone)]
pub struct BookListing {
    pub book: Book,
    /// 平均评分，无书评时为空
    pub rating: Option<f64>,
    pub number_of_reviews: usize,
}

/// 图书详情
#[derive(Debug, Clone)]
pub struct BookDetail {
    pub book: Book,
    pub publisher: Option<Publisher>,
    pub contributions: Vec<BookContribution>,
    pub reviews: Vec<Review>,
    pub rating: Option<f64>,
    pub messages: Vec<Notification>,
}

/// 搜索结果
#[derive(Debug, Clone, Default)]
pub struct SearchResults {
    /// 原样回显的搜索词
    pub search_text: String,
    pub books: Vec<Book>,
    pub errors: FormErrors,
}

fn ratings_of(reviews: &[Review]) -> Vec<i32> {
    reviews.iter().map(Review::rating).collect()
}

// ============================================================================
// Handlers
// ============================================================================

/// ListBooks Handler
pub struct ListBooksHandler {
    book_repo: Arc<dyn BookRepositoryPort>,
    review_repo: Arc<dyn ReviewRepositoryPort>,
}

impl ListBooksHandler {
    pub fn new(
        book_repo: Arc<dyn BookRepositoryPort>,
        review_repo: Arc<dyn ReviewRepositoryPort>,
    ) -> Self {
        Self {
            book_repo,
            review_repo,
        }
    }

    pub async fn handle(&self, _query: ListBooks) -> Result<Vec<BookListing>, ApplicationError> {
        let books = self.book_repo.find_all().await?;
        let mut listings = Vec::with_capacity(books.len());

        for book in books {
            let reviews = self.review_repo.find_by_book(book.id()).await?;
            listings.push(BookListing {
                rating: average_rating(&ratings_of(&reviews)),
                number_of_reviews: reviews.len(),
                book,
            });
        }

        tracing::debug!(count = listings.len(), "Books listed");
        Ok(listings)
    }
}

/// GetBookDetail Handler
pub struct GetBookDetailHandler {
    book_repo: Arc<dyn BookRepositoryPort>,
    publisher_repo: Arc<dyn PublisherRepositoryPort>,
    review_repo: Arc<dyn ReviewRepositoryPort>,
    notifier: Arc<dyn NotificationPort>,
}

impl GetBookDetailHandler {
    pub fn new(
        book_repo: Arc<dyn BookRepositoryPort>,
        publisher_repo: Arc<dyn PublisherRepositoryPort>,
        review_repo: Arc<dyn ReviewRepositoryPort>,
        notifier: Arc<dyn NotificationPort>,
    ) -> Self {
        Self {
            book_repo,
            publisher_repo,
            review_repo,
            notifier,
        }
    }

    pub async fn handle(&self, query: GetBookDetail) -> Result<BookDetail, ApplicationError> {
        let book = self
            .book_repo
            .find_by_id(query.book_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Book", query.book_id))?;

        let publisher = self.publisher_repo.find_by_id(book.publisher_id()).await?;
        let contributions = self.book_repo.find_contributions(book.id()).await?;
        let reviews = self.review_repo.find_by_book(book.id()).await?;
        let rating = average_rating(&ratings_of(&reviews));

        Ok(BookDetail {
            book,
            publisher,
            contributions,
            reviews,
            rating,
            messages: self.notifier.drain(&query.request_key),
        })
    }
}

/// SearchBooks Handler
pub struct SearchBooksHandler {
    book_repo: Arc<dyn BookRepositoryPort>,
    contributor_repo: Arc<dyn ContributorRepositoryPort>,
}

impl SearchBooksHandler {
    pub fn new(
        book_repo: Arc<dyn BookRepositoryPort>,
        contributor_repo: Arc<dyn ContributorRepositoryPort>,
    ) -> Self {
        Self {
            book_repo,
            contributor_repo,
        }
    }

    /// 无效的搜索参数不是错误：返回空结果并附带表单错误
    pub async fn handle(&self, query: SearchBooks) -> Result<SearchResults, ApplicationError> {
        let search_text = query.form.search.clone().unwrap_or_default();

        let criteria = match query.form.validate() {
            Ok(Some(criteria)) => criteria,
            Ok(None) => {
                return Ok(SearchResults {
                    search_text,
                    ..Default::default()
                })
            }
            Err(errors) => {
                return Ok(SearchResults {
                    search_text,
                    books: Vec::new(),
                    errors,
                })
            }
        };

        let candidates = match criteria.mode {
            SearchMode::Title => self.book_repo.search_by_title(&criteria.text).await?,
            SearchMode::Contributor => {
                let contributors = self.contributor_repo.search_by_name(&criteria.text).await?;
                let mut books = Vec::new();
                for contributor in &contributors {
                    books.extend(self.book_repo.find_by_contributor(contributor.id()).await?);
                }
                books
            }
        };

        // 多个贡献者可能指向同一本书，按首次出现去重
        let mut seen = HashSet::new();
        let books: Vec<Book> = candidates
            .into_iter()
            .filter(|book| seen.insert(book.id()))
            .collect();

        tracing::debug!(
            text = %criteria.text,
            mode = criteria.mode.as_str(),
            results = books.len(),
            "Book search"
        );

        Ok(SearchResults {
            search_text,
            books,
            errors: FormErrors::new(),
        })
    }
}

/// ListPublishers Handler
pub struct ListPublishersHandler {
    publisher_repo: Arc<dyn PublisherRepositoryPort>,
}

impl ListPublishersHandler {
    pub fn new(publisher_repo: Arc<dyn PublisherRepositoryPort>) -> Self {
        Self { publisher_repo }
    }

    pub async fn handle(&self, _query: ListPublishers) -> Result<Vec<Publisher>, ApplicationError> {
        Ok(self.publisher_repo.find_all().await?)
    }
}

/// ListContributors Handler
pub struct ListContributorsHandler {
    contributor_repo: Arc<dyn ContributorRepositoryPort>,
}

impl ListContributorsHandler {
    pub fn new(contributor_repo: Arc<dyn ContributorRepositoryPort>) -> Self {
        Self { contributor_repo }
    }

    pub async fn handle(
        &self,
        _query: ListContributors,
    ) -> Result<Vec<Contributor>, ApplicationError> {
        Ok(self.contributor_repo.find_all().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::forms::SearchForm;
    use crate::domain::catalog::{BookContributor, ContributorRole};
    use crate::domain::review::CreatorRef;
    use crate::infrastructure::memory::InMemoryFlashStore;
    use crate::infrastructure::persistence::sqlite::{
        test_pool, SqliteBookRepository, SqliteContributorRepository, SqlitePublisherRepository,
        SqliteReviewRepository,
    };
    use chrono::NaiveDate;

    struct Catalog {
        books: Arc<SqliteBookRepository>,
        contributors: Arc<SqliteContributorRepository>,
        publishers: Arc<SqlitePublisherRepository>,
        reviews: Arc<SqliteReviewRepository>,
        publisher: Publisher,
    }

    impl Catalog {
        async fn new() -> Self {
            let pool = test_pool().await;
            let catalog = Self {
                books: Arc::new(SqliteBookRepository::new(pool.clone())),
                contributors: Arc::new(SqliteContributorRepository::new(pool.clone())),
                publishers: Arc::new(SqlitePublisherRepository::new(pool.clone())),
                reviews: Arc::new(SqliteReviewRepository::new(pool)),
                publisher: Publisher::new(
                    "Bloomsbury".to_string(),
                    "https://www.bloomsbury.com".to_string(),
                    "contact@bloomsbury.com".to_string(),
                ),
            };
            catalog.publishers.save(&catalog.publisher).await.unwrap();
            catalog
        }

        async fn book(&self, title: &str) -> Book {
            let book = Book::new(
                title.to_string(),
                NaiveDate::from_ymd_opt(1997, 6, 26).unwrap(),
                "9780747532699".to_string(),
                self.publisher.id(),
            );
            self.books.save(&book).await.unwrap();
            book
        }

        async fn contributor(&self, first: &str, last: &str) -> Contributor {
            let contributor = Contributor::new(
                first.to_string(),
                last.to_string(),
                format!("{}@example.com", first.to_lowercase()),
            );
            self.contributors.save(&contributor).await.unwrap();
            contributor
        }

        async fn link(&self, book: &Book, contributor: &Contributor, role: ContributorRole) {
            self.books
                .add_contributor(&BookContributor::new(book.id(), contributor.id(), role))
                .await
                .unwrap();
        }

        async fn review(&self, book: &Book, rating: i32) {
            let review = Review::new(book.id(), CreatorRef::new("reader"), "Worth reading.".to_string(), rating);
            self.reviews.save(&review).await.unwrap();
        }

        fn search_handler(&self) -> SearchBooksHandler {
            SearchBooksHandler::new(self.books.clone(), self.contributors.clone())
        }
    }

    async fn search(catalog: &Catalog, text: &str, mode: &str) -> SearchResults {
        catalog
            .search_handler()
            .handle(SearchBooks {
                form: SearchForm::new(text, mode),
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_listing_rating_and_count() {
        let catalog = Catalog::new().await;
        let reviewed = catalog.book("Reviewed").await;
        catalog.book("Unreviewed").await;
        catalog.review(&reviewed, 4).await;
        catalog.review(&reviewed, 5).await;

        let handler = ListBooksHandler::new(catalog.books.clone(), catalog.reviews.clone());
        let listings = handler.handle(ListBooks).await.unwrap();

        assert_eq!(listings.len(), 2);
        assert_eq!(listings[0].book.title(), "Reviewed");
        assert_eq!(listings[0].rating, Some(4.5));
        assert_eq!(listings[0].number_of_reviews, 2);
        assert_eq!(listings[1].rating, None);
        assert_eq!(listings[1].number_of_reviews, 0);
    }

    #[tokio::test]
    async fn test_detail_collects_everything_and_drains_messages() {
        let catalog = Catalog::new().await;
        let book = catalog.book("Harry Potter").await;
        let author = catalog.contributor("Joanne", "Rowling").await;
        catalog.link(&book, &author, ContributorRole::Author).await;
        catalog.review(&book, 3).await;

        let flash = Arc::new(InMemoryFlashStore::new());
        flash.push("session-1", Notification::success("Review for \"Harry Potter\" created."));
        let handler = GetBookDetailHandler::new(
            catalog.books.clone(),
            catalog.publishers.clone(),
            catalog.reviews.clone(),
            flash.clone(),
        );

        let detail = handler
            .handle(GetBookDetail {
                book_id: book.id(),
                request_key: "session-1".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(detail.publisher.as_ref().map(Publisher::name), Some("Bloomsbury"));
        assert_eq!(detail.contributions.len(), 1);
        assert_eq!(detail.reviews.len(), 1);
        assert_eq!(detail.rating, Some(3.0));
        assert_eq!(detail.messages.len(), 1);
        assert!(flash.drain("session-1").is_empty());
    }

    #[tokio::test]
    async fn test_detail_of_unknown_book() {
        let catalog = Catalog::new().await;
        let handler = GetBookDetailHandler::new(
            catalog.books.clone(),
            catalog.publishers.clone(),
            catalog.reviews.clone(),
            Arc::new(InMemoryFlashStore::new()),
        );
        let err = handler
            .handle(GetBookDetail {
                book_id: crate::domain::catalog::BookId::new(),
                request_key: "anonymous".to_string(),
            })
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_title_search_is_case_insensitive() {
        let catalog = Catalog::new().await;
        catalog.book("Harry Potter").await;
        catalog.book("The Hobbit").await;

        let results = search(&catalog, "HARRY", "title").await;
        assert_eq!(results.search_text, "HARRY");
        assert_eq!(results.books.len(), 1);
        assert_eq!(results.books[0].title(), "Harry Potter");
    }

    #[tokio::test]
    async fn test_short_search_returns_nothing() {
        let catalog = Catalog::new().await;
        catalog.book("Harry Potter").await;

        let results = search(&catalog, "Ha", "title").await;
        assert!(results.books.is_empty());
        assert!(results.errors.has("search"));

        let results = search(&catalog, "", "").await;
        assert!(results.books.is_empty());
        assert!(results.errors.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_mode_is_rejected() {
        let catalog = Catalog::new().await;
        catalog.book("Harry Potter").await;

        let results = search(&catalog, "Harry", "isbn").await;
        assert!(results.books.is_empty());
        assert!(results.errors.has("search_in"));
    }

    #[tokio::test]
    async fn test_contributor_search_dedupes_books() {
        let catalog = Catalog::new().await;
        let book = catalog.book("Good Omens").await;
        let other = catalog.book("Mort").await;
        catalog.book("Unrelated").await;
        let pratchett = catalog.contributor("Terry", "Pratchett").await;
        let jones = catalog.contributor("Terry", "Jones").await;
        catalog.link(&book, &pratchett, ContributorRole::Author).await;
        catalog.link(&book, &pratchett, ContributorRole::Editor).await;
        catalog.link(&book, &jones, ContributorRole::CoAuthor).await;
        catalog.link(&other, &pratchett, ContributorRole::Author).await;

        let results = search(&catalog, "terry", "contributor").await;
        let ids: Vec<_> = results.books.iter().map(Book::id).collect();
        assert_eq!(ids, vec![book.id(), other.id()]);

        let results = search(&catalog, "jones", "contributor").await;
        assert_eq!(results.books.len(), 1);
        assert_eq!(results.books[0].id(), book.id());
    }
}
