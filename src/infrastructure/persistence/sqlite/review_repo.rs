//! SQLite Review Repository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use super::DbPool;
use crate::application::ports::{RepositoryError, ReviewRepositoryPort};
use crate::domain::catalog::BookId;
use crate::domain::review::{CreatorRef, Review, ReviewId};

/// SQLite Review Repository
pub struct SqliteReviewRepository {
    pool: DbPool,
}

impl SqliteReviewRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct ReviewRow {
    id: String,
    book_id: String,
    creator: String,
    content: String,
    rating: i64,
    created_at: String,
    edited_at: Option<String>,
}

fn parse_timestamp(s: &str) -> Result<DateTime<Utc>, RepositoryError> {
    DateTime::parse_from_rfc3339(s)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| RepositoryError::SerializationError(e.to_string()))
}

impl TryFrom<ReviewRow> for Review {
    type Error = RepositoryError;

    fn try_from(row: ReviewRow) -> Result<Self, Self::Error> {
        let id = Uuid::parse_str(&row.id)
            .map_err(|e| RepositoryError::SerializationError(e.to_string()))?;
        let book_id = Uuid::parse_str(&row.book_id)
            .map_err(|e| RepositoryError::SerializationError(e.to_string()))?;
        let rating = i32::try_from(row.rating)
            .map_err(|e| RepositoryError::SerializationError(e.to_string()))?;
        Ok(Review::restore(
            ReviewId::from_uuid(id),
            BookId::from_uuid(book_id),
            CreatorRef::new(row.creator),
            row.content,
            rating,
            parse_timestamp(&row.created_at)?,
            row.edited_at.as_deref().map(parse_timestamp).transpose()?,
        ))
    }
}

#[async_trait]
impl ReviewRepositoryPort for SqliteReviewRepository {
    async fn save(&self, review: &Review) -> Result<(), RepositoryError> {
        // created_at 只在插入时写入
        sqlx::query(
            r#"
            INSERT INTO reviews (id, book_id, creator, content, rating, created_at, edited_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                book_id = excluded.book_id,
                creator = excluded.creator,
                content = excluded.content,
                rating = excluded.rating,
                edited_at = excluded.edited_at
            "#,
        )
        .bind(review.id().to_string())
        .bind(review.book_id().to_string())
        .bind(review.creator().as_str())
        .bind(review.content())
        .bind(i64::from(review.rating()))
        .bind(review.created_at().to_rfc3339())
        .bind(review.edited_at().map(|t| t.to_rfc3339()))
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    async fn find_for_book(
        &self,
        book_id: BookId,
        review_id: ReviewId,
    ) -> Result<Option<Review>, RepositoryError> {
        let row: Option<ReviewRow> = sqlx::query_as(
            r#"
            SELECT id, book_id, creator, content, rating, created_at, edited_at
            FROM reviews WHERE id = ? AND book_id = ?
            "#,
        )
        .bind(review_id.to_string())
        .bind(book_id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        row.map(Review::try_from).transpose()
    }

    async fn find_by_book(&self, book_id: BookId) -> Result<Vec<Review>, RepositoryError> {
        let rows: Vec<ReviewRow> = sqlx::query_as(
            r#"
            SELECT id, book_id, creator, content, rating, created_at, edited_at
            FROM reviews WHERE book_id = ?
            ORDER BY created_at, rowid
            "#,
        )
        .bind(book_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        rows.into_iter().map(Review::try_from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{BookRepositoryPort, PublisherRepositoryPort};
    use crate::domain::catalog::{Book, Publisher};
    use crate::infrastructure::persistence::sqlite::{
        test_pool, SqliteBookRepository, SqlitePublisherRepository,
    };
    use chrono::NaiveDate;

    async fn setup() -> (SqliteReviewRepository, SqliteBookRepository, Book) {
        let pool = test_pool().await;
        let publishers = SqlitePublisherRepository::new(pool.clone());
        let books = SqliteBookRepository::new(pool.clone());
        let publisher = Publisher::new(
            "Little, Brown".to_string(),
            "https://www.littlebrown.com".to_string(),
            "info@littlebrown.com".to_string(),
        );
        publishers.save(&publisher).await.unwrap();
        let book = Book::new(
            "The Catcher in the Rye".to_string(),
            NaiveDate::from_ymd_opt(1951, 7, 16).unwrap(),
            "9780316769174".to_string(),
            publisher.id(),
        );
        books.save(&book).await.unwrap();
        (SqliteReviewRepository::new(pool), books, book)
    }

    #[tokio::test]
    async fn test_roundtrip_preserves_timestamps() {
        let (reviews, _, book) = setup().await;
        let mut review = Review::new(book.id(), CreatorRef::new("alice"), "Classic.".to_string(), 5);
        reviews.save(&review).await.unwrap();

        let stored = reviews.find_for_book(book.id(), review.id()).await.unwrap().unwrap();
        assert_eq!(stored, review);
        assert!(stored.edited_at().is_none());

        review.revise(CreatorRef::new("alice"), "Still a classic.".to_string(), 4);
        reviews.save(&review).await.unwrap();
        let stored = reviews.find_for_book(book.id(), review.id()).await.unwrap().unwrap();
        assert_eq!(stored.edited_at(), review.edited_at());
        assert_eq!(stored.created_at(), review.created_at());
    }

    #[tokio::test]
    async fn test_find_for_book_checks_ownership() {
        let (reviews, _, book) = setup().await;
        let review = Review::new(book.id(), CreatorRef::new("bob"), "Meh.".to_string(), 2);
        reviews.save(&review).await.unwrap();

        assert!(reviews
            .find_for_book(BookId::new(), review.id())
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_rating_is_not_range_checked_in_storage() {
        let (reviews, _, book) = setup().await;
        let review = Review::new(book.id(), CreatorRef::new("carol"), "Off the charts".to_string(), 11);
        reviews.save(&review).await.unwrap();
        let stored = reviews.find_by_book(book.id()).await.unwrap();
        assert_eq!(stored[0].rating(), 11);
    }

    #[tokio::test]
    async fn test_deleting_book_cascades_to_reviews() {
        let (reviews, books, book) = setup().await;
        reviews
            .save(&Review::new(book.id(), CreatorRef::new("dave"), "Gone soon".to_string(), 3))
            .await
            .unwrap();
        books.delete(book.id()).await.unwrap();
        assert!(reviews.find_by_book(book.id()).await.unwrap().is_empty());
    }
}
