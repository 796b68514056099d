//! SQLite Book Repository

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::FromRow;
use uuid::Uuid;

use super::contributor_repo::ContributorRow;
use super::{CaseInsensitiveMatcher, DbPool};
use crate::application::ports::{BookContribution, BookRepositoryPort, RepositoryError};
use crate::domain::catalog::{
    Book, BookContributor, BookContributorId, BookId, Contributor, ContributorId, ContributorRole,
    PublisherId,
};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// SQLite Book Repository
pub struct SqliteBookRepository {
    pool: DbPool,
}

impl SqliteBookRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn parse_uuid(s: &str) -> Result<Uuid, RepositoryError> {
    Uuid::parse_str(s).map_err(|e| RepositoryError::SerializationError(e.to_string()))
}

#[derive(FromRow)]
struct BookRow {
    id: String,
    title: String,
    publication_date: String,
    isbn: String,
    publisher_id: String,
}

impl TryFrom<BookRow> for Book {
    type Error = RepositoryError;

    fn try_from(row: BookRow) -> Result<Self, Self::Error> {
        Ok(Book::restore(
            BookId::from_uuid(parse_uuid(&row.id)?),
            row.title,
            NaiveDate::parse_from_str(&row.publication_date, DATE_FORMAT)
                .map_err(|e| RepositoryError::SerializationError(e.to_string()))?,
            row.isbn,
            PublisherId::from_uuid(parse_uuid(&row.publisher_id)?),
        ))
    }
}

#[derive(FromRow)]
struct ContributionRow {
    link_id: String,
    book_id: String,
    role: String,
    #[sqlx(flatten)]
    contributor: ContributorRow,
}

impl TryFrom<ContributionRow> for BookContribution {
    type Error = RepositoryError;

    fn try_from(row: ContributionRow) -> Result<Self, Self::Error> {
        let contributor = Contributor::try_from(row.contributor)?;
        let role = ContributorRole::parse(&row.role)
            .map_err(|e| RepositoryError::SerializationError(e.to_string()))?;
        let link = BookContributor::restore(
            BookContributorId::from_uuid(parse_uuid(&row.link_id)?),
            BookId::from_uuid(parse_uuid(&row.book_id)?),
            contributor.id(),
            role,
        );
        Ok(BookContribution { link, contributor })
    }
}

#[async_trait]
impl BookRepositoryPort for SqliteBookRepository {
    async fn save(&self, book: &Book) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO books (id, title, publication_date, isbn, publisher_id)
            VALUES (?, ?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                title = excluded.title,
                publication_date = excluded.publication_date,
                isbn = excluded.isbn,
                publisher_id = excluded.publisher_id
            "#,
        )
        .bind(book.id().to_string())
        .bind(book.title())
        .bind(book.publication_date().format(DATE_FORMAT).to_string())
        .bind(book.isbn())
        .bind(book.publisher_id().to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    async fn find_by_id(&self, id: BookId) -> Result<Option<Book>, RepositoryError> {
        let row: Option<BookRow> = sqlx::query_as(
            "SELECT id, title, publication_date, isbn, publisher_id FROM books WHERE id = ?",
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        row.map(Book::try_from).transpose()
    }

    async fn find_all(&self) -> Result<Vec<Book>, RepositoryError> {
        let rows: Vec<BookRow> = sqlx::query_as(
            "SELECT id, title, publication_date, isbn, publisher_id FROM books ORDER BY rowid",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        rows.into_iter().map(Book::try_from).collect()
    }

    async fn delete(&self, id: BookId) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM books WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    async fn search_by_title(&self, text: &str) -> Result<Vec<Book>, RepositoryError> {
        let rows: Vec<BookRow> = sqlx::query_as(
            r#"
            SELECT id, title, publication_date, isbn, publisher_id FROM books
            ORDER BY rowid
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        let matcher = CaseInsensitiveMatcher::new(text);
        rows.into_iter()
            .filter(|row| matcher.matches(&row.title))
            .map(Book::try_from)
            .collect()
    }

    async fn find_by_contributor(
        &self,
        contributor_id: ContributorId,
    ) -> Result<Vec<Book>, RepositoryError> {
        // 同一贡献者可能以多个角色关联同一本书，这里按书去重
        let rows: Vec<BookRow> = sqlx::query_as(
            r#"
            SELECT b.id, b.title, b.publication_date, b.isbn, b.publisher_id FROM books b
            WHERE b.id IN (SELECT book_id FROM book_contributors WHERE contributor_id = ?)
            ORDER BY b.rowid
            "#,
        )
        .bind(contributor_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        rows.into_iter().map(Book::try_from).collect()
    }

    async fn add_contributor(&self, link: &BookContributor) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO book_contributors (id, book_id, contributor_id, role)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(link.id().to_string())
        .bind(link.book_id().to_string())
        .bind(link.contributor_id().to_string())
        .bind(link.role().as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                RepositoryError::Duplicate(link.id().to_string())
            }
            other => RepositoryError::DatabaseError(other.to_string()),
        })?;

        Ok(())
    }

    async fn find_contributions(
        &self,
        book_id: BookId,
    ) -> Result<Vec<BookContribution>, RepositoryError> {
        let rows: Vec<ContributionRow> = sqlx::query_as(
            r#"
            SELECT bc.id AS link_id, bc.book_id, bc.role,
                   c.id, c.first_names, c.last_names, c.email
            FROM book_contributors bc
            JOIN contributors c ON c.id = bc.contributor_id
            WHERE bc.book_id = ?
            ORDER BY bc.rowid
            "#,
        )
        .bind(book_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        rows.into_iter().map(BookContribution::try_from).collect()
    }
}
