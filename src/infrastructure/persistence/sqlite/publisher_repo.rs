//! SQLite Publisher Repository

use async_trait::async_trait;
use sqlx::FromRow;
use uuid::Uuid;

use super::DbPool;
use crate::application::ports::{PublisherRepositoryPort, RepositoryError};
use crate::domain::catalog::{Publisher, PublisherId};

/// SQLite Publisher Repository
pub struct SqlitePublisherRepository {
    pool: DbPool,
}

impl SqlitePublisherRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct PublisherRow {
    id: String,
    name: String,
    website: String,
    email: String,
}

impl TryFrom<PublisherRow> for Publisher {
    type Error = RepositoryError;

    fn try_from(row: PublisherRow) -> Result<Self, Self::Error> {
        let id = Uuid::parse_str(&row.id)
            .map_err(|e| RepositoryError::SerializationError(e.to_string()))?;
        Ok(Publisher::restore(
            PublisherId::from_uuid(id),
            row.name,
            row.website,
            row.email,
        ))
    }
}

#[async_trait]
impl PublisherRepositoryPort for SqlitePublisherRepository {
    async fn save(&self, publisher: &Publisher) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO publishers (id, name, website, email)
            VALUES (?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                website = excluded.website,
                email = excluded.email
            "#,
        )
        .bind(publisher.id().to_string())
        .bind(publisher.name())
        .bind(publisher.website())
        .bind(publisher.email())
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    async fn find_by_id(&self, id: PublisherId) -> Result<Option<Publisher>, RepositoryError> {
        let row: Option<PublisherRow> =
            sqlx::query_as("SELECT id, name, website, email FROM publishers WHERE id = ?")
                .bind(id.to_string())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        row.map(Publisher::try_from).transpose()
    }

    async fn find_all(&self) -> Result<Vec<Publisher>, RepositoryError> {
        let rows: Vec<PublisherRow> =
            sqlx::query_as("SELECT id, name, website, email FROM publishers ORDER BY name, rowid")
                .fetch_all(&self.pool)
                .await
                .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        rows.into_iter().map(Publisher::try_from).collect()
    }

    async fn delete(&self, id: PublisherId) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM publishers WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::persistence::sqlite::test_pool;

    fn packt() -> Publisher {
        Publisher::new(
            "Packt Publishing".to_string(),
            "https://www.packtpub.com".to_string(),
            "info@packtpub.com".to_string(),
        )
    }

    #[tokio::test]
    async fn test_save_and_find() {
        let repo = SqlitePublisherRepository::new(test_pool().await);
        let publisher = packt();
        repo.save(&publisher).await.unwrap();

        let found = repo.find_by_id(publisher.id()).await.unwrap().unwrap();
        assert_eq!(found, publisher);
        assert!(repo.find_by_id(PublisherId::new()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_overwrites_existing() {
        let repo = SqlitePublisherRepository::new(test_pool().await);
        let mut publisher = packt();
        repo.save(&publisher).await.unwrap();

        publisher.update(
            "Packt".to_string(),
            "https://packt.com".to_string(),
            "hello@packt.com".to_string(),
        );
        repo.save(&publisher).await.unwrap();

        let all = repo.find_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].name(), "Packt");
    }

    #[tokio::test]
    async fn test_find_all_ordered_by_name() {
        let repo = SqlitePublisherRepository::new(test_pool().await);
        for name in ["Penguin", "Bloomsbury", "Little, Brown"] {
            repo.save(&Publisher::new(
                name.to_string(),
                "https://example.com".to_string(),
                "x@example.com".to_string(),
            ))
            .await
            .unwrap();
        }
        let names: Vec<String> = repo
            .find_all()
            .await
            .unwrap()
            .iter()
            .map(|p| p.name().to_string())
            .collect();
        assert_eq!(names, vec!["Bloomsbury", "Little, Brown", "Penguin"]);
    }
}
