//! SQLite Contributor Repository

use async_trait::async_trait;
use sqlx::FromRow;
use uuid::Uuid;

use super::{CaseInsensitiveMatcher, DbPool};
use crate::application::ports::{ContributorRepositoryPort, RepositoryError};
use crate::domain::catalog::{Contributor, ContributorId};

/// SQLite Contributor Repository
pub struct SqliteContributorRepository {
    pool: DbPool,
}

impl SqliteContributorRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
pub(super) struct ContributorRow {
    pub(super) id: String,
    pub(super) first_names: String,
    pub(super) last_names: String,
    pub(super) email: String,
}

impl TryFrom<ContributorRow> for Contributor {
    type Error = RepositoryError;

    fn try_from(row: ContributorRow) -> Result<Self, Self::Error> {
        let id = Uuid::parse_str(&row.id)
            .map_err(|e| RepositoryError::SerializationError(e.to_string()))?;
        Ok(Contributor::restore(
            ContributorId::from_uuid(id),
            row.first_names,
            row.last_names,
            row.email,
        ))
    }
}

#[async_trait]
impl ContributorRepositoryPort for SqliteContributorRepository {
    async fn save(&self, contributor: &Contributor) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO contributors (id, first_names, last_names, email)
            VALUES (?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                first_names = excluded.first_names,
                last_names = excluded.last_names,
                email = excluded.email
            "#,
        )
        .bind(contributor.id().to_string())
        .bind(contributor.first_names())
        .bind(contributor.last_names())
        .bind(contributor.email())
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    async fn find_by_id(&self, id: ContributorId) -> Result<Option<Contributor>, RepositoryError> {
        let row: Option<ContributorRow> = sqlx::query_as(
            "SELECT id, first_names, last_names, email FROM contributors WHERE id = ?",
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        row.map(Contributor::try_from).transpose()
    }

    async fn find_all(&self) -> Result<Vec<Contributor>, RepositoryError> {
        let rows: Vec<ContributorRow> = sqlx::query_as(
            "SELECT id, first_names, last_names, email FROM contributors ORDER BY last_names, first_names",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        rows.into_iter().map(Contributor::try_from).collect()
    }

    async fn search_by_name(&self, text: &str) -> Result<Vec<Contributor>, RepositoryError> {
        let rows: Vec<ContributorRow> = sqlx::query_as(
            "SELECT id, first_names, last_names, email FROM contributors ORDER BY rowid",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        let matcher = CaseInsensitiveMatcher::new(text);
        rows.into_iter()
            .filter(|row| matcher.matches(&row.first_names) || matcher.matches(&row.last_names))
            .map(Contributor::try_from)
            .collect()
    }
}
