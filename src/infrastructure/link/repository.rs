//! PostgreSQL link repository implementation

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::group::GroupId;
use crate::domain::link::{Link, LinkId, LinkRepository};
use crate::domain::{DomainError, UserId};

/// PostgreSQL implementation of LinkRepository
#[derive(Debug, Clone)]
pub struct PostgresLinkRepository {
    pool: PgPool,
}

impl PostgresLinkRepository {
    /// Create a new repository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LinkRepository for PostgresLinkRepository {
    async fn create(&self, link: &Link) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO links (id, group_id, url, title, comment, created_by, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(link.id().as_uuid())
        .bind(link.group_id().as_uuid())
        .bind(link.url())
        .bind(link.title())
        .bind(link.comment())
        .bind(link.created_by().as_str())
        .bind(link.created_at())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to create link: {}", e)))?;

        Ok(())
    }

    async fn get(&self, id: &LinkId) -> Result<Option<Link>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, group_id, url, title, comment, created_by, created_at
            FROM links
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to get link: {}", e)))?;

        match row {
            Some(row) => Ok(Some(row_to_link(&row)?)),
            None => Ok(None),
        }
    }

    async fn list_by_group(&self, group: &GroupId) -> Result<Vec<Link>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, group_id, url, title, comment, created_by, created_at
            FROM links
            WHERE group_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(group.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to list links: {}", e)))?;

        let mut links = Vec::with_capacity(rows.len());

        for row in rows {
            links.push(row_to_link(&row)?);
        }

        Ok(links)
    }

    async fn update(&self, link: &Link) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE links
            SET url = $2, title = $3, comment = $4
            WHERE id = $1
            "#,
        )
        .bind(link.id().as_uuid())
        .bind(link.url())
        .bind(link.title())
        .bind(link.comment())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to update link: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(format!(
                "Link '{}' not found",
                link.id()
            )));
        }

        Ok(())
    }

    async fn delete(&self, id: &LinkId) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM links WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to delete link: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }
}

fn row_to_link(row: &sqlx::postgres::PgRow) -> Result<Link, DomainError> {
    let id: uuid::Uuid = row.get("id");
    let group_id: uuid::Uuid = row.get("group_id");
    let url: String = row.get("url");
    let title: Option<String> = row.get("title");
    let comment: Option<String> = row.get("comment");
    let created_by: String = row.get("created_by");
    let created_at: chrono::DateTime<chrono::Utc> = row.get("created_at");

    let created_by = UserId::new(created_by)
        .map_err(|e| DomainError::storage(format!("Invalid poster ID in database: {}", e)))?;

    Ok(Link::from_parts(
        LinkId::from(id),
        GroupId::from(group_id),
        url,
        title,
        comment,
        created_by,
        created_at,
    ))
}
