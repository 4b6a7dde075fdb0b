//! PostgreSQL group repository implementation

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::group::{Group, GroupId, GroupRepository};
use crate::domain::{DomainError, UserId};

/// PostgreSQL implementation of GroupRepository
#[derive(Debug, Clone)]
pub struct PostgresGroupRepository {
    pool: PgPool,
}

impl PostgresGroupRepository {
    /// Create a new repository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GroupRepository for PostgresGroupRepository {
    async fn create(&self, group: &Group) -> Result<(), DomainError> {
        // Group row and creator membership commit together; a group is
        // never observable without its creator as a member
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::storage(format!("Failed to begin transaction: {}", e)))?;

        sqlx::query(
            r#"
            INSERT INTO groups (id, name, created_by, created_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(group.id().as_uuid())
        .bind(group.name())
        .bind(group.created_by().as_str())
        .bind(group.created_at())
        .execute(&mut *tx)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to create group: {}", e)))?;

        sqlx::query(
            r#"
            INSERT INTO group_members (group_id, user_id)
            VALUES ($1, $2)
            "#,
        )
        .bind(group.id().as_uuid())
        .bind(group.created_by().as_str())
        .execute(&mut *tx)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to add creator membership: {}", e)))?;

        tx.commit()
            .await
            .map_err(|e| DomainError::storage(format!("Failed to commit group creation: {}", e)))
    }

    async fn get(&self, id: &GroupId) -> Result<Option<Group>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, name, created_by, created_at
            FROM groups
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to get group: {}", e)))?;

        match row {
            Some(row) => Ok(Some(row_to_group(&row)?)),
            None => Ok(None),
        }
    }

    async fn list_for_user(&self, user: &UserId) -> Result<Vec<Group>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT g.id, g.name, g.created_by, g.created_at
            FROM groups g
            JOIN group_members m ON m.group_id = g.id
            WHERE m.user_id = $1
            ORDER BY g.created_at
            "#,
        )
        .bind(user.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to list groups: {}", e)))?;

        let mut groups = Vec::with_capacity(rows.len());

        for row in rows {
            groups.push(row_to_group(&row)?);
        }

        Ok(groups)
    }

    async fn delete(&self, id: &GroupId) -> Result<bool, DomainError> {
        // Memberships, invites and links go with the group via FK cascade
        let result = sqlx::query("DELETE FROM groups WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to delete group: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }
}

fn row_to_group(row: &sqlx::postgres::PgRow) -> Result<Group, DomainError> {
    let id: uuid::Uuid = row.get("id");
    let name: String = row.get("name");
    let created_by: String = row.get("created_by");
    let created_at: chrono::DateTime<chrono::Utc> = row.get("created_at");

    let created_by = UserId::new(created_by)
        .map_err(|e| DomainError::storage(format!("Invalid creator ID in database: {}", e)))?;

    Ok(Group::from_parts(
        GroupId::from(id),
        name,
        created_by,
        created_at,
    ))
}
