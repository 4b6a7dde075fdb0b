//! PostgreSQL membership repository implementation

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::group::GroupId;
use crate::domain::membership::{Membership, MembershipRepository};
use crate::domain::{DomainError, UserId};

/// PostgreSQL implementation of MembershipRepository.
///
/// `is_member` is a point query against current state on every call; no
/// caching, by contract.
#[derive(Debug, Clone)]
pub struct PostgresMembershipRepository {
    pool: PgPool,
}

impl PostgresMembershipRepository {
    /// Create a new repository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MembershipRepository for PostgresMembershipRepository {
    async fn add(&self, membership: &Membership) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO group_members (group_id, user_id)
            VALUES ($1, $2)
            "#,
        )
        .bind(membership.group_id().as_uuid())
        .bind(membership.user_id().as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            let msg = e.to_string();

            if msg.contains("duplicate key") || msg.contains("unique constraint") {
                DomainError::conflict(format!(
                    "User '{}' is already a member of group '{}'",
                    membership.user_id(),
                    membership.group_id()
                ))
            } else {
                DomainError::storage(format!("Failed to add membership: {}", e))
            }
        })?;

        Ok(())
    }

    async fn is_member(&self, user: &UserId, group: &GroupId) -> Result<bool, DomainError> {
        sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM group_members
                WHERE group_id = $1 AND user_id = $2
            )
            "#,
        )
        .bind(group.as_uuid())
        .bind(user.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to check membership: {}", e)))
    }

    async fn list_for_group(&self, group: &GroupId) -> Result<Vec<UserId>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT user_id
            FROM group_members
            WHERE group_id = $1
            ORDER BY created_at
            "#,
        )
        .bind(group.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to list members: {}", e)))?;

        let mut members = Vec::with_capacity(rows.len());

        for row in rows {
            let user_id: String = row.get("user_id");
            members.push(UserId::new(user_id).map_err(|e| {
                DomainError::storage(format!("Invalid member ID in database: {}", e))
            })?);
        }

        Ok(members)
    }
}
