//! PostgreSQL invite repository implementation

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::group::GroupId;
use crate::domain::invite::{Invite, InviteCode, InviteRepository, RedeemOutcome};
use crate::domain::{DomainError, UserId};

/// PostgreSQL implementation of InviteRepository.
///
/// Redemption is a single conditional `UPDATE ... WHERE used_by IS NULL`
/// plus the membership insert inside one transaction. Two processes
/// racing on the same code serialize on that row update; the loser
/// matches zero rows and never reaches the insert.
#[derive(Debug, Clone)]
pub struct PostgresInviteRepository {
    pool: PgPool,
}

impl PostgresInviteRepository {
    /// Create a new repository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InviteRepository for PostgresInviteRepository {
    async fn create(&self, invite: &Invite) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO invites (code, group_id, created_at)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(invite.code().as_str())
        .bind(invite.group_id().as_uuid())
        .bind(invite.created_at())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            let msg = e.to_string();

            if msg.contains("duplicate key") || msg.contains("unique constraint") {
                DomainError::conflict(format!(
                    "Invite code '{}' already exists",
                    invite.code()
                ))
            } else {
                DomainError::storage(format!("Failed to create invite: {}", e))
            }
        })?;

        Ok(())
    }

    async fn get(&self, code: &InviteCode) -> Result<Option<Invite>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT code, group_id, used_by, created_at
            FROM invites
            WHERE code = $1
            "#,
        )
        .bind(code.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to get invite: {}", e)))?;

        match row {
            Some(row) => Ok(Some(row_to_invite(&row)?)),
            None => Ok(None),
        }
    }

    async fn redeem(
        &self,
        code: &InviteCode,
        user: &UserId,
    ) -> Result<RedeemOutcome, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::storage(format!("Failed to begin transaction: {}", e)))?;

        // The linearization point: only one transaction can match the
        // unused row
        let row = sqlx::query(
            r#"
            UPDATE invites
            SET used_by = $1
            WHERE code = $2 AND used_by IS NULL
            RETURNING group_id
            "#,
        )
        .bind(user.as_str())
        .bind(code.as_str())
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to redeem invite: {}", e)))?;

        let Some(row) = row else {
            // Lost the race or the code was consumed earlier
            return Ok(RedeemOutcome::AlreadyUsed);
        };

        let group_id: uuid::Uuid = row.get("group_id");

        sqlx::query(
            r#"
            INSERT INTO group_members (group_id, user_id)
            VALUES ($1, $2)
            "#,
        )
        .bind(group_id)
        .bind(user.as_str())
        .execute(&mut *tx)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to add redeemed membership: {}", e)))?;

        tx.commit()
            .await
            .map_err(|e| DomainError::storage(format!("Failed to commit redemption: {}", e)))?;

        Ok(RedeemOutcome::Redeemed(GroupId::from(group_id)))
    }

    async fn list_by_group(&self, group: &GroupId) -> Result<Vec<Invite>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT code, group_id, used_by, created_at
            FROM invites
            WHERE group_id = $1
            ORDER BY created_at
            "#,
        )
        .bind(group.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to list invites: {}", e)))?;

        let mut invites = Vec::with_capacity(rows.len());

        for row in rows {
            invites.push(row_to_invite(&row)?);
        }

        Ok(invites)
    }
}

fn row_to_invite(row: &sqlx::postgres::PgRow) -> Result<Invite, DomainError> {
    let code: String = row.get("code");
    let group_id: uuid::Uuid = row.get("group_id");
    let used_by: Option<String> = row.get("used_by");
    let created_at: chrono::DateTime<chrono::Utc> = row.get("created_at");

    let code = InviteCode::new(code)
        .map_err(|e| DomainError::storage(format!("Invalid invite code in database: {}", e)))?;

    let used_by = match used_by {
        Some(user) => Some(UserId::new(user).map_err(|e| {
            DomainError::storage(format!("Invalid redeemer ID in database: {}", e))
        })?),
        None => None,
    };

    Ok(Invite::from_parts(
        code,
        GroupId::from(group_id),
        used_by,
        created_at,
    ))
}
