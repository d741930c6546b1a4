//! Pending user role repository.
//!
//! Resolution (accept/reject) runs as a single transaction: the guarded
//! status flip, the role insert (accept only) and the notification mark-read
//! commit or roll back together.

use sqlx::PgPool;
use uuid::Uuid;

use domain::models::role::{PendingRoleStatus, Role};

use crate::entities::pending_user_role::PendingUserRoleEntity;

/// Outcome of an accept/reject attempt.
#[derive(Debug, Clone)]
pub enum ResolutionOutcome {
    /// The row was pending and is now resolved.
    Resolved(PendingUserRoleEntity),
    /// The row exists but already sits in a terminal state.
    AlreadyResolved,
    /// No such row in this tenant.
    NotFound,
}

#[derive(Debug, Clone)]
pub struct PendingUserRoleRepository {
    pool: PgPool,
}

impl PendingUserRoleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        madrasa_id: Uuid,
        email: &str,
        role: Role,
        full_name: Option<&str>,
        contact_number: Option<&str>,
    ) -> Result<PendingUserRoleEntity, sqlx::Error> {
        sqlx::query_as::<_, PendingUserRoleEntity>(
            r#"
            INSERT INTO pending_user_roles (madrasa_id, email, role, full_name, contact_number, status)
            VALUES ($1, $2, $3, $4, $5, 'pending')
            RETURNING *
            "#,
        )
        .bind(madrasa_id)
        .bind(email)
        .bind(role.as_str())
        .bind(full_name)
        .bind(contact_number)
        .fetch_one(&self.pool)
        .await
    }

    pub async fn find_by_id(
        &self,
        madrasa_id: Uuid,
        id: Uuid,
    ) -> Result<Option<PendingUserRoleEntity>, sqlx::Error> {
        sqlx::query_as::<_, PendingUserRoleEntity>(
            "SELECT * FROM pending_user_roles WHERE madrasa_id = $1 AND id = $2",
        )
        .bind(madrasa_id)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    pub async fn list(
        &self,
        madrasa_id: Uuid,
        status: Option<PendingRoleStatus>,
    ) -> Result<Vec<PendingUserRoleEntity>, sqlx::Error> {
        sqlx::query_as::<_, PendingUserRoleEntity>(
            r#"
            SELECT * FROM pending_user_roles
            WHERE madrasa_id = $1
              AND ($2::text IS NULL OR status = $2)
            ORDER BY created_at DESC
            "#,
        )
        .bind(madrasa_id)
        .bind(status.map(|s| s.as_str()))
        .fetch_all(&self.pool)
        .await
    }

    /// Unresolved rows addressed to an email, newest first. This is how an
    /// invitee who signed up after being invited finds their invitation.
    pub async fn list_pending_for_email(
        &self,
        madrasa_id: Uuid,
        email: &str,
    ) -> Result<Vec<PendingUserRoleEntity>, sqlx::Error> {
        sqlx::query_as::<_, PendingUserRoleEntity>(
            r#"
            SELECT * FROM pending_user_roles
            WHERE madrasa_id = $1 AND lower(email) = lower($2) AND status = 'pending'
            ORDER BY created_at DESC
            "#,
        )
        .bind(madrasa_id)
        .bind(email)
        .fetch_all(&self.pool)
        .await
    }

    /// Accept a pending request for `user_id`, in one transaction:
    /// guarded flip to `accepted`, idempotent role insert, and mark the
    /// originating invitation notification read.
    ///
    /// A row already in a terminal state flips nothing, inserts nothing.
    pub async fn accept(
        &self,
        madrasa_id: Uuid,
        id: Uuid,
        user_id: Uuid,
    ) -> Result<ResolutionOutcome, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        let resolved = sqlx::query_as::<_, PendingUserRoleEntity>(
            r#"
            UPDATE pending_user_roles
            SET status = 'accepted', resolved_at = NOW()
            WHERE madrasa_id = $1 AND id = $2 AND status = 'pending'
            RETURNING *
            "#,
        )
        .bind(madrasa_id)
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(entity) = resolved else {
            tx.rollback().await?;
            return self.missing_outcome(madrasa_id, id).await;
        };

        sqlx::query(
            r#"
            INSERT INTO user_roles (user_id, role)
            VALUES ($1, $2)
            ON CONFLICT (user_id, role) DO NOTHING
            "#,
        )
        .bind(user_id)
        .bind(&entity.role)
        .execute(&mut *tx)
        .await?;

        self.mark_invitation_read(&mut tx, user_id, id).await?;

        tx.commit().await?;
        Ok(ResolutionOutcome::Resolved(entity))
    }

    /// Reject a pending request. Same transactional shape as accept, minus
    /// the role insert; never creates a role row.
    pub async fn reject(
        &self,
        madrasa_id: Uuid,
        id: Uuid,
        user_id: Uuid,
    ) -> Result<ResolutionOutcome, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        let resolved = sqlx::query_as::<_, PendingUserRoleEntity>(
            r#"
            UPDATE pending_user_roles
            SET status = 'rejected', resolved_at = NOW()
            WHERE madrasa_id = $1 AND id = $2 AND status = 'pending'
            RETURNING *
            "#,
        )
        .bind(madrasa_id)
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(entity) = resolved else {
            tx.rollback().await?;
            return self.missing_outcome(madrasa_id, id).await;
        };

        self.mark_invitation_read(&mut tx, user_id, id).await?;

        tx.commit().await?;
        Ok(ResolutionOutcome::Resolved(entity))
    }

    async fn missing_outcome(
        &self,
        madrasa_id: Uuid,
        id: Uuid,
    ) -> Result<ResolutionOutcome, sqlx::Error> {
        match self.find_by_id(madrasa_id, id).await? {
            Some(_) => Ok(ResolutionOutcome::AlreadyResolved),
            None => Ok(ResolutionOutcome::NotFound),
        }
    }

    async fn mark_invitation_read(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        user_id: Uuid,
        pending_role_id: Uuid,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            UPDATE notifications
            SET read = TRUE
            WHERE user_id = $1
              AND kind = 'role_invitation'
              AND data->>'pending_role_id' = $2
            "#,
        )
        .bind(user_id)
        .bind(pending_role_id.to_string())
        .execute(&mut **tx)
        .await?;
        Ok(())
    }
}
