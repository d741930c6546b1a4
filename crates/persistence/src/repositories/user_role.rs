//! User role repository.

use sqlx::PgPool;
use uuid::Uuid;

use domain::models::role::Role;

use crate::entities::user_role::UserRoleEntity;

#[derive(Debug, Clone)]
pub struct UserRoleRepository {
    pool: PgPool,
}

impl UserRoleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a role binding. A duplicate (user, role) pair surfaces as a
    /// unique violation for the caller to map to a conflict.
    pub async fn grant(&self, user_id: Uuid, role: Role) -> Result<UserRoleEntity, sqlx::Error> {
        sqlx::query_as::<_, UserRoleEntity>(
            r#"
            INSERT INTO user_roles (user_id, role)
            VALUES ($1, $2)
            RETURNING id, user_id, role, created_at
            "#,
        )
        .bind(user_id)
        .bind(role.as_str())
        .fetch_one(&self.pool)
        .await
    }

    /// Role bindings for one tenant, with the holder's profile name.
    pub async fn list_for_madrasa(
        &self,
        madrasa_id: Uuid,
    ) -> Result<Vec<UserRoleEntity>, sqlx::Error> {
        sqlx::query_as::<_, UserRoleEntity>(
            r#"
            SELECT ur.id, ur.user_id, ur.role, ur.created_at, p.full_name AS holder_name
            FROM user_roles ur
            JOIN profiles p ON p.user_id = ur.user_id
            WHERE p.madrasa_id = $1
            ORDER BY ur.created_at DESC
            "#,
        )
        .bind(madrasa_id)
        .fetch_all(&self.pool)
        .await
    }

    pub async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<UserRoleEntity>, sqlx::Error> {
        sqlx::query_as::<_, UserRoleEntity>(
            "SELECT id, user_id, role, created_at FROM user_roles WHERE user_id = $1 ORDER BY created_at",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
    }

    pub async fn revoke(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM user_roles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
