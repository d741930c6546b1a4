//! Profile repository.
//!
//! Profiles mirror the external auth identity; this service only reads them
//! (holder names, email lookup during role assignment).

use sqlx::{FromRow, PgPool};
use uuid::Uuid;

/// Database row mapping for the profiles table.
#[derive(Debug, Clone, FromRow)]
pub struct ProfileEntity {
    pub user_id: Uuid,
    pub madrasa_id: Uuid,
    pub email: String,
    pub full_name: Option<String>,
    pub contact_number: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ProfileRepository {
    pool: PgPool,
}

impl ProfileRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<ProfileEntity>, sqlx::Error> {
        sqlx::query_as::<_, ProfileEntity>(
            "SELECT user_id, madrasa_id, email, full_name, contact_number \
             FROM profiles WHERE lower(email) = lower($1)",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
    }

    pub async fn find_by_user_id(
        &self,
        user_id: Uuid,
    ) -> Result<Option<ProfileEntity>, sqlx::Error> {
        sqlx::query_as::<_, ProfileEntity>(
            "SELECT user_id, madrasa_id, email, full_name, contact_number \
             FROM profiles WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
    }
}
