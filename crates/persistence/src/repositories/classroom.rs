//! Class repository.

use sqlx::PgPool;
use uuid::Uuid;

use domain::models::classroom::UpsertClassRequest;

use crate::entities::classroom::ClassEntity;

#[derive(Debug, Clone)]
pub struct ClassRepository {
    pool: PgPool,
}

impl ClassRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        madrasa_id: Uuid,
        request: &UpsertClassRequest,
    ) -> Result<ClassEntity, sqlx::Error> {
        sqlx::query_as::<_, ClassEntity>(
            r#"
            INSERT INTO classes (madrasa_id, name, section)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(madrasa_id)
        .bind(&request.name)
        .bind(&request.section)
        .fetch_one(&self.pool)
        .await
    }

    pub async fn update(
        &self,
        madrasa_id: Uuid,
        id: Uuid,
        request: &UpsertClassRequest,
    ) -> Result<Option<ClassEntity>, sqlx::Error> {
        sqlx::query_as::<_, ClassEntity>(
            r#"
            UPDATE classes SET name = $3, section = $4
            WHERE madrasa_id = $1 AND id = $2
            RETURNING *
            "#,
        )
        .bind(madrasa_id)
        .bind(id)
        .bind(&request.name)
        .bind(&request.section)
        .fetch_optional(&self.pool)
        .await
    }

    pub async fn find_by_id(
        &self,
        madrasa_id: Uuid,
        id: Uuid,
    ) -> Result<Option<ClassEntity>, sqlx::Error> {
        sqlx::query_as::<_, ClassEntity>("SELECT * FROM classes WHERE madrasa_id = $1 AND id = $2")
            .bind(madrasa_id)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    pub async fn list(&self, madrasa_id: Uuid) -> Result<Vec<ClassEntity>, sqlx::Error> {
        sqlx::query_as::<_, ClassEntity>(
            "SELECT * FROM classes WHERE madrasa_id = $1 ORDER BY name, section",
        )
        .bind(madrasa_id)
        .fetch_all(&self.pool)
        .await
    }

    pub async fn delete(&self, madrasa_id: Uuid, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM classes WHERE madrasa_id = $1 AND id = $2")
            .bind(madrasa_id)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
