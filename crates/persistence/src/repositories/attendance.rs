//! Attendance repository.
//!
//! All writes go through the natural-key upsert: a second write for the same
//! (madrasa, student, date, time slot) updates the existing row in place.

use chrono::NaiveDate;
use sqlx::{PgPool, QueryBuilder};
use uuid::Uuid;

use domain::models::attendance::{AttendanceKey, NewAttendanceRecord, TimeSlot};

use crate::entities::attendance::AttendanceEntity;

#[derive(Debug, Clone)]
pub struct AttendanceRepository {
    pool: PgPool,
}

impl AttendanceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Upsert one record on the natural key.
    pub async fn upsert(
        &self,
        madrasa_id: Uuid,
        record: &NewAttendanceRecord,
    ) -> Result<AttendanceEntity, sqlx::Error> {
        sqlx::query_as::<_, AttendanceEntity>(
            r#"
            INSERT INTO attendance (madrasa_id, student_id, class_id, date, time_slot, status)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (madrasa_id, student_id, date, time_slot)
            DO UPDATE SET status = EXCLUDED.status, class_id = EXCLUDED.class_id
            RETURNING *
            "#,
        )
        .bind(madrasa_id)
        .bind(record.student_id)
        .bind(record.class_id)
        .bind(record.date)
        .bind(record.time_slot.as_str())
        .bind(record.status.as_str())
        .fetch_one(&self.pool)
        .await
    }

    /// Batched multi-row upsert with the same conflict clause.
    ///
    /// Returns the number of rows written. An empty batch writes nothing.
    pub async fn upsert_bulk(
        &self,
        madrasa_id: Uuid,
        records: &[NewAttendanceRecord],
    ) -> Result<u64, sqlx::Error> {
        if records.is_empty() {
            return Ok(0);
        }

        let mut builder = QueryBuilder::new(
            "INSERT INTO attendance (madrasa_id, student_id, class_id, date, time_slot, status) ",
        );
        builder.push_values(records, |mut row, record| {
            row.push_bind(madrasa_id)
                .push_bind(record.student_id)
                .push_bind(record.class_id)
                .push_bind(record.date)
                .push_bind(record.time_slot.as_str())
                .push_bind(record.status.as_str());
        });
        builder.push(
            " ON CONFLICT (madrasa_id, student_id, date, time_slot) \
             DO UPDATE SET status = EXCLUDED.status, class_id = EXCLUDED.class_id",
        );

        let result = builder.build().execute(&self.pool).await?;
        Ok(result.rows_affected())
    }

    /// The most specific existing record for a student and day.
    ///
    /// With a time slot this is the exact natural-key row; without one, the
    /// most recently written record for that day.
    pub async fn status_of(
        &self,
        madrasa_id: Uuid,
        student_id: Uuid,
        date: NaiveDate,
        time_slot: Option<TimeSlot>,
    ) -> Result<Option<AttendanceEntity>, sqlx::Error> {
        sqlx::query_as::<_, AttendanceEntity>(
            r#"
            SELECT * FROM attendance
            WHERE madrasa_id = $1 AND student_id = $2 AND date = $3
              AND ($4::text IS NULL OR time_slot = $4)
            ORDER BY created_at DESC
            LIMIT 1
            "#,
        )
        .bind(madrasa_id)
        .bind(student_id)
        .bind(date)
        .bind(time_slot.map(|s| s.as_str()))
        .fetch_optional(&self.pool)
        .await
    }

    /// Delete the record for a natural key. Returns whether a row existed.
    pub async fn clear(
        &self,
        madrasa_id: Uuid,
        student_id: Uuid,
        date: NaiveDate,
        time_slot: TimeSlot,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            DELETE FROM attendance
            WHERE madrasa_id = $1 AND student_id = $2 AND date = $3 AND time_slot = $4
            "#,
        )
        .bind(madrasa_id)
        .bind(student_id)
        .bind(date)
        .bind(time_slot.as_str())
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Natural keys already taken for a (date, time slot), for availability
    /// filtering in the entry form.
    pub async fn existing_keys(
        &self,
        madrasa_id: Uuid,
        date: NaiveDate,
        time_slot: TimeSlot,
    ) -> Result<Vec<AttendanceKey>, sqlx::Error> {
        let rows = sqlx::query_as::<_, (Uuid,)>(
            r#"
            SELECT student_id FROM attendance
            WHERE madrasa_id = $1 AND date = $2 AND time_slot = $3
            "#,
        )
        .bind(madrasa_id)
        .bind(date)
        .bind(time_slot.as_str())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(student_id,)| AttendanceKey {
                student_id,
                date,
                time_slot,
            })
            .collect())
    }

    /// All records in a date range for one time slot, for the register grid.
    pub async fn range_records(
        &self,
        madrasa_id: Uuid,
        from: NaiveDate,
        to: NaiveDate,
        time_slot: TimeSlot,
        class_id: Option<Uuid>,
    ) -> Result<Vec<AttendanceEntity>, sqlx::Error> {
        sqlx::query_as::<_, AttendanceEntity>(
            r#"
            SELECT * FROM attendance
            WHERE madrasa_id = $1 AND date >= $2 AND date <= $3 AND time_slot = $4
              AND ($5::uuid IS NULL OR class_id = $5)
            ORDER BY date, student_id
            "#,
        )
        .bind(madrasa_id)
        .bind(from)
        .bind(to)
        .bind(time_slot.as_str())
        .bind(class_id)
        .fetch_all(&self.pool)
        .await
    }
}
