use chrono::{DateTime, Utc};
use sqlx::PgPool;

use super::models::{NewReading, Reading, ReadingPatch};

/// Narrow handle over the connection pool; the only way the rest of the
/// service touches the database. Cheap to clone (the pool is an Arc).
#[derive(Clone)]
pub struct ReadingStore {
    pool: PgPool,
}

impl ReadingStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a reading and return it with its assigned id. A missing
    /// timestamp is stamped by the database, so "creation time" is the
    /// store's clock, not the service's.
    pub async fn insert(&self, new: NewReading) -> Result<Reading, sqlx::Error> {
        sqlx::query_as::<_, Reading>(
            r#"
            INSERT INTO readings (name, value, timestamp)
            VALUES ($1, $2, COALESCE($3, now()))
            RETURNING id, name, value, timestamp
            "#,
        )
        .bind(new.name)
        .bind(new.value)
        .bind(new.timestamp)
        .fetch_one(&self.pool)
        .await
    }

    pub async fn get(&self, id: i64) -> Result<Option<Reading>, sqlx::Error> {
        sqlx::query_as::<_, Reading>(
            "SELECT id, name, value, timestamp FROM readings WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    /// All readings, oldest insertion first (ascending id).
    pub async fn list_all(&self) -> Result<Vec<Reading>, sqlx::Error> {
        sqlx::query_as::<_, Reading>(
            "SELECT id, name, value, timestamp FROM readings ORDER BY id ASC",
        )
        .fetch_all(&self.pool)
        .await
    }

    /// All readings produced by the sensor `name`, ascending id. An empty
    /// vec is the only signal for an unknown name — there is no separate
    /// sensor registry to consult.
    pub async fn list_by_name(&self, name: &str) -> Result<Vec<Reading>, sqlx::Error> {
        sqlx::query_as::<_, Reading>(
            "SELECT id, name, value, timestamp FROM readings WHERE name = $1 ORDER BY id ASC",
        )
        .bind(name)
        .fetch_all(&self.pool)
        .await
    }

    /// Overwrite every mutable field of the reading with id `id`.
    /// Returns `None` when the id does not exist.
    pub async fn replace(
        &self,
        id: i64,
        name: String,
        value: f64,
        timestamp: DateTime<Utc>,
    ) -> Result<Option<Reading>, sqlx::Error> {
        sqlx::query_as::<_, Reading>(
            r#"
            UPDATE readings
            SET name = $2, value = $3, timestamp = $4
            WHERE id = $1
            RETURNING id, name, value, timestamp
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(value)
        .bind(timestamp)
        .fetch_optional(&self.pool)
        .await
    }

    /// Apply only the fields present in `patch`; absent fields keep their
    /// stored values. A single UPDATE, so a concurrent writer either sees
    /// all of the patch or none of it.
    pub async fn patch(
        &self,
        id: i64,
        patch: ReadingPatch,
    ) -> Result<Option<Reading>, sqlx::Error> {
        sqlx::query_as::<_, Reading>(
            r#"
            UPDATE readings
            SET name      = COALESCE($2, name),
                value     = COALESCE($3, value),
                timestamp = COALESCE($4, timestamp)
            WHERE id = $1
            RETURNING id, name, value, timestamp
            "#,
        )
        .bind(id)
        .bind(patch.name)
        .bind(patch.value)
        .bind(patch.timestamp)
        .fetch_optional(&self.pool)
        .await
    }

    /// Returns `true` when a row was actually removed.
    pub async fn delete(&self, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM readings WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
