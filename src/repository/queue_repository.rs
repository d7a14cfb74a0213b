use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use uuid::Uuid;

use crate::{
    domain::{Cafeteria, CongestionLevel, QueueStatus},
    error::{AppError, Result},
    repository::QueueStatusRepository,
};

#[derive(FromRow)]
struct QueueStatusRow {
    id: String,
    cafeteria: String,
    level: String,
    note: Option<String>,
    estimated_wait_minutes: Option<i32>,
    reported_by: String,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
}

pub struct SqliteQueueStatusRepository {
    pool: SqlitePool,
}

impl SqliteQueueStatusRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_status(row: QueueStatusRow) -> Result<QueueStatus> {
        Ok(QueueStatus {
            id: Uuid::parse_str(&row.id).map_err(|e| AppError::Database(e.to_string()))?,
            cafeteria: Cafeteria::parse(&row.cafeteria).ok_or_else(|| {
                AppError::Database(format!("Invalid cafeteria: {}", row.cafeteria))
            })?,
            level: CongestionLevel::parse(&row.level).ok_or_else(|| {
                AppError::Database(format!("Invalid congestion level: {}", row.level))
            })?,
            note: row.note,
            estimated_wait_minutes: row.estimated_wait_minutes,
            reported_by: Uuid::parse_str(&row.reported_by)
                .map_err(|e| AppError::Database(e.to_string()))?,
            created_at: DateTime::from_naive_utc_and_offset(row.created_at, Utc),
            updated_at: DateTime::from_naive_utc_and_offset(row.updated_at, Utc),
        })
    }
}

#[async_trait]
impl QueueStatusRepository for SqliteQueueStatusRepository {
    async fn create(&self, status: QueueStatus) -> Result<QueueStatus> {
        sqlx::query(
            r#"
            INSERT INTO queue_status (
                id, cafeteria, level, note, estimated_wait_minutes,
                reported_by, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(status.id.to_string())
        .bind(status.cafeteria.as_str())
        .bind(status.level.as_str())
        .bind(&status.note)
        .bind(status.estimated_wait_minutes)
        .bind(status.reported_by.to_string())
        .bind(status.created_at.naive_utc())
        .bind(status.updated_at.naive_utc())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(status)
    }

    async fn list_all(&self, cafeteria: Option<Cafeteria>) -> Result<Vec<QueueStatus>> {
        let rows = match cafeteria {
            Some(cafeteria) => {
                sqlx::query_as::<_, QueueStatusRow>(
                    r#"
                    SELECT id, cafeteria, level, note, estimated_wait_minutes,
                           reported_by, created_at, updated_at
                    FROM queue_status
                    WHERE cafeteria = ?
                    ORDER BY created_at ASC
                    "#,
                )
                .bind(cafeteria.as_str())
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query_as::<_, QueueStatusRow>(
                    r#"
                    SELECT id, cafeteria, level, note, estimated_wait_minutes,
                           reported_by, created_at, updated_at
                    FROM queue_status
                    ORDER BY created_at ASC
                    "#,
                )
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(|e| AppError::Database(e.to_string()))?;

        rows.into_iter().map(Self::row_to_status).collect()
    }

    async fn list_since(
        &self,
        since: DateTime<Utc>,
        cafeteria: Option<Cafeteria>,
    ) -> Result<Vec<QueueStatus>> {
        let rows = match cafeteria {
            Some(cafeteria) => {
                sqlx::query_as::<_, QueueStatusRow>(
                    r#"
                    SELECT id, cafeteria, level, note, estimated_wait_minutes,
                           reported_by, created_at, updated_at
                    FROM queue_status
                    WHERE created_at >= ? AND cafeteria = ?
                    ORDER BY created_at ASC
                    "#,
                )
                .bind(since.naive_utc())
                .bind(cafeteria.as_str())
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query_as::<_, QueueStatusRow>(
                    r#"
                    SELECT id, cafeteria, level, note, estimated_wait_minutes,
                           reported_by, created_at, updated_at
                    FROM queue_status
                    WHERE created_at >= ?
                    ORDER BY created_at ASC
                    "#,
                )
                .bind(since.naive_utc())
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(|e| AppError::Database(e.to_string()))?;

        rows.into_iter().map(Self::row_to_status).collect()
    }

    async fn latest(&self, cafeteria: Option<Cafeteria>) -> Result<Option<QueueStatus>> {
        let row = match cafeteria {
            Some(cafeteria) => {
                sqlx::query_as::<_, QueueStatusRow>(
                    r#"
                    SELECT id, cafeteria, level, note, estimated_wait_minutes,
                           reported_by, created_at, updated_at
                    FROM queue_status
                    WHERE cafeteria = ?
                    ORDER BY created_at DESC
                    LIMIT 1
                    "#,
                )
                .bind(cafeteria.as_str())
                .fetch_optional(&self.pool)
                .await
            }
            None => {
                sqlx::query_as::<_, QueueStatusRow>(
                    r#"
                    SELECT id, cafeteria, level, note, estimated_wait_minutes,
                           reported_by, created_at, updated_at
                    FROM queue_status
                    ORDER BY created_at DESC
                    LIMIT 1
                    "#,
                )
                .fetch_optional(&self.pool)
                .await
            }
        }
        .map_err(|e| AppError::Database(e.to_string()))?;

        match row {
            Some(r) => Ok(Some(Self::row_to_status(r)?)),
            None => Ok(None),
        }
    }
}
