use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use uuid::Uuid;

use crate::{
    domain::{Announcement, AnnouncementCategory, Audience, Priority},
    error::{AppError, Result},
    repository::AnnouncementRepository,
};

#[derive(FromRow)]
struct AnnouncementRow {
    id: String,
    title: String,
    content: String,
    category: String,
    priority: String,
    audience: String,
    effective_from: NaiveDateTime,
    effective_until: Option<NaiveDateTime>,
    is_active: i32,
    created_by: String,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
}

pub struct SqliteAnnouncementRepository {
    pool: SqlitePool,
}

impl SqliteAnnouncementRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_announcement(row: AnnouncementRow) -> Result<Announcement> {
        Ok(Announcement {
            id: Uuid::parse_str(&row.id).map_err(|e| AppError::Database(e.to_string()))?,
            title: row.title,
            content: row.content,
            category: AnnouncementCategory::parse(&row.category).ok_or_else(|| {
                AppError::Database(format!("Invalid announcement category: {}", row.category))
            })?,
            priority: Priority::parse(&row.priority).ok_or_else(|| {
                AppError::Database(format!("Invalid priority: {}", row.priority))
            })?,
            audience: Audience::parse(&row.audience).ok_or_else(|| {
                AppError::Database(format!("Invalid audience: {}", row.audience))
            })?,
            effective_from: DateTime::from_naive_utc_and_offset(row.effective_from, Utc),
            effective_until: row
                .effective_until
                .map(|dt| DateTime::from_naive_utc_and_offset(dt, Utc)),
            is_active: row.is_active != 0,
            created_by: Uuid::parse_str(&row.created_by)
                .map_err(|e| AppError::Database(e.to_string()))?,
            created_at: DateTime::from_naive_utc_and_offset(row.created_at, Utc),
            updated_at: DateTime::from_naive_utc_and_offset(row.updated_at, Utc),
        })
    }
}

#[async_trait]
impl AnnouncementRepository for SqliteAnnouncementRepository {
    async fn create(&self, announcement: Announcement) -> Result<Announcement> {
        sqlx::query(
            r#"
            INSERT INTO announcements (
                id, title, content, category, priority, audience,
                effective_from, effective_until, is_active, created_by,
                created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(announcement.id.to_string())
        .bind(&announcement.title)
        .bind(&announcement.content)
        .bind(announcement.category.as_str())
        .bind(announcement.priority.as_str())
        .bind(announcement.audience.as_str())
        .bind(announcement.effective_from.naive_utc())
        .bind(announcement.effective_until.map(|dt| dt.naive_utc()))
        .bind(announcement.is_active as i32)
        .bind(announcement.created_by.to_string())
        .bind(announcement.created_at.naive_utc())
        .bind(announcement.updated_at.naive_utc())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        self.find_by_id(announcement.id).await?.ok_or_else(|| {
            AppError::Database("Failed to retrieve created announcement".to_string())
        })
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Announcement>> {
        let row = sqlx::query_as::<_, AnnouncementRow>(
            r#"
            SELECT id, title, content, category, priority, audience,
                   effective_from, effective_until, is_active, created_by,
                   created_at, updated_at
            FROM announcements
            WHERE id = ?
            "#,
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        match row {
            Some(r) => Ok(Some(Self::row_to_announcement(r)?)),
            None => Ok(None),
        }
    }

    async fn list_active(&self) -> Result<Vec<Announcement>> {
        let rows = sqlx::query_as::<_, AnnouncementRow>(
            r#"
            SELECT id, title, content, category, priority, audience,
                   effective_from, effective_until, is_active, created_by,
                   created_at, updated_at
            FROM announcements
            WHERE is_active = 1
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        rows.into_iter().map(Self::row_to_announcement).collect()
    }

    async fn archive(&self, id: Uuid) -> Result<Announcement> {
        let now = Utc::now().naive_utc();

        let result = sqlx::query(
            "UPDATE announcements SET is_active = 0, updated_at = ? WHERE id = ?",
        )
        .bind(now)
        .bind(id.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Announcement {} not found", id)));
        }

        self.find_by_id(id).await?.ok_or_else(|| {
            AppError::Database("Failed to retrieve archived announcement".to_string())
        })
    }
}
