use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use uuid::Uuid;

use crate::{
    domain::{ItemCategory, ItemStatus, LostItem},
    error::{AppError, Result},
    repository::LostItemRepository,
};

#[derive(FromRow)]
struct LostItemRow {
    id: String,
    item_name: String,
    description: String,
    category: String,
    location_lost: String,
    date_lost: NaiveDate,
    contact_info: String,
    status: String,
    reported_by: String,
    claimed_by: Option<String>,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
}

pub struct SqliteLostItemRepository {
    pool: SqlitePool,
}

impl SqliteLostItemRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_item(row: LostItemRow) -> Result<LostItem> {
        Ok(LostItem {
            id: Uuid::parse_str(&row.id).map_err(|e| AppError::Database(e.to_string()))?,
            item_name: row.item_name,
            description: row.description,
            category: ItemCategory::parse(&row.category).ok_or_else(|| {
                AppError::Database(format!("Invalid item category: {}", row.category))
            })?,
            location_lost: row.location_lost,
            date_lost: row.date_lost,
            contact_info: row.contact_info,
            status: ItemStatus::parse(&row.status)
                .ok_or_else(|| AppError::Database(format!("Invalid item status: {}", row.status)))?,
            reported_by: Uuid::parse_str(&row.reported_by)
                .map_err(|e| AppError::Database(e.to_string()))?,
            claimed_by: row
                .claimed_by
                .map(|id| Uuid::parse_str(&id).map_err(|e| AppError::Database(e.to_string())))
                .transpose()?,
            created_at: DateTime::from_naive_utc_and_offset(row.created_at, Utc),
            updated_at: DateTime::from_naive_utc_and_offset(row.updated_at, Utc),
        })
    }
}

#[async_trait]
impl LostItemRepository for SqliteLostItemRepository {
    async fn create(&self, item: LostItem) -> Result<LostItem> {
        sqlx::query(
            r#"
            INSERT INTO lost_items (
                id, item_name, description, category, location_lost,
                date_lost, contact_info, status, reported_by, claimed_by,
                created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(item.id.to_string())
        .bind(&item.item_name)
        .bind(&item.description)
        .bind(item.category.as_str())
        .bind(&item.location_lost)
        .bind(item.date_lost)
        .bind(&item.contact_info)
        .bind(item.status.as_str())
        .bind(item.reported_by.to_string())
        .bind(item.claimed_by.map(|id| id.to_string()))
        .bind(item.created_at.naive_utc())
        .bind(item.updated_at.naive_utc())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        self.find_by_id(item.id)
            .await?
            .ok_or_else(|| AppError::Database("Failed to retrieve created item".to_string()))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<LostItem>> {
        let row = sqlx::query_as::<_, LostItemRow>(
            r#"
            SELECT id, item_name, description, category, location_lost,
                   date_lost, contact_info, status, reported_by, claimed_by,
                   created_at, updated_at
            FROM lost_items
            WHERE id = ?
            "#,
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        match row {
            Some(r) => Ok(Some(Self::row_to_item(r)?)),
            None => Ok(None),
        }
    }

    async fn list(&self) -> Result<Vec<LostItem>> {
        let rows = sqlx::query_as::<_, LostItemRow>(
            r#"
            SELECT id, item_name, description, category, location_lost,
                   date_lost, contact_info, status, reported_by, claimed_by,
                   created_at, updated_at
            FROM lost_items
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        rows.into_iter().map(Self::row_to_item).collect()
    }

    async fn claim(&self, id: Uuid, claimed_by: Uuid) -> Result<LostItem> {
        let now = Utc::now().naive_utc();

        let result = sqlx::query(
            r#"
            UPDATE lost_items
            SET status = ?, claimed_by = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(ItemStatus::Returned.as_str())
        .bind(claimed_by.to_string())
        .bind(now)
        .bind(id.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Lost item {} not found", id)));
        }

        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::Database("Failed to retrieve claimed item".to_string()))
    }

    async fn count_lost_since(&self, since: DateTime<Utc>) -> Result<i64> {
        let count: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM lost_items WHERE status = ? AND created_at >= ?",
        )
        .bind(ItemStatus::Lost.as_str())
        .bind(since.naive_utc())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(count.0)
    }
}
