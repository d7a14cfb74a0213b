use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use uuid::Uuid;

use crate::{
    domain::{Event, EventCategory},
    error::{AppError, Result},
    repository::EventRepository,
};

#[derive(FromRow)]
struct EventRow {
    id: String,
    title: String,
    description: String,
    date: NaiveDate,
    time: String,
    venue: String,
    organizer: String,
    category: String,
    image_url: Option<String>,
    registration_link: Option<String>,
    created_by: String,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
}

pub struct SqliteEventRepository {
    pool: SqlitePool,
}

impl SqliteEventRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_event(row: EventRow) -> Result<Event> {
        Ok(Event {
            id: Uuid::parse_str(&row.id).map_err(|e| AppError::Database(e.to_string()))?,
            title: row.title,
            description: row.description,
            date: row.date,
            time: row.time,
            venue: row.venue,
            organizer: row.organizer,
            category: EventCategory::parse(&row.category).ok_or_else(|| {
                AppError::Database(format!("Invalid event category: {}", row.category))
            })?,
            image_url: row.image_url,
            registration_link: row.registration_link,
            created_by: Uuid::parse_str(&row.created_by)
                .map_err(|e| AppError::Database(e.to_string()))?,
            created_at: DateTime::from_naive_utc_and_offset(row.created_at, Utc),
            updated_at: DateTime::from_naive_utc_and_offset(row.updated_at, Utc),
        })
    }
}

#[async_trait]
impl EventRepository for SqliteEventRepository {
    async fn create(&self, event: Event) -> Result<Event> {
        sqlx::query(
            r#"
            INSERT INTO events (
                id, title, description, date, time, venue, organizer,
                category, image_url, registration_link, created_by,
                created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(event.id.to_string())
        .bind(&event.title)
        .bind(&event.description)
        .bind(event.date)
        .bind(&event.time)
        .bind(&event.venue)
        .bind(&event.organizer)
        .bind(event.category.as_str())
        .bind(&event.image_url)
        .bind(&event.registration_link)
        .bind(event.created_by.to_string())
        .bind(event.created_at.naive_utc())
        .bind(event.updated_at.naive_utc())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        self.find_by_id(event.id)
            .await?
            .ok_or_else(|| AppError::Database("Failed to retrieve created event".to_string()))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Event>> {
        let row = sqlx::query_as::<_, EventRow>(
            r#"
            SELECT id, title, description, date, time, venue, organizer,
                   category, image_url, registration_link, created_by,
                   created_at, updated_at
            FROM events
            WHERE id = ?
            "#,
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        match row {
            Some(r) => Ok(Some(Self::row_to_event(r)?)),
            None => Ok(None),
        }
    }

    async fn list(&self) -> Result<Vec<Event>> {
        let rows = sqlx::query_as::<_, EventRow>(
            r#"
            SELECT id, title, description, date, time, venue, organizer,
                   category, image_url, registration_link, created_by,
                   created_at, updated_at
            FROM events
            ORDER BY date ASC, time ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        rows.into_iter().map(Self::row_to_event).collect()
    }

    async fn add_attendee(&self, event_id: Uuid, user_id: Uuid) -> Result<()> {
        let now = Utc::now().naive_utc();

        // The (event_id, user_id) primary key makes a repeat RSVP a no-op.
        sqlx::query(
            r#"
            INSERT OR IGNORE INTO event_attendees (event_id, user_id, registered_at)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(event_id.to_string())
        .bind(user_id.to_string())
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(())
    }

    async fn attendee_count(&self, event_id: Uuid) -> Result<i64> {
        let count: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM event_attendees WHERE event_id = ?")
                .bind(event_id.to_string())
                .fetch_one(&self.pool)
                .await
                .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(count.0)
    }

    async fn attendee_usernames(&self, event_id: Uuid) -> Result<Vec<String>> {
        let rows: Vec<(String,)> = sqlx::query_as(
            r#"
            SELECT u.username
            FROM event_attendees ea
            JOIN users u ON u.id = ea.user_id
            WHERE ea.event_id = ?
            ORDER BY ea.registered_at ASC
            "#,
        )
        .bind(event_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(rows.into_iter().map(|(username,)| username).collect())
    }
}
