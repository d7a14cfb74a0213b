use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::*;
use crate::error::Result;

pub mod announcement_repository;
pub mod event_repository;
pub mod exam_repository;
pub mod lost_item_repository;
pub mod queue_repository;
pub mod user_repository;

pub use announcement_repository::SqliteAnnouncementRepository;
pub use event_repository::SqliteEventRepository;
pub use exam_repository::SqliteExamRepository;
pub use lost_item_repository::SqliteLostItemRepository;
pub use queue_repository::SqliteQueueStatusRepository;
pub use user_repository::SqliteUserRepository;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: CreateUserRequest) -> Result<User>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>>;
    async fn find_by_username(&self, username: &str) -> Result<Option<User>>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;
    async fn touch_last_login(&self, id: Uuid) -> Result<()>;
}

#[async_trait]
pub trait AnnouncementRepository: Send + Sync {
    async fn create(&self, announcement: Announcement) -> Result<Announcement>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Announcement>>;
    /// All non-archived announcements; effective-window filtering happens
    /// in the listing layer.
    async fn list_active(&self) -> Result<Vec<Announcement>>;
    /// Soft deactivation; the record stays for history.
    async fn archive(&self, id: Uuid) -> Result<Announcement>;
}

#[async_trait]
pub trait EventRepository: Send + Sync {
    async fn create(&self, event: Event) -> Result<Event>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Event>>;
    async fn list(&self) -> Result<Vec<Event>>;
    /// Idempotent: adding the same attendee twice leaves one row.
    async fn add_attendee(&self, event_id: Uuid, user_id: Uuid) -> Result<()>;
    async fn attendee_count(&self, event_id: Uuid) -> Result<i64>;
    async fn attendee_usernames(&self, event_id: Uuid) -> Result<Vec<String>>;
}

#[async_trait]
pub trait ExamRepository: Send + Sync {
    async fn create(&self, exam: ExamRecord) -> Result<ExamRecord>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<ExamRecord>>;
    async fn list_active(&self) -> Result<Vec<ExamRecord>>;
    async fn deactivate(&self, id: Uuid) -> Result<ExamRecord>;
}

#[async_trait]
pub trait LostItemRepository: Send + Sync {
    async fn create(&self, item: LostItem) -> Result<LostItem>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<LostItem>>;
    async fn list(&self) -> Result<Vec<LostItem>>;
    /// Marks the item returned and records who claimed it.
    async fn claim(&self, id: Uuid, claimed_by: Uuid) -> Result<LostItem>;
    async fn count_lost_since(&self, since: DateTime<Utc>) -> Result<i64>;
}

#[async_trait]
pub trait QueueStatusRepository: Send + Sync {
    async fn create(&self, status: QueueStatus) -> Result<QueueStatus>;
    /// Every sample on record, oldest first, optionally for one cafeteria.
    async fn list_all(&self, cafeteria: Option<Cafeteria>) -> Result<Vec<QueueStatus>>;
    /// Samples since `since`, oldest first, optionally for one cafeteria.
    async fn list_since(
        &self,
        since: DateTime<Utc>,
        cafeteria: Option<Cafeteria>,
    ) -> Result<Vec<QueueStatus>>;
    async fn latest(&self, cafeteria: Option<Cafeteria>) -> Result<Option<QueueStatus>>;
}
