use std::sync::Arc;

use sqlx::SqlitePool;

use crate::auth::AuthService;
use crate::repository::*;

/// Shared handle bundle the API layer works against. Everything is behind
/// trait objects so tests can swap implementations.
pub struct ServiceContext {
    pub user_repo: Arc<dyn UserRepository>,
    pub announcement_repo: Arc<dyn AnnouncementRepository>,
    pub event_repo: Arc<dyn EventRepository>,
    pub exam_repo: Arc<dyn ExamRepository>,
    pub lost_item_repo: Arc<dyn LostItemRepository>,
    pub queue_repo: Arc<dyn QueueStatusRepository>,
    pub auth_service: Arc<AuthService>,
    pub db_pool: SqlitePool,
}

impl ServiceContext {
    pub fn new(db_pool: SqlitePool) -> Self {
        Self {
            user_repo: Arc::new(SqliteUserRepository::new(db_pool.clone())),
            announcement_repo: Arc::new(SqliteAnnouncementRepository::new(db_pool.clone())),
            event_repo: Arc::new(SqliteEventRepository::new(db_pool.clone())),
            exam_repo: Arc::new(SqliteExamRepository::new(db_pool.clone())),
            lost_item_repo: Arc::new(SqliteLostItemRepository::new(db_pool.clone())),
            queue_repo: Arc::new(SqliteQueueStatusRepository::new(db_pool.clone())),
            auth_service: Arc::new(AuthService::new(db_pool.clone())),
            db_pool,
        }
    }
}
