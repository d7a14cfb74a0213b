use campus_hub::{
    auth::AuthService,
    domain::{
        Announcement, AnnouncementCategory, Audience, CreateUserRequest, Priority, User,
    },
    repository::{
        AnnouncementRepository, SqliteAnnouncementRepository, SqliteUserRepository, UserRepository,
    },
};
use chrono::{Duration, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;

async fn setup() -> anyhow::Result<(SqlitePool, User)> {
    let pool = SqlitePool::connect(":memory:").await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    let users = SqliteUserRepository::new(pool.clone());
    let user = users
        .create(CreateUserRequest {
            username: "testuser".to_string(),
            email: "test@campus.edu".to_string(),
            password_hash: AuthService::hash_password("password123").await?,
        })
        .await?;

    Ok((pool, user))
}

fn announcement(created_by: Uuid, title: &str) -> Announcement {
    let now = Utc::now();
    Announcement {
        id: Uuid::new_v4(),
        title: title.to_string(),
        content: "content".to_string(),
        category: AnnouncementCategory::Academic,
        priority: Priority::Medium,
        audience: Audience::All,
        effective_from: now - Duration::hours(1),
        effective_until: None,
        is_active: true,
        created_by,
        created_at: now,
        updated_at: now,
    }
}

#[tokio::test]
async fn test_announcement_create_and_list() -> anyhow::Result<()> {
    let (pool, user) = setup().await?;
    let repo = SqliteAnnouncementRepository::new(pool);

    let created = repo.create(announcement(user.id, "Exam schedule out")).await?;
    assert_eq!(created.title, "Exam schedule out");
    assert!(created.is_active);

    let found = repo.find_by_id(created.id).await?;
    assert!(found.is_some());
    assert_eq!(found.unwrap().category, AnnouncementCategory::Academic);

    let active = repo.list_active().await?;
    assert_eq!(active.len(), 1);

    Ok(())
}

#[tokio::test]
async fn test_archive_is_a_soft_deactivation() -> anyhow::Result<()> {
    let (pool, user) = setup().await?;
    let repo = SqliteAnnouncementRepository::new(pool);

    let created = repo.create(announcement(user.id, "Old notice")).await?;
    let archived = repo.archive(created.id).await?;

    assert!(!archived.is_active);
    assert!(archived.updated_at >= created.updated_at);

    // Archived announcements drop out of the active listing but stay
    // retrievable by id.
    let active = repo.list_active().await?;
    assert!(active.is_empty());
    assert!(repo.find_by_id(created.id).await?.is_some());

    Ok(())
}

#[tokio::test]
async fn test_archive_missing_announcement_is_not_found() -> anyhow::Result<()> {
    let (pool, _user) = setup().await?;
    let repo = SqliteAnnouncementRepository::new(pool);

    let result = repo.archive(Uuid::new_v4()).await;
    assert!(result.is_err());

    Ok(())
}
