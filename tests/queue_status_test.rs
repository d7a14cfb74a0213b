use campus_hub::{
    auth::AuthService,
    domain::{Cafeteria, CongestionLevel, CreateUserRequest, QueueStatus, User},
    listing::latest_per_cafeteria,
    repository::{
        QueueStatusRepository, SqliteQueueStatusRepository, SqliteUserRepository, UserRepository,
    },
};
use chrono::{DateTime, Duration, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;

async fn setup() -> anyhow::Result<(SqlitePool, User)> {
    let pool = SqlitePool::connect(":memory:").await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    let users = SqliteUserRepository::new(pool.clone());
    let user = users
        .create(CreateUserRequest {
            username: "reporter".to_string(),
            email: "reporter@campus.edu".to_string(),
            password_hash: AuthService::hash_password("password123").await?,
        })
        .await?;

    Ok((pool, user))
}

fn sample(
    reported_by: Uuid,
    cafeteria: Cafeteria,
    level: CongestionLevel,
    at: DateTime<Utc>,
) -> QueueStatus {
    QueueStatus {
        id: Uuid::new_v4(),
        cafeteria,
        level,
        note: None,
        estimated_wait_minutes: Some(10),
        reported_by,
        created_at: at,
        updated_at: at,
    }
}

#[tokio::test]
async fn test_history_is_chronological() -> anyhow::Result<()> {
    let (pool, user) = setup().await?;
    let repo = SqliteQueueStatusRepository::new(pool);

    let base = Utc::now() - Duration::hours(3);
    for offset in [2, 0, 1] {
        repo.create(sample(
            user.id,
            Cafeteria::Main,
            CongestionLevel::Medium,
            base + Duration::hours(offset),
        ))
        .await?;
    }

    let since = Utc::now() - Duration::hours(24);
    let history = repo.list_since(since, Some(Cafeteria::Main)).await?;

    assert_eq!(history.len(), 3);
    for pair in history.windows(2) {
        assert!(pair[0].created_at <= pair[1].created_at);
    }

    Ok(())
}

#[tokio::test]
async fn test_latest_returns_most_recent_sample() -> anyhow::Result<()> {
    let (pool, user) = setup().await?;
    let repo = SqliteQueueStatusRepository::new(pool);

    let base = Utc::now() - Duration::hours(2);
    repo.create(sample(user.id, Cafeteria::Main, CongestionLevel::High, base))
        .await?;
    let newest = repo
        .create(sample(
            user.id,
            Cafeteria::Main,
            CongestionLevel::Low,
            base + Duration::hours(1),
        ))
        .await?;

    let latest = repo.latest(Some(Cafeteria::Main)).await?;
    assert_eq!(latest.map(|s| s.id), Some(newest.id));

    Ok(())
}

#[tokio::test]
async fn test_overview_aggregates_latest_per_cafeteria() -> anyhow::Result<()> {
    let (pool, user) = setup().await?;
    let repo = SqliteQueueStatusRepository::new(pool);

    let base = Utc::now() - Duration::hours(2);
    repo.create(sample(user.id, Cafeteria::Main, CongestionLevel::High, base))
        .await?;
    let main_latest = repo
        .create(sample(
            user.id,
            Cafeteria::Main,
            CongestionLevel::Medium,
            base + Duration::minutes(30),
        ))
        .await?;
    let north_latest = repo
        .create(sample(
            user.id,
            Cafeteria::North,
            CongestionLevel::Low,
            base + Duration::minutes(45),
        ))
        .await?;

    let all = repo.list_all(None).await?;
    let latest = latest_per_cafeteria(&all);

    assert_eq!(latest.len(), 2);
    assert_eq!(latest[0].id, main_latest.id);
    assert_eq!(latest[1].id, north_latest.id);

    Ok(())
}
