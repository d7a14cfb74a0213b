use campus_hub::{
    auth::AuthService,
    domain::{CreateUserRequest, ItemCategory, ItemStatus, LostItem, User},
    repository::{
        LostItemRepository, SqliteLostItemRepository, SqliteUserRepository, UserRepository,
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
            username: "reporter".to_string(),
            email: "reporter@campus.edu".to_string(),
            password_hash: AuthService::hash_password("password123").await?,
        })
        .await?;

    Ok((pool, user))
}

fn lost_item(reported_by: Uuid) -> LostItem {
    let now = Utc::now();
    LostItem {
        id: Uuid::new_v4(),
        item_name: "Black backpack".to_string(),
        description: "Laptop inside".to_string(),
        category: ItemCategory::Accessories,
        location_lost: "Main Library".to_string(),
        date_lost: now.date_naive(),
        contact_info: "reporter@campus.edu".to_string(),
        status: ItemStatus::Lost,
        reported_by,
        claimed_by: None,
        created_at: now,
        updated_at: now,
    }
}

#[tokio::test]
async fn test_claim_transitions_to_returned() -> anyhow::Result<()> {
    let (pool, reporter) = setup().await?;

    let users = SqliteUserRepository::new(pool.clone());
    let claimer = users
        .create(CreateUserRequest {
            username: "claimer".to_string(),
            email: "claimer@campus.edu".to_string(),
            password_hash: AuthService::hash_password("password123").await?,
        })
        .await?;

    let repo = SqliteLostItemRepository::new(pool);
    let created = repo.create(lost_item(reporter.id)).await?;
    assert_eq!(created.status, ItemStatus::Lost);
    assert!(created.claimed_by.is_none());

    let claimed = repo.claim(created.id, claimer.id).await?;
    assert_eq!(claimed.status, ItemStatus::Returned);
    assert_eq!(claimed.claimed_by, Some(claimer.id));
    assert!(claimed.updated_at >= created.updated_at);

    Ok(())
}

#[tokio::test]
async fn test_count_lost_since_only_counts_open_reports() -> anyhow::Result<()> {
    let (pool, reporter) = setup().await?;
    let repo = SqliteLostItemRepository::new(pool);

    let open = repo.create(lost_item(reporter.id)).await?;
    let other = repo.create(lost_item(reporter.id)).await?;
    repo.claim(other.id, reporter.id).await?;

    let week_ago = Utc::now() - Duration::days(7);
    assert_eq!(repo.count_lost_since(week_ago).await?, 1);

    // The open report is the one still counted.
    assert_eq!(repo.find_by_id(open.id).await?.unwrap().status, ItemStatus::Lost);

    Ok(())
}
