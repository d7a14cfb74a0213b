use campus_hub::{
    auth::AuthService,
    domain::{CreateUserRequest, Event, EventCategory, User},
    repository::{EventRepository, SqliteEventRepository, SqliteUserRepository, UserRepository},
};
use chrono::{Duration, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;

async fn create_user(pool: &SqlitePool, username: &str) -> anyhow::Result<User> {
    let users = SqliteUserRepository::new(pool.clone());
    Ok(users
        .create(CreateUserRequest {
            username: username.to_string(),
            email: format!("{}@campus.edu", username),
            password_hash: AuthService::hash_password("password123").await?,
        })
        .await?)
}

fn event(created_by: Uuid) -> Event {
    let now = Utc::now();
    Event {
        id: Uuid::new_v4(),
        title: "Campus Hackathon".to_string(),
        description: "24-hour build sprint".to_string(),
        date: now.date_naive() + Duration::days(7),
        time: "09:00".to_string(),
        venue: "Seminar Hall".to_string(),
        organizer: "Coding Club".to_string(),
        category: EventCategory::Workshop,
        image_url: None,
        registration_link: None,
        created_by,
        created_at: now,
        updated_at: now,
    }
}

#[tokio::test]
async fn test_rsvp_is_idempotent() -> anyhow::Result<()> {
    let pool = SqlitePool::connect(":memory:").await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    let organizer = create_user(&pool, "organizer").await?;
    let attendee = create_user(&pool, "attendee").await?;

    let repo = SqliteEventRepository::new(pool);
    let created = repo.create(event(organizer.id)).await?;

    repo.add_attendee(created.id, attendee.id).await?;
    repo.add_attendee(created.id, attendee.id).await?;

    // Registering twice leaves exactly one attendance row.
    assert_eq!(repo.attendee_count(created.id).await?, 1);

    Ok(())
}

#[tokio::test]
async fn test_attendee_usernames_resolve_through_users() -> anyhow::Result<()> {
    let pool = SqlitePool::connect(":memory:").await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    let organizer = create_user(&pool, "organizer").await?;
    let priya = create_user(&pool, "priya").await?;
    let rahul = create_user(&pool, "rahul").await?;

    let repo = SqliteEventRepository::new(pool);
    let created = repo.create(event(organizer.id)).await?;

    repo.add_attendee(created.id, priya.id).await?;
    repo.add_attendee(created.id, rahul.id).await?;

    let usernames = repo.attendee_usernames(created.id).await?;
    assert_eq!(usernames, vec!["priya".to_string(), "rahul".to_string()]);

    Ok(())
}
