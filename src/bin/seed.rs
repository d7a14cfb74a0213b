use campus_hub::{
    auth::AuthService,
    domain::{
        Announcement, AnnouncementCategory, Audience, Branch, Cafeteria, CongestionLevel,
        CreateUserRequest, Event, EventCategory, ExamRecord, ItemCategory, ItemStatus, LostItem,
        Priority, QueueStatus,
    },
    repository::{
        AnnouncementRepository, EventRepository, ExamRepository, LostItemRepository,
        QueueStatusRepository, SqliteAnnouncementRepository, SqliteEventRepository,
        SqliteExamRepository, SqliteLostItemRepository, SqliteQueueStatusRepository,
        SqliteUserRepository, UserRepository,
    },
};
use chrono::{Duration, Utc};
use sqlx::sqlite::SqlitePoolOptions;
use uuid::Uuid;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    println!("🌱 Starting database seeding...");

    let database_url =
        std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite:campus-hub.db".to_string());

    let db_pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await?;

    println!("📋 Running migrations...");
    sqlx::migrate!("./migrations").run(&db_pool).await?;

    let user_repo = SqliteUserRepository::new(db_pool.clone());
    let announcement_repo = SqliteAnnouncementRepository::new(db_pool.clone());
    let event_repo = SqliteEventRepository::new(db_pool.clone());
    let exam_repo = SqliteExamRepository::new(db_pool.clone());
    let lost_item_repo = SqliteLostItemRepository::new(db_pool.clone());
    let queue_repo = SqliteQueueStatusRepository::new(db_pool.clone());

    println!("👥 Creating users...");
    let admin = user_repo
        .create(CreateUserRequest {
            username: "admin".to_string(),
            email: "admin@campus.edu".to_string(),
            password_hash: AuthService::hash_password("admin123").await?,
        })
        .await?;
    println!("  ✅ Created admin user (admin / admin123)");

    let priya = user_repo
        .create(CreateUserRequest {
            username: "priya".to_string(),
            email: "priya@campus.edu".to_string(),
            password_hash: AuthService::hash_password("password123").await?,
        })
        .await?;

    let rahul = user_repo
        .create(CreateUserRequest {
            username: "rahul".to_string(),
            email: "rahul@campus.edu".to_string(),
            password_hash: AuthService::hash_password("password123").await?,
        })
        .await?;

    let now = Utc::now();
    let today = now.date_naive();

    println!("📢 Creating announcements...");
    announcement_repo
        .create(Announcement {
            id: Uuid::new_v4(),
            title: "Mid-semester exams start next week".to_string(),
            content: "Check the timetable section for your branch schedule.".to_string(),
            category: AnnouncementCategory::Academic,
            priority: Priority::High,
            audience: Audience::Students,
            effective_from: now - Duration::days(1),
            effective_until: Some(now + Duration::days(14)),
            is_active: true,
            created_by: admin.id,
            created_at: now - Duration::days(1),
            updated_at: now - Duration::days(1),
        })
        .await?;

    announcement_repo
        .create(Announcement {
            id: Uuid::new_v4(),
            title: "Library open until midnight during exams".to_string(),
            content: "Extended hours apply for the next two weeks.".to_string(),
            category: AnnouncementCategory::General,
            priority: Priority::Medium,
            audience: Audience::All,
            effective_from: now,
            effective_until: None,
            is_active: true,
            created_by: admin.id,
            created_at: now,
            updated_at: now,
        })
        .await?;

    announcement_repo
        .create(Announcement {
            id: Uuid::new_v4(),
            title: "Water supply maintenance in Block C".to_string(),
            content: "Supply will be interrupted between 10:00 and 14:00 tomorrow.".to_string(),
            category: AnnouncementCategory::Emergency,
            priority: Priority::High,
            audience: Audience::All,
            effective_from: now,
            effective_until: Some(now + Duration::days(2)),
            is_active: true,
            created_by: admin.id,
            created_at: now,
            updated_at: now,
        })
        .await?;

    println!("🎉 Creating events...");
    let hackathon = event_repo
        .create(Event {
            id: Uuid::new_v4(),
            title: "Campus Hackathon 2026".to_string(),
            description: "24-hour build sprint, teams of up to four.".to_string(),
            date: today + Duration::days(10),
            time: "09:00".to_string(),
            venue: "CS Department Seminar Hall".to_string(),
            organizer: "Coding Club".to_string(),
            category: EventCategory::Workshop,
            image_url: None,
            registration_link: Some("https://campus.edu/hackathon".to_string()),
            created_by: admin.id,
            created_at: now,
            updated_at: now,
        })
        .await?;

    event_repo
        .create(Event {
            id: Uuid::new_v4(),
            title: "Spring Music Night".to_string(),
            description: "Open-air concert by campus bands.".to_string(),
            date: today + Duration::days(20),
            time: "18:30".to_string(),
            venue: "Sports Complex Lawn".to_string(),
            organizer: "Cultural Committee".to_string(),
            category: EventCategory::Cultural,
            image_url: None,
            registration_link: None,
            created_by: priya.id,
            created_at: now,
            updated_at: now,
        })
        .await?;

    event_repo.add_attendee(hackathon.id, priya.id).await?;
    event_repo.add_attendee(hackathon.id, rahul.id).await?;

    println!("📝 Creating exam records...");
    let exams = [
        ("Algorithms", "CS301", 4, 5, "09:00", "Hall A"),
        ("Operating Systems", "CS302", 4, 5, "14:00", "Hall A"),
        ("Database Systems", "CS303", 4, 7, "09:00", "Hall B"),
    ];
    for (subject, code, semester, days_ahead, time, venue) in exams {
        exam_repo
            .create(ExamRecord {
                id: Uuid::new_v4(),
                branch: Branch::Cse,
                semester,
                subject: subject.to_string(),
                subject_code: code.to_string(),
                exam_date: today + Duration::days(days_ahead),
                exam_time: time.to_string(),
                duration_minutes: 180,
                venue: venue.to_string(),
                room_number: None,
                invigilator: None,
                is_active: true,
                created_by: admin.id,
                created_at: now,
                updated_at: now,
            })
            .await?;
    }

    println!("🎒 Creating lost and found reports...");
    lost_item_repo
        .create(LostItem {
            id: Uuid::new_v4(),
            item_name: "Black backpack".to_string(),
            description: "Dell laptop and charger inside, blue keychain on zip.".to_string(),
            category: ItemCategory::Accessories,
            location_lost: "Main Library, second floor".to_string(),
            date_lost: today - Duration::days(2),
            contact_info: "priya@campus.edu".to_string(),
            status: ItemStatus::Lost,
            reported_by: priya.id,
            claimed_by: None,
            created_at: now - Duration::days(2),
            updated_at: now - Duration::days(2),
        })
        .await?;

    lost_item_repo
        .create(LostItem {
            id: Uuid::new_v4(),
            item_name: "Scientific calculator".to_string(),
            description: "Casio fx-991, name scratched off the back.".to_string(),
            category: ItemCategory::Electronics,
            location_lost: "Hall B".to_string(),
            date_lost: today - Duration::days(1),
            contact_info: "rahul@campus.edu".to_string(),
            status: ItemStatus::Found,
            reported_by: rahul.id,
            claimed_by: None,
            created_at: now - Duration::days(1),
            updated_at: now - Duration::days(1),
        })
        .await?;

    println!("🍽️ Creating cafeteria queue samples...");
    let samples = [
        (Cafeteria::Main, CongestionLevel::High, Some(20), 3),
        (Cafeteria::Main, CongestionLevel::Medium, Some(10), 1),
        (Cafeteria::North, CongestionLevel::Low, Some(5), 2),
    ];
    for (cafeteria, level, wait, hours_ago) in samples {
        let at = now - Duration::hours(hours_ago);
        queue_repo
            .create(QueueStatus {
                id: Uuid::new_v4(),
                cafeteria,
                level,
                note: None,
                estimated_wait_minutes: wait,
                reported_by: rahul.id,
                created_at: at,
                updated_at: at,
            })
            .await?;
    }

    println!("✨ Seeding complete!");
    Ok(())
}
