use axum::{extract::State, Json};
use chrono::{Duration, Utc};
use serde::Serialize;

use crate::{
    api::state::AppState,
    domain::{Announcement, Event, ExamRecord, QueueStatus},
    error::Result,
    listing::order,
    repository::{
        AnnouncementRepository, EventRepository, ExamRepository, LostItemRepository,
        QueueStatusRepository,
    },
};

#[derive(Debug, Serialize)]
pub struct DashboardStats {
    pub lost_items_this_week: i64,
    pub upcoming_events: usize,
    pub active_announcements: usize,
}

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub stats: DashboardStats,
    pub upcoming_events: Vec<Event>,
    pub announcements: Vec<Announcement>,
    pub queue_status: Option<QueueStatus>,
    pub upcoming_exams: Vec<ExamRecord>,
}

/// One-page summary. The five reads are independent, so they run
/// concurrently.
pub async fn overview(State(state): State<AppState>) -> Result<Json<DashboardResponse>> {
    let ctx = &state.service_context;
    let now = Utc::now();
    let today = now.date_naive();
    let week_ago = now - Duration::days(7);

    let (lost_items_this_week, events, announcements, queue_status, exams) = tokio::try_join!(
        ctx.lost_item_repo.count_lost_since(week_ago),
        ctx.event_repo.list(),
        ctx.announcement_repo.list_active(),
        ctx.queue_repo.latest(None),
        ctx.exam_repo.list_active(),
    )?;

    let mut upcoming_events: Vec<Event> =
        events.into_iter().filter(|e| e.is_upcoming(today)).collect();
    upcoming_events.sort_by(order::by_event_date);
    upcoming_events.truncate(5);

    let mut effective: Vec<Announcement> = announcements
        .into_iter()
        .filter(|a| a.is_effective(now))
        .collect();
    effective.sort_by(order::by_priority_then_newest);
    effective.truncate(5);

    let mut upcoming_exams: Vec<ExamRecord> =
        exams.into_iter().filter(|e| e.is_upcoming(today)).collect();
    upcoming_exams.sort_by(order::by_exam_schedule);
    upcoming_exams.truncate(5);

    Ok(Json(DashboardResponse {
        stats: DashboardStats {
            lost_items_this_week,
            upcoming_events: upcoming_events.len(),
            active_announcements: effective.len(),
        },
        upcoming_events,
        announcements: effective,
        queue_status,
        upcoming_exams,
    }))
}
