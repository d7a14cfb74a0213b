use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Extension, Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::{
    api::{middleware::auth::CurrentUser, state::AppState},
    domain::{Announcement, AnnouncementCategory, Audience, Priority},
    error::{AppError, Result},
    feeds,
    listing::{order, AnnouncementFilter, Page},
    repository::AnnouncementRepository,
};

#[derive(Debug, Deserialize)]
pub struct ListAnnouncementsQuery {
    pub category: Option<String>,
    pub priority: Option<String>,
    pub audience: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateAnnouncementRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 1))]
    pub content: String,
    pub category: AnnouncementCategory,
    pub priority: Priority,
    pub audience: Audience,
    pub effective_from: Option<DateTime<Utc>>,
    pub effective_until: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
pub struct AnnouncementStats {
    pub total_active: usize,
    pub effective: usize,
    pub high_priority: usize,
    pub emergency: usize,
}

#[derive(Debug, Serialize)]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
    pub total: usize,
    pub total_pages: i64,
}

#[derive(Debug, Serialize)]
pub struct AnnouncementListResponse {
    pub announcements: Vec<Announcement>,
    pub pagination: Pagination,
    pub stats: AnnouncementStats,
}

pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListAnnouncementsQuery>,
) -> Result<Json<AnnouncementListResponse>> {
    let filter = AnnouncementFilter::from_params(
        params.category.as_deref(),
        params.priority.as_deref(),
        params.audience.as_deref(),
    )?;
    let page = Page::clamped(params.page, params.limit);
    let now = Utc::now();

    let active = state.service_context.announcement_repo.list_active().await?;
    let total_active = active.len();

    let effective: Vec<Announcement> =
        active.into_iter().filter(|a| a.is_effective(now)).collect();
    let stats = AnnouncementStats {
        total_active,
        effective: effective.len(),
        high_priority: effective
            .iter()
            .filter(|a| a.priority == Priority::High)
            .count(),
        emergency: effective
            .iter()
            .filter(|a| a.category == AnnouncementCategory::Emergency)
            .count(),
    };

    let mut visible: Vec<Announcement> =
        effective.into_iter().filter(|a| filter.matches(a)).collect();
    visible.sort_by(order::by_priority_then_newest);

    let total = visible.len();
    let announcements = page.slice(visible);

    Ok(Json(AnnouncementListResponse {
        announcements,
        pagination: Pagination {
            page: page.page(),
            limit: page.limit(),
            total,
            total_pages: page.total_pages(total),
        },
        stats,
    }))
}

pub async fn create(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Json(req): Json<CreateAnnouncementRequest>,
) -> Result<(StatusCode, Json<Announcement>)> {
    req.validate()?;

    let now = Utc::now();
    let effective_from = req.effective_from.unwrap_or(now);
    if let Some(until) = req.effective_until {
        if until < effective_from {
            return Err(AppError::BadRequest(
                "effective_until must not precede effective_from".to_string(),
            ));
        }
    }

    let announcement = Announcement {
        id: Uuid::new_v4(),
        title: req.title,
        content: req.content,
        category: req.category,
        priority: req.priority,
        audience: req.audience,
        effective_from,
        effective_until: req.effective_until,
        is_active: true,
        created_by: current_user.user.id,
        created_at: now,
        updated_at: now,
    };

    let created = state
        .service_context
        .announcement_repo
        .create(announcement)
        .await?;

    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Announcement>> {
    let announcement = state
        .service_context
        .announcement_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Announcement not found".to_string()))?;

    Ok(Json(announcement))
}

pub async fn archive(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Announcement>> {
    let archived = state.service_context.announcement_repo.archive(id).await?;
    Ok(Json(archived))
}

/// Currently effective high-priority announcements, newest first.
pub async fn emergency(State(state): State<AppState>) -> Result<Json<Vec<Announcement>>> {
    let now = Utc::now();
    let active = state.service_context.announcement_repo.list_active().await?;

    let mut emergencies: Vec<Announcement> = active
        .into_iter()
        .filter(|a| a.is_effective(now) && a.priority == Priority::High)
        .collect();
    emergencies.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    Ok(Json(emergencies))
}

/// Public RSS feed of currently effective announcements.
pub async fn rss_feed(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let now = Utc::now();
    let active = state.service_context.announcement_repo.list_active().await?;
    let effective: Vec<Announcement> =
        active.into_iter().filter(|a| a.is_effective(now)).collect();

    let rss = feeds::announcements_rss(&effective, &state.settings.server.base_url);

    Ok((
        [(header::CONTENT_TYPE, "application/rss+xml; charset=utf-8")],
        rss,
    ))
}
