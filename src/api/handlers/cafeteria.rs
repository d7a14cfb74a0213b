use axum::{
    extract::{Query, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::{
    api::{middleware::auth::CurrentUser, state::AppState},
    domain::{Cafeteria, CongestionLevel, QueueStatus},
    error::{AppError, Result},
    listing::{aggregate, constraint},
    repository::QueueStatusRepository,
};

const DEFAULT_HISTORY_HOURS: i64 = 24;
const MAX_HISTORY_HOURS: i64 = 168;

#[derive(Debug, Deserialize)]
pub struct CafeteriaQuery {
    pub cafeteria: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub cafeteria: Option<String>,
    pub hours: Option<i64>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ReportStatusRequest {
    pub cafeteria: Cafeteria,
    pub level: CongestionLevel,
    #[validate(length(max = 280))]
    pub note: Option<String>,
    #[validate(range(min = 0, max = 240))]
    pub estimated_wait_minutes: Option<i32>,
}

#[derive(Debug, Serialize)]
pub struct CafeteriaOverview {
    pub latest_status: Vec<QueueStatus>,
    pub history: Vec<QueueStatus>,
}

fn cafeteria_filter(value: Option<&str>) -> Result<Option<Cafeteria>> {
    match constraint(value) {
        None => Ok(None),
        Some(v) => Cafeteria::parse(v)
            .map(Some)
            .ok_or_else(|| AppError::BadRequest(format!("Invalid cafeteria filter: {}", v))),
    }
}

/// Latest sample per cafeteria plus the last 24 hours of samples for
/// charting.
pub async fn overview(
    State(state): State<AppState>,
    Query(params): Query<CafeteriaQuery>,
) -> Result<Json<CafeteriaOverview>> {
    let cafeteria = cafeteria_filter(params.cafeteria.as_deref())?;

    let all = state.service_context.queue_repo.list_all(cafeteria).await?;
    let latest_status = aggregate::latest_per_cafeteria(&all);

    let since = Utc::now() - Duration::hours(DEFAULT_HISTORY_HOURS);
    let history = state
        .service_context
        .queue_repo
        .list_since(since, cafeteria)
        .await?;

    Ok(Json(CafeteriaOverview {
        latest_status,
        history,
    }))
}

pub async fn report(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Json(req): Json<ReportStatusRequest>,
) -> Result<(StatusCode, Json<QueueStatus>)> {
    req.validate()?;

    let now = Utc::now();
    let status = QueueStatus {
        id: Uuid::new_v4(),
        cafeteria: req.cafeteria,
        level: req.level,
        note: req.note.filter(|n| !n.is_empty()),
        estimated_wait_minutes: req.estimated_wait_minutes,
        reported_by: current_user.user.id,
        created_at: now,
        updated_at: now,
    };

    let created = state.service_context.queue_repo.create(status).await?;

    Ok((StatusCode::CREATED, Json(created)))
}

/// Single most recent sample, optionally for one cafeteria.
pub async fn current_status(
    State(state): State<AppState>,
    Query(params): Query<CafeteriaQuery>,
) -> Result<Json<Option<QueueStatus>>> {
    let cafeteria = cafeteria_filter(params.cafeteria.as_deref())?;
    let latest = state.service_context.queue_repo.latest(cafeteria).await?;

    Ok(Json(latest))
}

pub async fn history(
    State(state): State<AppState>,
    Query(params): Query<HistoryQuery>,
) -> Result<Json<Vec<QueueStatus>>> {
    let cafeteria = cafeteria_filter(params.cafeteria.as_deref())?;
    let hours = params
        .hours
        .unwrap_or(DEFAULT_HISTORY_HOURS)
        .clamp(1, MAX_HISTORY_HOURS);

    let since = Utc::now() - Duration::hours(hours);
    let history = state
        .service_context
        .queue_repo
        .list_since(since, cafeteria)
        .await?;

    Ok(Json(history))
}
