use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::{
    api::{middleware::auth::CurrentUser, state::AppState},
    domain::{ItemCategory, ItemStatus, LostItem},
    error::{AppError, Result},
    listing::{order, LostItemFilter, Page},
    repository::LostItemRepository,
};

#[derive(Debug, Deserialize)]
pub struct ListItemsQuery {
    pub category: Option<String>,
    pub status: Option<String>,
    pub search: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ReportItemRequest {
    #[validate(length(min = 1, max = 100))]
    pub item_name: String,
    #[validate(length(min = 1))]
    pub description: String,
    pub category: ItemCategory,
    #[validate(length(min = 1))]
    pub location: String,
    pub date_lost: Option<NaiveDate>,
    #[validate(length(min = 1))]
    pub contact_info: String,
}

#[derive(Debug, Serialize)]
pub struct LostFoundStats {
    pub total: usize,
    pub lost: usize,
    pub found: usize,
    pub returned: usize,
}

#[derive(Debug, Serialize)]
pub struct LostItemListResponse {
    pub items: Vec<LostItem>,
    pub pagination: super::announcements::Pagination,
    pub stats: LostFoundStats,
}

pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListItemsQuery>,
) -> Result<Json<LostItemListResponse>> {
    let filter = LostItemFilter::from_params(
        params.category.as_deref(),
        params.status.as_deref(),
        params.search.as_deref(),
    )?;
    let page = Page::clamped(params.page, params.limit);

    let all = state.service_context.lost_item_repo.list().await?;
    let stats = LostFoundStats {
        total: all.len(),
        lost: all.iter().filter(|i| i.status == ItemStatus::Lost).count(),
        found: all.iter().filter(|i| i.status == ItemStatus::Found).count(),
        returned: all
            .iter()
            .filter(|i| i.status == ItemStatus::Returned)
            .count(),
    };

    let mut matching: Vec<LostItem> = all.into_iter().filter(|i| filter.matches(i)).collect();
    matching.sort_by(order::by_newest_report);

    let total = matching.len();
    let items = page.slice(matching);

    Ok(Json(LostItemListResponse {
        items,
        pagination: super::announcements::Pagination {
            page: page.page(),
            limit: page.limit(),
            total,
            total_pages: page.total_pages(total),
        },
        stats,
    }))
}

async fn report(
    state: &AppState,
    current_user: CurrentUser,
    req: ReportItemRequest,
    status: ItemStatus,
    date_lost: NaiveDate,
) -> Result<LostItem> {
    req.validate()?;

    let now = Utc::now();
    let item = LostItem {
        id: Uuid::new_v4(),
        item_name: req.item_name,
        description: req.description,
        category: req.category,
        location_lost: req.location,
        date_lost,
        contact_info: req.contact_info,
        status,
        reported_by: current_user.user.id,
        claimed_by: None,
        created_at: now,
        updated_at: now,
    };

    state.service_context.lost_item_repo.create(item).await
}

pub async fn report_lost(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Json(req): Json<ReportItemRequest>,
) -> Result<(StatusCode, Json<LostItem>)> {
    let date_lost = req.date_lost.ok_or_else(|| {
        AppError::Validation("Missing required field: date_lost".to_string())
    })?;
    let item = report(&state, current_user, req, ItemStatus::Lost, date_lost).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

pub async fn report_found(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Json(req): Json<ReportItemRequest>,
) -> Result<(StatusCode, Json<LostItem>)> {
    // Found reports are dated the day they come in.
    let item = report(
        &state,
        current_user,
        req,
        ItemStatus::Found,
        Utc::now().date_naive(),
    )
    .await?;
    Ok((StatusCode::CREATED, Json(item)))
}

pub async fn get(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<Json<LostItem>> {
    let item = state
        .service_context
        .lost_item_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Lost item not found".to_string()))?;

    Ok(Json(item))
}

pub async fn claim(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<LostItem>> {
    let item = state
        .service_context
        .lost_item_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Lost item not found".to_string()))?;

    if item.status == ItemStatus::Returned {
        return Err(AppError::Conflict(
            "Item has already been returned".to_string(),
        ));
    }

    let claimed = state
        .service_context
        .lost_item_repo
        .claim(id, current_user.user.id)
        .await?;

    Ok(Json(claimed))
}
