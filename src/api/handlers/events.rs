use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    api::{middleware::auth::CurrentUser, state::AppState},
    domain::{Event, EventCategory},
    error::{AppError, Result},
    listing::{order, EventFilter, Page},
    repository::EventRepository,
    uploads,
};

#[derive(Debug, Deserialize)]
pub struct ListEventsQuery {
    pub category: Option<String>,
    pub search: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct EventSummary {
    #[serde(flatten)]
    pub event: Event,
    pub attendee_count: i64,
}

#[derive(Debug, Serialize)]
pub struct EventListResponse {
    pub events: Vec<EventSummary>,
    pub pagination: super::announcements::Pagination,
}

#[derive(Debug, Serialize)]
pub struct EventDetailResponse {
    #[serde(flatten)]
    pub event: Event,
    pub attendee_count: i64,
    pub attendees: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct RsvpResponse {
    pub message: String,
    pub attendee_count: i64,
}

async fn listed(
    state: &AppState,
    params: ListEventsQuery,
    upcoming: bool,
) -> Result<EventListResponse> {
    let filter = EventFilter::from_params(params.category.as_deref(), params.search.as_deref())?;
    let page = Page::clamped(params.page, params.limit);
    let today = Utc::now().date_naive();

    let mut events: Vec<Event> = state
        .service_context
        .event_repo
        .list()
        .await?
        .into_iter()
        .filter(|e| e.is_upcoming(today) == upcoming)
        .filter(|e| filter.matches(e))
        .collect();

    if upcoming {
        events.sort_by(order::by_event_date);
    } else {
        events.sort_by(order::by_event_date_desc);
    }

    let total = events.len();
    let mut summaries = Vec::new();
    for event in page.slice(events) {
        let attendee_count = state
            .service_context
            .event_repo
            .attendee_count(event.id)
            .await?;
        summaries.push(EventSummary {
            event,
            attendee_count,
        });
    }

    Ok(EventListResponse {
        events: summaries,
        pagination: super::announcements::Pagination {
            page: page.page(),
            limit: page.limit(),
            total,
            total_pages: page.total_pages(total),
        },
    })
}

pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListEventsQuery>,
) -> Result<Json<EventListResponse>> {
    Ok(Json(listed(&state, params, true).await?))
}

pub async fn past(
    State(state): State<AppState>,
    Query(params): Query<ListEventsQuery>,
) -> Result<Json<EventListResponse>> {
    Ok(Json(listed(&state, params, false).await?))
}

pub async fn create(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<Event>)> {
    let mut title = None;
    let mut description = None;
    let mut date = None;
    let mut time = None;
    let mut venue = None;
    let mut organizer = None;
    let mut category = None;
    let mut registration_link = None;
    let mut image_url = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Malformed form data: {}", e)))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "image" => {
                image_url =
                    Some(uploads::store_event_image(field, &state.settings.uploads.dir).await?);
            }
            _ => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Malformed form data: {}", e)))?;
                match name.as_str() {
                    "title" => title = Some(value),
                    "description" => description = Some(value),
                    "date" => date = Some(value),
                    "time" => time = Some(value),
                    "venue" => venue = Some(value),
                    "organizer" => organizer = Some(value),
                    "category" => category = Some(value),
                    "registration_link" => {
                        registration_link = Some(value).filter(|v| !v.is_empty())
                    }
                    _ => {}
                }
            }
        }
    }

    let required = |value: Option<String>, field: &str| {
        value
            .filter(|v| !v.is_empty())
            .ok_or_else(|| AppError::Validation(format!("Missing required field: {}", field)))
    };

    let date: NaiveDate = required(date, "date")?
        .parse()
        .map_err(|_| AppError::Validation("Invalid event date".to_string()))?;
    let category = category
        .as_deref()
        .and_then(EventCategory::parse)
        .ok_or_else(|| AppError::Validation("Invalid event category".to_string()))?;

    let now = Utc::now();
    let event = Event {
        id: Uuid::new_v4(),
        title: required(title, "title")?,
        description: required(description, "description")?,
        date,
        time: required(time, "time")?,
        venue: required(venue, "venue")?,
        organizer: required(organizer, "organizer")?,
        category,
        image_url,
        registration_link,
        created_by: current_user.user.id,
        created_at: now,
        updated_at: now,
    };

    let created = state.service_context.event_repo.create(event).await?;

    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<EventDetailResponse>> {
    let event = state
        .service_context
        .event_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Event not found".to_string()))?;

    let attendee_count = state.service_context.event_repo.attendee_count(id).await?;
    let attendees = state
        .service_context
        .event_repo
        .attendee_usernames(id)
        .await?;

    Ok(Json(EventDetailResponse {
        event,
        attendee_count,
        attendees,
    }))
}

pub async fn rsvp(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<RsvpResponse>> {
    let event = state
        .service_context
        .event_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Event not found".to_string()))?;

    state
        .service_context
        .event_repo
        .add_attendee(event.id, current_user.user.id)
        .await?;
    let attendee_count = state
        .service_context
        .event_repo
        .attendee_count(event.id)
        .await?;

    Ok(Json(RsvpResponse {
        message: "You are attending this event".to_string(),
        attendee_count,
    }))
}
