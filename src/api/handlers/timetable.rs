use std::collections::BTreeMap;

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Extension, Json,
};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::{
    api::{middleware::auth::CurrentUser, state::AppState},
    domain::{Branch, ExamRecord},
    error::{AppError, Result},
    feeds,
    listing::{order, ExamFilter},
    repository::ExamRepository,
};

#[derive(Debug, Deserialize)]
pub struct TimetableQuery {
    pub branch: Option<String>,
    pub semester: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateExamRequest {
    pub branch: Branch,
    #[validate(range(min = 1, max = 8))]
    pub semester: i32,
    #[validate(length(min = 1, max = 100))]
    pub subject: String,
    #[validate(length(min = 1, max = 20))]
    pub subject_code: String,
    pub exam_date: NaiveDate,
    pub exam_time: String,
    // Exams are at least half an hour long.
    #[validate(range(min = 30, max = 480))]
    pub duration_minutes: i32,
    #[validate(length(min = 1))]
    pub venue: String,
    pub room_number: Option<String>,
    pub invigilator: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TimetableResponse {
    pub exams_by_date: BTreeMap<NaiveDate, Vec<ExamRecord>>,
    pub total: usize,
    pub branches: Vec<String>,
    pub semesters: Vec<i32>,
}

#[derive(Debug, Serialize)]
pub struct UpcomingExam {
    #[serde(flatten)]
    pub exam: ExamRecord,
    pub days_left: i64,
}

#[derive(Debug, Serialize)]
pub struct PastExam {
    #[serde(flatten)]
    pub exam: ExamRecord,
    pub days_ago: i64,
}

#[derive(Debug, Serialize)]
pub struct MyExamsResponse {
    pub upcoming: Vec<UpcomingExam>,
    pub past: Vec<PastExam>,
}

async fn filtered_active(
    state: &AppState,
    params: &TimetableQuery,
) -> Result<(Vec<ExamRecord>, ExamFilter)> {
    let filter = ExamFilter::from_params(params.branch.as_deref(), params.semester.as_deref())?;
    let exams = state.service_context.exam_repo.list_active().await?;
    Ok((exams, filter))
}

/// Upcoming exams grouped by date, with the distinct branch and semester
/// values available for the filter controls.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<TimetableQuery>,
) -> Result<Json<TimetableResponse>> {
    let (exams, filter) = filtered_active(&state, &params).await?;
    let today = Utc::now().date_naive();

    let mut branches: Vec<String> = Vec::new();
    let mut semesters: Vec<i32> = Vec::new();
    for exam in &exams {
        let branch = exam.branch.as_str().to_string();
        if !branches.contains(&branch) {
            branches.push(branch);
        }
        if !semesters.contains(&exam.semester) {
            semesters.push(exam.semester);
        }
    }
    branches.sort();
    semesters.sort();

    let mut upcoming: Vec<ExamRecord> = exams
        .into_iter()
        .filter(|e| e.is_upcoming(today) && filter.matches(e))
        .collect();
    upcoming.sort_by(order::by_exam_schedule);

    let total = upcoming.len();
    let exams_by_date = crate::listing::group_by_exam_date(upcoming);

    Ok(Json(TimetableResponse {
        exams_by_date,
        total,
        branches,
        semesters,
    }))
}

pub async fn create(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Json(req): Json<CreateExamRequest>,
) -> Result<(StatusCode, Json<ExamRecord>)> {
    req.validate()?;

    if !is_valid_time(&req.exam_time) {
        return Err(AppError::Validation(
            "exam_time must be in HH:MM format".to_string(),
        ));
    }

    let now = Utc::now();
    let exam = ExamRecord {
        id: Uuid::new_v4(),
        branch: req.branch,
        semester: req.semester,
        subject: req.subject,
        subject_code: req.subject_code,
        exam_date: req.exam_date,
        exam_time: req.exam_time,
        duration_minutes: req.duration_minutes,
        venue: req.venue,
        room_number: req.room_number.filter(|r| !r.is_empty()),
        invigilator: req.invigilator.filter(|i| !i.is_empty()),
        is_active: true,
        created_by: current_user.user.id,
        created_at: now,
        updated_at: now,
    };

    let created = state.service_context.exam_repo.create(exam).await?;

    Ok((StatusCode::CREATED, Json(created)))
}

/// Branch/semester view split into upcoming (with a countdown) and past
/// (with how long ago), both recomputed per request.
pub async fn my_exams(
    State(state): State<AppState>,
    Query(params): Query<TimetableQuery>,
) -> Result<Json<MyExamsResponse>> {
    let (exams, filter) = filtered_active(&state, &params).await?;
    let today = Utc::now().date_naive();

    let mut matching: Vec<ExamRecord> = exams.into_iter().filter(|e| filter.matches(e)).collect();
    matching.sort_by(order::by_exam_schedule);

    let mut upcoming = Vec::new();
    let mut past = Vec::new();
    for exam in matching {
        if exam.exam_date >= today {
            let days_left = exam.days_left(today);
            upcoming.push(UpcomingExam { exam, days_left });
        } else {
            let days_ago = exam.days_ago(today);
            past.push(PastExam { exam, days_ago });
        }
    }
    // Most recent past exam first.
    past.reverse();

    Ok(Json(MyExamsResponse { upcoming, past }))
}

pub async fn export_csv(
    State(state): State<AppState>,
    Query(params): Query<TimetableQuery>,
) -> Result<impl IntoResponse> {
    let (exams, filter) = filtered_active(&state, &params).await?;
    let today = Utc::now().date_naive();

    let mut upcoming: Vec<ExamRecord> = exams
        .into_iter()
        .filter(|e| e.is_upcoming(today) && filter.matches(e))
        .collect();
    upcoming.sort_by(order::by_exam_schedule);

    let csv = feeds::timetable_csv(&upcoming);

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"exam-timetable.csv\"".to_string(),
            ),
        ],
        csv,
    ))
}

pub async fn deactivate(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ExamRecord>> {
    let exam = state.service_context.exam_repo.deactivate(id).await?;
    Ok(Json(exam))
}

fn is_valid_time(time: &str) -> bool {
    let Some((hours, minutes)) = time.split_once(':') else {
        return false;
    };
    let valid_hours = hours.len() == 2 && hours.parse::<u8>().map_or(false, |h| h < 24);
    let valid_minutes = minutes.len() == 2 && minutes.parse::<u8>().map_or(false, |m| m < 60);
    valid_hours && valid_minutes
}

#[cfg(test)]
mod tests {
    use super::{is_valid_time, CreateExamRequest};
    use crate::domain::Branch;
    use validator::Validate;

    fn exam_request(duration_minutes: i32) -> CreateExamRequest {
        CreateExamRequest {
            branch: Branch::Cse,
            semester: 4,
            subject: "Algorithms".to_string(),
            subject_code: "CS301".to_string(),
            exam_date: "2024-05-01".parse().unwrap(),
            exam_time: "09:00".to_string(),
            duration_minutes,
            venue: "Hall A".to_string(),
            room_number: None,
            invigilator: None,
        }
    }

    #[test]
    fn duration_under_thirty_minutes_is_rejected() {
        assert!(exam_request(10).validate().is_err());
        assert!(exam_request(29).validate().is_err());
        assert!(exam_request(30).validate().is_ok());
        assert!(exam_request(180).validate().is_ok());
    }

    #[test]
    fn accepts_24_hour_times() {
        assert!(is_valid_time("09:00"));
        assert!(is_valid_time("23:59"));
        assert!(is_valid_time("00:00"));
    }

    #[test]
    fn rejects_malformed_times() {
        assert!(!is_valid_time("9:00"));
        assert!(!is_valid_time("24:00"));
        assert!(!is_valid_time("12:60"));
        assert!(!is_valid_time("noon"));
        assert!(!is_valid_time("12-30"));
    }
}
