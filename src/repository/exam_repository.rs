use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use uuid::Uuid;

use crate::{
    domain::{Branch, ExamRecord},
    error::{AppError, Result},
    repository::ExamRepository,
};

#[derive(FromRow)]
struct ExamRow {
    id: String,
    branch: String,
    semester: i32,
    subject: String,
    subject_code: String,
    exam_date: NaiveDate,
    exam_time: String,
    duration_minutes: i32,
    venue: String,
    room_number: Option<String>,
    invigilator: Option<String>,
    is_active: i32,
    created_by: String,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
}

pub struct SqliteExamRepository {
    pool: SqlitePool,
}

impl SqliteExamRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_exam(row: ExamRow) -> Result<ExamRecord> {
        Ok(ExamRecord {
            id: Uuid::parse_str(&row.id).map_err(|e| AppError::Database(e.to_string()))?,
            branch: Branch::parse(&row.branch)
                .ok_or_else(|| AppError::Database(format!("Invalid branch: {}", row.branch)))?,
            semester: row.semester,
            subject: row.subject,
            subject_code: row.subject_code,
            exam_date: row.exam_date,
            exam_time: row.exam_time,
            duration_minutes: row.duration_minutes,
            venue: row.venue,
            room_number: row.room_number,
            invigilator: row.invigilator,
            is_active: row.is_active != 0,
            created_by: Uuid::parse_str(&row.created_by)
                .map_err(|e| AppError::Database(e.to_string()))?,
            created_at: DateTime::from_naive_utc_and_offset(row.created_at, Utc),
            updated_at: DateTime::from_naive_utc_and_offset(row.updated_at, Utc),
        })
    }
}

#[async_trait]
impl ExamRepository for SqliteExamRepository {
    async fn create(&self, exam: ExamRecord) -> Result<ExamRecord> {
        sqlx::query(
            r#"
            INSERT INTO exam_records (
                id, branch, semester, subject, subject_code, exam_date,
                exam_time, duration_minutes, venue, room_number, invigilator,
                is_active, created_by, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(exam.id.to_string())
        .bind(exam.branch.as_str())
        .bind(exam.semester)
        .bind(&exam.subject)
        .bind(&exam.subject_code)
        .bind(exam.exam_date)
        .bind(&exam.exam_time)
        .bind(exam.duration_minutes)
        .bind(&exam.venue)
        .bind(&exam.room_number)
        .bind(&exam.invigilator)
        .bind(exam.is_active as i32)
        .bind(exam.created_by.to_string())
        .bind(exam.created_at.naive_utc())
        .bind(exam.updated_at.naive_utc())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        self.find_by_id(exam.id)
            .await?
            .ok_or_else(|| AppError::Database("Failed to retrieve created exam".to_string()))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<ExamRecord>> {
        let row = sqlx::query_as::<_, ExamRow>(
            r#"
            SELECT id, branch, semester, subject, subject_code, exam_date,
                   exam_time, duration_minutes, venue, room_number, invigilator,
                   is_active, created_by, created_at, updated_at
            FROM exam_records
            WHERE id = ?
            "#,
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        match row {
            Some(r) => Ok(Some(Self::row_to_exam(r)?)),
            None => Ok(None),
        }
    }

    async fn list_active(&self) -> Result<Vec<ExamRecord>> {
        let rows = sqlx::query_as::<_, ExamRow>(
            r#"
            SELECT id, branch, semester, subject, subject_code, exam_date,
                   exam_time, duration_minutes, venue, room_number, invigilator,
                   is_active, created_by, created_at, updated_at
            FROM exam_records
            WHERE is_active = 1
            ORDER BY exam_date ASC, exam_time ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        rows.into_iter().map(Self::row_to_exam).collect()
    }

    async fn deactivate(&self, id: Uuid) -> Result<ExamRecord> {
        let now = Utc::now().naive_utc();

        let result =
            sqlx::query("UPDATE exam_records SET is_active = 0, updated_at = ? WHERE id = ?")
                .bind(now)
                .bind(id.to_string())
                .execute(&self.pool)
                .await
                .map_err(|e| AppError::Database(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Exam record {} not found", id)));
        }

        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::Database("Failed to retrieve exam record".to_string()))
    }
}
