use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExamRecord {
    pub id: Uuid,
    pub branch: Branch,
    pub semester: i32,
    pub subject: String,
    pub subject_code: String,
    pub exam_date: NaiveDate,
    /// 24-hour "HH:MM"; string comparison gives chronological order.
    pub exam_time: String,
    pub duration_minutes: i32,
    pub venue: String,
    pub room_number: Option<String>,
    pub invigilator: Option<String>,
    pub is_active: bool,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ExamRecord {
    /// Upcoming at calendar-date granularity: an exam scheduled today is
    /// still upcoming. Deactivated records never are.
    pub fn is_upcoming(&self, today: NaiveDate) -> bool {
        self.is_active && self.exam_date >= today
    }

    /// Whole days until an upcoming exam. Zero on exam day.
    pub fn days_left(&self, today: NaiveDate) -> i64 {
        (self.exam_date - today).num_days()
    }

    /// Whole days since a past exam.
    pub fn days_ago(&self, today: NaiveDate) -> i64 {
        (today - self.exam_date).num_days()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Branch {
    Cse,
    Ece,
    Mech,
    Civil,
    Eee,
    It,
    Other,
}

impl Branch {
    pub fn as_str(&self) -> &'static str {
        match self {
            Branch::Cse => "cse",
            Branch::Ece => "ece",
            Branch::Mech => "mech",
            Branch::Civil => "civil",
            Branch::Eee => "eee",
            Branch::It => "it",
            Branch::Other => "other",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "cse" => Some(Branch::Cse),
            "ece" => Some(Branch::Ece),
            "mech" => Some(Branch::Mech),
            "civil" => Some(Branch::Civil),
            "eee" => Some(Branch::Eee),
            "it" => Some(Branch::It),
            "other" => Some(Branch::Other),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exam(date: &str, active: bool) -> ExamRecord {
        ExamRecord {
            id: Uuid::new_v4(),
            branch: Branch::Cse,
            semester: 4,
            subject: "Algorithms".to_string(),
            subject_code: "CS301".to_string(),
            exam_date: date.parse().unwrap(),
            exam_time: "09:00".to_string(),
            duration_minutes: 180,
            venue: "Hall A".to_string(),
            room_number: None,
            invigilator: None,
            is_active: active,
            created_by: Uuid::new_v4(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn exam_on_its_own_day_is_upcoming() {
        let e = exam("2024-05-01", true);
        assert!(e.is_upcoming("2024-05-01".parse().unwrap()));
        assert!(!e.is_upcoming("2024-05-02".parse().unwrap()));
    }

    #[test]
    fn inactive_exam_is_not_upcoming() {
        let e = exam("2024-05-01", false);
        assert!(!e.is_upcoming("2024-04-01".parse().unwrap()));
    }

    #[test]
    fn day_deltas() {
        let e = exam("2024-05-10", true);
        assert_eq!(e.days_left("2024-05-01".parse().unwrap()), 9);
        assert_eq!(e.days_left("2024-05-10".parse().unwrap()), 0);
        assert_eq!(e.days_ago("2024-05-13".parse().unwrap()), 3);
    }
}
