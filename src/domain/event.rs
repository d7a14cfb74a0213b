use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub date: NaiveDate,
    /// Start time in 24-hour "HH:MM" form, lexically sortable.
    pub time: String,
    pub venue: String,
    pub organizer: String,
    pub category: EventCategory,
    pub image_url: Option<String>,
    pub registration_link: Option<String>,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Event {
    /// An event still counts as upcoming on its own calendar date.
    pub fn is_upcoming(&self, today: NaiveDate) -> bool {
        self.date >= today
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventCategory {
    Academic,
    Cultural,
    Sports,
    Workshop,
    Seminar,
    Other,
}

impl EventCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventCategory::Academic => "academic",
            EventCategory::Cultural => "cultural",
            EventCategory::Sports => "sports",
            EventCategory::Workshop => "workshop",
            EventCategory::Seminar => "seminar",
            EventCategory::Other => "other",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "academic" => Some(EventCategory::Academic),
            "cultural" => Some(EventCategory::Cultural),
            "sports" => Some(EventCategory::Sports),
            "workshop" => Some(EventCategory::Workshop),
            "seminar" => Some(EventCategory::Seminar),
            "other" => Some(EventCategory::Other),
            _ => None,
        }
    }
}
