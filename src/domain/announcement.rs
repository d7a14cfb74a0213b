use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Announcement {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub category: AnnouncementCategory,
    pub priority: Priority,
    pub audience: Audience,
    pub effective_from: DateTime<Utc>,
    pub effective_until: Option<DateTime<Utc>>,
    pub is_active: bool,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Announcement {
    /// An announcement is shown while `now` sits inside its effective
    /// window (inclusive on both ends) and it has not been archived.
    /// A future `effective_from` hides it regardless of `is_active`.
    pub fn is_effective(&self, now: DateTime<Utc>) -> bool {
        self.is_active
            && self.effective_from <= now
            && self.effective_until.map_or(true, |until| until >= now)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnnouncementCategory {
    Academic,
    Holiday,
    Event,
    Emergency,
    General,
}

impl AnnouncementCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnnouncementCategory::Academic => "academic",
            AnnouncementCategory::Holiday => "holiday",
            AnnouncementCategory::Event => "event",
            AnnouncementCategory::Emergency => "emergency",
            AnnouncementCategory::General => "general",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "academic" => Some(AnnouncementCategory::Academic),
            "holiday" => Some(AnnouncementCategory::Holiday),
            "event" => Some(AnnouncementCategory::Event),
            "emergency" => Some(AnnouncementCategory::Emergency),
            "general" => Some(AnnouncementCategory::General),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    /// Explicit rank map for sorting: high before medium before low.
    /// "high"/"medium"/"low" do not sort correctly as strings.
    pub fn rank(&self) -> u8 {
        match self {
            Priority::High => 0,
            Priority::Medium => 1,
            Priority::Low => 2,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "high" => Some(Priority::High),
            "medium" => Some(Priority::Medium),
            "low" => Some(Priority::Low),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Audience {
    All,
    Students,
    Faculty,
    Staff,
}

impl Audience {
    pub fn as_str(&self) -> &'static str {
        match self {
            Audience::All => "all",
            Audience::Students => "students",
            Audience::Faculty => "faculty",
            Audience::Staff => "staff",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "all" => Some(Audience::All),
            "students" => Some(Audience::Students),
            "faculty" => Some(Audience::Faculty),
            "staff" => Some(Audience::Staff),
            _ => None,
        }
    }
}
