use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One crowd-sourced congestion sample for a cafeteria. The feed is a
/// time-ordered log; the "current" view reduces it to the latest sample
/// per cafeteria.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueueStatus {
    pub id: Uuid,
    pub cafeteria: Cafeteria,
    pub level: CongestionLevel,
    pub note: Option<String>,
    pub estimated_wait_minutes: Option<i32>,
    pub reported_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cafeteria {
    Main,
    North,
    South,
    East,
    West,
}

impl Cafeteria {
    pub fn as_str(&self) -> &'static str {
        match self {
            Cafeteria::Main => "main",
            Cafeteria::North => "north",
            Cafeteria::South => "south",
            Cafeteria::East => "east",
            Cafeteria::West => "west",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "main" => Some(Cafeteria::Main),
            "north" => Some(Cafeteria::North),
            "south" => Some(Cafeteria::South),
            "east" => Some(Cafeteria::East),
            "west" => Some(Cafeteria::West),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CongestionLevel {
    High,
    Medium,
    Low,
}

impl CongestionLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            CongestionLevel::High => "high",
            CongestionLevel::Medium => "medium",
            CongestionLevel::Low => "low",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "high" => Some(CongestionLevel::High),
            "medium" => Some(CongestionLevel::Medium),
            "low" => Some(CongestionLevel::Low),
            _ => None,
        }
    }
}
