use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LostItem {
    pub id: Uuid,
    pub item_name: String,
    pub description: String,
    pub category: ItemCategory,
    pub location_lost: String,
    pub date_lost: NaiveDate,
    pub contact_info: String,
    pub status: ItemStatus,
    pub reported_by: Uuid,
    pub claimed_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemCategory {
    Electronics,
    Books,
    Clothing,
    Accessories,
    Documents,
    Other,
}

impl ItemCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemCategory::Electronics => "electronics",
            ItemCategory::Books => "books",
            ItemCategory::Clothing => "clothing",
            ItemCategory::Accessories => "accessories",
            ItemCategory::Documents => "documents",
            ItemCategory::Other => "other",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "electronics" => Some(ItemCategory::Electronics),
            "books" => Some(ItemCategory::Books),
            "clothing" => Some(ItemCategory::Clothing),
            "accessories" => Some(ItemCategory::Accessories),
            "documents" => Some(ItemCategory::Documents),
            "other" => Some(ItemCategory::Other),
            _ => None,
        }
    }
}

/// Items are never deleted; they move lost -> found -> returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemStatus {
    Lost,
    Found,
    Returned,
}

impl ItemStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemStatus::Lost => "lost",
            ItemStatus::Found => "found",
            ItemStatus::Returned => "returned",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "lost" => Some(ItemStatus::Lost),
            "found" => Some(ItemStatus::Found),
            "returned" => Some(ItemStatus::Returned),
            _ => None,
        }
    }
}
