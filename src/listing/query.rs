//! Explicit filter structs built from user-supplied query parameters.
//! Every recognized option is a named field; unset or `"all"` means no
//! constraint; anything else that fails to parse is a validation error.

use crate::{
    domain::{
        Announcement, AnnouncementCategory, Audience, Branch, Event, EventCategory, ExamRecord,
        ItemCategory, ItemStatus, LostItem, Priority,
    },
    error::{AppError, Result},
};

/// Collapses the `"all"` sentinel (and blank input) to "no constraint".
pub fn constraint(value: Option<&str>) -> Option<&str> {
    match value {
        Some(v) if !v.is_empty() && v != "all" => Some(v),
        _ => None,
    }
}

/// Case-insensitive substring match over a fixed set of fields.
pub fn text_match(search: &str, fields: &[&str]) -> bool {
    let needle = search.to_lowercase();
    fields.iter().any(|f| f.to_lowercase().contains(&needle))
}

fn parse_filter<T>(
    value: Option<&str>,
    parse: impl Fn(&str) -> Option<T>,
    what: &str,
) -> Result<Option<T>> {
    match constraint(value) {
        None => Ok(None),
        Some(v) => parse(v)
            .map(Some)
            .ok_or_else(|| AppError::BadRequest(format!("Invalid {} filter: {}", what, v))),
    }
}

#[derive(Debug, Default)]
pub struct AnnouncementFilter {
    pub category: Option<AnnouncementCategory>,
    pub priority: Option<Priority>,
    pub audience: Option<Audience>,
}

impl AnnouncementFilter {
    pub fn from_params(
        category: Option<&str>,
        priority: Option<&str>,
        audience: Option<&str>,
    ) -> Result<Self> {
        Ok(Self {
            category: parse_filter(category, AnnouncementCategory::parse, "category")?,
            priority: parse_filter(priority, Priority::parse, "priority")?,
            audience: parse_filter(audience, Audience::parse, "audience")?,
        })
    }

    pub fn matches(&self, a: &Announcement) -> bool {
        self.category.map_or(true, |c| a.category == c)
            && self.priority.map_or(true, |p| a.priority == p)
            && self.audience.map_or(true, |t| a.audience == t)
    }
}

#[derive(Debug, Default)]
pub struct EventFilter {
    pub category: Option<EventCategory>,
    pub search: Option<String>,
}

impl EventFilter {
    pub fn from_params(category: Option<&str>, search: Option<&str>) -> Result<Self> {
        Ok(Self {
            category: parse_filter(category, EventCategory::parse, "category")?,
            search: search.filter(|s| !s.is_empty()).map(str::to_string),
        })
    }

    pub fn matches(&self, e: &Event) -> bool {
        self.category.map_or(true, |c| e.category == c)
            && self.search.as_deref().map_or(true, |s| {
                text_match(s, &[&e.title, &e.description, &e.venue])
            })
    }
}

#[derive(Debug, Default)]
pub struct LostItemFilter {
    pub category: Option<ItemCategory>,
    pub status: Option<ItemStatus>,
    pub search: Option<String>,
}

impl LostItemFilter {
    pub fn from_params(
        category: Option<&str>,
        status: Option<&str>,
        search: Option<&str>,
    ) -> Result<Self> {
        Ok(Self {
            category: parse_filter(category, ItemCategory::parse, "category")?,
            status: parse_filter(status, ItemStatus::parse, "status")?,
            search: search.filter(|s| !s.is_empty()).map(str::to_string),
        })
    }

    pub fn matches(&self, item: &LostItem) -> bool {
        self.category.map_or(true, |c| item.category == c)
            && self.status.map_or(true, |s| item.status == s)
            && self.search.as_deref().map_or(true, |s| {
                text_match(s, &[&item.item_name, &item.description, &item.location_lost])
            })
    }
}

#[derive(Debug, Default)]
pub struct ExamFilter {
    pub branch: Option<Branch>,
    pub semester: Option<i32>,
}

impl ExamFilter {
    pub fn from_params(branch: Option<&str>, semester: Option<&str>) -> Result<Self> {
        let semester = match constraint(semester) {
            None => None,
            Some(v) => Some(v.parse::<i32>().map_err(|_| {
                AppError::BadRequest(format!("Invalid semester filter: {}", v))
            })?),
        };

        Ok(Self {
            branch: parse_filter(branch, Branch::parse, "branch")?,
            semester,
        })
    }

    pub fn matches(&self, exam: &ExamRecord) -> bool {
        self.branch.map_or(true, |b| exam.branch == b)
            && self.semester.map_or(true, |s| exam.semester == s)
    }
}
