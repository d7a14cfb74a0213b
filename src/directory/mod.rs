//! Static campus-navigation directory. Locations are fixed reference data
//! loaded once at startup, either from a JSON file or from the built-in
//! campus map; nothing here touches the database.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Two buildings are "nearby" when both coordinate deltas are under this.
const NEARBY_RADIUS: f64 = 20.0;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Coordinates {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Location {
    pub id: u32,
    pub name: String,
    pub category: String,
    pub description: String,
    pub floor: String,
    pub coordinates: Coordinates,
    pub amenities: Vec<String>,
    pub hours: String,
    pub contact: Option<String>,
}

pub struct LocationDirectory {
    locations: Vec<Location>,
}

impl LocationDirectory {
    /// Built-in campus map, used when no locations file is configured.
    pub fn builtin() -> Self {
        Self {
            locations: builtin_locations(),
        }
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            AppError::Internal(format!(
                "Failed to read locations file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;
        let locations: Vec<Location> = serde_json::from_str(&raw)
            .map_err(|e| AppError::Internal(format!("Invalid locations file: {}", e)))?;

        Ok(Self { locations })
    }

    pub fn all(&self) -> &[Location] {
        &self.locations
    }

    pub fn find(&self, id: u32) -> Option<&Location> {
        self.locations.iter().find(|l| l.id == id)
    }

    /// Category filter plus case-insensitive name/description search.
    pub fn search(&self, category: Option<&str>, query: Option<&str>) -> Vec<&Location> {
        self.locations
            .iter()
            .filter(|l| category.map_or(true, |c| l.category == c))
            .filter(|l| {
                query.map_or(true, |q| {
                    let needle = q.to_lowercase();
                    l.name.to_lowercase().contains(&needle)
                        || l.description.to_lowercase().contains(&needle)
                })
            })
            .collect()
    }

    /// Distinct categories in first-appearance order.
    pub fn categories(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        for location in &self.locations {
            if !seen.contains(&location.category.as_str()) {
                seen.push(location.category.as_str());
            }
        }
        seen
    }

    /// Locations whose x and y deltas from `location` are both under the
    /// nearby radius, excluding the location itself.
    pub fn nearby(&self, location: &Location) -> Vec<&Location> {
        self.locations
            .iter()
            .filter(|other| other.id != location.id)
            .filter(|other| {
                (other.coordinates.x - location.coordinates.x).abs() < NEARBY_RADIUS
                    && (other.coordinates.y - location.coordinates.y).abs() < NEARBY_RADIUS
            })
            .collect()
    }
}

fn builtin_locations() -> Vec<Location> {
    let location = |id: u32,
                    name: &str,
                    category: &str,
                    description: &str,
                    floor: &str,
                    x: f64,
                    y: f64,
                    amenities: &[&str],
                    hours: &str,
                    contact: Option<&str>| Location {
        id,
        name: name.to_string(),
        category: category.to_string(),
        description: description.to_string(),
        floor: floor.to_string(),
        coordinates: Coordinates { x, y },
        amenities: amenities.iter().map(|a| a.to_string()).collect(),
        hours: hours.to_string(),
        contact: contact.map(str::to_string),
    };

    vec![
        location(
            1,
            "Main Library",
            "academic",
            "Central library with study halls and digital resources",
            "Ground to 4th floor",
            10.0,
            20.0,
            &["WiFi", "Study Rooms", "Printing", "AC"],
            "8:00 AM - 10:00 PM",
            Some("library@campus.edu"),
        ),
        location(
            2,
            "Main Cafeteria",
            "food",
            "Primary dining hall serving breakfast, lunch and dinner",
            "Ground floor",
            25.0,
            30.0,
            &["Seating", "Vegetarian Options", "Snack Counter"],
            "7:00 AM - 9:00 PM",
            None,
        ),
        location(
            3,
            "CS Department",
            "academic",
            "Computer Science department with labs and faculty offices",
            "2nd and 3rd floor, Block B",
            40.0,
            15.0,
            &["Computer Labs", "WiFi", "Seminar Hall"],
            "9:00 AM - 6:00 PM",
            Some("cs.office@campus.edu"),
        ),
        location(
            4,
            "Administration Building",
            "administration",
            "Admissions, fees, certificates and administration offices",
            "Ground and 1st floor",
            55.0,
            40.0,
            &["Help Desk", "Document Services"],
            "9:00 AM - 5:00 PM",
            Some("admin@campus.edu"),
        ),
        location(
            5,
            "Sports Complex",
            "recreation",
            "Indoor courts, gym and swimming pool",
            "Ground floor",
            80.0,
            70.0,
            &["Gym", "Badminton Courts", "Swimming Pool", "Lockers"],
            "6:00 AM - 9:00 PM",
            None,
        ),
        location(
            6,
            "Student Center",
            "student",
            "Club rooms, student council office and common areas",
            "1st floor",
            30.0,
            45.0,
            &["Club Rooms", "Lounge", "Notice Boards"],
            "8:00 AM - 8:00 PM",
            None,
        ),
        location(
            7,
            "Health Center",
            "health",
            "Campus clinic with a doctor on call",
            "Ground floor",
            60.0,
            25.0,
            &["First Aid", "Pharmacy", "Ambulance"],
            "24 hours",
            Some("health@campus.edu"),
        ),
        location(
            8,
            "Parking Garage",
            "transportation",
            "Multi-level parking for students and staff",
            "Basement to 2nd floor",
            90.0,
            10.0,
            &["Two Wheeler Zone", "EV Charging"],
            "24 hours",
            None,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_directory_has_the_campus_map() {
        let directory = LocationDirectory::builtin();
        assert_eq!(directory.all().len(), 8);
        assert!(directory.find(1).is_some());
        assert!(directory.find(99).is_none());
    }

    #[test]
    fn search_filters_by_category_and_query() {
        let directory = LocationDirectory::builtin();

        let academic = directory.search(Some("academic"), None);
        assert_eq!(academic.len(), 2);

        let library = directory.search(None, Some("library"));
        assert_eq!(library.len(), 1);
        assert_eq!(library[0].name, "Main Library");

        let academic_labs = directory.search(Some("academic"), Some("labs"));
        assert_eq!(academic_labs.len(), 1);
        assert_eq!(academic_labs[0].name, "CS Department");
    }

    #[test]
    fn categories_are_distinct_and_in_first_appearance_order() {
        let directory = LocationDirectory::builtin();
        let categories = directory.categories();

        assert_eq!(categories[0], "academic");
        let mut deduped = categories.clone();
        deduped.dedup();
        assert_eq!(categories, deduped);
    }

    #[test]
    fn nearby_uses_per_axis_deltas_and_excludes_self() {
        let directory = LocationDirectory::builtin();
        let library = directory.find(1).unwrap();

        let nearby = directory.nearby(library);
        assert!(!nearby.iter().any(|l| l.id == library.id));
        // Main Cafeteria is at (25, 30): dx 15, dy 10, both under 20.
        assert!(nearby.iter().any(|l| l.name == "Main Cafeteria"));
        // CS Department is at (40, 15): dx 30 rules it out even though dy 5.
        assert!(!nearby.iter().any(|l| l.name == "CS Department"));
    }
}
