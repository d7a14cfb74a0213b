pub mod announcements;
pub mod auth;
pub mod cafeteria;
pub mod dashboard;
pub mod events;
pub mod lost_found;
pub mod navigation;
pub mod root;
pub mod timetable;
