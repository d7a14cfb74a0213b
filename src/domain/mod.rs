pub mod announcement;
pub mod event;
pub mod exam;
pub mod lost_item;
pub mod queue;
pub mod user;

pub use announcement::{Announcement, AnnouncementCategory, Audience, Priority};
pub use event::{Event, EventCategory};
pub use exam::{Branch, ExamRecord};
pub use lost_item::{ItemCategory, ItemStatus, LostItem};
pub use queue::{Cafeteria, CongestionLevel, QueueStatus};
pub use user::{CreateUserRequest, User};
