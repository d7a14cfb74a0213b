//! Per-listing sort orders. All comparators are stable-sort friendly.

use std::cmp::Ordering;

use crate::domain::{Announcement, Event, ExamRecord, LostItem, QueueStatus};

/// Announcements: priority rank descending (high first), then newest first.
pub fn by_priority_then_newest(a: &Announcement, b: &Announcement) -> Ordering {
    a.priority
        .rank()
        .cmp(&b.priority.rank())
        .then_with(|| b.created_at.cmp(&a.created_at))
}

/// Default event listing: soonest first.
pub fn by_event_date(a: &Event, b: &Event) -> Ordering {
    a.date.cmp(&b.date)
}

/// Past-events view: most recent past first.
pub fn by_event_date_desc(a: &Event, b: &Event) -> Ordering {
    b.date.cmp(&a.date)
}

/// Exams: date ascending, then "HH:MM" time ascending (lexical is
/// chronological for 24-hour times).
pub fn by_exam_schedule(a: &ExamRecord, b: &ExamRecord) -> Ordering {
    a.exam_date
        .cmp(&b.exam_date)
        .then_with(|| a.exam_time.cmp(&b.exam_time))
}

/// Lost items: newest report first.
pub fn by_newest_report(a: &LostItem, b: &LostItem) -> Ordering {
    b.created_at.cmp(&a.created_at)
}

/// Queue history: chronological, for charting.
pub fn chronological(a: &QueueStatus, b: &QueueStatus) -> Ordering {
    a.created_at.cmp(&b.created_at)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AnnouncementCategory, Audience, Priority};
    use chrono::{Duration, Utc};
    use uuid::Uuid;

    fn announcement(priority: Priority, age_hours: i64) -> Announcement {
        let created = Utc::now() - Duration::hours(age_hours);
        Announcement {
            id: Uuid::new_v4(),
            title: "t".to_string(),
            content: "c".to_string(),
            category: AnnouncementCategory::General,
            priority,
            audience: Audience::All,
            effective_from: created,
            effective_until: None,
            is_active: true,
            created_by: Uuid::new_v4(),
            created_at: created,
            updated_at: created,
        }
    }

    #[test]
    fn high_priority_sorts_before_lower_regardless_of_age() {
        let mut list = vec![
            announcement(Priority::Low, 1),
            announcement(Priority::High, 48),
            announcement(Priority::Medium, 2),
        ];
        list.sort_by(by_priority_then_newest);

        let priorities: Vec<_> = list.iter().map(|a| a.priority).collect();
        assert_eq!(priorities, vec![Priority::High, Priority::Medium, Priority::Low]);
    }

    #[test]
    fn equal_priority_breaks_ties_newest_first() {
        let older = announcement(Priority::Medium, 10);
        let newer = announcement(Priority::Medium, 1);
        let mut list = vec![older.clone(), newer.clone()];
        list.sort_by(by_priority_then_newest);
        assert_eq!(list[0].id, newer.id);
        assert_eq!(list[1].id, older.id);
    }

    #[test]
    fn sorted_announcements_have_no_adjacent_violations() {
        let mut list: Vec<_> = (0..20)
            .map(|i| {
                let p = match i % 3 {
                    0 => Priority::Low,
                    1 => Priority::High,
                    _ => Priority::Medium,
                };
                announcement(p, i)
            })
            .collect();
        list.sort_by(by_priority_then_newest);

        for pair in list.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            assert!(a.priority.rank() <= b.priority.rank());
            if a.priority.rank() == b.priority.rank() {
                assert!(a.created_at >= b.created_at);
            }
        }
    }

    #[test]
    fn exam_schedule_orders_by_date_then_time() {
        use crate::domain::Branch;

        let exam = |date: &str, time: &str| ExamRecord {
            id: Uuid::new_v4(),
            branch: Branch::Cse,
            semester: 4,
            subject: "s".to_string(),
            subject_code: "c".to_string(),
            exam_date: date.parse().unwrap(),
            exam_time: time.to_string(),
            duration_minutes: 60,
            venue: "v".to_string(),
            room_number: None,
            invigilator: None,
            is_active: true,
            created_by: Uuid::new_v4(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let mut list = vec![
            exam("2024-05-02", "09:00"),
            exam("2024-05-01", "14:00"),
            exam("2024-05-01", "09:00"),
        ];
        list.sort_by(by_exam_schedule);

        let schedule: Vec<_> = list
            .iter()
            .map(|e| (e.exam_date.to_string(), e.exam_time.clone()))
            .collect();
        assert_eq!(
            schedule,
            vec![
                ("2024-05-01".to_string(), "09:00".to_string()),
                ("2024-05-01".to_string(), "14:00".to_string()),
                ("2024-05-02".to_string(), "09:00".to_string()),
            ]
        );
    }
}
