//! Text feeds: the public RSS 2.0 feed for announcements and the CSV
//! export of upcoming exams. Both formats are fixed; treat changes here
//! as wire-format changes.

use crate::domain::{Announcement, ExamRecord};

const RSS_ITEM_LIMIT: usize = 20;

/// Builds the RSS 2.0 document for the given effective announcements:
/// one channel, newest-first items capped at 20, each carrying
/// title/description/link/guid/pubDate/category.
pub fn announcements_rss(announcements: &[Announcement], base_url: &str) -> String {
    let mut newest_first: Vec<&Announcement> = announcements.iter().collect();
    newest_first.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    let mut rss = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\" ?>\n");
    rss.push_str("<rss version=\"2.0\">\n<channel>\n");
    rss.push_str("<title>Campus Hub Announcements</title>\n");
    rss.push_str("<description>Latest announcements from Campus Hub</description>\n");
    rss.push_str(&format!("<link>{}</link>\n", xml_escape(base_url)));

    for announcement in newest_first.into_iter().take(RSS_ITEM_LIMIT) {
        let link = format!("{}/announcements/{}", base_url, announcement.id);
        rss.push_str("<item>\n");
        rss.push_str(&format!("<title>{}</title>\n", xml_escape(&announcement.title)));
        rss.push_str(&format!(
            "<description>{}</description>\n",
            xml_escape(&announcement.content)
        ));
        rss.push_str(&format!("<link>{}</link>\n", xml_escape(&link)));
        rss.push_str(&format!("<guid>{}</guid>\n", xml_escape(&link)));
        rss.push_str(&format!(
            "<pubDate>{}</pubDate>\n",
            announcement.created_at.to_rfc2822()
        ));
        rss.push_str(&format!(
            "<category>{}</category>\n",
            announcement.category.as_str()
        ));
        rss.push_str("</item>\n");
    }

    rss.push_str("</channel>\n</rss>");
    rss
}

/// Renders the exam timetable export: fixed 10-column header, every field
/// double-quoted, duration spelled out as "<n> minutes", blank for the
/// optional room and invigilator.
pub fn timetable_csv(exams: &[ExamRecord]) -> String {
    let mut csv =
        String::from("Date,Time,Subject,Subject Code,Branch,Semester,Venue,Room,Duration,Invigilator\n");

    for exam in exams {
        let fields = [
            exam.exam_date.format("%Y-%m-%d").to_string(),
            exam.exam_time.clone(),
            exam.subject.clone(),
            exam.subject_code.clone(),
            exam.branch.as_str().to_string(),
            exam.semester.to_string(),
            exam.venue.clone(),
            exam.room_number.clone().unwrap_or_default(),
            format!("{} minutes", exam.duration_minutes),
            exam.invigilator.clone().unwrap_or_default(),
        ];

        let row: Vec<String> = fields
            .iter()
            .map(|f| format!("\"{}\"", f.replace('"', "\"\"")))
            .collect();
        csv.push_str(&row.join(","));
        csv.push('\n');
    }

    csv
}

fn xml_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        AnnouncementCategory, Audience, Branch, Priority,
    };
    use chrono::{Duration, Utc};
    use uuid::Uuid;

    fn announcement(title: &str, age_hours: i64) -> Announcement {
        let created = Utc::now() - Duration::hours(age_hours);
        Announcement {
            id: Uuid::new_v4(),
            title: title.to_string(),
            content: "content".to_string(),
            category: AnnouncementCategory::Academic,
            priority: Priority::Medium,
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
    fn csv_matches_fixed_format() {
        let exam = ExamRecord {
            id: Uuid::new_v4(),
            branch: Branch::Cse,
            semester: 4,
            subject: "Algorithms".to_string(),
            subject_code: "CS301".to_string(),
            exam_date: "2024-05-01".parse().unwrap(),
            exam_time: "09:00".to_string(),
            duration_minutes: 180,
            venue: "Hall A".to_string(),
            room_number: None,
            invigilator: None,
            is_active: true,
            created_by: Uuid::new_v4(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let csv = timetable_csv(&[exam]);
        let expected = "Date,Time,Subject,Subject Code,Branch,Semester,Venue,Room,Duration,Invigilator\n\
                        \"2024-05-01\",\"09:00\",\"Algorithms\",\"CS301\",\"cse\",\"4\",\"Hall A\",\"\",\"180 minutes\",\"\"\n";
        assert_eq!(csv, expected);
    }

    #[test]
    fn csv_doubles_embedded_quotes() {
        let exam = ExamRecord {
            id: Uuid::new_v4(),
            branch: Branch::It,
            semester: 2,
            subject: "Lab \"B\"".to_string(),
            subject_code: "IT102".to_string(),
            exam_date: "2024-06-01".parse().unwrap(),
            exam_time: "14:00".to_string(),
            duration_minutes: 90,
            venue: "Lab Block".to_string(),
            room_number: Some("L-2".to_string()),
            invigilator: Some("Dr. Rao".to_string()),
            is_active: true,
            created_by: Uuid::new_v4(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let csv = timetable_csv(&[exam]);
        assert!(csv.contains("\"Lab \"\"B\"\"\""));
        assert!(csv.contains("\"90 minutes\""));
        assert!(csv.contains("\"L-2\""));
    }

    #[test]
    fn rss_is_newest_first_and_capped_at_twenty() {
        let announcements: Vec<_> = (0..25).map(|i| announcement(&format!("a{}", i), i)).collect();
        let rss = announcements_rss(&announcements, "https://campus.example.edu");

        assert_eq!(rss.matches("<item>").count(), 20);
        // a0 is the newest, so it leads the feed.
        let first = rss.find("<title>a0</title>").unwrap();
        let second = rss.find("<title>a1</title>").unwrap();
        assert!(first < second);
        // a24 fell off the end of the capped feed.
        assert!(!rss.contains("<title>a24</title>"));
    }

    #[test]
    fn rss_carries_the_required_item_elements() {
        let a = announcement("Exam schedule out", 1);
        let id = a.id;
        let rss = announcements_rss(&[a], "https://campus.example.edu");

        assert!(rss.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\" ?>"));
        assert!(rss.contains("<rss version=\"2.0\">"));
        assert!(rss.contains(&format!(
            "<link>https://campus.example.edu/announcements/{}</link>",
            id
        )));
        assert!(rss.contains(&format!(
            "<guid>https://campus.example.edu/announcements/{}</guid>",
            id
        )));
        assert!(rss.contains("<category>academic</category>"));
        assert!(rss.contains("<pubDate>"));
    }

    #[test]
    fn rss_escapes_markup_in_titles() {
        let a = announcement("Results < expected & more", 1);
        let rss = announcements_rss(&[a], "https://campus.example.edu");
        assert!(rss.contains("<title>Results &lt; expected &amp; more</title>"));
    }
}
