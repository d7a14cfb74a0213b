//! Calendar-date bucketing for exam timetables.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::domain::ExamRecord;

/// Partitions exams into per-date buckets for presentation. Bucket keys
/// come out in date order; within a bucket the input's relative order is
/// preserved.
pub fn group_by_exam_date(exams: Vec<ExamRecord>) -> BTreeMap<NaiveDate, Vec<ExamRecord>> {
    let mut buckets: BTreeMap<NaiveDate, Vec<ExamRecord>> = BTreeMap::new();

    for exam in exams {
        buckets.entry(exam.exam_date).or_default().push(exam);
    }

    buckets
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Branch;
    use chrono::Utc;
    use uuid::Uuid;

    fn exam(date: &str, time: &str) -> ExamRecord {
        ExamRecord {
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
        }
    }

    #[test]
    fn every_exam_lands_in_its_own_date_bucket() {
        let input = vec![
            exam("2024-05-01", "09:00"),
            exam("2024-05-02", "09:00"),
            exam("2024-05-01", "14:00"),
        ];
        let input_ids: Vec<_> = input.iter().map(|e| e.id).collect();

        let buckets = group_by_exam_date(input);

        let mut bucketed_ids = Vec::new();
        for (date, exams) in &buckets {
            for e in exams {
                assert_eq!(e.exam_date, *date);
                bucketed_ids.push(e.id);
            }
        }

        // Nothing lost, nothing duplicated.
        assert_eq!(bucketed_ids.len(), input_ids.len());
        for id in &input_ids {
            assert!(bucketed_ids.contains(id));
        }
    }

    #[test]
    fn relative_order_within_a_bucket_is_preserved() {
        let first = exam("2024-05-01", "09:00");
        let second = exam("2024-05-01", "14:00");
        let buckets = group_by_exam_date(vec![first.clone(), second.clone()]);

        let day: NaiveDate = "2024-05-01".parse().unwrap();
        let ids: Vec<_> = buckets[&day].iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![first.id, second.id]);
    }

    #[test]
    fn bucket_keys_come_out_in_date_order() {
        let buckets = group_by_exam_date(vec![
            exam("2024-05-03", "09:00"),
            exam("2024-05-01", "09:00"),
            exam("2024-05-02", "09:00"),
        ]);

        let dates: Vec<_> = buckets.keys().map(|d| d.to_string()).collect();
        assert_eq!(dates, vec!["2024-05-01", "2024-05-02", "2024-05-03"]);
    }
}
