//! The shared listing pipeline: every content listing runs
//! fetch -> filter -> sort -> paginate, with the filter/sort/paginate
//! steps implemented here as plain functions over in-memory records.

pub mod aggregate;
pub mod group;
pub mod order;
pub mod query;

pub use aggregate::latest_per_cafeteria;
pub use group::group_by_exam_date;
pub use query::{constraint, AnnouncementFilter, EventFilter, ExamFilter, LostItemFilter};

/// Pagination with hardened inputs: missing, zero, or negative values
/// clamp to 1 (limit defaults to 10), so the offset can never go negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    page: i64,
    limit: i64,
}

impl Page {
    pub const DEFAULT_LIMIT: i64 = 10;

    pub fn clamped(page: Option<i64>, limit: Option<i64>) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            limit: limit.unwrap_or(Self::DEFAULT_LIMIT).max(1),
        }
    }

    pub fn page(&self) -> i64 {
        self.page
    }

    pub fn limit(&self) -> i64 {
        self.limit
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.limit
    }

    pub fn total_pages(&self, total: usize) -> i64 {
        (total as i64 + self.limit - 1) / self.limit
    }

    /// Applies after filtering and sorting.
    pub fn slice<T>(&self, items: Vec<T>) -> Vec<T> {
        items
            .into_iter()
            .skip(self.offset() as usize)
            .take(self.limit as usize)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_first_page_of_ten() {
        let page = Page::clamped(None, None);
        assert_eq!(page.page(), 1);
        assert_eq!(page.limit(), 10);
        assert_eq!(page.offset(), 0);
    }

    #[test]
    fn zero_and_negative_inputs_clamp_to_one() {
        for bad in [Some(0), Some(-3)] {
            let page = Page::clamped(bad, bad);
            assert_eq!(page.page(), 1);
            assert_eq!(page.limit(), 1);
            assert_eq!(page.offset(), 0);
        }
    }

    #[test]
    fn slices_after_the_requested_offset() {
        let page = Page::clamped(Some(2), Some(3));
        assert_eq!(page.offset(), 3);
        assert_eq!(page.slice((1..=10).collect::<Vec<_>>()), vec![4, 5, 6]);
    }

    #[test]
    fn slice_past_the_end_is_empty() {
        let page = Page::clamped(Some(5), Some(10));
        assert!(page.slice(vec![1, 2, 3]).is_empty());
    }

    #[test]
    fn total_pages_rounds_up() {
        let page = Page::clamped(None, Some(10));
        assert_eq!(page.total_pages(0), 0);
        assert_eq!(page.total_pages(10), 1);
        assert_eq!(page.total_pages(11), 2);
    }
}
