use std::num::NonZeroUsize;
use std::ops::Range;

use serde::{Deserialize, Serialize};

use super::query::QueryError;

/// Records per page when the caller does not choose.
pub const DEFAULT_PAGE_SIZE: usize = 35;

/// Validated, strictly positive page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct PageSize(NonZeroUsize);

impl PageSize {
    pub fn new(value: usize) -> Result<Self, QueryError> {
        NonZeroUsize::new(value)
            .map(Self)
            .ok_or(QueryError::InvalidPageSize(0))
    }

    pub const fn get(self) -> usize {
        self.0.get()
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self(NonZeroUsize::new(DEFAULT_PAGE_SIZE).unwrap_or(NonZeroUsize::MIN))
    }
}

impl TryFrom<i64> for PageSize {
    type Error = QueryError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        usize::try_from(value)
            .ok()
            .and_then(NonZeroUsize::new)
            .map(Self)
            .ok_or(QueryError::InvalidPageSize(value))
    }
}

impl From<PageSize> for i64 {
    fn from(value: PageSize) -> Self {
        i64::try_from(value.get()).unwrap_or(i64::MAX)
    }
}

pub fn total_pages(total: usize, size: PageSize) -> usize {
    total.div_ceil(size.get())
}

fn bounds(page: usize, size: PageSize, total: usize) -> Range<usize> {
    let start = page.saturating_sub(1).saturating_mul(size.get()).min(total);
    let end = start.saturating_add(size.get()).min(total);
    start..end
}

/// Pagination metadata for one rendered page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    pub current_page: usize,
    pub total_pages: usize,
    pub total_count: usize,
    pub page_size: usize,
    /// 1-based index of the first record shown; 0 when nothing is shown.
    pub first_index: usize,
    /// 1-based index of the last record shown; 0 when nothing is shown.
    pub last_index: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub info: PageInfo,
}

/// Slice out one page, clamping the request into `[1, total_pages]`.
///
/// An empty list yields zero pages and an empty slice.
pub fn paginate<T: Clone>(items: &[T], requested_page: usize, size: PageSize) -> Page<T> {
    let pages = total_pages(items.len(), size);
    let current_page = requested_page.clamp(1, pages.max(1));
    let range = bounds(current_page, size, items.len());

    let info = PageInfo {
        current_page,
        total_pages: pages,
        total_count: items.len(),
        page_size: size.get(),
        first_index: if range.is_empty() { 0 } else { range.start + 1 },
        last_index: range.end,
    };

    Page {
        items: items[range].to_vec(),
        info,
    }
}

/// Page position held by an interactive caller across navigation requests.
///
/// Requests outside the valid range leave the cursor where it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageCursor {
    current: usize,
    total_pages: usize,
    size: PageSize,
}

impl PageCursor {
    pub fn new(total_items: usize, size: PageSize) -> Self {
        Self {
            current: 1,
            total_pages: total_pages(total_items, size),
            size,
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    /// Move to `page` if it exists. Returns whether the cursor moved.
    pub fn go_to(&mut self, page: usize) -> bool {
        if (1..=self.total_pages).contains(&page) {
            self.current = page;
            true
        } else {
            false
        }
    }

    /// Filter or sort changed: start over on page one of the new list.
    pub fn reset(&mut self, total_items: usize) {
        self.current = 1;
        self.total_pages = total_pages(total_items, self.size);
    }

    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        &items[bounds(self.current, self.size, items.len())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn size(value: usize) -> PageSize {
        PageSize::new(value).expect("positive size")
    }

    #[test]
    fn seventy_records_make_two_pages_of_thirty_five() {
        let items: Vec<usize> = (0..70).collect();

        let page = paginate(&items, 2, size(35));

        assert_eq!(page.info.total_pages, 2);
        assert_eq!(page.info.first_index, 36);
        assert_eq!(page.info.last_index, 70);
        assert_eq!(page.items.first(), Some(&35));
    }

    #[test]
    fn out_of_range_request_stays_on_last_valid_page() {
        let items: Vec<usize> = (0..70).collect();

        let page = paginate(&items, 3, size(35));
        assert_eq!(page.info.current_page, 2);

        let mut cursor = PageCursor::new(items.len(), size(35));
        assert!(cursor.go_to(2));
        assert!(!cursor.go_to(3));
        assert!(!cursor.go_to(0));
        assert_eq!(cursor.current(), 2);
    }

    #[test]
    fn empty_list_reports_zero_pages() {
        let items: Vec<usize> = Vec::new();

        let page = paginate(&items, 1, PageSize::default());

        assert_eq!(page.info.total_pages, 0);
        assert_eq!(page.info.total_count, 0);
        assert_eq!(page.info.first_index, 0);
        assert_eq!(page.info.last_index, 0);
        assert!(page.items.is_empty());
    }

    #[test]
    fn partial_last_page() {
        let items: Vec<usize> = (0..71).collect();

        let page = paginate(&items, 3, size(35));

        assert_eq!(page.info.total_pages, 3);
        assert_eq!(page.items, vec![70]);
        assert_eq!(page.info.first_index, 71);
    }

    #[test]
    fn cursor_resets_to_first_page() {
        let items: Vec<usize> = (0..100).collect();
        let mut cursor = PageCursor::new(items.len(), size(10));
        assert!(cursor.go_to(7));
        assert_eq!(cursor.slice(&items).first(), Some(&60));

        cursor.reset(25);

        assert_eq!(cursor.current(), 1);
        assert_eq!(cursor.total_pages(), 3);
        assert!(!cursor.go_to(4));
    }

    #[test]
    fn pages_concatenate_back_to_the_list() {
        let items: Vec<usize> = (0..103).collect();
        let size = size(35);

        let rebuilt: Vec<usize> = (1..=total_pages(items.len(), size))
            .flat_map(|page| paginate(&items, page, size).items)
            .collect();

        assert_eq!(rebuilt, items);
    }

    #[test]
    fn rejects_non_positive_sizes() {
        assert_eq!(PageSize::new(0), Err(QueryError::InvalidPageSize(0)));
        assert_eq!(PageSize::try_from(-3), Err(QueryError::InvalidPageSize(-3)));
        assert_eq!(PageSize::try_from(35).map(PageSize::get), Ok(35));
        assert!(serde_json::from_str::<PageSize>("-1").is_err());
    }
}
