//! Raw-row pagination
//!
//! After the summary reports, the user can page through the raw filtered
//! rows five at a time. The paginator tracks only a positional offset;
//! requesting a page past the end yields an empty slice rather than an
//! error, which the caller uses as its stop signal.

/// Rows emitted per page
pub const PAGE_SIZE: usize = 5;

/// Positional paginator over a slice of rows
///
/// Each call to [`Paginator::next_page`] returns the next window in table
/// order and advances the offset; rows are never reshuffled.
///
/// # Examples
///
/// ```
/// use bikestat::pagination::Paginator;
///
/// let rows: Vec<u32> = (0..12).collect();
/// let mut pager = Paginator::new();
/// assert_eq!(pager.next_page(&rows), &[0, 1, 2, 3, 4]);
/// assert_eq!(pager.next_page(&rows), &[5, 6, 7, 8, 9]);
/// assert_eq!(pager.next_page(&rows), &[10, 11]);
/// assert!(pager.next_page(&rows).is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct Paginator {
    offset: usize,
    page_size: usize,
}

impl Default for Paginator {
    fn default() -> Self {
        Self::new()
    }
}

impl Paginator {
    /// Create a paginator at offset 0 with the standard page size
    pub fn new() -> Self {
        Self {
            offset: 0,
            page_size: PAGE_SIZE,
        }
    }

    /// Override the page size (used by tests)
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Current offset into the row slice
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Return the next page and advance the offset
    ///
    /// Past-the-end requests return an empty slice.
    pub fn next_page<'a, T>(&mut self, rows: &'a [T]) -> &'a [T] {
        let start = self.offset.min(rows.len());
        let end = (self.offset + self.page_size).min(rows.len());
        self.offset += self.page_size;
        &rows[start..end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_and_partial_pages() {
        let rows: Vec<u32> = (0..13).collect();
        let mut pager = Paginator::new();

        assert_eq!(pager.next_page(&rows).len(), 5);
        assert_eq!(pager.next_page(&rows).len(), 5);
        assert_eq!(pager.next_page(&rows), &[10, 11, 12]);
        assert!(pager.next_page(&rows).is_empty());
        assert!(pager.next_page(&rows).is_empty());
    }

    #[test]
    fn test_exact_multiple_of_page_size() {
        let rows: Vec<u32> = (0..10).collect();
        let mut pager = Paginator::new();

        assert_eq!(pager.next_page(&rows).len(), 5);
        assert_eq!(pager.next_page(&rows).len(), 5);
        assert!(pager.next_page(&rows).is_empty());
    }

    #[test]
    fn test_empty_rows() {
        let rows: Vec<u32> = Vec::new();
        let mut pager = Paginator::new();
        assert!(pager.next_page(&rows).is_empty());
        assert_eq!(pager.offset(), PAGE_SIZE);
    }

    #[test]
    fn test_nonempty_page_count_is_ceil_div() {
        for n in 0..40usize {
            let rows: Vec<usize> = (0..n).collect();
            let mut pager = Paginator::new();
            let mut nonempty = 0;
            loop {
                let page = pager.next_page(&rows);
                if page.is_empty() {
                    break;
                }
                nonempty += 1;
            }
            assert_eq!(nonempty, n.div_ceil(PAGE_SIZE));
        }
    }
}
