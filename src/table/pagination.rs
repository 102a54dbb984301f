//! This module defines the common functionality for paging table rows.

/// The number of rows shown per page of the transaction table.
pub const DEFAULT_PAGE_SIZE: usize = 8;

/// The maximum number of numbered pages to show in the page links.
pub const MAX_PAGE_LINKS: usize = 5;

/// The page of the table being shown.
///
/// Page indices start at zero. Navigation is clamped to the pages that exist,
/// but the index is left alone when the number of rows shrinks, so a page past
/// the end may be shown empty until the user navigates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageState {
    page_index: usize,
    page_size: usize,
}

impl Default for PageState {
    fn default() -> Self {
        Self {
            page_index: 0,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageState {
    /// The first page with `page_size` rows per page.
    ///
    /// A page size of zero is treated as one.
    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            page_index: 0,
            page_size: page_size.max(1),
        }
    }

    /// The index of the current page.
    pub fn page_index(&self) -> usize {
        self.page_index
    }

    /// The number of rows per page.
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Whether there is a page before the current one.
    pub fn can_previous(&self) -> bool {
        self.page_index > 0
    }

    /// Whether there is a page after the current one.
    pub fn can_next(&self, page_count: usize) -> bool {
        self.page_index + 1 < page_count
    }

    /// Go to the next page, if there is one.
    pub fn next(&mut self, page_count: usize) {
        if self.can_next(page_count) {
            self.page_index += 1;
        }
    }

    /// Go to the previous page, if there is one.
    pub fn previous(&mut self) {
        self.page_index = self.page_index.saturating_sub(1);
    }

    /// Go to the first page.
    pub fn first(&mut self) {
        self.page_index = 0;
    }

    /// Go to the last page.
    pub fn last(&mut self, page_count: usize) {
        self.page_index = page_count.saturating_sub(1);
    }

    /// Go to `page_index`, clamped to the pages that exist.
    pub fn go_to(&mut self, page_index: usize, page_count: usize) {
        self.page_index = page_index.min(page_count.saturating_sub(1));
    }
}

/// The number of pages needed to show `total_rows`, at least one.
pub fn page_count(total_rows: usize, page_size: usize) -> usize {
    total_rows.div_ceil(page_size.max(1)).max(1)
}

/// The rows on the current page, empty if the page is past the end.
pub fn paginate<T>(rows: &[T], page: PageState) -> &[T] {
    let start = page.page_index.saturating_mul(page.page_size).min(rows.len());
    let end = start.saturating_add(page.page_size).min(rows.len());

    &rows[start..end]
}

/// An entry in the page navigation.
///
/// Page numbers are zero-based indices, add one for display.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum PageLink {
    /// A link to another page.
    Page(usize),
    /// The page being shown.
    Current(usize),
    /// A gap between page links.
    Ellipsis,
    /// A link to the page after the current one.
    Next(usize),
    /// A link to the page before the current one.
    Previous(usize),
}

/// Build the page navigation for `page_index` out of `page_count` pages,
/// showing at most `max_links` numbered pages around the current one plus
/// the first and last page.
pub fn page_links(page_index: usize, page_count: usize, max_links: usize) -> Vec<PageLink> {
    let max_links = max_links.max(1);
    let map_page = |page| {
        if page == page_index {
            PageLink::Current(page)
        } else {
            PageLink::Page(page)
        }
    };
    let half = max_links / 2;

    let mut links: Vec<PageLink> = if page_count <= max_links {
        (0..page_count).map(map_page).collect()
    } else if page_index < half {
        (0..max_links).map(map_page).collect()
    } else if page_index + half >= page_count {
        (page_count - max_links..page_count).map(map_page).collect()
    } else {
        (page_index - half..page_index - half + max_links)
            .map(map_page)
            .collect()
    };

    if page_count > max_links {
        if page_index > half {
            links.insert(0, PageLink::Page(0));
            links.insert(1, PageLink::Ellipsis);
        }

        if page_index + half + 1 < page_count {
            links.push(PageLink::Ellipsis);
            links.push(PageLink::Page(page_count - 1));
        }
    }

    if page_index > 0 {
        links.insert(0, PageLink::Previous(page_index - 1));
    }

    if page_index + 1 < page_count {
        links.push(PageLink::Next(page_index + 1));
    }

    links
}

#[cfg(test)]
mod tests {
    use super::{PageLink, PageState, page_count, page_links, paginate};

    #[test]
    fn page_count_rounds_up_with_minimum_of_one() {
        assert_eq!(page_count(0, 8), 1);
        assert_eq!(page_count(1, 8), 1);
        assert_eq!(page_count(8, 8), 1);
        assert_eq!(page_count(9, 8), 2);
        assert_eq!(page_count(10, 8), 2);
        assert_eq!(page_count(17, 8), 3);
    }

    #[test]
    fn ten_rows_split_into_two_pages() {
        let rows = (0..10).collect::<Vec<_>>();
        let mut page = PageState::default();

        assert_eq!(paginate(&rows, page), &rows[0..8]);

        page.next(page_count(rows.len(), page.page_size()));

        assert_eq!(paginate(&rows, page), &rows[8..10]);
    }

    #[test]
    fn empty_rows_give_one_empty_page() {
        let rows: Vec<u32> = Vec::new();

        assert_eq!(page_count(rows.len(), 8), 1);
        assert!(paginate(&rows, PageState::default()).is_empty());
    }

    #[test]
    fn page_past_the_end_is_empty() {
        let rows = (0..10).collect::<Vec<_>>();
        let mut page = PageState::default();
        page.go_to(1, 2);

        let got = paginate(&rows[..3], page);

        assert!(got.is_empty());
        assert_eq!(page.page_index(), 1);
    }

    #[test]
    fn navigation_is_clamped() {
        let mut page = PageState::default();

        page.previous();
        assert_eq!(page.page_index(), 0);

        page.next(2);
        page.next(2);
        assert_eq!(page.page_index(), 1);

        page.go_to(10, 2);
        assert_eq!(page.page_index(), 1);

        page.first();
        assert_eq!(page.page_index(), 0);

        page.last(3);
        assert_eq!(page.page_index(), 2);
        assert!(page.can_previous());
        assert!(!page.can_next(3));
    }

    #[test]
    fn zero_page_size_is_treated_as_one() {
        let page = PageState::with_page_size(0);

        assert_eq!(page.page_size(), 1);
        assert_eq!(page_count(3, 0), 3);
    }

    #[test]
    fn shows_all_pages() {
        let want = [
            PageLink::Current(0),
            PageLink::Page(1),
            PageLink::Page(2),
            PageLink::Page(3),
            PageLink::Page(4),
            PageLink::Next(1),
        ];

        let got = page_links(0, 5, 5);

        assert_eq!(want, got.as_slice());
    }

    #[test]
    fn single_page_has_no_buttons() {
        assert_eq!(page_links(0, 1, 5), [PageLink::Current(0)]);
    }

    #[test]
    fn shows_page_subset_on_left() {
        let want = [
            PageLink::Current(0),
            PageLink::Page(1),
            PageLink::Page(2),
            PageLink::Page(3),
            PageLink::Page(4),
            PageLink::Ellipsis,
            PageLink::Page(9),
            PageLink::Next(1),
        ];

        let got = page_links(0, 10, 5);

        assert_eq!(want, got.as_slice());
    }

    #[test]
    fn shows_both_buttons_and_trailing_ellipsis() {
        let want = [
            PageLink::Previous(1),
            PageLink::Page(0),
            PageLink::Page(1),
            PageLink::Current(2),
            PageLink::Page(3),
            PageLink::Page(4),
            PageLink::Ellipsis,
            PageLink::Page(9),
            PageLink::Next(3),
        ];

        let got = page_links(2, 10, 5);

        assert_eq!(want, got.as_slice());
    }

    #[test]
    fn shows_page_subset_on_right() {
        let want = [
            PageLink::Previous(8),
            PageLink::Page(0),
            PageLink::Ellipsis,
            PageLink::Page(5),
            PageLink::Page(6),
            PageLink::Page(7),
            PageLink::Page(8),
            PageLink::Current(9),
        ];

        let got = page_links(9, 10, 5);

        assert_eq!(want, got.as_slice());
    }

    #[test]
    fn shows_page_subset_in_center() {
        let want = [
            PageLink::Previous(3),
            PageLink::Page(0),
            PageLink::Ellipsis,
            PageLink::Page(2),
            PageLink::Page(3),
            PageLink::Current(4),
            PageLink::Page(5),
            PageLink::Page(6),
            PageLink::Ellipsis,
            PageLink::Page(9),
            PageLink::Next(5),
        ];

        let got = page_links(4, 10, 5);

        assert_eq!(want, got.as_slice());
    }

    #[test]
    fn page_past_the_end_has_no_current_link() {
        let want = [PageLink::Previous(3), PageLink::Page(0), PageLink::Page(1)];

        let got = page_links(4, 2, 5);

        assert_eq!(want, got.as_slice());
    }
}
