//! Page-window helper for paginated listings.

use std::collections::BTreeSet;

use serde::Serialize;

pub const DEFAULT_ITEMS_PER_PAGE: usize = 20;

/// Pages always linked at each end of the listing.
const EDGE_PAGES: usize = 2;
const PAGES_BEFORE_CURRENT: usize = 2;
const PAGES_AFTER_CURRENT: usize = 4;

/// Page links around `current`, with `None` standing for a run of hidden pages.
///
/// `current` must already lie within `1..=total_pages`.
fn page_window(total_pages: usize, current: usize) -> Vec<Option<usize>> {
    let head = 1..=EDGE_PAGES.min(total_pages);
    let near_current = current.saturating_sub(PAGES_BEFORE_CURRENT).max(1)
        ..=current.saturating_add(PAGES_AFTER_CURRENT).min(total_pages);
    let tail = total_pages.saturating_sub(EDGE_PAGES).saturating_add(1).max(1)..=total_pages;
    let shown: BTreeSet<usize> = head.chain(near_current).chain(tail).collect();

    let mut window = Vec::with_capacity(shown.len() + 2);
    let mut last_shown = 0;
    for page in shown {
        if page > last_shown + 1 {
            window.push(None);
        }
        window.push(Some(page));
        last_shown = page;
    }
    window
}

/// One page of a listing plus the links to render around it.
#[derive(Serialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub pages: Vec<Option<usize>>,
    pub page: usize,
}

impl<T> Paginated<T> {
    /// Requested pages outside `1..=total_pages` are clamped into range.
    pub fn new(items: Vec<T>, requested_page: usize, total_pages: usize) -> Self {
        let page = requested_page.clamp(1, total_pages.max(1));

        Self {
            items,
            pages: page_window(total_pages, page),
            page,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_listing_shows_every_page() {
        assert_eq!(page_window(3, 1), vec![Some(1), Some(2), Some(3)]);
        assert!(page_window(0, 1).is_empty());
    }

    #[test]
    fn long_listing_collapses_gaps() {
        let paginated = Paginated::new(vec![()], 10, 20);

        assert_eq!(paginated.page, 10);
        assert_eq!(
            paginated.pages,
            vec![
                Some(1),
                Some(2),
                None,
                Some(8),
                Some(9),
                Some(10),
                Some(11),
                Some(12),
                Some(13),
                Some(14),
                None,
                Some(19),
                Some(20),
            ]
        );
    }

    #[test]
    fn page_zero_is_first_page() {
        assert_eq!(Paginated::<()>::new(vec![], 0, 2).page, 1);
    }

    #[test]
    fn page_past_the_end_is_clamped() {
        let paginated = Paginated::<()>::new(vec![], usize::MAX, 2);

        assert_eq!(paginated.page, 2);
        assert_eq!(paginated.pages, vec![Some(1), Some(2)]);
    }

    #[test]
    fn empty_listing_stays_on_first_page() {
        let paginated = Paginated::<()>::new(vec![], 7, 0);

        assert_eq!(paginated.page, 1);
        assert!(paginated.pages.is_empty());
    }
}
