//! Page-size constants and index arithmetic shared by the table views.
//!
//! Pages are zero-indexed. A page index is always clamped into
//! `[0, total_pages - 1]`; stepping past either boundary is a no-op rather
//! than an error.

use std::ops::Range;

/// General customer table.
pub const CUSTOMER_TABLE_PAGE_SIZE: usize = 10;
/// Repurchase customer and review lists.
pub const LIST_PAGE_SIZE: usize = 20;
/// Paged product selector.
pub const PRODUCT_SELECTOR_PAGE_SIZE: usize = 5;

/// Number of pages needed for `count` items. At least 1, so an empty
/// collection still renders page "1 / 1".
#[must_use]
pub fn total_pages(count: usize, page_size: usize) -> usize {
    if count == 0 {
        return 1;
    }
    count.div_ceil(page_size)
}

/// Clamps `page` into the valid range for `count` items.
#[must_use]
pub fn clamp_page(page: usize, count: usize, page_size: usize) -> usize {
    page.min(total_pages(count, page_size) - 1)
}

/// The index range of `page` within a collection of `count` items. The range
/// of the last page is shortened to the remaining items.
#[must_use]
pub fn page_range(page: usize, count: usize, page_size: usize) -> Range<usize> {
    let page = clamp_page(page, count, page_size);
    let start = (page * page_size).min(count);
    let end = (start + page_size).min(count);
    start..end
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(total_pages(25, 10), 3);
        assert_eq!(total_pages(20, 10), 2);
        assert_eq!(total_pages(1, 10), 1);
    }

    #[test]
    fn empty_collection_has_one_page() {
        assert_eq!(total_pages(0, 10), 1);
        assert_eq!(clamp_page(5, 0, 10), 0);
        assert_eq!(page_range(3, 0, 10), 0..0);
    }

    #[test]
    fn clamps_overshooting_page_index() {
        assert_eq!(clamp_page(99, 25, 10), 2);
        assert_eq!(clamp_page(2, 25, 10), 2);
        assert_eq!(clamp_page(0, 25, 10), 0);
    }

    #[test]
    fn last_page_range_is_partial() {
        assert_eq!(page_range(2, 25, 10), 20..25);
    }

    #[test]
    fn pages_reconstruct_the_collection() {
        // Concatenating every page must reproduce the collection exactly,
        // for assorted sizes including the view-specific ones.
        for page_size in [PRODUCT_SELECTOR_PAGE_SIZE, CUSTOMER_TABLE_PAGE_SIZE, LIST_PAGE_SIZE] {
            for count in [0, 1, page_size - 1, page_size, page_size + 1, 53] {
                let items: Vec<usize> = (0..count).collect();
                let mut rebuilt = Vec::new();
                for page in 0..total_pages(count, page_size) {
                    rebuilt.extend_from_slice(&items[page_range(page, count, page_size)]);
                }
                assert_eq!(rebuilt, items, "count={count} page_size={page_size}");
            }
        }
    }
}
