//! Derived-state pipeline for the customer tables: grade filter, stable
//! sort with toggle semantics, and pagination.
//!
//! Everything here is pure — the rendered slice depends only on the input
//! collection and the current [`TableState`], so re-applying the same state
//! to the same rows always yields the same page.

use std::cmp::Ordering;

use chrono::NaiveDate;

use shoplens_core::types::{Customer, RepurchaseCustomer};
use shoplens_core::Grade;

use crate::pagination::{clamp_page, page_range, total_pages};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Name,
    PurchaseCount,
    Points,
    FirstPurchaseDate,
    RecentPurchaseDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl SortOrder {
    #[must_use]
    pub fn flipped(self) -> Self {
        match self {
            SortOrder::Ascending => SortOrder::Descending,
            SortOrder::Descending => SortOrder::Ascending,
        }
    }
}

/// A row the pipeline can filter and sort. Implemented for both customer
/// flavors; the repurchase table has no first-purchase column and reports
/// `None` for it.
pub trait TableRow {
    fn name(&self) -> &str;
    fn grade(&self) -> Grade;
    fn purchase_count(&self) -> u32;
    fn points(&self) -> u64;
    fn first_purchase_date(&self) -> Option<NaiveDate>;
    fn recent_purchase_date(&self) -> Option<NaiveDate>;
}

impl TableRow for Customer {
    fn name(&self) -> &str {
        &self.name
    }
    fn grade(&self) -> Grade {
        self.grade
    }
    fn purchase_count(&self) -> u32 {
        self.purchase_count
    }
    fn points(&self) -> u64 {
        self.points
    }
    fn first_purchase_date(&self) -> Option<NaiveDate> {
        self.first_purchase_date
    }
    fn recent_purchase_date(&self) -> Option<NaiveDate> {
        self.recent_purchase_date
    }
}

impl TableRow for RepurchaseCustomer {
    fn name(&self) -> &str {
        &self.name
    }
    fn grade(&self) -> Grade {
        self.grade
    }
    fn purchase_count(&self) -> u32 {
        self.purchase_count
    }
    fn points(&self) -> u64 {
        self.points
    }
    fn first_purchase_date(&self) -> Option<NaiveDate> {
        None
    }
    fn recent_purchase_date(&self) -> Option<NaiveDate> {
        self.recent_purchase_date
    }
}

/// User-selected filter, sort, and page state for one table view.
#[derive(Debug, Clone, Copy)]
pub struct TableState {
    pub grade_filter: Grade,
    pub sort_key: SortKey,
    pub sort_order: SortOrder,
    pub page: usize,
    pub page_size: usize,
}

impl TableState {
    #[must_use]
    pub fn new(page_size: usize) -> Self {
        Self {
            grade_filter: Grade::All,
            sort_key: SortKey::RecentPurchaseDate,
            sort_order: SortOrder::Descending,
            page: 0,
            page_size,
        }
    }

    /// Selecting the active key again flips the order; selecting a new key
    /// resets to descending. Either way the view returns to the first page.
    pub fn toggle_sort(&mut self, key: SortKey) {
        if self.sort_key == key {
            self.sort_order = self.sort_order.flipped();
        } else {
            self.sort_key = key;
            self.sort_order = SortOrder::Descending;
        }
        self.page = 0;
    }

    /// Changing the filter resets to the first page.
    pub fn set_grade_filter(&mut self, grade: Grade) {
        self.grade_filter = grade;
        self.page = 0;
    }

    /// Steps back one page; a no-op on the first page.
    pub fn previous_page(&mut self) {
        self.page = self.page.saturating_sub(1);
    }

    /// Steps forward one page; a no-op on the last page. Needs the filtered
    /// row count to know where the last page is.
    pub fn next_page(&mut self, filtered_count: usize) {
        self.page = clamp_page(self.page + 1, filtered_count, self.page_size);
    }

    /// Runs the full filter → sort → paginate pipeline and returns the slice
    /// to render.
    #[must_use]
    pub fn apply<'a, T: TableRow>(&self, rows: &'a [T]) -> TablePage<'a, T> {
        let mut filtered: Vec<&'a T> = rows
            .iter()
            .filter(|row| self.grade_filter == Grade::All || row.grade() == self.grade_filter)
            .collect();

        // slice::sort_by is stable: rows that compare equal keep their
        // original relative order.
        filtered.sort_by(|a, b| {
            let ordering = compare(*a, *b, self.sort_key);
            match self.sort_order {
                SortOrder::Ascending => ordering,
                SortOrder::Descending => ordering.reverse(),
            }
        });

        let count = filtered.len();
        let page = clamp_page(self.page, count, self.page_size);
        let rows = filtered[page_range(page, count, self.page_size)].to_vec();

        TablePage {
            rows,
            page,
            total_pages: total_pages(count, self.page_size),
            filtered_count: count,
        }
    }
}

/// One rendered page plus the counters the table header displays.
#[derive(Debug)]
pub struct TablePage<'a, T> {
    pub rows: Vec<&'a T>,
    pub page: usize,
    pub total_pages: usize,
    pub filtered_count: usize,
}

fn compare<T: TableRow>(a: &T, b: &T, key: SortKey) -> Ordering {
    match key {
        SortKey::Name => a.name().cmp(b.name()),
        SortKey::PurchaseCount => a.purchase_count().cmp(&b.purchase_count()),
        SortKey::Points => a.points().cmp(&b.points()),
        // Dates compare as parsed dates; Option's Ord puts missing dates
        // before any real one in ascending order.
        SortKey::FirstPurchaseDate => a.first_purchase_date().cmp(&b.first_purchase_date()),
        SortKey::RecentPurchaseDate => a.recent_purchase_date().cmp(&b.recent_purchase_date()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pagination::CUSTOMER_TABLE_PAGE_SIZE;

    fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    fn customer(id: &str, name: &str, grade: Grade, count: u32, points: u64) -> Customer {
        Customer {
            id: id.to_string(),
            name: name.to_string(),
            email: format!("{id}@example.com"),
            grade,
            points,
            purchase_count: count,
            first_purchase_date: date(2024, 1, 1),
            recent_purchase_date: date(2025, 6, 1),
            used_coupon: false,
        }
    }

    fn sample() -> Vec<Customer> {
        vec![
            customer("c1", "강하늘", Grade::Gold, 12, 3400),
            customer("c2", "김민지", Grade::Vip, 31, 16240),
            customer("c3", "박서준", Grade::Base, 2, 150),
            customer("c4", "이수진", Grade::Gold, 12, 9800),
            customer("c5", "정우성", Grade::Platinum, 20, 7200),
        ]
    }

    #[test]
    fn grade_filter_keeps_only_matching_rows() {
        let rows = sample();
        let mut state = TableState::new(CUSTOMER_TABLE_PAGE_SIZE);
        state.set_grade_filter(Grade::Gold);
        let page = state.apply(&rows);
        assert_eq!(page.filtered_count, 2);
        assert!(page.rows.iter().all(|r| r.grade == Grade::Gold));
    }

    #[test]
    fn all_sentinel_bypasses_filtering_and_preserves_order() {
        let rows = sample();
        let mut state = TableState::new(CUSTOMER_TABLE_PAGE_SIZE);
        state.grade_filter = Grade::All;
        state.sort_key = SortKey::Name;
        state.sort_order = SortOrder::Ascending;
        let page = state.apply(&rows);
        assert_eq!(page.filtered_count, rows.len());
    }

    #[test]
    fn sorts_by_points_descending_by_default_direction() {
        let rows = sample();
        let mut state = TableState::new(CUSTOMER_TABLE_PAGE_SIZE);
        state.toggle_sort(SortKey::Points);
        let page = state.apply(&rows);
        let points: Vec<u64> = page.rows.iter().map(|r| r.points).collect();
        assert_eq!(points, vec![16240, 9800, 7200, 3400, 150]);
    }

    #[test]
    fn equal_keys_keep_original_relative_order() {
        let rows = sample();
        let mut state = TableState::new(CUSTOMER_TABLE_PAGE_SIZE);
        state.toggle_sort(SortKey::PurchaseCount);
        let page = state.apply(&rows);
        // c1 and c4 both have purchase_count 12; c1 comes first in the input
        // and must stay first under the stable sort.
        let ids: Vec<&str> = page.rows.iter().map(|r| r.id.as_str()).collect();
        let pos_c1 = ids.iter().position(|&id| id == "c1").unwrap();
        let pos_c4 = ids.iter().position(|&id| id == "c4").unwrap();
        assert!(pos_c1 < pos_c4);
    }

    #[test]
    fn sorting_twice_is_idempotent() {
        let rows = sample();
        let mut state = TableState::new(CUSTOMER_TABLE_PAGE_SIZE);
        state.toggle_sort(SortKey::Points);
        let first: Vec<String> = state.apply(&rows).rows.iter().map(|r| r.id.clone()).collect();

        let sorted: Vec<Customer> = state.apply(&rows).rows.into_iter().cloned().collect();
        let second: Vec<String> = state
            .apply(&sorted)
            .rows
            .iter()
            .map(|r| r.id.clone())
            .collect();
        assert_eq!(first, second);
    }

    #[test]
    fn toggling_same_key_flips_order_and_back() {
        let rows = sample();
        let mut state = TableState::new(CUSTOMER_TABLE_PAGE_SIZE);
        state.toggle_sort(SortKey::Name);
        let descending: Vec<String> = state.apply(&rows).rows.iter().map(|r| r.id.clone()).collect();

        state.toggle_sort(SortKey::Name);
        assert_eq!(state.sort_order, SortOrder::Ascending);

        state.toggle_sort(SortKey::Name);
        assert_eq!(state.sort_order, SortOrder::Descending);
        let again: Vec<String> = state.apply(&rows).rows.iter().map(|r| r.id.clone()).collect();
        assert_eq!(descending, again);
    }

    #[test]
    fn selecting_new_key_resets_to_descending_and_first_page() {
        let mut state = TableState::new(CUSTOMER_TABLE_PAGE_SIZE);
        state.toggle_sort(SortKey::Name);
        state.toggle_sort(SortKey::Name); // ascending now
        state.page = 3;
        state.toggle_sort(SortKey::Points);
        assert_eq!(state.sort_order, SortOrder::Descending);
        assert_eq!(state.page, 0);
    }

    #[test]
    fn missing_dates_sort_before_real_dates_ascending() {
        let mut rows = sample();
        rows[0].recent_purchase_date = None;
        let mut state = TableState::new(CUSTOMER_TABLE_PAGE_SIZE);
        state.sort_key = SortKey::RecentPurchaseDate;
        state.sort_order = SortOrder::Ascending;
        let page = state.apply(&rows);
        assert_eq!(page.rows[0].id, "c1");
    }

    #[test]
    fn page_navigation_is_clamped() {
        let rows: Vec<Customer> = (0..25)
            .map(|i| customer(&format!("c{i}"), &format!("고객{i}"), Grade::Base, i, u64::from(i)))
            .collect();
        let mut state = TableState::new(CUSTOMER_TABLE_PAGE_SIZE);

        state.previous_page();
        assert_eq!(state.page, 0, "previous on first page is a no-op");

        state.next_page(rows.len());
        state.next_page(rows.len());
        assert_eq!(state.page, 2);
        state.next_page(rows.len());
        assert_eq!(state.page, 2, "next on last page is a no-op");

        let page = state.apply(&rows);
        assert_eq!(page.rows.len(), 5, "last page holds the remainder");
    }

    #[test]
    fn pages_concatenate_to_full_filtered_collection() {
        let rows: Vec<Customer> = (0..37)
            .map(|i| customer(&format!("c{i}"), &format!("고객{i:02}"), Grade::Base, i, u64::from(i)))
            .collect();
        let mut state = TableState::new(CUSTOMER_TABLE_PAGE_SIZE);
        state.toggle_sort(SortKey::Points);

        let mut seen = Vec::new();
        for page in 0..total_pages(rows.len(), state.page_size) {
            state.page = page;
            seen.extend(state.apply(&rows).rows.iter().map(|r| r.id.clone()));
        }
        assert_eq!(seen.len(), rows.len(), "no duplicates or gaps");
        let mut unique = seen.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), rows.len());
    }
}
