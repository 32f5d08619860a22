//! Retailer store: the full list, the filtered view and the page cursor.

use std::collections::HashSet;

use crate::retailer::Retailer;

/// Items of one page of the filtered list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSlice<'a> {
    /// Absolute index of the first item in the filtered list.
    pub start_index: usize,
    pub items: &'a [Retailer],
}

/// Single source of truth for the directory's data.
///
/// `filtered` is always a predicate-selected subsequence of `all`. Every
/// replacement of `filtered` bumps `generation`, which is what page cache
/// entries and in-flight renders are checked against.
#[derive(Debug)]
pub struct RetailerStore {
    all: Vec<Retailer>,
    filtered: Vec<Retailer>,
    current_page: usize,
    generation: u64,
}

impl Default for RetailerStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RetailerStore {
    pub fn new() -> Self {
        Self {
            all: Vec::new(),
            filtered: Vec::new(),
            current_page: 1,
            generation: 0,
        }
    }

    /// Replaces the full list and resets the filtered view to it.
    pub fn set_all(&mut self, retailers: Vec<Retailer>) {
        self.filtered = retailers.clone();
        self.all = retailers;
        self.generation += 1;
    }

    /// Replaces the active filtered view.
    pub fn set_filtered(&mut self, retailers: Vec<Retailer>) {
        self.filtered = retailers;
        self.generation += 1;
    }

    pub fn all(&self) -> &[Retailer] {
        &self.all
    }

    pub fn filtered(&self) -> &[Retailer] {
        &self.filtered
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn set_current_page(&mut self, page: usize) {
        self.current_page = page;
    }

    pub fn increment_current_page(&mut self) {
        self.current_page += 1;
    }

    /// Identity of the current filtered list.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Returns the 1-based `page` of the filtered list, or `None` past the end.
    pub fn page_slice(&self, page: usize, page_size: usize) -> Option<PageSlice<'_>> {
        let start_index = page.checked_sub(1)?.checked_mul(page_size)?;
        if page_size == 0 || start_index >= self.filtered.len() {
            return None;
        }
        let end = (start_index + page_size).min(self.filtered.len());
        Some(PageSlice {
            start_index,
            items: &self.filtered[start_index..end],
        })
    }

    /// Number of distinct areas across the full list.
    pub fn unique_areas(&self) -> usize {
        self.all
            .iter()
            .map(|retailer| retailer.area.as_str())
            .collect::<HashSet<_>>()
            .len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn retailers(count: usize) -> Vec<Retailer> {
        (0..count)
            .map(|i| Retailer::new(format!("Retailer {i}"), format!("Area {}", i % 3)))
            .collect()
    }

    #[test]
    fn set_all_resets_filtered_and_bumps_generation() {
        let mut store = RetailerStore::new();
        store.set_filtered(retailers(2));
        let before = store.generation();

        store.set_all(retailers(5));

        assert_eq!(store.all().len(), 5);
        assert_eq!(store.filtered(), store.all());
        assert!(store.generation() > before);
    }

    #[test]
    fn page_cursor_starts_at_one() {
        let mut store = RetailerStore::new();
        assert_eq!(store.current_page(), 1);
        store.increment_current_page();
        assert_eq!(store.current_page(), 2);
        store.set_current_page(7);
        assert_eq!(store.current_page(), 7);
    }

    #[test]
    fn page_slice_covers_partial_last_page() {
        let mut store = RetailerStore::new();
        store.set_all(retailers(45));

        let third = store.page_slice(3, 20).unwrap();
        assert_eq!(third.start_index, 40);
        assert_eq!(third.items.len(), 5);
        assert!(store.page_slice(4, 20).is_none());
        assert!(store.page_slice(0, 20).is_none());
    }

    #[test]
    fn unique_areas_counts_distinct_values() {
        let mut store = RetailerStore::new();
        store.set_all(retailers(10));
        assert_eq!(store.unique_areas(), 3);
    }
}
