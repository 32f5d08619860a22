//! Scroll-triggered page loading.

use std::time::{Duration, Instant};

use crate::directory::cache::PageCache;
use crate::directory::render::render_page;
use crate::directory::store::RetailerStore;
use crate::directory::timer::DeadlineTimer;
use crate::directory::view::ListingView;

/// Result of a fired load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Appended a pre-rendered page from the cache.
    CacheHit { page: usize, added: usize },
    /// Rendered the page on the spot.
    Rendered { page: usize, added: usize },
    /// Everything was already shown when the load fired.
    Exhausted,
}

/// Reacts to the sentinel coming into view.
///
/// A trigger shows the loading indicator and schedules the load after a
/// short fixed delay; the load itself happens in [`ScrollLoader::poll`].
#[derive(Debug)]
pub struct ScrollLoader {
    pending: DeadlineTimer<()>,
    delay: Duration,
    indicator_visible: bool,
}

impl ScrollLoader {
    pub fn new(delay: Duration) -> Self {
        Self {
            pending: DeadlineTimer::new(),
            delay,
            indicator_visible: false,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.indicator_visible
    }

    /// Returns true when a load was scheduled.
    pub fn trigger(&mut self, now: Instant, rendered_count: usize, total: usize) -> bool {
        if rendered_count >= total {
            self.cancel();
            return false;
        }
        if self.pending.is_pending() {
            return false;
        }
        self.indicator_visible = true;
        self.pending.schedule((), self.delay, now);
        true
    }

    /// Drops a scheduled load and hides the indicator.
    pub fn cancel(&mut self) {
        self.pending.cancel();
        self.indicator_visible = false;
    }

    /// Runs the scheduled load once its delay has passed.
    pub fn poll(
        &mut self,
        now: Instant,
        store: &mut RetailerStore,
        cache: &mut PageCache,
        view: &mut ListingView,
        page_size: usize,
    ) -> Option<LoadOutcome> {
        self.pending.poll(now)?;
        let outcome = load_next_page(store, cache, view, page_size);
        self.indicator_visible = false;
        Some(outcome)
    }
}

/// Appends the page after the ones already shown, from the cache when possible.
pub fn load_next_page(
    store: &mut RetailerStore,
    cache: &mut PageCache,
    view: &mut ListingView,
    page_size: usize,
) -> LoadOutcome {
    let rendered = view.rendered_count();
    if rendered >= store.filtered().len() {
        return LoadOutcome::Exhausted;
    }
    let page = rendered.div_ceil(page_size) + 1;

    if let Some(fragment) = cache.take(page) {
        let added = fragment.len();
        tracing::debug!(page, added, "Appending pre-rendered page");
        view.append(fragment);
        store.increment_current_page();
        return LoadOutcome::CacheHit { page, added };
    }

    let Some(slice) = store.page_slice(page, page_size) else {
        return LoadOutcome::Exhausted;
    };
    let fragment = render_page(slice.items, slice.start_index);
    let added = fragment.len();
    tracing::debug!(page, added, "Page not pre-rendered, rendering on the UI thread");
    view.append(fragment);
    store.set_current_page(page);
    LoadOutcome::Rendered { page, added }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::worker::RenderedPage;
    use crate::retailer::Retailer;

    fn setup(count: usize) -> (RetailerStore, PageCache, ListingView) {
        let mut store = RetailerStore::new();
        store.set_all(
            (0..count)
                .map(|i| Retailer::new(format!("Shop {i}"), "ADYAR"))
                .collect(),
        );
        let slice = store.page_slice(1, 20).unwrap();
        let mut view = ListingView::new();
        view.replace(render_page(slice.items, slice.start_index));
        let cache = PageCache::new(store.generation());
        (store, cache, view)
    }

    #[test]
    fn trigger_is_ignored_once_everything_is_shown() {
        let mut loader = ScrollLoader::new(Duration::from_millis(300));
        assert!(!loader.trigger(Instant::now(), 45, 45));
        assert!(!loader.is_loading());
    }

    #[test]
    fn trigger_shows_indicator_until_load_fires() {
        let (mut store, mut cache, mut view) = setup(45);
        let mut loader = ScrollLoader::new(Duration::from_millis(300));
        let start = Instant::now();

        assert!(loader.trigger(start, view.rendered_count(), 45));
        assert!(!loader.trigger(start, view.rendered_count(), 45));
        assert!(loader.is_loading());

        let early = start + Duration::from_millis(100);
        assert!(loader.poll(early, &mut store, &mut cache, &mut view, 20).is_none());

        let fired = start + Duration::from_millis(300);
        let outcome = loader.poll(fired, &mut store, &mut cache, &mut view, 20);
        assert_eq!(outcome, Some(LoadOutcome::Rendered { page: 2, added: 20 }));
        assert!(!loader.is_loading());
        assert_eq!(store.current_page(), 2);
    }

    #[test]
    fn cache_hit_appends_and_increments_page() {
        let (mut store, mut cache, mut view) = setup(45);
        let slice = store.page_slice(2, 20).unwrap();
        cache.accept(RenderedPage {
            generation: store.generation(),
            page: 2,
            fragment: render_page(slice.items, slice.start_index),
        });

        let outcome = load_next_page(&mut store, &mut cache, &mut view, 20);
        assert_eq!(outcome, LoadOutcome::CacheHit { page: 2, added: 20 });
        assert_eq!(view.rendered_count(), 40);
        assert_eq!(view.cards()[39].number, 40);
        assert_eq!(store.current_page(), 2);
        assert!(cache.is_empty());
    }
}
