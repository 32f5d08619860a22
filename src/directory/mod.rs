//! The retailer directory: store, search, page cache and scroll loading.
//!
//! ```text
//! search ──debounce──▶ filter ──▶ Store (generation++) ──▶ PageCache::invalidate
//!                                   │
//! sentinel ──delay──▶ ScrollLoader ─┼─ hit  ─▶ append cached fragment
//!                                   └─ miss ─▶ render_page on UI thread
//!                                   │
//!               Prefetcher (idle) ──▶ RenderWorker ──▶ RenderedPage ──▶ PageCache
//! ```
//!
//! [`Directory`] owns all of it and is driven by the UI thread. The only
//! other thread is the optional [`RenderWorker`].

mod cache;
mod filter;
mod loader;
mod render;
mod store;
mod timer;
mod view;
mod worker;

use std::time::Instant;

use crate::config::DirectoryConfig;
use crate::retailer::Retailer;

pub use cache::{Accepted, PageCache, Prefetcher};
pub use filter::{filter_retailers, normalize_query, SearchDebouncer};
pub use loader::{load_next_page, LoadOutcome, ScrollLoader};
pub use render::{map_embed_url, render_card, render_page, Card, ContactLink, Fragment};
pub use store::{PageSlice, RetailerStore};
pub use timer::DeadlineTimer;
pub use view::ListingView;
pub use worker::{RenderError, RenderRequest, RenderWorker, RenderedPage};

/// What a call to [`Directory::tick`] changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    /// A debounced search was evaluated and the view replaced.
    pub search_applied: bool,
    pub load: Option<LoadOutcome>,
    /// Page handed to the render worker.
    pub prefetched: Option<usize>,
}

pub struct Directory {
    page_size: usize,
    store: RetailerStore,
    cache: PageCache,
    prefetcher: Prefetcher,
    loader: ScrollLoader,
    search: SearchDebouncer,
    view: ListingView,
    renderer: Option<RenderWorker>,
}

impl Directory {
    /// Creates an empty directory. Without a `renderer` every page is
    /// rendered synchronously when it is needed.
    pub fn new(settings: &DirectoryConfig, renderer: Option<RenderWorker>) -> Self {
        let store = RetailerStore::new();
        let cache = PageCache::new(store.generation());
        Self {
            page_size: settings.page_size.max(1),
            store,
            cache,
            prefetcher: Prefetcher::new(settings.prefetch_timeout(), settings.prefetch_depth),
            loader: ScrollLoader::new(settings.load_delay()),
            search: SearchDebouncer::new(settings.search_debounce()),
            view: ListingView::new(),
            renderer,
        }
    }

    /// Installs the full list, shows its first page and starts pre-rendering.
    pub fn load(&mut self, retailers: Vec<Retailer>, now: Instant) {
        self.store.set_all(retailers);
        self.reset_view(now);
    }

    pub fn store(&self) -> &RetailerStore {
        &self.store
    }

    pub fn view(&self) -> &ListingView {
        &self.view
    }

    pub fn cache(&self) -> &PageCache {
        &self.cache
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn is_loading(&self) -> bool {
        self.loader.is_loading()
    }

    pub fn is_search_pending(&self) -> bool {
        self.search.is_pending()
    }

    pub fn has_background_renderer(&self) -> bool {
        self.renderer.is_some()
    }

    /// Records search input; evaluation happens on a later tick.
    pub fn search(&mut self, query: &str, now: Instant) {
        self.search.submit(query, now);
    }

    /// Filters immediately, resets to page 1 and invalidates the cache.
    pub fn apply_search(&mut self, query: &str, now: Instant) {
        let results = filter_retailers(query, self.store.all());
        tracing::debug!(query = %normalize_query(query), matches = results.len(), "Search applied");
        self.store.set_filtered(results);
        self.reset_view(now);
    }

    /// The sentinel after the last card became visible.
    pub fn on_sentinel_visible(&mut self, now: Instant) -> bool {
        self.loader
            .trigger(now, self.view.rendered_count(), self.store.filtered().len())
    }

    /// Handles a page delivered by the render worker.
    pub fn on_page_rendered(&mut self, rendered: RenderedPage, now: Instant) -> Accepted {
        let (page, generation) = (rendered.page, rendered.generation);
        let accepted = self.cache.accept(rendered);
        match accepted {
            Accepted::Cached => {
                tracing::debug!(page, "Cached pre-rendered page");
                self.arm_prefetch(now);
            }
            Accepted::AlreadyConsumed => {
                tracing::debug!(page, "Pre-rendered page arrived after it was shown");
                self.arm_prefetch(now);
            }
            Accepted::Stale => {
                tracing::debug!(
                    page,
                    generation,
                    current = self.cache.generation(),
                    "Discarded stale page"
                );
            }
        }
        accepted
    }

    /// Advances timers. `idle` is true when the UI loop had no input to handle.
    pub fn tick(&mut self, now: Instant, idle: bool) -> TickReport {
        let mut report = TickReport::default();

        if let Some(query) = self.search.poll(now) {
            self.apply_search(&query, now);
            report.search_applied = true;
        }

        if let Some(outcome) = self.loader.poll(
            now,
            &mut self.store,
            &mut self.cache,
            &mut self.view,
            self.page_size,
        ) {
            if outcome != LoadOutcome::Exhausted {
                self.arm_prefetch(now);
            }
            report.load = Some(outcome);
        }

        self.check_renderer();
        report.prefetched = self.dispatch_prefetch(now, idle);
        report
    }

    fn reset_view(&mut self, now: Instant) {
        self.store.set_current_page(1);
        self.cache.invalidate(self.store.generation());
        self.loader.cancel();
        self.prefetcher.disarm();

        let fragment = match self.store.page_slice(1, self.page_size) {
            Some(slice) => render_page(slice.items, slice.start_index),
            None => render_page(&[], 0),
        };
        self.view.replace(fragment);
        self.arm_prefetch(now);
    }

    fn arm_prefetch(&mut self, now: Instant) {
        if self.renderer.is_some() {
            self.prefetcher.arm(now);
        }
    }

    /// Drops a render worker whose thread has exited. Its in-flight page
    /// will never arrive, so it is forgotten as well.
    fn check_renderer(&mut self) {
        if self.renderer.as_ref().is_some_and(|worker| !worker.is_running()) {
            self.disable_renderer(&RenderError::Disconnected);
        }
    }

    fn disable_renderer(&mut self, err: &RenderError) {
        tracing::warn!(error = %err, "Background rendering disabled, pages will render on demand");
        self.cache.abandon_request();
        self.prefetcher.disarm();
        self.renderer = None;
    }

    fn dispatch_prefetch(&mut self, now: Instant, idle: bool) -> Option<usize> {
        let renderer = self.renderer.as_ref()?;
        let request =
            self.prefetcher
                .poll(now, idle, &mut self.cache, &self.store, self.page_size)?;
        let page = request.page;

        match renderer.submit(request) {
            Ok(()) => {
                tracing::debug!(page, "Asked render worker to prepare page");
                Some(page)
            }
            Err(err) => {
                self.disable_renderer(&err);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;
    use std::time::Duration;

    const WAIT: Duration = Duration::from_secs(2);

    fn retailers(count: usize) -> Vec<Retailer> {
        (0..count)
            .map(|i| {
                let area = if i % 3 == 0 { "ADYAR" } else { "T NAGAR" };
                Retailer::new(format!("Shop {i}"), area).with_city("Chennai")
            })
            .collect()
    }

    fn with_worker() -> (Directory, mpsc::Receiver<RenderedPage>) {
        let (tx, rx) = mpsc::channel();
        let worker = RenderWorker::spawn(move |page| {
            let _ = tx.send(page);
        })
        .unwrap();
        (Directory::new(&DirectoryConfig::default(), Some(worker)), rx)
    }

    fn without_worker() -> Directory {
        Directory::new(&DirectoryConfig::default(), None)
    }

    #[test]
    fn load_shows_first_page() {
        let mut directory = without_worker();
        directory.load(retailers(45), Instant::now());

        let cards = directory.view().cards();
        assert_eq!(cards.len(), 20);
        assert_eq!(cards[0].number, 1);
        assert_eq!(directory.store().current_page(), 1);
        assert!(!directory.view().shows_no_results());
    }

    #[test]
    fn empty_list_shows_no_results() {
        let mut directory = without_worker();
        directory.load(Vec::new(), Instant::now());
        assert!(directory.view().shows_no_results());
        assert!(!directory.on_sentinel_visible(Instant::now()));
    }

    #[test]
    fn scrolling_appends_prerendered_pages() {
        let (mut directory, rx) = with_worker();
        let start = Instant::now();
        directory.load(retailers(45), start);

        let report = directory.tick(start, true);
        assert_eq!(report.prefetched, Some(2));
        let page = rx.recv_timeout(WAIT).unwrap();
        assert_eq!(directory.on_page_rendered(page, start), Accepted::Cached);
        assert!(directory.cache().is_cached(2));

        assert!(directory.on_sentinel_visible(start));
        assert!(directory.is_loading());
        let fired = start + Duration::from_millis(300);
        let report = directory.tick(fired, false);
        assert_eq!(report.load, Some(LoadOutcome::CacheHit { page: 2, added: 20 }));
        assert!(!directory.is_loading());
        assert_eq!(directory.view().rendered_count(), 40);
        assert_eq!(directory.view().cards()[20].number, 21);
        assert_eq!(directory.store().current_page(), 2);

        let report = directory.tick(fired, true);
        assert_eq!(report.prefetched, Some(3));
        let page = rx.recv_timeout(WAIT).unwrap();
        directory.on_page_rendered(page, fired);

        assert!(directory.on_sentinel_visible(fired));
        let report = directory.tick(fired + Duration::from_millis(300), false);
        assert_eq!(report.load, Some(LoadOutcome::CacheHit { page: 3, added: 5 }));
        assert_eq!(directory.view().rendered_count(), 45);
        assert!(!directory.on_sentinel_visible(fired));
    }

    #[test]
    fn prefetch_is_forced_after_timeout_without_idle() {
        let (mut directory, _rx) = with_worker();
        let start = Instant::now();
        directory.load(retailers(45), start);

        assert_eq!(directory.tick(start + Duration::from_millis(500), false).prefetched, None);
        let report = directory.tick(start + Duration::from_millis(2000), false);
        assert_eq!(report.prefetched, Some(2));
    }

    #[test]
    fn cache_miss_renders_synchronously() {
        let mut directory = without_worker();
        let start = Instant::now();
        directory.load(retailers(45), start);

        assert_eq!(directory.tick(start, true).prefetched, None);
        directory.on_sentinel_visible(start);
        let report = directory.tick(start + Duration::from_millis(300), false);
        assert_eq!(report.load, Some(LoadOutcome::Rendered { page: 2, added: 20 }));
        assert_eq!(directory.view().cards()[39].number, 40);
    }

    #[test]
    fn search_is_debounced_and_restarts_numbering() {
        let mut directory = without_worker();
        let start = Instant::now();
        directory.load(retailers(45), start);
        directory.on_sentinel_visible(start);
        directory.tick(start + Duration::from_millis(300), false);
        assert_eq!(directory.view().rendered_count(), 40);

        let typed = start + Duration::from_millis(400);
        directory.search("ady", typed);
        directory.search("adyar", typed + Duration::from_millis(100));
        assert!(!directory.tick(typed + Duration::from_millis(300), false).search_applied);

        let report = directory.tick(typed + Duration::from_millis(400), false);
        assert!(report.search_applied);
        assert_eq!(directory.store().filtered().len(), 15);
        assert_eq!(directory.store().current_page(), 1);
        let cards = directory.view().cards();
        assert_eq!(cards.len(), 15);
        assert_eq!(cards[0].number, 1);
        assert!(cards.iter().all(|card| card.area == "ADYAR"));
    }

    #[test]
    fn repeated_search_gives_same_view() {
        let mut directory = without_worker();
        let now = Instant::now();
        directory.load(retailers(45), now);

        directory.apply_search("shop 1", now);
        let first = directory.view().cards().to_vec();
        directory.apply_search("shop 1", now);
        assert_eq!(directory.view().cards(), first.as_slice());
    }

    #[test]
    fn search_without_matches_shows_no_results() {
        let mut directory = without_worker();
        let now = Instant::now();
        directory.load(retailers(45), now);
        directory.apply_search("zzz", now);
        assert!(directory.view().shows_no_results());
        assert_eq!(directory.view().rendered_count(), 0);
    }

    #[test]
    fn render_started_before_search_is_discarded() {
        let (mut directory, rx) = with_worker();
        let now = Instant::now();
        directory.load(retailers(45), now);
        assert_eq!(directory.tick(now, true).prefetched, Some(2));
        let old_page = rx.recv_timeout(WAIT).unwrap();

        directory.apply_search("t nagar", now);
        assert_eq!(directory.on_page_rendered(old_page, now), Accepted::Stale);
        assert!(!directory.cache().is_cached(2));

        assert_eq!(directory.tick(now, true).prefetched, Some(2));
        let fresh = rx.recv_timeout(WAIT).unwrap();
        assert_eq!(directory.on_page_rendered(fresh, now), Accepted::Cached);
        assert!(directory.cache().is_cached(2));
    }

    #[test]
    fn dead_worker_falls_back_to_synchronous_rendering() {
        let worker = RenderWorker::spawn(|_| panic!("sink failed")).unwrap();
        let mut directory = Directory::new(&DirectoryConfig::default(), Some(worker));
        let start = Instant::now();
        directory.load(retailers(100), start);
        assert_eq!(directory.tick(start, true).prefetched, Some(2));

        let deadline = Instant::now() + WAIT;
        while directory.has_background_renderer() && Instant::now() < deadline {
            std::thread::sleep(Duration::from_millis(10));
            directory.tick(start, false);
        }
        assert!(!directory.has_background_renderer());
        assert_eq!(directory.cache().in_flight(), None);

        let later = start + Duration::from_secs(3);
        assert_eq!(directory.tick(later, true).prefetched, None);
        assert!(directory.on_sentinel_visible(later));
        let report = directory.tick(later + Duration::from_millis(300), false);
        assert_eq!(report.load, Some(LoadOutcome::Rendered { page: 2, added: 20 }));
        assert_eq!(directory.view().rendered_count(), 40);
    }

    #[test]
    fn search_cancels_pending_load() {
        let mut directory = without_worker();
        let now = Instant::now();
        directory.load(retailers(45), now);
        assert!(directory.on_sentinel_visible(now));
        directory.apply_search("shop", now);
        assert!(!directory.is_loading());
        assert_eq!(directory.tick(now + Duration::from_millis(300), false).load, None);
        assert_eq!(directory.view().rendered_count(), 20);
    }
}
