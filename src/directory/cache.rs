//! Pre-rendered page cache and the idle-time scheduler that fills it.
//!
//! Per page number: unrequested → requested (in flight) → cached → consumed.
//! Only one page is in flight at a time. Every entry belongs to one store
//! generation; [`PageCache::invalidate`] drops everything when the filtered
//! list is replaced, and results tagged with an older generation are
//! discarded on arrival.

use std::collections::{HashMap, HashSet};
use std::time::{Duration, Instant};

use crate::directory::render::Fragment;
use crate::directory::store::RetailerStore;
use crate::directory::timer::DeadlineTimer;
use crate::directory::worker::{RenderRequest, RenderedPage};

/// What happened to a rendered page handed to [`PageCache::accept`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accepted {
    Cached,
    /// Rendered for a filtered list that has since been replaced.
    Stale,
    /// The page was already shown via the synchronous path.
    AlreadyConsumed,
}

#[derive(Debug, Default)]
pub struct PageCache {
    generation: u64,
    pages: HashMap<usize, Fragment>,
    consumed: HashSet<usize>,
    in_flight: Option<usize>,
}

impl PageCache {
    pub fn new(generation: u64) -> Self {
        Self {
            generation,
            ..Self::default()
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Drops every entry and forgets the in-flight request.
    pub fn invalidate(&mut self, generation: u64) {
        self.generation = generation;
        self.pages.clear();
        self.consumed.clear();
        self.in_flight = None;
    }

    /// Removes and returns a cached page. The page counts as consumed either
    /// way, so a late background result for it is not cached.
    pub fn take(&mut self, page: usize) -> Option<Fragment> {
        self.consumed.insert(page);
        self.pages.remove(&page)
    }

    pub fn accept(&mut self, rendered: RenderedPage) -> Accepted {
        if rendered.generation != self.generation {
            return Accepted::Stale;
        }
        if self.in_flight == Some(rendered.page) {
            self.in_flight = None;
        }
        if self.consumed.contains(&rendered.page) {
            return Accepted::AlreadyConsumed;
        }
        self.pages.insert(rendered.page, rendered.fragment);
        Accepted::Cached
    }

    pub fn is_cached(&self, page: usize) -> bool {
        self.pages.contains_key(&page)
    }

    pub fn in_flight(&self) -> Option<usize> {
        self.in_flight
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn begin_request(&mut self, page: usize) {
        self.in_flight = Some(page);
    }

    /// Forgets the in-flight request without a result (worker went away).
    pub fn abandon_request(&mut self) {
        self.in_flight = None;
    }

    /// First page after `current_page`, at most `depth` ahead, that is not
    /// cached, consumed or in flight and starts inside the list.
    pub fn next_page(
        &self,
        current_page: usize,
        depth: usize,
        total_items: usize,
        page_size: usize,
    ) -> Option<usize> {
        (current_page + 1..=current_page + depth)
            .take_while(|page| (page - 1) * page_size < total_items)
            .find(|page| {
                !self.pages.contains_key(page)
                    && !self.consumed.contains(page)
                    && self.in_flight != Some(*page)
            })
    }
}

/// Decides when the next background render is dispatched.
///
/// Once armed, the next page goes out on the first idle poll, or when
/// `max_wait` has passed without one.
#[derive(Debug)]
pub struct Prefetcher {
    timer: DeadlineTimer<()>,
    max_wait: Duration,
    depth: usize,
}

impl Prefetcher {
    pub fn new(max_wait: Duration, depth: usize) -> Self {
        Self {
            timer: DeadlineTimer::new(),
            max_wait,
            depth: depth.max(1),
        }
    }

    /// Arms the scheduler. An already armed scheduler keeps its deadline.
    pub fn arm(&mut self, now: Instant) {
        if !self.timer.is_pending() {
            self.timer.schedule((), self.max_wait, now);
        }
    }

    pub fn disarm(&mut self) {
        self.timer.cancel();
    }

    pub fn is_armed(&self) -> bool {
        self.timer.is_pending()
    }

    /// Returns the request to send to the worker, if it is time for one.
    pub fn poll(
        &mut self,
        now: Instant,
        idle: bool,
        cache: &mut PageCache,
        store: &RetailerStore,
        page_size: usize,
    ) -> Option<RenderRequest> {
        if !self.timer.is_pending() {
            return None;
        }
        // Completion re-arms; nothing to do until the current render lands.
        if cache.in_flight().is_some() {
            self.timer.cancel();
            return None;
        }
        let due = self.timer.poll(now).is_some();
        if !due && !idle {
            return None;
        }
        self.timer.cancel();

        let page = cache.next_page(
            store.current_page(),
            self.depth,
            store.filtered().len(),
            page_size,
        )?;
        let slice = store.page_slice(page, page_size)?;
        cache.begin_request(page);

        Some(RenderRequest {
            generation: store.generation(),
            page,
            start_index: slice.start_index,
            items: slice.items.to_vec(),
        })
    }
}
