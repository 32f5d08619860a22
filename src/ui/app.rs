use crate::directory::{Card, Directory, RenderedPage};
use crate::retailer::Retailer;
use crate::ui::header::HeaderStats;
use crate::ui::listing::{ListingIntent, ListingReducer, ListingState};
use crate::ui::mvi::Reducer;
use crate::ui::search::{SearchBoxState, SearchIntent, SearchReducer};
use std::time::Instant;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Focus {
    Search,
    List,
    /// Detail popup for the selected card.
    Detail,
}

/// Generic MVI dispatch: takes current state, runs reducer, stores result.
macro_rules! dispatch_mvi {
    ($self:expr, $field:ident, $reducer:ty, $intent:expr) => {
        $self.$field = <$reducer>::reduce(std::mem::take(&mut $self.$field), $intent);
    };
}

pub struct App {
    should_quit: bool,
    focus: Focus,
    directory: Directory,
    /// Search box (MVI pattern).
    search_box: SearchBoxState,
    /// List viewport (MVI pattern).
    listing: ListingState,
    sentinel_margin: usize,
    load_error: Option<String>,
}

impl App {
    pub fn new(directory: Directory, sentinel_margin: usize) -> Self {
        Self {
            should_quit: false,
            focus: Focus::Search,
            directory,
            search_box: SearchBoxState::default(),
            listing: ListingState::default(),
            sentinel_margin,
            load_error: None,
        }
    }

    pub fn load(&mut self, retailers: Vec<Retailer>, now: Instant) {
        self.directory.load(retailers, now);
        self.dispatch_listing(ListingIntent::Reset);
    }

    /// Shows the error banner over an empty directory.
    pub fn set_load_error(&mut self, message: impl Into<String>) {
        self.load_error = Some(message.into());
    }

    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn request_quit(&mut self) {
        self.should_quit = true;
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn directory(&self) -> &Directory {
        &self.directory
    }

    pub fn search_box(&self) -> &SearchBoxState {
        &self.search_box
    }

    pub fn listing(&self) -> &ListingState {
        &self.listing
    }

    pub fn cards(&self) -> &[Card] {
        self.directory.view().cards()
    }

    pub fn selected_card(&self) -> Option<&Card> {
        self.cards().get(self.listing.selected)
    }

    pub fn header_stats(&self) -> HeaderStats {
        let store = self.directory.store();
        HeaderStats {
            total: store.all().len(),
            areas: store.unique_areas(),
            matching: store.filtered().len(),
            shown: self.directory.view().rendered_count(),
            background: self.directory.has_background_renderer(),
            failed: self.load_error.is_some(),
        }
    }

    pub fn focus_search(&mut self) {
        self.focus = Focus::Search;
    }

    pub fn focus_list(&mut self) {
        self.focus = Focus::List;
    }

    pub fn open_detail(&mut self) {
        if self.selected_card().is_some() {
            self.focus = Focus::Detail;
        }
    }

    pub fn close_detail(&mut self) {
        if self.focus == Focus::Detail {
            self.focus = Focus::List;
        }
    }

    /// Applies an edit to the search box and queues a debounced search when
    /// the text changed.
    pub fn edit_search(&mut self, intent: SearchIntent, now: Instant) {
        let before = self.search_box.query.clone();
        dispatch_mvi!(self, search_box, SearchReducer, intent);
        if self.search_box.query != before {
            self.directory.search(&self.search_box.query, now);
        }
    }

    pub fn scroll(&mut self, delta: isize) {
        let len = self.cards().len();
        self.dispatch_listing(ListingIntent::Move { delta, len });
    }

    pub fn page_down(&mut self) {
        let len = self.cards().len();
        self.dispatch_listing(ListingIntent::PageDown { len });
    }

    pub fn page_up(&mut self) {
        let len = self.cards().len();
        self.dispatch_listing(ListingIntent::PageUp { len });
    }

    pub fn scroll_to_top(&mut self) {
        self.dispatch_listing(ListingIntent::First);
    }

    pub fn scroll_to_bottom(&mut self) {
        let len = self.cards().len();
        self.dispatch_listing(ListingIntent::Last { len });
    }

    /// `visible` is the number of cards that fit in the list area.
    pub fn on_resize(&mut self, visible: usize) {
        let len = self.cards().len();
        self.dispatch_listing(ListingIntent::Resize { visible, len });
    }

    pub fn on_page_rendered(&mut self, rendered: RenderedPage, now: Instant) {
        self.directory.on_page_rendered(rendered, now);
    }

    /// Advances directory timers, then checks whether the sentinel row is in
    /// view. `idle` means the loop waited without handling any input.
    pub fn on_tick(&mut self, now: Instant, idle: bool) {
        let report = self.directory.tick(now, idle);
        if report.search_applied {
            self.dispatch_listing(ListingIntent::Reset);
            self.close_detail();
        }

        if self
            .listing
            .sentinel_visible(self.cards().len(), self.sentinel_margin)
        {
            self.directory.on_sentinel_visible(now);
        }
    }

    fn dispatch_listing(&mut self, intent: ListingIntent) {
        dispatch_mvi!(self, listing, ListingReducer, intent);
    }
}
