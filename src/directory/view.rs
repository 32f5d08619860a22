use crate::directory::render::{Card, Fragment};

/// The live list of cards currently shown.
#[derive(Debug, Default)]
pub struct ListingView {
    cards: Vec<Card>,
    no_results: bool,
}

impl ListingView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole list. An empty fragment shows the no-results state.
    pub fn replace(&mut self, fragment: Fragment) {
        self.no_results = fragment.is_empty();
        self.cards = fragment.into_cards();
    }

    pub fn append(&mut self, fragment: Fragment) {
        if !fragment.is_empty() {
            self.no_results = false;
        }
        self.cards.extend(fragment.into_cards());
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn rendered_count(&self) -> usize {
        self.cards.len()
    }

    pub fn shows_no_results(&self) -> bool {
        self.no_results
    }
}
