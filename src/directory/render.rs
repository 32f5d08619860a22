//! Pure page rendering: retailers in, presentation fragment out.
//!
//! Nothing here touches the live view or any shared state, so the same
//! functions run on the render worker and on the UI thread.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::Serialize;

use crate::retailer::Retailer;

/// Characters left unescaped in a URI component.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactLink {
    pub number: String,
    /// `tel:` link for the number.
    pub href: String,
}

/// One retailer entry, ready to be shown without further lookups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Card {
    /// Element id, `retailer-<card id>`.
    pub id: String,
    /// 1-based position in the filtered list.
    pub number: usize,
    pub name: String,
    pub area: String,
    pub city: Option<String>,
    pub contacts: Vec<ContactLink>,
    pub map_embed_url: String,
    pub directions_url: Option<String>,
}

/// Cards for one page, in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Fragment {
    start_index: usize,
    cards: Vec<Card>,
}

impl Fragment {
    pub fn start_index(&self) -> usize {
        self.start_index
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn into_cards(self) -> Vec<Card> {
        self.cards
    }
}

/// Maps-embed URL for `name, area, city`.
pub fn map_embed_url(retailer: &Retailer) -> String {
    let query = format!(
        "{}, {}, {}",
        retailer.name,
        retailer.area,
        retailer.city.as_deref().unwrap_or("")
    );
    format!(
        "https://maps.google.com/maps?q={}&output=embed",
        utf8_percent_encode(&query, URI_COMPONENT)
    )
}

pub fn render_card(retailer: &Retailer, index: usize) -> Card {
    Card {
        id: format!("retailer-{}", retailer.card_id()),
        number: index + 1,
        name: retailer.name.clone(),
        area: retailer.area.clone(),
        city: retailer.city.clone(),
        contacts: retailer
            .contacts
            .iter()
            .map(|number| ContactLink {
                number: number.clone(),
                href: format!("tel:{number}"),
            })
            .collect(),
        map_embed_url: map_embed_url(retailer),
        directions_url: retailer.map_link.clone(),
    }
}

/// Renders `items` whose first element sits at `start_index` in the filtered list.
pub fn render_page(items: &[Retailer], start_index: usize) -> Fragment {
    Fragment {
        start_index,
        cards: items
            .iter()
            .enumerate()
            .map(|(offset, retailer)| render_card(retailer, start_index + offset))
            .collect(),
    }
}
