//! Retailer records as held by the directory.

use serde::Serialize;

/// One retailer entry. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Retailer {
    /// SAP code from the source data, when present.
    pub sap_code: Option<String>,
    pub name: String,
    /// Area or location line (e.g. "ADYAR").
    pub area: String,
    pub city: Option<String>,
    /// Cleaned, de-duplicated contact numbers in source order.
    pub contacts: Vec<String>,
    /// Directions link supplied by the source (Google Maps share URL).
    pub map_link: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl Retailer {
    pub fn new(name: impl Into<String>, area: impl Into<String>) -> Self {
        Self {
            sap_code: None,
            name: name.into(),
            area: area.into(),
            city: None,
            contacts: Vec::new(),
            map_link: None,
            latitude: None,
            longitude: None,
        }
    }

    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.city = non_empty(city.into());
        self
    }

    pub fn with_sap_code(mut self, code: impl Into<String>) -> Self {
        self.sap_code = non_empty(code.into());
        self
    }

    /// Adds a contact number, applying the same cleaning as [`clean_contacts`].
    pub fn with_contact(mut self, contact: &str) -> Self {
        let mut merged: Vec<&str> = self.contacts.iter().map(String::as_str).collect();
        merged.push(contact);
        self.contacts = clean_contacts(merged);
        self
    }

    pub fn with_map_link(mut self, link: impl Into<String>) -> Self {
        self.map_link = non_empty(link.into());
        self
    }

    /// Stable identifier used for card ids.
    ///
    /// The SAP code when available, otherwise name + first contact with all
    /// whitespace removed.
    pub fn card_id(&self) -> String {
        if let Some(code) = self.sap_code.as_deref().filter(|c| !c.trim().is_empty()) {
            return code.to_string();
        }
        let contact = self.contacts.first().map(String::as_str).unwrap_or("");
        self.name
            .chars()
            .chain(contact.chars())
            .filter(|c| !c.is_whitespace())
            .collect()
    }
}

/// Trims each raw contact, strips a leading `tel:`, drops empties and
/// duplicates while keeping first-seen order.
pub fn clean_contacts<'a>(raw: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut cleaned: Vec<String> = Vec::new();
    for value in raw {
        let value = value.trim();
        let value = value.strip_prefix("tel:").unwrap_or(value).trim();
        if value.is_empty() || cleaned.iter().any(|c| c == value) {
            continue;
        }
        cleaned.push(value.to_string());
    }
    cleaned
}

pub(crate) fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
