//! City-tier ordering for retailer exports.

use std::cmp::Ordering;

use crate::retailer::Retailer;

const DEFAULT_TIER: u8 = 6;

const CITY_TIERS: &[(&str, u8)] = &[
    ("DELHI", 0),
    ("NOIDA", 1),
    ("BANGALORE", 2),
    ("HYDERABAD", 3),
    // State capitals
    ("JAIPUR", 4),
    ("LUCKNOW", 4),
    ("BHOPAL", 4),
    ("GANDHINAGAR", 4),
    ("RAIPUR", 4),
    ("SHIMLA", 4),
    ("SRINAGAR", 4),
    // Major cities
    ("PUNE", 5),
    ("AHMEDABAD", 5),
    ("GURUGRAM", 5),
    ("CHANDIGARH", 5),
    ("LUDHIANA", 5),
    ("AMRITSAR", 5),
    ("KANPUR", 5),
    ("NAGPUR", 5),
    ("SURAT", 5),
    ("INDORE", 5),
    ("VISAKHAPATNAM", 5),
    ("VIJAYAWADA", 5),
];

pub fn city_tier(city: &str) -> u8 {
    let city = city.trim().to_uppercase();
    CITY_TIERS
        .iter()
        .find(|(name, _)| *name == city)
        .map(|(_, tier)| *tier)
        .unwrap_or(DEFAULT_TIER)
}

fn city_of(retailer: &Retailer) -> String {
    retailer
        .city
        .as_deref()
        .unwrap_or(&retailer.area)
        .trim()
        .to_uppercase()
}

/// Orders retailers by (city tier, city, name). Stable for equal keys.
pub fn sort_by_city_priority(retailers: &mut [Retailer]) {
    retailers.sort_by(|a, b| {
        let (city_a, city_b) = (city_of(a), city_of(b));
        city_tier(&city_a)
            .cmp(&city_tier(&city_b))
            .then_with(|| city_a.cmp(&city_b))
            .then_with(|| compare_names(a, b))
    });
}

fn compare_names(a: &Retailer, b: &Retailer) -> Ordering {
    a.name.to_uppercase().cmp(&b.name.to_uppercase())
}
