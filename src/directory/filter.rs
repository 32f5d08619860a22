//! Search filtering and its debounce.

use std::time::{Duration, Instant};

use crate::directory::timer::DeadlineTimer;
use crate::retailer::Retailer;

/// Lower-cases and trims a raw query.
pub fn normalize_query(query: &str) -> String {
    query.to_lowercase().trim().to_string()
}

/// Returns the retailers whose name, area or city contains `query`,
/// case-insensitively, in their original order. A blank query keeps all.
pub fn filter_retailers(query: &str, all: &[Retailer]) -> Vec<Retailer> {
    let needle = normalize_query(query);
    if needle.is_empty() {
        return all.to_vec();
    }
    all.iter()
        .filter(|retailer| matches(retailer, &needle))
        .cloned()
        .collect()
}

fn matches(retailer: &Retailer, needle: &str) -> bool {
    retailer.name.to_lowercase().contains(needle)
        || retailer.area.to_lowercase().contains(needle)
        || retailer
            .city
            .as_deref()
            .is_some_and(|city| city.to_lowercase().contains(needle))
}

/// Collapses bursts of search input into one evaluation of the latest query.
#[derive(Debug)]
pub struct SearchDebouncer {
    timer: DeadlineTimer<String>,
    delay: Duration,
}

impl SearchDebouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            timer: DeadlineTimer::new(),
            delay,
        }
    }

    /// Records a query; any earlier unevaluated query is superseded.
    pub fn submit(&mut self, query: &str, now: Instant) {
        if let Some(superseded) = self.timer.schedule(query.to_string(), self.delay, now) {
            tracing::trace!(superseded = %superseded, "Search superseded");
        }
    }

    /// Returns the query to evaluate once the quiet period has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<String> {
        self.timer.poll(now)
    }

    pub fn is_pending(&self) -> bool {
        self.timer.is_pending()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Retailer> {
        vec![
            Retailer::new("Vision Plus", "ADYAR").with_city("Chennai"),
            Retailer::new("Eye Care", "KORAMANGALA").with_city("Bangalore"),
            Retailer::new("Chennai Optics", "ANNA NAGAR"),
            Retailer::new("Lens Hub", "T NAGAR"),
        ]
    }

    #[test]
    fn blank_query_keeps_everything_in_order() {
        let all = sample();
        assert_eq!(filter_retailers("   ", &all), all);
    }

    #[test]
    fn matches_name_area_or_city_case_insensitively() {
        let all = sample();
        let names: Vec<String> = filter_retailers("  CHENNAI ", &all)
            .into_iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(names, vec!["Vision Plus", "Chennai Optics"]);

        let by_area = filter_retailers("nagar", &all);
        assert_eq!(by_area.len(), 2);
    }

    #[test]
    fn debouncer_keeps_only_latest_query() {
        let start = Instant::now();
        let mut debouncer = SearchDebouncer::new(Duration::from_millis(300));
        debouncer.submit("c", start);
        debouncer.submit("ch", start + Duration::from_millis(100));
        debouncer.submit("che", start + Duration::from_millis(200));

        assert_eq!(debouncer.poll(start + Duration::from_millis(400)), None);
        assert_eq!(
            debouncer.poll(start + Duration::from_millis(500)),
            Some("che".to_string())
        );
        assert!(!debouncer.is_pending());
    }
}
