//! Deadline-based one-shot timer polled by the event loop.

use std::time::{Duration, Instant};

/// Holds at most one pending value that becomes ready at a deadline.
///
/// Scheduling replaces any unfired value, which is what debouncing needs:
/// only the latest call survives. Nothing runs on its own; the owner calls
/// [`DeadlineTimer::poll`] with the current time.
#[derive(Debug)]
pub struct DeadlineTimer<T> {
    pending: Option<(Instant, T)>,
}

impl<T> Default for DeadlineTimer<T> {
    fn default() -> Self {
        Self { pending: None }
    }
}

impl<T> DeadlineTimer<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules `value` to fire `delay` after `now`, returning the value it superseded.
    pub fn schedule(&mut self, value: T, delay: Duration, now: Instant) -> Option<T> {
        self.pending
            .replace((now + delay, value))
            .map(|(_, superseded)| superseded)
    }

    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|(_, value)| value)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Returns the value once its deadline has passed. Fires at most once.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some((deadline, _)) if now >= *deadline => self.cancel(),
            _ => None,
        }
    }
}
