//! Trailing-edge debouncer.
//!
//! Each [`signal`](Debouncer::signal) replaces any pending value and restarts
//! the quiet window. [`poll`](Debouncer::poll) hands the value out once the
//! window has elapsed with no newer signal. Time is passed in explicitly, so
//! the frame loop can poll with `Instant::now()` and tests can use synthetic
//! instants.

use std::time::{Duration, Instant};

#[derive(Debug)]
pub struct Debouncer<T> {
    window: Duration,
    pending: Option<(Instant, T)>,
}

impl<T> Debouncer<T> {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
        }
    }

    /// Record a signal at `now`, superseding any pending one.
    pub fn signal(&mut self, now: Instant, value: T) {
        self.pending = Some((now + self.window, value));
    }

    /// Take the pending value if its quiet window has fully elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        let ready = matches!(&self.pending, Some((deadline, _)) if now >= *deadline);
        if ready {
            self.pending.take().map(|(_, value)| value)
        } else {
            None
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Drop the pending value without firing it.
    pub fn cancel(&mut self) {
        self.pending = None;
    }
}
