//! Instrumented element types for lifetime and panic-safety tests.
//!
//! - [`Counters`]: shared tallies of creations, clones and drops
//! - [`Probe`]: an element that reports into a [`Counters`] and can be
//!   armed to panic on a chosen clone

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Shared tallies for every [`Probe`] created from the same source.
#[derive(Debug)]
pub struct Counters {
    created: AtomicUsize,
    clones: AtomicUsize,
    drops: AtomicUsize,
    clone_limit: AtomicUsize,
}

impl Counters {
    /// Counters with no clone limit.
    pub fn new() -> Arc<Self> {
        Self::with_clone_limit(usize::MAX)
    }

    /// Counters whose probes panic once `limit` clones have succeeded.
    pub fn with_clone_limit(limit: usize) -> Arc<Self> {
        Arc::new(Self {
            created: AtomicUsize::new(0),
            clones: AtomicUsize::new(0),
            drops: AtomicUsize::new(0),
            clone_limit: AtomicUsize::new(limit),
        })
    }

    /// Change the clone limit, counted from now.
    pub fn arm(&self, additional_clones: usize) {
        let done = self.clones.load(Ordering::SeqCst);
        self.clone_limit
            .store(done.saturating_add(additional_clones), Ordering::SeqCst);
    }

    /// Remove the clone limit.
    pub fn disarm(&self) {
        self.clone_limit.store(usize::MAX, Ordering::SeqCst);
    }

    /// Probes created, by [`Probe::new`] or a successful clone.
    pub fn created(&self) -> usize {
        self.created.load(Ordering::SeqCst)
    }

    /// Successful clones.
    pub fn clones(&self) -> usize {
        self.clones.load(Ordering::SeqCst)
    }

    /// Probes dropped.
    pub fn drops(&self) -> usize {
        self.drops.load(Ordering::SeqCst)
    }

    /// Probes currently alive.
    pub fn live(&self) -> usize {
        self.created() - self.drops()
    }
}

/// Element type that counts its own lifecycle events.
///
/// Equality compares `value` only.
#[derive(Debug)]
pub struct Probe {
    pub value: i32,
    counters: Arc<Counters>,
}

impl Probe {
    pub fn new(value: i32, counters: &Arc<Counters>) -> Self {
        counters.created.fetch_add(1, Ordering::SeqCst);
        Self {
            value,
            counters: Arc::clone(counters),
        }
    }
}

impl Clone for Probe {
    fn clone(&self) -> Self {
        let limit = self.counters.clone_limit.load(Ordering::SeqCst);
        let done = self.counters.clones.load(Ordering::SeqCst);
        if done >= limit {
            panic!("probe clone limit of {limit} reached");
        }
        self.counters.clones.fetch_add(1, Ordering::SeqCst);
        Self::new(self.value, &self.counters)
    }
}

impl Drop for Probe {
    fn drop(&mut self) {
        self.counters.drops.fetch_add(1, Ordering::SeqCst);
    }
}

impl PartialEq for Probe {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_lifecycle() {
        let counters = Counters::new();
        let a = Probe::new(1, &counters);
        let b = a.clone();
        assert_eq!(counters.created(), 2);
        assert_eq!(counters.clones(), 1);
        drop(a);
        assert_eq!(counters.live(), 1);
        drop(b);
        assert_eq!(counters.drops(), 2);
        assert_eq!(counters.live(), 0);
    }

    #[test]
    fn armed_probe_panics_after_limit() {
        let counters = Counters::with_clone_limit(1);
        let probe = Probe::new(7, &counters);
        let first = probe.clone();
        let second = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| probe.clone()));
        assert!(second.is_err());
        assert_eq!(counters.clones(), 1);
        drop(first);
        drop(probe);
        assert_eq!(counters.live(), 0);
    }

    #[test]
    fn rearming_counts_from_now() {
        let counters = Counters::with_clone_limit(0);
        let probe = Probe::new(0, &counters);
        counters.disarm();
        let _copies: Vec<Probe> = (0..3).map(|_| probe.clone()).collect();
        counters.arm(1);
        let _ok = probe.clone();
        let failed = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| probe.clone()));
        assert!(failed.is_err());
        assert_eq!(counters.clones(), 4);
    }
}
