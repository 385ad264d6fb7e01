//! One-shot trigger guard for scroll reveals.
//!
//! The browser delivers intersection callbacks one at a time, but an
//! observer can report the same target again before it is unobserved. The
//! guard makes "at most once per element" explicit instead of relying on
//! callback timing.

#[cfg(test)]
#[path = "reveal_test.rs"]
mod reveal_test;

use std::collections::HashMap;
use std::hash::Hash;

/// Lifecycle of a single one-shot trigger.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OneShot {
    #[default]
    Pending,
    Triggered,
}

impl OneShot {
    /// Move to `Triggered`. Returns `true` only on the first call.
    pub fn fire(&mut self) -> bool {
        match self {
            Self::Pending => {
                *self = Self::Triggered;
                true
            }
            Self::Triggered => false,
        }
    }

    #[must_use]
    pub fn is_triggered(self) -> bool {
        self == Self::Triggered
    }
}

/// One [`OneShot`] per tracked key.
#[derive(Debug)]
pub struct RevealSet<K> {
    states: HashMap<K, OneShot>,
}

impl<K: Eq + Hash> Default for RevealSet<K> {
    fn default() -> Self {
        Self { states: HashMap::new() }
    }
}

impl<K: Eq + Hash> RevealSet<K> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start tracking `key` as pending. Already-tracked keys keep their state.
    pub fn track(&mut self, key: K) {
        self.states.entry(key).or_default();
    }

    /// Fire `key`'s trigger. Untracked keys never fire.
    pub fn fire(&mut self, key: &K) -> bool {
        self.states.get_mut(key).is_some_and(OneShot::fire)
    }

    #[must_use]
    pub fn pending(&self) -> usize {
        self.states.values().filter(|s| !s.is_triggered()).count()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}
