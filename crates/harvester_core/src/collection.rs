use std::collections::HashSet;
use std::num::NonZeroUsize;

use crate::termination::{self, StopReason};
use crate::Item;

/// Bookkeeping for one collector run: the seen-url set, the accumulated items
/// in first-seen order, the last observed content extent and the tick counter.
///
/// The state is pure; the caller feeds it candidates and extents and asks it
/// whether to stop.
#[derive(Debug, Clone)]
pub struct CollectionState {
    target: usize,
    ceiling: u32,
    seen: HashSet<String>,
    items: Vec<Item>,
    prev_extent: u64,
    attempts: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AbsorbStats {
    pub accepted: usize,
    pub duplicates: usize,
    pub missing_url: usize,
}

impl CollectionState {
    pub fn new(target: NonZeroUsize, ceiling: u32, initial_extent: u64) -> Self {
        Self {
            target: target.get(),
            ceiling,
            seen: HashSet::new(),
            items: Vec::new(),
            prev_extent: initial_extent,
            attempts: 0,
        }
    }

    /// Merge one scan's candidates. Candidates without a url or with an
    /// already seen url are dropped silently.
    pub fn absorb(&mut self, candidates: impl IntoIterator<Item = Item>) -> AbsorbStats {
        let mut stats = AbsorbStats::default();
        for candidate in candidates {
            if !candidate.has_url() {
                stats.missing_url += 1;
                continue;
            }
            if !self.seen.insert(candidate.url.clone()) {
                stats.duplicates += 1;
                continue;
            }
            self.items.push(candidate);
            stats.accepted += 1;
        }
        stats
    }

    /// Close a tick with the extent sampled after scrolling.
    pub fn finish_tick(&mut self, extent: u64) -> Option<StopReason> {
        self.attempts = self.attempts.saturating_add(1);
        let decision = termination::evaluate(
            self.prev_extent,
            extent,
            self.items.len(),
            self.target,
            self.attempts,
            self.ceiling,
        );
        self.prev_extent = extent;
        decision
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn into_items(self) -> Vec<Item> {
        self.items
    }
}
