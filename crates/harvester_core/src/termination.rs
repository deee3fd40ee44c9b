use std::fmt;
use std::time::Duration;

/// Interval between two collector ticks.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(1500);
/// Hard ceiling on collector ticks.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// Content extent did not change over the last tick.
    Stagnated,
    /// Accumulated item count reached the target.
    TargetReached,
    /// Tick ceiling reached.
    AttemptsExhausted,
    /// Caller cancelled the collection.
    Cancelled,
    /// The page stopped answering reads or scrolls.
    PageError,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopReason::Stagnated => write!(f, "content stopped growing"),
            StopReason::TargetReached => write!(f, "target count reached"),
            StopReason::AttemptsExhausted => write!(f, "attempt ceiling reached"),
            StopReason::Cancelled => write!(f, "cancelled"),
            StopReason::PageError => write!(f, "page stopped responding"),
        }
    }
}

/// Evaluate the three stop conditions after a tick.
///
/// When several conditions hold at once, stagnation wins over the target,
/// which wins over the attempt ceiling.
pub fn evaluate(
    prev_extent: u64,
    curr_extent: u64,
    item_count: usize,
    target: usize,
    attempts: u32,
    ceiling: u32,
) -> Option<StopReason> {
    if curr_extent == prev_extent {
        Some(StopReason::Stagnated)
    } else if item_count >= target {
        Some(StopReason::TargetReached)
    } else if attempts >= ceiling {
        Some(StopReason::AttemptsExhausted)
    } else {
        None
    }
}

pub fn should_stop(
    prev_extent: u64,
    curr_extent: u64,
    item_count: usize,
    target: usize,
    attempts: u32,
    ceiling: u32,
) -> bool {
    evaluate(prev_extent, curr_extent, item_count, target, attempts, ceiling).is_some()
}

#[cfg(test)]
mod tests {
    use super::{evaluate, should_stop, StopReason};

    #[test]
    fn unchanged_extent_stops() {
        assert_eq!(evaluate(800, 800, 0, 50, 1, 50), Some(StopReason::Stagnated));
    }

    #[test]
    fn growing_feed_below_target_continues() {
        assert!(!should_stop(800, 1600, 10, 50, 3, 50));
    }

    #[test]
    fn target_reached_stops_even_while_growing() {
        assert_eq!(
            evaluate(800, 1600, 50, 50, 3, 50),
            Some(StopReason::TargetReached)
        );
        assert_eq!(
            evaluate(800, 1600, 61, 50, 3, 50),
            Some(StopReason::TargetReached)
        );
    }

    #[test]
    fn ceiling_stops_a_feed_that_never_settles() {
        assert!(!should_stop(1, 2, 0, 50, 49, 50));
        assert_eq!(
            evaluate(1, 2, 0, 50, 50, 50),
            Some(StopReason::AttemptsExhausted)
        );
    }

    #[test]
    fn stagnation_takes_priority() {
        assert_eq!(evaluate(5, 5, 50, 50, 50, 50), Some(StopReason::Stagnated));
    }
}
