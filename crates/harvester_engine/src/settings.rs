use std::time::Duration;

use harvester_core::{DEFAULT_MAX_ATTEMPTS, DEFAULT_POLL_INTERVAL};
use serde::{Deserialize, Serialize};

use crate::selectors::FeedSelectors;

/// Wait after navigating to a detail page before reading replies.
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(3000);
/// Upper bound on one whole secondary fetch.
pub const DEFAULT_SECONDARY_FETCH_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HarvestSettings {
    pub poll_interval_ms: u64,
    pub max_attempts: u32,
    pub settle_delay_ms: u64,
    pub secondary_fetch_timeout_ms: u64,
    pub selectors: FeedSelectors,
}

impl Default for HarvestSettings {
    fn default() -> Self {
        Self {
            poll_interval_ms: DEFAULT_POLL_INTERVAL.as_millis() as u64,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            settle_delay_ms: DEFAULT_SETTLE_DELAY.as_millis() as u64,
            secondary_fetch_timeout_ms: DEFAULT_SECONDARY_FETCH_TIMEOUT.as_millis() as u64,
            selectors: FeedSelectors::default(),
        }
    }
}

impl HarvestSettings {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    pub fn secondary_fetch_timeout(&self) -> Duration {
        Duration::from_millis(self.secondary_fetch_timeout_ms)
    }

    /// A secondary fetch sleeps for the settle delay inside its timeout, so a
    /// timeout at or below the settle delay can never deliver replies.
    pub fn fetch_timeout_covers_settle(&self) -> bool {
        self.secondary_fetch_timeout_ms > self.settle_delay_ms
    }
}
