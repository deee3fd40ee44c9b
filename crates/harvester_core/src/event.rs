use std::fmt;

use crate::StopReason;

/// Coarse progress notifications emitted by a harvest run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HarvestEvent {
    /// Run accepted; about to resolve the active view.
    Started,
    /// Collector injected with its target count.
    Collecting { target: usize },
    /// Collector finished.
    Collected { count: usize, stop_reason: StopReason },
    /// Secondary fetch for item `index` (1-based) of `total`.
    FetchingReplies { index: usize, total: usize },
    /// Navigating back to the original view address.
    Restoring,
    /// Run finished with a result.
    Completed { total_items: usize },
    /// Run failed with a fatal error.
    Failed { message: String },
}

impl HarvestEvent {
    pub fn is_terminal(&self) -> bool {
        matches!(self, HarvestEvent::Completed { .. } | HarvestEvent::Failed { .. })
    }
}

impl fmt::Display for HarvestEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HarvestEvent::Started => write!(f, "starting harvest"),
            HarvestEvent::Collecting { target } => {
                write!(f, "collecting up to {target} items")
            }
            HarvestEvent::Collected { count, stop_reason } => {
                write!(f, "collected {count} items ({stop_reason})")
            }
            HarvestEvent::FetchingReplies { index, total } => {
                write!(f, "fetching replies {index} of {total}")
            }
            HarvestEvent::Restoring => write!(f, "returning to original page"),
            HarvestEvent::Completed { total_items } => {
                write!(f, "done: {total_items} items harvested")
            }
            HarvestEvent::Failed { message } => write!(f, "failed: {message}"),
        }
    }
}
