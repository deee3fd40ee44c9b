use thiserror::Error;

/// Failures reported by a page-automation collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AutomationError {
    #[error("navigation to {address} failed: {message}")]
    Navigation { address: String, message: String },
    #[error("page evaluation failed: {0}")]
    Evaluation(String),
    #[error("view is closed")]
    ViewClosed,
    #[error("invalid address: {0}")]
    InvalidAddress(String),
    #[error("http status {status}")]
    Http { status: u16 },
    #[error("unsupported content type {0}")]
    UnsupportedContentType(String),
    #[error("response too large (max {max_bytes})")]
    TooLarge { max_bytes: u64 },
    #[error("timeout")]
    Timeout,
    #[error("network error: {0}")]
    Network(String),
}

/// Fatal outcomes of a harvest run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HarvestError {
    #[error("no active view to harvest from")]
    NoActiveContext,
    #[error("no items found")]
    EmptyResult,
}

/// Per-item secondary fetch failure. Logged, never surfaced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub(crate) enum SecondaryFetchError {
    #[error(transparent)]
    Automation(#[from] AutomationError),
    #[error("timed out after {0} ms")]
    Timeout(u128),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid selector for {field}: {message}")]
pub struct SelectorError {
    pub field: &'static str,
    pub message: String,
}
