//! Harvester engine: page automation seam, feed collection and reply fetching.
mod automation;
mod collector;
mod error;
mod extract;
mod filename;
mod http;
mod orchestrator;
mod persist;
mod progress;
mod selectors;
mod settings;

pub use automation::{PageAutomation, PageSession, ViewHandle};
pub use collector::{CollectionReport, Collector};
pub use error::{AutomationError, HarvestError, SelectorError};
pub use extract::{scan_items, scan_replies};
pub use filename::export_filename;
pub use http::{HttpPageAutomation, HttpSettings};
pub use orchestrator::Orchestrator;
pub use persist::{ensure_output_dir, write_export, AtomicFileWriter, PersistError};
pub use progress::{ChannelProgressSink, LogProgressSink, NoopProgressSink, ProgressSink};
pub use selectors::{CompiledSelectors, FeedSelectors};
pub use settings::{HarvestSettings, DEFAULT_SECONDARY_FETCH_TIMEOUT, DEFAULT_SETTLE_DELAY};
