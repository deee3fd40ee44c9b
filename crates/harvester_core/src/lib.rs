//! Harvester core: pure feed data model, collection bookkeeping and stop policy.
mod collection;
mod event;
mod export;
mod item;
pub mod termination;

pub use collection::{AbsorbStats, CollectionState};
pub use event::HarvestEvent;
pub use export::{
    ExportItem, ExportRecord, ExportReply, ItemEngagement, ItemMetadata, ReplyEngagement,
    ReplyMetadata,
};
pub use item::{HarvestResult, Item, Reply, COUNT_DEFAULT};
pub use termination::{should_stop, StopReason, DEFAULT_MAX_ATTEMPTS, DEFAULT_POLL_INTERVAL};
