use std::sync::mpsc;

use engine_logging::{engine_error, engine_info};
use harvester_core::HarvestEvent;

pub trait ProgressSink: Send + Sync {
    fn emit(&self, event: HarvestEvent);
}

/// Forwards events over a std channel; a dropped receiver is ignored.
pub struct ChannelProgressSink {
    tx: mpsc::Sender<HarvestEvent>,
}

impl ChannelProgressSink {
    pub fn new(tx: mpsc::Sender<HarvestEvent>) -> Self {
        Self { tx }
    }
}

impl ProgressSink for ChannelProgressSink {
    fn emit(&self, event: HarvestEvent) {
        let _ = self.tx.send(event);
    }
}

/// Writes each event's text to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogProgressSink;

impl ProgressSink for LogProgressSink {
    fn emit(&self, event: HarvestEvent) {
        match event {
            HarvestEvent::Failed { .. } => engine_error!("{}", event),
            _ => engine_info!("{}", event),
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopProgressSink;

impl ProgressSink for NoopProgressSink {
    fn emit(&self, _event: HarvestEvent) {}
}
