use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::Duration;

use engine_logging::{engine_debug, engine_info, engine_warn};
use harvester_core::{CollectionState, Item, StopReason};
use tokio_util::sync::CancellationToken;
use url::Url;

use crate::automation::PageSession;
use crate::extract::scan_items;
use crate::selectors::CompiledSelectors;
use crate::settings::HarvestSettings;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionReport {
    pub items: Vec<Item>,
    pub ticks: u32,
    pub stop_reason: StopReason,
}

/// Poll-scroll-dedup loop over one rendered feed.
///
/// Each tick scans the document, merges new items, scrolls to the bottom,
/// waits one poll interval for the feed to render more, then samples the
/// content extent and evaluates the stop conditions. Target count is only
/// checked at tick boundaries.
#[derive(Debug, Clone)]
pub struct Collector {
    selectors: Arc<CompiledSelectors>,
    poll_interval: Duration,
    max_attempts: u32,
}

impl Collector {
    pub fn new(
        selectors: Arc<CompiledSelectors>,
        poll_interval: Duration,
        max_attempts: u32,
    ) -> Self {
        Self {
            selectors,
            poll_interval,
            max_attempts,
        }
    }

    pub fn from_settings(selectors: Arc<CompiledSelectors>, settings: &HarvestSettings) -> Self {
        Self::new(selectors, settings.poll_interval(), settings.max_attempts)
    }

    /// Collect items from the session's document. Never fails: page errors
    /// end the loop with whatever was accumulated.
    pub async fn collect(
        &self,
        session: PageSession<'_>,
        target: NonZeroUsize,
        base: Option<&Url>,
        cancel: &CancellationToken,
    ) -> CollectionReport {
        let initial_extent = match session.content_extent().await {
            Ok(extent) => extent,
            Err(err) => {
                engine_warn!("Collector could not read initial extent: {}", err);
                return CollectionReport {
                    items: Vec::new(),
                    ticks: 0,
                    stop_reason: StopReason::PageError,
                };
            }
        };
        let mut state = CollectionState::new(target, self.max_attempts, initial_extent);

        let stop_reason = loop {
            if cancel.is_cancelled() {
                break StopReason::Cancelled;
            }

            let html = match session.document_html().await {
                Ok(html) => html,
                Err(err) => {
                    engine_warn!("Collector document read failed: {}", err);
                    break StopReason::PageError;
                }
            };
            let stats = state.absorb(scan_items(&html, &self.selectors, base));

            if let Err(err) = session.scroll_to_bottom().await {
                engine_warn!("Collector scroll failed: {}", err);
                break StopReason::PageError;
            }

            tokio::select! {
                _ = tokio::time::sleep(self.poll_interval) => {}
                _ = cancel.cancelled() => break StopReason::Cancelled,
            }

            let extent = match session.content_extent().await {
                Ok(extent) => extent,
                Err(err) => {
                    engine_warn!("Collector extent read failed: {}", err);
                    break StopReason::PageError;
                }
            };

            engine_debug!(
                "tick={} new={} dup={} no_url={} total={} extent={}",
                state.attempts() + 1,
                stats.accepted,
                stats.duplicates,
                stats.missing_url,
                state.len(),
                extent
            );

            if let Some(reason) = state.finish_tick(extent) {
                break reason;
            }
        };

        let ticks = state.attempts();
        engine_info!(
            "Collector stopped after {} ticks with {} items: {}",
            ticks,
            state.len(),
            stop_reason
        );
        CollectionReport {
            items: state.into_items(),
            ticks,
            stop_reason,
        }
    }
}
