use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::Duration;

use engine_logging::{engine_debug, engine_info, engine_warn};
use harvester_core::{HarvestEvent, HarvestResult, Reply};
use tokio_util::sync::CancellationToken;
use url::Url;

use crate::automation::{PageAutomation, PageSession, ViewHandle};
use crate::collector::Collector;
use crate::error::SecondaryFetchError;
use crate::extract::scan_replies;
use crate::progress::{NoopProgressSink, ProgressSink};
use crate::selectors::CompiledSelectors;
use crate::settings::HarvestSettings;
use crate::{HarvestError, SelectorError};

/// Drives one harvest: collect items from the active view, visit each item's
/// detail page for its replies, then return the view to where it started.
///
/// Secondary fetches run strictly one at a time because they all navigate
/// the same view.
pub struct Orchestrator {
    automation: Arc<dyn PageAutomation>,
    selectors: Arc<CompiledSelectors>,
    collector: Collector,
    settle_delay: Duration,
    fetch_timeout: Duration,
    sink: Arc<dyn ProgressSink>,
    cancel: CancellationToken,
}

/// The view borrowed for detail-page navigation, plus the address to return
/// it to.
struct NavigationLease {
    view: ViewHandle,
    original_address: Option<String>,
}

impl NavigationLease {
    fn acquire(view: ViewHandle, original_address: Option<String>) -> Self {
        Self {
            view,
            original_address,
        }
    }

    fn can_restore(&self) -> bool {
        self.original_address.is_some()
    }

    async fn restore(self, automation: &dyn PageAutomation) {
        let Some(address) = self.original_address else {
            engine_debug!("No original address captured; leaving {} in place", self.view);
            return;
        };
        match automation.navigate(self.view, &address).await {
            Ok(()) => engine_debug!("Restored {} to {}", self.view, address),
            Err(err) => engine_warn!("Could not restore {} to {}: {}", self.view, address, err),
        }
    }
}

impl Orchestrator {
    pub fn new(
        automation: Arc<dyn PageAutomation>,
        settings: &HarvestSettings,
    ) -> Result<Self, SelectorError> {
        let selectors = Arc::new(settings.selectors.compile()?);
        if !settings.fetch_timeout_covers_settle() {
            engine_warn!(
                "Secondary fetch timeout {}ms does not exceed settle delay {}ms; replies will time out",
                settings.secondary_fetch_timeout_ms,
                settings.settle_delay_ms
            );
        }
        Ok(Self {
            automation,
            collector: Collector::from_settings(selectors.clone(), settings),
            selectors,
            settle_delay: settings.settle_delay(),
            fetch_timeout: settings.secondary_fetch_timeout(),
            sink: Arc::new(NoopProgressSink),
            cancel: CancellationToken::new(),
        })
    }

    pub fn with_progress(mut self, sink: Arc<dyn ProgressSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Run one harvest. Only a missing view or an empty collection fail the
    /// run; every per-item failure degrades to an item without replies.
    pub async fn run(&self, desired: NonZeroUsize) -> Result<HarvestResult, HarvestError> {
        self.sink.emit(HarvestEvent::Started);
        match self.harvest(desired).await {
            Ok(result) => {
                self.sink.emit(HarvestEvent::Completed {
                    total_items: result.total_items(),
                });
                Ok(result)
            }
            Err(err) => {
                self.sink.emit(HarvestEvent::Failed {
                    message: err.to_string(),
                });
                Err(err)
            }
        }
    }

    async fn harvest(&self, desired: NonZeroUsize) -> Result<HarvestResult, HarvestError> {
        let view = self
            .automation
            .active_view()
            .await
            .ok_or(HarvestError::NoActiveContext)?;

        let original_address = match self.automation.address(view).await {
            Ok(address) => Some(address),
            Err(err) => {
                engine_warn!("Could not read address of {}: {}", view, err);
                None
            }
        };
        engine_info!(
            "Harvesting up to {} items from {} at {}",
            desired,
            view,
            original_address.as_deref().unwrap_or("<unknown>")
        );
        let base = original_address
            .as_deref()
            .and_then(|address| Url::parse(address).ok());

        self.sink.emit(HarvestEvent::Collecting {
            target: desired.get(),
        });
        let session = PageSession::new(self.automation.as_ref(), view);
        let report = self
            .collector
            .collect(session, desired, base.as_ref(), &self.cancel)
            .await;
        self.sink.emit(HarvestEvent::Collected {
            count: report.items.len(),
            stop_reason: report.stop_reason,
        });
        if report.items.is_empty() {
            return Err(HarvestError::EmptyResult);
        }

        let lease = NavigationLease::acquire(view, original_address);
        let mut items = report.items;
        let total = items.len();
        for (index, item) in items.iter_mut().enumerate() {
            if self.cancel.is_cancelled() {
                engine_info!(
                    "Cancelled; skipping replies for the remaining {} items",
                    total - index
                );
                break;
            }
            self.sink.emit(HarvestEvent::FetchingReplies {
                index: index + 1,
                total,
            });
            if !item.has_url() {
                continue;
            }
            let replies = match self.fetch_replies(&lease, &item.url).await {
                Ok(replies) => replies,
                Err(err) => {
                    engine_warn!("Replies for {} unavailable: {}", item.url, err);
                    Vec::new()
                }
            };
            engine_debug!("{} replies for {}", replies.len(), item.url);
            item.attach_replies(replies);
        }

        if lease.can_restore() {
            self.sink.emit(HarvestEvent::Restoring);
        }
        lease.restore(self.automation.as_ref()).await;

        Ok(HarvestResult::new(items))
    }

    /// Navigate the leased view to `address`, let it settle, read replies.
    async fn fetch_replies(
        &self,
        lease: &NavigationLease,
        address: &str,
    ) -> Result<Vec<Reply>, SecondaryFetchError> {
        let fetch = async {
            self.automation.navigate(lease.view, address).await?;
            tokio::time::sleep(self.settle_delay).await;
            let html = PageSession::new(self.automation.as_ref(), lease.view)
                .document_html()
                .await?;
            Ok::<_, SecondaryFetchError>(scan_replies(&html, &self.selectors))
        };
        tokio::time::timeout(self.fetch_timeout, fetch)
            .await
            .map_err(|_| SecondaryFetchError::Timeout(self.fetch_timeout.as_millis()))?
    }
}
