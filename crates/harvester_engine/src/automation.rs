use std::fmt;

use crate::AutomationError;

/// Opaque handle to the single automatable view (a browser tab or equivalent).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ViewHandle(pub u64);

impl fmt::Display for ViewHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "view#{}", self.0)
    }
}

/// Host surface that can read, scroll and navigate a rendered page.
#[async_trait::async_trait]
pub trait PageAutomation: Send + Sync {
    /// The view currently available for automation, if any.
    async fn active_view(&self) -> Option<ViewHandle>;

    /// Address the view currently shows.
    async fn address(&self, view: ViewHandle) -> Result<String, AutomationError>;

    /// Point the view at `address` and wait for the navigation to commit.
    async fn navigate(&self, view: ViewHandle, address: &str) -> Result<(), AutomationError>;

    /// Serialized snapshot of the rendered document.
    async fn document_html(&self, view: ViewHandle) -> Result<String, AutomationError>;

    /// Ask the document to scroll to its bottom edge.
    async fn scroll_to_bottom(&self, view: ViewHandle) -> Result<(), AutomationError>;

    /// Current scrollable content extent of the document.
    async fn content_extent(&self, view: ViewHandle) -> Result<u64, AutomationError>;
}

/// In-page execution context handed to page routines.
///
/// A session exposes only document reads and scrolling; routines running
/// through it cannot change the view's address.
#[derive(Clone, Copy)]
pub struct PageSession<'a> {
    automation: &'a dyn PageAutomation,
    view: ViewHandle,
}

impl<'a> PageSession<'a> {
    pub fn new(automation: &'a dyn PageAutomation, view: ViewHandle) -> Self {
        Self { automation, view }
    }

    pub fn view(&self) -> ViewHandle {
        self.view
    }

    pub async fn document_html(&self) -> Result<String, AutomationError> {
        self.automation.document_html(self.view).await
    }

    pub async fn scroll_to_bottom(&self) -> Result<(), AutomationError> {
        self.automation.scroll_to_bottom(self.view).await
    }

    pub async fn content_extent(&self) -> Result<u64, AutomationError> {
        self.automation.content_extent(self.view).await
    }
}
