//! Page automation over plain HTTP for server-rendered feeds.
//!
//! The single view holds the last fetched document. Scrolling re-fetches the
//! current address, so a feed that publishes new posts grows between ticks;
//! the content extent is the document's byte length.
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use engine_logging::engine_debug;
use futures_util::StreamExt;
use reqwest::header::CONTENT_TYPE;

use crate::automation::{PageAutomation, ViewHandle};
use crate::AutomationError;

#[derive(Debug, Clone)]
pub struct HttpSettings {
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub redirect_limit: usize,
    pub max_bytes: u64,
    pub allowed_content_types: Vec<String>,
    pub user_agent: String,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            redirect_limit: 5,
            max_bytes: 5 * 1024 * 1024,
            allowed_content_types: vec![
                "text/html".to_string(),
                "application/xhtml+xml".to_string(),
            ],
            user_agent: concat!("feed_harvester/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

#[derive(Debug)]
struct HttpView {
    handle: ViewHandle,
    address: String,
    html: String,
}

pub struct HttpPageAutomation {
    client: reqwest::Client,
    settings: HttpSettings,
    view: Mutex<Option<HttpView>>,
    next_id: AtomicU64,
}

struct LoadedPage {
    final_url: String,
    html: String,
}

impl HttpPageAutomation {
    pub fn new(settings: HttpSettings) -> Result<Self, AutomationError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .redirect(reqwest::redirect::Policy::limited(settings.redirect_limit))
            .user_agent(settings.user_agent.clone())
            .build()
            .map_err(|err| AutomationError::Network(err.to_string()))?;
        Ok(Self {
            client,
            settings,
            view: Mutex::new(None),
            next_id: AtomicU64::new(1),
        })
    }

    /// Load `address` into a fresh view, replacing any open one.
    pub async fn open(&self, address: &str) -> Result<ViewHandle, AutomationError> {
        let page = self.load(address).await?;
        let handle = ViewHandle(self.next_id.fetch_add(1, Ordering::Relaxed));
        *self.lock() = Some(HttpView {
            handle,
            address: page.final_url,
            html: page.html,
        });
        Ok(handle)
    }

    pub fn close(&self) {
        *self.lock() = None;
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<HttpView>> {
        self.view.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn with_view<T>(
        &self,
        view: ViewHandle,
        f: impl FnOnce(&mut HttpView) -> T,
    ) -> Result<T, AutomationError> {
        match self.lock().as_mut() {
            Some(current) if current.handle == view => Ok(f(current)),
            _ => Err(AutomationError::ViewClosed),
        }
    }

    fn is_content_type_allowed(&self, content_type: &str) -> bool {
        let ct = content_type.split(';').next().unwrap_or(content_type).trim();
        self.settings
            .allowed_content_types
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(ct))
    }

    async fn load(&self, address: &str) -> Result<LoadedPage, AutomationError> {
        let parsed = reqwest::Url::parse(address)
            .map_err(|err| AutomationError::InvalidAddress(format!("{address}: {err}")))?;

        let response = self
            .client
            .get(parsed)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(AutomationError::Http {
                status: status.as_u16(),
            });
        }

        let max_bytes = self.settings.max_bytes;
        if response.content_length().is_some_and(|len| len > max_bytes) {
            return Err(AutomationError::TooLarge { max_bytes });
        }

        if let Some(ct) = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
        {
            if !self.is_content_type_allowed(ct) {
                return Err(AutomationError::UnsupportedContentType(ct.to_string()));
            }
        }

        let final_url = response.url().to_string();
        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            if bytes.len() as u64 + chunk.len() as u64 > max_bytes {
                return Err(AutomationError::TooLarge { max_bytes });
            }
            bytes.extend_from_slice(&chunk);
        }
        engine_debug!("Loaded {} ({} bytes)", final_url, bytes.len());

        Ok(LoadedPage {
            final_url,
            html: String::from_utf8_lossy(&bytes).into_owned(),
        })
    }
}

#[async_trait::async_trait]
impl PageAutomation for HttpPageAutomation {
    async fn active_view(&self) -> Option<ViewHandle> {
        self.lock().as_ref().map(|view| view.handle)
    }

    async fn address(&self, view: ViewHandle) -> Result<String, AutomationError> {
        self.with_view(view, |current| current.address.clone())
    }

    async fn navigate(&self, view: ViewHandle, address: &str) -> Result<(), AutomationError> {
        // Fail fast before the request if the view went away.
        self.with_view(view, |_| ())?;
        let page = self.load(address).await.map_err(|err| match err {
            AutomationError::Network(message) => AutomationError::Navigation {
                address: address.to_string(),
                message,
            },
            other => other,
        })?;
        self.with_view(view, |current| {
            current.address = page.final_url;
            current.html = page.html;
        })
    }

    async fn document_html(&self, view: ViewHandle) -> Result<String, AutomationError> {
        self.with_view(view, |current| current.html.clone())
    }

    async fn scroll_to_bottom(&self, view: ViewHandle) -> Result<(), AutomationError> {
        let address = self.with_view(view, |current| current.address.clone())?;
        let page = self.load(&address).await?;
        self.with_view(view, |current| current.html = page.html)
    }

    async fn content_extent(&self, view: ViewHandle) -> Result<u64, AutomationError> {
        self.with_view(view, |current| current.html.len() as u64)
    }
}

fn map_reqwest_error(err: reqwest::Error) -> AutomationError {
    if err.is_timeout() {
        return AutomationError::Timeout;
    }
    AutomationError::Network(err.to_string())
}
