#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::num::NonZeroUsize;
use std::sync::{Mutex, Once};
use std::time::Duration;

use harvester_engine::{AutomationError, PageAutomation, ViewHandle};

pub const FEED: &str = "https://feed.example/home";
pub const VIEW: ViewHandle = ViewHandle(7);

pub fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(engine_logging::initialize_for_tests);
}

pub fn count(n: usize) -> NonZeroUsize {
    NonZeroUsize::new(n).expect("non-zero count")
}

pub fn post(href: &str, text: &str) -> String {
    format!(
        r#"<article data-testid="post">
            <span data-testid="author-name">author of {text}</span>
            <time datetime="2024-03-01T12:00:00Z">Mar 1</time>
            <a data-testid="post-link" href="{href}">open</a>
            <div data-testid="post-text">{text}</div>
            <span data-testid="like-count">5</span>
            <span data-testid="share-count">1</span>
            <span data-testid="reply-count">2</span>
        </article>"#
    )
}

pub fn feed(posts: &[String]) -> String {
    format!("<html><body><main>{}</main></body></html>", posts.concat())
}

pub fn detail(replies: &[&str]) -> String {
    let rendered: String = replies
        .iter()
        .map(|text| {
            format!(
                r#"<div data-testid="reply">
                    <span data-testid="author-name">replier</span>
                    <div data-testid="reply-text">{text}</div>
                    <span data-testid="like-count">1</span>
                </div>"#
            )
        })
        .collect();
    format!("<html><body><section>{rendered}</section></body></html>")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtentMode {
    /// Extent is the byte length of the current feed frame.
    FromDocument,
    /// Extent grows on every read, as if the feed never settles.
    AlwaysGrowing,
}

struct State {
    current: String,
    frames: Vec<String>,
    frame: usize,
    extent_mode: ExtentMode,
    extent_reads: u64,
    details: HashMap<String, String>,
    failing: HashSet<String>,
    hanging: HashSet<String>,
    navigations: Vec<String>,
    scrolls: usize,
    address_fails: bool,
}

/// In-memory page whose feed advances one frame per scroll.
pub struct ScriptedPage {
    view: Option<ViewHandle>,
    state: Mutex<State>,
}

impl ScriptedPage {
    pub fn new(frames: Vec<String>) -> Self {
        Self {
            view: Some(VIEW),
            state: Mutex::new(State {
                current: FEED.to_string(),
                frames,
                frame: 0,
                extent_mode: ExtentMode::FromDocument,
                extent_reads: 0,
                details: HashMap::new(),
                failing: HashSet::new(),
                hanging: HashSet::new(),
                navigations: Vec::new(),
                scrolls: 0,
                address_fails: false,
            }),
        }
    }

    pub fn without_view(mut self) -> Self {
        self.view = None;
        self
    }

    pub fn with_extent_mode(self, mode: ExtentMode) -> Self {
        self.state.lock().unwrap().extent_mode = mode;
        self
    }

    pub fn with_detail(self, address: &str, html: String) -> Self {
        self.state
            .lock()
            .unwrap()
            .details
            .insert(address.to_string(), html);
        self
    }

    pub fn failing_navigation(self, address: &str) -> Self {
        self.state.lock().unwrap().failing.insert(address.to_string());
        self
    }

    pub fn hanging_navigation(self, address: &str) -> Self {
        self.state.lock().unwrap().hanging.insert(address.to_string());
        self
    }

    pub fn unreadable_address(self) -> Self {
        self.state.lock().unwrap().address_fails = true;
        self
    }

    pub fn navigations(&self) -> Vec<String> {
        self.state.lock().unwrap().navigations.clone()
    }

    pub fn scrolls(&self) -> usize {
        self.state.lock().unwrap().scrolls
    }

    pub fn current_address(&self) -> String {
        self.state.lock().unwrap().current.clone()
    }

    fn check_view(&self, view: ViewHandle) -> Result<(), AutomationError> {
        if self.view == Some(view) {
            Ok(())
        } else {
            Err(AutomationError::ViewClosed)
        }
    }
}

#[async_trait::async_trait]
impl PageAutomation for ScriptedPage {
    async fn active_view(&self) -> Option<ViewHandle> {
        self.view
    }

    async fn address(&self, view: ViewHandle) -> Result<String, AutomationError> {
        self.check_view(view)?;
        let state = self.state.lock().unwrap();
        if state.address_fails {
            return Err(AutomationError::Evaluation("location unavailable".into()));
        }
        Ok(state.current.clone())
    }

    async fn navigate(&self, view: ViewHandle, address: &str) -> Result<(), AutomationError> {
        self.check_view(view)?;
        let hangs = {
            let mut state = self.state.lock().unwrap();
            state.navigations.push(address.to_string());
            if state.failing.contains(address) {
                return Err(AutomationError::Navigation {
                    address: address.to_string(),
                    message: "net::ERR_FAILED".into(),
                });
            }
            state.hanging.contains(address)
        };
        if hangs {
            tokio::time::sleep(Duration::from_secs(3600)).await;
        }
        self.state.lock().unwrap().current = address.to_string();
        Ok(())
    }

    async fn document_html(&self, view: ViewHandle) -> Result<String, AutomationError> {
        self.check_view(view)?;
        let state = self.state.lock().unwrap();
        if state.current == FEED {
            Ok(state.frames.get(state.frame).cloned().unwrap_or_default())
        } else {
            Ok(state
                .details
                .get(&state.current)
                .cloned()
                .unwrap_or_else(|| "<html><body></body></html>".to_string()))
        }
    }

    async fn scroll_to_bottom(&self, view: ViewHandle) -> Result<(), AutomationError> {
        self.check_view(view)?;
        let mut state = self.state.lock().unwrap();
        state.scrolls += 1;
        if state.frame + 1 < state.frames.len() {
            state.frame += 1;
        }
        Ok(())
    }

    async fn content_extent(&self, view: ViewHandle) -> Result<u64, AutomationError> {
        self.check_view(view)?;
        let mut state = self.state.lock().unwrap();
        state.extent_reads += 1;
        Ok(match state.extent_mode {
            ExtentMode::FromDocument => state
                .frames
                .get(state.frame)
                .map(|frame| frame.len() as u64)
                .unwrap_or(0),
            ExtentMode::AlwaysGrowing => state.extent_reads * 1000,
        })
    }
}
