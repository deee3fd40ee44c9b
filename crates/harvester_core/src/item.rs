/// Best-effort default for engagement counters that could not be read.
pub const COUNT_DEFAULT: &str = "0";

/// One harvested feed post.
///
/// `url` is the dedup key and is never empty for items produced by the
/// collector. All other fields are best-effort strings.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Item {
    pub url: String,
    pub text: String,
    pub author: String,
    pub posted_at: String,
    pub likes: String,
    pub shares: String,
    pub reply_count: String,
    replies: Vec<Reply>,
    replies_attached: bool,
}

impl Item {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            likes: COUNT_DEFAULT.to_string(),
            shares: COUNT_DEFAULT.to_string(),
            reply_count: COUNT_DEFAULT.to_string(),
            ..Self::default()
        }
    }

    pub fn has_url(&self) -> bool {
        !self.url.trim().is_empty()
    }

    pub fn replies(&self) -> &[Reply] {
        &self.replies
    }

    pub fn replies_attached(&self) -> bool {
        self.replies_attached
    }

    /// Attach the replies fetched for this item.
    ///
    /// Replies are attached at most once; a second call is ignored and
    /// returns `false`.
    pub fn attach_replies(&mut self, replies: Vec<Reply>) -> bool {
        if self.replies_attached {
            return false;
        }
        self.replies = replies;
        self.replies_attached = true;
        true
    }
}

/// One nested comment on an [`Item`]. Replies are kept in document order and
/// never deduplicated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub author: String,
    pub posted_at: String,
    pub likes: String,
    pub reply_count: String,
}

impl Default for Reply {
    fn default() -> Self {
        Self {
            text: String::new(),
            author: String::new(),
            posted_at: String::new(),
            likes: COUNT_DEFAULT.to_string(),
            reply_count: COUNT_DEFAULT.to_string(),
        }
    }
}

/// Terminal artifact of one harvest run. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HarvestResult {
    items: Vec<Item>,
}

impl HarvestResult {
    pub fn new(items: Vec<Item>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn total_items(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn into_items(self) -> Vec<Item> {
        self.items
    }
}
