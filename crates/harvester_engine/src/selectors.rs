use scraper::Selector;
use serde::{Deserialize, Serialize};

use crate::SelectorError;

/// CSS selectors describing the feed markup.
///
/// Item-level selectors are evaluated inside each candidate item node, reply
/// selectors inside each reply node on the detail page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedSelectors {
    pub item: String,
    pub item_link: String,
    pub item_text: String,
    pub item_author: String,
    pub item_timestamp: String,
    pub item_likes: String,
    pub item_shares: String,
    pub item_reply_count: String,
    pub reply: String,
    pub reply_text: String,
    pub reply_author: String,
    pub reply_timestamp: String,
    pub reply_likes: String,
    pub reply_reply_count: String,
}

impl Default for FeedSelectors {
    fn default() -> Self {
        Self {
            item: r#"article[data-testid="post"]"#.to_string(),
            item_link: r#"a[data-testid="post-link"]"#.to_string(),
            item_text: r#"[data-testid="post-text"]"#.to_string(),
            item_author: r#"[data-testid="author-name"]"#.to_string(),
            item_timestamp: "time".to_string(),
            item_likes: r#"[data-testid="like-count"]"#.to_string(),
            item_shares: r#"[data-testid="share-count"]"#.to_string(),
            item_reply_count: r#"[data-testid="reply-count"]"#.to_string(),
            reply: r#"[data-testid="reply"]"#.to_string(),
            reply_text: r#"[data-testid="reply-text"]"#.to_string(),
            reply_author: r#"[data-testid="author-name"]"#.to_string(),
            reply_timestamp: "time".to_string(),
            reply_likes: r#"[data-testid="like-count"]"#.to_string(),
            reply_reply_count: r#"[data-testid="reply-count"]"#.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CompiledSelectors {
    pub(crate) item: ItemSelectors,
    pub(crate) reply: ReplySelectors,
}

#[derive(Debug, Clone)]
pub(crate) struct ItemSelectors {
    pub node: Selector,
    pub link: Selector,
    pub text: Selector,
    pub author: Selector,
    pub timestamp: Selector,
    pub likes: Selector,
    pub shares: Selector,
    pub reply_count: Selector,
}

#[derive(Debug, Clone)]
pub(crate) struct ReplySelectors {
    pub node: Selector,
    pub text: Selector,
    pub author: Selector,
    pub timestamp: Selector,
    pub likes: Selector,
    pub reply_count: Selector,
}

impl FeedSelectors {
    pub fn compile(&self) -> Result<CompiledSelectors, SelectorError> {
        Ok(CompiledSelectors {
            item: ItemSelectors {
                node: parse("item", &self.item)?,
                link: parse("item_link", &self.item_link)?,
                text: parse("item_text", &self.item_text)?,
                author: parse("item_author", &self.item_author)?,
                timestamp: parse("item_timestamp", &self.item_timestamp)?,
                likes: parse("item_likes", &self.item_likes)?,
                shares: parse("item_shares", &self.item_shares)?,
                reply_count: parse("item_reply_count", &self.item_reply_count)?,
            },
            reply: ReplySelectors {
                node: parse("reply", &self.reply)?,
                text: parse("reply_text", &self.reply_text)?,
                author: parse("reply_author", &self.reply_author)?,
                timestamp: parse("reply_timestamp", &self.reply_timestamp)?,
                likes: parse("reply_likes", &self.reply_likes)?,
                reply_count: parse("reply_reply_count", &self.reply_reply_count)?,
            },
        })
    }
}

fn parse(field: &'static str, css: &str) -> Result<Selector, SelectorError> {
    Selector::parse(css).map_err(|err| SelectorError {
        field,
        message: err.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::FeedSelectors;

    #[test]
    fn defaults_compile() {
        assert!(FeedSelectors::default().compile().is_ok());
    }

    #[test]
    fn bad_selector_names_the_field() {
        let selectors = FeedSelectors {
            item_shares: "[[nope".to_string(),
            ..FeedSelectors::default()
        };
        let err = selectors.compile().unwrap_err();
        assert_eq!(err.field, "item_shares");
    }
}
