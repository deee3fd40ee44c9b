//! Serializable record shape consumed by exporters.
//!
//! The layout is fixed: `{ totalItems, items: [{ content, metadata, replies }] }`
//! with camelCase keys.
use serde::{Deserialize, Serialize};

use crate::{HarvestResult, Item, Reply};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRecord {
    pub total_items: usize,
    pub items: Vec<ExportItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportItem {
    pub content: String,
    pub metadata: ItemMetadata,
    pub replies: Vec<ExportReply>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemMetadata {
    pub author: String,
    pub posted_at: String,
    pub engagement: ItemEngagement,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemEngagement {
    pub likes: String,
    pub shares: String,
    pub reply_count: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportReply {
    pub content: String,
    pub metadata: ReplyMetadata,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplyMetadata {
    pub author: String,
    pub posted_at: String,
    pub engagement: ReplyEngagement,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplyEngagement {
    pub likes: String,
    pub reply_count: String,
}

impl HarvestResult {
    pub fn to_export(&self) -> ExportRecord {
        ExportRecord {
            total_items: self.total_items(),
            items: self.items().iter().map(ExportItem::from).collect(),
        }
    }
}

impl From<&Item> for ExportItem {
    fn from(item: &Item) -> Self {
        Self {
            content: item.text.clone(),
            metadata: ItemMetadata {
                author: item.author.clone(),
                posted_at: item.posted_at.clone(),
                engagement: ItemEngagement {
                    likes: item.likes.clone(),
                    shares: item.shares.clone(),
                    reply_count: item.reply_count.clone(),
                },
                url: item.url.clone(),
            },
            replies: item.replies().iter().map(ExportReply::from).collect(),
        }
    }
}

impl From<&Reply> for ExportReply {
    fn from(reply: &Reply) -> Self {
        Self {
            content: reply.text.clone(),
            metadata: ReplyMetadata {
                author: reply.author.clone(),
                posted_at: reply.posted_at.clone(),
                engagement: ReplyEngagement {
                    likes: reply.likes.clone(),
                    reply_count: reply.reply_count.clone(),
                },
            },
        }
    }
}
