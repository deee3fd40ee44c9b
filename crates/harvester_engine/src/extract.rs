//! Best-effort extraction of feed items and replies from a document snapshot.
//!
//! Every field is read independently: a missing sub-element yields the field
//! default and never aborts the surrounding item.
use harvester_core::{Item, Reply, COUNT_DEFAULT};
use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::selectors::CompiledSelectors;

/// Scan every rendered candidate item node, in document order.
///
/// Candidates whose link is missing come back with an empty `url`; the
/// collection ledger drops them.
pub fn scan_items(html: &str, selectors: &CompiledSelectors, base: Option<&Url>) -> Vec<Item> {
    let doc = Html::parse_document(html);
    let sel = &selectors.item;
    doc.select(&sel.node)
        .map(|node| {
            let mut item = Item::new(or_default(link_of(node, &sel.link, base), ""));
            item.text = or_default(text_of(node, &sel.text), "");
            item.author = or_default(text_of(node, &sel.author), "");
            item.posted_at = or_default(timestamp_of(node, &sel.timestamp), "");
            item.likes = or_default(text_of(node, &sel.likes), COUNT_DEFAULT);
            item.shares = or_default(text_of(node, &sel.shares), COUNT_DEFAULT);
            item.reply_count = or_default(text_of(node, &sel.reply_count), COUNT_DEFAULT);
            item
        })
        .collect()
}

/// Read the replies rendered on an item's detail page, in document order.
pub fn scan_replies(html: &str, selectors: &CompiledSelectors) -> Vec<Reply> {
    let doc = Html::parse_document(html);
    let sel = &selectors.reply;
    doc.select(&sel.node)
        .map(|node| Reply {
            text: or_default(text_of(node, &sel.text), ""),
            author: or_default(text_of(node, &sel.author), ""),
            posted_at: or_default(timestamp_of(node, &sel.timestamp), ""),
            likes: or_default(text_of(node, &sel.likes), COUNT_DEFAULT),
            reply_count: or_default(text_of(node, &sel.reply_count), COUNT_DEFAULT),
        })
        .collect()
}

fn or_default(value: Option<String>, default: &str) -> String {
    value.unwrap_or_else(|| default.to_string())
}

fn first<'a>(scope: ElementRef<'a>, selector: &Selector) -> Option<ElementRef<'a>> {
    scope.select(selector).next()
}

/// Whitespace-collapsed text of the first match, if non-empty.
fn text_of(scope: ElementRef<'_>, selector: &Selector) -> Option<String> {
    first(scope, selector).and_then(|el| collapse(el.text()))
}

/// Machine-readable `datetime` attribute of the first match, else its text.
fn timestamp_of(scope: ElementRef<'_>, selector: &Selector) -> Option<String> {
    let el = first(scope, selector)?;
    el.value()
        .attr("datetime")
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(ToOwned::to_owned)
        .or_else(|| collapse(el.text()))
}

fn link_of(scope: ElementRef<'_>, selector: &Selector, base: Option<&Url>) -> Option<String> {
    let href = first(scope, selector)?.value().attr("href")?;
    resolve_href(href, base)
}

fn resolve_href(reference: &str, base: Option<&Url>) -> Option<String> {
    let trimmed = reference.trim();
    if trimmed.is_empty() {
        return None;
    }
    let lower = trimmed.to_ascii_lowercase();
    if lower.starts_with('#') || lower.starts_with("javascript:") {
        return None;
    }
    if let Ok(url) = Url::parse(trimmed) {
        return Some(url.into());
    }
    match base {
        Some(base) => base.join(trimmed).ok().map(Into::into),
        None => Some(trimmed.to_string()),
    }
}

fn collapse<'a>(parts: impl Iterator<Item = &'a str>) -> Option<String> {
    let joined = parts
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ");
    if joined.is_empty() {
        None
    } else {
        Some(joined)
    }
}
