use sha2::{Digest, Sha256};
use url::Url;

/// Deterministic, filesystem-safe export name: `{sanitized_host}--{short_hash(address)}.json`
pub fn export_filename(feed_address: &str) -> String {
    let host = Url::parse(feed_address)
        .ok()
        .and_then(|url| url.host_str().map(ToOwned::to_owned))
        .unwrap_or_else(|| "feed".to_string());
    format!("{}--{}.json", sanitize(&host), short_hash(feed_address))
}

fn sanitize(input: &str) -> String {
    let mut cleaned = String::with_capacity(input.len());
    let mut prev_underscore = false;
    for c in input.chars() {
        let c = if c.is_ascii_alphanumeric() || c == '.' || c == '-' {
            c
        } else {
            '_'
        };
        if c == '_' && prev_underscore {
            continue;
        }
        prev_underscore = c == '_';
        cleaned.push(c);
    }
    let trimmed = cleaned.trim_matches(&['_', '.'][..]);
    if trimmed.is_empty() {
        "feed".to_string()
    } else {
        trimmed.chars().take(64).collect()
    }
}

fn short_hash(input: &str) -> String {
    let digest = Sha256::digest(input.as_bytes());
    let mut hex = String::with_capacity(8);
    for byte in digest.iter().take(4) {
        use std::fmt::Write;
        let _ = write!(&mut hex, "{byte:02x}");
    }
    hex
}
