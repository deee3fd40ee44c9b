use harvester_engine::{scan_items, scan_replies, FeedSelectors};
use pretty_assertions::assert_eq;
use url::Url;

#[test]
fn items_are_scanned_in_document_order_with_fields() {
    let html = r#"
    <html><body>
      <article data-testid="post">
        <a data-testid="post-link" href="/p/1">permalink</a>
        <span data-testid="author-name"> Ada
          Lovelace </span>
        <time>2 hours ago</time>
        <div data-testid="post-text">First <b>post</b></div>
        <span data-testid="like-count">1.2K</span>
      </article>
      <article data-testid="post">
        <a data-testid="post-link" href="https://cdn.example/p/2">permalink</a>
      </article>
    </body></html>"#;
    let selectors = FeedSelectors::default().compile().unwrap();
    let base = Url::parse("https://feed.example/search?q=x").unwrap();

    let items = scan_items(html, &selectors, Some(&base));

    assert_eq!(items.len(), 2);
    assert_eq!(items[0].url, "https://feed.example/p/1");
    assert_eq!(items[0].author, "Ada Lovelace");
    assert_eq!(items[0].posted_at, "2 hours ago");
    assert_eq!(items[0].text, "First post");
    assert_eq!(items[0].likes, "1.2K");
    assert_eq!(items[0].shares, "0");
    assert_eq!(items[1].url, "https://cdn.example/p/2");
    assert_eq!(items[1].text, "");
}

#[test]
fn replies_keep_document_order_and_duplicates() {
    let html = r#"
    <div data-testid="reply"><div data-testid="reply-text">same</div></div>
    <div data-testid="reply"><div data-testid="reply-text">same</div>
      <time datetime="2024-01-02T00:00:00Z">yesterday</time>
      <span data-testid="reply-count">4</span></div>
    <div data-testid="reply"></div>"#;
    let selectors = FeedSelectors::default().compile().unwrap();

    let replies = scan_replies(html, &selectors);

    assert_eq!(replies.len(), 3);
    assert_eq!(replies[0].text, "same");
    assert_eq!(replies[1].text, "same");
    assert_eq!(replies[1].posted_at, "2024-01-02T00:00:00Z");
    assert_eq!(replies[1].reply_count, "4");
    assert_eq!(replies[2].text, "");
    assert_eq!(replies[2].likes, "0");
}

#[test]
fn custom_selectors_drive_extraction() {
    let html = r#"<ul><li class="entry"><a class="go" href="https://x.example/1">x</a>
        <p class="body">hello</p></li></ul>"#;
    let selectors = FeedSelectors {
        item: "li.entry".to_string(),
        item_link: "a.go".to_string(),
        item_text: "p.body".to_string(),
        ..FeedSelectors::default()
    }
    .compile()
    .unwrap();

    let items = scan_items(html, &selectors, None);

    assert_eq!(items.len(), 1);
    assert_eq!(items[0].url, "https://x.example/1");
    assert_eq!(items[0].text, "hello");
}
