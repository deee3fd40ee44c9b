use harvester_core::{HarvestResult, Item, Reply};
use pretty_assertions::assert_eq;
use serde_json::json;

#[test]
fn export_uses_nested_camel_case_layout() {
    engine_logging::initialize_for_tests();
    let mut item = Item::new("https://feed.example/p/1");
    item.text = "hello feed".to_string();
    item.author = "Ada".to_string();
    item.posted_at = "2024-05-01T10:00:00Z".to_string();
    item.likes = "12".to_string();
    item.shares = "3".to_string();
    item.reply_count = "1".to_string();
    item.attach_replies(vec![Reply {
        text: "nice".to_string(),
        author: "Bo".to_string(),
        posted_at: "2024-05-01T11:00:00Z".to_string(),
        likes: "2".to_string(),
        reply_count: "0".to_string(),
    }]);
    let bare = Item::new("https://feed.example/p/2");

    let result = HarvestResult::new(vec![item, bare]);
    let value = serde_json::to_value(result.to_export()).unwrap();

    assert_eq!(
        value,
        json!({
            "totalItems": 2,
            "items": [
                {
                    "content": "hello feed",
                    "metadata": {
                        "author": "Ada",
                        "postedAt": "2024-05-01T10:00:00Z",
                        "engagement": { "likes": "12", "shares": "3", "replyCount": "1" },
                        "url": "https://feed.example/p/1"
                    },
                    "replies": [
                        {
                            "content": "nice",
                            "metadata": {
                                "author": "Bo",
                                "postedAt": "2024-05-01T11:00:00Z",
                                "engagement": { "likes": "2", "replyCount": "0" }
                            }
                        }
                    ]
                },
                {
                    "content": "",
                    "metadata": {
                        "author": "",
                        "postedAt": "",
                        "engagement": { "likes": "0", "shares": "0", "replyCount": "0" },
                        "url": "https://feed.example/p/2"
                    },
                    "replies": []
                }
            ]
        })
    );
}

#[test]
fn empty_result_exports_zero_total() {
    let record = HarvestResult::default().to_export();
    assert_eq!(record.total_items, 0);
    assert!(record.items.is_empty());
}
