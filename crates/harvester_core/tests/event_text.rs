use harvester_core::{HarvestEvent, StopReason};

#[test]
fn per_item_progress_reads_i_of_n() {
    let event = HarvestEvent::FetchingReplies { index: 3, total: 7 };
    assert_eq!(event.to_string(), "fetching replies 3 of 7");
    assert!(!event.is_terminal());
}

#[test]
fn terminal_events_are_flagged() {
    assert!(HarvestEvent::Completed { total_items: 4 }.is_terminal());
    let failed = HarvestEvent::Failed {
        message: "no items found".to_string(),
    };
    assert!(failed.is_terminal());
    assert_eq!(failed.to_string(), "failed: no items found");
}

#[test]
fn collected_event_names_stop_reason() {
    let event = HarvestEvent::Collected {
        count: 3,
        stop_reason: StopReason::Stagnated,
    };
    assert_eq!(event.to_string(), "collected 3 items (content stopped growing)");
}
