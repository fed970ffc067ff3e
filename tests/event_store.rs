use pulseboard::{EventRecord, EventStore, InvalidEventError};
use std::thread;

fn valid_record(endpoint: &str, count: i64) -> EventRecord {
    EventRecord::new(endpoint, "2023-10-06T02:03:17.735Z", count)
}

#[test]
fn appends_preserve_insertion_order() {
    let store = EventStore::new();
    store.append(valid_record("/home", 1)).unwrap();
    store.append(valid_record("/contact", 2)).unwrap();
    store.append(valid_record("/home", 3)).unwrap();
    let events = store.snapshot();
    let counts: Vec<_> = events.iter().map(|event| event.count).collect();
    assert_eq!(counts, vec![1, 2, 3]);
    assert_eq!(store.metrics().accepted_total(), 3);
}

#[test]
fn rejects_malformed_timestamp_and_leaves_log_untouched() {
    let store = EventStore::new();
    let err = store
        .append(EventRecord::new("/home", "yesterday at noon", 10))
        .unwrap_err();
    match err {
        InvalidEventError::Timestamp { raw } => assert_eq!(raw, "yesterday at noon"),
        other => panic!("unexpected error: {:?}", other),
    }
    assert!(store.is_empty());
    assert_eq!(store.metrics().rejected_total(), 1);
    assert_eq!(store.metrics().accepted_total(), 0);
}

#[test]
fn rejects_negative_count() {
    let store = EventStore::new();
    let err = store.append(valid_record("/home", -3)).unwrap_err();
    match err {
        InvalidEventError::NegativeCount { count } => assert_eq!(count, -3),
        other => panic!("unexpected error: {:?}", other),
    }
    assert!(store.is_empty());
    assert_eq!(store.metrics().rejected_total(), 1);
}

#[test]
fn snapshot_is_isolated_from_later_appends() {
    let store = EventStore::new();
    store.append(valid_record("/home", 1)).unwrap();
    let snapshot = store.snapshot();
    store.append(valid_record("/home", 2)).unwrap();
    assert_eq!(snapshot.len(), 1);
    assert_eq!(store.len(), 2);
}

#[test]
fn concurrent_appends_all_land() {
    let store = EventStore::new();
    let mut handles = Vec::new();
    for worker in 0..4 {
        let handle = store.clone();
        handles.push(thread::spawn(move || {
            for step in 0..50 {
                handle
                    .append(valid_record("/home", worker * 100 + step))
                    .unwrap();
            }
        }));
    }
    for handle in handles {
        handle.join().unwrap();
    }
    assert_eq!(store.len(), 200);
    assert_eq!(store.metrics().accepted_total(), 200);
    assert_eq!(store.metrics().rejected_total(), 0);
}

#[test]
fn seeded_store_holds_the_reference_dataset() {
    let store = EventStore::seeded();
    let events = store.snapshot();
    assert_eq!(events.len(), 9);
    assert_eq!(events[0].endpoint, "/home");
    assert_eq!(events[0].count, 2364);
    assert!(events[0].flagged);
    assert_eq!(events[8].endpoint, "/contact");
    assert!(!events[8].flagged);
    assert_eq!(store.metrics().accepted_total(), 9);
}

#[test]
fn record_flag_defaults_to_false_when_absent() {
    let raw = r#"{"endpoint":"/home","timestamp":"2023-10-06T02:03:17.735Z","count":5}"#;
    let record: EventRecord = serde_json::from_str(raw).unwrap();
    assert!(!record.flagged);
    let store = EventStore::new();
    store.append(record).unwrap();
    assert!(!store.snapshot()[0].flagged);
}
