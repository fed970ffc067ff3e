use crate::event::{Event, EventRecord, InvalidEventError};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

/// Append-only event log shared between producers and pipeline runs.
///
/// Cloning yields another handle to the same log. Appends validate the raw
/// record and push under the lock; `snapshot` clones the whole sequence under
/// the lock so a run never observes a half-applied append. The log grows
/// without bound for the life of the session; nothing evicts.
#[derive(Clone, Default)]
pub struct EventStore {
    events: Arc<Mutex<Vec<Event>>>,
    metrics: StoreMetrics,
}

impl EventStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store preloaded with the reference dataset.
    pub fn seeded() -> Self {
        let store = Self::new();
        for record in reference_records() {
            let _ = store.append(record);
        }
        store
    }

    /// Validates and appends one record. Rejections leave the log untouched.
    pub fn append(&self, record: EventRecord) -> Result<(), InvalidEventError> {
        let event = match Event::try_from(record) {
            Ok(event) => event,
            Err(err) => {
                self.metrics.rejection();
                return Err(err);
            }
        };
        let mut guard = self.events.lock().unwrap();
        guard.push(event);
        drop(guard);
        self.metrics.acceptance();
        Ok(())
    }

    /// Returns a consistent copy of the full log in insertion order.
    pub fn snapshot(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }

    pub fn len(&self) -> usize {
        self.events.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().unwrap().is_empty()
    }

    /// Ingestion counters for this log.
    pub fn metrics(&self) -> &StoreMetrics {
        &self.metrics
    }
}

/// Ingestion counters shared across store handles.
#[derive(Clone, Default)]
pub struct StoreMetrics {
    accepted: Arc<AtomicU64>,
    rejected: Arc<AtomicU64>,
}

impl StoreMetrics {
    fn acceptance(&self) {
        self.accepted.fetch_add(1, Ordering::Relaxed);
    }

    fn rejection(&self) {
        self.rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub fn accepted_total(&self) -> u64 {
        self.accepted.load(Ordering::Relaxed)
    }

    pub fn rejected_total(&self) -> u64 {
        self.rejected.load(Ordering::Relaxed)
    }
}

/// Reference dataset used by the demo application and fixtures.
pub fn reference_records() -> Vec<EventRecord> {
    vec![
        EventRecord::new("/home", "2023-10-08T02:18:17.735Z", 2364).with_flagged(true),
        EventRecord::new("/home", "2023-10-07T02:23:17.735Z", 1132),
        EventRecord::new("/home", "2023-10-06T02:03:17.735Z", 3433).with_flagged(true),
        EventRecord::new("/product", "2023-10-07T02:13:17.735Z", 1563),
        EventRecord::new("/product", "2023-10-06T02:12:17.735Z", 1563),
        EventRecord::new("/contact", "2023-10-07T02:13:17.735Z", 2298).with_flagged(true),
        EventRecord::new("/product", "2023-10-08T02:17:17.735Z", 3198).with_flagged(true),
        EventRecord::new("/contact", "2023-10-08T02:13:17.735Z", 1950).with_flagged(true),
        EventRecord::new("/contact", "2023-10-06T02:01:17.735Z", 2800),
    ]
}
