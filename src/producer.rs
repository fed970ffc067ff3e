use crate::event::{format_instant, EventRecord, InvalidEventError};
use crate::store::EventStore;
use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;
use tokio::runtime::Builder as TokioBuilder;

/// Append capability handed to producers. The pipeline's correctness does not
/// depend on who calls this or from which scheduling context.
pub trait EventSink: Send + Sync {
    /// Submits one record; rejections are reported, never fatal.
    fn append(&self, record: EventRecord) -> Result<(), InvalidEventError>;
}

impl EventSink for EventStore {
    fn append(&self, record: EventRecord) -> Result<(), InvalidEventError> {
        EventStore::append(self, record)
    }
}

/// Wall-clock source used to stamp generated events.
pub trait WallClock: Send {
    /// Returns the current instant.
    fn now(&mut self) -> DateTime<Utc>;
}

/// System clock backed by `chrono::Utc`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemWallClock;

impl WallClock for SystemWallClock {
    fn now(&mut self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Source of raw records pulled by a driver on its own cadence.
pub trait EventProducer: Send {
    /// Produces the next record.
    fn next_record(&mut self) -> EventRecord;
}

/// Tuning for the synthetic load generator.
#[derive(Debug, Clone)]
pub struct SyntheticProducerConfig {
    pub endpoint: String,
    pub max_count: u64,
    pub flagged_probability: f64,
}

impl Default for SyntheticProducerConfig {
    fn default() -> Self {
        Self {
            endpoint: "/home".to_string(),
            max_count: 3000,
            flagged_probability: 0.2,
        }
    }
}

/// Generates request-count records mimicking live traffic: counts uniform in
/// `[0, max_count)`, flagged with the configured probability.
pub struct SyntheticProducer<C> {
    config: SyntheticProducerConfig,
    rng: StdRng,
    clock: C,
}

impl SyntheticProducer<SystemWallClock> {
    /// Creates a generator on the system clock with an entropy seed.
    pub fn new(config: SyntheticProducerConfig) -> Self {
        Self::with_clock(config, rand::random(), SystemWallClock)
    }
}

impl<C: WallClock> SyntheticProducer<C> {
    /// Creates a generator with an explicit seed and clock. The same seed and
    /// clock script reproduce the same records.
    pub fn with_clock(config: SyntheticProducerConfig, seed: u64, clock: C) -> Self {
        assert!(config.max_count > 0, "max count must be > 0");
        assert!(
            (0.0..=1.0).contains(&config.flagged_probability),
            "flagged probability must be within [0, 1]"
        );
        Self {
            config,
            rng: StdRng::seed_from_u64(seed),
            clock,
        }
    }
}

impl<C: WallClock> EventProducer for SyntheticProducer<C> {
    fn next_record(&mut self) -> EventRecord {
        let count = self.rng.random_range(0..self.config.max_count) as i64;
        let flagged = self.rng.random_bool(self.config.flagged_probability);
        let timestamp = format_instant(&self.clock.now());
        EventRecord::new(self.config.endpoint.clone(), timestamp, count).with_flagged(flagged)
    }
}

/// Background driver appending producer output on a fixed cadence.
///
/// The driver thread hosts a current-thread tokio runtime for its tick loop.
/// `stop` raises the flag and joins; the join waits at most one tick.
pub struct ProducerDriver {
    stop: Arc<AtomicBool>,
    join: Mutex<Option<thread::JoinHandle<()>>>,
    delivered: Arc<AtomicU64>,
    rejected: Arc<AtomicU64>,
}

impl ProducerDriver {
    /// Spawns the driver thread ticking at `interval`.
    pub fn spawn<P, S>(mut producer: P, sink: S, interval: Duration) -> Self
    where
        P: EventProducer + 'static,
        S: EventSink + 'static,
    {
        let stop = Arc::new(AtomicBool::new(false));
        let delivered = Arc::new(AtomicU64::new(0));
        let rejected = Arc::new(AtomicU64::new(0));
        let thread_stop = stop.clone();
        let thread_delivered = delivered.clone();
        let thread_rejected = rejected.clone();
        let join = thread::Builder::new()
            .name("event_producer".to_string())
            .spawn(move || {
                let runtime = TokioBuilder::new_current_thread()
                    .enable_time()
                    .build()
                    .expect("tokio runtime");
                runtime.block_on(async move {
                    let mut ticker = tokio::time::interval(interval);
                    while !thread_stop.load(Ordering::Relaxed) {
                        ticker.tick().await;
                        if thread_stop.load(Ordering::Relaxed) {
                            break;
                        }
                        match sink.append(producer.next_record()) {
                            Ok(()) => thread_delivered.fetch_add(1, Ordering::Relaxed),
                            Err(_) => thread_rejected.fetch_add(1, Ordering::Relaxed),
                        };
                    }
                });
            })
            .expect("failed to spawn producer thread");
        Self {
            stop,
            join: Mutex::new(Some(join)),
            delivered,
            rejected,
        }
    }

    /// Records accepted by the sink so far.
    pub fn delivered_total(&self) -> u64 {
        self.delivered.load(Ordering::Relaxed)
    }

    /// Records the sink rejected.
    pub fn rejected_total(&self) -> u64 {
        self.rejected.load(Ordering::Relaxed)
    }

    /// Signals the driver thread to stop and joins it.
    pub fn stop(&self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(handle) = self.join.lock().unwrap().take() {
            let _ = handle.join();
        }
    }
}
