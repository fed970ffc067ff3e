use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Raw request-count submission as handed over by any event source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    pub endpoint: String,
    pub timestamp: String,
    pub count: i64,
    #[serde(default)]
    pub flagged: bool,
}

impl EventRecord {
    /// Creates a record with the classification flag unset.
    pub fn new(endpoint: impl Into<String>, timestamp: impl Into<String>, count: i64) -> Self {
        Self {
            endpoint: endpoint.into(),
            timestamp: timestamp.into(),
            count,
            flagged: false,
        }
    }

    pub fn with_flagged(mut self, flagged: bool) -> Self {
        self.flagged = flagged;
        self
    }
}

/// Validated request-count observation held by the event store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub endpoint: String,
    pub timestamp: DateTime<Utc>,
    pub count: u64,
    pub flagged: bool,
}

impl Event {
    /// Creates a validated event directly from typed parts.
    pub fn new(endpoint: impl Into<String>, timestamp: DateTime<Utc>, count: u64) -> Self {
        Self {
            endpoint: endpoint.into(),
            timestamp,
            count,
            flagged: false,
        }
    }

    pub fn with_flagged(mut self, flagged: bool) -> Self {
        self.flagged = flagged;
        self
    }

    /// Timestamp rendered in the normalized export form.
    pub fn timestamp_text(&self) -> String {
        format_instant(&self.timestamp)
    }
}

impl TryFrom<EventRecord> for Event {
    type Error = InvalidEventError;

    fn try_from(record: EventRecord) -> Result<Self, Self::Error> {
        let timestamp = match parse_instant(&record.timestamp) {
            Some(timestamp) => timestamp,
            None => {
                return Err(InvalidEventError::Timestamp {
                    raw: record.timestamp,
                })
            }
        };
        if record.count < 0 {
            return Err(InvalidEventError::NegativeCount {
                count: record.count,
            });
        }
        Ok(Self {
            endpoint: record.endpoint,
            timestamp,
            count: record.count as u64,
            flagged: record.flagged,
        })
    }
}

/// Parses an ISO-8601 instant, normalized to UTC. `None` when malformed.
pub fn parse_instant(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|parsed| parsed.with_timezone(&Utc))
}

/// Renders an instant as ISO-8601 with millisecond precision and `Z` suffix.
pub fn format_instant(instant: &DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Rejections surfaced at the event-store ingestion boundary.
#[derive(Debug, Error)]
pub enum InvalidEventError {
    #[error("invalid event timestamp {raw:?}")]
    Timestamp { raw: String },
    #[error("negative request count {count}")]
    NegativeCount { count: i64 },
}
