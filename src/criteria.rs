use crate::event::parse_instant;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeSet;
use thiserror::Error;

/// Inclusion predicates driving the filter engine.
///
/// Absent bounds are unbounded; an empty endpoint set means every endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterCriteria {
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub endpoints: BTreeSet<String>,
    pub min_count: u64,
}

impl FilterCriteria {
    pub fn with_start_time(mut self, start: DateTime<Utc>) -> Self {
        self.start_time = Some(start);
        self
    }

    pub fn with_end_time(mut self, end: DateTime<Utc>) -> Self {
        self.end_time = Some(end);
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoints.insert(endpoint.into());
        self
    }

    pub fn with_min_count(mut self, min_count: u64) -> Self {
        self.min_count = min_count;
        self
    }
}

/// Discrete form-field update applied to the live criteria. Bound and
/// min-count updates carry the raw field text, blank meaning "no bound".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CriteriaUpdate {
    StartTime(String),
    EndTime(String),
    Endpoints(Vec<String>),
    MinCount(String),
}

/// Versioned holder of the live filter criteria.
///
/// Updates are validated before they take effect; a rejected update leaves
/// the previous criteria in place and bumps the rejection counter.
#[derive(Debug, Clone)]
pub struct CriteriaService {
    version: u64,
    current: FilterCriteria,
    telemetry: CriteriaTelemetry,
}

impl Default for CriteriaService {
    fn default() -> Self {
        Self::new()
    }
}

impl CriteriaService {
    /// Creates a service holding the identity criteria at version 1.
    pub fn new() -> Self {
        Self {
            version: 1,
            current: FilterCriteria::default(),
            telemetry: CriteriaTelemetry::default(),
        }
    }

    /// Returns the active criteria version.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Returns the criteria currently in force.
    pub fn current(&self) -> &FilterCriteria {
        &self.current
    }

    /// Returns update counters for observability.
    pub fn telemetry(&self) -> &CriteriaTelemetry {
        &self.telemetry
    }

    /// Applies one field update, returning the resulting version.
    pub fn apply(&mut self, update: CriteriaUpdate) -> Result<u64, InvalidCriteriaError> {
        let mut next = self.current.clone();
        match update {
            CriteriaUpdate::StartTime(raw) => {
                next.start_time = self.parse_bound("start_time", raw)?;
            }
            CriteriaUpdate::EndTime(raw) => {
                next.end_time = self.parse_bound("end_time", raw)?;
            }
            CriteriaUpdate::Endpoints(names) => {
                next.endpoints = names.into_iter().collect();
            }
            CriteriaUpdate::MinCount(raw) => {
                next.min_count = self.parse_min_count(raw)?;
            }
        }
        if next == self.current {
            return Ok(self.version);
        }
        self.version += 1;
        self.current = next;
        self.telemetry.applied_updates_total.saturating_inc();
        Ok(self.version)
    }

    fn parse_bound(
        &mut self,
        field: &'static str,
        raw: String,
    ) -> Result<Option<DateTime<Utc>>, InvalidCriteriaError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        match parse_instant(trimmed) {
            Some(instant) => Ok(Some(instant)),
            None => Err(self.rejected(InvalidCriteriaError::Bound { field, raw })),
        }
    }

    fn parse_min_count(&mut self, raw: String) -> Result<u64, InvalidCriteriaError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(0);
        }
        match trimmed.parse::<u64>() {
            Ok(value) => Ok(value),
            Err(_) => Err(self.rejected(InvalidCriteriaError::MinCount { raw })),
        }
    }

    fn rejected(&mut self, err: InvalidCriteriaError) -> InvalidCriteriaError {
        self.telemetry.rejected_updates_total.saturating_inc();
        err
    }
}

/// Counters describing criteria-update outcomes.
#[derive(Debug, Clone, Default)]
pub struct CriteriaTelemetry {
    pub applied_updates_total: u64,
    pub rejected_updates_total: u64,
}

/// Errors surfaced when a criteria update fails validation.
#[derive(Debug, Error)]
pub enum InvalidCriteriaError {
    #[error("invalid {field} bound {raw:?}")]
    Bound { field: &'static str, raw: String },
    #[error("invalid minimum count {raw:?}")]
    MinCount { raw: String },
}

trait SaturatingInc {
    fn saturating_inc(&mut self);
}

impl SaturatingInc for u64 {
    fn saturating_inc(&mut self) {
        *self = self.saturating_add(1);
    }
}
