use crate::group::EndpointGroups;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// One chart point: request count observed at an instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SeriesPoint {
    pub timestamp: DateTime<Utc>,
    pub count: u64,
}

impl SeriesPoint {
    pub fn new(timestamp: DateTime<Utc>, count: u64) -> Self {
        Self { timestamp, count }
    }
}

/// Chart-ready series for one endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartSeries {
    pub label: String,
    pub color: String,
    pub points: Vec<SeriesPoint>,
}

impl ChartSeries {
    /// Creates an empty series with the given label and color.
    pub fn new(label: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            color: color.into(),
            points: Vec::new(),
        }
    }
}

/// Point ordering applied while series are built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointOrder {
    /// Points keep the page's insertion order.
    PageOrder,
    /// Points sorted by timestamp; ties keep page order.
    Chronological,
}

impl Default for PointOrder {
    fn default() -> Self {
        PointOrder::Chronological
    }
}

/// Full chart payload: one series per endpoint, in first-appearance order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ChartData {
    pub series: Vec<ChartSeries>,
}

impl ChartData {
    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Series for an endpoint label, if present.
    pub fn get(&self, label: &str) -> Option<&ChartSeries> {
        self.series.iter().find(|series| series.label == label)
    }
}

/// Converts grouped buckets into the chart payload.
///
/// Series order is always the buckets' first-appearance order; the point
/// ordering knob only rearranges points within each series.
pub fn build(groups: EndpointGroups, order: PointOrder) -> ChartData {
    let mut series = groups.into_buckets();
    if order == PointOrder::Chronological {
        for entry in &mut series {
            entry.points.sort_by_key(|point| point.timestamp);
        }
    }
    ChartData { series }
}
