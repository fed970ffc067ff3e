use crate::event::Event;
use crate::series::{ChartSeries, SeriesPoint};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Display colors per classification.
///
/// Read at grouping time only; changing the scheme never recolors series
/// already handed out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorScheme {
    pub default: String,
    pub flagged: String,
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self {
            default: "blue".to_string(),
            flagged: "green".to_string(),
        }
    }
}

impl ColorScheme {
    pub fn new(default_color: impl Into<String>, flagged_color: impl Into<String>) -> Self {
        Self {
            default: default_color.into(),
            flagged: flagged_color.into(),
        }
    }

    /// Color for one event's classification.
    pub fn color_for(&self, flagged: bool) -> &str {
        if flagged {
            &self.flagged
        } else {
            &self.default
        }
    }
}

/// Per-endpoint buckets in order of first appearance within the page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EndpointGroups {
    buckets: Vec<ChartSeries>,
    positions: HashMap<String, usize>,
}

impl EndpointGroups {
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Bucket for an endpoint, if the page contained it.
    pub fn get(&self, endpoint: &str) -> Option<&ChartSeries> {
        self.positions.get(endpoint).map(|&index| &self.buckets[index])
    }

    /// Buckets in first-appearance order.
    pub fn buckets(&self) -> &[ChartSeries] {
        &self.buckets
    }

    /// Consumes the grouping, yielding the buckets for series assembly.
    pub fn into_buckets(self) -> Vec<ChartSeries> {
        self.buckets
    }

    fn push_point(&mut self, endpoint: &str, color: &str, point: SeriesPoint) {
        let index = match self.positions.get(endpoint) {
            Some(&index) => index,
            None => {
                let index = self.buckets.len();
                self.buckets.push(ChartSeries::new(endpoint, color));
                self.positions.insert(endpoint.to_string(), index);
                index
            }
        };
        self.buckets[index].points.push(point);
    }
}

/// Partitions a page by endpoint and classifies each bucket with a color.
///
/// Buckets take the color of the first event seen for their endpoint in this
/// page; later events with a different classification do not recolor them.
pub fn group(page: &[Event], scheme: &ColorScheme) -> EndpointGroups {
    let mut groups = EndpointGroups::default();
    for event in page {
        let color = scheme.color_for(event.flagged);
        groups.push_point(
            &event.endpoint,
            color,
            SeriesPoint::new(event.timestamp, event.count),
        );
    }
    groups
}
