use crate::criteria::FilterCriteria;
use crate::event::Event;

/// Reduces a log snapshot to the subset matching `criteria`, preserving
/// insertion order.
///
/// Pure over its inputs: identical `(events, criteria)` always yield the same
/// result and nothing outside the return value changes. A start bound past
/// the end bound admits nothing and is not an error.
pub fn filter(events: &[Event], criteria: &FilterCriteria) -> Vec<Event> {
    events
        .iter()
        .filter(|event| admits(event, criteria))
        .cloned()
        .collect()
}

fn admits(event: &Event, criteria: &FilterCriteria) -> bool {
    if let Some(start) = criteria.start_time {
        if event.timestamp < start {
            return false;
        }
    }
    if let Some(end) = criteria.end_time {
        if event.timestamp > end {
            return false;
        }
    }
    if event.count < criteria.min_count {
        return false;
    }
    criteria.endpoints.is_empty() || criteria.endpoints.contains(&event.endpoint)
}
