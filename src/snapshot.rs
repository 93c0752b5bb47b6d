//! Serializable snapshots of counter state.
//!
//! # Feature Flag
//!
//! This module requires the `serde` feature.
//!
//! # Examples
//!
//! ```rust,ignore
//! use clickmeter::snapshot::CounterSnapshot;
//!
//! let snapshot = CounterSnapshot::from_observable(&clicks);
//! let json = serde_json::to_string(&snapshot)?;
//! // {"name":"clicks","value":3}
//! // {"name":"clicks","value":"appAnalytic Destroyed"}
//! ```

use crate::counters::{CounterValue, Observable};
use crate::observers::display_name;
use serde::{Deserialize, Serialize};

/// A snapshot of a single counter's state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CounterSnapshot {
    /// The name of the counter.
    pub name: String,
    /// The value of the counter.
    pub value: CounterValue,
}

impl CounterSnapshot {
    /// Creates a new counter snapshot.
    pub fn new(name: impl Into<String>, value: CounterValue) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }

    /// Creates a snapshot from an observable counter.
    pub fn from_observable(counter: &dyn Observable) -> Self {
        Self::new(display_name(counter.name()), counter.value())
    }
}

/// A point-in-time capture of several counters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MetricsSnapshot {
    /// Optional timestamp in milliseconds since Unix epoch.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp_ms: Option<u64>,
    /// The counter snapshots.
    pub counters: Vec<CounterSnapshot>,
}

impl MetricsSnapshot {
    /// Creates a new metrics snapshot with the given counters.
    pub fn new(counters: Vec<CounterSnapshot>) -> Self {
        Self {
            timestamp_ms: None,
            counters,
        }
    }

    /// Creates a new metrics snapshot with counters and a timestamp.
    pub fn with_timestamp(counters: Vec<CounterSnapshot>, timestamp_ms: u64) -> Self {
        Self {
            timestamp_ms: Some(timestamp_ms),
            counters,
        }
    }

    /// Finds a counter by name.
    pub fn get(&self, name: &str) -> Option<&CounterSnapshot> {
        self.counters.iter().find(|c| c.name == name)
    }

    /// Collects snapshots from an iterator of observable counters.
    pub fn collect<'a>(counters: impl Iterator<Item = &'a dyn Observable>) -> Self {
        Self::new(counters.map(CounterSnapshot::from_observable).collect())
    }

    /// Collects snapshots with a timestamp.
    pub fn collect_with_timestamp<'a>(
        counters: impl Iterator<Item = &'a dyn Observable>,
        timestamp_ms: u64,
    ) -> Self {
        Self::with_timestamp(
            counters.map(CounterSnapshot::from_observable).collect(),
            timestamp_ms,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::ClickCounter;
    use crate::events::{Event, EventBus};
    use std::sync::Arc;

    fn counter_with(clicks: usize) -> (Arc<EventBus>, ClickCounter) {
        let bus = Arc::new(EventBus::new());
        let counter = ClickCounter::new(bus.clone()).unwrap();
        for _ in 0..clicks {
            bus.dispatch(&Event::click());
        }
        (bus, counter)
    }

    #[test]
    fn test_counter_snapshot_new() {
        let snapshot = CounterSnapshot::new("test", CounterValue::Count(42));
        assert_eq!(snapshot.name, "test");
        assert_eq!(snapshot.value, CounterValue::Count(42));
    }

    #[test]
    fn test_counter_snapshot_from_observable() {
        let (_bus, counter) = counter_with(4);
        let snapshot = CounterSnapshot::from_observable(&counter);
        assert_eq!(snapshot.name, "clicks");
        assert_eq!(snapshot.value, CounterValue::Count(4));
    }

    #[test]
    fn test_counter_snapshot_unnamed() {
        let (_bus, counter) = counter_with(0);
        let counter = counter.with_name("");
        let snapshot = CounterSnapshot::from_observable(&counter);
        assert_eq!(snapshot.name, "(unnamed)");
    }

    #[test]
    fn test_counter_snapshot_destroyed() {
        let (_bus, counter) = counter_with(9);
        counter.destroy();
        let snapshot = CounterSnapshot::from_observable(&counter);
        assert_eq!(snapshot.value, CounterValue::Destroyed);
    }

    #[test]
    fn test_metrics_snapshot_collect() {
        let (_bus1, first) = counter_with(1);
        let (_bus2, second) = counter_with(2);
        let second = second.with_name("footer_clicks");

        let counters: Vec<&dyn Observable> = vec![&first, &second];
        let snapshot = MetricsSnapshot::collect(counters.into_iter());

        assert_eq!(snapshot.counters.len(), 2);
        assert!(snapshot.timestamp_ms.is_none());
        assert_eq!(snapshot.get("clicks").unwrap().value, CounterValue::Count(1));
        assert_eq!(
            snapshot.get("footer_clicks").unwrap().value,
            CounterValue::Count(2)
        );
        assert!(snapshot.get("missing").is_none());
    }

    #[test]
    fn test_metrics_snapshot_with_timestamp() {
        let (_bus, counter) = counter_with(0);
        let counters: Vec<&dyn Observable> = vec![&counter];
        let snapshot = MetricsSnapshot::collect_with_timestamp(counters.into_iter(), 1234567890);
        assert_eq!(snapshot.timestamp_ms, Some(1234567890));
    }

    #[cfg(feature = "json")]
    #[test]
    fn test_serialize_snapshots() {
        let live = CounterSnapshot::new("clicks", CounterValue::Count(42));
        assert_eq!(
            serde_json::to_string(&live).unwrap(),
            r#"{"name":"clicks","value":42}"#
        );

        let gone = CounterSnapshot::new("clicks", CounterValue::Destroyed);
        assert_eq!(
            serde_json::to_string(&gone).unwrap(),
            r#"{"name":"clicks","value":"appAnalytic Destroyed"}"#
        );
    }

    #[cfg(feature = "json")]
    #[test]
    fn test_deserialize_metrics_snapshot() {
        let json = r#"{"timestamp_ms":1,"counters":[{"name":"a","value":1},{"name":"b","value":"appAnalytic Destroyed"}]}"#;
        let snapshot: MetricsSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.timestamp_ms, Some(1));
        assert_eq!(snapshot.get("a").unwrap().value, CounterValue::Count(1));
        assert_eq!(snapshot.get("b").unwrap().value, CounterValue::Destroyed);
    }
}
