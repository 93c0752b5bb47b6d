//! JSON observer for serializing counters.
//!
//! # Feature Flag
//!
//! This module requires the `json` feature.
//!
//! # Examples
//!
//! ```rust,ignore
//! use clickmeter::observers::json::JsonObserver;
//!
//! let counters: Vec<&dyn Observable> = vec![&nav_clicks, &footer_clicks];
//! let json = JsonObserver::new().to_json(counters.into_iter())?;
//! // [{"name":"nav_clicks","value":12},{"name":"footer_clicks","value":"appAnalytic Destroyed"}]
//! ```

use crate::counters::Observable;
use crate::observers::Result;
use crate::snapshot::{CounterSnapshot, MetricsSnapshot};
use serde::Serialize;

/// Configuration for the JSON observer.
#[derive(Debug, Clone, Default)]
pub struct JsonConfig {
    /// Whether to pretty-print the JSON output.
    pub pretty: bool,
    /// Whether to include a timestamp in the output.
    pub include_timestamp: bool,
    /// Whether to wrap counters in a [`MetricsSnapshot`] object.
    pub wrap_in_snapshot: bool,
}

/// An observer that serializes counters to JSON.
///
/// By default the output is a bare array of `{"name", "value"}` objects.
/// With [`wrap_in_snapshot`](Self::wrap_in_snapshot) it becomes a
/// [`MetricsSnapshot`], optionally carrying a timestamp.
#[derive(Debug, Clone, Default)]
pub struct JsonObserver {
    config: JsonConfig,
}

impl JsonObserver {
    /// Creates a new JSON observer with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new JSON observer with the specified configuration.
    pub fn with_config(config: JsonConfig) -> Self {
        Self { config }
    }

    /// Enables or disables pretty-printing.
    pub fn pretty(mut self, enabled: bool) -> Self {
        self.config.pretty = enabled;
        self
    }

    /// Enables or disables timestamp inclusion.
    ///
    /// Only has effect when `wrap_in_snapshot` is also enabled.
    pub fn include_timestamp(mut self, enabled: bool) -> Self {
        self.config.include_timestamp = enabled;
        self
    }

    /// Enables or disables wrapping the output in a [`MetricsSnapshot`].
    pub fn wrap_in_snapshot(mut self, enabled: bool) -> Self {
        self.config.wrap_in_snapshot = enabled;
        self
    }

    /// Collects counters into a vector of [`CounterSnapshot`].
    pub fn collect<'a>(
        &self,
        counters: impl Iterator<Item = &'a dyn Observable>,
    ) -> Vec<CounterSnapshot> {
        counters.map(CounterSnapshot::from_observable).collect()
    }

    /// Serializes counters to a JSON string.
    pub fn to_json<'a>(&self, counters: impl Iterator<Item = &'a dyn Observable>) -> Result<String> {
        let snapshots = self.collect(counters);
        if self.config.wrap_in_snapshot {
            self.encode(&self.wrap(snapshots))
        } else {
            self.encode(&snapshots)
        }
    }

    /// Serializes counters to a JSON byte vector.
    pub fn to_json_bytes<'a>(
        &self,
        counters: impl Iterator<Item = &'a dyn Observable>,
    ) -> Result<Vec<u8>> {
        Ok(self.to_json(counters)?.into_bytes())
    }

    fn wrap(&self, snapshots: Vec<CounterSnapshot>) -> MetricsSnapshot {
        if self.config.include_timestamp {
            MetricsSnapshot::with_timestamp(snapshots, current_timestamp_ms())
        } else {
            MetricsSnapshot::new(snapshots)
        }
    }

    fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<String> {
        let json = if self.config.pretty {
            serde_json::to_string_pretty(value)?
        } else {
            serde_json::to_string(value)?
        };
        Ok(json)
    }
}

/// Returns the current timestamp in milliseconds since Unix epoch.
fn current_timestamp_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::ClickCounter;
    use crate::counters::CounterValue;
    use crate::events::{Event, EventBus};
    use std::sync::Arc;

    fn counter_with(bus: &Arc<EventBus>, name: &'static str) -> ClickCounter {
        ClickCounter::new(bus.clone()).unwrap().with_name(name)
    }

    #[test]
    fn test_to_json_empty() {
        let counters: Vec<&dyn Observable> = vec![];
        let json = JsonObserver::new().to_json(counters.into_iter()).unwrap();
        assert_eq!(json, "[]");
    }

    #[test]
    fn test_to_json_live_and_destroyed() {
        let bus = Arc::new(EventBus::new());
        let nav = counter_with(&bus, "nav_clicks");
        let footer = counter_with(&bus, "footer_clicks");
        for _ in 0..3 {
            bus.dispatch(&Event::click());
        }
        footer.destroy();

        let counters: Vec<&dyn Observable> = vec![&nav, &footer];
        let json = JsonObserver::new().to_json(counters.into_iter()).unwrap();
        assert_eq!(
            json,
            r#"[{"name":"nav_clicks","value":3},{"name":"footer_clicks","value":"appAnalytic Destroyed"}]"#
        );
    }

    #[test]
    fn test_pretty() {
        let bus = Arc::new(EventBus::new());
        let clicks = counter_with(&bus, "clicks");
        let counters: Vec<&dyn Observable> = vec![&clicks];
        let json = JsonObserver::new()
            .pretty(true)
            .to_json(counters.into_iter())
            .unwrap();
        assert!(json.contains('\n'));
        assert!(json.contains("  "));
    }

    #[test]
    fn test_wrap_without_timestamp() {
        let bus = Arc::new(EventBus::new());
        let clicks = counter_with(&bus, "clicks");
        let counters: Vec<&dyn Observable> = vec![&clicks];
        let json = JsonObserver::new()
            .wrap_in_snapshot(true)
            .to_json(counters.into_iter())
            .unwrap();
        assert_eq!(json, r#"{"counters":[{"name":"clicks","value":0}]}"#);
    }

    #[test]
    fn test_wrap_with_timestamp() {
        let bus = Arc::new(EventBus::new());
        let clicks = counter_with(&bus, "clicks");
        bus.dispatch(&Event::click());

        let counters: Vec<&dyn Observable> = vec![&clicks];
        let json = JsonObserver::with_config(JsonConfig {
            pretty: false,
            include_timestamp: true,
            wrap_in_snapshot: true,
        })
        .to_json(counters.into_iter())
        .unwrap();

        let snapshot: MetricsSnapshot = serde_json::from_str(&json).unwrap();
        assert!(snapshot.timestamp_ms.unwrap() > 0);
        assert_eq!(snapshot.get("clicks").unwrap().value, CounterValue::Count(1));
    }

    #[test]
    fn test_to_json_bytes() {
        let counters: Vec<&dyn Observable> = vec![];
        let bytes = JsonObserver::new().to_json_bytes(counters.into_iter()).unwrap();
        assert_eq!(bytes, b"[]");
    }
}
