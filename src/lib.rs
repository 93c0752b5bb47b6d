//! # Clickmeter - Click Analytics With an Explicit Lifecycle
//!
//! A small analytics component that counts click events coming from an
//! event source and can be torn down exactly once.
//!
//! ## Lifecycle
//!
//! A [`ClickCounter`](analytics::ClickCounter) attaches a listener to the
//! `click` event of an [`EventSource`](events::EventSource) when it is
//! created. While active, every click increments its count by one. Calling
//! [`destroy`](analytics::ClickCounter::destroy) detaches the listener; from
//! then on every read returns the terminal marker
//! [`CounterValue::Destroyed`](counters::CounterValue::Destroyed) instead of
//! a number, no matter how many clicks arrive afterwards.
//!
//! ```rust
//! use clickmeter::analytics::ClickCounter;
//! use clickmeter::counters::CounterValue;
//! use clickmeter::events::{Event, EventBus};
//! use std::sync::Arc;
//!
//! let bus = Arc::new(EventBus::new());
//! let clicks = ClickCounter::new(bus.clone()).unwrap();
//! assert_eq!(clicks.count(), CounterValue::Count(0));
//!
//! bus.dispatch(&Event::click().with_target("#signup"));
//! assert_eq!(clicks.count(), CounterValue::Count(1));
//!
//! clicks.destroy();
//! clicks.destroy();
//! assert_eq!(clicks.count().to_string(), "appAnalytic Destroyed");
//! ```
//!
//! There is no global instance. Whoever starts the application builds the
//! counter and hands out references (or an `Arc`) to code that reads it.
//!
//! ## Thread Safety
//!
//! [`EventBus`](events::EventBus) may dispatch from several threads at once.
//! Click counts are kept in a sharded tally of cache-padded atomics, so
//! parallel dispatch never loses an increment.
//!
//! ## Observers
//!
//! | Feature | Module | Description |
//! |---------|--------|-------------|
//! | `table` | [`observers::table`] | Pretty-print counters as ASCII tables |
//! | `json` | [`observers::json`] | Serialize counters to JSON |
//! | `prometheus` | [`observers::prometheus`] | Export in Prometheus exposition format |
//! | `full` | All observers | Enables all observer modules |
//!
//! The `json` feature also enables [`model`], a timestamped message that
//! renders itself as pretty-printed JSON.

pub mod analytics;
pub mod config;
pub mod counters;
pub mod events;
pub mod observers;

#[cfg(feature = "serde")]
pub mod snapshot;

#[cfg(feature = "json")]
pub mod model;
