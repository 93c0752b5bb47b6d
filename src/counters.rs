//! Core counter types and the sharding infrastructure behind them.
//!
//! Click events may be dispatched from several threads at once, so the
//! storage behind every counter is sharded: each thread writes to its own
//! cache-padded slot and reads aggregate all slots.
//!
//! ```text
//!                          ┌─────────────────────────────────────┐
//!                          │            Tally storage            │
//!                          ├─────────────────────────────────────┤
//!   Thread 0 ──writes──►   │ [Slot 0] ████████ (CachePadded)     │
//!   Thread 1 ──writes──►   │ [Slot 1] ████████ (CachePadded)     │
//!        ...               │    ...                              │
//!   Thread 63 ─writes──►   │ [Slot 63] ███████ (CachePadded)     │
//!                          └─────────────────────────────────────┘
//!                                          │
//!                                          ▼
//!                                   value() aggregates
//!                                   all slots on read
//! ```
//!
//! Slots are assigned round-robin per thread. After 64 threads, assignment
//! wraps around and threads share slots, which only costs contention.

pub mod tally;

use atomic_traits::Atomic;
use std::{
    fmt::Debug,
    fmt::Display,
    sync::atomic::{AtomicUsize, Ordering},
};

/// Number of shards (slots) used by each tally.
pub(crate) const NUM_COMPONENTS: usize = 64;

/// The string a destroyed counter reports in place of its count.
pub const DESTROYED_MARKER: &str = "appAnalytic Destroyed";

static NEXT_SLOT_ID: AtomicUsize = AtomicUsize::new(0);

thread_local! {
    /// Slot index of the current thread, assigned on first use.
    pub(crate) static THREAD_SLOT_INDEX: usize = get_next_slot_id();
}

/// Assigns the next slot ID to a thread, in `[0, NUM_COMPONENTS)`.
pub fn get_next_slot_id() -> usize {
    NEXT_SLOT_ID.fetch_add(1, Ordering::Relaxed) % NUM_COMPONENTS
}

/// The observable value of a click counter.
///
/// A live counter reports [`CounterValue::Count`]; once it has been torn
/// down every read yields [`CounterValue::Destroyed`], which is never equal
/// to any count.
///
/// # Examples
///
/// ```rust
/// use clickmeter::counters::CounterValue;
///
/// assert_eq!(CounterValue::Count(3).to_string(), "3");
/// assert_eq!(CounterValue::Destroyed.to_string(), "appAnalytic Destroyed");
/// assert_ne!(CounterValue::Destroyed, CounterValue::Count(0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterValue {
    /// Number of clicks observed so far.
    Count(u64),
    /// The counter has been destroyed.
    Destroyed,
}

impl Display for CounterValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CounterValue::Count(v) => write!(f, "{}", v),
            CounterValue::Destroyed => f.write_str(DESTROYED_MARKER),
        }
    }
}

impl CounterValue {
    /// Returns the count, or `None` for a destroyed counter.
    ///
    /// ```rust
    /// use clickmeter::counters::CounterValue;
    ///
    /// assert_eq!(CounterValue::Count(7).as_count(), Some(7));
    /// assert_eq!(CounterValue::Destroyed.as_count(), None);
    /// ```
    pub fn as_count(&self) -> Option<u64> {
        match self {
            CounterValue::Count(v) => Some(*v),
            CounterValue::Destroyed => None,
        }
    }

    /// Returns `true` for the terminal marker.
    pub fn is_destroyed(&self) -> bool {
        matches!(self, CounterValue::Destroyed)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for CounterValue {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            CounterValue::Count(v) => serializer.serialize_u64(*v),
            CounterValue::Destroyed => serializer.serialize_str(DESTROYED_MARKER),
        }
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for CounterValue {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(serde::Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Count(u64),
            Marker(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Count(v) => Ok(CounterValue::Count(v)),
            Raw::Marker(s) if s == DESTROYED_MARKER => Ok(CounterValue::Destroyed),
            Raw::Marker(s) => Err(serde::de::Error::custom(format!(
                "expected a count or {:?}, got {:?}",
                DESTROYED_MARKER, s
            ))),
        }
    }
}

/// A named source of a [`CounterValue`].
///
/// Observers render any collection of `&dyn Observable`.
pub trait Observable: Debug {
    /// Returns the name of this counter, or an empty string.
    fn name(&self) -> &str;

    /// Returns the current value of the counter.
    fn value(&self) -> CounterValue;
}

impl Display for dyn Observable + '_ {
    /// Formats the counter as `name:value` if named, or just `value` otherwise.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if !self.name().is_empty() {
            write!(f, "{}:{}", self.name(), self.value())
        } else {
            write!(f, "{}", self.value())
        }
    }
}

/// Access to the current thread's shard of a sharded counter.
pub trait GetComponentCounter {
    /// The atomic type used for individual shards.
    type CounterType: Atomic;

    /// Returns a reference to the current thread's shard.
    fn get_component_counter(&self) -> &Self::CounterType;
}
