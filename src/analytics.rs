//! Click analytics: a counter bound to an event source with one-shot teardown.
//!
//! [`ClickCounter`] subscribes to the `click` event of an [`EventSource`]
//! when it is built and counts every event it receives, whatever the target,
//! coordinates or modifiers. [`ClickCounter::destroy`] detaches it for good;
//! from then on reads return [`CounterValue::Destroyed`].
//!
//! ```text
//!   new() ──► Active ──destroy()──► Inactive
//!               │                      │
//!          count() = Count(n)    count() = Destroyed
//! ```
//!
//! Each counter owns its own subscription and tally. Two counters on the
//! same source count independently, each seeing every click.

use std::borrow::Cow;
use std::fmt::{self, Debug};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use atomic_time::AtomicOptionInstant;
use tracing::debug;

use crate::counters::tally::Tally;
use crate::counters::{CounterValue, Observable};
use crate::events::{self, Event, EventSource, Listener};

/// Default observable name of a click counter.
pub const DEFAULT_NAME: &str = "clicks";

/// State written by the click listener.
struct ClickState {
    tally: Tally,
    last_click: AtomicOptionInstant,
}

impl ClickState {
    fn record(&self, _event: &Event) {
        self.tally.add(1);
        self.last_click.store(Some(Instant::now()), Ordering::Relaxed);
    }
}

/// Counts click events from an [`EventSource`] until destroyed.
///
/// # Examples
///
/// ```rust
/// use clickmeter::analytics::ClickCounter;
/// use clickmeter::counters::CounterValue;
/// use clickmeter::events::{Event, EventBus};
/// use std::sync::Arc;
///
/// let bus = Arc::new(EventBus::new());
/// let clicks = ClickCounter::new(bus.clone()).unwrap();
///
/// for _ in 0..3 {
///     bus.dispatch(&Event::click());
/// }
/// assert_eq!(clicks.count(), CounterValue::Count(3));
///
/// clicks.destroy();
/// bus.dispatch(&Event::click());
/// assert_eq!(clicks.count(), CounterValue::Destroyed);
/// ```
pub struct ClickCounter {
    name: Cow<'static, str>,
    source: Arc<dyn EventSource>,
    listener: Listener,
    state: Arc<ClickState>,
    active: AtomicBool,
}

impl ClickCounter {
    /// Creates a counter at zero and subscribes it to `source`.
    ///
    /// # Errors
    ///
    /// Any error from [`EventSource::subscribe`] is returned unchanged.
    pub fn new(source: Arc<dyn EventSource>) -> events::Result<Self> {
        let state = Arc::new(ClickState {
            tally: Tally::new(),
            last_click: AtomicOptionInstant::none(),
        });
        let listener = {
            let state = Arc::clone(&state);
            Listener::new(move |event| state.record(event))
        };

        source.subscribe(events::CLICK, listener.clone())?;
        debug!(?listener, "click counter attached");

        Ok(Self {
            name: Cow::Borrowed(DEFAULT_NAME),
            source,
            listener,
            state,
            active: AtomicBool::new(true),
        })
    }

    /// Sets the observable name, returning `self` for method chaining.
    pub fn with_name(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.name = name.into();
        self
    }

    /// Returns the number of clicks seen, or [`CounterValue::Destroyed`]
    /// once the counter has been torn down.
    pub fn count(&self) -> CounterValue {
        if self.is_active() {
            CounterValue::Count(self.state.tally.value())
        } else {
            CounterValue::Destroyed
        }
    }

    /// Detaches the listener and moves the counter to its terminal state.
    ///
    /// Calling this more than once is harmless.
    pub fn destroy(&self) {
        let removed = self.source.unsubscribe(events::CLICK, &self.listener);
        let was_active = self.active.swap(false, Ordering::AcqRel);
        if was_active {
            debug!(
                name = %self.name,
                clicks = self.state.tally.value(),
                removed,
                "click counter destroyed"
            );
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    /// Time of the most recent counted click, `None` before the first click
    /// and after destroy.
    pub fn last_click(&self) -> Option<Instant> {
        if self.is_active() {
            self.state.last_click.load(Ordering::Relaxed)
        } else {
            None
        }
    }
}

impl Observable for ClickCounter {
    #[inline]
    fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    fn value(&self) -> CounterValue {
        self.count()
    }
}

impl Drop for ClickCounter {
    fn drop(&mut self) {
        if self.is_active() {
            self.destroy();
        }
    }
}

impl Debug for ClickCounter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{{ {} }}", self.name, self.count())
    }
}
