//! In-process event bus.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::{debug, trace};

use super::{Event, EventError, EventSource, Listener, Result};

/// A thread-safe [`EventSource`] that delivers events to listeners in
/// registration order.
///
/// Listeners run outside the bus lock, so a listener may subscribe or
/// unsubscribe while it is being dispatched. A listener removed during a
/// dispatch still receives that one event.
///
/// # Examples
///
/// ```rust
/// use clickmeter::events::{Event, EventBus, EventSource, Listener};
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use std::sync::Arc;
///
/// let bus = EventBus::new();
/// let seen = Arc::new(AtomicUsize::new(0));
/// let seen_clone = Arc::clone(&seen);
///
/// bus.subscribe("click", Listener::new(move |_| {
///     seen_clone.fetch_add(1, Ordering::Relaxed);
/// }))
/// .unwrap();
///
/// bus.dispatch(&Event::click());
/// bus.dispatch(&Event::new("scroll"));
/// assert_eq!(seen.load(Ordering::Relaxed), 1);
/// ```
#[derive(Debug, Default)]
pub struct EventBus {
    listeners: Mutex<HashMap<String, Vec<Listener>>>,
    closed: AtomicBool,
}

impl EventBus {
    /// Creates an open bus with no listeners.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a bus that refuses every subscription.
    pub fn closed() -> Self {
        let bus = Self::new();
        bus.close();
        bus
    }

    /// Stops accepting new subscriptions. Existing listeners stay attached.
    pub fn close(&self) {
        self.closed.store(true, Ordering::Release);
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    /// Delivers `event` to every listener registered for its name.
    ///
    /// Returns the number of listeners invoked.
    pub fn dispatch(&self, event: &Event) -> usize {
        let targets = match self.lock().get(event.name()) {
            Some(list) => list.clone(),
            None => Vec::new(),
        };
        trace!(event = event.name(), listeners = targets.len(), "dispatch");
        for listener in &targets {
            listener.call(event);
        }
        targets.len()
    }

    /// Number of listeners registered for `event`.
    pub fn listener_count(&self, event: &str) -> usize {
        self.lock().get(event).map_or(0, Vec::len)
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Vec<Listener>>> {
        // Listeners never run under the lock, so poisoning cannot leave the
        // map half-updated.
        self.listeners.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl EventSource for EventBus {
    fn subscribe(&self, event: &str, listener: Listener) -> Result<()> {
        if self.is_closed() {
            return Err(EventError::Unavailable);
        }
        let mut map = self.lock();
        let list = map.entry(event.to_string()).or_default();
        if list.iter().any(|l| l.same_as(&listener)) {
            return Err(EventError::AlreadySubscribed(event.to_string()));
        }
        debug!(event, ?listener, "subscribe");
        list.push(listener);
        Ok(())
    }

    fn unsubscribe(&self, event: &str, listener: &Listener) -> bool {
        let mut map = self.lock();
        let Some(list) = map.get_mut(event) else {
            return false;
        };
        let before = list.len();
        list.retain(|l| !l.same_as(listener));
        let removed = list.len() != before;
        if list.is_empty() {
            map.remove(event);
        }
        debug!(event, ?listener, removed, "unsubscribe");
        removed
    }
}
