//! Event sources that click counters subscribe to.
//!
//! A counter attaches to an [`EventSource`] with a [`Listener`] it keeps for
//! its whole lifetime. Listener identity is the identity of the shared
//! handle, so detaching must pass the very same handle that was attached:
//!
//! ```rust
//! use clickmeter::events::{Event, EventBus, EventSource, Listener};
//!
//! let bus = EventBus::new();
//! let listener = Listener::new(|event: &Event| println!("saw {}", event.name()));
//!
//! bus.subscribe("click", listener.clone()).unwrap();
//! assert_eq!(bus.dispatch(&Event::click()), 1);
//!
//! // A fresh closure with the same body is a different listener.
//! let other = Listener::new(|event: &Event| println!("saw {}", event.name()));
//! assert!(!bus.unsubscribe("click", &other));
//! assert!(bus.unsubscribe("click", &listener));
//! ```

mod bus;
mod error;

pub use bus::EventBus;
pub use error::{EventError, Result};

use std::fmt;
use std::sync::Arc;

/// Name of the event click counters subscribe to.
pub const CLICK: &str = "click";

/// Keyboard modifiers held while an event fired.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

/// A user-interaction event delivered by an [`EventSource`].
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    name: String,
    target: Option<String>,
    position: Option<(f64, f64)>,
    modifiers: Modifiers,
}

impl Event {
    /// Creates an event with the given name and no further detail.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            target: None,
            position: None,
            modifiers: Modifiers::default(),
        }
    }

    /// Creates a plain `click` event.
    pub fn click() -> Self {
        Self::new(CLICK)
    }

    /// Sets the element the event was aimed at.
    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    /// Sets the pointer coordinates.
    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.position = Some((x, y));
        self
    }

    /// Sets the held modifier keys.
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn target(&self) -> Option<&str> {
        self.target.as_deref()
    }

    pub fn position(&self) -> Option<(f64, f64)> {
        self.position
    }

    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }
}

/// A shared event callback.
///
/// Cloning a `Listener` yields the same listener; two listeners built from
/// separate [`Listener::new`] calls are always distinct, even for identical
/// closures.
#[derive(Clone)]
pub struct Listener(Arc<dyn Fn(&Event) + Send + Sync>);

impl Listener {
    /// Wraps a callback into a new listener handle.
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn(&Event) + Send + Sync + 'static,
    {
        Self(Arc::new(callback))
    }

    /// Invokes the callback.
    #[inline]
    pub fn call(&self, event: &Event) {
        (self.0)(event)
    }

    /// Returns `true` if both handles refer to the same listener.
    #[inline]
    pub fn same_as(&self, other: &Listener) -> bool {
        // Compare data pointers only; vtable addresses are not unique.
        std::ptr::eq(
            Arc::as_ptr(&self.0) as *const (),
            Arc::as_ptr(&other.0) as *const (),
        )
    }
}

impl fmt::Debug for Listener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Listener({:p})", Arc::as_ptr(&self.0) as *const ())
    }
}

/// The platform mechanism that notifies subscribers of events.
pub trait EventSource: Send + Sync {
    /// Registers `listener` for events named `event`.
    ///
    /// # Errors
    ///
    /// Returns [`EventError::Unavailable`] when the source cannot accept
    /// subscriptions, and [`EventError::AlreadySubscribed`] when the same
    /// listener is already registered for `event`.
    fn subscribe(&self, event: &str, listener: Listener) -> Result<()>;

    /// Removes `listener` from `event`.
    ///
    /// Returns `true` if the listener was registered. Removing an unknown
    /// listener is a no-op.
    fn unsubscribe(&self, event: &str, listener: &Listener) -> bool;
}
