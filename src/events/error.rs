//! Errors raised by event sources.

use thiserror::Error;

/// Error type for event source operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EventError {
    /// The event source does not accept subscriptions.
    #[error("event source unavailable")]
    Unavailable,

    /// The listener is already registered for this event.
    #[error("listener already subscribed to {0:?}")]
    AlreadySubscribed(String),
}

/// Result type for event source operations.
pub type Result<T> = std::result::Result<T, EventError>;
