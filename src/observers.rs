//! Observer implementations for exporting counter state.
//!
//! - [`table`] - Pretty-print counters as tables using the `tabled` crate
//! - [`json`] - Serialize counters to JSON
//! - [`prometheus`] - Export counters in Prometheus exposition format
//!
//! All observers accept any iterator of `&dyn Observable` and share the
//! [`ObserverError`] type. Each one is gated behind the feature of the same
//! name; `full` enables all of them.
//!
//! A destroyed counter renders as `appAnalytic Destroyed` in tables and
//! JSON, and is left out of Prometheus output.

mod error;

pub use error::{ObserverError, Result};

#[cfg(feature = "prometheus")]
pub use error::PrometheusError;

#[cfg(feature = "table")]
pub mod table;

#[cfg(feature = "json")]
pub mod json;

#[cfg(feature = "prometheus")]
pub mod prometheus;

/// Name shown for counters that have none.
#[cfg(any(feature = "serde", feature = "table", feature = "prometheus"))]
pub(crate) fn display_name(name: &str) -> &str {
    if name.is_empty() {
        "(unnamed)"
    } else {
        name
    }
}
