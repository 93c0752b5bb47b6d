//! A timestamped message model.
//!
//! # Feature Flag
//!
//! This module requires the `json` feature.
//!
//! # Examples
//!
//! ```rust,ignore
//! use clickmeter::model::Message;
//!
//! let msg = Message::new();
//! println!("{}", msg.to_json()?);
//! // {
//! //   "message": "Using ES2015+ syntax",
//! //   "date": "2026-10-18T09:30:00.123Z"
//! // }
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Text carried by [`Message::new`].
pub const DEFAULT_MESSAGE: &str = "Using ES2015+ syntax";

/// A message stamped with the moment it was created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    message: String,
    #[serde(with = "iso_millis")]
    date: DateTime<Utc>,
}

impl Message {
    /// Creates the default message stamped with the current time.
    pub fn new() -> Self {
        Self::with_text(DEFAULT_MESSAGE)
    }

    /// Creates a message with custom text stamped with the current time.
    pub fn with_text(message: impl Into<String>) -> Self {
        Self::at(message, Utc::now())
    }

    /// Creates a message with an explicit timestamp.
    pub fn at(message: impl Into<String>, date: DateTime<Utc>) -> Self {
        Self {
            message: message.into(),
            date,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }

    /// Renders the message as pretty-printed JSON with two-space indentation.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl Default for Message {
    fn default() -> Self {
        Self::new()
    }
}

/// ISO-8601 in UTC with millisecond precision and a `Z` suffix.
mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&date.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|d| d.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
