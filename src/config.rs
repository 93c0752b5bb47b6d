//! Runtime configuration read from the environment.
//!
//! | Variable | Field | Default |
//! |----------|-------|---------|
//! | `NODE_ENV` | [`Config::mode`] | `Development` unless exactly `production` |
//! | `API_KEY` | [`Config::api_key`] | unset |
//! | `VERSION` | [`Config::version`] | [`DEFAULT_VERSION`] |
//! | `CLICKMETER_COUNTER_NAME` | [`Config::counter_name`] | `clicks` |

use std::fmt;

use crate::analytics;

/// Build version reported when `VERSION` is not set.
pub const DEFAULT_VERSION: &str = "5fa3b9";

/// Whether the application runs as a development or a production build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Development,
    Production,
}

impl Mode {
    /// Any value other than `production` means development.
    pub fn from_node_env(value: Option<&str>) -> Self {
        match value {
            Some("production") => Mode::Production,
            _ => Mode::Development,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Development => "development",
            Mode::Production => "production",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Application settings.
#[derive(Clone, PartialEq, Eq)]
pub struct Config {
    pub mode: Mode,
    pub api_key: Option<String>,
    pub version: String,
    pub counter_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mode: Mode::default(),
            api_key: None,
            version: DEFAULT_VERSION.to_string(),
            counter_name: analytics::DEFAULT_NAME.to_string(),
        }
    }
}

impl Config {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through `lookup`, which maps a variable name
    /// to its value.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.is_empty());
        let defaults = Self::default();

        Self {
            mode: Mode::from_node_env(lookup("NODE_ENV").as_deref()),
            api_key: non_empty("API_KEY"),
            version: non_empty("VERSION").unwrap_or(defaults.version),
            counter_name: non_empty("CLICKMETER_COUNTER_NAME").unwrap_or(defaults.counter_name),
        }
    }

    pub fn is_dev(&self) -> bool {
        self.mode == Mode::Development
    }
}

impl fmt::Debug for Config {
    // Keeps the API key out of logs.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("mode", &self.mode)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("version", &self.version)
            .field("counter_name", &self.counter_name)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[]));
        assert_eq!(config, Config::default());
        assert!(config.is_dev());
        assert_eq!(config.version, DEFAULT_VERSION);
        assert_eq!(config.counter_name, "clicks");
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_production_mode() {
        let config = Config::from_lookup(lookup(&[("NODE_ENV", "production")]));
        assert_eq!(config.mode, Mode::Production);
        assert!(!config.is_dev());
    }

    #[test]
    fn test_other_node_env_is_development() {
        for value in ["development", "test", "Production", ""] {
            let config = Config::from_lookup(lookup(&[("NODE_ENV", value)]));
            assert_eq!(config.mode, Mode::Development, "NODE_ENV={value:?}");
        }
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("API_KEY", "secret"),
            ("VERSION", "abc123"),
            ("CLICKMETER_COUNTER_NAME", "landing_clicks"),
        ]));
        assert_eq!(config.api_key.as_deref(), Some("secret"));
        assert_eq!(config.version, "abc123");
        assert_eq!(config.counter_name, "landing_clicks");
    }

    #[test]
    fn test_empty_values_fall_back() {
        let config = Config::from_lookup(lookup(&[("API_KEY", ""), ("VERSION", "")]));
        assert!(config.api_key.is_none());
        assert_eq!(config.version, DEFAULT_VERSION);
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = Config::from_lookup(lookup(&[("API_KEY", "secret")]));
        let debug = format!("{:?}", config);
        assert!(!debug.contains("secret"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_mode_display() {
        assert_eq!(Mode::Development.to_string(), "development");
        assert_eq!(Mode::Production.to_string(), "production");
    }
}
