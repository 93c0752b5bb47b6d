//! Prometheus observer built on the official `prometheus` crate.
//!
//! # Feature Flag
//!
//! This module requires the `prometheus` feature.
//!
//! Live counters are exported as `counter` metrics by default. A destroyed
//! counter has no count left to report, so it is omitted from the output.
//!
//! # Examples
//!
//! ```rust,ignore
//! use clickmeter::observers::prometheus::PrometheusObserver;
//!
//! let output = PrometheusObserver::new()
//!     .with_namespace("site")
//!     .with_const_label("page", "landing")
//!     .with_help("clicks", "Clicks observed on the page")
//!     .render(counters.into_iter())?;
//! // # HELP site_clicks Clicks observed on the page
//! // # TYPE site_clicks counter
//! // site_clicks{page="landing"} 12
//! ```

use crate::counters::{CounterValue, Observable};
use crate::observers::{display_name, PrometheusError, Result};
use prometheus::{Encoder, IntCounter, IntGauge, Opts, Registry, TextEncoder};
use std::collections::HashMap;
use tracing::trace;

/// Prometheus metric type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MetricType {
    /// A cumulative metric that only ever goes up.
    #[default]
    Counter,
    /// A value that can go up and down.
    Gauge,
}

/// Configuration for a specific metric.
#[derive(Debug, Clone, Default)]
pub struct MetricConfig {
    pub metric_type: MetricType,
    pub help: Option<String>,
}

/// Observer that renders counters in the Prometheus text exposition format.
#[derive(Debug, Clone, Default)]
pub struct PrometheusObserver {
    namespace: Option<String>,
    subsystem: Option<String>,
    const_labels: HashMap<String, String>,
    metric_configs: HashMap<String, MetricConfig>,
    default_type: MetricType,
}

impl PrometheusObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the namespace prepended to every metric name.
    pub fn with_namespace(mut self, namespace: &str) -> Self {
        self.namespace = Some(namespace.to_string());
        self
    }

    /// Sets the subsystem placed between namespace and metric name.
    pub fn with_subsystem(mut self, subsystem: &str) -> Self {
        self.subsystem = Some(subsystem.to_string());
        self
    }

    /// Adds a label applied to every metric.
    pub fn with_const_label(mut self, name: &str, value: &str) -> Self {
        self.const_labels.insert(name.to_string(), value.to_string());
        self
    }

    pub fn with_default_type(mut self, metric_type: MetricType) -> Self {
        self.default_type = metric_type;
        self
    }

    pub fn with_metric_config(mut self, name: &str, config: MetricConfig) -> Self {
        self.metric_configs.insert(name.to_string(), config);
        self
    }

    pub fn with_type(mut self, name: &str, metric_type: MetricType) -> Self {
        self.metric_configs
            .entry(name.to_string())
            .or_default()
            .metric_type = metric_type;
        self
    }

    pub fn with_help(mut self, name: &str, help: &str) -> Self {
        self.metric_configs
            .entry(name.to_string())
            .or_default()
            .help = Some(help.to_string());
        self
    }

    /// Sanitizes a metric name to match `[a-zA-Z_:][a-zA-Z0-9_:]*`.
    fn sanitize_name(name: &str) -> String {
        let mut result = String::with_capacity(name.len());
        for c in name.chars() {
            if c.is_ascii_alphanumeric() || c == '_' || c == ':' {
                result.push(c);
            } else if c == '-' || c == '.' || c == ' ' {
                result.push('_');
            }
        }
        if result.is_empty() {
            result.push_str("unnamed");
        }
        if result.starts_with(|c: char| c.is_ascii_digit()) {
            result.insert(0, '_');
        }
        result
    }

    fn build_full_name(&self, name: &str) -> String {
        let sanitized = Self::sanitize_name(name);
        match (&self.namespace, &self.subsystem) {
            (Some(ns), Some(ss)) => format!("{}_{}_{}", ns, ss, sanitized),
            (Some(ns), None) => format!("{}_{}", ns, sanitized),
            (None, Some(ss)) => format!("{}_{}", ss, sanitized),
            (None, None) => sanitized,
        }
    }

    /// Renders counters to Prometheus exposition format.
    ///
    /// A fresh registry is built for every call.
    ///
    /// # Errors
    ///
    /// Returns an error if metric creation, registration, or encoding fails,
    /// e.g. when two counters map to the same metric name.
    pub fn render<'a>(&self, counters: impl Iterator<Item = &'a dyn Observable>) -> Result<String> {
        let registry = Registry::new();

        for counter in counters {
            let raw_name = display_name(counter.name());
            let CounterValue::Count(value) = counter.value() else {
                trace!(name = raw_name, "skipping destroyed counter");
                continue;
            };

            let config = self.metric_configs.get(raw_name);
            let metric_type = config.map(|c| c.metric_type).unwrap_or(self.default_type);
            let help = config
                .and_then(|c| c.help.clone())
                .unwrap_or_else(|| format!("{} metric", raw_name));
            let opts = Opts::new(self.build_full_name(raw_name), help)
                .const_labels(self.const_labels.clone());

            match metric_type {
                MetricType::Counter => {
                    let metric = IntCounter::with_opts(opts)?;
                    metric.inc_by(value);
                    registry.register(Box::new(metric))?;
                }
                MetricType::Gauge => {
                    let metric = IntGauge::with_opts(opts)?;
                    metric.set(i64::try_from(value).unwrap_or(i64::MAX));
                    registry.register(Box::new(metric))?;
                }
            }
        }

        let mut buffer = Vec::new();
        TextEncoder::new()
            .encode(&registry.gather(), &mut buffer)
            .map_err(|e| PrometheusError::EncodeError(e.to_string()))?;
        Ok(String::from_utf8(buffer)?)
    }

    /// Renders counters to bytes, ready for an HTTP response body.
    pub fn render_bytes<'a>(
        &self,
        counters: impl Iterator<Item = &'a dyn Observable>,
    ) -> Result<Vec<u8>> {
        Ok(self.render(counters)?.into_bytes())
    }
}
