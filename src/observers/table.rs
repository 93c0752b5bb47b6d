//! Table observer for pretty-printing counters.
//!
//! # Feature Flag
//!
//! This module requires the `table` feature.
//!
//! # Examples
//!
//! ```rust,ignore
//! use clickmeter::observers::table::{TableObserver, TableStyle};
//!
//! let counters: Vec<&dyn Observable> = vec![&nav_clicks, &footer_clicks];
//! println!("{}", TableObserver::new().with_style(TableStyle::Rounded).render(counters.into_iter()));
//! // ╭───────────────┬───────────────────────╮
//! // │ Name          │ Value                 │
//! // ├───────────────┼───────────────────────┤
//! // │ nav_clicks    │ 12                    │
//! // │ footer_clicks │ appAnalytic Destroyed │
//! // ╰───────────────┴───────────────────────╯
//! ```
//!
//! Compact mode lays counters out as `name: value` cells in a grid:
//!
//! ```rust,ignore
//! let observer = TableObserver::new().compact(true).columns(3);
//! ```

use crate::counters::Observable;
use crate::observers::display_name;
use tabled::{builder::Builder, settings::Style, Table, Tabled};

/// Available table styles for rendering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TableStyle {
    /// ASCII table with simple characters: +, -, |
    Ascii,
    /// Modern rounded corners (default)
    #[default]
    Rounded,
    /// Sharp corners with box-drawing characters
    Sharp,
    /// Modern style with clean lines
    Modern,
    /// GitHub-flavored Markdown table
    Markdown,
    /// Dots for borders
    Dots,
    /// No borders, just spacing
    Blank,
}

/// Separator style between name and value in compact mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CompactSeparator {
    /// "name: value"
    #[default]
    Colon,
    /// "name = value"
    Equals,
    /// "name → value"
    Arrow,
    /// "name | value"
    Pipe,
    /// "name value"
    Space,
}

impl CompactSeparator {
    /// Returns the separator string.
    pub fn as_str(&self) -> &'static str {
        match self {
            CompactSeparator::Colon => ": ",
            CompactSeparator::Equals => " = ",
            CompactSeparator::Arrow => " → ",
            CompactSeparator::Pipe => " | ",
            CompactSeparator::Space => " ",
        }
    }
}

/// Configuration for the table observer.
#[derive(Debug, Clone)]
pub struct TableConfig {
    /// The style to use for rendering.
    pub style: TableStyle,
    /// Whether to show the header row (only in non-compact mode).
    pub show_header: bool,
    /// Custom title for the table (optional).
    pub title: Option<String>,
    /// Whether to use compact format (name: value in cells).
    pub compact: bool,
    /// Number of columns in compact mode (default: 1).
    pub columns: usize,
    /// Separator between name and value in compact mode.
    pub separator: CompactSeparator,
    /// Placeholder for empty cells in compact mode.
    pub empty_cell: String,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            style: TableStyle::default(),
            show_header: true,
            title: None,
            compact: false,
            columns: 1,
            separator: CompactSeparator::default(),
            empty_cell: String::new(),
        }
    }
}

#[derive(Tabled)]
struct CounterRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Value")]
    value: String,
}

/// An observer that renders counters as a formatted table.
#[derive(Debug, Clone, Default)]
pub struct TableObserver {
    config: TableConfig,
}

impl TableObserver {
    /// Creates a new table observer with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new table observer with the specified configuration.
    pub fn with_config(config: TableConfig) -> Self {
        Self { config }
    }

    pub fn with_style(mut self, style: TableStyle) -> Self {
        self.config.style = style;
        self
    }

    /// Sets whether to show the header row. Ignored in compact mode.
    pub fn with_header(mut self, show: bool) -> Self {
        self.config.show_header = show;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.config.title = Some(title.into());
        self
    }

    pub fn compact(mut self, enabled: bool) -> Self {
        self.config.compact = enabled;
        self
    }

    /// Sets the number of columns in compact mode. Values below 1 become 1.
    pub fn columns(mut self, count: usize) -> Self {
        self.config.columns = count.max(1);
        self
    }

    pub fn separator(mut self, sep: CompactSeparator) -> Self {
        self.config.separator = sep;
        self
    }

    pub fn empty_cell(mut self, placeholder: impl Into<String>) -> Self {
        self.config.empty_cell = placeholder.into();
        self
    }

    fn apply_style(&self, table: &mut Table) {
        match self.config.style {
            TableStyle::Ascii => {
                table.with(Style::ascii());
            }
            TableStyle::Rounded => {
                table.with(Style::rounded());
            }
            TableStyle::Sharp => {
                table.with(Style::sharp());
            }
            TableStyle::Modern => {
                table.with(Style::modern());
            }
            TableStyle::Markdown => {
                table.with(Style::markdown());
            }
            TableStyle::Dots => {
                table.with(Style::dots());
            }
            TableStyle::Blank => {
                table.with(Style::blank());
            }
        }
    }

    fn with_title_line(&self, table: Table) -> String {
        match self.config.title {
            Some(ref title) => format!("{}\n{}", title, table),
            None => table.to_string(),
        }
    }

    fn render_compact<'a>(&self, counters: impl Iterator<Item = &'a dyn Observable>) -> String {
        let cells: Vec<String> = counters
            .map(|c| {
                format!(
                    "{}{}{}",
                    display_name(c.name()),
                    self.config.separator.as_str(),
                    c.value()
                )
            })
            .collect();

        if cells.is_empty() {
            return String::new();
        }

        let cols = self.config.columns;
        let mut builder = Builder::default();
        for chunk in cells.chunks(cols) {
            let mut row: Vec<String> = chunk.to_vec();
            while row.len() < cols {
                row.push(self.config.empty_cell.clone());
            }
            builder.push_record(row);
        }

        let mut table = builder.build();
        self.apply_style(&mut table);
        self.with_title_line(table)
    }

    fn render_standard<'a>(&self, counters: impl Iterator<Item = &'a dyn Observable>) -> String {
        let rows: Vec<CounterRow> = counters
            .map(|c| CounterRow {
                name: display_name(c.name()).to_string(),
                value: c.value().to_string(),
            })
            .collect();

        let mut table = Table::new(&rows);
        self.apply_style(&mut table);

        if !self.config.show_header {
            table.with(tabled::settings::Remove::row(
                tabled::settings::object::Rows::first(),
            ));
        }

        self.with_title_line(table)
    }

    /// Renders the counters as a formatted table string.
    pub fn render<'a>(&self, counters: impl Iterator<Item = &'a dyn Observable>) -> String {
        if self.config.compact {
            self.render_compact(counters)
        } else {
            self.render_standard(counters)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::ClickCounter;
    use crate::events::{Event, EventBus};
    use std::sync::Arc;

    fn two_counters() -> (Arc<EventBus>, ClickCounter, ClickCounter) {
        let bus = Arc::new(EventBus::new());
        let nav = ClickCounter::new(bus.clone()).unwrap().with_name("nav_clicks");
        let footer = ClickCounter::new(bus.clone())
            .unwrap()
            .with_name("footer_clicks");
        for _ in 0..12 {
            bus.dispatch(&Event::click());
        }
        footer.destroy();
        (bus, nav, footer)
    }

    #[test]
    fn test_render_empty() {
        let counters: Vec<&dyn Observable> = vec![];
        let output = TableObserver::new().render(counters.into_iter());
        assert!(!output.is_empty());
    }

    #[test]
    fn test_render_standard() {
        let (_bus, nav, footer) = two_counters();
        let counters: Vec<&dyn Observable> = vec![&nav, &footer];
        let output = TableObserver::new().render(counters.into_iter());

        assert!(output.contains("nav_clicks"));
        assert!(output.contains("12"));
        assert!(output.contains("footer_clicks"));
        assert!(output.contains("appAnalytic Destroyed"));
    }

    #[test]
    fn test_render_without_header() {
        let (_bus, nav, _footer) = two_counters();
        let counters: Vec<&dyn Observable> = vec![&nav];
        let output = TableObserver::new()
            .with_header(false)
            .render(counters.into_iter());
        assert!(!output.contains("Name"));
        assert!(output.contains("nav_clicks"));
    }

    #[test]
    fn test_render_title_and_ascii() {
        let (_bus, nav, _footer) = two_counters();
        let counters: Vec<&dyn Observable> = vec![&nav];
        let output = TableObserver::new()
            .with_style(TableStyle::Ascii)
            .with_title("Clicks")
            .render(counters.into_iter());
        assert!(output.starts_with("Clicks\n+"));
    }

    #[test]
    fn test_render_compact() {
        let (_bus, nav, footer) = two_counters();
        let counters: Vec<&dyn Observable> = vec![&nav, &footer];
        let output = TableObserver::new()
            .compact(true)
            .columns(3)
            .separator(CompactSeparator::Equals)
            .empty_cell("-")
            .render(counters.into_iter());

        assert!(output.contains("nav_clicks = 12"));
        assert!(output.contains("footer_clicks = appAnalytic Destroyed"));
        assert!(output.contains("-"));
    }

    #[test]
    fn test_render_compact_empty() {
        let counters: Vec<&dyn Observable> = vec![];
        let output = TableObserver::new().compact(true).render(counters.into_iter());
        assert!(output.is_empty());
    }

    #[test]
    fn test_columns_min_one() {
        let observer = TableObserver::new().columns(0);
        assert_eq!(observer.config.columns, 1);
    }

    #[test]
    fn test_separator_strings() {
        assert_eq!(CompactSeparator::Colon.as_str(), ": ");
        assert_eq!(CompactSeparator::Arrow.as_str(), " → ");
        assert_eq!(CompactSeparator::Space.as_str(), " ");
    }
}
