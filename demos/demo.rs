//! Demo application: simulate clicks, optionally tear the counter down, and
//! export the result.
//!
//! Run with:
//! ```bash
//! cargo run --example demo --features demo -- --help
//! RUST_LOG=clickmeter=debug cargo run --example demo --features demo -- --threads 4 --destroy
//! ```

use clap::{Parser, ValueEnum};
use clickmeter::analytics::ClickCounter;
use clickmeter::config::Config;
use clickmeter::counters::Observable;
use clickmeter::events::{Event, EventBus, Modifiers};
use clickmeter::model::Message;
use clickmeter::observers::json::JsonObserver;
use clickmeter::observers::prometheus::PrometheusObserver;
use clickmeter::observers::table::{TableObserver, TableStyle};
use std::process::ExitCode;
use std::sync::Arc;
use std::thread;
use tracing::{error, info};
use tracing_subscriber::filter::EnvFilter;

/// Output format for the counter.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Two-column table
    Table,
    /// Compact `name: value` grid
    Compact,
    /// JSON
    Json,
    /// Prometheus exposition format
    Prometheus,
}

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum StyleChoice {
    Ascii,
    #[default]
    Rounded,
    Sharp,
    Modern,
    Markdown,
}

impl From<StyleChoice> for TableStyle {
    fn from(choice: StyleChoice) -> Self {
        match choice {
            StyleChoice::Ascii => TableStyle::Ascii,
            StyleChoice::Rounded => TableStyle::Rounded,
            StyleChoice::Sharp => TableStyle::Sharp,
            StyleChoice::Modern => TableStyle::Modern,
            StyleChoice::Markdown => TableStyle::Markdown,
        }
    }
}

/// Click analytics demo.
///
/// Configuration is read from NODE_ENV, API_KEY, VERSION and
/// CLICKMETER_COUNTER_NAME; logging follows RUST_LOG.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    format: OutputFormat,

    /// Table style (for table/compact formats)
    #[arg(short, long, value_enum, default_value = "rounded")]
    style: StyleChoice,

    /// Number of threads dispatching clicks
    #[arg(short, long, default_value = "1")]
    threads: usize,

    /// Clicks dispatched per thread
    #[arg(short, long, default_value = "3")]
    clicks: usize,

    /// Destroy the counter after the simulation
    #[arg(long)]
    destroy: bool,

    /// Clicks dispatched after destroying (they must not be counted)
    #[arg(long, default_value = "0")]
    clicks_after: usize,

    /// Pretty print JSON output
    #[arg(long)]
    pretty: bool,

    /// Prometheus metric namespace
    #[arg(long, default_value = "site")]
    namespace: String,

    /// Also print the timestamped message model
    #[arg(long)]
    message: bool,
}

fn init_logging() {
    let filter = EnvFilter::builder()
        .with_default_directive(tracing::Level::INFO.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

fn simulate_clicks(bus: &Arc<EventBus>, threads: usize, clicks: usize) {
    let handles: Vec<_> = (0..threads)
        .map(|t| {
            let bus = Arc::clone(bus);
            thread::spawn(move || {
                for i in 0..clicks {
                    let event = Event::click()
                        .with_target(format!("#button-{}", i % 4))
                        .at((t * 10) as f64, i as f64)
                        .with_modifiers(Modifiers {
                            shift: i % 3 == 0,
                            ..Modifiers::default()
                        });
                    bus.dispatch(&event);
                }
            })
        })
        .collect();

    for handle in handles {
        if handle.join().is_err() {
            error!("click thread panicked");
        }
    }
}

fn render(args: &Args, config: &Config, counters: Vec<&dyn Observable>) -> String {
    let result = match args.format {
        OutputFormat::Table => Ok(TableObserver::new()
            .with_style(args.style.into())
            .with_title(format!("clickmeter {} ({})", config.version, config.mode))
            .render(counters.into_iter())),
        OutputFormat::Compact => Ok(TableObserver::new()
            .compact(true)
            .with_style(args.style.into())
            .render(counters.into_iter())),
        OutputFormat::Json => JsonObserver::new()
            .pretty(args.pretty)
            .wrap_in_snapshot(true)
            .include_timestamp(true)
            .to_json(counters.into_iter()),
        OutputFormat::Prometheus => PrometheusObserver::new()
            .with_namespace(&args.namespace)
            .with_const_label("version", &config.version)
            .with_help(&config.counter_name, "Clicks observed since start-up")
            .render(counters.into_iter()),
    };
    result.unwrap_or_else(|e| format!("Error: {}", e))
}

fn main() -> ExitCode {
    init_logging();
    let args = Args::parse();
    let config = Config::from_env();
    info!(?config, "starting");

    let bus = Arc::new(EventBus::new());
    let counter = match ClickCounter::new(bus.clone()) {
        Ok(counter) => counter.with_name(config.counter_name.clone()),
        Err(e) => {
            error!("cannot attach click counter: {}", e);
            return ExitCode::FAILURE;
        }
    };

    simulate_clicks(&bus, args.threads, args.clicks);
    info!(count = %counter.count(), "simulation complete");

    if args.destroy {
        counter.destroy();
        simulate_clicks(&bus, 1, args.clicks_after);
    }

    let counters: Vec<&dyn Observable> = vec![&counter];
    println!("{}", render(&args, &config, counters));

    if args.message {
        match Message::new().to_json() {
            Ok(json) => println!("{}", json),
            Err(e) => error!("cannot render message: {}", e),
        }
    }

    ExitCode::SUCCESS
}
