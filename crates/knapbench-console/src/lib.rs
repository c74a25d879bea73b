//! Colorful console output for benchmark runs.
//!
//! Provides a custom `tracing` layer that formats runner events with colors.
//!
//! ## Log Levels
//!
//! - **WARN**: Failed instances
//! - **INFO**: Batch start/end and one line per compared instance
//! - **DEBUG**: Instance start

use num_format::{Locale, ToFormattedString};
use owo_colors::OwoColorize;
use std::io::{self, Write};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;
use std::time::Instant;
use tracing::field::{Field, Visit};
use tracing::level_filters::LevelFilter;
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static INIT: OnceLock<()> = OnceLock::new();
static EPOCH: OnceLock<Instant> = OnceLock::new();
static BATCH_START_NANOS: AtomicU64 = AtomicU64::new(0);

/// Package version for banner display.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Target prefix of the runner's events.
const RUNNER_TARGET: &str = "knapbench_benchmark";

/// How much the console prints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Failures only, no banner.
    Quiet,
    /// Batch lifecycle and one line per instance.
    #[default]
    Normal,
    /// Also instance start lines.
    Verbose,
}

impl Verbosity {
    /// Builds a verbosity from the usual pair of CLI flags. `quiet` wins.
    pub fn from_flags(verbose: bool, quiet: bool) -> Self {
        match (verbose, quiet) {
            (_, true) => Verbosity::Quiet,
            (true, false) => Verbosity::Verbose,
            (false, false) => Verbosity::Normal,
        }
    }

    fn level(self) -> LevelFilter {
        match self {
            Verbosity::Quiet => LevelFilter::WARN,
            Verbosity::Normal => LevelFilter::INFO,
            Verbosity::Verbose => LevelFilter::DEBUG,
        }
    }
}

/// Initializes the benchmark console output.
///
/// Safe to call multiple times - only the first call has effect.
/// Prints the banner (unless quiet) and sets up tracing. `RUST_LOG`
/// overrides the default directive.
pub fn init(verbosity: Verbosity) {
    INIT.get_or_init(|| {
        if verbosity != Verbosity::Quiet {
            print_banner();
        }

        let default_directive = format!("{}={}", RUNNER_TARGET, verbosity.level());
        let filter = EnvFilter::builder()
            .with_default_directive(LevelFilter::WARN.into())
            .parse_lossy(std::env::var("RUST_LOG").unwrap_or(default_directive));

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(BenchmarkConsoleLayer)
            .try_init();
    });
}

// Marks the start of the batch for elapsed time tracking.
fn mark_batch_start() {
    let epoch = EPOCH.get_or_init(Instant::now);
    let nanos = epoch.elapsed().as_nanos() as u64;
    BATCH_START_NANOS.store(nanos, Ordering::Relaxed);
}

// Returns elapsed time since batch start.
fn elapsed_secs() -> f64 {
    let Some(epoch) = EPOCH.get() else {
        return 0.0;
    };
    let start_nanos = BATCH_START_NANOS.load(Ordering::Relaxed);
    let now_nanos = epoch.elapsed().as_nanos() as u64;
    now_nanos.saturating_sub(start_nanos) as f64 / 1_000_000_000.0
}

fn print_banner() {
    let banner = r#"
 _  __                  ____                  _
| |/ /_ __   __ _ _ __ | __ )  ___ _ __   ___| |__
| ' /| '_ \ / _` | '_ \|  _ \ / _ \ '_ \ / __| '_ \
| . \| | | | (_| | |_) | |_) |  __/ | | | (__| | | |
|_|\_\_| |_|\__,_| .__/|____/ \___|_| |_|\___|_| |_|
                 |_|
"#;

    let version_line = format!(
        "                v{} - Exact vs Greedy 0/1 Knapsack\n",
        VERSION
    );

    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{}", banner.bright_cyan());
    let _ = writeln!(stdout, "{}", version_line.bright_white().bold());
    let _ = stdout.flush();
}

/// A tracing layer that formats benchmark events with colors.
pub struct BenchmarkConsoleLayer;

impl<S: Subscriber> Layer<S> for BenchmarkConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if !event.metadata().target().starts_with(RUNNER_TARGET) {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let output = format_event(&visitor);
        if !output.is_empty() {
            let _ = writeln!(io::stdout(), "{}", output);
        }
    }
}

#[derive(Default)]
struct EventVisitor {
    event: Option<String>,
    name: Option<String>,
    instance: Option<String>,
    kind: Option<String>,
    error: Option<String>,
    instance_count: Option<u64>,
    item_count: Option<u64>,
    capacity: Option<u64>,
    exact_value: Option<u64>,
    heuristic_value: Option<u64>,
    compared: Option<u64>,
    failed: Option<u64>,
    heuristic_optimal: Option<u64>,
    duration_ms: Option<u64>,
    exact_ms: Option<f64>,
    heuristic_ms: Option<f64>,
    parallel: Option<bool>,
}

impl EventVisitor {
    fn set_text(&mut self, field: &str, value: String) {
        match field {
            "event" => self.event = Some(value),
            "name" => self.name = Some(value),
            "instance" => self.instance = Some(value),
            "kind" => self.kind = Some(value),
            "error" => self.error = Some(value),
            _ => {}
        }
    }
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let s = format!("{:?}", value);
        self.set_text(field.name(), s.trim_matches('"').to_string());
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        match field.name() {
            "instance_count" => self.instance_count = Some(value),
            "item_count" => self.item_count = Some(value),
            "capacity" => self.capacity = Some(value),
            "exact_value" => self.exact_value = Some(value),
            "heuristic_value" => self.heuristic_value = Some(value),
            "compared" => self.compared = Some(value),
            "failed" => self.failed = Some(value),
            "heuristic_optimal" => self.heuristic_optimal = Some(value),
            "duration_ms" => self.duration_ms = Some(value),
            _ => {}
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record_u64(field, value.max(0) as u64);
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        match field.name() {
            "exact_ms" => self.exact_ms = Some(value),
            "heuristic_ms" => self.heuristic_ms = Some(value),
            _ => {}
        }
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        if field.name() == "parallel" {
            self.parallel = Some(value);
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.set_text(field.name(), value.to_string());
    }
}

fn format_event(v: &EventVisitor) -> String {
    match v.event.as_deref().unwrap_or("") {
        "batch_start" => format_batch_start(v),
        "batch_end" => format_batch_end(v),
        "instance_start" => format_instance_start(v),
        "instance_end" => format_instance_end(v),
        "instance_failed" => format_instance_failed(v),
        _ => String::new(),
    }
}

fn format_elapsed() -> String {
    format!("{:>7.3}s", elapsed_secs())
        .bright_black()
        .to_string()
}

fn format_batch_start(v: &EventVisitor) -> String {
    mark_batch_start();
    let name = v.name.as_deref().unwrap_or("Benchmark");
    let count = v.instance_count.unwrap_or(0);
    let mode = if v.parallel.unwrap_or(false) {
        "parallel"
    } else {
        "sequential"
    };

    format!(
        "{} {} {} │ {} instances │ {}",
        format_elapsed(),
        "▶".bright_green().bold(),
        name.white().bold(),
        count.to_formatted_string(&Locale::en).bright_yellow(),
        mode.bright_black()
    )
}

fn format_instance_start(v: &EventVisitor) -> String {
    let instance = v.instance.as_deref().unwrap_or("?");
    format!(
        "{} {} {}",
        format_elapsed(),
        "·".bright_black(),
        instance.bright_black()
    )
}

fn format_instance_end(v: &EventVisitor) -> String {
    let instance = v.instance.as_deref().unwrap_or("?");
    let items = v.item_count.unwrap_or(0);
    let capacity = v.capacity.unwrap_or(0);
    let exact = v.exact_value.unwrap_or(0);
    let heuristic = v.heuristic_value.unwrap_or(0);

    let icon = if exact == heuristic {
        "✓".bright_green().to_string()
    } else {
        "≈".bright_yellow().to_string()
    };

    format!(
        "{} {} {} │ {} items │ cap {} │ dynamic {} in {} │ greedy {} in {} │ {}",
        format_elapsed(),
        icon,
        instance.white().bold(),
        items.to_formatted_string(&Locale::en).bright_yellow(),
        capacity.to_formatted_string(&Locale::en).bright_yellow(),
        exact.to_formatted_string(&Locale::en).bright_green(),
        format_duration_ms(v.exact_ms.unwrap_or(0.0)).yellow(),
        heuristic.to_formatted_string(&Locale::en).bright_green(),
        format_duration_ms(v.heuristic_ms.unwrap_or(0.0)).yellow(),
        format_ratio(exact, heuristic)
    )
}

fn format_instance_failed(v: &EventVisitor) -> String {
    let instance = v.instance.as_deref().unwrap_or("?");
    let kind = v.kind.as_deref().unwrap_or("error");
    let error = v.error.as_deref().unwrap_or("");

    format!(
        "{} {} {} │ {} │ {}",
        format_elapsed(),
        "✗".bright_red().bold(),
        instance.white().bold(),
        kind.bright_red(),
        error
    )
}

fn format_batch_end(v: &EventVisitor) -> String {
    let name = v.name.as_deref().unwrap_or("Benchmark");
    let compared = v.compared.unwrap_or(0);
    let failed = v.failed.unwrap_or(0);
    let optimal = v.heuristic_optimal.unwrap_or(0);
    let duration = v.duration_ms.unwrap_or(0);

    let failed_str = if failed > 0 {
        failed
            .to_formatted_string(&Locale::en)
            .bright_red()
            .bold()
            .to_string()
    } else {
        failed.to_formatted_string(&Locale::en).white().to_string()
    };

    format!(
        "{} {} {} complete │ {} │ {} compared │ {} failed │ greedy optimal on {}/{}",
        format_elapsed(),
        "■".bright_cyan().bold(),
        name.white().bold(),
        format_duration_ms(duration as f64).yellow(),
        compared.to_formatted_string(&Locale::en).bright_green(),
        failed_str,
        optimal.to_formatted_string(&Locale::en).bright_magenta(),
        compared.to_formatted_string(&Locale::en)
    )
}

fn format_duration_ms(ms: f64) -> String {
    if ms < 1.0 {
        format!("{:.0}µs", ms * 1000.0)
    } else if ms < 1000.0 {
        format!("{:.2}ms", ms)
    } else if ms < 60_000.0 {
        format!("{:.2}s", ms / 1000.0)
    } else {
        let total = ms as u64;
        let mins = total / 60_000;
        let secs = (total % 60_000) / 1000;
        format!("{}m {}s", mins, secs)
    }
}

// Greedy value as a share of the optimum.
fn format_ratio(exact: u64, heuristic: u64) -> String {
    if exact == 0 || exact == heuristic {
        return "100.00%".bright_green().to_string();
    }
    let pct = heuristic as f64 / exact as f64 * 100.0;
    let text = format!("{:.2}%", pct);
    if pct >= 90.0 {
        text.yellow().to_string()
    } else {
        text.bright_red().to_string()
    }
}
