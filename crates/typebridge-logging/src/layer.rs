//! Tracing layer that records warnings as diagnostics

use crate::diagnostics::{Diagnostic, DiagnosticLog};
use crate::level::LogLevel;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{EnvFilter, Layer};

/// Tracing layer that records every WARN event into a [`DiagnosticLog`]
pub struct DiagnosticLayer {
    log: &'static DiagnosticLog,
}

impl DiagnosticLayer {
    /// Create a layer recording into the global diagnostic log
    pub fn new() -> Self {
        Self {
            log: DiagnosticLog::global(),
        }
    }

    /// Create a layer with a specific log
    pub fn with_log(log: &'static DiagnosticLog) -> Self {
        Self { log }
    }
}

impl Default for DiagnosticLayer {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> Layer<S> for DiagnosticLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        if *metadata.level() != Level::WARN {
            return;
        }

        let mut visitor = FieldVisitor::default();
        event.record(&mut visitor);

        self.log.record(Diagnostic {
            target: metadata.target().to_string(),
            message: visitor.message.unwrap_or_default(),
            fields: visitor.fields,
        });
    }
}

/// Visitor splitting an event into its message and remaining fields
#[derive(Default)]
struct FieldVisitor {
    message: Option<String>,
    fields: Vec<(String, String)>,
}

impl FieldVisitor {
    fn push(&mut self, field: &Field, value: String) {
        if field.name() == "message" {
            self.message = Some(value);
        } else {
            self.fields.push((field.name().to_string(), value));
        }
    }
}

impl Visit for FieldVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        self.push(field, format!("{value:?}"));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.push(field, value.to_string());
    }
}

/// Environment filter for `level`; `RUST_LOG` wins when set and valid.
pub fn env_filter(level: LogLevel) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| level_filter(level))
}

fn level_filter(level: LogLevel) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(level.to_filter().into())
        .parse_lossy("")
}

/// Initialize logging: a stderr fmt layer filtered by [`env_filter`], plus a
/// [`DiagnosticLayer`] that sees warnings regardless of the chosen level.
///
/// Returns `false` when a global subscriber was already installed.
pub fn init_logging(level: LogLevel) -> bool {
    use tracing_subscriber::filter::LevelFilter;
    use tracing_subscriber::prelude::*;

    let fmt = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(env_filter(level));
    let diagnostics = DiagnosticLayer::new().with_filter(LevelFilter::WARN);

    let subscriber = tracing_subscriber::registry().with(fmt).with(diagnostics);

    tracing::subscriber::set_global_default(subscriber).is_ok()
}
