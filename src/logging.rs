use anyhow::Result;
use std::path::Path;
use std::time::{Duration, Instant};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Initialize structured logging system.
///
/// `RUST_LOG` takes precedence over `log_level`. When `log_file` is set, a
/// daily-rolling file layer is added next to it; `format == "json"` makes
/// that layer emit JSON. The returned guard must outlive the program's
/// logging or buffered file output is lost.
pub fn init_logging(
    log_level: Option<&str>,
    log_file: Option<&Path>,
    format: &str,
) -> Result<Option<WorkerGuard>> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| {
            let level = log_level.unwrap_or("info");
            EnvFilter::try_new(level)
        })
        .map_err(|e| anyhow::anyhow!("Failed to create log filter: {}", e))?;

    let registry = Registry::default().with(env_filter);

    let console_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .with_target(true);

    let guard = if let Some(log_path) = log_file {
        let directory = log_path.parent().unwrap_or_else(|| Path::new("."));
        let file_name = log_path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("bot.log");
        let file_appender = rolling::daily(directory, file_name);
        let (non_blocking_appender, guard) = non_blocking(file_appender);

        let file_layer = tracing_subscriber::fmt::layer()
            .with_writer(non_blocking_appender)
            .with_ansi(false)
            .with_target(true);

        if format == "json" {
            registry
                .with(console_layer)
                .with(file_layer.json())
                .try_init()?;
        } else {
            registry.with(console_layer).with(file_layer).try_init()?;
        }
        Some(guard)
    } else {
        registry.with(console_layer).try_init()?;
        None
    };

    info!("Logging system initialized");
    Ok(guard)
}

/// Traces how long a store operation took.
pub struct OperationTimer {
    operation: &'static str,
    target: &'static str,
    start: Instant,
}

impl OperationTimer {
    /// Start timing `operation` against `target` (usually a collection name)
    #[must_use]
    pub fn new(operation: &'static str, target: &'static str) -> Self {
        Self {
            operation,
            target,
            start: Instant::now(),
        }
    }

    /// Stop the timer and return the elapsed time
    pub fn finish(self) -> Duration {
        let elapsed = self.start.elapsed();
        tracing::debug!(
            operation = self.operation,
            target = self.target,
            duration_ms = elapsed.as_millis(),
            "Operation completed"
        );
        elapsed
    }
}
