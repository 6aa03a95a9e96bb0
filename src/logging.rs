//! Logging initialization
//!
//! Installs a process-wide tracing subscriber with two sinks: a console
//! stream and a daily-rotating log file. Created once at process start;
//! components emit events through the dispatcher and never own a logger.

use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Initialize logging with a console sink plus a daily-rotating file under
/// `log_dir`. Returns the appender guard; dropping it flushes buffered log
/// lines, so the caller must hold it for the lifetime of the process.
pub fn init(log_dir: impl AsRef<Path>) -> WorkerGuard {
    let file_appender = tracing_appender::rolling::daily(log_dir.as_ref(), "scoreprep.log");
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "scoreprep=info".into());

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(file_writer),
        )
        .try_init();

    guard
}
