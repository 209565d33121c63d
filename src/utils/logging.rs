use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Initialize the logging system with the specified log level.
///
/// # Arguments
///
/// * `log_level` - The desired log filter (e.g. "info", "debug", "catalog=debug,tower_http=info")
/// * `with_file` - Whether to also log to a daily rotating file in the "logs" directory.
///
/// # Returns
///
/// The guard of the non-blocking file writer when file logging is enabled. Keep
/// it alive until shutdown so buffered lines get flushed.
pub fn init_logging(log_level: &str, with_file: bool) -> Option<WorkerGuard> {
    let filter = match EnvFilter::try_new(log_level) {
        Ok(f) => f,
        Err(_) => {
            eprintln!("Invalid log level '{}', defaulting to 'info'", log_level);
            EnvFilter::new("info")
        }
    };

    let stdout_layer = fmt::layer().with_line_number(true).with_target(true);

    if with_file {
        let file_appender = RollingFileAppender::new(Rotation::DAILY, "logs", "catalog.log");
        let (writer, guard) = tracing_appender::non_blocking(file_appender);

        let file_layer = fmt::layer()
            .with_line_number(true)
            .with_ansi(false)
            .with_writer(writer);

        tracing_subscriber::registry()
            .with(filter)
            .with(stdout_layer)
            .with(file_layer)
            .init();
        Some(guard)
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(stdout_layer)
            .init();
        None
    }
}
