use std::fs;
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Default filter when `RUST_LOG` is not set
const DEFAULT_FILTER: &str = "agenda_feed=info,warn";

/// Initializes console logging, plus a daily-rolling JSON log file when
/// `log_dir` is given.
///
/// The returned guard flushes the file writer on drop; keep it alive for the
/// lifetime of the process.
pub fn init_logging(log_dir: Option<&Path>) -> Option<WorkerGuard> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let console_layer = fmt::layer().with_target(true).with_writer(std::io::stdout);

    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            // Fall back to console-only logging if the directory is unusable
            match fs::create_dir_all(dir) {
                Ok(()) => {
                    let file_appender = tracing_appender::rolling::daily(dir, "agenda_feed.log");
                    let (writer, guard) = tracing_appender::non_blocking(file_appender);
                    (Some(fmt::layer().json().with_writer(writer)), Some(guard))
                }
                Err(e) => {
                    eprintln!("Could not create log directory {}: {e}", dir.display());
                    (None, None)
                }
            }
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(console_layer)
        .init();

    guard
}
