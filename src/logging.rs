//! Tracing setup
//!
//! Logs always go to a rolling file through a non-blocking writer. Stdout can
//! mirror the file in the same format, see [`stdout_enabled`].

use crate::config::AppConfig;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::RollingFileAppender;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// How often the log file rolls over. Unknown names never roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogRotation {
    Hourly,
    Daily,
    Never,
}

impl LogRotation {
    pub fn parse(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "hourly" => Self::Hourly,
            "daily" => Self::Daily,
            _ => Self::Never,
        }
    }

    fn appender(self, dir: &str, file: &str) -> RollingFileAppender {
        match self {
            Self::Hourly => tracing_appender::rolling::hourly(dir, file),
            Self::Daily => tracing_appender::rolling::daily(dir, file),
            Self::Never => tracing_appender::rolling::never(dir, file),
        }
    }
}

/// Filter used when `RUST_LOG` is unset. sqlx logs every statement at info.
pub fn filter_directive(config: &AppConfig) -> String {
    format!("{},sqlx=warn", config.log_level)
}

/// Whether records are mirrored to stdout.
pub fn stdout_enabled(config: &AppConfig) -> bool {
    config.log_stdout.unwrap_or(!config.use_json)
}

/// Install the global subscriber. Keep the returned guard alive for the
/// lifetime of the process or buffered file output is lost.
pub fn init_logging(config: &AppConfig) -> WorkerGuard {
    let file_appender =
        LogRotation::parse(&config.rotation).appender(&config.log_dir, &config.log_file);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(config)));

    let to_stdout = stdout_enabled(config);

    // Stdout uses the same format as the file
    let (json_file, json_stdout, text_file, text_stdout) = if config.use_json {
        let file = fmt::layer()
            .json()
            .with_target(true)
            .with_writer(non_blocking)
            .with_ansi(false);
        let stdout = to_stdout.then(|| fmt::layer().json().with_target(true).with_ansi(false));
        (Some(file), stdout, None, None)
    } else {
        let file = fmt::layer()
            .with_target(false)
            .with_writer(non_blocking)
            .with_ansi(false);
        let stdout = to_stdout.then(|| fmt::layer().with_target(false).with_ansi(true));
        (None, None, Some(file), stdout)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(json_file)
        .with(json_stdout)
        .with(text_file)
        .with(text_stdout)
        .init();

    guard
}
