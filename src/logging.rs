//! Logging setup for the `tabscope` binary.
//!
//! Library code only emits `tracing` events; installing a subscriber is
//! left to the binary. Output always goes to the console and, when a log
//! directory is given, to a daily-rotated file as well.
//!
//! ```no_run
//! tabscope::logging::init("info", None).expect("Failed to initialize logging");
//! tracing::info!("App started");
//! ```

use anyhow::{Context as _, Result};
use std::path::Path;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    EnvFilter, Layer as _, fmt, layer::SubscriberExt as _, util::SubscriberInitExt as _,
};

/// Installs the global subscriber.
///
/// `default_level` applies when `RUST_LOG` is unset. With `log_dir`, logs
/// are also written to `tabscope.<date>.log` there, keeping 10 files.
///
/// # Errors
///
/// Returns error if the filter directive is invalid, the log directory
/// cannot be created, or a subscriber is already installed.
pub fn init(default_level: &str, log_dir: Option<&Path>) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .context("Failed to create env filter")?;

    let stderr_layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .boxed();

    let file_layer = match log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create log directory: {}", dir.display()))?;
            let appender = RollingFileAppender::builder()
                .rotation(Rotation::DAILY)
                .max_log_files(10)
                .filename_prefix("tabscope")
                .filename_suffix("log")
                .build(dir)
                .context("Failed to create file appender")?;
            Some(
                fmt::layer()
                    .with_target(true)
                    .with_line_number(true)
                    .with_file(true)
                    .with_ansi(false)
                    .with_writer(appender)
                    .boxed(),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    if let Some(dir) = log_dir {
        tracing::debug!("Logging to {}", dir.display());
    }
    Ok(())
}
