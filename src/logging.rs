//! File logging via tracing
//!
//! The terminal belongs to the UI, so events go to a daily rolling file.
//! The filter comes from `POKELIST_LOG` (e.g. `POKELIST_LOG=debug`).

use std::io;
use std::path::{Path, PathBuf};

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub const LOG_ENV: &str = "POKELIST_LOG";
const LOG_FILE_PREFIX: &str = "pokelist.log";

pub fn init(log_dir: &Path) -> io::Result<()> {
    std::fs::create_dir_all(log_dir)?;
    let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir, LOG_FILE_PREFIX);

    let env_filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("pokelist=info,warn"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_file(true)
                .with_line_number(true),
        )
        .try_init()
        .map_err(io::Error::other)?;

    tracing::info!(log_dir = %log_dir.display(), "pokelist starting");
    Ok(())
}

/// `<data_local_dir>/pokelist/logs`, or `./logs` when the platform has none.
pub fn default_log_dir() -> PathBuf {
    dirs_next::data_local_dir()
        .map(|base| base.join("pokelist").join("logs"))
        .unwrap_or_else(|| PathBuf::from("logs"))
}
