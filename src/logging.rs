//! Logging bootstrap for the sidecar.
//!
//! stdout carries the IPC protocol, so every log line goes to stderr.
//! Events are `key=value` metadata; instants and assignment names stay out
//! of anything at `info` or above.

use anyhow::Context;
use flexi_logger::{Logger, LoggerHandle, WriteMode};
use log::info;
use once_cell::sync::OnceCell;

static LOGGER: OnceCell<LoggerHandle> = OnceCell::new();

/// Starts the stderr logger once per process. Later calls are no-ops.
pub fn init_logging(level: &str) -> anyhow::Result<()> {
    LOGGER.get_or_try_init(|| -> anyhow::Result<LoggerHandle> {
        let handle = Logger::try_with_str(level)
            .with_context(|| format!("invalid log level `{}`", level))?
            .log_to_stderr()
            .format_for_stderr(flexi_logger::detailed_format)
            .write_mode(WriteMode::Direct)
            .start()
            .context("failed to start logger")?;

        info!(
            "event=app_start module=sidecar status=ok platform={} version={}",
            std::env::consts::OS,
            env!("CARGO_PKG_VERSION")
        );
        Ok(handle)
    })?;
    Ok(())
}
