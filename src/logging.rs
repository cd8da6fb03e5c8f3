use anyhow::Context;
use std::fs::File;
use std::sync::Mutex;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Name of the environment variable holding the path to log to.  Logging is
/// off when it is unset, as anything written to the terminal would garble
/// the calendar.
const LOG_PATH_VAR: &str = "CALSHEET_LOG";

/// Name of the environment variable holding the log filter directives
const LOG_FILTER_VAR: &str = "CALSHEET_LOG_LEVEL";

pub(crate) fn init_tracing() -> anyhow::Result<()> {
    let Some(log_path) = std::env::var_os(LOG_PATH_VAR) else {
        return Ok(());
    };
    let filter = EnvFilter::try_from_env(LOG_FILTER_VAR)
        .unwrap_or_else(|_| EnvFilter::new("calsheet=debug"));
    let file = File::create(&log_path)
        .with_context(|| format!("failed to create log file {}", log_path.to_string_lossy()))?;
    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(true)
                .with_level(true),
        )
        .try_init()
        .context("failed to install log subscriber")?;
    Ok(())
}
