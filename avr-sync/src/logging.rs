//! Logging setup
//!
//! The library only emits `tracing` events under two targets: `avr_sync`
//! (one `debug!` per issued operation, `warn!` for each refresh that gives
//! up, `info!` with every snapshot) and `avr_telnet` (connect and send at
//! `debug`, every line read from the AVR at `trace`). Hosts without a
//! subscriber of their own can install one here.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Targets whose verbosity the modes and `AVR_LOG_LEVEL` control
const CRATE_TARGETS: [&str; 2] = ["avr_sync", "avr_telnet"];

/// Level for everything outside [`CRATE_TARGETS`]
const OTHER_TARGETS: &str = "warn";

/// How much of the AVR traffic to show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoggingMode {
    /// No subscriber is installed
    Silent,
    /// Refresh outcomes and failures: `info` for both crates
    Development,
    /// Every issued operation and every protocol line: `avr_sync` at
    /// `debug`, `avr_telnet` at `trace`
    Debug,
}

impl LoggingMode {
    /// Filter directives used when no environment override is set
    fn default_directives(self) -> Option<String> {
        match self {
            LoggingMode::Silent => None,
            LoggingMode::Development => Some(crate_directives("info", "info")),
            LoggingMode::Debug => Some(crate_directives("debug", "trace")),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("Failed to initialize tracing subscriber: {0}")]
    TracingInit(String),
}

/// Install a global subscriber for `mode`
///
/// `AVR_LOG_LEVEL` (a bare level such as `debug`) replaces the mode's level
/// for both crates. `RUST_LOG` is used verbatim when `AVR_LOG_LEVEL` is
/// unset. Fails if a global subscriber already exists.
///
/// ```rust,ignore
/// avr_sync::logging::init_logging(LoggingMode::Debug)?;
/// ```
pub fn init_logging(mode: LoggingMode) -> Result<(), LoggingError> {
    let Some(directives) = filter_directives(
        mode,
        std::env::var("AVR_LOG_LEVEL").ok().as_deref(),
        std::env::var("RUST_LOG").ok().as_deref(),
    ) else {
        return Ok(());
    };
    let filter = EnvFilter::try_new(&directives)
        .map_err(|e| LoggingError::TracingInit(format!("bad filter {directives:?}: {e}")))?;

    let result = match mode {
        LoggingMode::Development => Registry::default()
            .with(fmt::layer().with_target(false).compact())
            .with(filter)
            .try_init(),
        // Targets tell the operation traces apart from the wire lines
        _ => Registry::default()
            .with(fmt::layer().with_target(true).with_thread_ids(true))
            .with(filter)
            .try_init(),
    };
    result.map_err(|e| LoggingError::TracingInit(e.to_string()))
}

/// Initialize logging from `AVR_LOG_MODE` ("development" or "debug").
/// Anything else, including unset, means silent.
pub fn init_logging_from_env() -> Result<(), LoggingError> {
    init_logging(mode_from_env(std::env::var("AVR_LOG_MODE").ok().as_deref()))
}

/// Check if a global subscriber has been installed
pub fn is_initialized() -> bool {
    tracing::dispatcher::has_been_set()
}

fn mode_from_env(value: Option<&str>) -> LoggingMode {
    match value.map(str::to_ascii_lowercase).as_deref() {
        Some("development") => LoggingMode::Development,
        Some("debug") => LoggingMode::Debug,
        _ => LoggingMode::Silent,
    }
}

/// Directives for `mode`; `None` when nothing should be installed
fn filter_directives(
    mode: LoggingMode,
    avr_level: Option<&str>,
    rust_log: Option<&str>,
) -> Option<String> {
    let defaults = mode.default_directives()?;
    match (avr_level, rust_log) {
        (Some(level), _) => Some(crate_directives(level, level)),
        (None, Some(rust_log)) => Some(rust_log.to_string()),
        (None, None) => Some(defaults),
    }
}

fn crate_directives(sync_level: &str, telnet_level: &str) -> String {
    let [sync, telnet] = CRATE_TARGETS;
    format!("{OTHER_TARGETS},{sync}={sync_level},{telnet}={telnet_level}")
}
