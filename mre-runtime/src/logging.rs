//! Structured logging, grounded on how `freddiehaddad-oxidized` wires
//! `tracing` + `tracing-subscriber` + `tracing-appender`: an `EnvFilter`
//! controls verbosity (here, via `AER_LOG` rather than `RUST_LOG`, since a
//! mod author configuring log levels for a game mod is unlikely to know the
//! latter exists), and a non-blocking file appender keeps the host's main
//! thread off the I/O path.
//!
//! Every line still carries the `[aer][<mod-name or "mre">]` tag from
//! SPEC_FULL.md §4.8 as a `tracing` field, so the wire format a log
//! aggregator sees is unchanged even though the mechanism producing it is
//! not hand-rolled `println!`.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::context;

/// Must be kept alive for the lifetime of the process; dropping it stops
/// the background writer thread and silently discards buffered log lines.
/// Stored inside the [`crate::runtime::Runtime`] singleton.
pub struct LoggingGuard(#[allow(dead_code)] WorkerGuard);

/// Initializes the global `tracing` subscriber: an `EnvFilter` read from
/// `AER_LOG` (default `info`), formatted output tagged with the mod
/// context, and a daily-rotating file appender under `<log_dir>/aer`.
/// `config_log_level` — `aer/conf.toml`'s `mre.logLevel` — wins over
/// `AER_LOG` when both are present, since the config file travels with the
/// mod roster while the environment variable does not.
///
/// Safe to call more than once per process (a second mod loader restart
/// inside the same host, say); subsequent calls are no-ops.
pub fn init(log_dir: &Path, config_log_level: Option<&str>) -> LoggingGuard {
    let file_appender = tracing_appender::rolling::daily(log_dir, "aer.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter = config_log_level
        .map(EnvFilter::new)
        .or_else(|| EnvFilter::try_from_env("AER_LOG").ok())
        .unwrap_or_else(|| EnvFilter::new("info"));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(non_blocking)
        .with_target(false)
        .finish();

    // A host may dlopen-then-dlclose-then-reopen the MRE within one process
    // (mod-manager "reload" flows); tolerate the subscriber already being
    // set rather than panicking.
    let _ = tracing::subscriber::set_global_default(subscriber);

    LoggingGuard(guard)
}

fn tag() -> String {
    format!("[aer][{}]", context::current_mod_name())
}

/// Logs an informational message tagged with the current mod context.
pub fn log_info(function: &str, message: &str) {
    tracing::info!(target: "aer", "{} ({}) {}", tag(), function, message);
}

/// Logs a warning tagged with the current mod context.
pub fn log_warning(function: &str, message: &str) {
    tracing::warn!(target: "aer", "{} ({}) {}", tag(), function, message);
}

/// Logs an error tagged with the current mod context.
pub fn log_error(function: &str, message: &str) {
    tracing::error!(target: "aer", "{} ({}) {}", tag(), function, message);
}
