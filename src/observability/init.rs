//! Tracing subscriber setup.

use super::file_writer::RotatingFile;
use crate::Config;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter when neither `RUST_LOG` nor `trace_level` is set.
const DEFAULT_LEVEL: &str = "info";

/// Builds the filter: `RUST_LOG` first, then `config.trace_level`, then `info`.
#[must_use]
pub fn env_filter(config: &Config) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = config.trace_level.as_deref().unwrap_or(DEFAULT_LEVEL);
        EnvFilter::try_new(level).unwrap_or_else(|e| {
            eprintln!("invalid trace level '{level}': {e}, using '{DEFAULT_LEVEL}'");
            EnvFilter::new(DEFAULT_LEVEL)
        })
    })
}

/// Installs the global tracing subscriber.
///
/// Writes to `config.log_file` through a [`RotatingFile`] when set, otherwise to
/// stderr. Creates the log directory if needed. Safe to call more than once:
/// only the first call installs a subscriber, and failures are reported on
/// stderr rather than returned, since logging is optional.
///
/// # Example
///
/// ```rust
/// use photosearch::observability::init_tracing;
/// use photosearch::Config;
///
/// let config = Config {
///     trace_level: Some("debug".to_string()),
///     ..Default::default()
/// };
///
/// init_tracing(&config);
/// tracing::debug!("tracing is now active");
/// ```
pub fn init_tracing(config: &Config) {
    let filter = env_filter(config);

    let installed = match &config.log_file {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                if let Err(e) = std::fs::create_dir_all(parent) {
                    eprintln!("cannot create log directory {}: {e}", parent.display());
                    return;
                }
            }

            let layer = fmt::layer()
                .with_writer(RotatingFile::new(path.clone()))
                .with_ansi(false)
                .with_target(true);
            tracing_subscriber::registry()
                .with(filter)
                .with(layer)
                .try_init()
        }
        None => {
            let layer = fmt::layer().with_writer(std::io::stderr).with_target(true);
            tracing_subscriber::registry()
                .with(filter)
                .with(layer)
                .try_init()
        }
    };

    if installed.is_ok() {
        tracing::debug!(log_file = ?config.log_file, "tracing initialized");
    }
}
