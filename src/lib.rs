//! photosearch: debounced photo search over a public tagged-photo feed.
//!
//! The crate provides the core behind a search-as-you-type photo grid:
//! - A query source that accepts every keystroke
//! - A controller that debounces edits, drops repeats, short-circuits blank
//!   queries and cancels stale lookups when a newer query arrives
//! - A fetcher that performs one HTTP lookup and classifies the outcome into a
//!   user-facing result
//! - A selection holder for handing a photo to a detail view
//!
//! Rendering is left to the consumer, which observes `tokio::sync::watch`
//! receivers and re-renders on change.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Consumer (UI, main.rs demo)                        │  ← set_query / select_photo
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │
//! │  - SearchSession: observable query/result/selection │
//! │  - Controller task: timers, fetch tasks             │
//! │  - handle_event: pure pipeline state machine        │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Feed Layer (feed/)                                 │
//! │  - Fetcher: one lookup → FetchResult                │
//! │  - FeedSource: HTTP GET via reqwest                 │
//! │  - models / mapper: JSON → Photo                    │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain (domain/)        Observability              │
//! │  - Photo, FetchResult    - tracing subscriber       │
//! │  - error types           - rotating log file        │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: Search controller and session
//! - [`domain`]: Core types (Photo, FetchResult, errors)
//! - [`feed`]: Feed transport, mapping and classification
//! - [`observability`]: Tracing setup
//!
//! # Example
//!
//! ```no_run
//! use photosearch::{initialize, Config, FetchResult};
//!
//! #[tokio::main]
//! async fn main() -> photosearch::Result<()> {
//!     let session = initialize(&Config::default())?;
//!     let mut results = session.subscribe_results();
//!
//!     session.set_query("sunset")?;
//!     let result = results
//!         .wait_for(|r| !matches!(r, FetchResult::Idle | FetchResult::Loading))
//!         .await
//!         .map(|r| r.clone())
//!         .unwrap_or_default();
//!
//!     for photo in result.photos() {
//!         println!("{} by {}", photo.title, photo.author_name());
//!     }
//!
//!     session.dispose().await;
//!     Ok(())
//! }
//! ```
//!
//! # Key Design Decisions
//!
//! ## Cancel-and-replace by generation
//!
//! Every debounced query gets a new generation number. Starting a fetch for a
//! newer generation aborts the older fetch task, and a completion is accepted
//! only if its generation is still current, so a slow response for an old query
//! can never overwrite a newer result.
//!
//! ## Pure handler, effectful runtime
//!
//! The pipeline logic lives in [`app::handle_event`], which returns actions
//! instead of performing them. Timers and tasks live in the session's controller.
//!
//! ## Failures are values
//!
//! Nothing on the fetch path surfaces as an `Err` to observers. Connectivity
//! problems, server errors and empty result sets all become
//! [`FetchResult::Failure`] with a message ready for display.

pub mod app;
pub mod domain;
pub mod feed;
pub mod observability;

pub use app::{SearchSession, DEFAULT_DEBOUNCE};
pub use domain::{FetchError, FetchResult, Photo, PhotoSearchError, Result, SelectedPhoto};

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Public feed endpoint queried by default.
pub const DEFAULT_ENDPOINT: &str = "https://api.flickr.com/services/feeds/photos_public.gne";

const DEFAULT_DEBOUNCE_MS: u64 = 300;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 15;

/// Runtime configuration.
///
/// # Example
///
/// ```toml
/// endpoint = "https://api.flickr.com/services/feeds/photos_public.gne"
/// debounce_ms = 300
/// request_timeout_secs = 15
/// trace_level = "photosearch=debug"
/// log_file = "/tmp/photosearch.log"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Feed URL; the fixed query parameters are appended per request.
    pub endpoint: String,

    /// Quiet interval before a query is acted upon. Default: 300
    pub debounce_ms: u64,

    /// Per-request timeout in seconds. `0` disables the timeout. Default: 15
    pub request_timeout_secs: u64,

    /// Tracing filter directive, e.g. `"debug"` or `"photosearch=trace"`.
    ///
    /// Overridden by `RUST_LOG`. Default: `"info"`
    pub trace_level: Option<String>,

    /// Log to this file instead of stderr.
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            trace_level: None,
            log_file: None,
        }
    }
}

impl Config {
    /// Parses a TOML document. Missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`PhotoSearchError::Toml`] for malformed documents and
    /// [`PhotoSearchError::Config`] if the endpoint is empty.
    ///
    /// ```rust
    /// use photosearch::Config;
    ///
    /// let config = Config::from_toml_str("debounce_ms = 150").unwrap();
    /// assert_eq!(config.debounce_ms, 150);
    /// assert_eq!(config.request_timeout_secs, 15);
    /// ```
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a TOML configuration file.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be read, or any error of
    /// [`Config::from_toml_str`].
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "loading configuration");
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Builds a configuration from string key/value pairs.
    ///
    /// Unknown keys are ignored; numbers that fail to parse and empty strings
    /// fall back to their defaults.
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use photosearch::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("debounce_ms".to_string(), "120".to_string());
    /// map.insert("request_timeout_secs".to_string(), "soon".to_string());
    ///
    /// let config = Config::from_map(&map);
    /// assert_eq!(config.debounce_ms, 120);
    /// assert_eq!(config.request_timeout_secs, 15);
    /// ```
    #[must_use]
    pub fn from_map(map: &BTreeMap<String, String>) -> Self {
        let non_empty = |key: &str| {
            map.get(key)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(String::from)
        };

        Self {
            endpoint: non_empty("endpoint").unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            debounce_ms: non_empty("debounce_ms")
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_DEBOUNCE_MS),
            request_timeout_secs: non_empty("request_timeout_secs")
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
            trace_level: non_empty("trace_level"),
            log_file: non_empty("log_file").map(PathBuf::from),
        }
    }

    /// Quiet interval as a `Duration`.
    #[must_use]
    pub const fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Request timeout, or `None` when disabled.
    #[must_use]
    pub const fn request_timeout(&self) -> Option<Duration> {
        if self.request_timeout_secs == 0 {
            None
        } else {
            Some(Duration::from_secs(self.request_timeout_secs))
        }
    }

    fn validate(&self) -> Result<()> {
        if self.endpoint.trim().is_empty() {
            return Err(PhotoSearchError::Config("endpoint must not be empty".to_string()));
        }
        Ok(())
    }
}

/// Initializes logging and starts a search session against the configured feed.
///
/// Must be called inside a Tokio runtime.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or the HTTP client cannot
/// be built.
pub fn initialize(config: &Config) -> Result<SearchSession> {
    observability::init_tracing(config);
    config.validate()?;

    tracing::debug!(
        endpoint = %config.endpoint,
        debounce_ms = config.debounce_ms,
        request_timeout_secs = config.request_timeout_secs,
        "initializing photosearch"
    );

    SearchSession::from_config(config)
}
