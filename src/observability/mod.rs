//! Logging setup.
//!
//! Every module logs through `tracing` macros and spans. This module installs
//! the subscriber that decides where those events go.
//!
//! # Configuration
//!
//! The filter is resolved from:
//! 1. `RUST_LOG` environment variable (highest priority)
//! 2. `trace_level` in [`Config`](crate::Config)
//! 3. Default: `"info"`
//!
//! Output goes to stderr, or to `log_file` with size-based rotation (10 MiB,
//! three backups) when one is configured.
//!
//! # Modules
//!
//! - `init`: filter resolution and subscriber installation
//! - `file_writer`: rotating file usable as a `tracing-subscriber` writer

mod file_writer;
mod init;

pub use file_writer::{RotatingFile, MAX_BACKUP_FILES, MAX_FILE_SIZE_BYTES};
pub use init::{env_filter, init_tracing};
