//! # Logger
//!
//! Process-wide `tracing` setup for the Lineage tools.
//!
//! A [`Logger::builder`] installs one subscriber with:
//! * an [`EnvFilter`](tracing_subscriber::EnvFilter) built from a default level plus either
//!   explicit directives or `RUST_LOG`,
//! * a compact console layer on **stderr**, so command output on stdout stays parseable,
//! * an optional rolling file layer (plain text or JSON lines) written off-thread.
//!
//! Configuration files carry levels and rotations as strings; [`parse_level`] and
//! [`parse_rotation`] turn them into the builder's types.
//!
//! ## Example
//!
//! ```rust
//! use lineage_logger::{Logger, parse_level};
//!
//! let _logger = Logger::builder()
//!     .name("lineage")
//!     .level(parse_level("debug").unwrap())
//!     .env_filter("warn,lineage_record=trace")
//!     .init()
//!     .unwrap();
//!
//! tracing::trace!(target: "lineage_record", "visible on stderr");
//! ```

mod builder;
mod error;
mod settings;

pub use crate::builder::{LoggerBuilder, NoFile, NoName, WithFile, WithName};
pub use crate::error::{LoggerError, LoggerErrorExt};
pub use crate::settings::{parse_level, parse_rotation};
pub use tracing::level_filters::LevelFilter;
pub use tracing_appender::rolling::Rotation;

use tracing_appender::non_blocking::WorkerGuard;

/// Handle to the installed subscriber.
///
/// When file output is enabled it owns the background writer; dropping it flushes
/// pending lines, so keep it alive until the process exits.
#[must_use = "Dropping this handle will stop background logging threads."]
#[derive(Debug)]
pub struct Logger {
    flush: Option<WorkerGuard>,
}

impl Logger {
    /// Starts configuring the global subscriber.
    ///
    /// The name set next prefixes rolling log files (`lineage.2026-10-16.log`).
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::default()
    }

    const fn new(flush: Option<WorkerGuard>) -> Self {
        Self { flush }
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        if self.flush.is_some() {
            tracing::debug!("Flushing log files");
        }
    }
}
