use crate::constants::{
    DEFAULT_LOG_FILES, DEFAULT_LOG_LEVEL, DEFAULT_LOG_ROTATION, DEFAULT_MAX_DEPTH,
    ORDER_INDEX_FIRST, ORDER_INSERTION,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Top-level configuration shared by the library and the tools.
#[derive(Default, Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LineageConfig {
    pub enumeration: EnumerationConfig,
    pub logging: LoggingConfig,
}

/// How keys are enumerated.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EnumerationConfig {
    /// Relative order of the keys produced for a single record or template.
    pub order: KeyOrder,
    /// Maximum number of templates walked above a record before giving up.
    pub max_depth: usize,
    /// Also yield properties that are not enumerable.
    pub include_hidden: bool,
}

/// Key ordering policy.
///
/// `Insertion` never reorders anything. `IndexFirst` follows the ordering rule of
/// scripting hosts: canonical array-index keys first in ascending numeric order,
/// then every other key in insertion order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum KeyOrder {
    #[default]
    Insertion,
    IndexFirst,
}

/// Console and file logging settings for the tools.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default level directive (`off`, `error`, `warn`, `info`, `debug`, `trace`).
    pub level: String,
    /// Per-target directives such as `lineage_record=trace`. Replaces `RUST_LOG` when set.
    pub filter: Option<String>,
    /// Optional directory for rolling log files.
    pub directory: Option<PathBuf>,
    /// How often log files roll over: `minutely`, `hourly`, `daily` or `never`.
    pub rotation: String,
    /// Number of rolled files kept in `directory`.
    pub max_files: usize,
    /// Write log files as JSON lines.
    pub json: bool,
}

// --- Default ---

impl Default for EnumerationConfig {
    fn default() -> Self {
        Self { order: KeyOrder::default(), max_depth: DEFAULT_MAX_DEPTH, include_hidden: false }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_owned(),
            filter: None,
            directory: None,
            rotation: DEFAULT_LOG_ROTATION.to_owned(),
            max_files: DEFAULT_LOG_FILES,
            json: false,
        }
    }
}

impl KeyOrder {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Insertion => ORDER_INSERTION,
            Self::IndexFirst => ORDER_INDEX_FIRST,
        }
    }
}

impl fmt::Display for KeyOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
