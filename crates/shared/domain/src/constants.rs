//! Shared names and defaults.

/// Prefix of environment variables that override configuration values.
pub const ENV_PREFIX: &str = "LINEAGE";

/// Separator between nested configuration keys in environment variables
/// (`LINEAGE__ENUMERATION__ORDER` maps to `enumeration.order`).
pub const ENV_SEPARATOR: &str = "__";

/// Maximum number of templates walked above a record.
pub const DEFAULT_MAX_DEPTH: usize = 64;

pub const DEFAULT_LOG_LEVEL: &str = "warn";
pub const DEFAULT_LOG_ROTATION: &str = "daily";
pub const DEFAULT_LOG_FILES: usize = 10;

pub const ORDER_INSERTION: &str = "insertion";
pub const ORDER_INDEX_FIRST: &str = "index-first";
