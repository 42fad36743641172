//! Kernel utilities shared across the workspace.
//! Keep this crate lightweight; it re-exports the domain models and the layered config loader.
//!
//! ## Config loading (non-wasm)
//! ```rust,no_run
//! use lineage_kernel::config::load_config;
//! use lineage_kernel::domain::config::LineageConfig;
//!
//! let cfg: LineageConfig = load_config(Some("lineage.toml")).unwrap_or_default();
//! # let _ = cfg;
//! ```
#[cfg(not(target_arch = "wasm32"))]
pub mod config;

pub use lineage_domain as domain;
