//! # Domain Models
//!
//! This crate contains pure domain types with minimal dependencies (`serde`, `bitflags`,
//! `indexmap` and `serde_json` for values).
//! Keep it lean: data and simple helpers only, no I/O.

pub mod attributes;
pub mod config;
pub mod constants;
pub mod document;
