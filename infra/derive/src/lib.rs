#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Procedural macros shared by the Lineage crates.
//!
//! ## Usage
//! Depend on the crate from the workspace:
//! ```toml
//! [dependencies]
//! lineage-derive.workspace = true
//! ```
//!
//! Consumers also need `thiserror` in their own dependency table, because the
//! generated code derives `::thiserror::Error`.

mod error;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

/// Attribute macro for defining crate-level error enums.
///
/// Turns a plain enum with named-field variants into an error type wired for the
/// rest of the workspace.
///
/// # Generated Items
///
/// * `#[derive(Debug, thiserror::Error)]` unless the enum already derives them.
/// * A companion `<ErrorName>Ext<T>` trait with `.context(...)`, implemented for
///   `Result<T, ErrorName>` and for `Result<T, Source>` of every variant that wraps a source.
/// * `From<Source>` for each variant with a `source` field (or a `#[source]`/`#[from]` field).
/// * A private `format_context` helper for use inside `#[error(...)]` strings.
///
/// # Requirements
///
/// 1. Only enums are accepted.
/// 2. Every variant uses named fields.
/// 3. A variant with a source must also carry `context: Option<Cow<'static, str>>`.
///
/// # Example
///
/// ```rust,ignore
/// use lineage_derive::lineage_error;
/// use std::borrow::Cow;
///
/// #[lineage_error]
/// pub enum RecordError {
///     #[error("Invalid input{}: {message}", format_context(.context))]
///     InvalidInput { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
///
///     #[error("Serialization error{}: {source}", format_context(.context))]
///     Serialization { source: serde_json::Error, context: Option<Cow<'static, str>> },
/// }
///
/// fn parse(raw: &str) -> Result<serde_json::Value, RecordError> {
///     serde_json::from_str(raw).context("Parsing record body")
/// }
/// ```
#[proc_macro_attribute]
pub fn lineage_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    error::expand(input).into()
}
