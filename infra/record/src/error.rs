//! # Record Errors
//!
//! This module defines the [`RecordError`] enum used throughout the crate for
//! reporting invalid inputs, broken template chains, and rejected writes.

use std::borrow::Cow;

/// A specialized [`RecordError`] enum for record and template failures.
#[lineage_derive::lineage_error]
pub enum RecordError {
    /// The argument cannot be treated as a key-value container.
    #[error("Invalid input{}: {message}", format_context(.context))]
    InvalidInput { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// An enumerator or catalog was configured with unusable settings.
    #[error("Invalid configuration{}: {message}", format_context(.context))]
    InvalidConfiguration { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// A template chain visits the same template twice.
    #[error("Template cycle detected{}: {message}", format_context(.context))]
    CycleDetected { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// A template chain is longer than the configured maximum depth.
    #[error("Template chain too deep{}: {message}", format_context(.context))]
    ChainTooDeep { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Assignment to a property that is not writable.
    #[error("Read-only property{}: {message}", format_context(.context))]
    ReadOnly { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// A document references a template that was never defined.
    #[error("Unknown template{}: {message}", format_context(.context))]
    UnknownTemplate { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Failure while parsing JSON input.
    #[error("Serialization error{}: {source}", format_context(.context))]
    Serialization { source: serde_json::Error, context: Option<Cow<'static, str>> },
}
