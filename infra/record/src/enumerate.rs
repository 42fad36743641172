//! Own and visible enumeration.
//!
//! [`own_entries`] answers "what was assigned on this record". It reads the record's
//! own fields and nothing else, so a template can be mutated at any time without
//! changing the result.
//!
//! [`visible_entries`] answers "what would a naive `for...in` loop see". It is the
//! opt-in fallback view: own fields first, then every template in the chain, nearest
//! first, with names already seen shadowing later ones.

use crate::builder::EnumeratorBuilder;
use crate::error::RecordError;
use crate::key::arrange;
use crate::property::Property;
use crate::record::{Record, value_kind};
use crate::template::walk_chain;
use fxhash::FxHashSet;
use lineage_domain::config::{EnumerationConfig, KeyOrder};
use serde::Serialize;
use serde_json::Value;
use std::borrow::Cow;
use std::fmt;
use std::ops::ControlFlow;
use tracing::trace;

/// Lazy sequence of a container's own `(key, value)` pairs.
///
/// Produced by [`own_entries`], [`own_entries_of`] and the matching [`Enumerator`]
/// methods. Borrows the container; call the operation again to restart.
pub struct OwnEntries<'a> {
    source: Source<'a>,
}

enum Source<'a> {
    Properties { iter: indexmap::map::Iter<'a, String, Property>, include_hidden: bool },
    Object(serde_json::map::Iter<'a>),
    Array(std::iter::Enumerate<std::slice::Iter<'a, Value>>),
    Arranged(std::vec::IntoIter<(Cow<'a, str>, &'a Value)>),
}

impl<'a> Iterator for OwnEntries<'a> {
    type Item = (Cow<'a, str>, &'a Value);

    fn next(&mut self) -> Option<Self::Item> {
        match &mut self.source {
            Source::Properties { iter, include_hidden } => iter
                .find(|(_, p)| p.is_listed(*include_hidden))
                .map(|(k, p)| (Cow::Borrowed(k.as_str()), p.value())),
            Source::Object(iter) => iter.next().map(|(k, v)| (Cow::Borrowed(k.as_str()), v)),
            Source::Array(iter) => iter.next().map(|(i, v)| (Cow::Owned(i.to_string()), v)),
            Source::Arranged(iter) => iter.next(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match &self.source {
            Source::Properties { iter, include_hidden: true } => iter.size_hint(),
            Source::Properties { iter, include_hidden: false } => (0, iter.size_hint().1),
            Source::Object(iter) => iter.size_hint(),
            Source::Array(iter) => iter.size_hint(),
            Source::Arranged(iter) => iter.size_hint(),
        }
    }
}

impl fmt::Debug for OwnEntries<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let source = match &self.source {
            Source::Properties { .. } => "record",
            Source::Object(_) => "object",
            Source::Array(_) => "array",
            Source::Arranged(_) => "arranged",
        };
        f.debug_struct("OwnEntries").field("source", &source).finish_non_exhaustive()
    }
}

/// Where a visible entry comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Origin {
    Own,
    /// Found on `template`, `depth` links above the record (the record's own
    /// template is at depth 1).
    Inherited { template: String, depth: usize },
}

impl Origin {
    #[must_use]
    pub const fn is_own(&self) -> bool {
        matches!(self, Self::Own)
    }
}

/// One entry of a visible enumeration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VisibleEntry {
    pub key: String,
    pub value: Value,
    pub origin: Origin,
}

/// Snapshot of a visible enumeration, in enumeration order.
#[derive(Debug, Clone)]
pub struct VisibleEntries {
    inner: std::vec::IntoIter<VisibleEntry>,
}

impl Iterator for VisibleEntries {
    type Item = VisibleEntry;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for VisibleEntries {}

/// Configured enumeration.
///
/// The free functions in this module use [`Enumerator::default`]: insertion order,
/// enumerable properties only, chains up to 64 templates deep.
///
/// ```rust
/// use lineage_record::{Enumerator, KeyOrder, Record};
///
/// # fn main() -> Result<(), lineage_record::RecordError> {
/// let record: Record = [("b", 1), ("2", 2), ("a", 3), ("1", 4)].into_iter().collect();
/// let enumerator = Enumerator::builder().order(KeyOrder::IndexFirst).build()?;
///
/// let keys: Vec<_> = enumerator.own_entries(&record).map(|(k, _)| k.into_owned()).collect();
/// assert_eq!(keys, ["1", "2", "b", "a"]);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Enumerator {
    config: EnumerationConfig,
}

impl Enumerator {
    #[must_use]
    pub fn builder() -> EnumeratorBuilder {
        EnumeratorBuilder::default()
    }

    /// Creates an enumerator from loaded settings.
    ///
    /// # Errors
    /// Returns [`RecordError::InvalidConfiguration`] when `max_depth` is zero.
    pub fn from_config(config: &EnumerationConfig) -> Result<Self, RecordError> {
        if config.max_depth == 0 {
            return Err(RecordError::InvalidConfiguration {
                message: "max_depth must be greater than zero".into(),
                context: Some("enumeration".into()),
            });
        }
        Ok(Self { config: config.clone() })
    }

    #[must_use]
    pub const fn config(&self) -> &EnumerationConfig {
        &self.config
    }

    /// Own `(key, value)` pairs of `record`. The template is never consulted.
    #[must_use]
    pub fn own_entries<'a>(&self, record: &'a Record) -> OwnEntries<'a> {
        let include_hidden = self.config.include_hidden;
        let iter = record.properties().iter();

        if self.config.order == KeyOrder::Insertion {
            return OwnEntries { source: Source::Properties { iter, include_hidden } };
        }

        let mut items: Vec<_> = iter
            .filter(|(_, p)| p.is_listed(include_hidden))
            .map(|(k, p)| (Cow::Borrowed(k.as_str()), p.value()))
            .collect();
        arrange(&mut items, self.config.order, |(k, _)| &**k);
        OwnEntries { source: Source::Arranged(items.into_iter()) }
    }

    /// Own `(key, value)` pairs of an arbitrary JSON value.
    ///
    /// Objects yield their members, arrays their elements under index keys
    /// `"0".."n-1"`. Empty containers yield nothing.
    ///
    /// # Errors
    /// Returns [`RecordError::InvalidInput`] when `value` is a primitive.
    pub fn own_entries_of<'a>(&self, value: &'a Value) -> Result<OwnEntries<'a>, RecordError> {
        let source = match value {
            Value::Object(map) if self.config.order == KeyOrder::Insertion => {
                Source::Object(map.iter())
            },
            Value::Object(map) => {
                let mut items: Vec<_> =
                    map.iter().map(|(k, v)| (Cow::Borrowed(k.as_str()), v)).collect();
                arrange(&mut items, self.config.order, |(k, _)| &**k);
                Source::Arranged(items.into_iter())
            },
            Value::Array(items) => Source::Array(items.iter().enumerate()),
            other => {
                return Err(RecordError::InvalidInput {
                    message: format!("{} is not a key-value container", value_kind(other)).into(),
                    context: None,
                });
            },
        };
        Ok(OwnEntries { source })
    }

    /// Own entries followed by inherited ones, as a `for...in` loop would see them.
    ///
    /// Every own name shadows inherited ones, hidden or not. Each template is read
    /// under a single lock, so a concurrent writer never tears one template's view.
    ///
    /// # Errors
    /// Returns [`RecordError::CycleDetected`] or [`RecordError::ChainTooDeep`] for
    /// broken chains. No partial result is returned.
    pub fn visible_entries(&self, record: &Record) -> Result<VisibleEntries, RecordError> {
        let EnumerationConfig { order, max_depth, include_hidden } = self.config;
        let mut seen = FxHashSet::default();
        let mut entries = Vec::new();

        let mut own: Vec<_> = record.properties().iter().collect();
        arrange(&mut own, order, |(k, _)| k.as_str());
        for (key, property) in own {
            seen.insert(key.clone());
            if property.is_listed(include_hidden) {
                entries.push(VisibleEntry {
                    key: key.clone(),
                    value: property.value().clone(),
                    origin: Origin::Own,
                });
            }
        }

        walk_chain(record.template().cloned(), max_depth, |template, depth| {
            let mut fields = template.snapshot();
            arrange(&mut fields, order, |(k, _)| k.as_str());
            for (key, property) in fields {
                if !seen.insert(key.clone()) {
                    continue;
                }
                if property.is_listed(include_hidden) {
                    entries.push(VisibleEntry {
                        key,
                        value: property.into_value(),
                        origin: Origin::Inherited { template: template.name().to_owned(), depth },
                    });
                }
            }
            ControlFlow::<()>::Continue(())
        })?;

        trace!(entries = entries.len(), "Visible enumeration finished");
        Ok(VisibleEntries { inner: entries.into_iter() })
    }

    /// Resolves `key` on the record, then along its chain, within this enumerator's
    /// depth limit.
    ///
    /// # Errors
    /// See [`Record::lookup`].
    pub fn lookup(&self, record: &Record, key: &str) -> Result<Option<Value>, RecordError> {
        record.lookup_within(key, self.config.max_depth)
    }
}

/// Own enumerable `(key, value)` pairs of `record` in insertion order.
///
/// Keys contributed by the record's template never appear, however the template
/// changes.
///
/// ```rust
/// use lineage_record::{Record, Template, own_entries};
///
/// # fn main() -> Result<(), lineage_record::RecordError> {
/// let vehicle = Template::from_entries("vehicle", [("year", 2022)]);
/// let mut camry = Record::derived_from(&vehicle);
/// camry.insert("make", "Toyota")?;
/// camry.insert("model", "Camry")?;
///
/// let keys: Vec<_> = own_entries(&camry).map(|(k, _)| k.into_owned()).collect();
/// assert_eq!(keys, ["make", "model"]);
/// # Ok(())
/// # }
/// ```
#[must_use]
pub fn own_entries(record: &Record) -> OwnEntries<'_> {
    OwnEntries {
        source: Source::Properties { iter: record.properties().iter(), include_hidden: false },
    }
}

/// Own `(key, value)` pairs of a JSON object or array.
///
/// # Errors
/// Returns [`RecordError::InvalidInput`] when `value` is not a container.
pub fn own_entries_of(value: &Value) -> Result<OwnEntries<'_>, RecordError> {
    Enumerator::default().own_entries_of(value)
}

/// Visible entries of `record` with the default settings.
///
/// # Errors
/// See [`Enumerator::visible_entries`].
pub fn visible_entries(record: &Record) -> Result<VisibleEntries, RecordError> {
    Enumerator::default().visible_entries(record)
}
