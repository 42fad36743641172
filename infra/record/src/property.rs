use crate::error::RecordError;
use indexmap::IndexMap;
use lineage_domain::attributes::Attributes;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Own properties of a record or template, in insertion order.
pub(crate) type Properties = IndexMap<String, Property>;

/// A value together with its [`Attributes`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Property {
    value: Value,
    attributes: Attributes,
}

impl Property {
    /// Creates an enumerable, writable property.
    #[must_use]
    pub fn new(value: impl Into<Value>) -> Self {
        Self { value: value.into(), attributes: Attributes::default() }
    }

    #[must_use]
    pub fn with_attributes(value: impl Into<Value>, attributes: Attributes) -> Self {
        Self { value: value.into(), attributes }
    }

    #[must_use]
    pub const fn value(&self) -> &Value {
        &self.value
    }

    #[must_use]
    pub const fn attributes(&self) -> Attributes {
        self.attributes
    }

    #[must_use]
    pub const fn is_enumerable(&self) -> bool {
        self.attributes.is_enumerable()
    }

    #[must_use]
    pub fn into_value(self) -> Value {
        self.value
    }

    /// Whether enumeration yields this property.
    pub(crate) const fn is_listed(&self, include_hidden: bool) -> bool {
        include_hidden || self.is_enumerable()
    }
}

/// Assigns `value` to `key`.
///
/// A new key is appended with `attributes` (or the defaults). An existing key keeps
/// its position; its attributes are replaced only when `attributes` is given.
pub(crate) fn assign(
    properties: &mut Properties,
    key: String,
    value: Value,
    attributes: Option<Attributes>,
) -> Result<Option<Value>, RecordError> {
    if let Some(existing) = properties.get_mut(&key) {
        if !existing.attributes.is_writable() {
            return Err(RecordError::ReadOnly { message: key.into(), context: None });
        }
        if let Some(attributes) = attributes {
            existing.attributes = attributes;
        }
        return Ok(Some(std::mem::replace(&mut existing.value, value)));
    }

    properties.insert(key, Property::with_attributes(value, attributes.unwrap_or_default()));
    Ok(None)
}
