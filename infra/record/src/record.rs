use crate::enumerate::{OwnEntries, VisibleEntries, own_entries, visible_entries};
use crate::error::{RecordError, RecordErrorExt};
use crate::property::{Properties, Property, assign};
use crate::template::{Template, walk_chain};
use lineage_domain::attributes::Attributes;
use lineage_domain::constants::DEFAULT_MAX_DEPTH;
use serde_json::Value;
use std::ops::ControlFlow;

/// A key-value container with an optional fallback [`Template`].
///
/// Fields assigned on the record are its *own* fields. The template is consulted
/// only by the explicit fallback operations ([`Record::lookup`],
/// [`Record::visible_entries`]); own enumeration never looks at it.
///
/// Two records are equal when their own fields match in enumeration order and they
/// share the same template handle.
#[derive(Debug, Clone, Default)]
pub struct Record {
    fields: Properties,
    template: Option<Template>,
}

impl Record {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty record that falls back to `template`.
    #[must_use]
    pub fn derived_from(template: &Template) -> Self {
        Self { fields: Properties::default(), template: Some(template.clone()) }
    }

    /// Replaces the fallback template, returning the previous one.
    pub fn set_template(&mut self, template: Option<&Template>) -> Option<Template> {
        std::mem::replace(&mut self.template, template.cloned())
    }

    #[must_use]
    pub const fn template(&self) -> Option<&Template> {
        self.template.as_ref()
    }

    /// Assigns an own field, returning the previous own value.
    ///
    /// # Errors
    /// Returns [`RecordError::ReadOnly`] if the own field exists and is not writable.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) -> Result<Option<Value>, RecordError> {
        assign(&mut self.fields, key.into(), value.into(), None)
    }

    /// Defines an own field with explicit attributes.
    ///
    /// # Errors
    /// Returns [`RecordError::ReadOnly`] if the own field exists and is not writable.
    pub fn define(
        &mut self,
        key: impl Into<String>,
        value: impl Into<Value>,
        attributes: Attributes,
    ) -> Result<Option<Value>, RecordError> {
        assign(&mut self.fields, key.into(), value.into(), Some(attributes))
    }

    /// Removes an own field. Inherited fields are untouched.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.fields.shift_remove(key).map(Property::into_value)
    }

    /// Whether `key` was assigned on this record, enumerable or not.
    #[must_use]
    pub fn has_own(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    #[must_use]
    pub fn get_own(&self, key: &str) -> Option<&Value> {
        self.fields.get(key).map(Property::value)
    }

    /// Attributes of an own field.
    #[must_use]
    pub fn attributes(&self, key: &str) -> Option<Attributes> {
        self.fields.get(key).map(Property::attributes)
    }

    /// Resolves `key` on the record first, then along the template chain.
    ///
    /// Hidden fields resolve like any other; attributes only affect enumeration.
    ///
    /// # Errors
    /// Returns [`RecordError::CycleDetected`] or [`RecordError::ChainTooDeep`] if the
    /// chain has to be walked and is broken.
    pub fn lookup(&self, key: &str) -> Result<Option<Value>, RecordError> {
        self.lookup_within(key, DEFAULT_MAX_DEPTH)
    }

    pub(crate) fn lookup_within(
        &self,
        key: &str,
        max_depth: usize,
    ) -> Result<Option<Value>, RecordError> {
        if let Some(own) = self.get_own(key) {
            return Ok(Some(own.clone()));
        }

        walk_chain(self.template.clone(), max_depth, |template, _| {
            template.property(key).map_or(ControlFlow::Continue(()), |p| {
                ControlFlow::Break(p.into_value())
            })
        })
    }

    /// Number of own fields, hidden ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Own enumerable keys in insertion order.
    pub fn own_keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.fields.iter().filter(|(_, p)| p.is_enumerable()).map(|(k, _)| k.as_str())
    }

    /// Shorthand for [`own_entries`] with the default settings.
    #[must_use]
    pub fn own_entries(&self) -> OwnEntries<'_> {
        own_entries(self)
    }

    /// Shorthand for [`visible_entries`] with the default settings.
    ///
    /// # Errors
    /// See [`visible_entries`].
    pub fn visible_entries(&self) -> Result<VisibleEntries, RecordError> {
        visible_entries(self)
    }

    /// Parses a JSON object or array into a record without a template.
    ///
    /// # Errors
    /// * [`RecordError::Serialization`] when `json` is not valid JSON.
    /// * [`RecordError::InvalidInput`] when it is a primitive.
    pub fn from_json(json: &str) -> Result<Self, RecordError> {
        let value = serde_json::from_str::<Value>(json).context("Failed to parse record")?;
        Self::try_from(value)
    }

    pub(crate) const fn properties(&self) -> &Properties {
        &self.fields
    }
}

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.fields.iter().eq(other.fields.iter()) && self.template == other.template
    }
}

impl TryFrom<Value> for Record {
    type Error = RecordError;

    /// Objects keep their member order. Arrays become index keys `"0".."n-1"`.
    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(map.into_iter().collect()),
            Value::Array(items) => {
                Ok(items.into_iter().enumerate().map(|(i, v)| (i.to_string(), v)).collect())
            },
            other => Err(RecordError::InvalidInput {
                message: format!("expected an object or an array, found {}", value_kind(&other))
                    .into(),
                context: None,
            }),
        }
    }
}

impl<K, V> FromIterator<(K, V)> for Record
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let fields = iter.into_iter().map(|(k, v)| (k.into(), Property::new(v))).collect();
        Self { fields, template: None }
    }
}

/// Human readable name of a JSON value's type.
pub(crate) const fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn insert_keeps_position_and_returns_previous() {
        let mut r: Record = [("a", 1), ("b", 2)].into_iter().collect();
        assert_eq!(r.insert("a", 10).expect("insert"), Some(Value::from(1)));
        assert_eq!(r.own_keys().collect::<Vec<_>>(), ["a", "b"]);
        assert_eq!(r.get_own("a"), Some(&Value::from(10)));
    }

    #[test]
    fn read_only_own_fields_reject_assignment() {
        let mut r = Record::new();
        r.define("id", 7, Attributes::default().read_only()).expect("define");

        let err = r.insert("id", 8).expect_err("read-only");
        assert!(matches!(err, RecordError::ReadOnly { .. }));
        assert_eq!(r.get_own("id"), Some(&Value::from(7)));
    }

    #[test]
    fn lookup_prefers_own_then_nearest_template() {
        let base = Template::from_entries("base", [("colour", "red"), ("wheels", "4")]);
        let sport = Template::from_entries("sport", [("colour", "yellow")]);
        sport.set_parent(Some(&base)).expect("link");

        let mut r = Record::derived_from(&sport);
        assert_eq!(r.lookup("colour").expect("lookup"), Some(json!("yellow")));
        assert_eq!(r.lookup("wheels").expect("lookup"), Some(json!("4")));
        assert_eq!(r.lookup("missing").expect("lookup"), None);

        r.insert("colour", "blue").expect("insert");
        assert_eq!(r.lookup("colour").expect("lookup"), Some(json!("blue")));
    }

    #[test]
    fn lookup_respects_depth_limit() {
        let top = Template::from_entries("top", [("k", 1)]);
        let mid = Template::new("mid");
        mid.set_parent(Some(&top)).expect("link");
        let r = Record::derived_from(&mid);

        let err = r.lookup_within("k", 1).expect_err("two templates exceed depth one");
        assert!(matches!(err, RecordError::ChainTooDeep { .. }));
        assert_eq!(r.lookup_within("k", 2).expect("within limit"), Some(json!(1)));
    }

    #[test]
    fn try_from_accepts_containers_only() {
        let r = Record::try_from(json!({"z": 1, "a": 2})).expect("object");
        assert_eq!(r.own_keys().collect::<Vec<_>>(), ["z", "a"]);

        let r = Record::try_from(json!(["x", "y"])).expect("array");
        assert_eq!(r.own_keys().collect::<Vec<_>>(), ["0", "1"]);

        for primitive in [json!(null), json!(true), json!(3), json!("text")] {
            let err = Record::try_from(primitive).expect_err("primitive");
            assert!(matches!(err, RecordError::InvalidInput { .. }));
        }
    }

    #[test]
    fn from_json_reports_malformed_input() {
        let err = Record::from_json("{not json").expect_err("malformed");
        assert!(matches!(err, RecordError::Serialization { .. }));
        assert!(err.to_string().contains("Failed to parse record"));
    }

    #[test]
    fn set_template_swaps_the_fallback() {
        let a = Template::new("a");
        let b = Template::new("b");
        let mut r = Record::derived_from(&a);

        let previous = r.set_template(Some(&b));
        assert_eq!(previous.as_ref(), Some(&a));
        assert_eq!(r.template(), Some(&b));
        assert!(r.set_template(None).is_some());
        assert!(r.template().is_none());
    }

    #[test]
    fn equality_follows_enumeration_order() {
        let xy: Record = [("x", 1), ("y", 2)].into_iter().collect();
        let yx: Record = [("y", 2), ("x", 1)].into_iter().collect();
        assert_ne!(xy, yx);
        assert_eq!(xy, [("x", 1), ("y", 2)].into_iter().collect::<Record>());
    }

    #[test]
    fn equality_compares_template_identity() {
        let a = Template::from_entries("shared", [("k", 1)]);
        let b = Template::from_entries("shared", [("k", 1)]);
        assert_eq!(Record::derived_from(&a), Record::derived_from(&a));
        assert_ne!(Record::derived_from(&a), Record::derived_from(&b));
    }
}
