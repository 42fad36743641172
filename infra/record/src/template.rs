use crate::error::RecordError;
use crate::property::{Properties, Property, assign};
use fxhash::FxHashSet;
use lineage_domain::attributes::Attributes;
use parking_lot::RwLock;
use serde_json::Value;
use std::fmt;
use std::ops::ControlFlow;
use std::sync::Arc;
use tracing::{trace, warn};

#[derive(Debug, Default)]
struct TemplateState {
    fields: Properties,
    parent: Option<Template>,
}

struct TemplateInner {
    name: String,
    state: RwLock<TemplateState>,
}

/// A shared, mutable fallback mapping.
///
/// Records link to a template explicitly (see [`crate::Record::derived_from`]); the
/// template contributes keys to their *visible* view without those keys becoming
/// their own. A template may fall back to a parent template, forming a chain.
///
/// `Template` is a handle: cloning it is cheap and every clone observes the same
/// fields. Changes made through any handle are immediately visible to every record
/// linked to the template. Equality is identity.
///
/// ```rust
/// use lineage_record::{Record, Template};
///
/// # fn main() -> Result<(), lineage_record::RecordError> {
/// let vehicle = Template::new("vehicle");
/// let mut camry = Record::derived_from(&vehicle);
/// camry.insert("make", "Toyota")?;
///
/// vehicle.set("year", 2022)?;
/// assert_eq!(camry.lookup("year")?, Some(2022.into()));
/// assert!(!camry.has_own("year"));
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Template {
    inner: Arc<TemplateInner>,
}

impl Template {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(TemplateInner {
                name: name.into(),
                state: RwLock::new(TemplateState::default()),
            }),
        }
    }

    /// Creates a template holding enumerable, writable `entries`.
    #[must_use]
    pub fn from_entries<I, K, V>(name: impl Into<String>, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let fields = entries.into_iter().map(|(k, v)| (k.into(), Property::new(v))).collect();
        Self {
            inner: Arc::new(TemplateInner {
                name: name.into(),
                state: RwLock::new(TemplateState { fields, parent: None }),
            }),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Assigns a field, keeping the attributes of an existing one.
    ///
    /// # Errors
    /// Returns [`RecordError::ReadOnly`] if the existing field is not writable.
    pub fn set(
        &self,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) -> Result<Option<Value>, RecordError> {
        let key = key.into();
        trace!(template = %self.name(), key = %key, "Assigning template field");
        assign(&mut self.inner.state.write().fields, key, value.into(), None)
    }

    /// Defines a field with explicit attributes.
    ///
    /// # Errors
    /// Returns [`RecordError::ReadOnly`] if the existing field is not writable.
    pub fn define(
        &self,
        key: impl Into<String>,
        value: impl Into<Value>,
        attributes: Attributes,
    ) -> Result<Option<Value>, RecordError> {
        let key = key.into();
        trace!(template = %self.name(), key = %key, ?attributes, "Defining template field");
        assign(&mut self.inner.state.write().fields, key, value.into(), Some(attributes))
    }

    /// Removes a field, returning its value.
    pub fn remove(&self, key: &str) -> Option<Value> {
        trace!(template = %self.name(), key, "Removing template field");
        self.inner.state.write().fields.shift_remove(key).map(Property::into_value)
    }

    /// Returns a copy of the template's own field, ignoring its parent.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<Value> {
        self.inner.state.read().fields.get(key).map(|p| p.value().clone())
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.inner.state.read().fields.contains_key(key)
    }

    /// Own field names in insertion order, hidden ones included.
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        self.inner.state.read().fields.keys().cloned().collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.state.read().fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.state.read().fields.is_empty()
    }

    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        self.inner.state.read().parent.clone()
    }

    /// Links this template to `parent`, or unlinks it with `None`.
    ///
    /// # Errors
    /// Returns [`RecordError::CycleDetected`] if `parent` already falls back to this
    /// template (directly or through its own chain). The current link is kept.
    pub fn set_parent(&self, parent: Option<&Self>) -> Result<(), RecordError> {
        if let Some(parent) = parent {
            let closes_loop =
                walk_chain(Some(parent.clone()), usize::MAX, |candidate, _| {
                    if candidate.ptr_eq(self) {
                        ControlFlow::Break(())
                    } else {
                        ControlFlow::Continue(())
                    }
                })?;

            if closes_loop.is_some() {
                warn!(
                    template = %self.name(),
                    parent = %parent.name(),
                    "Rejected cyclic template link"
                );
                return Err(RecordError::CycleDetected {
                    message: format!("'{}' already falls back to '{}'", parent.name(), self.name())
                        .into(),
                    context: None,
                });
            }
        }

        trace!(
            template = %self.name(),
            parent = parent.map(Self::name),
            "Linking template parent"
        );
        self.inner.state.write().parent = parent.cloned();
        Ok(())
    }

    /// Whether both handles point at the same template.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Own field lookup returning the whole property.
    pub(crate) fn property(&self, key: &str) -> Option<Property> {
        self.inner.state.read().fields.get(key).cloned()
    }

    /// Copies the own fields under a single read lock.
    pub(crate) fn snapshot(&self) -> Vec<(String, Property)> {
        self.inner.state.read().fields.iter().map(|(k, p)| (k.clone(), p.clone())).collect()
    }

    fn id(&self) -> *const () {
        Arc::as_ptr(&self.inner).cast()
    }
}

impl PartialEq for Template {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for Template {}

impl fmt::Debug for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.inner.state.read();
        f.debug_struct("Template")
            .field("name", &self.inner.name)
            .field("fields", &state.fields.keys().collect::<Vec<_>>())
            .field("parent", &state.parent.as_ref().map(Self::name))
            .finish()
    }
}

/// Walks a template chain nearest-first, calling `visit` with each template and its
/// depth (the first template is at depth 1).
///
/// Returns the value `visit` breaks with, or `None` when the chain ends.
///
/// # Errors
/// * [`RecordError::ChainTooDeep`] when more than `max_depth` templates would be visited.
/// * [`RecordError::CycleDetected`] when a template is reached twice.
pub(crate) fn walk_chain<T>(
    start: Option<Template>,
    max_depth: usize,
    mut visit: impl FnMut(&Template, usize) -> ControlFlow<T>,
) -> Result<Option<T>, RecordError> {
    let mut seen = FxHashSet::default();
    let mut current = start;
    let mut depth = 0;

    while let Some(template) = current {
        depth += 1;
        if depth > max_depth {
            return Err(RecordError::ChainTooDeep {
                message: format!("more than {max_depth} templates above the record").into(),
                context: Some(format!("at template '{}'", template.name()).into()),
            });
        }
        if !seen.insert(template.id()) {
            warn!(template = %template.name(), depth, "Template chain loops back on itself");
            return Err(RecordError::CycleDetected {
                message: format!("'{}' is reached twice", template.name()).into(),
                context: None,
            });
        }
        if let ControlFlow::Break(found) = visit(&template, depth) {
            return Ok(Some(found));
        }
        current = template.parent();
    }

    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_parent_rejects_direct_cycles() {
        let a = Template::new("a");
        let b = Template::new("b");
        b.set_parent(Some(&a)).expect("b -> a");

        let err = a.set_parent(Some(&b)).expect_err("a -> b would close a loop");
        assert!(matches!(err, RecordError::CycleDetected { .. }));
        assert!(a.parent().is_none(), "rejected link must leave the chain unchanged");
    }

    #[test]
    fn set_parent_rejects_self_links() {
        let a = Template::new("a");
        let err = a.set_parent(Some(&a)).expect_err("self link");
        assert!(matches!(err, RecordError::CycleDetected { .. }));
    }

    #[test]
    fn set_parent_rejects_long_cycles() {
        let chain: Vec<Template> = (0..5).map(|i| Template::new(format!("t{i}"))).collect();
        for pair in chain.windows(2) {
            pair[0].set_parent(Some(&pair[1])).expect("forward link");
        }

        let err = chain[4].set_parent(Some(&chain[0])).expect_err("t4 -> t0 closes the loop");
        assert!(matches!(err, RecordError::CycleDetected { .. }));
    }

    #[test]
    fn unlinking_is_always_allowed() {
        let a = Template::new("a");
        let b = Template::new("b");
        a.set_parent(Some(&b)).expect("link");
        a.set_parent(None).expect("unlink");
        assert!(a.parent().is_none());
    }

    #[test]
    fn walk_chain_reports_depths_and_limits() {
        let top = Template::new("top");
        let mid = Template::new("mid");
        mid.set_parent(Some(&top)).expect("link");

        let mut seen = Vec::new();
        let found = walk_chain(Some(mid.clone()), 8, |t, depth| {
            seen.push((t.name().to_owned(), depth));
            ControlFlow::<()>::Continue(())
        })
        .expect("walk");
        assert!(found.is_none());
        assert_eq!(seen, [("mid".to_owned(), 1), ("top".to_owned(), 2)]);

        let err = walk_chain(Some(mid), 1, |_, _| ControlFlow::<()>::Continue(()))
            .expect_err("two templates exceed a depth of one");
        assert!(matches!(err, RecordError::ChainTooDeep { .. }));
    }

    #[test]
    fn read_only_fields_reject_assignment() {
        let t = Template::new("locked");
        t.define("version", "1.0", Attributes::default().read_only()).expect("define");

        let err = t.set("version", "2.0").expect_err("read-only");
        assert!(matches!(err, RecordError::ReadOnly { .. }));
        assert_eq!(t.get("version"), Some(Value::from("1.0")));
    }

    #[test]
    fn handles_share_state_and_compare_by_identity() {
        let a = Template::from_entries("a", [("x", 1)]);
        let alias = a.clone();
        alias.set("y", 2).expect("set through alias");

        assert_eq!(a.keys(), ["x", "y"]);
        assert_eq!(a, alias);
        assert_ne!(a, Template::from_entries("a", [("x", 1)]));
        assert_eq!(a.remove("x"), Some(Value::from(1)));
        assert_eq!(a.len(), 1);
    }
}
