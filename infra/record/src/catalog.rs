use crate::error::{RecordError, RecordErrorExt};
use crate::record::Record;
use crate::template::Template;
use indexmap::IndexMap;
use lineage_domain::attributes::Attributes;
use lineage_domain::document::{DocumentSpec, RecordSpec, TemplateSpec};
use tracing::debug;

/// Named templates and records built from a [`DocumentSpec`].
///
/// Templates are created first, in document order, then linked to their parents by
/// name. Records are built last and linked to their template.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    templates: IndexMap<String, Template>,
    records: IndexMap<String, Record>,
}

impl Catalog {
    /// Builds every template and record of `spec`.
    ///
    /// # Errors
    /// * [`RecordError::UnknownTemplate`] when a parent or record template name is
    ///   not defined.
    /// * [`RecordError::CycleDetected`] when the parent links form a loop.
    /// * [`RecordError::InvalidInput`] when record fields are not an object or array,
    ///   or a hidden name is not one of the fields.
    pub fn from_spec(spec: &DocumentSpec) -> Result<Self, RecordError> {
        let mut templates = IndexMap::with_capacity(spec.templates.len());
        for (name, template) in &spec.templates {
            templates.insert(name.clone(), build_template(name, template)?);
        }

        for (name, template) in &spec.templates {
            let Some(parent_name) = &template.parent else { continue };
            let parent = resolve(&templates, parent_name)
                .context(format!("parent of template '{name}'"))?;
            if let Some(child) = templates.get(name) {
                child.set_parent(Some(parent)).context(format!("template '{name}'"))?;
            }
        }

        let mut records = IndexMap::with_capacity(spec.records.len());
        for (name, record) in &spec.records {
            records.insert(name.clone(), build_record(name, record, &templates)?);
        }

        debug!(templates = templates.len(), records = records.len(), "Catalog built");
        Ok(Self { templates, records })
    }

    /// Parses a JSON document and builds it.
    ///
    /// # Errors
    /// [`RecordError::Serialization`] for malformed documents, otherwise see
    /// [`Catalog::from_spec`].
    pub fn from_json(json: &str) -> Result<Self, RecordError> {
        let spec = serde_json::from_str::<DocumentSpec>(json).context("Failed to parse document")?;
        Self::from_spec(&spec)
    }

    #[must_use]
    pub fn template(&self, name: &str) -> Option<&Template> {
        self.templates.get(name)
    }

    #[must_use]
    pub fn record(&self, name: &str) -> Option<&Record> {
        self.records.get(name)
    }

    pub fn record_mut(&mut self, name: &str) -> Option<&mut Record> {
        self.records.get_mut(name)
    }

    /// Template names in document order.
    pub fn template_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.templates.keys().map(String::as_str)
    }

    /// Record names in document order.
    pub fn record_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.records.keys().map(String::as_str)
    }

    #[must_use]
    pub fn template_count(&self) -> usize {
        self.templates.len()
    }

    #[must_use]
    pub fn record_count(&self) -> usize {
        self.records.len()
    }
}

fn resolve<'a>(
    templates: &'a IndexMap<String, Template>,
    name: &str,
) -> Result<&'a Template, RecordError> {
    templates.get(name).ok_or_else(|| RecordError::UnknownTemplate {
        message: name.to_owned().into(),
        context: None,
    })
}

fn build_template(name: &str, spec: &TemplateSpec) -> Result<Template, RecordError> {
    if let Some(missing) = spec.hidden.iter().find(|h| !spec.fields.contains_key(h.as_str())) {
        return Err(RecordError::InvalidInput {
            message: format!("hidden field '{missing}' is not defined").into(),
            context: Some(format!("template '{name}'").into()),
        });
    }

    let template = Template::new(name);
    for (key, value) in &spec.fields {
        let attributes = if spec.hidden.contains(key) {
            Attributes::default().hidden()
        } else {
            Attributes::default()
        };
        template.define(key.clone(), value.clone(), attributes)?;
    }
    Ok(template)
}

fn build_record(
    name: &str,
    spec: &RecordSpec,
    templates: &IndexMap<String, Template>,
) -> Result<Record, RecordError> {
    let mut record = Record::try_from(spec.fields.clone()).context(format!("record '{name}'"))?;

    for key in &spec.hidden {
        let Some(value) = record.get_own(key).cloned() else {
            return Err(RecordError::InvalidInput {
                message: format!("hidden field '{key}' is not defined").into(),
                context: Some(format!("record '{name}'").into()),
            });
        };
        record.define(key.clone(), value, Attributes::default().hidden())?;
    }

    if let Some(template_name) = &spec.template {
        let template =
            resolve(templates, template_name).context(format!("template of record '{name}'"))?;
        record.set_template(Some(template));
    }

    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enumerate::own_entries;
    use serde_json::json;

    fn spec(value: serde_json::Value) -> DocumentSpec {
        serde_json::from_value(value).expect("valid document")
    }

    #[test]
    fn builds_linked_templates_and_records() {
        let catalog = Catalog::from_spec(&spec(json!({
            "templates": {
                "base": { "fields": { "wheels": 4 } },
                "car": { "parent": "base", "fields": { "doors": 4 } }
            },
            "records": {
                "camry": { "template": "car", "fields": { "make": "Toyota" } }
            }
        })))
        .expect("catalog");

        assert_eq!(catalog.template_names().collect::<Vec<_>>(), ["base", "car"]);
        assert_eq!(catalog.record_count(), 1);

        let camry = catalog.record("camry").expect("camry");
        assert_eq!(camry.lookup("wheels").expect("lookup"), Some(json!(4)));
        assert_eq!(own_entries(camry).count(), 1);
    }

    #[test]
    fn unknown_parent_is_reported_with_context() {
        let err = Catalog::from_spec(&spec(json!({
            "templates": { "car": { "parent": "ghost" } }
        })))
        .expect_err("unknown parent");

        assert!(matches!(err, RecordError::UnknownTemplate { .. }));
        assert!(err.to_string().contains("parent of template 'car'"));
    }

    #[test]
    fn parent_loops_are_rejected() {
        let err = Catalog::from_spec(&spec(json!({
            "templates": {
                "a": { "parent": "b" },
                "b": { "parent": "a" }
            }
        })))
        .expect_err("loop");
        assert!(matches!(err, RecordError::CycleDetected { .. }));
    }

    #[test]
    fn primitive_record_fields_are_invalid_input() {
        let err = Catalog::from_spec(&spec(json!({
            "records": { "broken": { "fields": 42 } }
        })))
        .expect_err("primitive fields");
        assert!(matches!(err, RecordError::InvalidInput { .. }));
        assert!(err.to_string().contains("record 'broken'"));
    }

    #[test]
    fn hidden_names_must_exist() {
        let err = Catalog::from_spec(&spec(json!({
            "records": { "r": { "fields": { "a": 1 }, "hidden": ["b"] } }
        })))
        .expect_err("unknown hidden name");
        assert!(matches!(err, RecordError::InvalidInput { .. }));
    }

    #[test]
    fn hidden_record_fields_are_not_enumerated() {
        let catalog = Catalog::from_spec(&spec(json!({
            "records": { "r": { "fields": { "a": 1, "b": 2 }, "hidden": ["a"] } }
        })))
        .expect("catalog");

        let r = catalog.record("r").expect("record");
        assert!(r.has_own("a"));
        assert_eq!(r.own_keys().collect::<Vec<_>>(), ["b"]);
    }
}
