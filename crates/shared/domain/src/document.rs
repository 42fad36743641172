//! Declarative description of templates and records.
//!
//! A document is plain data. Turning it into live templates and records (name
//! resolution, cycle checks, attribute handling) happens in `lineage-record`.
//!
//! ```json
//! {
//!   "templates": { "vehicle": { "fields": { "year": 2022 } } },
//!   "records": {
//!     "camry": { "template": "vehicle", "fields": { "make": "Toyota", "model": "Camry" } }
//!   }
//! }
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Root of a document. Both tables keep their declaration order.
#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DocumentSpec {
    pub templates: IndexMap<String, TemplateSpec>,
    pub records: IndexMap<String, RecordSpec>,
}

/// A named, shareable template.
#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TemplateSpec {
    /// Name of the template this one falls back to.
    pub parent: Option<String>,
    pub fields: Map<String, Value>,
    /// Field names defined as non-enumerable.
    pub hidden: Vec<String>,
}

/// A named record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RecordSpec {
    /// Name of the template the record falls back to.
    pub template: Option<String>,
    /// Own fields. Must be an object or an array; anything else is rejected when
    /// the record is built.
    pub fields: Value,
    /// Field names defined as non-enumerable.
    pub hidden: Vec<String>,
}

impl Default for RecordSpec {
    fn default() -> Self {
        Self { template: None, fields: Value::Object(Map::new()), hidden: Vec::new() }
    }
}

impl DocumentSpec {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty() && self.records.is_empty()
    }
}
