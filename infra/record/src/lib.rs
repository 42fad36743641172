//! Records with explicit fallback templates, and the enumerators that tell their own
//! fields apart from inherited ones.
//!
//! # Core Features
//!
//! - **Own enumeration**: [`own_entries`] yields exactly the fields assigned on a
//!   [`Record`]. The template is never consulted, so polluting a shared template can
//!   not leak keys into the result.
//! - **Explicit fallback**: a record links to a shared [`Template`] by handle. Lookups
//!   through the chain ([`Record::lookup`]) and the `for...in` style view
//!   ([`visible_entries`]) are separate, opt-in operations.
//! - **Attributes**: every property carries [`Attributes`]. Hidden properties are not
//!   enumerated but still shadow inherited ones; read-only properties reject writes.
//! - **Safe chains**: template links that would form a loop are rejected, and every
//!   walk is bounded by a maximum depth.
//! - **Catalogs**: [`Catalog`] builds named templates and records from a declarative
//!   [`DocumentSpec`](lineage_domain::document::DocumentSpec).
//!
//! # Examples
//!
//! ```rust
//! use lineage_record::{Origin, Record, Template, own_entries, visible_entries};
//! use serde_json::json;
//!
//! # fn main() -> Result<(), lineage_record::RecordError> {
//! let settings = Template::new("settings");
//! let mut user = Record::derived_from(&settings);
//! user.insert("theme", "dark")?;
//!
//! // Someone pollutes the shared template later on.
//! settings.set("version", "1.0")?;
//!
//! let own: Vec<_> = own_entries(&user).collect();
//! assert_eq!(own.len(), 1);
//! assert_eq!(own[0].1, &json!("dark"));
//!
//! let visible: Vec<_> = visible_entries(&user)?.collect();
//! assert_eq!(visible[1].key, "version");
//! assert_eq!(visible[1].origin, Origin::Inherited { template: "settings".into(), depth: 1 });
//! # Ok(())
//! # }
//! ```
//!
//! Generic containers go through [`own_entries_of`], which rejects values that are not
//! key-value containers:
//!
//! ```rust
//! use lineage_record::{RecordError, own_entries_of};
//! use serde_json::json;
//!
//! assert_eq!(own_entries_of(&json!({"a": 1})).unwrap().count(), 1);
//! assert!(matches!(own_entries_of(&json!(42)), Err(RecordError::InvalidInput { .. })));
//! ```

mod builder;
mod catalog;
mod enumerate;
mod error;
mod key;
mod property;
mod record;
mod template;

pub use crate::builder::EnumeratorBuilder;
pub use crate::catalog::Catalog;
pub use crate::enumerate::{
    Enumerator, Origin, OwnEntries, VisibleEntries, VisibleEntry, own_entries, own_entries_of,
    visible_entries,
};
pub use crate::error::{RecordError, RecordErrorExt};
pub use crate::key::is_array_index;
pub use crate::property::Property;
pub use crate::record::Record;
pub use crate::template::Template;
pub use lineage_domain::attributes::Attributes;
pub use lineage_domain::config::{EnumerationConfig, KeyOrder};

pub mod prelude {
    pub use crate::{
        Attributes, Catalog, Enumerator, KeyOrder, Origin, Record, RecordError, RecordErrorExt,
        Template, VisibleEntries, VisibleEntry, own_entries, own_entries_of, visible_entries,
    };
}
