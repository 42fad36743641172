use lineage_domain::document::{DocumentSpec, RecordSpec};
use serde_json::json;

#[test]
fn document_keeps_declaration_order() {
    let raw = json!({
        "templates": {
            "zeta": { "fields": { "z": 1 } },
            "alpha": { "parent": "zeta", "fields": { "a": 1 } }
        },
        "records": {
            "second": { "fields": { "b": 2 } },
            "first": { "template": "alpha", "fields": { "a": 10 }, "hidden": ["a"] }
        }
    });

    let doc: DocumentSpec = serde_json::from_value(raw).expect("document deserialize");
    let templates: Vec<&str> = doc.templates.keys().map(String::as_str).collect();
    let records: Vec<&str> = doc.records.keys().map(String::as_str).collect();

    assert_eq!(templates, ["zeta", "alpha"]);
    assert_eq!(records, ["second", "first"]);
    assert_eq!(doc.templates["alpha"].parent.as_deref(), Some("zeta"));
    assert_eq!(doc.records["first"].hidden, ["a"]);
}

#[test]
fn record_fields_default_to_an_empty_object() {
    let spec: RecordSpec = serde_json::from_value(json!({ "template": "base" })).expect("record");
    assert_eq!(spec.fields, json!({}));
    assert!(spec.hidden.is_empty());
}

#[test]
fn unknown_sections_are_rejected() {
    let raw = json!({ "templates": {}, "recrods": {} });
    assert!(serde_json::from_value::<DocumentSpec>(raw).is_err());
}

#[test]
fn documents_parse_from_toml() {
    let raw = r#"
        [templates.settings]
        fields = { version = "1.0" }

        [records.preferences]
        template = "settings"
        fields = { theme = "dark", layout = "grid", sidebar = true }
    "#;

    let doc: DocumentSpec = toml::from_str(raw).expect("toml document");
    assert!(!doc.is_empty());
    assert_eq!(doc.records["preferences"].fields["sidebar"], json!(true));
    assert_eq!(doc.templates["settings"].fields["version"], json!("1.0"));
}
