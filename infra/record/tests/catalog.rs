use lineage_record::prelude::*;
use serde_json::json;

const DOCUMENT: &str = r#"{
    "templates": {
        "defaults": { "fields": { "version": "1.0", "internal": 0 }, "hidden": ["internal"] },
        "vehicle": { "fields": { "year": 2022 } }
    },
    "records": {
        "camry": { "template": "vehicle", "fields": { "make": "Toyota", "model": "Camry" } },
        "settings": {
            "template": "defaults",
            "fields": { "theme": "dark", "layout": "grid", "sidebar": true }
        },
        "tags": { "fields": ["red", "blue"] }
    }
}"#;

#[test]
fn document_builds_into_named_records() {
    let catalog = Catalog::from_json(DOCUMENT).expect("catalog");

    assert_eq!(catalog.template_count(), 2);
    assert_eq!(catalog.record_names().collect::<Vec<_>>(), ["camry", "settings", "tags"]);

    let camry = catalog.record("camry").expect("camry");
    let keys: Vec<_> = own_entries(camry).map(|(k, _)| k.into_owned()).collect();
    assert_eq!(keys, ["make", "model"]);

    let tags = catalog.record("tags").expect("tags");
    assert_eq!(tags.get_own("1"), Some(&json!("blue")));
}

#[test]
fn hidden_template_fields_stay_out_of_visible_entries() {
    let catalog = Catalog::from_json(DOCUMENT).expect("catalog");
    let settings = catalog.record("settings").expect("settings");

    let keys: Vec<_> = visible_entries(settings).expect("visible").map(|e| e.key).collect();
    assert_eq!(keys, ["theme", "layout", "sidebar", "version"]);
    assert_eq!(settings.lookup("internal").expect("lookup"), Some(json!(0)));
}

#[test]
fn catalog_templates_are_shared_with_records() {
    let mut catalog = Catalog::from_json(DOCUMENT).expect("catalog");
    catalog.template("vehicle").expect("vehicle").set("wheels", 4).expect("set");

    let camry = catalog.record_mut("camry").expect("camry");
    assert_eq!(camry.lookup("wheels").expect("lookup"), Some(json!(4)));
    assert!(!camry.has_own("wheels"));
}

#[test]
fn malformed_documents_are_serialization_errors() {
    let err = Catalog::from_json("{ \"templates\": ").expect_err("truncated");
    assert!(matches!(err, RecordError::Serialization { .. }));

    let err = Catalog::from_json(r#"{ "extra": {} }"#).expect_err("unknown section");
    assert!(matches!(err, RecordError::Serialization { .. }));
}

#[test]
fn unknown_record_template_is_reported() {
    let err = Catalog::from_json(r#"{ "records": { "r": { "template": "nope" } } }"#)
        .expect_err("unknown template");
    assert!(matches!(err, RecordError::UnknownTemplate { .. }));
    assert!(err.to_string().contains("template of record 'r'"));
}
