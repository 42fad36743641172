use lineage_record::prelude::*;

/// The `vehicle` template with `year: 2022` and a `camry` record linked to it.
/// # Panics
/// * If a fixture field cannot be assigned.
#[must_use]
pub fn camry() -> (Template, Record) {
    let vehicle = Template::from_entries("vehicle", [("year", 2022)]);
    let mut camry = Record::derived_from(&vehicle);
    camry.insert("make", "Toyota").expect("make");
    camry.insert("model", "Camry").expect("model");
    (vehicle, camry)
}

/// A shared `defaults` template polluted with `version: "1.0"` after the
/// settings record was created.
/// # Panics
/// * If a fixture field cannot be assigned.
#[must_use]
pub fn polluted_settings() -> (Template, Record) {
    let defaults = Template::new("defaults");
    let mut settings = Record::derived_from(&defaults);
    settings.insert("theme", "dark").expect("theme");
    settings.insert("layout", "grid").expect("layout");
    settings.insert("sidebar", true).expect("sidebar");

    defaults.set("version", "1.0").expect("version");
    (defaults, settings)
}

/// Collects own entries as owned `(key, value)` pairs.
#[must_use]
pub fn own_pairs(record: &Record) -> Vec<(String, serde_json::Value)> {
    own_entries(record).map(|(k, v)| (k.into_owned(), v.clone())).collect()
}
