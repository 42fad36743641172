use lineage_record::prelude::*;
use proptest::prelude::*;
use serde_json::Value;

fn assignments() -> impl Strategy<Value = Vec<(String, i64)>> {
    proptest::collection::vec(("[a-z0-9]{1,6}", any::<i64>()), 0..24)
}

/// Expected own pairs: first-assignment position, last-assignment value.
fn expected(assigned: &[(String, i64)]) -> Vec<(String, Value)> {
    let mut pairs: Vec<(String, Value)> = Vec::new();
    for (key, value) in assigned {
        match pairs.iter_mut().find(|(k, _)| k == key) {
            Some(slot) => slot.1 = Value::from(*value),
            None => pairs.push((key.clone(), Value::from(*value))),
        }
    }
    pairs
}

fn own_pairs(record: &Record) -> Vec<(String, Value)> {
    own_entries(record).map(|(k, v)| (k.into_owned(), v.clone())).collect()
}

proptest! {
    #[test]
    fn own_entries_match_assignments_whatever_the_template_holds(
        assigned in assignments(),
        pollution in assignments(),
    ) {
        let template = Template::new("shared");
        let mut record = Record::derived_from(&template);
        for (key, value) in &assigned {
            record.insert(key.clone(), *value).unwrap();
        }
        for (key, value) in &pollution {
            template.set(key.clone(), *value).unwrap();
        }

        prop_assert_eq!(own_pairs(&record), expected(&assigned));
    }

    #[test]
    fn own_entries_are_idempotent(assigned in assignments()) {
        let record: Record = assigned.iter().map(|(k, v)| (k.clone(), *v)).collect();
        prop_assert_eq!(own_pairs(&record), own_pairs(&record));
    }

    #[test]
    fn own_keys_are_a_subset_of_visible_keys(
        assigned in assignments(),
        inherited in assignments(),
    ) {
        let template =
            Template::from_entries("shared", inherited.iter().map(|(k, v)| (k.clone(), *v)));
        let mut record = Record::derived_from(&template);
        for (key, value) in &assigned {
            record.insert(key.clone(), *value).unwrap();
        }

        let visible: Vec<VisibleEntry> = visible_entries(&record).unwrap().collect();
        for (key, value) in own_pairs(&record) {
            let entry = visible.iter().find(|e| e.key == key).unwrap();
            prop_assert!(entry.origin.is_own());
            prop_assert_eq!(&entry.value, &value);
        }

        let mut keys: Vec<_> = visible.iter().map(|e| e.key.as_str()).collect();
        let total = keys.len();
        keys.sort_unstable();
        keys.dedup();
        prop_assert_eq!(keys.len(), total, "visible keys must be unique");
    }

    #[test]
    fn index_first_is_a_permutation_of_insertion_order(assigned in assignments()) {
        let record: Record = assigned.iter().map(|(k, v)| (k.clone(), *v)).collect();
        let enumerator = Enumerator::builder().order(KeyOrder::IndexFirst).build().unwrap();

        let mut reordered: Vec<_> =
            enumerator.own_entries(&record).map(|(k, _)| k.into_owned()).collect();
        let mut plain: Vec<_> = own_entries(&record).map(|(k, _)| k.into_owned()).collect();

        let indices: Vec<u32> =
            reordered.iter().map_while(|k| lineage_record::is_array_index(k)).collect();
        prop_assert!(indices.windows(2).all(|w| w[0] < w[1]));

        reordered.sort();
        plain.sort();
        prop_assert_eq!(reordered, plain);
    }
}
