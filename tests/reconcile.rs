mod common;

use common::{int, record, text};
use proptest::prelude::*;
use reconcile_sheets::{
    Record, ReconcileError, Value, build_mapping, get_columns, normalize_key, reorder,
};

#[test]
fn normalize_key_equates_case_and_underscore_variants() {
    assert_eq!(normalize_key("User_ID"), normalize_key("userid"));
    assert_eq!(normalize_key("userid"), normalize_key("USERID"));
}

#[test]
fn normalize_key_keeps_spaces_significant() {
    assert_ne!(normalize_key("User ID"), normalize_key("UserID"));
}

proptest! {
    #[test]
    fn normalize_key_is_idempotent(name in "\\PC{0,24}") {
        let once = normalize_key(&name);
        prop_assert_eq!(normalize_key(&once), once.clone());
        prop_assert!(!once.contains('_'));
    }

    #[test]
    fn reorder_output_matches_source_cardinality_and_reference_columns(
        reference in proptest::collection::vec("[A-Za-z_]{1,6}", 1..6),
        source in proptest::collection::vec("[A-Za-z_]{1,6}", 1..6),
        rows in 1usize..8,
    ) {
        let a = vec![
            reference
                .iter()
                .map(|c| (c.as_str(), None::<Value>))
                .collect::<Record>(),
        ];
        let b = (0..rows)
            .map(|i| {
                source
                    .iter()
                    .map(|c| (c.as_str(), Some(Value::Integer(i as i64))))
                    .collect::<Record>()
            })
            .collect::<Vec<_>>();
        let result = reorder(&a, &b).expect("non-empty inputs");
        let expected = get_columns(&a);
        prop_assert_eq!(result.reordered.len(), rows);
        for aligned in &result.reordered {
            prop_assert_eq!(
                aligned.columns().collect::<Vec<_>>(),
                expected.iter().map(String::as_str).collect::<Vec<_>>()
            );
        }
    }
}

#[test]
fn disjoint_columns_produce_empty_mapping() {
    let mapping = build_mapping(&["Name", "Age"], &["city", "zip_code"]);
    assert!(mapping.is_empty());
}

#[test]
fn same_columns_in_different_order_map_by_name() {
    let mapping = build_mapping(&["Name", "Age"], &["age", "name"]);
    assert_eq!(mapping.get("Name"), Some("name"));
    assert_eq!(mapping.get("Age"), Some("age"));
    assert_eq!(mapping.len(), 2);

    let a = vec![record(&[("Name", text("X")), ("Age", int(30))])];
    let b = vec![record(&[("age", int(25)), ("name", text("Y"))])];
    let result = reorder(&a, &b).unwrap();
    assert_eq!(
        result.reordered[0].columns().collect::<Vec<_>>(),
        vec!["Name", "Age"]
    );
}

#[test]
fn duplicate_normalized_source_columns_resolve_to_last_occurrence() {
    let mapping = build_mapping(&["UserID"], &["user_id", "userId"]);
    assert_eq!(mapping.get("UserID"), Some("userId"));

    let a = vec![record(&[("UserID", None)])];
    let b = vec![record(&[("user_id", int(1)), ("userId", int(2))])];
    let result = reorder(&a, &b).unwrap();
    assert_eq!(result.reordered[0].value("UserID"), Some(&Value::Integer(2)));
}

#[test]
fn reorder_follows_source_cardinality() {
    let a = vec![record(&[("Name", text("X")), ("Age", int(30))])];
    let b = vec![
        record(&[("name", text("Y")), ("age", int(25))]),
        record(&[("name", text("Z")), ("age", int(40))]),
    ];
    let result = reorder(&a, &b).unwrap();
    assert_eq!(
        result.reordered,
        vec![
            record(&[("Name", text("Y")), ("Age", int(25))]),
            record(&[("Name", text("Z")), ("Age", int(40))]),
        ]
    );
    assert_eq!(
        result.mapping.iter().collect::<Vec<_>>(),
        vec![("Name", "name"), ("Age", "age")]
    );
}

#[test]
fn reorder_output_can_be_shorter_than_reference() {
    let a = vec![
        record(&[("Name", text("X")), ("Age", int(30))]),
        record(&[("Name", text("W")), ("Age", int(31))]),
        record(&[("Name", text("V")), ("Age", int(32))]),
    ];
    let b = vec![record(&[("age", int(25)), ("name", text("Y"))])];
    let result = reorder(&a, &b).unwrap();
    assert_eq!(result.reordered.len(), 1);
    assert_eq!(
        result.reordered[0],
        record(&[("Name", text("Y")), ("Age", int(25))])
    );
}

#[test]
fn reorder_rejects_empty_datasets() {
    let one = vec![record(&[("Name", text("X"))])];
    assert_eq!(reorder(&[], &one).unwrap_err(), ReconcileError::InvalidInput);
    assert_eq!(reorder(&one, &[]).unwrap_err(), ReconcileError::InvalidInput);
    assert_eq!(reorder(&[], &[]).unwrap_err(), ReconcileError::InvalidInput);
}

#[test]
fn unmatched_reference_column_is_null_everywhere() {
    let a = vec![record(&[("Name", text("X")), ("Email", text("x@example.com"))])];
    let b = vec![
        record(&[("name", text("Y")), ("phone", text("555"))]),
        record(&[("name", text("Z")), ("phone", text("556"))]),
    ];
    let result = reorder(&a, &b).unwrap();
    for aligned in &result.reordered {
        assert_eq!(aligned.get("Email"), Some(&None));
        assert!(!aligned.contains_key("phone"));
    }
}

#[test]
fn null_source_values_stay_null_and_empty_strings_stay_present() {
    let a = vec![record(&[("Note", None), ("Tag", None)])];
    let b = vec![record(&[("note", None), ("tag", text(""))])];
    let result = reorder(&a, &b).unwrap();
    assert_eq!(result.reordered[0].get("Note"), Some(&None));
    assert_eq!(result.reordered[0].value("Tag"), Some(&Value::from("")));
}

#[test]
fn get_columns_on_empty_dataset_is_empty() {
    assert!(get_columns(&[]).is_empty());
}
