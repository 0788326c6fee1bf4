//! Tests for attaching metadata labels to answer columns.

use hitop_core::{LabeledFrame, attach_metadata};
use hitop_ingest::VariableMetadata;
use hitop_model::{ColumnIdentity, MetadataColumns};
use polars::prelude::{Column, DataFrame, IntoColumn, NamedFrom, Series};
use proptest::prelude::*;

fn metadata(rows: &[(&str, &str, &str)]) -> VariableMetadata {
    let codes: Vec<&str> = rows.iter().map(|r| r.0).collect();
    let labels: Vec<&str> = rows.iter().map(|r| r.1).collect();
    let tests: Vec<&str> = rows.iter().map(|r| r.2).collect();
    let frame = DataFrame::new(vec![
        Column::new("Variable Name".into(), codes),
        Column::new("Variablenlabel".into(), labels),
        Column::new("Test".into(), tests),
    ])
    .expect("metadata frame");
    VariableMetadata::from_frame(frame, MetadataColumns::default()).expect("metadata")
}

fn answers(codes: &[String], rows: usize) -> DataFrame {
    let columns: Vec<Column> = codes
        .iter()
        .enumerate()
        .map(|(i, code)| {
            let values: Vec<Option<i64>> = (0..rows)
                .map(|r| (r % 3 != 2).then_some((i * rows + r) as i64))
                .collect();
            Series::new(code.as_str().into(), values).into_column()
        })
        .collect();
    if columns.is_empty() {
        DataFrame::empty()
    } else {
        DataFrame::new(columns).expect("answer frame")
    }
}

#[test]
fn labels_known_codes_and_marks_unknown() {
    let metadata = metadata(&[("BDI1", "Traurigkeit", "BDI-II")]);
    let table = answers(&["BDI1".to_string(), "X9".to_string()], 3);

    let labeled = attach_metadata(&table, &metadata, "Variablenlabel").expect("attach");

    assert_eq!(
        labeled.identities(),
        &[
            ColumnIdentity::new("Traurigkeit", "BDI1"),
            ColumnIdentity::new("Unknown: Variablenlabel", "X9"),
        ]
    );
    assert!(labeled.identities()[1].is_unknown());
}

#[test]
fn sentinel_names_the_requested_field() {
    let metadata = metadata(&[("BDI1", "Traurigkeit", "BDI-II")]);
    let table = answers(&["Q1".to_string()], 2);

    let labeled = attach_metadata(&table, &metadata, "Test").expect("attach");

    assert_eq!(labeled.labels(), vec!["Unknown: Test"]);
}

#[test]
fn duplicate_metadata_keys_use_first_label() {
    let metadata = metadata(&[
        ("BDI1", "Traurigkeit", "BDI-II"),
        ("BDI1", "Duplikat", "BDI-II"),
    ]);
    let table = answers(&["BDI1".to_string()], 1);

    let labeled = attach_metadata(&table, &metadata, "Variablenlabel").expect("attach");

    assert_eq!(labeled.labels(), vec!["Traurigkeit"]);
}

#[test]
fn attach_leaves_input_untouched() {
    let metadata = metadata(&[("BDI1", "Traurigkeit", "BDI-II")]);
    let table = answers(&["BDI1".to_string()], 3);
    let before = table.clone();

    let labeled = attach_metadata(&table, &metadata, "Variablenlabel").expect("attach");

    assert!(table.equals_missing(&before));
    assert!(labeled.data().equals_missing(&before));
}

#[test]
fn mismatched_identities_are_rejected() {
    let table = answers(&["A".to_string()], 1);
    let result = LabeledFrame::new(table, vec![ColumnIdentity::new("label", "B")]);
    assert!(result.is_err());
}

proptest! {
    #[test]
    fn attach_preserves_shape_and_is_idempotent(
        codes in prop::collection::btree_set("[A-Z]{1,3}[0-9]{0,2}", 0..8),
        rows in 0usize..6,
        described in prop::collection::vec(any::<bool>(), 8),
    ) {
        let codes: Vec<String> = codes.into_iter().collect();
        let rows_meta: Vec<(String, String)> = codes
            .iter()
            .zip(&described)
            .filter(|(_, keep)| **keep)
            .map(|(code, _)| (code.clone(), format!("label {code}")))
            .collect();
        let meta_rows: Vec<(&str, &str, &str)> = rows_meta
            .iter()
            .map(|(code, label)| (code.as_str(), label.as_str(), "X"))
            .collect();
        let metadata = metadata(&meta_rows);
        let table = answers(&codes, rows);

        let once = attach_metadata(&table, &metadata, "Variablenlabel").unwrap();
        prop_assert_eq!(once.width(), table.width());
        prop_assert_eq!(once.height(), table.height());
        prop_assert_eq!(once.codes(), codes.iter().map(String::as_str).collect::<Vec<_>>());

        let twice = attach_metadata(once.data(), &metadata, "Variablenlabel").unwrap();
        prop_assert_eq!(twice.identities(), once.identities());
        prop_assert!(twice.data().equals_missing(once.data()));
    }
}
