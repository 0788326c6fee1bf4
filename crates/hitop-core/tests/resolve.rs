//! Tests for mapping normalization and spectrum resolution.

use hitop_core::{MappingRow, clean_mapping_rows, normalize_annotation, resolve_spectrum_mapping};
use hitop_model::{MappingColumns, Spectrum, SpectrumDictionary};
use polars::prelude::{Column, DataFrame};

type Row<'a> = (&'a str, Option<&'a str>, Option<&'a str>, Option<&'a str>);

fn mapping_table(rows: &[Row<'_>]) -> DataFrame {
    DataFrame::new(vec![
        Column::new("Fragebogen".into(), vec!["BDI-II"; rows.len()]),
        Column::new("Code".into(), rows.iter().map(|r| r.0).collect::<Vec<_>>()),
        Column::new("Finn".into(), rows.iter().map(|r| r.1).collect::<Vec<_>>()),
        Column::new("Tim".into(), rows.iter().map(|r| r.2).collect::<Vec<_>>()),
        Column::new(
            "HiTOP_Spektrum_ai_suggestion".into(),
            rows.iter().map(|r| r.3).collect::<Vec<_>>(),
        ),
    ])
    .expect("mapping frame")
}

fn resolve(rows: &[Row<'_>]) -> SpectrumDictionary {
    resolve_spectrum_mapping(
        &mapping_table(rows),
        &Spectrum::ALL,
        &MappingColumns::default(),
    )
    .expect("resolve")
}

#[test]
fn normalization_examples() {
    insta::assert_snapshot!(normalize_annotation("Disinhibiton"), @"Disinhibited Externalizing");
    insta::assert_snapshot!(normalize_annotation("Disinhibition"), @"Disinhibited Externalizing");
    insta::assert_snapshot!(normalize_annotation("Antagonism"), @"Antagonistic Externalizing");
    insta::assert_snapshot!(
        normalize_annotation("Antisocial Behavior"),
        @"Disinhibited Externalizing + Antagonistic Externalizing"
    );
    insta::assert_snapshot!(
        normalize_annotation("eher Antagnositc Externalising"),
        @"Antagonistic Externalizing"
    );
    insta::assert_snapshot!(normalize_annotation(" Internalising "), @"Internalizing");
}

#[test]
fn internalising_resolves_to_internalizing_only() {
    let dictionary = resolve(&[("Q7", Some("Internalising"), Some(""), None)]);

    assert_eq!(dictionary.codes(Spectrum::Internalizing), ["Q7"]);
    assert_eq!(dictionary.memberships("Q7"), vec![Spectrum::Internalizing]);
}

#[test]
fn antisocial_behavior_fans_out_to_two_spectra() {
    let dictionary = resolve(&[("Q3", None, Some("Antisocial Behavior"), None)]);

    assert_eq!(
        dictionary.memberships("Q3"),
        vec![
            Spectrum::DisinhibitedExternalizing,
            Spectrum::AntagonisticExternalizing
        ]
    );
}

#[test]
fn raus_excludes_row_from_every_bucket() {
    let dictionary = resolve(&[
        ("Q1", Some("Detachment"), Some("RAUS"), Some("Detachment")),
        ("Q2", Some("raus"), None, Some("Somatoform")),
        ("Q3", None, Some("Detachment (heraus?)"), None),
    ]);

    assert!(dictionary.memberships("Q1").is_empty());
    assert!(dictionary.memberships("Q2").is_empty());
    assert_eq!(dictionary.codes(Spectrum::Detachment), ["Q3"]);
}

#[test]
fn blank_annotation_falls_back_to_suggestion() {
    let rows = clean_mapping_rows(
        &mapping_table(&[
            ("Q1", Some(" ? "), None, Some(" Thought Disorder ")),
            ("Q2", None, Some("   "), Some("Somatoform")),
            ("Q3", None, None, None),
            ("Q4", Some("Detachment"), None, Some("Somatoform")),
        ]),
        &MappingColumns::default(),
    )
    .expect("clean");

    assert_eq!(
        rows,
        vec![
            MappingRow {
                code: "Q1".into(),
                mapping: Some("Thought Disorder".into())
            },
            MappingRow {
                code: "Q2".into(),
                mapping: Some("Somatoform".into())
            },
            MappingRow {
                code: "Q3".into(),
                mapping: None
            },
            MappingRow {
                code: "Q4".into(),
                mapping: Some("Detachment".into())
            },
        ]
    );
}

#[test]
fn spectrum_match_is_case_insensitive_whole_word() {
    let dictionary = resolve(&[
        ("Q1", Some("thought disorder"), None, None),
        ("Q2", Some("Detachments"), None, None),
        ("Q3", Some("Umpolen, Internalizing"), None, None),
        ("Q4", Some("unclear"), None, None),
    ]);

    assert_eq!(dictionary.codes(Spectrum::ThoughtDisorder), ["Q1"]);
    assert!(dictionary.codes(Spectrum::Detachment).is_empty());
    assert_eq!(
        dictionary.memberships("Q3"),
        vec![Spectrum::Internalizing, Spectrum::ReverseKeyed]
    );
    assert!(dictionary.memberships("Q4").is_empty());
}

#[test]
fn every_known_spectrum_has_a_bucket() {
    let dictionary = resolve(&[]);
    assert_eq!(dictionary.spectra().collect::<Vec<_>>(), Spectrum::ALL.to_vec());
}

#[test]
fn missing_annotator_column_is_an_error() {
    let frame = mapping_table(&[("Q1", None, None, None)])
        .drop("Tim")
        .expect("drop column");
    let result = resolve_spectrum_mapping(&frame, &Spectrum::ALL, &MappingColumns::default());
    assert!(result.is_err());
}
