//! Tests for hitop-model types.

use hitop_model::{
    CaseInsensitiveNames, ColumnIdentity, ScoringOptions, Spectrum, SpectrumDictionary,
    is_raw_score_code,
};

#[test]
fn spectra_keep_declared_order() {
    let names: Vec<&str> = Spectrum::ALL.iter().map(|s| s.name()).collect();
    assert_eq!(
        names,
        vec![
            "Somatoform",
            "Internalizing",
            "Thought Disorder",
            "Detachment",
            "Disinhibited Externalizing",
            "Antagonistic Externalizing",
            "Reverse-keyed",
        ]
    );
    assert!(!Spectrum::HITOP.contains(&Spectrum::ReverseKeyed));
}

#[test]
fn spectrum_parses_names_and_aliases() {
    assert_eq!(
        "thought disorder".parse::<Spectrum>().unwrap(),
        Spectrum::ThoughtDisorder
    );
    assert_eq!("Umpolen".parse::<Spectrum>().unwrap(), Spectrum::ReverseKeyed);
    assert!("Neuroticism".parse::<Spectrum>().is_err());
}

#[test]
fn score_column_names() {
    assert_eq!(Spectrum::Detachment.score_column(), "Detachment_Score");
    assert_eq!(
        Spectrum::DisinhibitedExternalizing.z_score_column(),
        "Disinhibited Externalizing_Z_Score"
    );
}

#[test]
fn dictionary_tracks_multi_membership() {
    let mut dictionary = SpectrumDictionary::new(&Spectrum::ALL);
    dictionary.push(Spectrum::DisinhibitedExternalizing, "Q9");
    dictionary.push(Spectrum::AntagonisticExternalizing, "Q9");
    dictionary.push(Spectrum::ReverseKeyed, "Q9");

    assert_eq!(
        dictionary.memberships("Q9"),
        vec![
            Spectrum::DisinhibitedExternalizing,
            Spectrum::AntagonisticExternalizing,
            Spectrum::ReverseKeyed,
        ]
    );

    let reversed = dictionary.take_reverse_keyed();
    assert_eq!(reversed, vec!["Q9".to_string()]);
    assert!(!dictionary.contains_spectrum(Spectrum::ReverseKeyed));
    assert_eq!(dictionary.len(), 6);
    assert!(dictionary.codes(Spectrum::Somatoform).is_empty());
}

#[test]
fn diagnosis_and_raw_score_identities() {
    let diagnosis = ColumnIdentity::new("Diagnose 1", "DIAG1");
    assert!(diagnosis.is_diagnosis());
    assert!(!ColumnIdentity::new("Item 3", "BDI3").is_diagnosis());
    assert!(ColumnIdentity::new("Summenwert", "BDI_RW").is_raw_score());
    assert!(is_raw_score_code("scl_rw"));
    assert!(!is_raw_score_code("BDI3"));
}

#[test]
fn z_column_uses_prefix() {
    let options = ScoringOptions::default();
    assert_eq!(options.z_column("Q1"), "z_Q1");
    assert_eq!(options.with_z_prefix("std_").z_column("Q1"), "std_Q1");
}

#[test]
fn case_insensitive_names_find_first_candidate() {
    let names = CaseInsensitiveNames::new(["Code", "variablenname", "Test"]);
    assert_eq!(
        names.find_any(&["Variable Name", "Variablenname"]),
        Some("variablenname")
    );
    assert!(names.contains("CODE"));
    assert_eq!(names.get("missing"), None);
}
