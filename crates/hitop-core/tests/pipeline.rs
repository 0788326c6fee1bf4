//! End-to-end tests over a data directory on disk.

use std::fs;
use std::path::Path;

use hitop_core::{compute_scores, load_and_process, load_spectrum_dictionary};
use hitop_ingest::{DataPaths, DataType, column_f64};
use hitop_model::{MappingColumns, MetadataColumns, ScoringOptions, Spectrum};
use tempfile::TempDir;

fn write(base: &Path, relative: &str, contents: &str) {
    let path = base.join(relative);
    fs::create_dir_all(path.parent().expect("parent")).expect("create dir");
    fs::write(path, contents).expect("write file");
}

fn study_dir() -> TempDir {
    let dir = TempDir::new().expect("temp dir");
    let base = dir.path();
    write(
        base,
        "data/raw/test_variables.csv",
        "Variable Name,Variablenlabel,Test\n\
         BDI1,Traurigkeit,BDI-II\n\
         BDI2,Pessimismus,BDI-II\n\
         SCL1,Kopfschmerzen,SCL-90\n\
         F32,Diagnose Depression,Diagnosen\n",
    );
    write(
        base,
        "data/raw/pre_dataset.csv",
        "Patient,BDI1,BDI2,SCL1,F32\n\
         P1,1,2,0,F32\n\
         P2,3,,1,\n",
    );
    write(
        base,
        "data/raw/hitop_mapping.csv",
        "Fragebogen,Code,Frage,HiTOP_Spektrum,HiTOP_Spektrum_ai_suggestion,Finn,Tim\n\
         BDI-II,BDI1,Traurigkeit,,Internalizing,Internalising,\n\
         BDI-II,BDI2,Pessimismus,,Internalizing,,Internalizing Umpolen\n\
         SCL-90,SCL1,Kopfschmerzen,,Somatoform,raus,\n",
    );
    write(
        base,
        "data/raw/pre_dataset_standardized.csv",
        "Patient,z_BDI1,z_BDI2,z_SCL1\n\
         P1,-1.0,1.0,0.5\n\
         P2,1.0,-1.0,-0.5\n",
    );
    dir
}

#[test]
fn loads_and_partitions_pre_dataset() {
    let dir = study_dir();
    let paths = DataPaths::new(dir.path());

    let processed =
        load_and_process(&paths, DataType::Original, &MetadataColumns::default()).expect("process");

    assert!(processed.metadata.is_some());
    assert!(processed.post.is_none());
    let pre = processed.pre.expect("pre partitions");
    assert_eq!(
        pre.keys().map(String::as_str).collect::<Vec<_>>(),
        vec!["BDI-II", "Diagnosen", "SCL-90"]
    );
    assert_eq!(pre["BDI-II"].codes(), vec!["BDI1", "BDI2", "F32"]);
    assert_eq!(
        pre["BDI-II"].labels(),
        vec!["Traurigkeit", "Pessimismus", "Diagnose Depression"]
    );
}

#[test]
fn missing_metadata_yields_no_partitions() {
    let dir = study_dir();
    fs::remove_file(dir.path().join("data/raw/test_variables.csv")).expect("remove");
    let paths = DataPaths::new(dir.path());

    let processed =
        load_and_process(&paths, DataType::Original, &MetadataColumns::default()).expect("process");

    assert!(processed.metadata.is_none());
    assert!(processed.pre.is_none());
}

#[test]
fn resolves_dictionary_from_mapping_file() {
    let dir = study_dir();
    let paths = DataPaths::new(dir.path());

    let dictionary =
        load_spectrum_dictionary(&paths, &MappingColumns::default()).expect("dictionary");

    assert_eq!(dictionary.codes(Spectrum::Internalizing), ["BDI1", "BDI2"]);
    assert_eq!(dictionary.codes(Spectrum::ReverseKeyed), ["BDI2"]);
    assert!(dictionary.codes(Spectrum::Somatoform).is_empty());
}

#[test]
fn computes_scores_from_standardized_dataset() {
    let dir = study_dir();
    let paths = DataPaths::new(dir.path());

    let scores = compute_scores(&paths, &MappingColumns::default(), &ScoringOptions::default())
        .expect("scores")
        .expect("standardized dataset present");

    // BDI2 is reverse-keyed: mean(-1, -1) and mean(1, 1).
    assert_eq!(
        column_f64(scores.data.column("Internalizing_Z_Score").expect("z score")),
        vec![Some(-1.0), Some(1.0)]
    );
    assert!(scores.skipped.contains(&Spectrum::Somatoform));
    let selected = scores.select_scores("Patient").expect("select");
    assert_eq!(
        selected.get_column_names_str(),
        vec!["Patient", "Internalizing_Score"]
    );
}

#[test]
fn missing_standardized_dataset_yields_none() {
    let dir = study_dir();
    fs::remove_file(dir.path().join("data/raw/pre_dataset_standardized.csv")).expect("remove");
    let paths = DataPaths::new(dir.path());

    let scores = compute_scores(&paths, &MappingColumns::default(), &ScoringOptions::default())
        .expect("scores");

    assert!(scores.is_none());
}
