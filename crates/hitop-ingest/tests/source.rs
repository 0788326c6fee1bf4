use std::fs;

use hitop_ingest::{
    DataPaths, DataType, IngestError, load_data, load_mapping_table, read_optional_frame,
};
use hitop_model::{MappingColumns, MetadataColumns};
use tempfile::TempDir;

#[test]
fn missing_files_load_as_none() {
    let dir = TempDir::new().expect("temp dir");
    let paths = DataPaths::new(dir.path());
    fs::create_dir_all(paths.raw_dir()).expect("raw dir");
    fs::create_dir_all(paths.processed_dir()).expect("processed dir");
    fs::write(paths.test_variables(), "Variable Name,Variablenlabel,Test\nQ1,a,X\n")
        .expect("write metadata");
    fs::write(paths.pre_dataset(DataType::Sampled), "Code,Q1\nP1,1\n").expect("write pre");

    let loaded =
        load_data(&paths, DataType::Sampled, &MetadataColumns::default()).expect("load data");

    assert!(loaded.metadata.is_some());
    assert_eq!(loaded.pre.as_ref().map(|df| df.height()), Some(1));
    assert!(loaded.post.is_none());
}

#[test]
fn optional_frame_propagates_parse_errors_only() {
    let dir = TempDir::new().expect("temp dir");
    let missing = dir.path().join("absent.csv");
    assert!(read_optional_frame(&missing).expect("missing is ok").is_none());

    let empty = dir.path().join("empty.csv");
    fs::write(&empty, "").expect("write empty");
    assert!(matches!(
        read_optional_frame(&empty),
        Err(IngestError::EmptyCsv { .. })
    ));
}

#[test]
fn mapping_table_requires_annotator_columns() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("hitop_mapping.csv");
    fs::write(&path, "Code,Finn,HiTOP_Spektrum_ai_suggestion\nQ1,Internalizing,\n")
        .expect("write mapping");

    let result = load_mapping_table(&path, &MappingColumns::default());

    assert!(matches!(
        result,
        Err(IngestError::MissingColumn { ref column, .. }) if column == "Tim"
    ));
}
