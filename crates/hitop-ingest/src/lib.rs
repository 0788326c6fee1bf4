//! Questionnaire data ingestion.
//!
//! This crate loads the three inputs of the HiTOP pipeline into Polars
//! DataFrames:
//!
//! - **Answer tables**: one row per patient, one column per answer code
//! - **Variable metadata**: code → item label and instrument (`Test`)
//! - **HiTOP mapping**: annotator free text per code
//!
//! # Example
//!
//! ```ignore
//! use hitop_ingest::{DataPaths, DataType, load_data};
//! use hitop_model::MetadataColumns;
//!
//! let paths = DataPaths::new(".");
//! let loaded = load_data(&paths, "processed".parse()?, &MetadataColumns::default())?;
//! ```

mod csv;
mod error;
mod mapping;
mod metadata;
mod polars_utils;
mod source;

// === Error Types ===
pub use error::{IngestError, Result};

// === CSV Reading ===
pub use csv::{HeaderPlan, keep_first_columns, parse_csv_line, read_csv_frame, read_csv_header};

// === Tables ===
pub use mapping::{load_mapping_table, require_mapping_columns};
pub use metadata::{VariableMetadata, load_variable_metadata};

// === Data Sources ===
pub use source::{DataPaths, DataType, LoadedData, load_data, read_optional_frame};

// === Value Conversion ===
pub use polars_utils::{
    any_to_f64, any_to_string, any_to_string_non_empty, column_f64, column_strings,
    format_numeric, parse_f64,
};
