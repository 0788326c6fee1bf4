//! HiTOP questionnaire processing.
//!
//! This crate turns loaded answer tables into analysis inputs:
//!
//! - **Attach**: label every answer column with its item text
//! - **Partition**: split a labeled table into per-questionnaire sub-tables,
//!   replicating diagnosis columns into each
//! - **Resolve**: turn annotator free text into a `spectrum -> codes` dictionary
//! - **Aggregate**: compute per-patient composite z-scores and CDF scores per
//!   spectrum
//!
//! # Example
//!
//! ```ignore
//! use hitop_core::{aggregate_spectrum_scores, resolve_spectrum_mapping};
//! use hitop_model::{MappingColumns, ScoringOptions, Spectrum};
//!
//! let dictionary = resolve_spectrum_mapping(&raw_mapping, &Spectrum::ALL, &MappingColumns::default())?;
//! let scores = aggregate_spectrum_scores(dictionary, &standardized, &ScoringOptions::default())?;
//! println!("{}", scores.select_scores("Patient")?);
//! ```

mod attach;
mod error;
mod frame;
mod normalize;
mod partition;
mod pipeline;
mod resolve;
mod scoring;

// === Error Types ===
pub use error::{CoreError, Result};

// === Labeled Tables ===
pub use attach::attach_metadata;
pub use frame::LabeledFrame;

// === Partitioning ===
pub use partition::{
    ColumnSelection, QuestionnairePartitions, add_diagnosis_presence, add_diagnosis_presence_all,
    count_answers, partition_by_questionnaire, slice_partitions,
};

// === Spectrum Mapping ===
pub use normalize::{
    RewriteRule, annotation_rewrites, is_blank_annotation, is_excluded, normalize_annotation,
};
pub use resolve::{MappingRow, clean_mapping_rows, resolve_spectrum_mapping};

// === Scoring ===
pub use scoring::{ScoreTable, SpectrumSummary, aggregate_spectrum_scores, normal_cdf};

// === Pipeline ===
pub use pipeline::{ProcessedData, compute_scores, load_and_process, load_spectrum_dictionary};
