//! End-to-end stages over a data directory.
//!
//! Missing input files are not errors here: the loaders report them as absent
//! and the affected result is `None`.

use polars::prelude::DataFrame;
use tracing::{info, warn};

use hitop_ingest::{
    DataPaths, DataType, VariableMetadata, load_data, load_mapping_table, read_optional_frame,
};
use hitop_model::{MappingColumns, MetadataColumns, ScoringOptions, Spectrum, SpectrumDictionary};

use crate::attach::attach_metadata;
use crate::error::Result;
use crate::partition::{QuestionnairePartitions, partition_by_questionnaire};
use crate::resolve::resolve_spectrum_mapping;
use crate::scoring::{ScoreTable, aggregate_spectrum_scores};

/// Pre- and post-therapy partitions for one data type.
#[derive(Debug, Clone, Default)]
pub struct ProcessedData {
    pub metadata: Option<VariableMetadata>,
    pub pre: Option<QuestionnairePartitions>,
    pub post: Option<QuestionnairePartitions>,
}

/// Loads a dataset, labels its columns and splits it by questionnaire.
///
/// Both tables are partitioned with diagnosis columns included.
pub fn load_and_process(
    paths: &DataPaths,
    data_type: DataType,
    columns: &MetadataColumns,
) -> Result<ProcessedData> {
    let loaded = load_data(paths, data_type, columns)?;
    let Some(metadata) = loaded.metadata else {
        warn!("variable metadata unavailable, skipping partitioning");
        return Ok(ProcessedData::default());
    };

    let label_field = columns.label.as_str();
    let partition = |table: Option<DataFrame>| -> Result<Option<QuestionnairePartitions>> {
        table
            .map(|table| {
                let labeled = attach_metadata(&table, &metadata, label_field)?;
                partition_by_questionnaire(&labeled, &metadata, true)
            })
            .transpose()
    };
    let pre = partition(loaded.pre)?;
    let post = partition(loaded.post)?;

    info!(
        data_type = %data_type,
        pre = pre.as_ref().map_or(0, QuestionnairePartitions::len),
        post = post.as_ref().map_or(0, QuestionnairePartitions::len),
        "processed questionnaire data"
    );
    Ok(ProcessedData {
        metadata: Some(metadata),
        pre,
        post,
    })
}

/// Loads the mapping table and resolves it against every spectrum, the
/// reverse-keyed marker included.
pub fn load_spectrum_dictionary(
    paths: &DataPaths,
    columns: &MappingColumns,
) -> Result<SpectrumDictionary> {
    let raw = load_mapping_table(&paths.hitop_mapping(), columns)?;
    resolve_spectrum_mapping(&raw, &Spectrum::ALL, columns)
}

/// Scores the standardized pre-therapy table. `None` when that table is absent.
pub fn compute_scores(
    paths: &DataPaths,
    mapping_columns: &MappingColumns,
    options: &ScoringOptions,
) -> Result<Option<ScoreTable>> {
    let Some(standardized) = read_optional_frame(&paths.pre_dataset(DataType::Standardized))?
    else {
        return Ok(None);
    };
    let dictionary = load_spectrum_dictionary(paths, mapping_columns)?;
    aggregate_spectrum_scores(dictionary, &standardized, options).map(Some)
}
