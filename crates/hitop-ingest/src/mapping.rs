//! Raw HiTOP mapping table loading.

use std::path::Path;

use polars::prelude::DataFrame;
use tracing::debug;

use hitop_model::MappingColumns;

use crate::csv::read_csv_frame;
use crate::error::{IngestError, Result};

/// Checks that the code, annotator and suggestion columns are present.
pub fn require_mapping_columns(frame: &DataFrame, columns: &MappingColumns) -> Result<()> {
    let present = frame.get_column_names_str();
    let required = std::iter::once(&columns.code)
        .chain(columns.annotators.iter())
        .chain(std::iter::once(&columns.suggestion));
    for column in required {
        if !present.contains(&column.as_str()) {
            return Err(IngestError::MissingColumn {
                column: column.clone(),
                table: "HiTOP mapping".to_string(),
            });
        }
    }
    Ok(())
}

/// Loads the annotated HiTOP mapping table from a CSV file.
pub fn load_mapping_table(path: &Path, columns: &MappingColumns) -> Result<DataFrame> {
    let frame = read_csv_frame(path)?;
    require_mapping_columns(&frame, columns)?;
    debug!(
        path = %path.display(),
        rows = frame.height(),
        "loaded HiTOP mapping table"
    );
    Ok(frame)
}
