//! Variable-metadata table handling.
//!
//! The metadata table maps each answer-column code (`Variable Name`) to its item
//! text (`Variablenlabel`) and the instrument it belongs to (`Test`). Exports of
//! this table repeat keys; the first row for a key is authoritative.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use polars::prelude::{AnyValue, BooleanChunked, DataFrame, NewChunkedArray};
use tracing::{debug, warn};

use hitop_model::{CaseInsensitiveNames, MetadataColumns};

use crate::csv::read_csv_frame;
use crate::error::{IngestError, Result};
use crate::polars_utils::{any_to_string_non_empty, column_strings};

/// De-duplicated variable-metadata table.
#[derive(Debug, Clone)]
pub struct VariableMetadata {
    frame: DataFrame,
    key_column: String,
    columns: MetadataColumns,
}

impl VariableMetadata {
    /// Wraps a metadata frame, dropping repeated keys (first occurrence wins).
    pub fn from_frame(frame: DataFrame, columns: MetadataColumns) -> Result<Self> {
        let names = CaseInsensitiveNames::new(frame.get_column_names_str());
        let key_column = names
            .find_any(&columns.key_aliases)
            .map(str::to_string)
            .ok_or_else(|| IngestError::MissingColumn {
                column: columns
                    .key_aliases
                    .first()
                    .cloned()
                    .unwrap_or_else(|| "Variable Name".to_string()),
                table: "variable metadata".to_string(),
            })?;

        let key = frame.column(&key_column)?;
        let mut seen = HashSet::new();
        let mask: Vec<bool> = (0..frame.height())
            .map(|idx| {
                let value = key.get(idx).unwrap_or(AnyValue::Null);
                seen.insert(any_to_string_non_empty(value))
            })
            .collect();
        let duplicates = mask.iter().filter(|keep| !**keep).count();
        let frame = if duplicates > 0 {
            warn!(
                key_column = %key_column,
                duplicates,
                "duplicate keys in variable metadata, keeping first occurrence"
            );
            frame.filter(&BooleanChunked::from_slice("keep".into(), &mask))?
        } else {
            frame
        };

        Ok(Self {
            frame,
            key_column,
            columns,
        })
    }

    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    pub fn key_column(&self) -> &str {
        &self.key_column
    }

    pub fn columns(&self) -> &MetadataColumns {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.frame.height()
    }

    pub fn is_empty(&self) -> bool {
        self.frame.height() == 0
    }

    /// Builds `code -> value` for a metadata field. Blank values are omitted.
    pub fn lookup(&self, field: &str) -> Result<BTreeMap<String, String>> {
        let names = CaseInsensitiveNames::new(self.frame.get_column_names_str());
        let field_column = names
            .get(field)
            .ok_or_else(|| IngestError::MissingColumn {
                column: field.to_string(),
                table: "variable metadata".to_string(),
            })?;
        let keys = column_strings(self.frame.column(&self.key_column)?);
        let values = column_strings(self.frame.column(field_column)?);
        let mut lookup = BTreeMap::new();
        for (key, value) in keys.into_iter().zip(values) {
            if let (Some(key), Some(value)) = (key, value) {
                lookup.entry(key).or_insert(value);
            }
        }
        Ok(lookup)
    }

    /// `code -> display label` using the configured label column.
    pub fn labels(&self) -> Result<BTreeMap<String, String>> {
        self.lookup(&self.columns.label)
    }

    /// `code -> instrument` using the configured instrument column.
    pub fn instruments(&self) -> Result<BTreeMap<String, String>> {
        self.lookup(&self.columns.instrument)
    }
}

/// Loads the variable-metadata table from a CSV file.
pub fn load_variable_metadata(path: &Path, columns: MetadataColumns) -> Result<VariableMetadata> {
    let frame = read_csv_frame(path)?;
    let metadata = VariableMetadata::from_frame(frame, columns)?;
    debug!(
        path = %path.display(),
        variables = metadata.len(),
        "loaded variable metadata"
    );
    Ok(metadata)
}
