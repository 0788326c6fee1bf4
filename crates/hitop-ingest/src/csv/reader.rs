//! CSV file reading into Polars DataFrames.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use polars::prelude::{Column, CsvReadOptions, DataFrame, SerReader};
use tracing::{debug, warn};

use crate::error::{IngestError, Result};

use super::header::{HeaderPlan, parse_csv_line};

fn open(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IngestError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IngestError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })
}

/// Reads the header names of a CSV file as written (BOM stripped).
pub fn read_csv_header(path: &Path) -> Result<Vec<String>> {
    let mut reader = BufReader::new(open(path)?);
    let mut line = String::new();
    let bytes = reader
        .read_line(&mut line)
        .map_err(|e| IngestError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
    let line = line.trim_end_matches(['\r', '\n']);
    let line = line.strip_prefix('\u{feff}').unwrap_or(line);
    if bytes == 0 || line.trim().is_empty() {
        return Err(IngestError::EmptyCsv {
            path: path.to_path_buf(),
        });
    }
    Ok(parse_csv_line(line))
}

/// Reads a CSV file into a DataFrame, one column per header entry.
///
/// A header that repeats a name keeps only the first column with that name;
/// later duplicates are dropped, not merged.
pub fn read_csv_frame(path: &Path) -> Result<DataFrame> {
    let header = read_csv_header(path)?;

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(None)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
        .finish()
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    debug!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        "read csv"
    );

    let plan = HeaderPlan::new(header);
    if !plan.has_duplicates() {
        return Ok(df);
    }
    if plan.columns.len() != df.width() {
        return Err(IngestError::CsvParse {
            path: path.to_path_buf(),
            message: format!(
                "header has {} names but {} columns were parsed",
                plan.columns.len(),
                df.width()
            ),
        });
    }
    warn!(
        path = %path.display(),
        dropped = ?plan.dropped(),
        "duplicate columns in header, keeping first occurrence"
    );
    // Polars suffixes repeated names; restore the written names before selecting.
    let columns: Vec<Column> = df
        .get_columns()
        .iter()
        .zip(plan.columns.iter())
        .map(|(column, name)| column.clone().with_name(name.as_str().into()))
        .collect();
    keep_first_columns(columns)
}

/// Builds a DataFrame from columns, keeping the first column of each name.
pub fn keep_first_columns(columns: Vec<Column>) -> Result<DataFrame> {
    let names: Vec<String> = columns.iter().map(|c| c.name().to_string()).collect();
    let plan = HeaderPlan::new(names);
    let kept: Vec<Column> = columns
        .into_iter()
        .enumerate()
        .filter(|(idx, _)| plan.keep.contains(idx))
        .map(|(_, column)| column)
        .collect();
    Ok(DataFrame::new(kept)?)
}
