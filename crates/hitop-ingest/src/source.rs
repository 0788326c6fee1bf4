//! Data source selection and dataset loading.
//!
//! A data directory holds the raw exports under `data/raw` and the sampled
//! subset under `data/processed`. Each dataset comes as a pre-therapy and a
//! post-therapy table that share the variable-metadata table.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use polars::prelude::DataFrame;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use hitop_model::MetadataColumns;

use crate::csv::read_csv_frame;
use crate::error::{IngestError, Result};
use crate::metadata::{VariableMetadata, load_variable_metadata};

/// Which variant of the pre/post datasets to load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DataType {
    /// Full exports as delivered (`raw` or `original`).
    Original,
    /// Z-scored exports used for spectrum scoring.
    Standardized,
    /// Random patient subset (`processed` or `sampled`).
    #[default]
    Sampled,
}

impl DataType {
    pub fn as_str(self) -> &'static str {
        match self {
            DataType::Original => "original",
            DataType::Standardized => "standardized",
            DataType::Sampled => "sampled",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DataType {
    type Err = IngestError;

    fn from_str(value: &str) -> Result<Self> {
        match value {
            "raw" | "original" => Ok(DataType::Original),
            "standardized" => Ok(DataType::Standardized),
            "processed" | "sampled" => Ok(DataType::Sampled),
            other => Err(IngestError::InvalidDataType {
                value: other.to_string(),
            }),
        }
    }
}

/// File layout of a data directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataPaths {
    pub base_dir: PathBuf,
    pub mapping_file: Option<PathBuf>,
}

impl DataPaths {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            mapping_file: None,
        }
    }

    /// Overrides the location of the HiTOP mapping table.
    pub fn with_mapping_file(mut self, path: Option<PathBuf>) -> Self {
        self.mapping_file = path;
        self
    }

    pub fn raw_dir(&self) -> PathBuf {
        self.base_dir.join("data").join("raw")
    }

    pub fn processed_dir(&self) -> PathBuf {
        self.base_dir.join("data").join("processed")
    }

    pub fn test_variables(&self) -> PathBuf {
        self.raw_dir().join("test_variables.csv")
    }

    pub fn hitop_mapping(&self) -> PathBuf {
        self.mapping_file
            .clone()
            .unwrap_or_else(|| self.raw_dir().join("hitop_mapping.csv"))
    }

    pub fn pre_dataset(&self, data_type: DataType) -> PathBuf {
        self.dataset(data_type, "pre")
    }

    pub fn post_dataset(&self, data_type: DataType) -> PathBuf {
        self.dataset(data_type, "post")
    }

    fn dataset(&self, data_type: DataType, phase: &str) -> PathBuf {
        match data_type {
            DataType::Original => self.raw_dir().join(format!("{phase}_dataset.csv")),
            DataType::Standardized => self
                .raw_dir()
                .join(format!("{phase}_dataset_standardized.csv")),
            DataType::Sampled => self.processed_dir().join(format!("{phase}_dataset.csv")),
        }
    }
}

/// Tables loaded for one data type. Absent files are `None`.
#[derive(Debug, Clone, Default)]
pub struct LoadedData {
    pub metadata: Option<VariableMetadata>,
    pub pre: Option<DataFrame>,
    pub post: Option<DataFrame>,
}

/// Reads a CSV file, mapping a missing file to `None`.
pub fn read_optional_frame(path: &Path) -> Result<Option<DataFrame>> {
    info!(path = %path.display(), "loading file");
    match read_csv_frame(path) {
        Ok(frame) => Ok(Some(frame)),
        Err(IngestError::FileNotFound { path }) => {
            warn!(path = %path.display(), "file not found");
            Ok(None)
        }
        Err(error) => Err(error),
    }
}

/// Loads the metadata, pre and post tables for a data type.
pub fn load_data(
    paths: &DataPaths,
    data_type: DataType,
    columns: &MetadataColumns,
) -> Result<LoadedData> {
    let pre = read_optional_frame(&paths.pre_dataset(data_type))?;
    let post = read_optional_frame(&paths.post_dataset(data_type))?;

    let metadata_path = paths.test_variables();
    let metadata = match load_variable_metadata(&metadata_path, columns.clone()) {
        Ok(metadata) => Some(metadata),
        Err(IngestError::FileNotFound { path }) => {
            warn!(path = %path.display(), "file not found");
            None
        }
        Err(error) => return Err(error),
    };

    Ok(LoadedData {
        metadata,
        pre,
        post,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_type_aliases() {
        assert_eq!("raw".parse::<DataType>().unwrap(), DataType::Original);
        assert_eq!("original".parse::<DataType>().unwrap(), DataType::Original);
        assert_eq!("processed".parse::<DataType>().unwrap(), DataType::Sampled);
        assert_eq!(
            "standardized".parse::<DataType>().unwrap(),
            DataType::Standardized
        );
    }

    #[test]
    fn test_data_type_rejects_unknown() {
        let err = "excel".parse::<DataType>().unwrap_err();
        assert!(matches!(err, IngestError::InvalidDataType { ref value } if value == "excel"));
    }

    #[test]
    fn test_dataset_paths() {
        let paths = DataPaths::new("/study");
        assert_eq!(
            paths.pre_dataset(DataType::Standardized),
            PathBuf::from("/study/data/raw/pre_dataset_standardized.csv")
        );
        assert_eq!(
            paths.post_dataset(DataType::Sampled),
            PathBuf::from("/study/data/processed/post_dataset.csv")
        );
        assert_eq!(
            paths.test_variables(),
            PathBuf::from("/study/data/raw/test_variables.csv")
        );
    }
}
