//! Error types for the questionnaire pipeline.

use hitop_ingest::IngestError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Ingest(#[from] IngestError),

    /// Required column not found in a table.
    #[error("column '{column}' not found in {table}")]
    MissingColumn { column: String, table: String },

    /// A column with this name is already part of the table.
    #[error("column '{0}' already exists")]
    DuplicateColumn(String),

    /// Identities and DataFrame columns are out of step.
    #[error("identity for column {index} is '{identity}' but the column is '{column}'")]
    IdentityMismatch {
        index: usize,
        identity: String,
        column: String,
    },

    #[error("identity count {identities} does not match column count {columns}")]
    IdentityCount { identities: usize, columns: usize },

    #[error("invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for CoreError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;
