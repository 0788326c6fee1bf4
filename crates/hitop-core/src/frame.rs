//! Answer tables with composite column identities.
//!
//! This module provides the [`LabeledFrame`] type which wraps a Polars DataFrame
//! with one [`ColumnIdentity`] per column. The DataFrame columns are named by
//! code; identities are kept in a parallel vector with index correspondence, so
//! `identities()[i]` always describes `data().get_columns()[i]`.

use polars::prelude::{Column, DataFrame};

use hitop_model::ColumnIdentity;

use crate::error::{CoreError, Result};

/// An answer table whose columns carry `(label, code)` identities.
#[derive(Debug, Clone)]
pub struct LabeledFrame {
    data: DataFrame,
    identities: Vec<ColumnIdentity>,
}

impl LabeledFrame {
    /// Pairs a frame with identities, checking that codes match column names.
    pub fn new(data: DataFrame, identities: Vec<ColumnIdentity>) -> Result<Self> {
        if identities.len() != data.width() {
            return Err(CoreError::IdentityCount {
                identities: identities.len(),
                columns: data.width(),
            });
        }
        for (index, (identity, column)) in identities
            .iter()
            .zip(data.get_column_names_str())
            .enumerate()
        {
            if identity.code != column {
                return Err(CoreError::IdentityMismatch {
                    index,
                    identity: identity.code.clone(),
                    column: column.to_string(),
                });
            }
        }
        Ok(Self { data, identities })
    }

    pub fn data(&self) -> &DataFrame {
        &self.data
    }

    pub fn identities(&self) -> &[ColumnIdentity] {
        &self.identities
    }

    pub fn codes(&self) -> Vec<&str> {
        self.identities.iter().map(|i| i.code.as_str()).collect()
    }

    pub fn labels(&self) -> Vec<&str> {
        self.identities.iter().map(|i| i.label.as_str()).collect()
    }

    /// Number of patients.
    pub fn height(&self) -> usize {
        self.data.height()
    }

    /// Number of answer columns.
    pub fn width(&self) -> usize {
        self.identities.len()
    }

    pub fn identity(&self, code: &str) -> Option<&ColumnIdentity> {
        self.identities.iter().find(|i| i.code == code)
    }

    pub fn column(&self, code: &str) -> Result<&Column> {
        self.data
            .column(code)
            .map_err(|_| CoreError::MissingColumn {
                column: code.to_string(),
                table: "labeled frame".to_string(),
            })
    }

    /// Identities of the diagnosis-flag columns, in column order.
    pub fn diagnosis_identities(&self) -> Vec<&ColumnIdentity> {
        self.identities.iter().filter(|i| i.is_diagnosis()).collect()
    }

    /// Builds a new frame from the given identities, in the given order.
    ///
    /// The result owns its own column handles; later mutation of either frame
    /// does not affect the other.
    pub fn select(&self, identities: &[ColumnIdentity]) -> Result<LabeledFrame> {
        let mut columns = Vec::with_capacity(identities.len());
        for identity in identities {
            columns.push(self.column(&identity.code)?.clone());
        }
        let data = if columns.is_empty() {
            DataFrame::empty()
        } else {
            DataFrame::new(columns)?
        };
        LabeledFrame::new(data, identities.to_vec())
    }

    /// Appends a column with its identity.
    pub fn push_column(&mut self, identity: ColumnIdentity, column: Column) -> Result<()> {
        if self.data.get_column_names_str().contains(&identity.code.as_str()) {
            return Err(CoreError::DuplicateColumn(identity.code));
        }
        let column = column.with_name(identity.code.as_str().into());
        self.data.with_column(column)?;
        self.identities.push(identity);
        Ok(())
    }

    /// Splits into the underlying frame and identities.
    pub fn into_parts(self) -> (DataFrame, Vec<ColumnIdentity>) {
        (self.data, self.identities)
    }
}
