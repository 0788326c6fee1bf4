//! Column-name conventions and processing options.

use serde::{Deserialize, Serialize};

/// Column names of the variable-metadata table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataColumns {
    /// Accepted spellings of the key column, tried in order.
    pub key_aliases: Vec<String>,
    /// Display-label column attached to answer columns.
    pub label: String,
    /// Instrument membership column.
    pub instrument: String,
}

impl Default for MetadataColumns {
    fn default() -> Self {
        Self {
            key_aliases: vec![
                "Variable Name".to_string(),
                "Variablenname".to_string(),
                "VariableName".to_string(),
                "Variable_Name".to_string(),
            ],
            label: "Variablenlabel".to_string(),
            instrument: "Test".to_string(),
        }
    }
}

/// Column names of the raw HiTOP mapping table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingColumns {
    pub code: String,
    /// The two independent annotator columns.
    pub annotators: [String; 2],
    pub suggestion: String,
}

impl Default for MappingColumns {
    fn default() -> Self {
        Self {
            code: "Code".to_string(),
            annotators: ["Finn".to_string(), "Tim".to_string()],
            suggestion: "HiTOP_Spektrum_ai_suggestion".to_string(),
        }
    }
}

/// Options for spectrum score aggregation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringOptions {
    /// Prefix turning an item code into its standardized column name.
    pub z_prefix: String,
}

impl Default for ScoringOptions {
    fn default() -> Self {
        Self {
            z_prefix: "z_".to_string(),
        }
    }
}

impl ScoringOptions {
    pub fn with_z_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.z_prefix = prefix.into();
        self
    }

    /// Standardized column name for an item code.
    pub fn z_column(&self, code: &str) -> String {
        format!("{}{code}", self.z_prefix)
    }
}
