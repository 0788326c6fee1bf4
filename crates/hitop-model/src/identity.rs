//! Composite column identities.
//!
//! Every answer column carries a `(label, code)` pair once metadata has been
//! attached. The code is the stable identifier from the source table and is also
//! the column name inside the backing `DataFrame`; the label is the human-readable
//! item text, or a sentinel when the metadata table has no entry for the code.

use serde::{Deserialize, Serialize};

/// Prefix of the sentinel label used for codes without metadata.
pub const UNKNOWN_LABEL_PREFIX: &str = "Unknown";

/// Instrument name assigned to codes without a `Test` entry.
pub const UNKNOWN_INSTRUMENT: &str = "Unknown";

/// Label prefix marking diagnosis-flag columns.
pub const DIAGNOSIS_PREFIX: &str = "Diagnose";

/// Marker contained in the code of raw-score (sum) columns.
pub const RAW_SCORE_MARKER: &str = "rw";

/// Builds the sentinel label for a code that has no value in `metadata_field`.
pub fn unknown_label(metadata_field: &str) -> String {
    format!("{UNKNOWN_LABEL_PREFIX}: {metadata_field}")
}

/// Returns true when `code` names a raw-score column (case-insensitive).
pub fn is_raw_score_code(code: &str) -> bool {
    code.to_lowercase().contains(RAW_SCORE_MARKER)
}

/// Two-level column key: display label and stable code.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ColumnIdentity {
    pub label: String,
    pub code: String,
}

impl ColumnIdentity {
    pub fn new(label: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            code: code.into(),
        }
    }

    /// True for diagnosis-flag columns, which are replicated into every partition.
    pub fn is_diagnosis(&self) -> bool {
        self.label.starts_with(DIAGNOSIS_PREFIX)
    }

    /// True when the label is the unknown-metadata sentinel.
    pub fn is_unknown(&self) -> bool {
        self.label
            .strip_prefix(UNKNOWN_LABEL_PREFIX)
            .is_some_and(|rest| rest.starts_with(": "))
    }

    /// True for raw-score columns; checks both parts of the identity.
    pub fn is_raw_score(&self) -> bool {
        is_raw_score_code(&self.code) || is_raw_score_code(&self.label)
    }
}

impl std::fmt::Display for ColumnIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.label, self.code)
    }
}
