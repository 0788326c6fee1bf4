//! Data model for the HiTOP questionnaire pipeline.

pub mod error;
pub mod identity;
pub mod lookup;
pub mod options;
pub mod spectrum;

pub use error::{ModelError, Result};
pub use identity::{
    ColumnIdentity, DIAGNOSIS_PREFIX, RAW_SCORE_MARKER, UNKNOWN_INSTRUMENT, UNKNOWN_LABEL_PREFIX,
    is_raw_score_code, unknown_label,
};
pub use lookup::CaseInsensitiveNames;
pub use options::{MappingColumns, MetadataColumns, ScoringOptions};
pub use spectrum::{Spectrum, SpectrumDictionary};
