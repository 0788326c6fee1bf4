//! Attaching metadata labels to answer-table columns.

use polars::prelude::DataFrame;
use tracing::{debug, info};

use hitop_ingest::VariableMetadata;
use hitop_model::{ColumnIdentity, unknown_label};

use crate::error::Result;
use crate::frame::LabeledFrame;

/// Assigns a `(label, code)` identity to every column of `table`.
///
/// Labels come from `metadata_field` in the metadata table, keyed by column
/// code. Codes the metadata does not describe get `"Unknown: <metadata_field>"`.
/// Row data, column count and column order are unchanged; `table` itself is
/// not modified.
pub fn attach_metadata(
    table: &DataFrame,
    metadata: &VariableMetadata,
    metadata_field: &str,
) -> Result<LabeledFrame> {
    let lookup = metadata.lookup(metadata_field)?;
    let sentinel = unknown_label(metadata_field);

    let mut unknown = 0usize;
    let identities: Vec<ColumnIdentity> = table
        .get_column_names_str()
        .into_iter()
        .map(|code| match lookup.get(code) {
            Some(label) => ColumnIdentity::new(label.clone(), code),
            None => {
                unknown += 1;
                debug!(code, field = metadata_field, "no metadata for column");
                ColumnIdentity::new(sentinel.clone(), code)
            }
        })
        .collect();

    info!(
        columns = identities.len(),
        unknown,
        field = metadata_field,
        "attached column metadata"
    );
    LabeledFrame::new(table.clone(), identities)
}
