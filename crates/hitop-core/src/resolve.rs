//! Resolving annotated HiTOP mapping rows into a spectrum dictionary.

use polars::prelude::{AnyValue, DataFrame};
use regex::Regex;
use tracing::{debug, info};

use hitop_ingest::{any_to_string, column_strings, require_mapping_columns};
use hitop_model::{MappingColumns, Spectrum, SpectrumDictionary};

use crate::error::Result;
use crate::normalize::{is_blank_annotation, is_excluded, normalize_annotation};

/// A mapping row after exclusion, normalization and fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingRow {
    pub code: String,
    /// Final mapping text; `None` when neither annotators nor the suggestion
    /// provide one.
    pub mapping: Option<String>,
}

/// Cleans the raw mapping table into one [`MappingRow`] per kept code.
///
/// Rows where either annotator wrote `raus` are dropped, as are rows without a
/// code. Annotator texts are concatenated, normalized and, when missing,
/// replaced by the trimmed suggestion.
pub fn clean_mapping_rows(raw: &DataFrame, columns: &MappingColumns) -> Result<Vec<MappingRow>> {
    require_mapping_columns(raw, columns)?;

    let codes = column_strings(raw.column(&columns.code)?);
    let suggestions = column_strings(raw.column(&columns.suggestion)?);
    let [first, second] = &columns.annotators;
    let first = raw.column(first)?;
    let second = raw.column(second)?;

    let mut rows = Vec::with_capacity(raw.height());
    let mut excluded = 0usize;
    for (idx, (code, suggestion)) in codes.into_iter().zip(suggestions).enumerate() {
        let annotations = [
            any_to_string(first.get(idx).unwrap_or(AnyValue::Null)),
            any_to_string(second.get(idx).unwrap_or(AnyValue::Null)),
        ];
        if annotations.iter().any(|text| is_excluded(text)) {
            excluded += 1;
            continue;
        }
        let Some(code) = code else {
            continue;
        };

        let combined = annotations.concat();
        let mapping = if is_blank_annotation(&combined) {
            None
        } else {
            Some(normalize_annotation(&combined)).filter(|text| !text.is_empty())
        };
        rows.push(MappingRow {
            code,
            mapping: mapping.or(suggestion),
        });
    }

    debug!(rows = rows.len(), excluded, "cleaned HiTOP mapping rows");
    Ok(rows)
}

/// Builds `spectrum -> codes` from the raw mapping table.
///
/// Each row is tested against every spectrum in `known_spectra` by
/// case-insensitive whole-word match on any of the spectrum's names. A row may
/// land in several buckets; rows matching nothing are ignored. Every spectrum in
/// `known_spectra` has a bucket in the result, empty or not.
pub fn resolve_spectrum_mapping(
    raw: &DataFrame,
    known_spectra: &[Spectrum],
    columns: &MappingColumns,
) -> Result<SpectrumDictionary> {
    let rows = clean_mapping_rows(raw, columns)?;
    let matchers = spectrum_matchers(known_spectra)?;

    let mut dictionary = SpectrumDictionary::new(known_spectra);
    let mut unresolved = 0usize;
    for row in &rows {
        let Some(mapping) = row.mapping.as_deref() else {
            unresolved += 1;
            continue;
        };
        let mut matched = false;
        for (spectrum, patterns) in &matchers {
            if patterns.iter().any(|pattern| pattern.is_match(mapping)) {
                dictionary.push(*spectrum, row.code.clone());
                matched = true;
            }
        }
        if !matched {
            unresolved += 1;
        }
    }

    info!(
        rows = rows.len(),
        unresolved,
        spectra = dictionary.len(),
        "resolved HiTOP spectrum mapping"
    );
    Ok(dictionary)
}

fn spectrum_matchers(known_spectra: &[Spectrum]) -> Result<Vec<(Spectrum, Vec<Regex>)>> {
    known_spectra
        .iter()
        .map(|spectrum| -> Result<(Spectrum, Vec<Regex>)> {
            let patterns = spectrum
                .aliases()
                .iter()
                .map(|alias| Regex::new(&format!(r"(?i)\b{}\b", regex::escape(alias))))
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok((*spectrum, patterns))
        })
        .collect()
}
