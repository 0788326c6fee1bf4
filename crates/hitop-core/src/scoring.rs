//! Per-patient spectrum scores.
//!
//! A spectrum's composite z-score is the row mean of its standardized item
//! columns, reverse-keyed items sign-flipped, missing cells skipped. The score
//! is the standard normal CDF of that composite.

use std::collections::{BTreeMap, HashSet};
use std::f64::consts::SQRT_2;

use polars::prelude::{DataFrame, NamedFrom, Series};
use statrs::function::erf::erfc;
use tracing::{debug, info, warn};

use hitop_ingest::column_f64;
use hitop_model::{ScoringOptions, Spectrum, SpectrumDictionary, is_raw_score_code};

use crate::error::{CoreError, Result};

/// Standard normal cumulative distribution function.
pub fn normal_cdf(z: f64) -> f64 {
    0.5 * erfc(-z / SQRT_2)
}

/// The standardized table with score columns appended.
#[derive(Debug, Clone)]
pub struct ScoreTable {
    pub data: DataFrame,
    /// Standardized columns each scored spectrum was built from.
    pub columns_used: BTreeMap<Spectrum, Vec<String>>,
    /// Spectra without any usable column; they have no score columns.
    pub skipped: Vec<Spectrum>,
}

impl ScoreTable {
    /// Spectra that received score columns, in declared order.
    pub fn scored(&self) -> impl Iterator<Item = Spectrum> + '_ {
        self.columns_used.keys().copied()
    }

    /// Patient identifier plus one `<spectrum>_Score` column per scored spectrum.
    pub fn select_scores(&self, id_column: &str) -> Result<DataFrame> {
        if self.data.column(id_column).is_err() {
            return Err(CoreError::MissingColumn {
                column: id_column.to_string(),
                table: "score table".to_string(),
            });
        }
        let mut names = vec![id_column.to_string()];
        names.extend(self.scored().map(Spectrum::score_column));
        Ok(self.data.select(names)?)
    }

    /// Per-spectrum item counts and mean score for display.
    pub fn summaries(&self) -> Result<Vec<SpectrumSummary>> {
        let mut summaries = Vec::with_capacity(self.columns_used.len());
        for (spectrum, columns) in &self.columns_used {
            let scores: Vec<f64> = column_f64(self.data.column(&spectrum.score_column())?)
                .into_iter()
                .flatten()
                .collect();
            let mean_score = if scores.is_empty() {
                None
            } else {
                Some(scores.iter().sum::<f64>() / scores.len() as f64)
            };
            summaries.push(SpectrumSummary {
                spectrum: *spectrum,
                items: columns.len(),
                patients_scored: scores.len(),
                mean_score,
            });
        }
        Ok(summaries)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpectrumSummary {
    pub spectrum: Spectrum,
    pub items: usize,
    pub patients_scored: usize,
    pub mean_score: Option<f64>,
}

/// Appends `<spectrum>_Score` and `<spectrum>_Z_Score` for every spectrum.
///
/// The reverse-keyed pseudo-spectrum is removed from `dictionary` first and its
/// codes mark the items to negate. Items with a raw-score code or without a
/// standardized column in `standardized` are ignored; a spectrum left with no
/// items is logged and skipped. Every spectrum reads item values from
/// `standardized` as given, so negation never carries over between spectra.
pub fn aggregate_spectrum_scores(
    mut dictionary: SpectrumDictionary,
    standardized: &DataFrame,
    options: &ScoringOptions,
) -> Result<ScoreTable> {
    let reverse_keyed: HashSet<String> = dictionary
        .take_reverse_keyed()
        .iter()
        .map(|code| options.z_column(code))
        .collect();
    let present: HashSet<&str> = standardized.get_column_names_str().into_iter().collect();

    let mut data = standardized.clone();
    let mut columns_used = BTreeMap::new();
    let mut skipped = Vec::new();

    for (spectrum, codes) in dictionary.iter() {
        let mut valid: Vec<String> = Vec::new();
        for code in codes {
            if is_raw_score_code(code) {
                continue;
            }
            let column = options.z_column(code);
            if present.contains(column.as_str()) && !valid.contains(&column) {
                valid.push(column);
            }
        }

        if valid.is_empty() {
            warn!(spectrum = %spectrum, "no valid columns found for spectrum");
            skipped.push(spectrum);
            continue;
        }

        let mut sums = vec![0.0f64; standardized.height()];
        let mut counts = vec![0usize; standardized.height()];
        for column in &valid {
            let sign = if reverse_keyed.contains(column) { -1.0 } else { 1.0 };
            let values = column_f64(standardized.column(column)?);
            for (row, value) in values.into_iter().enumerate() {
                if let Some(value) = value {
                    sums[row] += sign * value;
                    counts[row] += 1;
                }
            }
        }

        let composite: Vec<Option<f64>> = sums
            .iter()
            .zip(&counts)
            .map(|(sum, &count)| (count > 0).then(|| sum / count as f64))
            .collect();
        let score: Vec<Option<f64>> = composite.iter().map(|z| z.map(normal_cdf)).collect();

        data.with_column(Series::new(spectrum.score_column().into(), score))?;
        data.with_column(Series::new(spectrum.z_score_column().into(), composite))?;
        debug!(
            spectrum = %spectrum,
            items = valid.len(),
            reverse_keyed = valid.iter().filter(|c| reverse_keyed.contains(*c)).count(),
            "scored spectrum"
        );
        columns_used.insert(spectrum, valid);
    }

    info!(
        patients = data.height(),
        scored = columns_used.len(),
        skipped = skipped.len(),
        "aggregated spectrum scores"
    );
    Ok(ScoreTable {
        data,
        columns_used,
        skipped,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normal_cdf_reference_values() {
        assert!((normal_cdf(0.0) - 0.5).abs() < 1e-15);
        assert!((normal_cdf(-1.0) - 0.158_655_253_931_457).abs() < 1e-9);
        assert!((normal_cdf(1.96) - 0.975_002_104_851_78).abs() < 1e-9);
    }
}
