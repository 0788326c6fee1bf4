//! Report rows for the CLI commands.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use polars::prelude::{CsvWriter, DataFrame, SerWriter};

use hitop_core::{QuestionnairePartitions, SpectrumSummary, count_answers};
use hitop_model::{Spectrum, SpectrumDictionary};

/// Therapy phase of a dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Phase {
    Pre,
    Post,
}

impl Phase {
    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Pre => "pre",
            Phase::Post => "post",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionnaireSummary {
    pub phase: Phase,
    pub name: String,
    pub patients: usize,
    pub item_columns: usize,
    pub diagnosis_columns: usize,
    pub answers: usize,
}

/// One row per questionnaire in a partitioned dataset.
pub fn questionnaire_summaries(
    phase: Phase,
    partitions: &QuestionnairePartitions,
) -> Vec<QuestionnaireSummary> {
    let answers = count_answers(partitions);
    partitions
        .iter()
        .map(|(name, frame)| {
            let diagnosis_columns = frame.diagnosis_identities().len();
            QuestionnaireSummary {
                phase,
                name: name.clone(),
                patients: frame.height(),
                item_columns: frame.width() - diagnosis_columns,
                diagnosis_columns,
                answers: answers.get(name).copied().unwrap_or(0),
            }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpectrumRow {
    pub spectrum: Spectrum,
    pub codes: Vec<String>,
    /// Codes that also belong to another clinical spectrum.
    pub shared: usize,
}

/// One row per spectrum, the reverse-keyed marker last.
pub fn spectrum_rows(dictionary: &SpectrumDictionary) -> Vec<SpectrumRow> {
    dictionary
        .iter()
        .map(|(spectrum, codes)| {
            let shared = if spectrum.is_reverse_keyed() {
                0
            } else {
                codes
                    .iter()
                    .filter(|code| {
                        dictionary
                            .memberships(code)
                            .iter()
                            .filter(|other| !other.is_reverse_keyed())
                            .count()
                            > 1
                    })
                    .count()
            };
            SpectrumRow {
                spectrum,
                codes: codes.to_vec(),
                shared,
            }
        })
        .collect()
}

#[derive(Debug, Clone)]
pub struct ScoresResult {
    pub patients: usize,
    pub summaries: Vec<SpectrumSummary>,
    pub skipped: Vec<Spectrum>,
    pub output: Option<PathBuf>,
}

/// Writes a frame as CSV with a header row, creating parent directories.
pub fn write_csv(frame: &mut DataFrame, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("create output directory {}", parent.display()))?;
    }
    let mut file =
        File::create(path).with_context(|| format!("create output file {}", path.display()))?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(frame)
        .with_context(|| format!("write CSV {}", path.display()))?;
    Ok(())
}
