//! Splitting a labeled answer table into per-instrument sub-tables.
//!
//! Every emitted partition is an independent [`LabeledFrame`]. Diagnosis
//! columns are copied into each partition so that instrument-level analyses can
//! stratify by diagnosis without joining back to the full table.

use std::collections::BTreeMap;

use polars::prelude::{AnyValue, Column};
use tracing::{debug, info};

use hitop_ingest::{VariableMetadata, any_to_string_non_empty};
use hitop_model::{ColumnIdentity, UNKNOWN_INSTRUMENT};

use crate::error::{CoreError, Result};
use crate::frame::LabeledFrame;

/// Instrument name → sub-table, iterated in instrument-name order.
pub type QuestionnairePartitions = BTreeMap<String, LabeledFrame>;

/// Groups the columns of `table` by the instrument (`Test`) each code belongs to.
///
/// Codes without an instrument fall into `"Unknown"`, which is never emitted.
/// With `include_diagnosis_columns`, every diagnosis column of `table` is
/// appended to every partition that does not already contain it.
pub fn partition_by_questionnaire(
    table: &LabeledFrame,
    metadata: &VariableMetadata,
    include_diagnosis_columns: bool,
) -> Result<QuestionnairePartitions> {
    let instruments = metadata.instruments()?;

    let mut grouped: BTreeMap<String, Vec<ColumnIdentity>> = BTreeMap::new();
    for identity in table.identities() {
        let instrument = instruments
            .get(&identity.code)
            .map(String::as_str)
            .unwrap_or(UNKNOWN_INSTRUMENT);
        grouped
            .entry(instrument.to_string())
            .or_default()
            .push(identity.clone());
    }
    if let Some(unassigned) = grouped.remove(UNKNOWN_INSTRUMENT) {
        debug!(
            columns = unassigned.len(),
            "columns without instrument left out of partitions"
        );
    }

    let diagnosis: Vec<ColumnIdentity> = if include_diagnosis_columns {
        table.diagnosis_identities().into_iter().cloned().collect()
    } else {
        Vec::new()
    };

    let mut partitions = QuestionnairePartitions::new();
    for (instrument, mut identities) in grouped {
        for identity in &diagnosis {
            if !identities.contains(identity) {
                identities.push(identity.clone());
            }
        }
        if identities.is_empty() {
            continue;
        }
        let frame = table.select(&identities)?;
        debug!(
            instrument = %instrument,
            columns = frame.width(),
            "built questionnaire partition"
        );
        partitions.insert(instrument, frame);
    }

    info!(
        questionnaires = partitions.len(),
        diagnosis_columns = diagnosis.len(),
        "partitioned answer table"
    );
    Ok(partitions)
}

/// Which column kinds [`slice_partitions`] keeps.
///
/// A column is a raw score when its label or code contains `rw`, a diagnosis
/// column when its label starts with `Diagnose`, and a question otherwise.
/// Raw-score classification takes precedence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ColumnSelection {
    pub raw_scores: bool,
    pub questions: bool,
    pub diagnosis: bool,
}

impl ColumnSelection {
    pub fn all() -> Self {
        Self {
            raw_scores: true,
            questions: true,
            diagnosis: true,
        }
    }

    pub fn questions_only() -> Self {
        Self {
            questions: true,
            ..Self::default()
        }
    }

    pub fn with_raw_scores(mut self, keep: bool) -> Self {
        self.raw_scores = keep;
        self
    }

    pub fn with_questions(mut self, keep: bool) -> Self {
        self.questions = keep;
        self
    }

    pub fn with_diagnosis(mut self, keep: bool) -> Self {
        self.diagnosis = keep;
        self
    }
}

/// Restricts every partition to the selected column kinds.
///
/// Kept columns are ordered raw scores first, then questions, then diagnosis
/// columns. Partitions left without columns are dropped.
pub fn slice_partitions(
    partitions: &QuestionnairePartitions,
    selection: ColumnSelection,
) -> Result<QuestionnairePartitions> {
    let mut sliced = QuestionnairePartitions::new();
    for (instrument, frame) in partitions {
        let mut raw = Vec::new();
        let mut questions = Vec::new();
        let mut diagnosis = Vec::new();
        for identity in frame.identities() {
            if identity.is_raw_score() {
                raw.push(identity.clone());
            } else if identity.is_diagnosis() {
                diagnosis.push(identity.clone());
            } else {
                questions.push(identity.clone());
            }
        }

        let mut keep = Vec::new();
        if selection.raw_scores {
            keep.extend(raw);
        }
        if selection.questions {
            keep.extend(questions);
        }
        if selection.diagnosis {
            keep.extend(diagnosis);
        }
        if keep.is_empty() {
            continue;
        }
        sliced.insert(instrument.clone(), frame.select(&keep)?);
    }
    Ok(sliced)
}

/// Appends a boolean column named `diagnosis_code`, true for rows in which any
/// cell equals that code.
///
/// The flag shares the code namespace with the partition's own columns. When a
/// column with that code already exists (a diagnosis column copied in by
/// [`partition_by_questionnaire`]), this returns [`CoreError::DuplicateColumn`]
/// and the partition is left unchanged; flag a slice without diagnosis columns
/// instead.
pub fn add_diagnosis_presence(partition: &mut LabeledFrame, diagnosis_code: &str) -> Result<()> {
    if partition.identity(diagnosis_code).is_some() {
        return Err(CoreError::DuplicateColumn(diagnosis_code.to_string()));
    }

    let mut present = vec![false; partition.height()];
    for column in partition.data().get_columns() {
        for (row, flag) in present.iter_mut().enumerate() {
            if *flag {
                continue;
            }
            let value = column.get(row).unwrap_or(AnyValue::Null);
            if any_to_string_non_empty(value).as_deref() == Some(diagnosis_code) {
                *flag = true;
            }
        }
    }

    let hits = present.iter().filter(|flag| **flag).count();
    debug!(diagnosis_code, patients = hits, "flagged diagnosis presence");
    let column = Column::new(diagnosis_code.into(), present);
    partition.push_column(ColumnIdentity::new(diagnosis_code, diagnosis_code), column)
}

/// Flags `diagnosis_code` in every partition.
pub fn add_diagnosis_presence_all(
    partitions: &mut QuestionnairePartitions,
    diagnosis_code: &str,
) -> Result<()> {
    for partition in partitions.values_mut() {
        add_diagnosis_presence(partition, diagnosis_code)?;
    }
    Ok(())
}

/// Number of non-missing cells per instrument.
pub fn count_answers(partitions: &QuestionnairePartitions) -> BTreeMap<String, usize> {
    partitions
        .iter()
        .map(|(instrument, frame)| (instrument.clone(), answered_cells(frame)))
        .collect()
}

fn answered_cells(frame: &LabeledFrame) -> usize {
    frame
        .data()
        .get_columns()
        .iter()
        .map(|column| {
            (0..column.len())
                .filter(|&row| {
                    let value = column.get(row).unwrap_or(AnyValue::Null);
                    any_to_string_non_empty(value).is_some()
                })
                .count()
        })
        .sum()
}
