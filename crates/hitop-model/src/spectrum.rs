//! HiTOP spectra and the resolved spectrum dictionary.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// A higher-order psychopathology spectrum, plus the reverse-keyed pseudo-spectrum.
///
/// Declaration order is the output order of every dictionary and score table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Spectrum {
    #[serde(rename = "Somatoform")]
    Somatoform,
    #[serde(rename = "Internalizing")]
    Internalizing,
    #[serde(rename = "Thought Disorder")]
    ThoughtDisorder,
    #[serde(rename = "Detachment")]
    Detachment,
    #[serde(rename = "Disinhibited Externalizing")]
    DisinhibitedExternalizing,
    #[serde(rename = "Antagonistic Externalizing")]
    AntagonisticExternalizing,
    /// Marks reverse-scored items; not a clinical spectrum.
    #[serde(rename = "Reverse-keyed")]
    ReverseKeyed,
}

impl Spectrum {
    /// The six clinical spectra.
    pub const HITOP: [Spectrum; 6] = [
        Spectrum::Somatoform,
        Spectrum::Internalizing,
        Spectrum::ThoughtDisorder,
        Spectrum::Detachment,
        Spectrum::DisinhibitedExternalizing,
        Spectrum::AntagonisticExternalizing,
    ];

    /// Clinical spectra followed by the reverse-keyed pseudo-spectrum.
    pub const ALL: [Spectrum; 7] = [
        Spectrum::Somatoform,
        Spectrum::Internalizing,
        Spectrum::ThoughtDisorder,
        Spectrum::Detachment,
        Spectrum::DisinhibitedExternalizing,
        Spectrum::AntagonisticExternalizing,
        Spectrum::ReverseKeyed,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Spectrum::Somatoform => "Somatoform",
            Spectrum::Internalizing => "Internalizing",
            Spectrum::ThoughtDisorder => "Thought Disorder",
            Spectrum::Detachment => "Detachment",
            Spectrum::DisinhibitedExternalizing => "Disinhibited Externalizing",
            Spectrum::AntagonisticExternalizing => "Antagonistic Externalizing",
            Spectrum::ReverseKeyed => "Reverse-keyed",
        }
    }

    /// Every spelling that identifies this spectrum in annotator text.
    ///
    /// Annotators mark reverse-keyed items with the German "Umpolen".
    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            Spectrum::ReverseKeyed => &["Reverse-keyed", "Umpolen"],
            Spectrum::Somatoform => &["Somatoform"],
            Spectrum::Internalizing => &["Internalizing"],
            Spectrum::ThoughtDisorder => &["Thought Disorder"],
            Spectrum::Detachment => &["Detachment"],
            Spectrum::DisinhibitedExternalizing => &["Disinhibited Externalizing"],
            Spectrum::AntagonisticExternalizing => &["Antagonistic Externalizing"],
        }
    }

    pub fn is_reverse_keyed(self) -> bool {
        matches!(self, Spectrum::ReverseKeyed)
    }

    /// Name of the bounded (normal CDF) score column.
    pub fn score_column(self) -> String {
        format!("{}_Score", self.name())
    }

    /// Name of the composite z-score column.
    pub fn z_score_column(self) -> String {
        format!("{}_Z_Score", self.name())
    }
}

impl fmt::Display for Spectrum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Spectrum {
    type Err = ModelError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        Spectrum::ALL
            .into_iter()
            .find(|spectrum| {
                spectrum
                    .aliases()
                    .iter()
                    .any(|alias| alias.eq_ignore_ascii_case(trimmed))
            })
            .ok_or_else(|| ModelError::UnknownSpectrum(trimmed.to_string()))
    }
}

/// Resolved `spectrum -> codes` mapping.
///
/// Buckets iterate in declared spectrum order. A code may belong to several
/// buckets; membership is never de-duplicated across spectra.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpectrumDictionary {
    buckets: BTreeMap<Spectrum, Vec<String>>,
}

impl SpectrumDictionary {
    /// Creates a dictionary with an empty bucket for each given spectrum.
    pub fn new(spectra: &[Spectrum]) -> Self {
        Self {
            buckets: spectra.iter().map(|s| (*s, Vec::new())).collect(),
        }
    }

    pub fn push(&mut self, spectrum: Spectrum, code: impl Into<String>) {
        self.buckets.entry(spectrum).or_default().push(code.into());
    }

    pub fn codes(&self, spectrum: Spectrum) -> &[String] {
        self.buckets
            .get(&spectrum)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn contains_spectrum(&self, spectrum: Spectrum) -> bool {
        self.buckets.contains_key(&spectrum)
    }

    /// Removes the reverse-keyed pseudo-spectrum and returns its codes.
    pub fn take_reverse_keyed(&mut self) -> Vec<String> {
        self.buckets
            .remove(&Spectrum::ReverseKeyed)
            .unwrap_or_default()
    }

    /// Spectra a code was assigned to, in declared order.
    pub fn memberships(&self, code: &str) -> Vec<Spectrum> {
        self.buckets
            .iter()
            .filter(|(_, codes)| codes.iter().any(|c| c == code))
            .map(|(spectrum, _)| *spectrum)
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Spectrum, &[String])> {
        self.buckets
            .iter()
            .map(|(spectrum, codes)| (*spectrum, codes.as_slice()))
    }

    pub fn spectra(&self) -> impl Iterator<Item = Spectrum> + '_ {
        self.buckets.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}
