//! Annotation text normalization.
//!
//! Annotators spell spectrum names inconsistently. The rewrites below run in
//! order over the concatenated annotation; later rules see the output of earlier
//! ones.

use std::sync::LazyLock;

use regex::Regex;

/// One whole-word rewrite.
#[derive(Debug)]
pub struct RewriteRule {
    pub pattern: Regex,
    pub replacement: &'static str,
}

impl RewriteRule {
    fn new(pattern: &str, replacement: &'static str) -> Self {
        Self {
            pattern: Regex::new(pattern).expect("valid rewrite pattern"),
            replacement,
        }
    }

    pub fn apply(&self, text: &str) -> String {
        self.pattern
            .replace_all(text, regex::NoExpand(self.replacement))
            .into_owned()
    }
}

static ANNOTATION_REWRITES: LazyLock<Vec<RewriteRule>> = LazyLock::new(|| {
    vec![
        RewriteRule::new(r"\bInternalising\b", "Internalizing"),
        RewriteRule::new(r"\bDisinhibiton\b", "Disinhibition"),
        // Catches both the corrected and the original spelling.
        RewriteRule::new(r"\bDisinhibiti?on\b", "Disinhibited Externalizing"),
        RewriteRule::new(r"\bAntagonism\b", "Antagonistic Externalizing"),
        RewriteRule::new(r".*Antagnositc Externalising\b", "Antagonistic Externalizing"),
        RewriteRule::new(
            r"\bAntisocial Behavior\b",
            "Disinhibited Externalizing + Antagonistic Externalizing",
        ),
    ]
});

static EXCLUSION_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\braus\b").expect("valid exclusion pattern"));

/// The ordered rewrite rules.
pub fn annotation_rewrites() -> &'static [RewriteRule] {
    &ANNOTATION_REWRITES
}

/// Applies every rewrite in order, then trims.
pub fn normalize_annotation(text: &str) -> String {
    let rewritten = ANNOTATION_REWRITES
        .iter()
        .fold(text.to_string(), |value, rule| rule.apply(&value));
    rewritten.trim().to_string()
}

/// True when an annotator marked the item for exclusion (`raus`).
pub fn is_excluded(annotation: &str) -> bool {
    EXCLUSION_MARKER.is_match(annotation)
}

/// True for empty text, whitespace, or question marks only.
pub fn is_blank_annotation(annotation: &str) -> bool {
    annotation.chars().all(|c| c.is_whitespace() || c == '?')
}
