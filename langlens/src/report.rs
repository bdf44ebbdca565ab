//! Report types produced by the analysis pipelines.
//!
//! Everything here serializes to JSON with snake_case field names so that
//! presentation layers (CLI, web handlers, prompt builders) can consume the
//! reports directly.

use serde::{Deserialize, Serialize};

use crate::readability::ReadabilityMetrics;
use crate::spelling::{Misspelling, QualityAssessment, SpellingStatistics};

/// Provenance of the text a report was computed from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzedFile {
    pub name: String,
    /// Path relative to the unpacked root.
    pub path: String,
    pub locale: String,
    pub is_primary_locale: bool,
    pub size_kb: f64,
    pub total_files_found: usize,
    /// Lines of the file that parsed as `key=value`.
    pub total_entries: usize,
    /// Entries whose value made it into the extracted text.
    pub educational_entries: usize,
    /// Approximate share of educational entries, for diagnostics only.
    pub educational_percentage: f64,
    pub extracted_text_words: usize,
    pub extracted_text_chars: usize,
}

/// Readability report for one unpacked world.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    #[serde(flatten)]
    pub metrics: ReadabilityMetrics,
    pub analyzed_file: AnalyzedFile,
    /// First characters of the extracted text, with `...` when truncated.
    pub sample_text: String,
    pub full_text_length: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub warning: Option<String>,
}

/// Spelling report for one unpacked world.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpellCheckReport {
    pub analyzed_file: AnalyzedFile,
    pub statistics: SpellingStatistics,
    pub common_errors: Vec<Misspelling>,
    pub unique_errors: Vec<Misspelling>,
    pub quality_assessment: QualityAssessment,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub warning: Option<String>,
}

impl SpellCheckReport {
    /// Total number of misspelled words across both partitions.
    pub fn error_count(&self) -> usize {
        self.common_errors.len() + self.unique_errors.len()
    }
}

/// Rounds half away from zero to `decimals` places.
pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Truncates `text` to `max_chars` characters, appending `...` when cut.
pub(crate) fn sample_of(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(3.14159, 2), 3.14);
        assert_eq!(round_to(2.25, 1), 2.3);
        assert_eq!(round_to(-2.25, 1), -2.3);
        assert_eq!(round_to(10.0, 2), 10.0);
    }

    #[test]
    fn test_sample_of_short_text_is_untouched() {
        assert_eq!(sample_of("short text", 500), "short text");
    }

    #[test]
    fn test_sample_of_respects_char_boundaries() {
        let text = "é".repeat(600);
        let sample = sample_of(&text, 500);
        assert!(sample.ends_with("..."));
        assert_eq!(sample.chars().count(), 503);
    }

    #[test]
    fn test_sample_of_exact_length() {
        let text = "a".repeat(500);
        assert_eq!(sample_of(&text, 500), text);
    }
}
