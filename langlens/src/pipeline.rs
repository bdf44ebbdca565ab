//! Analysis pipelines over an unpacked world.
//!
//! Both pipelines share the same shape: locate the `.lang` files, pick one,
//! extract its educational text, check that there is enough of it, then run
//! the analyzer. Every way this can stop short is an [`AnalysisFailure`]
//! whose message is meant to be shown to the user as is.

use std::path::Path;

use thiserror::Error;
use tracing::{debug, info, instrument, warn};

use crate::dictionary::CustomDictionary;
use crate::extractor::{self, Extraction};
use crate::locator::{self, ResourceFile};
use crate::options::AnalysisOptions;
use crate::readability;
use crate::report::{AnalysisReport, AnalyzedFile, SpellCheckReport, round_to, sample_of};
use crate::spelling;
use crate::traits::SpellModel;

/// Why an analysis produced no report.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisFailure {
    #[error(
        "The unpacked world folder could not be found. Please ensure the world has been properly unpacked."
    )]
    WorldFolderMissing,

    #[error(
        "No localization files found in this unpacked world. Language analysis requires at least one .lang file to be present."
    )]
    NoLocalizationFiles,

    #[error(
        "The language file '{name}' is too small ({size_kb} KB) to provide meaningful analysis. Language analysis requires files with substantial text content."
    )]
    FileTooSmall { name: String, size_kb: f64 },

    #[error(
        "No educational content could be extracted from '{name}' ({total_entries} raw entries scanned). The file may be empty, corrupted, or contain only technical identifiers."
    )]
    NoEducationalContent { name: String, total_entries: usize },

    #[error(
        "Insufficient content length in '{name}' (only {chars} characters of readable text). Language analysis requires at least {required} characters of meaningful text."
    )]
    InsufficientContent {
        name: String,
        chars: usize,
        required: usize,
    },

    #[error(
        "Insufficient word count in '{name}' (only {words} words). Language analysis requires at least {required} words for reliable metrics."
    )]
    InsufficientWords {
        name: String,
        words: usize,
        required: usize,
    },

    #[error(
        "Analysis could not be performed on '{name}'. The text content may not be suitable for this analysis."
    )]
    AnalysisUnavailable { name: String },
}

/// Text that passed every pre-analysis check.
struct Prepared {
    file: ResourceFile,
    total_files: usize,
    extraction: Extraction,
    warning: Option<String>,
}

impl Prepared {
    fn analyzed_file(&self) -> AnalyzedFile {
        let total = self.extraction.total_entries;
        let educational = self.extraction.educational_entries;
        AnalyzedFile {
            name: self.file.name.clone(),
            path: self.file.relative_path.clone(),
            locale: self.file.locale_label.clone(),
            is_primary_locale: self.file.is_primary_locale,
            size_kb: self.file.size_kb,
            total_files_found: self.total_files,
            total_entries: total,
            educational_entries: educational,
            educational_percentage: round_to(100.0 * educational as f64 / total.max(1) as f64, 1),
            extracted_text_words: self.extraction.word_count,
            extracted_text_chars: self.extraction.char_count,
        }
    }
}

fn non_primary_warning(file: &ResourceFile) -> String {
    format!(
        "No primary-locale (English) language file was found; analyzed '{}' ({}) instead. Results may be linguistically inaccurate.",
        file.name, file.locale_label
    )
}

fn prepare(root: &Path, options: &AnalysisOptions) -> Result<Prepared, AnalysisFailure> {
    if !root.is_dir() {
        return Err(AnalysisFailure::WorldFolderMissing);
    }

    let files = locator::locate(root);
    let Some((file, is_primary)) = locator::select_candidate(&files) else {
        return Err(AnalysisFailure::NoLocalizationFiles);
    };
    let file = file.clone();
    debug!(file = %file.relative_path, primary = is_primary, "selected resource file");

    if file.size_bytes < options.min_file_bytes {
        return Err(AnalysisFailure::FileTooSmall {
            name: file.name,
            size_kb: file.size_kb,
        });
    }

    let extraction = extractor::extract(&file.full_path);
    if extraction.is_empty() {
        return Err(AnalysisFailure::NoEducationalContent {
            name: file.name,
            total_entries: extraction.total_entries,
        });
    }

    let chars = extraction.text.trim().chars().count();
    if chars < options.min_text_chars {
        return Err(AnalysisFailure::InsufficientContent {
            name: file.name,
            chars,
            required: options.min_text_chars,
        });
    }
    if extraction.word_count < options.min_words {
        return Err(AnalysisFailure::InsufficientWords {
            name: file.name,
            words: extraction.word_count,
            required: options.min_words,
        });
    }

    let warning = if is_primary {
        None
    } else {
        warn!(file = %file.relative_path, "no primary-locale file, using fallback");
        Some(non_primary_warning(&file))
    };

    Ok(Prepared {
        file,
        total_files: files.len(),
        extraction,
        warning,
    })
}

/// Runs the readability pipeline with default options.
pub fn perform_analysis<P: AsRef<Path>>(root: P) -> Result<AnalysisReport, AnalysisFailure> {
    perform_analysis_with(root, &AnalysisOptions::default())
}

/// Runs the readability pipeline.
#[instrument(skip_all, fields(root = %root.as_ref().display()))]
pub fn perform_analysis_with<P: AsRef<Path>>(
    root: P,
    options: &AnalysisOptions,
) -> Result<AnalysisReport, AnalysisFailure> {
    let prepared = prepare(root.as_ref(), options)?;
    let text = &prepared.extraction.text;

    let Some(metrics) = readability::analyze(text) else {
        return Err(AnalysisFailure::AnalysisUnavailable {
            name: prepared.file.name,
        });
    };
    info!(
        file = %prepared.file.relative_path,
        grade = metrics.flesch_kincaid_grade,
        "readability analysis complete"
    );

    Ok(AnalysisReport {
        metrics,
        analyzed_file: prepared.analyzed_file(),
        sample_text: sample_of(text, options.sample_chars),
        full_text_length: text.chars().count(),
        warning: prepared.warning,
    })
}

/// Runs the spelling pipeline with default options.
pub fn perform_spell_check<P: AsRef<Path>>(
    root: P,
    model: &dyn SpellModel,
    dictionary: &CustomDictionary,
) -> Result<SpellCheckReport, AnalysisFailure> {
    perform_spell_check_with(root, model, dictionary, &AnalysisOptions::default())
}

/// Runs the spelling pipeline.
#[instrument(skip_all, fields(root = %root.as_ref().display()))]
pub fn perform_spell_check_with<P: AsRef<Path>>(
    root: P,
    model: &dyn SpellModel,
    dictionary: &CustomDictionary,
    options: &AnalysisOptions,
) -> Result<SpellCheckReport, AnalysisFailure> {
    let prepared = prepare(root.as_ref(), options)?;

    let Some(result) = spelling::spell_check(&prepared.extraction.text, model, dictionary) else {
        return Err(AnalysisFailure::AnalysisUnavailable {
            name: prepared.file.name,
        });
    };
    info!(
        file = %prepared.file.relative_path,
        accuracy = result.statistics.accuracy_percentage,
        "spell check complete"
    );

    Ok(SpellCheckReport {
        analyzed_file: prepared.analyzed_file(),
        statistics: result.statistics,
        common_errors: result.common_errors,
        unique_errors: result.unique_errors,
        quality_assessment: result.quality_assessment,
        warning: prepared.warning,
    })
}
