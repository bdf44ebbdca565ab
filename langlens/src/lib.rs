#![forbid(unsafe_code)]
//! Language analysis toolkit for Minecraft Education worlds.
//!
//! Finds the `.lang` localization files inside an unpacked world, extracts
//! the user-facing (educational) text from them and reports on how readable
//! and how well spelled that text is.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use langlens::{perform_analysis, AnalysisFailure};
//!
//! match perform_analysis("unpacked/20240101_120000_River_Lab") {
//!     Ok(report) => println!("{} ({})", report.metrics.reading_level, report.metrics.target_age_label),
//!     Err(reason) => eprintln!("{reason}"),
//! }
//! ```
//!
//! # Pipeline
//!
//! - **Locator**: ranks `.lang` files, primary (English) locales first
//! - **Classifier**: decides which `key=value` entries carry educational text
//! - **Extractor**: cleans formatting codes and placeholders into one text blob
//! - **Readability / Spelling**: statistical metrics and spelling reports
//!
//! Failures short of a report are [`AnalysisFailure`] values whose messages
//! can be shown to users as they are.

pub mod classifier;
pub mod dictionary;
pub mod documents;
pub mod error;
pub mod extractor;
pub mod locale;
pub mod locator;
pub mod options;
pub mod paths;
pub mod pipeline;
pub mod placeholder;
pub mod readability;
pub mod report;
pub mod spelling;
pub mod syllables;
pub mod traits;
pub mod world;

// Re-export most used types for easy consumption
pub use crate::{
    classifier::is_educational,
    dictionary::CustomDictionary,
    documents::{DocumentKind, GeneratedDocument, build_prompt, generate_document},
    error::Error,
    extractor::{Extraction, extract, extract_text},
    locator::{ResourceFile, locate},
    options::AnalysisOptions,
    paths::{ResourceFileView, export_resource_file, read_resource_file, resolve_within},
    pipeline::{
        AnalysisFailure, perform_analysis, perform_analysis_with, perform_spell_check,
        perform_spell_check_with,
    },
    readability::{ReadabilityMetrics, analyze},
    report::{AnalysisReport, AnalyzedFile, SpellCheckReport},
    spelling::{Misspelling, QualityAssessment, SpellingStatistics, WordListModel, spell_check},
    traits::{SpellModel, TextGenerator},
    world::{UnpackedRecord, WorldRecord, WorldStore},
};
