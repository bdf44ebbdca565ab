//! Statistical readability metrics over extracted text.
//!
//! All indices use the usual published formulas. Syllables come from the
//! heuristic in [`crate::syllables`], so the numbers are estimates that track
//! common readability tools closely but not digit for digit.

use std::collections::HashSet;

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::report::round_to;
use crate::syllables::{count_syllables, is_easy_word, lexical_word};

/// Words per minute used for the reading time estimate.
pub const WORDS_PER_MINUTE: f64 = 200.0;

/// Texts shorter than this (trimmed, in characters) are not analyzed.
const MIN_ANALYZABLE_CHARS: usize = 10;

/// Sentences with this many words or fewer do not count as sentences.
const MAX_FRAGMENT_WORDS: usize = 2;

/// Linsear Write only looks at this many leading words.
const LINSEAR_SAMPLE_WORDS: usize = 100;

lazy_static! {
    static ref SENTENCE_END: Regex = Regex::new(r"[.!?]+").unwrap();
    static ref PARAGRAPH_BREAK: Regex = Regex::new(r"\n\s*\n").unwrap();
}

/// Grade upper bounds (inclusive) and their reading level.
const READING_LEVELS: &[(f64, &str)] = &[
    (6.0, "Elementary (Grades 1-6)"),
    (8.0, "Middle School (Grades 6-8)"),
    (12.0, "High School (Grades 9-12)"),
    (16.0, "College Level"),
];
const GRADUATE_LEVEL: &str = "Graduate Level";

/// Flesch Reading Ease lower bounds (inclusive) and their interpretation.
const EASE_BANDS: &[(f64, &str)] = &[
    (90.0, "Very Easy (5th grade)"),
    (80.0, "Easy (6th grade)"),
    (70.0, "Fairly Easy (7th grade)"),
    (60.0, "Standard (8th-9th grade)"),
    (50.0, "Fairly Difficult (10th-12th grade)"),
    (30.0, "Difficult (College level)"),
];
const VERY_DIFFICULT: &str = "Very Difficult (Graduate level)";

#[derive(Debug, Clone, Copy)]
enum AgeRule {
    Fixed(u32),
    /// Rounded grade plus the given offset.
    GradePlus(f64),
}

/// Grade upper bounds (inclusive) and how the target age derives from them.
const TARGET_AGES: &[(f64, AgeRule)] = &[
    (1.0, AgeRule::Fixed(6)),
    (12.0, AgeRule::GradePlus(5.0)),
    (16.0, AgeRule::Fixed(18)),
];
const OLDEST_TARGET_AGE: u32 = 22;

/// Readability statistics for one text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadabilityMetrics {
    pub word_count: usize,
    pub char_count: usize,
    pub sentence_count: usize,
    pub paragraph_count: usize,

    pub flesch_reading_ease: f64,
    pub flesch_kincaid_grade: f64,
    pub gunning_fog: f64,
    pub smog_index: f64,
    pub automated_readability_index: f64,
    pub coleman_liau_index: f64,
    pub linsear_write_formula: f64,
    pub dale_chall_readability_score: f64,

    pub avg_sentence_length: f64,
    pub avg_syllables_per_word: f64,
    pub difficult_words: usize,
    pub syllable_count: usize,
    pub reading_time_minutes: f64,

    pub reading_level: String,
    /// Estimated reader age in years.
    pub target_age: u32,
    /// `target_age` rendered as `"N years"`.
    pub target_age_label: String,
    pub ease_interpretation: String,
}

#[derive(Debug, Error)]
enum ComputeError {
    #[error("no words to analyze")]
    NoWords,
    #[error("{0} is not a finite number")]
    NonFinite(&'static str),
}

/// Computes readability metrics for `text`.
///
/// Returns `None` when the trimmed text is shorter than 10 characters or
/// when any metric cannot be computed (degenerate input).
pub fn analyze(text: &str) -> Option<ReadabilityMetrics> {
    if text.trim().chars().count() < MIN_ANALYZABLE_CHARS {
        return None;
    }
    match compute(text) {
        Ok(metrics) => Some(metrics),
        Err(e) => {
            debug!("readability unavailable: {}", e);
            None
        }
    }
}

/// Word-level counts gathered in one pass.
struct TextStats {
    raw_words: usize,
    words: Vec<String>,
    letters: usize,
    sentences: usize,
    syllables: usize,
    polysyllables: usize,
    complex_words: usize,
    difficult_words: usize,
}

impl TextStats {
    fn gather(text: &str) -> Self {
        let words: Vec<String> = text
            .split_whitespace()
            .filter_map(lexical_word)
            .map(str::to_string)
            .collect();

        let mut syllables = 0;
        let mut polysyllables = 0;
        let mut complex_words = 0;
        let mut difficult: HashSet<String> = HashSet::new();
        for word in &words {
            let count = count_syllables(word);
            syllables += count;
            let easy = is_easy_word(word);
            if count >= 3 {
                polysyllables += 1;
                if !easy {
                    complex_words += 1;
                }
            }
            if count >= 2 && !easy {
                difficult.insert(word.to_lowercase());
            }
        }

        TextStats {
            raw_words: text.split_whitespace().count(),
            letters: words
                .iter()
                .flat_map(|w| w.chars())
                .filter(|c| c.is_alphanumeric())
                .count(),
            sentences: count_sentences(text),
            syllables,
            polysyllables,
            complex_words,
            difficult_words: difficult.len(),
            words,
        }
    }

    fn word_count(&self) -> f64 {
        self.words.len() as f64
    }

    fn avg_sentence_length(&self) -> f64 {
        self.word_count() / self.sentences as f64
    }

    fn avg_syllables_per_word(&self) -> f64 {
        self.syllables as f64 / self.word_count()
    }
}

fn compute(text: &str) -> Result<ReadabilityMetrics, ComputeError> {
    let stats = TextStats::gather(text);
    if stats.words.is_empty() {
        return Err(ComputeError::NoWords);
    }

    let words = stats.word_count();
    let sentences = stats.sentences as f64;
    let asl = stats.avg_sentence_length();
    let asw = stats.avg_syllables_per_word();

    let flesch_reading_ease = finite("flesch_reading_ease", 206.835 - 1.015 * asl - 84.6 * asw)?;
    let flesch_kincaid_grade = finite("flesch_kincaid_grade", 0.39 * asl + 11.8 * asw - 15.59)?;
    let gunning_fog = finite(
        "gunning_fog",
        0.4 * (asl + 100.0 * stats.complex_words as f64 / words),
    )?;
    let smog_index = if stats.sentences < 3 {
        0.0
    } else {
        finite(
            "smog_index",
            1.043 * (stats.polysyllables as f64 * 30.0 / sentences).sqrt() + 3.1291,
        )?
    };
    let automated_readability_index = finite(
        "automated_readability_index",
        4.71 * stats.letters as f64 / words + 0.5 * asl - 21.43,
    )?;
    let coleman_liau_index = finite(
        "coleman_liau_index",
        0.0588 * (100.0 * stats.letters as f64 / words) - 0.296 * (100.0 * sentences / words)
            - 15.8,
    )?;
    let linsear_write_formula = finite("linsear_write_formula", linsear_write(&stats.words))?;
    let dale_chall_readability_score = finite(
        "dale_chall_readability_score",
        dale_chall(stats.difficult_words, words, asl),
    )?;

    let grade = round_to(flesch_kincaid_grade, 2);
    let ease = round_to(flesch_reading_ease, 2);
    let target_age = target_age(grade);

    Ok(ReadabilityMetrics {
        word_count: stats.raw_words,
        char_count: text.chars().count(),
        sentence_count: stats.sentences,
        paragraph_count: count_paragraphs(text),
        flesch_reading_ease: ease,
        flesch_kincaid_grade: grade,
        gunning_fog: round_to(gunning_fog, 2),
        smog_index: round_to(smog_index, 2),
        automated_readability_index: round_to(automated_readability_index, 2),
        coleman_liau_index: round_to(coleman_liau_index, 2),
        linsear_write_formula: round_to(linsear_write_formula, 2),
        dale_chall_readability_score: round_to(dale_chall_readability_score, 2),
        avg_sentence_length: round_to(asl, 2),
        avg_syllables_per_word: round_to(asw, 2),
        difficult_words: stats.difficult_words,
        syllable_count: stats.syllables,
        reading_time_minutes: round_to(stats.raw_words as f64 / WORDS_PER_MINUTE, 1),
        reading_level: reading_level(grade).to_string(),
        target_age,
        target_age_label: format!("{target_age} years"),
        ease_interpretation: ease_interpretation(ease).to_string(),
    })
}

fn finite(metric: &'static str, value: f64) -> Result<f64, ComputeError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ComputeError::NonFinite(metric))
    }
}

/// Counts sentences, ignoring fragments of two words or fewer. Never below one.
pub fn count_sentences(text: &str) -> usize {
    SENTENCE_END
        .split(text)
        .filter(|segment| {
            segment.split_whitespace().filter_map(lexical_word).count() > MAX_FRAGMENT_WORDS
        })
        .count()
        .max(1)
}

/// Counts blank-line-delimited paragraphs. Never below one.
pub fn count_paragraphs(text: &str) -> usize {
    PARAGRAPH_BREAK
        .split(text)
        .filter(|p| !p.trim().is_empty())
        .count()
        .max(1)
}

fn linsear_write(words: &[String]) -> f64 {
    let sample = &words[..words.len().min(LINSEAR_SAMPLE_WORDS)];
    let (mut easy, mut hard) = (0usize, 0usize);
    for word in sample {
        if count_syllables(word) >= 3 {
            hard += 1;
        } else {
            easy += 1;
        }
    }
    let sentences = count_sentences(&sample.join(" ")) as f64;
    let score = (easy as f64 + 3.0 * hard as f64) / sentences;
    if score > 20.0 {
        score / 2.0
    } else {
        (score - 2.0) / 2.0
    }
}

fn dale_chall(difficult: usize, words: f64, asl: f64) -> f64 {
    let percent = 100.0 * difficult as f64 / words;
    let score = 0.1579 * percent + 0.0496 * asl;
    if percent > 5.0 { score + 3.6365 } else { score }
}

/// Maps a Flesch-Kincaid grade onto a reading level band.
pub fn reading_level(grade: f64) -> &'static str {
    READING_LEVELS
        .iter()
        .find(|(upper, _)| grade <= *upper)
        .map_or(GRADUATE_LEVEL, |(_, label)| label)
}

/// Maps a Flesch Reading Ease score onto its interpretation.
pub fn ease_interpretation(ease: f64) -> &'static str {
    EASE_BANDS
        .iter()
        .find(|(lower, _)| ease >= *lower)
        .map_or(VERY_DIFFICULT, |(_, label)| label)
}

/// Estimates the reader age in years from a Flesch-Kincaid grade.
pub fn target_age(grade: f64) -> u32 {
    let rule = TARGET_AGES
        .iter()
        .find(|(upper, _)| grade <= *upper)
        .map(|(_, rule)| *rule);
    match rule {
        Some(AgeRule::Fixed(age)) => age,
        Some(AgeRule::GradePlus(offset)) => (grade + offset).round() as u32,
        None => OLDEST_TARGET_AGE,
    }
}
