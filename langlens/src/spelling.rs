//! Spell checking of extracted text against a base word list plus the
//! custom domain dictionary.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::fs;
use std::path::Path;

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::dictionary::CustomDictionary;
use crate::error::Error;
use crate::report::round_to;
use crate::traits::SpellModel;

/// Maximum number of suggestions attached to a misspelling.
pub const MAX_SUGGESTIONS: usize = 5;

/// Largest edit distance considered for a suggestion.
const MAX_EDIT_DISTANCE: usize = 2;

/// Tokens of this many characters or fewer are not checked.
const MAX_SKIPPED_TOKEN_CHARS: usize = 2;

/// Bundled English word list, one lower-case word per line.
const ENGLISH_WORDS: &str = include_str!("../data/english_words.txt");

lazy_static! {
    static ref NON_WORD: Regex = Regex::new(r"[^\w\s'-]").unwrap();
}

/// Accuracy lower bounds (inclusive) and their quality level.
const QUALITY_BANDS: &[(f64, &str)] = &[(95.0, "Excellent"), (90.0, "Good"), (80.0, "Fair")];
const NEEDS_IMPROVEMENT: &str = "Needs Improvement";

/// One misspelled word.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Misspelling {
    /// The word as it first appears in the text.
    pub word: String,
    pub suggestions: Vec<String>,
    /// Occurrences of the word (case-insensitive) in the text.
    pub context_usage: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpellingStatistics {
    pub total_unique_words: usize,
    pub misspelled_count: usize,
    pub accuracy_percentage: f64,
    pub custom_dictionary_size: usize,
    /// Unique words accepted only because of the custom dictionary.
    pub custom_words_used: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityAssessment {
    pub level: String,
    pub description: String,
}

/// Result of [`spell_check`], before provenance is attached.
#[derive(Debug, Clone, PartialEq)]
pub struct SpellingResult {
    pub statistics: SpellingStatistics,
    pub common_errors: Vec<Misspelling>,
    pub unique_errors: Vec<Misspelling>,
    pub quality_assessment: QualityAssessment,
}

/// In-memory word list with edit-distance suggestions.
#[derive(Debug, Clone, Default)]
pub struct WordListModel {
    words: HashSet<String>,
    by_length: BTreeMap<usize, Vec<String>>,
}

impl WordListModel {
    /// Builds a model from any list of words. Words are lower-cased.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut model = WordListModel::default();
        for word in words {
            let word = word.as_ref().trim().to_lowercase();
            if word.is_empty() || !model.words.insert(word.clone()) {
                continue;
            }
            model
                .by_length
                .entry(word.chars().count())
                .or_default()
                .push(word);
        }
        for bucket in model.by_length.values_mut() {
            bucket.sort();
        }
        model
    }

    /// The bundled English word list.
    pub fn english() -> Self {
        Self::from_words(
            ENGLISH_WORDS
                .lines()
                .filter(|line| !line.is_empty() && !line.starts_with('#')),
        )
    }

    /// Loads a one-word-per-line file such as `/usr/share/dict/words`.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let model = Self::from_words(content.lines());
        if model.is_empty() {
            return Err(Error::Dictionary(format!(
                "word list {} is empty",
                path.display()
            )));
        }
        debug!(path = %path.display(), words = model.len(), "loaded word list");
        Ok(model)
    }
}

impl SpellModel for WordListModel {
    fn contains(&self, word: &str) -> bool {
        self.words.contains(&word.to_lowercase())
    }

    fn suggest(&self, word: &str, limit: usize) -> Result<Vec<String>, Error> {
        let word = word.to_lowercase();
        let len = word.chars().count();
        let lengths = len.saturating_sub(MAX_EDIT_DISTANCE)..=len + MAX_EDIT_DISTANCE;

        let mut candidates: Vec<(usize, &String)> = self
            .by_length
            .range(lengths)
            .flat_map(|(_, bucket)| bucket.iter())
            .filter_map(|candidate| {
                let distance = levenshtein(&word, candidate);
                (distance > 0 && distance <= MAX_EDIT_DISTANCE).then_some((distance, candidate))
            })
            .collect();
        candidates.sort();

        Ok(candidates
            .into_iter()
            .take(limit)
            .map(|(_, candidate)| candidate.clone())
            .collect())
    }

    fn len(&self) -> usize {
        self.words.len()
    }
}

/// Character-wise Levenshtein distance.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let b: Vec<char> = b.chars().collect();
    let mut previous: Vec<usize> = (0..=b.len()).collect();
    let mut current = vec![0; b.len() + 1];

    for (i, ca) in a.chars().enumerate() {
        current[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let substitution = previous[j] + usize::from(ca != *cb);
            current[j + 1] = substitution.min(previous[j + 1] + 1).min(current[j] + 1);
        }
        std::mem::swap(&mut previous, &mut current);
    }
    previous[b.len()]
}

/// Splits text into checkable word tokens, in order, with duplicates.
pub fn tokenize(text: &str) -> Vec<String> {
    NON_WORD
        .replace_all(text, " ")
        .split_whitespace()
        .map(|token| token.trim_matches(|c| c == '\'' || c == '-'))
        .filter(|token| token.chars().count() > MAX_SKIPPED_TOKEN_CHARS)
        .filter(|token| !token.chars().all(|c| c.is_numeric()))
        .map(str::to_string)
        .collect()
}

/// Removes case-insensitive duplicates, keeping first-seen order and casing.
fn dedupe(tokens: &[String]) -> Vec<&String> {
    let mut seen = HashSet::new();
    tokens
        .iter()
        .filter(|token| seen.insert(token.to_lowercase()))
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Known {
    Base,
    Custom,
    No,
}

fn lookup(word: &str, model: &dyn SpellModel, dictionary: &CustomDictionary) -> Known {
    if model.contains(word) {
        Known::Base
    } else if dictionary.contains(word) {
        Known::Custom
    } else {
        Known::No
    }
}

/// Classifies a token, also accepting possessives and hyphenated compounds
/// whose parts are all known.
fn classify(token: &str, model: &dyn SpellModel, dictionary: &CustomDictionary) -> Known {
    let known = lookup(token, model, dictionary);
    if known != Known::No {
        return known;
    }

    let lower = token.to_lowercase();
    if let Some(stem) = lower.strip_suffix("'s") {
        let known = lookup(stem, model, dictionary);
        if known != Known::No {
            return known;
        }
    }

    if lower.contains('-') {
        let parts: Vec<Known> = lower
            .split('-')
            .filter(|part| !part.is_empty())
            .map(|part| lookup(part, model, dictionary))
            .collect();
        if !parts.is_empty() && parts.iter().all(|k| *k != Known::No) {
            return if parts.contains(&Known::Custom) {
                Known::Custom
            } else {
                Known::Base
            };
        }
    }

    Known::No
}

/// Checks the spelling of `text`.
///
/// Returns `None` when the text has no checkable words. Suggestion failures
/// leave that word without suggestions and never abort the check.
pub fn spell_check(
    text: &str,
    model: &dyn SpellModel,
    dictionary: &CustomDictionary,
) -> Option<SpellingResult> {
    let tokens = tokenize(text);
    if tokens.is_empty() {
        return None;
    }

    let mut usage: HashMap<String, usize> = HashMap::new();
    for token in &tokens {
        *usage.entry(token.to_lowercase()).or_default() += 1;
    }

    let unique = dedupe(&tokens);
    let mut custom_words_used = 0;
    let mut misspelled = Vec::new();

    for token in &unique {
        match classify(token, model, dictionary) {
            Known::Base => {}
            Known::Custom => custom_words_used += 1,
            Known::No => {
                let suggestions = model.suggest(token, MAX_SUGGESTIONS).unwrap_or_else(|e| {
                    warn!(word = %token, "no suggestions available: {}", e);
                    Vec::new()
                });
                misspelled.push(Misspelling {
                    word: token.to_string(),
                    suggestions,
                    context_usage: usage.get(&token.to_lowercase()).copied().unwrap_or(1),
                });
            }
        }
    }

    let total = unique.len();
    let misspelled_count = misspelled.len();
    let accuracy = round_to(
        100.0 * (total - misspelled_count) as f64 / total.max(1) as f64,
        1,
    );

    // Stable sort keeps first-seen order among equal counts.
    misspelled.sort_by(|a, b| b.context_usage.cmp(&a.context_usage));
    let (common_errors, unique_errors): (Vec<_>, Vec<_>) =
        misspelled.into_iter().partition(|m| m.context_usage > 1);

    debug!(
        total,
        misspelled = misspelled_count,
        accuracy,
        "spell check finished"
    );

    Some(SpellingResult {
        statistics: SpellingStatistics {
            total_unique_words: total,
            misspelled_count,
            accuracy_percentage: accuracy,
            custom_dictionary_size: dictionary.len(),
            custom_words_used,
        },
        common_errors,
        unique_errors,
        quality_assessment: assess_quality(accuracy, misspelled_count),
    })
}

/// Bands an accuracy percentage and describes it.
pub fn assess_quality(accuracy: f64, error_count: usize) -> QualityAssessment {
    let level = QUALITY_BANDS
        .iter()
        .find(|(lower, _)| accuracy >= *lower)
        .map_or(NEEDS_IMPROVEMENT, |(_, level)| level);
    let noun = if error_count == 1 { "error" } else { "errors" };
    QualityAssessment {
        level: level.to_string(),
        description: format!(
            "{level} spelling quality: {error_count} potential spelling {noun} found ({accuracy}% accuracy)."
        ),
    }
}
