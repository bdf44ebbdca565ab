//! Traits at the seams where langlens hands work to pluggable backends.

use crate::error::Error;

/// A base spelling model: a word list plus a way to propose corrections.
///
/// Lookups are expected to be case-insensitive; callers pass words as they
/// appear in the text.
///
/// # Example
///
/// ```rust
/// use langlens::spelling::WordListModel;
/// use langlens::traits::SpellModel;
///
/// let model = WordListModel::from_words(["river", "rivet", "water"]);
/// assert!(model.contains("River"));
/// assert_eq!(model.suggest("rivar", 5)?, vec!["river", "rivet"]);
/// # Ok::<(), langlens::Error>(())
/// ```
pub trait SpellModel {
    /// Returns true when `word` is a known word.
    fn contains(&self, word: &str) -> bool;

    /// Proposes at most `limit` corrections for `word`, best first.
    fn suggest(&self, word: &str, limit: usize) -> Result<Vec<String>, Error>;

    /// Number of words the model knows.
    fn len(&self) -> usize;

    /// Returns true when the model knows no words.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A text generation backend used to draft educator documents.
///
/// Any `Fn(&str) -> Result<String, Error>` closure is a generator, which
/// keeps tests and simple integrations free of HTTP clients.
pub trait TextGenerator {
    /// Produces a completion for `prompt`.
    fn generate(&self, prompt: &str) -> Result<String, Error>;
}

impl<F> TextGenerator for F
where
    F: Fn(&str) -> Result<String, Error>,
{
    fn generate(&self, prompt: &str) -> Result<String, Error> {
        self(prompt)
    }
}
