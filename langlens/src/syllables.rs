//! Word-level helpers shared by the readability formulas.

use std::collections::HashSet;

use lazy_static::lazy_static;

lazy_static! {
    /// Familiar words that never count as difficult.
    static ref EASY_WORDS: HashSet<&'static str> = include_str!("../data/easy_words.txt")
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .collect();
}

/// Estimates the number of syllables in an English word.
///
/// Counts vowel groups (`y` included), then discounts a silent final `e`
/// and the silent `-es`/`-ed` endings. Non-empty words have at least one.
pub fn count_syllables(word: &str) -> usize {
    let word: String = word
        .chars()
        .filter(|c| c.is_alphabetic())
        .flat_map(char::to_lowercase)
        .collect();
    if word.is_empty() {
        return 0;
    }
    if word.chars().count() <= 3 {
        return 1;
    }

    let mut count = 0;
    let mut previous_vowel = false;
    for c in word.chars() {
        let vowel = is_vowel(c);
        if vowel && !previous_vowel {
            count += 1;
        }
        previous_vowel = vowel;
    }

    if count > 1 {
        if word.ends_with('e') && !word.ends_with("le") && !word.ends_with("ee") {
            count -= 1;
        } else if (word.ends_with("es") || word.ends_with("ed"))
            && !word.ends_with("ted")
            && !word.ends_with("ded")
            && !word.ends_with("ses")
            && !word.ends_with("ces")
            && !word.ends_with("ges")
        {
            count -= 1;
        }
    }

    count.max(1)
}

fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'y' | 'á' | 'é' | 'í' | 'ó' | 'ú')
}

/// True when the lower-cased word is on the familiar-word list.
pub fn is_easy_word(word: &str) -> bool {
    EASY_WORDS.contains(word.to_lowercase().as_str())
}

/// Strips surrounding punctuation; returns `None` for tokens without letters or digits.
pub fn lexical_word(token: &str) -> Option<&str> {
    let word = token.trim_matches(|c: char| !c.is_alphanumeric());
    if word.is_empty() { None } else { Some(word) }
}
