//! Extraction of educational text from `.lang` resource files.
//!
//! A `.lang` file is a list of `key=value` lines with `#` comments. Values
//! accepted by the [classifier](crate::classifier) are cleaned of formatting
//! codes and placeholders and joined into one normalized text blob.

use std::fs::{self, File};
use std::io::{ErrorKind, Read};
use std::path::Path;

use encoding_rs::WINDOWS_1252;
use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use tracing::{debug, warn};

use crate::classifier::is_educational;
use crate::placeholder::{PLACEHOLDER_MARKER, replace_placeholders};

lazy_static! {
    static ref FORMAT_CODE: Regex = Regex::new(r"(?i)§[0-9a-fk-or]").unwrap();
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
    static ref SPACE_BEFORE_PUNCT: Regex = Regex::new(r"\s+([.,!?;:])").unwrap();
    static ref MISSING_SPACE_AFTER_SENTENCE: Regex = Regex::new(r"([.!?])(\p{Lu})").unwrap();
}

/// Cleaned values shorter than this (in characters) are dropped.
const MIN_VALUE_CHARS: usize = 11;
/// Cleaned values with fewer words are dropped.
const MIN_VALUE_WORDS: usize = 3;

/// Text extracted from one resource file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Extraction {
    /// Accepted values joined by single spaces.
    pub text: String,
    pub word_count: usize,
    pub char_count: usize,
    /// Lines that parsed as `key=value`.
    pub total_entries: usize,
    /// Entries whose cleaned value was accepted.
    pub educational_entries: usize,
}

impl Extraction {
    /// True when no usable text was extracted.
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Reads and extracts `path`. Unreadable files yield an empty extraction.
pub fn extract<P: AsRef<Path>>(path: P) -> Extraction {
    let path = path.as_ref();
    match read_resource_text(path) {
        Some(content) => extract_from_str(&content),
        None => Extraction::default(),
    }
}

/// Convenience wrapper returning only the normalized text.
pub fn extract_text<P: AsRef<Path>>(path: P) -> String {
    extract(path).text
}

/// Extracts educational text from `.lang` content.
pub fn extract_from_str(content: &str) -> Extraction {
    let mut total_entries = 0;
    let mut accepted: Vec<String> = Vec::new();

    for line in content.lines() {
        let Some((key, value)) = split_entry(line) else {
            continue;
        };
        total_entries += 1;

        if !is_educational(key, value) {
            continue;
        }
        let cleaned = clean_value(value);
        if is_acceptable(&cleaned) {
            accepted.push(cleaned);
        }
    }

    let text = normalize_whitespace(&accepted.join(" "));
    debug!(
        total_entries,
        accepted = accepted.len(),
        chars = text.len(),
        "extracted resource text"
    );

    Extraction {
        word_count: text.split_whitespace().count(),
        char_count: text.chars().count(),
        total_entries,
        educational_entries: accepted.len(),
        text,
    }
}

/// Splits a resource line into trimmed key and value.
///
/// Blank lines, `#` comments and lines without an unescaped `=` yield `None`.
/// A trailing `\t#` inline comment is removed from the value.
pub fn split_entry(line: &str) -> Option<(&str, &str)> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return None;
    }

    let separator = unescaped_equals(trimmed)?;
    let key = trimmed[..separator].trim();
    if key.is_empty() {
        return None;
    }

    let mut value = &trimmed[separator + 1..];
    if let Some(comment) = value.find("\t#") {
        value = &value[..comment];
    }
    Some((key, value.trim()))
}

fn unescaped_equals(line: &str) -> Option<usize> {
    let mut backslashes = 0;
    for (idx, c) in line.char_indices() {
        if c == '\\' {
            backslashes += 1;
            continue;
        }
        if c == '=' && backslashes % 2 == 0 {
            return Some(idx);
        }
        backslashes = 0;
    }
    None
}

/// Strips formatting artifacts from a resource value.
pub fn clean_value(value: &str) -> String {
    let cleaned = FORMAT_CODE.replace_all(value, "");
    let cleaned = replace_placeholders(&cleaned, PLACEHOLDER_MARKER);
    let cleaned = cleaned
        .replace("\\n", " ")
        .replace("\\r", " ")
        .replace(['\n', '\r'], " ");
    let cleaned = collapse_repeated_brackets(&cleaned).replace(['{', '}'], "");
    let cleaned = WHITESPACE.replace_all(&cleaned, " ");
    let cleaned = SPACE_BEFORE_PUNCT.replace_all(&cleaned, "$1");
    let cleaned = MISSING_SPACE_AFTER_SENTENCE.replace_all(&cleaned, "$1 $2");

    cleaned
        .split_whitespace()
        .filter(|token| !is_short_number(token))
        .collect::<Vec<_>>()
        .join(" ")
}

fn collapse_repeated_brackets(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut previous: Option<char> = None;
    for c in input.chars() {
        let is_bracket = matches!(c, '[' | ']' | '(' | ')' | '<' | '>');
        if is_bracket && previous == Some(c) {
            continue;
        }
        out.push(c);
        previous = Some(c);
    }
    out
}

fn is_short_number(token: &str) -> bool {
    token.len() < 3 && token.chars().all(|c| c.is_ascii_digit())
}

fn is_acceptable(cleaned: &str) -> bool {
    cleaned.chars().count() >= MIN_VALUE_CHARS
        && cleaned.chars().any(char::is_alphabetic)
        && cleaned.split_whitespace().count() >= MIN_VALUE_WORDS
}

fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Reads a resource file as text.
///
/// BOM-marked files are decoded per their BOM; otherwise strict UTF-8 is
/// tried first and Windows-1252 is used when the bytes are not valid UTF-8.
/// Returns `None` only when the file cannot be read at all.
pub fn read_resource_text(path: &Path) -> Option<String> {
    match decode_utf8(path) {
        Ok(text) => Some(text),
        Err(e) if e.kind() == ErrorKind::InvalidData => {
            debug!(path = %path.display(), "not valid UTF-8, decoding as Windows-1252");
            match fs::read(path) {
                Ok(bytes) => {
                    let (text, _) = WINDOWS_1252.decode_without_bom_handling(&bytes);
                    Some(text.into_owned())
                }
                Err(e) => {
                    warn!(path = %path.display(), "cannot read resource file: {}", e);
                    None
                }
            }
        }
        Err(e) => {
            warn!(path = %path.display(), "cannot read resource file: {}", e);
            None
        }
    }
}

fn decode_utf8(path: &Path) -> std::io::Result<String> {
    let file = File::open(path)?;
    let mut decoder = encoding_rs_io::DecodeReaderBytesBuilder::new()
        .bom_override(true)
        .strip_bom(true)
        .build(file);

    let mut decoded = String::new();
    decoder.read_to_string(&mut decoded)?;
    Ok(decoded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_entry_basic() {
        assert_eq!(
            split_entry("npc.guide.01=Welcome, explorer!"),
            Some(("npc.guide.01", "Welcome, explorer!"))
        );
    }

    #[test]
    fn test_split_entry_skips_comments_blank_and_malformed() {
        assert_eq!(split_entry("   "), None);
        assert_eq!(split_entry("## comment=with equals"), None);
        assert_eq!(split_entry("no separator here"), None);
        assert_eq!(split_entry("=value without key"), None);
    }

    #[test]
    fn test_split_entry_escaped_equals_and_inline_comment() {
        assert_eq!(
            split_entry(r"math\=fun.key=2 + 2 = 4\t"),
            Some((r"math\=fun.key", r"2 + 2 = 4\t"))
        );
        assert_eq!(
            split_entry("tile.stone.name=Stone\t#"),
            Some(("tile.stone.name", "Stone"))
        );
    }

    #[test]
    fn test_clean_removes_exactly_the_format_code() {
        assert_eq!(
            clean_value("Collect the §agreen§r crystals today"),
            "Collect the green crystals today"
        );
        assert_eq!(clean_value("Step§6 one"), "Step one");
    }

    #[test]
    fn test_clean_placeholders_newlines_and_brackets() {
        assert_eq!(
            clean_value("You found %d gems!\\nGreat job, %player%."),
            "You found X gems! Great job, X."
        );
        assert_eq!(
            clean_value("Read [[the book]] {carefully} now"),
            "Read [the book] carefully now"
        );
    }

    #[test]
    fn test_clean_punctuation_spacing_and_short_numbers() {
        assert_eq!(
            clean_value("Wait here .Then go  to room 12 or 305 !"),
            "Wait here. Then go to room or 305!"
        );
    }

    #[test]
    fn test_clean_keeps_dotted_names_and_abbreviations() {
        assert_eq!(
            clean_value("Visit education.minecraft.net for more lessons, e.g. the water cycle."),
            "Visit education.minecraft.net for more lessons, e.g. the water cycle."
        );
        assert_eq!(clean_value("Done.Next stop!Go"), "Done. Next stop! Go");
    }

    #[test]
    fn test_extract_from_str_counts_entries() {
        let content = "\
## Header
npc.guide.01=Welcome, explorer! Let's learn about renewable energy today.
item.stone.name=Stone
tile.glass.name=minecraft:glass
not an entry
";
        let extraction = extract_from_str(content);
        assert_eq!(extraction.total_entries, 3);
        assert_eq!(extraction.educational_entries, 1);
        assert_eq!(
            extraction.text,
            "Welcome, explorer! Let's learn about renewable energy today."
        );
        assert_eq!(extraction.word_count, 8);
    }

    #[test]
    fn test_short_values_are_dropped() {
        let extraction = extract_from_str("npc.a=Hi there\nnpc.b=Go now, ok");
        assert!(extraction.is_empty());
        assert_eq!(extraction.total_entries, 2);
    }

    #[test]
    fn test_windows_1252_fallback() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("en_US.lang");
        let mut bytes = b"story.intro=The caf".to_vec();
        bytes.push(0xE9);
        bytes.extend_from_slice(b" opens early for every visitor.\n");
        std::fs::write(&path, bytes).unwrap();

        assert_eq!(
            extract_text(&path),
            "The café opens early for every visitor."
        );
    }

    #[test]
    fn test_utf16_bom_is_decoded() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("en_US.lang");
        let text = "story.intro=Rivers carry water to the sea.\n";
        let mut bytes = vec![0xFF, 0xFE];
        for unit in text.encode_utf16() {
            bytes.extend_from_slice(&unit.to_le_bytes());
        }
        std::fs::write(&path, bytes).unwrap();

        assert_eq!(extract_text(&path), "Rivers carry water to the sea.");
    }

    #[test]
    fn test_missing_file_is_empty() {
        assert!(extract("/definitely/not/here.lang").is_empty());
    }
}
