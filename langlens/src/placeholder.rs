//! Placeholder recognition in resource values.
//!
//! Handles printf-style tokens (`%s`, `%d`, `%1$s`, `%.2f`, `%ld`), the
//! escaped percent `%%` and `%name%` variables, and replaces them with a
//! neutral marker so they do not pollute word counts or spelling.

use lazy_static::lazy_static;
use regex::Regex;

/// Marker substituted for every placeholder.
pub const PLACEHOLDER_MARKER: &str = "X";

const CONVERSION_CHARS: &str = "sdifuxXeEgGc@";

lazy_static! {
    // Names of one character would swallow adjacent printf tokens (`%s%s`).
    static ref VARIABLE_TOKEN: Regex = Regex::new(r"%[A-Za-z_][A-Za-z0-9_.]+%").unwrap();
}

/// Replaces every placeholder in `input` with `marker`; `%%` becomes `%`.
pub fn replace_placeholders(input: &str, marker: &str) -> String {
    let input = VARIABLE_TOKEN.replace_all(input, marker);
    let chars: Vec<char> = input.chars().collect();
    let mut out = String::with_capacity(input.len());
    let mut i = 0;

    while i < chars.len() {
        if chars[i] != '%' {
            out.push(chars[i]);
            i += 1;
            continue;
        }
        // Escaped percent
        if chars.get(i + 1) == Some(&'%') {
            out.push('%');
            i += 2;
            continue;
        }
        match printf_token_end(&chars, i + 1) {
            Some(end) => {
                out.push_str(marker);
                i = end;
            }
            None => {
                out.push('%');
                i += 1;
            }
        }
    }

    out
}

/// Returns the index just past a printf conversion starting after `%` at `start`.
fn printf_token_end(chars: &[char], start: usize) -> Option<usize> {
    let mut j = start;

    // Optional positional index: digits followed by '$'
    let digits_start = j;
    while j < chars.len() && chars[j].is_ascii_digit() {
        j += 1;
    }
    if j > digits_start && chars.get(j) == Some(&'$') {
        j += 1;
    } else {
        j = start;
    }

    // Flags, width and precision
    while j < chars.len() && matches!(chars[j], '-' | '+' | '#' | '0') {
        j += 1;
    }
    while j < chars.len() && chars[j].is_ascii_digit() {
        j += 1;
    }
    if chars.get(j) == Some(&'.') {
        j += 1;
        while j < chars.len() && chars[j].is_ascii_digit() {
            j += 1;
        }
    }

    // Length modifiers (l/ll/h)
    while j < chars.len() && matches!(chars[j], 'l' | 'h') {
        j += 1;
    }

    match chars.get(j) {
        Some(c) if CONVERSION_CHARS.contains(*c) => Some(j + 1),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_printf_tokens() {
        let s = "Hello %s, you have %d items and %1$s extra";
        assert_eq!(
            replace_placeholders(s, "X"),
            "Hello X, you have X items and X extra"
        );
    }

    #[test]
    fn test_precision_and_length_modifiers() {
        assert_eq!(replace_placeholders("%.2f%% done", "X"), "X% done");
        assert_eq!(replace_placeholders("%ld blocks", "X"), "X blocks");
    }

    #[test]
    fn test_variable_tokens() {
        assert_eq!(
            replace_placeholders("Welcome back, %player_name%!", "X"),
            "Welcome back, X!"
        );
    }

    #[test]
    fn test_adjacent_printf_tokens() {
        assert_eq!(replace_placeholders("Hello %s%s friend", "X"), "Hello XX friend");
        assert_eq!(replace_placeholders("Scored %d%s today", "X"), "Scored XX today");
        assert_eq!(
            replace_placeholders("%s%d points for %team%", "X"),
            "XX points for X"
        );
    }

    #[test]
    fn test_lone_percent_is_kept() {
        assert_eq!(replace_placeholders("100 % sure", "X"), "100 % sure");
    }

    #[test]
    fn test_non_ascii_text_survives() {
        assert_eq!(replace_placeholders("Café %s crème", "X"), "Café X crème");
    }
}
