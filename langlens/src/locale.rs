//! Locale classification of `.lang` file names.
//!
//! Classification is table driven: an ordered list of exact locale codes is
//! tried first, then a list of token indicators. The first rule that matches
//! decides the label and whether the file counts as a primary (reference)
//! locale.

use lazy_static::lazy_static;
use serde::Serialize;
use unic_langid::LanguageIdentifier;

/// Label used when no rule matches a file name.
pub const UNKNOWN_LOCALE: &str = "Unknown";

/// One row of a locale table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocaleRule {
    pub pattern: &'static str,
    pub label: &'static str,
    pub primary: bool,
}

const fn rule(pattern: &'static str, label: &'static str, primary: bool) -> LocaleRule {
    LocaleRule {
        pattern,
        label,
        primary,
    }
}

/// Exact locale codes, in priority order. Matched against the parsed file stem.
pub const EXACT_LOCALES: &[LocaleRule] = &[
    rule("en_US", "English (United States)", true),
    rule("en", "English", true),
    rule("en_GB", "English (United Kingdom)", true),
    rule("en_CA", "English (Canada)", true),
    rule("en_AU", "English (Australia)", true),
    rule("en_NZ", "English (New Zealand)", true),
    rule("fr_FR", "French (France)", false),
    rule("fr_CA", "French (Canada)", false),
    rule("de_DE", "German", false),
    rule("es_ES", "Spanish (Spain)", false),
    rule("es_MX", "Spanish (Mexico)", false),
    rule("it_IT", "Italian", false),
    rule("pt_BR", "Portuguese (Brazil)", false),
    rule("pt_PT", "Portuguese (Portugal)", false),
    rule("nl_NL", "Dutch", false),
    rule("pl_PL", "Polish", false),
    rule("ru_RU", "Russian", false),
    rule("sv_SE", "Swedish", false),
    rule("ja_JP", "Japanese", false),
    rule("ko_KR", "Korean", false),
    rule("zh_CN", "Chinese (Simplified)", false),
    rule("zh_TW", "Chinese (Traditional)", false),
];

/// Fallback indicators, matched against lower-cased name tokens.
pub const LOCALE_INDICATORS: &[LocaleRule] = &[
    rule("english", "English (variant)", true),
    rule("en", "English (variant)", true),
];

lazy_static! {
    static ref PARSED_EXACT: Vec<(Option<LanguageIdentifier>, LocaleRule)> = EXACT_LOCALES
        .iter()
        .map(|rule| (parse_locale_code(rule.pattern), *rule))
        .collect();
}

/// Result of classifying a file name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocaleMatch {
    pub label: String,
    pub is_primary: bool,
}

impl LocaleMatch {
    fn unknown() -> Self {
        LocaleMatch {
            label: UNKNOWN_LOCALE.to_string(),
            is_primary: false,
        }
    }
}

impl From<&LocaleRule> for LocaleMatch {
    fn from(rule: &LocaleRule) -> Self {
        LocaleMatch {
            label: rule.label.to_string(),
            is_primary: rule.primary,
        }
    }
}

/// Parses `en_us`, `en-US` or `EN_us` style codes into a language identifier.
pub fn parse_locale_code(code: &str) -> Option<LanguageIdentifier> {
    code.replace('_', "-").parse::<LanguageIdentifier>().ok()
}

/// Returns the first rule in `rules` accepted by `matches`.
pub fn first_match<'a, F>(rules: &'a [LocaleRule], matches: F) -> Option<&'a LocaleRule>
where
    F: Fn(&LocaleRule) -> bool,
{
    rules.iter().find(|rule| matches(rule))
}

/// Classifies a `.lang` file name (with or without extension).
pub fn classify_locale(file_name: &str) -> LocaleMatch {
    let stem = strip_lang_extension(file_name);

    if let Some(id) = parse_locale_code(stem) {
        if let Some((_, rule)) = PARSED_EXACT
            .iter()
            .find(|(parsed, _)| parsed.as_ref() == Some(&id))
        {
            return LocaleMatch::from(rule);
        }
    }

    let tokens: Vec<String> = stem
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_ascii_lowercase)
        .collect();

    first_match(LOCALE_INDICATORS, |rule| {
        tokens.iter().any(|token| token == rule.pattern)
    })
    .map(LocaleMatch::from)
    .unwrap_or_else(LocaleMatch::unknown)
}

fn strip_lang_extension(file_name: &str) -> &str {
    let len = file_name.len();
    if len > 5 && file_name.is_char_boundary(len - 5) {
        let (stem, ext) = file_name.split_at(len - 5);
        if ext.eq_ignore_ascii_case(".lang") {
            return stem;
        }
    }
    file_name
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match_is_case_insensitive() {
        for name in ["en_US.lang", "en_us.lang", "EN-us.LANG", "en-US"] {
            let m = classify_locale(name);
            assert_eq!(m.label, "English (United States)", "{name}");
            assert!(m.is_primary);
        }
    }

    #[test]
    fn test_generic_english_and_british() {
        assert_eq!(classify_locale("en.lang").label, "English");
        let gb = classify_locale("en_gb.lang");
        assert_eq!(gb.label, "English (United Kingdom)");
        assert!(gb.is_primary);
    }

    #[test]
    fn test_other_locales_are_not_primary() {
        let fr = classify_locale("fr_FR.lang");
        assert_eq!(fr.label, "French (France)");
        assert!(!fr.is_primary);
    }

    #[test]
    fn test_indicator_fallback() {
        let m = classify_locale("english_custom.lang");
        assert_eq!(m.label, "English (variant)");
        assert!(m.is_primary);

        let m = classify_locale("en_pirate.lang");
        assert_eq!(m.label, "English (variant)");
    }

    #[test]
    fn test_unknown_locale() {
        let m = classify_locale("xx_xx.lang");
        assert_eq!(m.label, UNKNOWN_LOCALE);
        assert!(!m.is_primary);

        // "en" must be a whole token, not a substring.
        assert_eq!(classify_locale("generic.lang").label, UNKNOWN_LOCALE);
    }

    #[test]
    fn test_first_match_respects_table_order() {
        let rule = first_match(EXACT_LOCALES, |r| r.pattern.starts_with("en")).unwrap();
        assert_eq!(rule.pattern, "en_US");
    }
}
