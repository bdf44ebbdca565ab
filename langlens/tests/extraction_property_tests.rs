use langlens::extractor::{clean_value, extract, extract_from_str};
use langlens::placeholder::replace_placeholders;
use proptest::prelude::*;
use std::fs;
use tempfile::TempDir;

fn key_strategy() -> impl Strategy<Value = String> {
    proptest::string::string_regex("(npc|story|item|tile|tutorial)\\.[a-z_]{1,10}\\.[0-9]{1,2}")
        .expect("valid key regex")
}

fn value_strategy() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[A-Za-z0-9 §%\\.,!\\?'\\[\\]{}:_]{0,60}").expect("valid value regex")
}

fn lang_file_strategy() -> impl Strategy<Value = Vec<(String, String)>> {
    prop::collection::vec((key_strategy(), value_strategy()), 0..12)
}

fn render(entries: &[(String, String)]) -> String {
    let mut out = String::from("## generated\n");
    for (key, value) in entries {
        out.push_str(key);
        out.push('=');
        out.push_str(value);
        out.push('\n');
    }
    out
}

proptest! {
    #[test]
    fn prop_extraction_is_idempotent(entries in lang_file_strategy()) {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("en_US.lang");
        fs::write(&path, render(&entries)).unwrap();

        let first = extract(&path);
        let second = extract(&path);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_extracted_text_is_normalized(entries in lang_file_strategy()) {
        let extraction = extract_from_str(&render(&entries));
        prop_assert!(!extraction.text.contains("  "));
        prop_assert_eq!(extraction.text.trim(), extraction.text.as_str());
        prop_assert!(extraction.educational_entries <= extraction.total_entries);
        prop_assert_eq!(extraction.total_entries, entries.len());
        prop_assert_eq!(extraction.word_count, extraction.text.split_whitespace().count());
    }

    #[test]
    fn prop_cleaned_values_have_no_braces(value in value_strategy()) {
        let cleaned = clean_value(&value);
        prop_assert!(!cleaned.contains('{') && !cleaned.contains('}'), "cleaned value contains braces: {:?}", cleaned);
        prop_assert!(!cleaned.starts_with(' ') && !cleaned.ends_with(' '));
    }

    #[test]
    fn prop_text_without_percent_is_untouched(value in "[A-Za-z ,.!?]{0,40}") {
        prop_assert_eq!(replace_placeholders(&value, "X"), value);
    }
}
