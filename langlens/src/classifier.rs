//! Decides whether a resource entry carries user-facing ("educational") text.
//!
//! Keys are matched against a fixed table of substrings first. Entries whose
//! key says nothing about the content fall back to heuristics on the shape of
//! the value. Everything here is pure.

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

/// Kind of user-facing content a key pattern identifies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentCategory {
    Dialogue,
    Narrative,
    Instruction,
    SignOrBook,
    Conversation,
    Activity,
    WorldContent,
    Title,
    UserFacing,
}

/// Key substrings (lower case) and the category they identify.
pub const KEY_PATTERNS: &[(&str, ContentCategory)] = &[
    ("dialogue", ContentCategory::Dialogue),
    ("dialog", ContentCategory::Dialogue),
    ("npc", ContentCategory::Dialogue),
    ("speech", ContentCategory::Dialogue),
    ("story", ContentCategory::Narrative),
    ("narrat", ContentCategory::Narrative),
    ("lore", ContentCategory::Narrative),
    ("intro", ContentCategory::Narrative),
    ("outro", ContentCategory::Narrative),
    ("chapter", ContentCategory::Narrative),
    ("tutorial", ContentCategory::Instruction),
    ("instruction", ContentCategory::Instruction),
    ("lesson", ContentCategory::Instruction),
    ("hint", ContentCategory::Instruction),
    ("guide", ContentCategory::Instruction),
    ("help", ContentCategory::Instruction),
    ("book", ContentCategory::SignOrBook),
    ("page", ContentCategory::SignOrBook),
    ("journal", ContentCategory::SignOrBook),
    ("note", ContentCategory::SignOrBook),
    ("chat", ContentCategory::Conversation),
    ("conversation", ContentCategory::Conversation),
    ("greeting", ContentCategory::Conversation),
    ("message", ContentCategory::Conversation),
    ("talk", ContentCategory::Conversation),
    ("quest", ContentCategory::Activity),
    ("objective", ContentCategory::Activity),
    ("mission", ContentCategory::Activity),
    ("activity", ContentCategory::Activity),
    ("challenge", ContentCategory::Activity),
    ("task", ContentCategory::Activity),
    ("world.", ContentCategory::WorldContent),
    ("level.", ContentCategory::WorldContent),
    ("custom.", ContentCategory::WorldContent),
    ("title", ContentCategory::Title),
    ("heading", ContentCategory::Title),
    ("display_name", ContentCategory::Title),
    ("displayname", ContentCategory::Title),
    ("edu.", ContentCategory::UserFacing),
    ("education", ContentCategory::UserFacing),
    ("caption", ContentCategory::UserFacing),
    ("question", ContentCategory::UserFacing),
    ("answer", ContentCategory::UserFacing),
    ("quiz", ContentCategory::UserFacing),
];

/// Short key words that only count as a whole key segment, so that `tip`
/// does not fire on `tooltip` nor `sign` on `design`.
pub const KEY_SEGMENTS: &[(&str, ContentCategory)] = &[
    ("tip", ContentCategory::Instruction),
    ("tips", ContentCategory::Instruction),
    ("sign", ContentCategory::SignOrBook),
    ("signs", ContentCategory::SignOrBook),
];

/// Single words that are educational on their own.
pub const EDUCATIONAL_WORDS: &[&str] = &[
    "welcome",
    "hello",
    "goodbye",
    "congratulations",
    "correct",
    "incorrect",
    "learn",
    "explore",
    "discover",
    "experiment",
    "science",
    "energy",
    "water",
    "recycle",
    "sustainability",
    "ecosystem",
    "habitat",
    "history",
    "mathematics",
    "chemistry",
    "biology",
    "lesson",
    "question",
    "answer",
    "quiz",
    "observe",
    "hypothesis",
];

/// Words whose presence suggests sentence structure.
pub const FUNCTION_WORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "to", "of", "in", "on", "at", "for", "with", "is",
    "are", "was", "were", "be", "can", "will", "you", "your", "we", "our", "it", "this",
    "that", "how", "what", "why", "let's",
];

/// Path prefixes of game assets.
pub const ASSET_PREFIXES: &[&str] = &[
    "textures/",
    "sounds/",
    "models/",
    "animations/",
    "particles/",
    "entity/",
    "blocks/",
    "items/",
    "ui/",
];

lazy_static! {
    static ref NAMESPACED_ID: Regex =
        Regex::new(r"^[A-Za-z_][A-Za-z0-9_.\-]*:[A-Za-z_][A-Za-z0-9_./\-]*$").unwrap();
}

/// Returns the category of the first key pattern contained in `key`, or of
/// the first key segment (split on `.`, `_` and `-`) in [`KEY_SEGMENTS`].
pub fn classify_key(key: &str) -> Option<ContentCategory> {
    let key = key.to_lowercase();
    if let Some((_, category)) = KEY_PATTERNS.iter().find(|(pattern, _)| key.contains(pattern)) {
        return Some(*category);
    }
    key.split(['.', '_', '-']).find_map(|segment| {
        KEY_SEGMENTS
            .iter()
            .find(|(word, _)| *word == segment)
            .map(|(_, category)| *category)
    })
}

/// Returns true when the entry should contribute to the extracted text.
pub fn is_educational(key: &str, value: &str) -> bool {
    classify_key(key).is_some() || looks_educational(value)
}

/// Value-only heuristics used when the key is not recognised.
pub fn looks_educational(value: &str) -> bool {
    let value = value.trim();
    if value.chars().count() < 3 {
        return false;
    }
    if has_technical_marker(value) {
        return false;
    }
    if !value.chars().any(char::is_alphabetic) {
        return false;
    }

    let words: Vec<String> = value
        .split_whitespace()
        .map(|w| {
            w.trim_matches(|c: char| !c.is_alphanumeric() && c != '\'')
                .to_lowercase()
        })
        .filter(|w| !w.is_empty())
        .collect();

    match words.len() {
        0 => false,
        1 => EDUCATIONAL_WORDS.contains(&words[0].as_str()),
        n => {
            n >= 4
                || value.contains(['.', '!', '?', ','])
                || words.iter().any(|w| FUNCTION_WORDS.contains(&w.as_str()))
        }
    }
}

fn has_technical_marker(value: &str) -> bool {
    if value
        .split_whitespace()
        .any(|token| NAMESPACED_ID.is_match(token))
    {
        return true;
    }
    let lower = value.to_lowercase();
    if ASSET_PREFIXES.iter().any(|prefix| lower.contains(prefix)) {
        return true;
    }
    value.starts_with(['{', '[']) || value.ends_with(['}', ']'])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_npc_greeting_is_educational() {
        assert!(is_educational(
            "npc.greeting.01",
            "Hello, welcome to the sustainability lab!"
        ));
        assert_eq!(
            classify_key("NPC.Greeting.01"),
            Some(ContentCategory::Dialogue)
        );
    }

    #[test]
    fn test_namespaced_item_is_not_educational() {
        assert!(!is_educational(
            "item.diamond_pickaxe.name",
            "minecraft:diamond_pickaxe"
        ));
    }

    #[test]
    fn test_short_key_words_match_whole_segments() {
        assert_eq!(classify_key("loading.tip.3"), Some(ContentCategory::Instruction));
        assert_eq!(classify_key("hud_tips-1"), Some(ContentCategory::Instruction));
        assert_eq!(classify_key("sign.text.2"), Some(ContentCategory::SignOrBook));
        assert_eq!(classify_key("block.multiplier"), None);
        assert_eq!(classify_key("tooltip_icon"), None);
        assert_eq!(classify_key("block.design"), None);
        assert_eq!(classify_key("assign.slot"), None);
    }

    #[test]
    fn test_clock_times_and_ratios_are_not_technical() {
        assert!(looks_educational("Meet the class at 10:30 near the river"));
        assert!(looks_educational("Mix sand and clay at 3:1 for bricks"));
        assert!(!looks_educational("minecraft:stone"));
    }

    #[test]
    fn test_key_pattern_wins_over_value_shape() {
        assert!(is_educational("tutorial.step", "ok"));
    }

    #[test]
    fn test_short_and_numeric_values() {
        assert!(!looks_educational("ok"));
        assert!(!looks_educational("12345"));
        assert!(!looks_educational("--- ... ---"));
    }

    #[test]
    fn test_asset_paths_and_structures() {
        assert!(!looks_educational("textures/blocks/stone the block"));
        assert!(!looks_educational("{\"text\": \"hi there\"}"));
        assert!(!looks_educational("[1, 2, 3]"));
    }

    #[test]
    fn test_single_word_whitelist() {
        assert!(looks_educational("Welcome!"));
        assert!(looks_educational("Energy"));
        assert!(!looks_educational("Cobblestone"));
    }

    #[test]
    fn test_multi_word_structure() {
        assert!(!looks_educational("Oak Planks"));
        assert!(looks_educational("Light the torch"));
        assert!(looks_educational("Solar panels convert sunlight"));
        assert!(looks_educational("Wait, really"));
    }
}
