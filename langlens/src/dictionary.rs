//! The persisted custom domain dictionary.
//!
//! Game worlds use plenty of words no general dictionary knows (`redstone`,
//! `mooshroom`, mob and block names). The custom dictionary holds those,
//! lower-cased, one word per line in a plain text file.

use std::collections::BTreeSet;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::Error;

/// Words shorter than this are rejected by [`CustomDictionary::add_word`].
pub const MIN_WORD_CHARS: usize = 2;

/// Vocabulary written to a new dictionary file.
pub const SEED_WORDS: &[&str] = &[
    "minecraft",
    "redstone",
    "netherite",
    "nether",
    "creeper",
    "enderman",
    "endermen",
    "mooshroom",
    "axolotl",
    "piglin",
    "villager",
    "villagers",
    "cobblestone",
    "glowstone",
    "obsidian",
    "biome",
    "biomes",
    "spawn",
    "respawn",
    "crafting",
    "craftable",
    "smelting",
    "hotbar",
    "gameplay",
    "multiplayer",
    "worldbuilding",
    "npc",
    "npcs",
    "stem",
    "coding",
    "codebuilder",
    "hydroponics",
    "photovoltaic",
];

/// Lower-cased word set, optionally backed by a file.
#[derive(Debug, Clone, Default)]
pub struct CustomDictionary {
    words: BTreeSet<String>,
    path: Option<PathBuf>,
}

impl CustomDictionary {
    /// Loads the dictionary at `path`, creating it with [`SEED_WORDS`] when
    /// it does not exist yet.
    pub fn load_or_seed<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        if !path.exists() {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            let mut content = SEED_WORDS.join("\n");
            content.push('\n');
            fs::write(path, content)?;
            info!(path = %path.display(), "created custom dictionary");
        }

        let words = fs::read_to_string(path)?
            .lines()
            .map(|line| line.trim().to_lowercase())
            .filter(|line| !line.is_empty())
            .collect::<BTreeSet<_>>();
        debug!(path = %path.display(), words = words.len(), "loaded custom dictionary");

        Ok(CustomDictionary {
            words,
            path: Some(path.to_path_buf()),
        })
    }

    /// Creates a dictionary that lives only in memory.
    pub fn in_memory<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        CustomDictionary {
            words: words
                .into_iter()
                .map(|w| w.as_ref().trim().to_lowercase())
                .filter(|w| !w.is_empty())
                .collect(),
            path: None,
        }
    }

    /// Case-insensitive membership test.
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(&word.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Words in alphabetical order.
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Adds `word` (trimmed, lower-cased) and appends it to the backing file.
    ///
    /// Returns the stored form of the word.
    pub fn add_word(&mut self, word: &str) -> Result<String, Error> {
        let word = word.trim().to_lowercase();
        if word.chars().count() < MIN_WORD_CHARS {
            return Err(Error::WordTooShort);
        }
        if self.words.contains(&word) {
            return Err(Error::WordExists(word));
        }

        if let Some(path) = &self.path {
            let mut file = OpenOptions::new().create(true).append(true).open(path)?;
            writeln!(file, "{word}")?;
        }
        self.words.insert(word.clone());
        info!(word = %word, "added word to custom dictionary");
        Ok(word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_seeded_on_first_use() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("dict").join("custom_dictionary.txt");

        let dictionary = CustomDictionary::load_or_seed(&path).unwrap();
        assert!(path.exists());
        assert_eq!(dictionary.len(), SEED_WORDS.len());
        assert!(dictionary.contains("Redstone"));
        assert_eq!(dictionary.path(), Some(path.as_path()));
    }

    #[test]
    fn test_add_word_persists() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("custom.txt");

        let mut dictionary = CustomDictionary::load_or_seed(&path).unwrap();
        assert_eq!(dictionary.add_word("  Kelpie ").unwrap(), "kelpie");

        let reloaded = CustomDictionary::load_or_seed(&path).unwrap();
        assert!(reloaded.contains("kelpie"));
        assert_eq!(reloaded.len(), SEED_WORDS.len() + 1);
    }

    #[test]
    fn test_duplicate_is_rejected_without_touching_the_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("custom.txt");

        let mut dictionary = CustomDictionary::load_or_seed(&path).unwrap();
        let before = fs::metadata(&path).unwrap().len();

        let err = dictionary.add_word("REDSTONE").unwrap_err();
        assert!(matches!(err, Error::WordExists(ref w) if w == "redstone"));
        assert_eq!(fs::metadata(&path).unwrap().len(), before);
    }

    #[test]
    fn test_short_word_is_rejected() {
        let mut dictionary = CustomDictionary::in_memory(["ore"]);
        assert!(matches!(dictionary.add_word(" x "), Err(Error::WordTooShort)));
        assert_eq!(dictionary.add_word("xp").unwrap(), "xp");
        assert_eq!(dictionary.words().collect::<Vec<_>>(), vec!["ore", "xp"]);
    }

    #[test]
    fn test_existing_file_is_not_reseeded() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("custom.txt");
        fs::write(&path, "Kelp\n\nsniffer\n").unwrap();

        let dictionary = CustomDictionary::load_or_seed(&path).unwrap();
        assert_eq!(dictionary.words().collect::<Vec<_>>(), vec!["kelp", "sniffer"]);
    }
}
