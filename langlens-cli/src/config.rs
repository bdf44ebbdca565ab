//! `langlens.toml` configuration.
//!
//! Every key is optional. Command-line flags take precedence over the file.

use std::fs;
use std::path::{Path, PathBuf};

use langlens::{AnalysisOptions, WorldStore};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// File looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "langlens.toml";

const CUSTOM_DICTIONARY_FILE: &str = "custom_dictionary.txt";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub store_dir: PathBuf,
    pub unpacked_dir: PathBuf,
    /// Base word list file, one word per line. The bundled English list is
    /// used when unset.
    pub dictionary_path: Option<PathBuf>,
    /// Defaults to `custom_dictionary.txt` inside the store directory.
    pub custom_dictionary_path: Option<PathBuf>,
    /// Name recorded on imports, unpacks and repacks.
    pub user: String,
    pub analysis: AnalysisSection,
}

/// `[analysis]` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisSection {
    pub min_file_bytes: u64,
    pub min_text_chars: usize,
    pub min_words: usize,
    pub sample_chars: usize,
}

impl Default for AnalysisSection {
    fn default() -> Self {
        let defaults = AnalysisOptions::default();
        Self {
            min_file_bytes: defaults.min_file_bytes,
            min_text_chars: defaults.min_text_chars,
            min_words: defaults.min_words,
            sample_chars: defaults.sample_chars,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_dir: PathBuf::from("store"),
            unpacked_dir: PathBuf::from("unpacked"),
            dictionary_path: None,
            custom_dictionary_path: None,
            user: "cli".to_string(),
            analysis: AnalysisSection::default(),
        }
    }
}

/// Values given on the command line.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub store_dir: Option<PathBuf>,
    pub unpacked_dir: Option<PathBuf>,
    pub dictionary_path: Option<PathBuf>,
    pub custom_dictionary_path: Option<PathBuf>,
}

impl Config {
    /// Loads `path`, or `langlens.toml` from the working directory when it
    /// exists, or the defaults.
    ///
    /// An explicitly named file must exist.
    pub fn load(path: Option<&Path>) -> Result<Self, String> {
        match path {
            Some(path) => {
                if !path.is_file() {
                    return Err(format!("Config file does not exist: {}", path.display()));
                }
                Self::from_file(path)
            }
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.is_file() {
                    Self::from_file(default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, String> {
        let content = fs::read_to_string(path)
            .map_err(|e| format!("Cannot read config file {}: {}", path.display(), e))?;
        let config = Self::parse(&content)
            .map_err(|e| format!("Invalid config file {}: {}", path.display(), e))?;
        debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn with_overrides(mut self, overrides: CliOverrides) -> Self {
        if let Some(store_dir) = overrides.store_dir {
            self.store_dir = store_dir;
        }
        if let Some(unpacked_dir) = overrides.unpacked_dir {
            self.unpacked_dir = unpacked_dir;
        }
        if overrides.dictionary_path.is_some() {
            self.dictionary_path = overrides.dictionary_path;
        }
        if overrides.custom_dictionary_path.is_some() {
            self.custom_dictionary_path = overrides.custom_dictionary_path;
        }
        self
    }

    pub fn custom_dictionary(&self) -> PathBuf {
        self.custom_dictionary_path
            .clone()
            .unwrap_or_else(|| self.store_dir.join(CUSTOM_DICTIONARY_FILE))
    }

    /// Opens the world store at the configured directories.
    pub fn open_store(&self) -> Result<WorldStore, String> {
        WorldStore::open(&self.store_dir, &self.unpacked_dir)
            .map_err(|e| format!("Cannot open world store: {}", e))
    }

    pub fn analysis_options(&self) -> AnalysisOptions {
        AnalysisOptions::new()
            .with_min_file_bytes(self.analysis.min_file_bytes)
            .with_min_text_chars(self.analysis.min_text_chars)
            .with_min_words(self.analysis.min_words)
            .with_sample_chars(self.analysis.sample_chars)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::parse("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.analysis_options(), AnalysisOptions::default());
        assert_eq!(config.custom_dictionary(), PathBuf::from("store/custom_dictionary.txt"));
        assert_eq!(config.dictionary_path, None);
    }

    #[test]
    fn test_partial_config() {
        let config = Config::parse(
            r#"
            store_dir = "/srv/worlds"
            user = "ms.rivera"

            [analysis]
            min_words = 5
            "#,
        )
        .unwrap();
        assert_eq!(config.store_dir, PathBuf::from("/srv/worlds"));
        assert_eq!(config.unpacked_dir, PathBuf::from("unpacked"));
        assert_eq!(config.user, "ms.rivera");
        assert_eq!(config.analysis.min_words, 5);
        assert_eq!(config.analysis.min_text_chars, 50);
    }

    #[test]
    fn test_unknown_types_are_rejected() {
        assert!(Config::parse("store_dir = 42").is_err());
    }

    #[test]
    fn test_overrides_take_precedence() {
        let config = Config::parse("unpacked_dir = \"from-file\"")
            .unwrap()
            .with_overrides(CliOverrides {
                unpacked_dir: Some(PathBuf::from("from-flag")),
                custom_dictionary_path: Some(PathBuf::from("words.txt")),
                ..Default::default()
            });
        assert_eq!(config.unpacked_dir, PathBuf::from("from-flag"));
        assert_eq!(config.store_dir, PathBuf::from("store"));
        assert_eq!(config.custom_dictionary(), PathBuf::from("words.txt"));
    }

    #[test]
    fn test_load_explicit_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("langlens.toml");
        fs::write(&path, "dictionary_path = \"words\"\n").unwrap();
        let config = Config::load(Some(path.as_path())).unwrap();
        assert_eq!(config.dictionary_path, Some(PathBuf::from("words")));

        let missing = tmp.path().join("missing.toml");
        let err = Config::load(Some(missing.as_path())).unwrap_err();
        assert!(err.contains("does not exist"));
    }
}
