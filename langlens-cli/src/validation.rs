use std::path::{Path, PathBuf};

use langlens::world::WORLD_EXTENSIONS;

/// What an analysis command runs against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// An unpacked world in the store.
    Unpacked(u32),
    /// Any directory on disk.
    Directory(PathBuf),
}

impl Target {
    /// Builds the target from the `<id>` / `--dir` pair. Clap guarantees
    /// exactly one of them is present; the directory wins otherwise.
    pub fn from_args(id: Option<u32>, dir: Option<PathBuf>) -> Self {
        match (id, dir) {
            (_, Some(dir)) => Target::Directory(dir),
            (Some(id), None) => Target::Unpacked(id),
            (None, None) => Target::Directory(PathBuf::from(".")),
        }
    }
}

/// Validate file path exists and is readable
pub fn validate_file_path(path: &Path) -> Result<(), String> {
    if !path.exists() {
        return Err(format!("File does not exist: {}", path.display()));
    }

    if !path.is_file() {
        return Err(format!("Path is not a file: {}", path.display()));
    }

    Ok(())
}

/// Validate directory exists
pub fn validate_dir_path(path: &Path) -> Result<(), String> {
    if !path.exists() {
        return Err(format!("Directory does not exist: {}", path.display()));
    }

    if !path.is_dir() {
        return Err(format!("Path is not a directory: {}", path.display()));
    }

    Ok(())
}

/// Validate a world archive can be imported
pub fn validate_world_archive(path: &Path) -> Result<(), String> {
    validate_file_path(path)?;

    let extension = path
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    if !WORLD_EXTENSIONS.contains(&extension.as_str()) {
        return Err(format!(
            "Unsupported world archive: {} (expected .mcworld or .mctemplate)",
            path.display()
        ));
    }

    Ok(())
}

/// Validate a word before it is added to the custom dictionary
pub fn validate_dictionary_word(word: &str) -> Result<(), String> {
    let trimmed = word.trim();
    if trimmed.is_empty() {
        return Err("Word cannot be empty".to_string());
    }

    if trimmed.chars().any(char::is_whitespace) {
        return Err(format!("Word must not contain whitespace: '{}'", trimmed));
    }

    Ok(())
}
