//! Discovery and ranking of `.lang` resource files inside an unpacked world.

use std::path::{Path, PathBuf};

use ignore::WalkBuilder;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::locale::classify_locale;
use crate::report::round_to;

/// Extension (compared case-insensitively) of localization resource files.
pub const RESOURCE_EXTENSION: &str = "lang";

/// One discovered localization file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceFile {
    /// Base file name, e.g. `en_US.lang`.
    pub name: String,
    /// Path relative to the unpacked root, `/`-separated.
    pub relative_path: String,
    /// Absolute path used for reading.
    #[serde(skip)]
    pub full_path: PathBuf,
    pub size_bytes: u64,
    /// Size in kilobytes, rounded to two decimals.
    pub size_kb: f64,
    pub is_primary_locale: bool,
    pub locale_label: String,
}

impl ResourceFile {
    fn from_path(root: &Path, path: &Path, size_bytes: u64) -> Option<Self> {
        let name = path.file_name()?.to_string_lossy().to_string();
        let relative = path.strip_prefix(root).ok()?;
        let relative_path = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        let locale = classify_locale(&name);

        Some(ResourceFile {
            name,
            relative_path,
            full_path: path.to_path_buf(),
            size_bytes,
            size_kb: round_to(size_bytes as f64 / 1024.0, 2),
            is_primary_locale: locale.is_primary,
            locale_label: locale.label,
        })
    }
}

/// Returns true when `name` ends in `.lang`, ignoring case.
pub fn is_resource_file_name(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(RESOURCE_EXTENSION))
}

/// Finds every `.lang` file under `root`, ranked for analysis.
///
/// Primary-locale files come first, then everything else; each group is
/// ordered by descending size, ties by relative path. A missing root yields
/// an empty list.
pub fn locate<P: AsRef<Path>>(root: P) -> Vec<ResourceFile> {
    let root = root.as_ref();
    if !root.is_dir() {
        debug!(root = %root.display(), "resource root does not exist");
        return Vec::new();
    }

    let walker = WalkBuilder::new(root)
        .standard_filters(false)
        .follow_links(false)
        .build();

    let mut files = Vec::new();
    for dent in walker {
        let dent = match dent {
            Ok(d) => d,
            Err(e) => {
                warn!("skipping unreadable entry: {}", e);
                continue;
            }
        };
        if !dent.file_type().is_some_and(|t| t.is_file()) {
            continue;
        }
        if !is_resource_file_name(&dent.file_name().to_string_lossy()) {
            continue;
        }
        let size = match dent.metadata() {
            Ok(m) => m.len(),
            Err(e) => {
                warn!(path = %dent.path().display(), "cannot stat resource file: {}", e);
                continue;
            }
        };
        if let Some(file) = ResourceFile::from_path(root, dent.path(), size) {
            files.push(file);
        }
    }

    rank(&mut files);
    debug!(root = %root.display(), count = files.len(), "located resource files");
    files
}

/// Sorts primary-locale files first, each group by descending size, ties by path.
pub fn rank(files: &mut [ResourceFile]) {
    files.sort_by(|a, b| {
        b.is_primary_locale
            .cmp(&a.is_primary_locale)
            .then(b.size_bytes.cmp(&a.size_bytes))
            .then_with(|| a.relative_path.cmp(&b.relative_path))
    });
}

/// Picks the file to analyze from a ranked list.
///
/// Returns the file and whether it is a primary-locale file. When no
/// primary-locale file exists the largest file overall is returned.
pub fn select_candidate(files: &[ResourceFile]) -> Option<(&ResourceFile, bool)> {
    if let Some(primary) = files.iter().find(|f| f.is_primary_locale) {
        return Some((primary, true));
    }
    files
        .iter()
        .max_by(|a, b| {
            a.size_bytes
                .cmp(&b.size_bytes)
                .then_with(|| b.relative_path.cmp(&a.relative_path))
        })
        .map(|f| (f, false))
}
