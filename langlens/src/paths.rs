//! Resolution of user-supplied relative paths inside an unpacked world.

use std::fs;
use std::path::{Component, Path, PathBuf};

use serde::Serialize;
use tracing::debug;

use crate::error::Error;
use crate::extractor::read_resource_text;
use crate::locator::is_resource_file_name;

/// A resource file opened for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceFileView {
    pub name: String,
    /// The relative path as requested.
    pub path: String,
    /// Size in bytes.
    pub size: u64,
    pub lines: usize,
    pub content: String,
}

/// Joins `relative` onto `root`, refusing anything that would leave `root`.
///
/// Absolute paths and `..` components that climb above the root are
/// rejected outright. When the target exists, symlinks are resolved and the
/// result must still lie inside the canonical root.
pub fn resolve_within<P: AsRef<Path>>(root: P, relative: &str) -> Result<PathBuf, Error> {
    let root = root.as_ref();
    let escape = || Error::PathEscape(relative.to_string());

    let mut normalized = PathBuf::new();
    for component in Path::new(relative).components() {
        match component {
            Component::Normal(part) => normalized.push(part),
            Component::CurDir => {}
            Component::ParentDir => {
                if !normalized.pop() {
                    return Err(escape());
                }
            }
            Component::RootDir | Component::Prefix(_) => return Err(escape()),
        }
    }

    let joined = root.join(&normalized);
    if joined.exists() {
        let canonical_root = root.canonicalize()?;
        let canonical = joined.canonicalize()?;
        if !canonical.starts_with(&canonical_root) {
            return Err(escape());
        }
        return Ok(canonical);
    }
    Ok(joined)
}

/// Opens a `.lang` file below `root` for display.
pub fn read_resource_file<P: AsRef<Path>>(
    root: P,
    relative: &str,
) -> Result<ResourceFileView, Error> {
    let full_path = resolve_within(root, relative)?;
    let name = full_path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    if !full_path.is_file() || !is_resource_file_name(&name) {
        return Err(Error::not_found("Language file"));
    }

    let size = fs::metadata(&full_path)?.len();
    let content = read_resource_text(&full_path).ok_or_else(|| Error::not_found("Language file"))?;

    Ok(ResourceFileView {
        name,
        path: relative.to_string(),
        size,
        lines: content.split('\n').count(),
        content,
    })
}

/// Copies a `.lang` file below `root` into `dest_dir`, keeping its file name.
pub fn export_resource_file<P: AsRef<Path>, Q: AsRef<Path>>(
    root: P,
    relative: &str,
    dest_dir: Q,
) -> Result<PathBuf, Error> {
    let full_path = resolve_within(root, relative)?;
    let name = match full_path.file_name() {
        Some(name) if full_path.is_file() && is_resource_file_name(&name.to_string_lossy()) => {
            name.to_os_string()
        }
        _ => return Err(Error::not_found("Language file")),
    };

    let dest_dir = dest_dir.as_ref();
    fs::create_dir_all(dest_dir)?;
    let target = dest_dir.join(name);
    fs::copy(&full_path, &target)?;
    debug!(from = %full_path.display(), to = %target.display(), "exported resource file");
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn world() -> TempDir {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("texts")).unwrap();
        fs::write(
            tmp.path().join("texts/en_US.lang"),
            "npc.hello=Hello there, friend!\nnpc.bye=See you soon.\n",
        )
        .unwrap();
        fs::write(tmp.path().join("level.dat"), b"binary").unwrap();
        tmp
    }

    #[test]
    fn test_rejects_escapes() {
        let tmp = world();
        for bad in ["../secret.lang", "texts/../../secret.lang", "/etc/passwd"] {
            assert!(
                matches!(resolve_within(tmp.path(), bad), Err(Error::PathEscape(_))),
                "{bad}"
            );
        }
    }

    #[test]
    fn test_allows_inner_parent_components() {
        let tmp = world();
        let resolved = resolve_within(tmp.path(), "texts/../texts/./en_US.lang").unwrap();
        assert!(resolved.ends_with("texts/en_US.lang"));
    }

    #[cfg(unix)]
    #[test]
    fn test_rejects_symlink_escape() {
        let tmp = world();
        let outside = TempDir::new().unwrap();
        fs::write(outside.path().join("leak.lang"), "npc.a=secret text here").unwrap();
        std::os::unix::fs::symlink(outside.path(), tmp.path().join("link")).unwrap();

        assert!(matches!(
            resolve_within(tmp.path(), "link/leak.lang"),
            Err(Error::PathEscape(_))
        ));
    }

    #[test]
    fn test_read_resource_file() {
        let tmp = world();
        let view = read_resource_file(tmp.path(), "texts/en_US.lang").unwrap();
        assert_eq!(view.name, "en_US.lang");
        assert_eq!(view.path, "texts/en_US.lang");
        assert_eq!(view.size, 53);
        assert_eq!(view.lines, 3);
        assert!(view.content.starts_with("npc.hello="));
    }

    #[test]
    fn test_read_rejects_other_files() {
        let tmp = world();
        assert!(matches!(
            read_resource_file(tmp.path(), "level.dat"),
            Err(Error::NotFound(_))
        ));
        assert!(matches!(
            read_resource_file(tmp.path(), "texts/missing.lang"),
            Err(Error::NotFound(_))
        ));
    }

    #[test]
    fn test_export_resource_file() {
        let tmp = world();
        let out = TempDir::new().unwrap();
        let dest = out.path().join("exports");

        let exported = export_resource_file(tmp.path(), "texts/en_US.lang", &dest).unwrap();
        assert_eq!(exported, dest.join("en_US.lang"));
        assert_eq!(
            fs::read(&exported).unwrap(),
            fs::read(tmp.path().join("texts/en_US.lang")).unwrap()
        );

        assert!(matches!(
            export_resource_file(tmp.path(), "../outside.lang", &dest),
            Err(Error::PathEscape(_))
        ));
        assert!(matches!(
            export_resource_file(tmp.path(), "level.dat", &dest),
            Err(Error::NotFound(_))
        ));
        assert!(!dest.join("level.dat").exists());
    }
}
