//! Storage of world archives and their unpacked copies.
//!
//! A store is two directories, each with a `metadata.json` index: the store
//! directory holds imported `.mcworld` / `.mctemplate` archives, the unpacked
//! directory holds one extracted folder per unpacked world.

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use chrono::Local;
use ignore::WalkBuilder;
use serde::{Deserialize, Serialize};
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use crate::error::Error;
use crate::report::round_to;

/// Archive extensions accepted by [`WorldStore::import`].
pub const WORLD_EXTENSIONS: &[&str] = &["mcworld", "mctemplate"];

const METADATA_FILE: &str = "metadata.json";
const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";
const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// An imported (or repacked) world archive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldRecord {
    pub id: u32,
    /// Name of the archive inside the store directory.
    pub filename: String,
    pub original_filename: String,
    #[serde(default)]
    pub uploaded_by: String,
    pub upload_date: String,
    pub file_size_mb: f64,
    pub file_type: String,
    #[serde(default)]
    pub unpacked: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unpacked_folder: Option<String>,
    /// Id of the unpacked world this archive was repacked from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repacked_from: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repacked_date: Option<String>,
}

/// An extracted copy of a world archive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnpackedRecord {
    pub id: u32,
    pub original_world_id: u32,
    pub folder_name: String,
    pub original_filename: String,
    #[serde(default)]
    pub unpacked_by: String,
    pub unpacked_date: String,
    pub folder_size_mb: f64,
    pub file_type: String,
}

trait Identified {
    fn id(&self) -> u32;
}

impl Identified for WorldRecord {
    fn id(&self) -> u32 {
        self.id
    }
}

impl Identified for UnpackedRecord {
    fn id(&self) -> u32 {
        self.id
    }
}

/// Ids are never reused, even after deletions.
fn next_id<T: Identified>(records: &[T]) -> u32 {
    records.iter().map(Identified::id).max().unwrap_or(0) + 1
}

/// File-backed world store.
#[derive(Debug, Clone)]
pub struct WorldStore {
    store_dir: PathBuf,
    unpacked_dir: PathBuf,
}

impl WorldStore {
    /// Opens a store, creating both directories and empty indexes as needed.
    pub fn open<P: AsRef<Path>, Q: AsRef<Path>>(
        store_dir: P,
        unpacked_dir: Q,
    ) -> Result<Self, Error> {
        let store = WorldStore {
            store_dir: store_dir.as_ref().to_path_buf(),
            unpacked_dir: unpacked_dir.as_ref().to_path_buf(),
        };
        for dir in [&store.store_dir, &store.unpacked_dir] {
            fs::create_dir_all(dir)?;
            let index = dir.join(METADATA_FILE);
            if !index.exists() {
                fs::write(&index, "[]")?;
            }
        }
        Ok(store)
    }

    pub fn store_dir(&self) -> &Path {
        &self.store_dir
    }

    pub fn unpacked_dir(&self) -> &Path {
        &self.unpacked_dir
    }

    /// All imported worlds, in import order.
    pub fn worlds(&self) -> Result<Vec<WorldRecord>, Error> {
        load_index(&self.store_dir.join(METADATA_FILE))
    }

    /// All unpacked worlds, most recently unpacked first.
    pub fn unpacked_worlds(&self) -> Result<Vec<UnpackedRecord>, Error> {
        let mut records: Vec<UnpackedRecord> = self.load_unpacked()?;
        records.sort_by(|a, b| b.unpacked_date.cmp(&a.unpacked_date));
        Ok(records)
    }

    pub fn world(&self, id: u32) -> Result<WorldRecord, Error> {
        self.worlds()?
            .into_iter()
            .find(|w| w.id == id)
            .ok_or_else(|| Error::not_found("World"))
    }

    pub fn unpacked(&self, id: u32) -> Result<UnpackedRecord, Error> {
        self.load_unpacked()?
            .into_iter()
            .find(|u| u.id == id)
            .ok_or_else(|| Error::not_found("Unpacked world"))
    }

    /// Folder holding the extracted files of an unpacked world.
    pub fn unpacked_root(&self, id: u32) -> Result<PathBuf, Error> {
        Ok(self.unpacked_dir.join(self.unpacked(id)?.folder_name))
    }

    /// Path of a world archive inside the store.
    pub fn world_path(&self, world: &WorldRecord) -> PathBuf {
        self.store_dir.join(&world.filename)
    }

    /// Copies a world archive into the store.
    pub fn import<P: AsRef<Path>>(&self, source: P, user: &str) -> Result<WorldRecord, Error> {
        let source = source.as_ref();
        let original_filename = source
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .ok_or_else(|| Error::InvalidWorld("No file selected".to_string()))?;
        let file_type = world_file_type(&original_filename).ok_or_else(|| {
            Error::InvalidWorld(
                "Invalid file type. Please upload .mcworld or .mctemplate files only.".to_string(),
            )
        })?;

        let filename = format!("{}_{}", timestamp(), secure_filename(&original_filename));
        let target = self.store_dir.join(&filename);
        fs::copy(source, &target)?;

        let mut worlds = self.worlds()?;
        let record = WorldRecord {
            id: next_id(&worlds),
            filename,
            original_filename,
            uploaded_by: user.to_string(),
            upload_date: Local::now().to_rfc3339(),
            file_size_mb: file_size_mb(&target)?,
            file_type,
            unpacked: false,
            unpacked_folder: None,
            repacked_from: None,
            repacked_date: None,
        };
        worlds.push(record.clone());
        self.save_worlds(&worlds)?;

        info!(id = record.id, file = %record.filename, "imported world");
        Ok(record)
    }

    /// Extracts a stored world into its own folder.
    ///
    /// Fails with [`Error::AlreadyUnpacked`] when an unpacked copy still
    /// exists on disk. A stale `unpacked` flag is reset instead.
    pub fn unpack(&self, world_id: u32, user: &str) -> Result<UnpackedRecord, Error> {
        let mut worlds = self.worlds()?;
        let index = worlds
            .iter()
            .position(|w| w.id == world_id)
            .ok_or_else(|| Error::not_found("World"))?;

        if worlds[index].unpacked {
            let exists = self.load_unpacked()?.iter().any(|u| {
                u.original_world_id == world_id && self.unpacked_dir.join(&u.folder_name).exists()
            });
            if exists {
                return Err(Error::AlreadyUnpacked);
            }
            debug!(id = world_id, "resetting stale unpacked flag");
            worlds[index].unpacked = false;
            self.save_worlds(&worlds)?;
        }

        let world = worlds[index].clone();
        let archive_path = self.world_path(&world);
        if !archive_path.is_file() {
            return Err(Error::not_found("World file"));
        }

        let folder_name = self.free_folder_name(&world.original_filename);
        let target = self.unpacked_dir.join(&folder_name);

        let mut archive = ZipArchive::new(File::open(&archive_path)?)
            .map_err(|_| Error::InvalidWorld("Invalid or corrupted world file".to_string()))?;
        if let Err(e) = archive.extract(&target) {
            warn!(folder = %folder_name, "unpack failed, removing partial folder: {}", e);
            if target.exists() {
                fs::remove_dir_all(&target)?;
            }
            return Err(e.into());
        }

        let mut unpacked = self.load_unpacked()?;
        let record = UnpackedRecord {
            id: next_id(&unpacked),
            original_world_id: world_id,
            folder_name: folder_name.clone(),
            original_filename: world.original_filename.clone(),
            unpacked_by: user.to_string(),
            unpacked_date: Local::now().to_rfc3339(),
            folder_size_mb: round_to(folder_size(&target) as f64 / BYTES_PER_MB, 2),
            file_type: world.file_type.clone(),
        };
        unpacked.push(record.clone());
        self.save_unpacked(&unpacked)?;

        worlds[index].unpacked = true;
        worlds[index].unpacked_folder = Some(folder_name);
        self.save_worlds(&worlds)?;

        info!(world = world_id, id = record.id, "unpacked world");
        Ok(record)
    }

    /// Zips an unpacked folder back into a new world named `<base>_v<N><ext>`.
    pub fn repack(&self, unpacked_id: u32, user: &str) -> Result<WorldRecord, Error> {
        let unpacked = self.unpacked(unpacked_id)?;
        let source = self.unpacked_dir.join(&unpacked.folder_name);
        if !source.is_dir() {
            return Err(Error::not_found("Unpacked world folder"));
        }

        let mut worlds = self.worlds()?;
        let filename = self.next_version_name(&unpacked.original_filename, &worlds);
        let target = self.store_dir.join(&filename);

        if let Err(e) = write_archive(&source, &target) {
            warn!(file = %filename, "repack failed, removing partial archive: {}", e);
            if target.exists() {
                fs::remove_file(&target)?;
            }
            return Err(e);
        }

        let now = Local::now().to_rfc3339();
        let record = WorldRecord {
            id: next_id(&worlds),
            filename: filename.clone(),
            original_filename: filename,
            uploaded_by: user.to_string(),
            upload_date: now.clone(),
            file_size_mb: file_size_mb(&target)?,
            file_type: unpacked.file_type.clone(),
            unpacked: false,
            unpacked_folder: None,
            repacked_from: Some(unpacked.id),
            repacked_date: Some(now),
        };
        worlds.push(record.clone());
        self.save_worlds(&worlds)?;

        info!(from = unpacked_id, id = record.id, file = %record.filename, "repacked world");
        Ok(record)
    }

    /// Removes a world archive and its index entry.
    pub fn delete(&self, world_id: u32) -> Result<WorldRecord, Error> {
        let mut worlds = self.worlds()?;
        let index = worlds
            .iter()
            .position(|w| w.id == world_id)
            .ok_or_else(|| Error::not_found("World"))?;

        let path = self.world_path(&worlds[index]);
        match fs::remove_file(&path) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }

        let record = worlds.remove(index);
        self.save_worlds(&worlds)?;
        info!(id = world_id, "deleted world");
        Ok(record)
    }

    /// Copies a stored archive into `dest_dir` under its original file name
    /// and returns the written path.
    pub fn export<P: AsRef<Path>>(&self, world_id: u32, dest_dir: P) -> Result<PathBuf, Error> {
        let world = self.world(world_id)?;
        let source = self.world_path(&world);
        if !source.is_file() {
            return Err(Error::not_found("World file"));
        }

        let dest_dir = dest_dir.as_ref();
        fs::create_dir_all(dest_dir)?;
        // Only the final component, in case the index was edited by hand.
        let name = Path::new(&world.original_filename)
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| world.filename.clone().into());
        let target = dest_dir.join(name);
        fs::copy(&source, &target)?;

        info!(id = world_id, path = %target.display(), "exported world");
        Ok(target)
    }

    /// Reconciles both indexes with the disk.
    ///
    /// Drops unpacked entries whose world or folder is gone, then clears
    /// `unpacked` flags with no surviving unpacked copy. Returns true when
    /// anything changed.
    pub fn clean_orphans(&self) -> Result<bool, Error> {
        let mut worlds = self.worlds()?;
        let unpacked = self.load_unpacked()?;

        let before = unpacked.len();
        let kept: Vec<UnpackedRecord> = unpacked
            .into_iter()
            .filter(|u| {
                worlds.iter().any(|w| w.id == u.original_world_id)
                    && self.unpacked_dir.join(&u.folder_name).exists()
            })
            .collect();
        let dropped = before - kept.len();
        if dropped > 0 {
            self.save_unpacked(&kept)?;
        }

        let mut reset = 0;
        for world in worlds.iter_mut().filter(|w| w.unpacked) {
            if !kept.iter().any(|u| u.original_world_id == world.id) {
                world.unpacked = false;
                reset += 1;
            }
        }
        if reset > 0 {
            self.save_worlds(&worlds)?;
        }

        if dropped > 0 || reset > 0 {
            info!(dropped, reset, "cleaned store metadata");
        }
        Ok(dropped > 0 || reset > 0)
    }

    fn load_unpacked(&self) -> Result<Vec<UnpackedRecord>, Error> {
        load_index(&self.unpacked_dir.join(METADATA_FILE))
    }

    fn save_worlds(&self, worlds: &[WorldRecord]) -> Result<(), Error> {
        save_index(&self.store_dir.join(METADATA_FILE), worlds)
    }

    fn save_unpacked(&self, records: &[UnpackedRecord]) -> Result<(), Error> {
        save_index(&self.unpacked_dir.join(METADATA_FILE), records)
    }

    fn free_folder_name(&self, original_filename: &str) -> String {
        let stem = Path::new(original_filename)
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        let base = format!("{}_{}", timestamp(), secure_filename(&stem));
        let mut name = base.clone();
        let mut n = 2;
        while self.unpacked_dir.join(&name).exists() {
            name = format!("{base}_{n}");
            n += 1;
        }
        name
    }

    fn next_version_name(&self, original_filename: &str, worlds: &[WorldRecord]) -> String {
        let path = Path::new(original_filename);
        let base = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        let ext = path
            .extension()
            .map(|e| format!(".{}", e.to_string_lossy()))
            .unwrap_or_default();

        (1..)
            .map(|version| format!("{base}_v{version}{ext}"))
            .find(|name| {
                !worlds.iter().any(|w| &w.original_filename == name)
                    && !self.store_dir.join(name).exists()
            })
            .unwrap_or_default()
    }
}

fn load_index<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, Error> {
    match fs::read_to_string(path) {
        Ok(content) if content.trim().is_empty() => Ok(Vec::new()),
        Ok(content) => Ok(serde_json::from_str(&content)?),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Vec::new()),
        Err(e) => Err(e.into()),
    }
}

fn save_index<T: Serialize>(path: &Path, records: &[T]) -> Result<(), Error> {
    fs::write(path, serde_json::to_string_pretty(records)?)?;
    Ok(())
}

fn write_archive(source: &Path, target: &Path) -> Result<(), Error> {
    let mut writer = ZipWriter::new(File::create(target)?);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    let walker = WalkBuilder::new(source)
        .standard_filters(false)
        .follow_links(false)
        .sort_by_file_name(|a, b| a.cmp(b))
        .build();
    for dent in walker {
        let dent = dent.map_err(|e| io::Error::other(e.to_string()))?;
        if !dent.file_type().is_some_and(|t| t.is_file()) {
            continue;
        }
        let Ok(relative) = dent.path().strip_prefix(source) else {
            continue;
        };
        let name = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        writer.start_file(name, options)?;
        io::copy(&mut File::open(dent.path())?, &mut writer)?;
    }
    writer.finish()?;
    Ok(())
}

/// Lower-cased archive extension when it is an accepted world type.
pub fn world_file_type(filename: &str) -> Option<String> {
    let ext = Path::new(filename).extension()?.to_str()?.to_lowercase();
    WORLD_EXTENSIONS.contains(&ext.as_str()).then_some(ext)
}

/// Reduces a file name to a safe ASCII form: no separators, spaces become
/// underscores, only `[A-Za-z0-9_.-]` survive, no leading dots.
pub fn secure_filename(filename: &str) -> String {
    let spaced: String = filename
        .chars()
        .filter(char::is_ascii)
        .map(|c| if c == '/' || c == '\\' { ' ' } else { c })
        .collect();
    let joined = spaced.split_whitespace().collect::<Vec<_>>().join("_");
    let safe: String = joined
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
        .collect();
    let safe = safe.trim_matches(|c| c == '.' || c == '_');
    if safe.is_empty() {
        "world".to_string()
    } else {
        safe.to_string()
    }
}

fn timestamp() -> String {
    Local::now().format(TIMESTAMP_FORMAT).to_string()
}

fn file_size_mb(path: &Path) -> Result<f64, Error> {
    Ok(round_to(fs::metadata(path)?.len() as f64 / BYTES_PER_MB, 2))
}

fn folder_size(path: &Path) -> u64 {
    WalkBuilder::new(path)
        .standard_filters(false)
        .build()
        .filter_map(Result::ok)
        .filter(|d| d.file_type().is_some_and(|t| t.is_file()))
        .filter_map(|d| d.metadata().ok())
        .map(|m| m.len())
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secure_filename() {
        assert_eq!(secure_filename("My World.mcworld"), "My_World.mcworld");
        assert_eq!(secure_filename("../../etc/passwd"), "etc_passwd");
        assert_eq!(secure_filename("Café Lesson!.mctemplate"), "Caf_Lesson.mctemplate");
        assert_eq!(secure_filename("..."), "world");
    }

    #[test]
    fn test_world_file_type() {
        assert_eq!(world_file_type("a.MCWORLD"), Some("mcworld".to_string()));
        assert_eq!(world_file_type("a.mctemplate"), Some("mctemplate".to_string()));
        assert_eq!(world_file_type("a.zip"), None);
        assert_eq!(world_file_type("mcworld"), None);
    }

    #[test]
    fn test_next_id_skips_gaps() {
        let record = |id| UnpackedRecord {
            id,
            original_world_id: 1,
            folder_name: String::new(),
            original_filename: String::new(),
            unpacked_by: String::new(),
            unpacked_date: String::new(),
            folder_size_mb: 0.0,
            file_type: "mcworld".into(),
        };
        assert_eq!(next_id::<UnpackedRecord>(&[]), 1);
        assert_eq!(next_id(&[record(1), record(4)]), 5);
    }
}
