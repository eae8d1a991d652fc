//! In-memory file system implementation

use crate::error::{VfsError, VfsResult};
use crate::VirtualFileSystem;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use std::sync::{Arc, RwLock};

#[derive(Debug, Default)]
struct Entries {
    files: BTreeMap<String, Vec<u8>>,
    /// Directories created explicitly (possibly empty)
    dirs: BTreeSet<String>,
}

impl Entries {
    fn has_dir(&self, normalized: &str) -> bool {
        if self.dirs.contains(normalized) {
            return true;
        }
        let prefix = if normalized.ends_with('/') {
            normalized.to_string()
        } else {
            format!("{}/", normalized)
        };
        self.files
            .range(prefix.clone()..)
            .next()
            .is_some_and(|(k, _)| k.starts_with(&prefix))
            || self
                .dirs
                .range(prefix.clone()..)
                .next()
                .is_some_and(|k| k.starts_with(&prefix))
    }
}

/// An in-memory file system implementation.
///
/// Files live in a `BTreeMap` keyed by their normalized path. Directories are
/// implied by the files below them, or created with [`MemoryFileSystem::create_dir_all`].
///
/// # Example
/// ```
/// use tsmodule_vfs::{MemoryFileSystem, VirtualFileSystem};
/// use std::path::Path;
///
/// let fs = MemoryFileSystem::new();
/// fs.write_file(Path::new("/src/util.ts"), b"export const a = 1;").unwrap();
/// assert!(fs.is_file(Path::new("/src/util.ts")));
/// assert!(fs.is_dir(Path::new("/src")));
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryFileSystem {
    entries: Arc<RwLock<Entries>>,
}

impl MemoryFileSystem {
    /// Create a new empty memory file system.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new memory file system pre-populated with files.
    ///
    /// # Arguments
    /// * `files` - Iterator of (path, content) tuples
    pub fn with_files<I, S, C>(files: I) -> Self
    where
        I: IntoIterator<Item = (S, C)>,
        S: AsRef<str>,
        C: Into<Vec<u8>>,
    {
        let fs = Self::new();
        if let Ok(mut entries) = fs.entries.write() {
            for (path, content) in files {
                let key = normalize(Path::new(path.as_ref()));
                entries.files.insert(key, content.into());
            }
        }
        fs
    }

    /// Register a directory (and its parents) without any files in it.
    pub fn create_dir_all(&self, path: &Path) -> VfsResult<()> {
        let normalized = normalize(path);
        let mut entries = self.entries.write().map_err(|_| poisoned())?;
        entries.dirs.insert(normalized);
        Ok(())
    }

    /// Remove a file; missing files are reported as `NotFound`.
    pub fn remove_file(&self, path: &Path) -> VfsResult<()> {
        let normalized = normalize(path);
        let mut entries = self.entries.write().map_err(|_| poisoned())?;
        entries
            .files
            .remove(&normalized)
            .map(|_| ())
            .ok_or(VfsError::NotFound { path: normalized })
    }

    /// Number of stored files
    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.files.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Normalize a path for internal storage: forward slashes, no trailing slash.
fn normalize(path: &Path) -> String {
    let mut normalized = path.to_string_lossy().replace('\\', "/");
    while normalized.len() > 1 && normalized.ends_with('/') {
        normalized.pop();
    }
    normalized
}

fn poisoned() -> VfsError {
    VfsError::Io {
        message: String::from("Lock poisoned"),
    }
}

impl VirtualFileSystem for MemoryFileSystem {
    fn read_file(&self, path: &Path) -> VfsResult<Vec<u8>> {
        let normalized = normalize(path);
        let entries = self.entries.read().map_err(|_| poisoned())?;

        match entries.files.get(&normalized) {
            Some(content) => Ok(content.clone()),
            None if entries.has_dir(&normalized) => Err(VfsError::IsDirectory { path: normalized }),
            None => Err(VfsError::NotFound { path: normalized }),
        }
    }

    fn write_file(&self, path: &Path, content: &[u8]) -> VfsResult<()> {
        let normalized = normalize(path);
        let mut entries = self.entries.write().map_err(|_| poisoned())?;
        if entries.has_dir(&normalized) {
            return Err(VfsError::IsDirectory { path: normalized });
        }
        entries.files.insert(normalized, content.to_vec());
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.is_file(path) || self.is_dir(path)
    }

    fn is_file(&self, path: &Path) -> bool {
        let normalized = normalize(path);
        match self.entries.read() {
            Ok(entries) => entries.files.contains_key(&normalized),
            Err(_) => false,
        }
    }

    fn is_dir(&self, path: &Path) -> bool {
        let normalized = normalize(path);
        match self.entries.read() {
            Ok(entries) => entries.has_dir(&normalized),
            Err(_) => false,
        }
    }
}
