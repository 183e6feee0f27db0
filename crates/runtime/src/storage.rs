// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Byte sources the loader reads model files from.
//!
//! [`ModelStorage`] is the narrow interface of a filesystem driver: an
//! existence check, a length, and a whole-file read into a caller-owned
//! buffer. [`FsStorage`] serves it from the host filesystem through a
//! memory map; [`MemoryStorage`] serves it from an in-process map.

use crate::LoadError;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// A read-only store of named byte blobs.
pub trait ModelStorage {
    /// Returns `true` if `path` names a readable file.
    fn exists(&self, path: &str) -> bool;

    /// Length of the file in bytes. Files beyond `u32::MAX` report
    /// `u32::MAX`.
    fn size(&self, path: &str) -> u32;

    /// Fills `dest` with the file's contents. `dest.len()` must equal
    /// [`size`](Self::size).
    fn read(&self, path: &str, dest: &mut [u8]) -> Result<(), LoadError>;
}

impl<S: ModelStorage + ?Sized> ModelStorage for Box<S> {
    fn exists(&self, path: &str) -> bool {
        (**self).exists(path)
    }

    fn size(&self, path: &str) -> u32 {
        (**self).size(path)
    }

    fn read(&self, path: &str, dest: &mut [u8]) -> Result<(), LoadError> {
        (**self).read(path, dest)
    }
}

fn read_failed(path: &str, detail: impl std::fmt::Display) -> LoadError {
    LoadError::ReadFailed {
        path: path.to_string(),
        detail: detail.to_string(),
    }
}

// ── FsStorage ──────────────────────────────────────────────────────

/// Host filesystem storage, optionally rooted at a directory.
///
/// Reads go through `memmap2` so the file is copied once, straight into
/// the pool-owned destination buffer.
#[derive(Debug, Clone, Default)]
pub struct FsStorage {
    root: Option<PathBuf>,
}

impl FsStorage {
    /// Resolves paths as given (relative to the working directory).
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves relative paths against `root`.
    pub fn rooted(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
        }
    }

    fn resolve(&self, path: &str) -> PathBuf {
        match &self.root {
            Some(root) => root.join(path),
            None => PathBuf::from(path),
        }
    }
}

impl ModelStorage for FsStorage {
    fn exists(&self, path: &str) -> bool {
        self.resolve(path).is_file()
    }

    fn size(&self, path: &str) -> u32 {
        std::fs::metadata(self.resolve(path))
            .map(|m| u32::try_from(m.len()).unwrap_or(u32::MAX))
            .unwrap_or(0)
    }

    fn read(&self, path: &str, dest: &mut [u8]) -> Result<(), LoadError> {
        let full = self.resolve(path);
        let file = std::fs::File::open(&full)
            .map_err(|e| read_failed(path, format!("cannot open '{}': {e}", full.display())))?;

        // SAFETY: the map is read-only and dropped before returning. A
        // concurrent truncation is caught by the length check below or
        // surfaces as a copy of stale bytes, never as aliasing.
        let mmap = unsafe { memmap2::Mmap::map(&file) }
            .map_err(|e| read_failed(path, format!("mmap failed: {e}")))?;

        if mmap.len() != dest.len() {
            return Err(read_failed(
                path,
                format!("expected {} bytes, file has {}", dest.len(), mmap.len()),
            ));
        }
        dest.copy_from_slice(&mmap);
        tracing::debug!("storage: read {} bytes from {}", dest.len(), full.display());
        Ok(())
    }
}

// ── MemoryStorage ──────────────────────────────────────────────────

/// In-memory storage keyed by path.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    files: HashMap<String, Vec<u8>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a file.
    pub fn insert(&mut self, path: impl Into<String>, bytes: impl Into<Vec<u8>>) {
        self.files.insert(path.into(), bytes.into());
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with_file(mut self, path: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        self.insert(path, bytes);
        self
    }

    pub fn remove(&mut self, path: &str) -> Option<Vec<u8>> {
        self.files.remove(path)
    }

    /// Loads every regular file in `dir` (non-recursive), keyed by file name.
    pub fn from_dir(dir: &Path) -> std::io::Result<Self> {
        let mut storage = Self::new();
        for entry in std::fs::read_dir(dir)? {
            let entry = entry?;
            if entry.file_type()?.is_file() {
                let name = entry.file_name().to_string_lossy().into_owned();
                storage.insert(name, std::fs::read(entry.path())?);
            }
        }
        Ok(storage)
    }
}

impl ModelStorage for MemoryStorage {
    fn exists(&self, path: &str) -> bool {
        self.files.contains_key(path)
    }

    fn size(&self, path: &str) -> u32 {
        self.files
            .get(path)
            .map_or(0, |b| u32::try_from(b.len()).unwrap_or(u32::MAX))
    }

    fn read(&self, path: &str, dest: &mut [u8]) -> Result<(), LoadError> {
        let bytes = self
            .files
            .get(path)
            .ok_or_else(|| read_failed(path, "no such file"))?;
        if bytes.len() != dest.len() {
            return Err(read_failed(
                path,
                format!("expected {} bytes, file has {}", dest.len(), bytes.len()),
            ));
        }
        dest.copy_from_slice(bytes);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir() -> PathBuf {
        let dir = std::env::temp_dir().join("ctx_infer_storage_test");
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_memory_storage() {
        let storage = MemoryStorage::new().with_file("a.bin", vec![1u8, 2, 3]);
        assert!(storage.exists("a.bin"));
        assert!(!storage.exists("b.bin"));
        assert_eq!(storage.size("a.bin"), 3);
        assert_eq!(storage.size("b.bin"), 0);

        let mut buf = [0u8; 3];
        storage.read("a.bin", &mut buf).unwrap();
        assert_eq!(buf, [1, 2, 3]);
    }

    #[test]
    fn test_memory_storage_length_mismatch() {
        let storage = MemoryStorage::new().with_file("a.bin", vec![1u8, 2, 3]);
        let mut buf = [0u8; 2];
        assert!(matches!(
            storage.read("a.bin", &mut buf),
            Err(LoadError::ReadFailed { .. })
        ));
    }

    #[test]
    fn test_fs_storage_roundtrip() {
        let dir = temp_dir();
        std::fs::write(dir.join("fs_read.bin"), b"TFL3data").unwrap();

        let storage = FsStorage::rooted(&dir);
        assert!(storage.exists("fs_read.bin"));
        assert_eq!(storage.size("fs_read.bin"), 8);

        let mut buf = [0u8; 8];
        storage.read("fs_read.bin", &mut buf).unwrap();
        assert_eq!(&buf, b"TFL3data");
        let _ = std::fs::remove_file(dir.join("fs_read.bin"));
    }

    #[test]
    fn test_fs_storage_missing() {
        let storage = FsStorage::rooted(temp_dir());
        assert!(!storage.exists("does_not_exist.bin"));
        assert_eq!(storage.size("does_not_exist.bin"), 0);
        let mut buf = [0u8; 1];
        assert!(matches!(
            storage.read("does_not_exist.bin", &mut buf),
            Err(LoadError::ReadFailed { .. })
        ));
    }

    #[test]
    fn test_directory_is_not_a_file() {
        let dir = temp_dir();
        std::fs::create_dir_all(dir.join("subdir")).unwrap();
        assert!(!FsStorage::rooted(&dir).exists("subdir"));
    }

    #[test]
    fn test_from_dir() {
        let dir = temp_dir().join("from_dir");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("m.bin"), [9u8; 4]).unwrap();

        let storage = MemoryStorage::from_dir(&dir).unwrap();
        assert_eq!(storage.size("m.bin"), 4);
        let _ = std::fs::remove_dir_all(&dir);
    }
}
