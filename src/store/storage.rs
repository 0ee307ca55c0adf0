//! Storage backends
//!
//! A backend stores the text of each collection as a whole. The bank always
//! hands over complete contents, so backends never deal with partial writes.

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::codec::Collection;

use super::StorageError;

/// Durable home for the four collections
pub trait Storage {
    /// Full text of a collection, `None` if it was never written
    fn read(&self, collection: Collection) -> Result<Option<String>, StorageError>;

    /// Replace a collection with `contents`
    fn write(&mut self, collection: Collection, contents: &str) -> Result<(), StorageError>;
}

// =========================================================================
// FileStorage
// =========================================================================

/// One `.txt` file per collection inside a data directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Use `dir` as the data directory, creating it if needed.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| StorageError::io(&dir, e))?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn file_name(collection: Collection) -> &'static str {
        match collection {
            Collection::Customers => "customers.txt",
            Collection::SavingAccounts => "saving_accounts.txt",
            Collection::CurrentAccounts => "current_accounts.txt",
            Collection::Transactions => "transactions.txt",
        }
    }

    pub fn path(&self, collection: Collection) -> PathBuf {
        self.dir.join(Self::file_name(collection))
    }

    fn write_file(path: &Path, contents: &str) -> io::Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        writer.write_all(contents.as_bytes())?;
        writer.flush()?;
        writer.get_ref().sync_all()
    }
}

impl Storage for FileStorage {
    fn read(&self, collection: Collection) -> Result<Option<String>, StorageError> {
        let path = self.path(collection);
        match fs::read_to_string(&path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::io(path, e)),
        }
    }

    fn write(&mut self, collection: Collection, contents: &str) -> Result<(), StorageError> {
        let path = self.path(collection);
        let tmp = path.with_extension("txt.tmp");

        Self::write_file(&tmp, contents).map_err(|e| StorageError::io(&tmp, e))?;
        fs::rename(&tmp, &path).map_err(|e| StorageError::io(&path, e))?;

        tracing::debug!("Wrote {} ({} bytes)", path.display(), contents.len());
        Ok(())
    }
}

// =========================================================================
// MemoryStorage
// =========================================================================

/// Keeps collections in memory. Nothing survives the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    collections: HashMap<Collection, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a collection, e.g. with legacy lines
    pub fn with(mut self, collection: Collection, contents: impl Into<String>) -> Self {
        self.collections.insert(collection, contents.into());
        self
    }

    pub fn get(&self, collection: Collection) -> Option<&str> {
        self.collections.get(&collection).map(String::as_str)
    }
}

impl Storage for MemoryStorage {
    fn read(&self, collection: Collection) -> Result<Option<String>, StorageError> {
        Ok(self.collections.get(&collection).cloned())
    }

    fn write(&mut self, collection: Collection, contents: &str) -> Result<(), StorageError> {
        self.collections.insert(collection, contents.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_storage_absent_collection_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path()).unwrap();

        for collection in Collection::ALL {
            assert_eq!(storage.read(collection).unwrap(), None);
        }
    }

    #[test]
    fn test_file_storage_write_replaces_contents() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = FileStorage::new(dir.path().join("nested")).unwrap();

        storage.write(Collection::Customers, "one\ntwo\n").unwrap();
        storage.write(Collection::Customers, "three\n").unwrap();

        assert_eq!(
            storage.read(Collection::Customers).unwrap().as_deref(),
            Some("three\n")
        );
        assert!(storage.path(Collection::Customers).ends_with("customers.txt"));
        assert!(!storage.path(Collection::Customers).with_extension("txt.tmp").exists());
    }

    #[test]
    fn test_memory_storage() {
        let mut storage = MemoryStorage::new().with(Collection::Transactions, "x\n");

        storage.write(Collection::Customers, "c\n").unwrap();

        assert_eq!(storage.get(Collection::Customers), Some("c\n"));
        assert_eq!(storage.read(Collection::Transactions).unwrap().as_deref(), Some("x\n"));
        assert_eq!(storage.read(Collection::SavingAccounts).unwrap(), None);
    }
}
