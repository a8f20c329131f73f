// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Credential storage channels.
//!
//! A channel is one place the credential lives: the durable slot that client
//! code rehydrates from, or a mirror (the cookie the edge layer reads). Each
//! channel holds a single named key.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use serde_json::{Map, Value as JsonValue};
use tempfile::NamedTempFile;

use crate::error::StorageError;

/// Default key under which the credential is stored.
pub const DEFAULT_STORAGE_KEY: &str = "token";

// =============================================================================
// CredentialChannel
// =============================================================================

/// A single slot holding the bearer credential.
pub trait CredentialChannel: Send + Sync {
    /// Channel name for logs and errors.
    fn name(&self) -> &str;

    /// Reads the credential, if one is stored.
    fn load(&self) -> Result<Option<String>, StorageError>;

    /// Writes the credential, replacing any previous value.
    fn store(&self, credential: &str) -> Result<(), StorageError>;

    /// Removes the credential. Removing an absent credential succeeds.
    fn clear(&self) -> Result<(), StorageError>;
}

// =============================================================================
// MemoryChannel
// =============================================================================

/// In-process channel. Lives as long as the process.
#[derive(Debug)]
pub struct MemoryChannel {
    name: String,
    slot: Mutex<Option<String>>,
}

impl MemoryChannel {
    /// Creates an empty channel.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            slot: Mutex::new(None),
        }
    }

    /// Creates a channel that already holds a credential.
    pub fn with_credential(name: impl Into<String>, credential: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            slot: Mutex::new(Some(credential.into())),
        }
    }

    /// Returns the stored value without going through the trait.
    pub fn peek(&self) -> Option<String> {
        self.slot.lock().clone()
    }
}

impl Default for MemoryChannel {
    fn default() -> Self {
        Self::new("memory")
    }
}

impl CredentialChannel for MemoryChannel {
    fn name(&self) -> &str {
        &self.name
    }

    fn load(&self) -> Result<Option<String>, StorageError> {
        Ok(self.slot.lock().clone())
    }

    fn store(&self, credential: &str) -> Result<(), StorageError> {
        *self.slot.lock() = Some(credential.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        *self.slot.lock() = None;
        Ok(())
    }
}

// =============================================================================
// FileChannel
// =============================================================================

/// Durable channel backed by a small JSON document on disk.
///
/// The document is an object of string keys; this channel owns one of them
/// and leaves the others untouched. Writes go to a sibling temporary file
/// that is renamed over the original.
#[derive(Debug, Clone)]
pub struct FileChannel {
    name: String,
    path: PathBuf,
    key: String,
}

impl FileChannel {
    /// Creates a channel storing under [`DEFAULT_STORAGE_KEY`].
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_key(path, DEFAULT_STORAGE_KEY)
    }

    /// Creates a channel storing under a custom key.
    pub fn with_key(path: impl Into<PathBuf>, key: impl Into<String>) -> Self {
        let path = path.into();
        Self {
            name: format!("file:{}", path.display()),
            path,
            key: key.into(),
        }
    }

    /// Returns the document path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_document(&self) -> Result<Map<String, JsonValue>, StorageError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => return Err(StorageError::io(&self.path, e)),
        };

        if content.trim().is_empty() {
            return Ok(Map::new());
        }

        match serde_json::from_str::<JsonValue>(&content) {
            Ok(JsonValue::Object(map)) => Ok(map),
            Ok(_) => Err(StorageError::corrupt(&self.path, "expected a JSON object")),
            Err(e) => Err(StorageError::corrupt(&self.path, e.to_string())),
        }
    }

    fn write_document(&self, document: &Map<String, JsonValue>) -> Result<(), StorageError> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir).map_err(|e| StorageError::io(dir, e))?;

        let content = serde_json::to_string_pretty(document)
            .map_err(|e| StorageError::corrupt(&self.path, e.to_string()))?;

        // A uniquely named sibling is removed on drop if anything below fails.
        let mut file = NamedTempFile::new_in(dir).map_err(|e| StorageError::io(dir, e))?;
        file.write_all(content.as_bytes())
            .and_then(|_| file.as_file().sync_all())
            .map_err(|e| StorageError::io(file.path(), e))?;

        file.persist(&self.path)
            .map(|_| ())
            .map_err(|e| StorageError::io(&self.path, e.error))
    }
}

impl CredentialChannel for FileChannel {
    fn name(&self) -> &str {
        &self.name
    }

    fn load(&self) -> Result<Option<String>, StorageError> {
        let document = self.read_document()?;
        Ok(document
            .get(&self.key)
            .and_then(JsonValue::as_str)
            .map(str::to_owned))
    }

    fn store(&self, credential: &str) -> Result<(), StorageError> {
        let mut document = self.read_document()?;
        document.insert(self.key.clone(), JsonValue::String(credential.to_string()));
        self.write_document(&document)
    }

    fn clear(&self) -> Result<(), StorageError> {
        let mut document = self.read_document()?;
        if document.remove(&self.key).is_none() {
            return Ok(());
        }

        if document.is_empty() {
            match fs::remove_file(&self.path) {
                Ok(()) => Ok(()),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
                Err(e) => Err(StorageError::io(&self.path, e)),
            }
        } else {
            self.write_document(&document)
        }
    }
}

// =============================================================================
// UnavailableChannel
// =============================================================================

/// Channel for contexts without client storage, such as server rendering.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnavailableChannel;

impl CredentialChannel for UnavailableChannel {
    fn name(&self) -> &str {
        "unavailable"
    }

    fn load(&self) -> Result<Option<String>, StorageError> {
        Err(StorageError::Unavailable)
    }

    fn store(&self, _credential: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable)
    }

    fn clear(&self) -> Result<(), StorageError> {
        Err(StorageError::Unavailable)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_channel() {
        let channel = MemoryChannel::default();
        assert_eq!(channel.load().unwrap(), None);

        channel.store("abc").unwrap();
        assert_eq!(channel.load().unwrap().as_deref(), Some("abc"));

        channel.clear().unwrap();
        channel.clear().unwrap();
        assert_eq!(channel.peek(), None);
    }

    #[test]
    fn test_file_channel_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("storage.json");

        FileChannel::new(&path).store("a.b.c").unwrap();

        let reopened = FileChannel::new(&path);
        assert_eq!(reopened.load().unwrap().as_deref(), Some("a.b.c"));

        reopened.clear().unwrap();
        assert!(!path.exists());
        assert_eq!(reopened.load().unwrap(), None);
    }

    #[test]
    fn test_file_channel_keeps_other_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        fs::write(&path, r#"{"theme":"dark"}"#).unwrap();

        let channel = FileChannel::new(&path);
        channel.store("x.y.z").unwrap();
        channel.clear().unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("theme"));
        assert!(!content.contains("x.y.z"));
    }

    #[test]
    fn test_file_channel_leaves_no_temp_files() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileChannel::new(dir.path().join("session.json"));
        let mirror = FileChannel::with_key(dir.path().join("session.cookie"), "token");

        storage.store("a.b.c").unwrap();
        mirror.store("a.b.c").unwrap();
        storage.store("d.e.f").unwrap();

        let mut names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().into_string().unwrap())
            .collect();
        names.sort();
        assert_eq!(names, vec!["session.cookie", "session.json"]);
        assert_eq!(mirror.load().unwrap().as_deref(), Some("a.b.c"));
    }

    #[test]
    fn test_file_channel_concurrent_writers_never_tear() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        let credentials: Vec<String> = (0..4)
            .map(|i| format!("{}.{}.{}", "h".repeat(64), i.to_string().repeat(512), "s"))
            .collect();

        let writers: Vec<_> = credentials
            .iter()
            .cloned()
            .map(|credential| {
                let channel = FileChannel::new(&path);
                std::thread::spawn(move || {
                    for _ in 0..25 {
                        channel.store(&credential).unwrap();
                    }
                })
            })
            .collect();
        for writer in writers {
            writer.join().unwrap();
        }

        let stored = FileChannel::new(&path).load().unwrap().unwrap();
        assert!(credentials.contains(&stored));
    }

    #[test]
    fn test_file_channel_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let channel = FileChannel::new(dir.path().join("absent.json"));
        assert_eq!(channel.load().unwrap(), None);
        channel.clear().unwrap();
    }

    #[test]
    fn test_file_channel_corrupt_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        fs::write(&path, "[1, 2").unwrap();

        let err = FileChannel::new(&path).load().unwrap_err();
        assert!(matches!(err, StorageError::Corrupt { .. }));
    }

    #[test]
    fn test_unavailable_channel() {
        let channel = UnavailableChannel;
        assert!(channel.load().unwrap_err().is_unavailable());
        assert!(channel.store("t").unwrap_err().is_unavailable());
        assert!(channel.clear().unwrap_err().is_unavailable());
    }
}
