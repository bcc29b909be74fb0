//! Key-value document backends for the user store.
//!
//! A backend only supports a point-get and a full overwrite of one key,
//! the same contract as the hosted document database the app was written
//! against.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{Error, Result};

/// Trait for reading and overwriting values in a document store.
pub trait UserBackend {
    /// Read the value stored at `key`, `None` when the key is absent.
    fn get(&self, key: &str) -> Result<Option<Value>>;

    /// Replace the value stored at `key`.
    fn set(&mut self, key: &str, value: Value) -> Result<()>;
}

/// In-process backend. Clones share the same underlying map.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    values: Arc<Mutex<HashMap<String, Value>>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a backend pre-populated with one key.
    pub fn with_value(key: &str, value: Value) -> Self {
        let backend = Self::new();
        if let Ok(mut values) = backend.values.lock() {
            values.insert(key.to_string(), value);
        }
        backend
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, Value>>> {
        self.values
            .lock()
            .map_err(|_| Error::Backend("memory backend lock poisoned".to_string()))
    }
}

impl UserBackend for MemoryBackend {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: Value) -> Result<()> {
        self.lock()?.insert(key.to_string(), value);
        Ok(())
    }
}

/// Backend storing every key in a single JSON object on disk.
#[derive(Debug, Clone)]
pub struct FileBackend {
    path: PathBuf,
}

impl FileBackend {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_document(&self) -> Result<Map<String, Value>> {
        if !self.path.exists() {
            return Ok(Map::new());
        }
        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(Map::new());
        }
        match serde_json::from_str(&content)? {
            Value::Object(document) => Ok(document),
            _ => Err(Error::Backend(format!(
                "{} is not a JSON object",
                self.path.display()
            ))),
        }
    }
}

impl UserBackend for FileBackend {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.read_document()?.remove(key))
    }

    fn set(&mut self, key: &str, value: Value) -> Result<()> {
        let mut document = self.read_document()?;
        document.insert(key.to_string(), value);

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        fs::write(
            &self.path,
            serde_json::to_string_pretty(&Value::Object(document))?,
        )?;
        debug!("Wrote {} to {}", key, self.path.display());
        Ok(())
    }
}
