//! Settings Storage
//!
//! Key/value stores the resolver reads from and heals. Two implementations:
//! - [`MemoryStore`] for embedders that persist settings themselves
//! - [`SettingsFile`] for the host's JSON settings file
//!
//! The host file is a flat JSON object. Older plugin builds wrote some values
//! as JSON numbers (`"warningThreshold": 0.8`), so scalar values are read back
//! as their string form.

use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::SETTINGS_NAME;

/// Errors from loading or saving a settings store
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Malformed settings file: {0}")]
    Malformed(String),
}

/// Persistent string-to-string mapping provided by the host.
pub trait SettingsStore {
    /// Check if a key exists
    fn contains(&self, key: &str) -> bool;

    /// Get the stored value for a key
    fn get(&self, key: &str) -> Option<String>;

    /// Insert a value, replacing any existing one
    fn add(&mut self, key: &str, value: &str);

    /// Remove a key, returning its value
    fn remove(&mut self, key: &str) -> Option<String>;

    /// Persist the current contents
    fn save(&mut self) -> Result<(), StoreError>;
}

/// Ordered key/value entries with fast lookup.
#[derive(Debug, Clone, Default)]
struct Entries {
    /// Key-value pairs in insertion order
    ordered: Vec<(String, String)>,
    /// Fast lookup by key
    map: HashMap<String, String>,
}

impl Entries {
    fn get(&self, key: &str) -> Option<&String> {
        self.map.get(key)
    }

    fn set(&mut self, key: &str, value: &str) {
        if self.map.contains_key(key) {
            for (k, v) in &mut self.ordered {
                if k == key {
                    *v = value.to_string();
                    break;
                }
            }
        } else {
            self.ordered.push((key.to_string(), value.to_string()));
        }
        self.map.insert(key.to_string(), value.to_string());
    }

    fn remove(&mut self, key: &str) -> Option<String> {
        self.ordered.retain(|(k, _)| k != key);
        self.map.remove(key)
    }

    fn contains(&self, key: &str) -> bool {
        self.map.contains_key(key)
    }

    fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.ordered.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    fn len(&self) -> usize {
        self.ordered.len()
    }
}

/// In-memory settings store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Entries,
    saves: usize,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with entries, in order
    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut store = Self::new();
        for (key, value) in pairs {
            store.entries.set(key, value);
        }
        store
    }

    /// All entries in order
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter()
    }

    /// Number of times [`SettingsStore::save`] was called
    pub fn save_count(&self) -> usize {
        self.saves
    }

    /// Get number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.entries.len() == 0
    }
}

impl SettingsStore for MemoryStore {
    fn contains(&self, key: &str) -> bool {
        self.entries.contains(key)
    }

    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn add(&mut self, key: &str, value: &str) {
        self.entries.set(key, value);
    }

    fn remove(&mut self, key: &str) -> Option<String> {
        self.entries.remove(key)
    }

    fn save(&mut self) -> Result<(), StoreError> {
        self.saves += 1;
        Ok(())
    }
}

/// Settings store backed by the host's JSON settings file.
#[derive(Debug, Clone)]
pub struct SettingsFile {
    path: PathBuf,
    entries: Entries,
}

impl SettingsFile {
    /// Default location: `<config dir>/heat/Heat.plugin.json`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("heat").join(format!("{SETTINGS_NAME}.json")))
    }

    /// Load settings from a file. A missing file loads as empty and is
    /// created on the first save.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let entries = match fs::read_to_string(&path) {
            Ok(content) => parse_entries(&content)?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!("Settings file {} not found, starting empty", path.display());
                Entries::default()
            }
            Err(e) => return Err(StoreError::Io(e)),
        };

        Ok(Self { path, entries })
    }

    /// Path this store saves to
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All entries in order
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter()
    }

    /// Render the file contents
    pub fn to_json(&self) -> Result<String, StoreError> {
        let mut map = Map::new();
        for (key, value) in self.entries.iter() {
            map.insert(key.to_string(), Value::String(value.to_string()));
        }
        Ok(serde_json::to_string_pretty(&Value::Object(map))?)
    }
}

impl SettingsStore for SettingsFile {
    fn contains(&self, key: &str) -> bool {
        self.entries.contains(key)
    }

    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn add(&mut self, key: &str, value: &str) {
        self.entries.set(key, value);
    }

    fn remove(&mut self, key: &str) -> Option<String> {
        self.entries.remove(key)
    }

    fn save(&mut self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, self.to_json()?)?;
        tracing::debug!("Saved {} settings to {}", self.entries.len(), self.path.display());
        Ok(())
    }
}

/// Parse the JSON object into ordered string entries
fn parse_entries(content: &str) -> Result<Entries, StoreError> {
    let mut entries = Entries::default();
    if content.trim().is_empty() {
        return Ok(entries);
    }

    match serde_json::from_str::<Value>(content)? {
        Value::Object(map) => {
            for (key, value) in map {
                entries.set(&key, &value_to_string(value));
            }
            Ok(entries)
        }
        other => Err(StoreError::Malformed(format!(
            "expected a JSON object, found {}",
            json_kind(&other)
        ))),
    }
}

/// Scalars keep their textual form; anything else is kept as raw JSON so the
/// resolver rejects and heals it.
fn value_to_string(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
