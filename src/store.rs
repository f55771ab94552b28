//! Persistence of the [`Selection`] in a string key-value store.
//!
//! Four independent keys are used: `text`, `fontFamily`, `fontWeight` and
//! `isItalic` (`"true"` / `"false"`). Each key falls back to its default on
//! its own when missing or unusable. Writes are not transactional: an
//! interrupted [`save`] may leave some keys updated and others not.

use crate::catalog::{parse_weight, DEFAULT_WEIGHT};
use crate::error::Result;
use crate::selection::Selection;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub const KEY_TEXT: &str = "text";
pub const KEY_FONT_FAMILY: &str = "fontFamily";
pub const KEY_FONT_WEIGHT: &str = "fontWeight";
pub const KEY_IS_ITALIC: &str = "isItalic";

/// Durable string-to-string storage.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Read the selection, defaulting each missing or malformed key separately.
pub fn load(store: &dyn KeyValueStore) -> Selection {
    let defaults = Selection::default();

    let text = store.get(KEY_TEXT).unwrap_or(defaults.text);

    let font_family = store
        .get(KEY_FONT_FAMILY)
        .filter(|f| !f.is_empty())
        .unwrap_or(defaults.font_family);

    let font_weight = match store.get(KEY_FONT_WEIGHT) {
        Some(raw) => parse_weight(&raw).unwrap_or_else(|_| {
            log::warn!("ignoring stored font weight '{raw}'");
            DEFAULT_WEIGHT
        }),
        None => defaults.font_weight,
    };

    let is_italic = store.get(KEY_IS_ITALIC).as_deref() == Some("true");

    Selection {
        text,
        font_family,
        font_weight,
        is_italic,
    }
}

/// Write all four keys, overwriting whatever was stored.
pub fn save(store: &mut dyn KeyValueStore, selection: &Selection) -> Result<()> {
    store.set(KEY_TEXT, &selection.text)?;
    store.set(KEY_FONT_FAMILY, &selection.font_family)?;
    store.set(KEY_FONT_WEIGHT, &selection.font_weight.to_string())?;
    store.set(KEY_IS_ITALIC, if selection.is_italic { "true" } else { "false" })?;
    Ok(())
}

/// Write only the sample text.
pub fn save_text(store: &mut dyn KeyValueStore, text: &str) -> Result<()> {
    store.set(KEY_TEXT, text)
}

// ── JSON file store ─────────────────────────────────────────────────────

/// A flat JSON object on disk. Every `set` is written through immediately.
pub struct JsonFileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl JsonFileStore {
    /// Open `path`. A missing file is an empty store; an unreadable or
    /// corrupt one is logged and also treated as empty. Entries are kept
    /// one by one, so a single bad value only loses that key.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(src) => match serde_json::from_str::<Map<String, Value>>(&src) {
                Ok(map) => string_entries(map),
                Err(e) => {
                    log::warn!("ignoring corrupt settings file {}: {e}", path.display());
                    BTreeMap::new()
                }
            },
            Err(e) if e.kind() == ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                log::warn!("could not read settings file {}: {e}", path.display());
                BTreeMap::new()
            }
        };
        JsonFileStore { path, entries }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(entries)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

/// Keep string values as they are and scalars in their JSON spelling
/// (`true`, `600`). Nulls, arrays and objects are dropped.
fn string_entries(map: Map<String, Value>) -> BTreeMap<String, String> {
    map.into_iter()
        .filter_map(|(key, value)| match value {
            Value::String(s) => Some((key, s)),
            Value::Bool(_) | Value::Number(_) => Some((key, value.to_string())),
            other => {
                log::warn!("ignoring stored '{key}': {other}");
                None
            }
        })
        .collect()
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    /// Memory only changes once the file write succeeded.
    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut next = self.entries.clone();
        next.insert(key.to_string(), value.to_string());
        self.write(&next)?;
        self.entries = next;
        Ok(())
    }
}

// ── In-memory store ─────────────────────────────────────────────────────

/// Store that lives only as long as the process.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
