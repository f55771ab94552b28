//! Where fontpeek keeps its files.
//!
//! Data directory: `--data-dir`, then `$FONTPEEK_HOME`, then
//! `$XDG_CONFIG_HOME/fontpeek`, then `$HOME/.config/fontpeek`.
//! Catalog file: `--catalog`, then `$FONTPEEK_CATALOG`, then
//! `<data dir>/catalog.toml` when it exists.

use crate::catalog::Catalog;
use crate::error::{Error, Result};
use crate::session::Session;
use crate::store::{JsonFileStore, KeyValueStore, MemoryStore};
use std::path::{Path, PathBuf};
use std::time::Instant;

pub const SETTINGS_FILE: &str = "settings.json";
pub const CATALOG_FILE: &str = "catalog.toml";

/// Options shared by every command.
#[derive(Debug, Clone, Default)]
pub struct Options {
    pub data_dir: Option<PathBuf>,
    pub catalog: Option<PathBuf>,
    /// Keep settings in memory only.
    pub ephemeral: bool,
}

/// Look up an environment variable, treating an empty value as unset.
fn env_path(var: &str) -> Option<PathBuf> {
    std::env::var_os(var)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

impl Options {
    pub fn data_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.data_dir {
            return Ok(dir.clone());
        }
        if let Some(dir) = env_path("FONTPEEK_HOME") {
            return Ok(dir);
        }
        if let Some(dir) = env_path("XDG_CONFIG_HOME") {
            return Ok(dir.join("fontpeek"));
        }
        match env_path("HOME") {
            Some(home) => Ok(home.join(".config").join("fontpeek")),
            None => Err(Error::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "no data directory: set HOME, FONTPEEK_HOME or pass --data-dir",
            ))),
        }
    }

    fn catalog_path(&self, data_dir: Option<&Path>) -> Option<PathBuf> {
        if let Some(path) = &self.catalog {
            return Some(path.clone());
        }
        if let Some(path) = env_path("FONTPEEK_CATALOG") {
            return Some(path);
        }
        data_dir
            .map(|d| d.join(CATALOG_FILE))
            .filter(|p| p.exists())
    }

    pub fn load_catalog(&self) -> Result<Catalog> {
        let data_dir = self.data_dir().ok();
        let path = self.catalog_path(data_dir.as_deref());
        Catalog::load(path.as_deref())
    }

    pub fn open_store(&self) -> Result<Box<dyn KeyValueStore>> {
        if self.ephemeral {
            return Ok(Box::new(MemoryStore::new()));
        }
        let store = JsonFileStore::open(self.data_dir()?.join(SETTINGS_FILE));
        log::debug!("settings file: {}", store.path().display());
        Ok(Box::new(store))
    }

    /// Catalog + store + session, ready for commands to drive.
    pub fn open_session(&self) -> Result<Session> {
        let catalog = self.load_catalog()?;
        let store = self.open_store()?;
        Session::open(catalog, store, Instant::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_data_dir_wins() {
        let options = Options {
            data_dir: Some(PathBuf::from("/tmp/fontpeek-explicit")),
            ..Options::default()
        };
        assert_eq!(
            options.data_dir().unwrap(),
            PathBuf::from("/tmp/fontpeek-explicit")
        );
    }

    #[test]
    fn explicit_catalog_wins() {
        let options = Options {
            catalog: Some(PathBuf::from("fonts.toml")),
            ..Options::default()
        };
        assert_eq!(
            options.catalog_path(None),
            Some(PathBuf::from("fonts.toml"))
        );
    }

    #[test]
    fn ephemeral_session_starts_from_defaults() {
        let options = Options {
            ephemeral: true,
            data_dir: Some(std::env::temp_dir().join("fontpeek-ephemeral-unused")),
            ..Options::default()
        };
        let session = options.open_session().unwrap();
        assert_eq!(session.selection().font_family, "Roboto");
    }
}
