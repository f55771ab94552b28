//! Error types for fontpeek.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Unknown font family '{0}'")]
    UnknownFamily(String),

    #[error("Font family '{family}' has no variant '{label}'")]
    UnknownVariant { family: String, label: String },

    #[error("Invalid font weight '{0}'")]
    InvalidWeight(String),

    #[error("Invalid catalog: {0}")]
    InvalidCatalog(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Settings file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Catalog file is not valid TOML: {0}")]
    Toml(#[from] toml_edit::TomlError),
}
