use lazy_types::Schema;
use std::path::{Path, PathBuf};
use thiserror::Error;

/* Errors that can occur while reading a schema document */
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read schema '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse YAML schema '{}': {source}", path.display())]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yml::Error,
    },

    #[error("failed to parse JSON schema '{}': {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("unsupported schema format for '{}': expected .yaml, .yml or .json", path.display())]
    UnsupportedFormat { path: PathBuf },
}

/* Document formats a schema can be written in */
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaFormat {
    Yaml,
    Json,
}

impl SchemaFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()?.to_ascii_lowercase().as_str() {
            "yaml" | "yml" => Some(SchemaFormat::Yaml),
            "json" => Some(SchemaFormat::Json),
            _ => None,
        }
    }
}

/* Parse schema text; `path` only labels errors */
pub fn parse_schema(text: &str, format: SchemaFormat, path: &Path) -> Result<Schema, LoadError> {
    match format {
        SchemaFormat::Yaml => serde_yml::from_str(text).map_err(|source| LoadError::Yaml {
            path: path.to_path_buf(),
            source,
        }),
        SchemaFormat::Json => serde_json::from_str(text).map_err(|source| LoadError::Json {
            path: path.to_path_buf(),
            source,
        }),
    }
}

pub fn load_schema(path: &Path) -> Result<Schema, LoadError> {
    let format = SchemaFormat::from_path(path).ok_or_else(|| LoadError::UnsupportedFormat {
        path: path.to_path_buf(),
    })?;
    let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_schema(&text, format, path)
}
