use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EnrichError {
    #[error("failed to read '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write '{path}': {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("GeoJSON parse failed for '{path}': {source}")]
    GeoJson {
        path: PathBuf,
        source: geojson::Error,
    },

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{file}: line {line} is not '{marker}'")]
    HeaderMarker {
        file: String,
        line: usize,
        marker: &'static str,
    },

    #[error("{file}: line {line} must have {expected} cells, but has {found}: {content}")]
    ColumnCount {
        file: String,
        line: usize,
        expected: usize,
        found: usize,
        content: String,
    },

    #[error("{file}: no data rows found")]
    EmptyTable { file: String },

    #[error("{file}: line {line}: cannot parse '{cell}' as a number")]
    Numeral {
        file: String,
        line: usize,
        cell: String,
    },

    #[error("{level} {name} ({code}) not found in geometry")]
    FeatureNotFound {
        level: &'static str,
        name: String,
        code: String,
    },

    #[error("{file}: {name} ({code}) not found in income records")]
    RecordNotFound {
        file: String,
        name: String,
        code: String,
    },
}

pub type Result<T> = std::result::Result<T, EnrichError>;
