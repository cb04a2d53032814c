//! Error types
//!
//! Generation itself never fails; these cover configuration loading,
//! configuration validation, room template parsing and grid loading.

use thiserror::Error;

/// Room template layout errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    #[error("template layout has no rows")]
    EmptyLayout,

    #[error("template layout row {row} has width {found}, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("unknown layout marker '{marker}' at row {row}, column {column}")]
    UnknownMarker {
        marker: char,
        row: usize,
        column: usize,
    },
}

/// Grid shape errors when loading a serialized grid
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("grid of size {size} has {found} columns")]
    ColumnCount { size: usize, found: usize },

    #[error("grid of size {size} has column {column} of length {found}")]
    ColumnLength {
        size: usize,
        column: usize,
        found: usize,
    },
}

/// Configuration loading and validation errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("gridSize must be odd and at least 3, got {0}")]
    InvalidGridSize(usize),

    #[error("{name} must be within [{min}, {max}], got {value}")]
    OutOfRange {
        name: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("{name} must be at least 1")]
    Zero { name: &'static str },

    #[error("template '{name}' has minFrequency {min} above maxFrequency {max}")]
    FrequencyBounds { name: String, min: usize, max: usize },

    #[error("duplicate template name '{0}'")]
    DuplicateTemplate(String),
}
