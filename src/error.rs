//! Error types for the catalog validator
//!
//! Per-resource findings are never errors in this sense: they are collected
//! as [`crate::report::ValidationError`]s. The types here cover failures of
//! the individual pipeline stages and of the process setup.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for fatal catalog operations
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Process-level errors (configuration, discovery)
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Configuration error: {0}")]
    Config(#[from] config_crate::ConfigError),

    #[error("Catalog root not found: {0}")]
    RootNotFound(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::ser::Error),
}

/// Failure to derive a resource's identity from its path
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LocatorError {
    #[error("malformed catalog path {path}: {reason}")]
    MalformedPath { path: PathBuf, reason: String },

    #[error("no version tag found for resource {name}")]
    VersionUnresolved { name: String, manifest_path: PathBuf },
}

impl LocatorError {
    /// Manifest path the error can still be attributed to, if any
    pub fn manifest_path(&self) -> Option<&PathBuf> {
        match self {
            LocatorError::MalformedPath { .. } => None,
            LocatorError::VersionUnresolved { manifest_path, .. } => Some(manifest_path),
        }
    }
}

/// Failure to read or parse a manifest file
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    #[error("manifest not found: {0}")]
    NotFound(PathBuf),

    #[error("cannot read {path}: {reason}")]
    Unreadable { path: PathBuf, reason: String },

    #[error("invalid YAML in {path}: {reason}")]
    Parse { path: PathBuf, reason: String },
}
