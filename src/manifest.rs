//! Manifest loading
//!
//! Manifests are decoded from YAML into an untyped `serde_json::Value` tree so
//! the schema rules can walk them uniformly.

use std::fs;
use std::io::ErrorKind as IoErrorKind;
use std::path::Path;

use serde_json::{Map, Value};
use tracing::debug;

use crate::error::LoadError;

/// A parsed catalog manifest. The root is always a mapping.
#[derive(Debug, Clone, PartialEq)]
pub struct ManifestDocument {
    root: Map<String, Value>,
}

impl ManifestDocument {
    /// Parse a single YAML document
    pub fn from_yaml_str(source: &str) -> Result<Self, String> {
        let value: Value = serde_yaml::from_str(source).map_err(|e| e.to_string())?;
        match value {
            Value::Object(root) => Ok(Self { root }),
            Value::Null => Err("document is empty".to_string()),
            other => Err(format!("document root must be a mapping, found {}", type_name(&other))),
        }
    }

    pub fn root(&self) -> &Map<String, Value> {
        &self.root
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.root.get(key)
    }

    /// Value at a dotted path of mapping keys (`metadata.name`)
    pub fn lookup(&self, dotted: &str) -> Option<&Value> {
        let mut parts = dotted.split('.');
        let first = self.root.get(parts.next()?)?;
        parts.try_fold(first, |value, key| value.as_object()?.get(key))
    }

    /// `metadata.labels[<label>]`; label keys may contain dots
    pub fn label(&self, label: &str) -> Option<&Value> {
        self.lookup("metadata.labels")?.as_object()?.get(label)
    }

    /// `metadata.annotations[<annotation>]`
    pub fn annotation(&self, annotation: &str) -> Option<&Value> {
        self.lookup("metadata.annotations")?
            .as_object()?
            .get(annotation)
    }
}

/// Read and parse the manifest at `path`
pub fn load(path: &Path) -> Result<ManifestDocument, LoadError> {
    let source = fs::read_to_string(path).map_err(|e| match e.kind() {
        IoErrorKind::NotFound => LoadError::NotFound(path.to_path_buf()),
        _ => LoadError::Unreadable {
            path: path.to_path_buf(),
            reason: e.to_string(),
        },
    })?;
    debug!(path = %path.display(), bytes = source.len(), "read manifest");

    ManifestDocument::from_yaml_str(&source).map_err(|reason| LoadError::Parse {
        path: path.to_path_buf(),
        reason,
    })
}

/// Human-readable name of a value's type, for error messages
pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "a mapping",
    }
}
