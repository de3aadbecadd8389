//! Validation findings and run reports

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::{LoadError, LocatorError};

/// Why a declared version disagrees with the versioning policy
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "conflict", rename_all = "snake_case")]
pub enum VersionConflict {
    /// Declared version differs from the `<version>` path segment
    PathVersion { path_version: String },
    /// Declared version differs from the resolved git tag
    TagVersion { tag_version: String },
    /// Directory versioning, but the path has no `<version>` segment
    MissingPathSegment,
    /// Git versioning, but the path still ends in a `<version>` segment
    UnexpectedPathSegment { segment: String },
}

/// Closed set of per-resource validation failures
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "error", rename_all = "snake_case")]
pub enum ErrorKind {
    MalformedPath { reason: String },
    VersionUnresolved { name: String },
    NotFound,
    Unreadable { reason: String },
    ParseError { reason: String },
    VersionMismatch {
        conflict: VersionConflict,
        declared: Option<String>,
    },
    MissingField { field: String },
    TypeMismatch {
        field: String,
        expected: &'static str,
        found: &'static str,
    },
    NameMismatch { expected: String, declared: String },
    KindMismatch { expected: String, declared: String },
    UnknownKind { kind: String },
    UnknownField { field: String },
    InvalidValue { field: String, reason: String },
}

impl ErrorKind {
    /// Short machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::MalformedPath { .. } => "malformed-path",
            ErrorKind::VersionUnresolved { .. } => "version-unresolved",
            ErrorKind::NotFound => "not-found",
            ErrorKind::Unreadable { .. } => "unreadable",
            ErrorKind::ParseError { .. } => "parse-error",
            ErrorKind::VersionMismatch { .. } => "version-mismatch",
            ErrorKind::MissingField { .. } => "missing-field",
            ErrorKind::TypeMismatch { .. } => "type-mismatch",
            ErrorKind::NameMismatch { .. } => "name-mismatch",
            ErrorKind::KindMismatch { .. } => "kind-mismatch",
            ErrorKind::UnknownKind { .. } => "unknown-kind",
            ErrorKind::UnknownField { .. } => "unknown-field",
            ErrorKind::InvalidValue { .. } => "invalid-value",
        }
    }
}

fn declared_or_none(declared: &Option<String>) -> String {
    match declared {
        Some(v) => format!("\"{v}\""),
        None => "none".to_string(),
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::MalformedPath { reason } => write!(f, "malformed catalog path: {reason}"),
            ErrorKind::VersionUnresolved { name } => {
                write!(f, "no git tag resolves a version for resource \"{name}\"")
            }
            ErrorKind::NotFound => write!(f, "manifest file does not exist"),
            ErrorKind::Unreadable { reason } => write!(f, "manifest cannot be read: {reason}"),
            ErrorKind::ParseError { reason } => write!(f, "manifest is not valid YAML: {reason}"),
            ErrorKind::VersionMismatch { conflict, declared } => {
                let declared = declared_or_none(declared);
                match conflict {
                    VersionConflict::PathVersion { path_version } => write!(
                        f,
                        "declared version {declared} does not match path version \"{path_version}\""
                    ),
                    VersionConflict::TagVersion { tag_version } => write!(
                        f,
                        "declared version {declared} does not match git tag version \"{tag_version}\""
                    ),
                    VersionConflict::MissingPathSegment => write!(
                        f,
                        "directory versioning expects <kind>/<name>/<version>, but the path has no version segment (declared version {declared})"
                    ),
                    VersionConflict::UnexpectedPathSegment { segment } => write!(
                        f,
                        "git versioning expects <kind>/<name>, but the path ends in version segment \"{segment}\" (declared version {declared})"
                    ),
                }
            }
            ErrorKind::MissingField { field } => write!(f, "required field {field} is missing"),
            ErrorKind::TypeMismatch {
                field,
                expected,
                found,
            } => write!(f, "{field} must be {expected}, found {found}"),
            ErrorKind::NameMismatch { expected, declared } => write!(
                f,
                "metadata.name \"{declared}\" does not match resource name \"{expected}\""
            ),
            ErrorKind::KindMismatch { expected, declared } => write!(
                f,
                "kind \"{declared}\" does not match catalog directory \"{expected}\""
            ),
            ErrorKind::UnknownKind { kind } => write!(f, "unknown resource kind \"{kind}\""),
            ErrorKind::UnknownField { field } => write!(f, "unknown field {field}"),
            ErrorKind::InvalidValue { field, reason } => write!(f, "{field}: {reason}"),
        }
    }
}

/// A single failure attributed to one resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    pub resource_path: PathBuf,
    pub kind: ErrorKind,
}

impl ValidationError {
    pub fn new(resource_path: impl Into<PathBuf>, kind: ErrorKind) -> Self {
        Self {
            resource_path: resource_path.into(),
            kind,
        }
    }

    pub fn from_locator(resource_path: impl Into<PathBuf>, err: &LocatorError) -> Self {
        let kind = match err {
            LocatorError::MalformedPath { reason, .. } => ErrorKind::MalformedPath {
                reason: reason.clone(),
            },
            LocatorError::VersionUnresolved { name, .. } => {
                ErrorKind::VersionUnresolved { name: name.clone() }
            }
        };
        Self::new(resource_path, kind)
    }

    pub fn from_load(resource_path: impl Into<PathBuf>, err: &LoadError) -> Self {
        let kind = match err {
            LoadError::NotFound(_) => ErrorKind::NotFound,
            LoadError::Unreadable { reason, .. } => ErrorKind::Unreadable {
                reason: reason.clone(),
            },
            LoadError::Parse { reason, .. } => ErrorKind::ParseError {
                reason: reason.clone(),
            },
        };
        Self::new(resource_path, kind)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.resource_path.display(), self.kind)
    }
}

/// Advisory finding; never fails a resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationWarning {
    pub resource_path: PathBuf,
    pub code: &'static str,
    pub message: String,
}

/// Outcome of validating one input path
#[derive(Debug, Clone, Serialize)]
pub struct ValidationResult {
    /// Input path as given
    pub path: PathBuf,
    /// Manifest the findings are attributed to, when it could be derived
    pub manifest_path: Option<PathBuf>,
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            manifest_path: None,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    /// Path used in the externally visible failure line
    pub fn report_path(&self) -> &Path {
        self.manifest_path.as_deref().unwrap_or(&self.path)
    }
}

/// All results of one validation run, in input order
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunReport {
    pub results: Vec<ValidationResult>,
}

impl RunReport {
    pub fn is_ok(&self) -> bool {
        self.results.iter().all(ValidationResult::is_ok)
    }

    pub fn first_failure(&self) -> Option<&ValidationResult> {
        self.results.iter().find(|r| !r.is_ok())
    }

    pub fn error_count(&self) -> usize {
        self.results.iter().map(|r| r.errors.len()).sum()
    }

    pub fn warning_count(&self) -> usize {
        self.results.iter().map(|r| r.warnings.len()).sum()
    }

    /// The consolidated failure line, or an empty string on success
    pub fn render(&self) -> String {
        match self.first_failure() {
            Some(failed) => format!("Error: {} failed validation\n", failed.report_path().display()),
            None => String::new(),
        }
    }

    /// Every finding, grouped per manifest
    pub fn render_details(&self) -> String {
        let mut out = String::new();
        for result in &self.results {
            if result.errors.is_empty() && result.warnings.is_empty() {
                continue;
            }
            out.push_str(&format!("FILE: {}\n", result.report_path().display()));
            for err in &result.errors {
                out.push_str(&format!("ERROR: [{}] {}\n", err.kind.code(), err.kind));
            }
            for warn in &result.warnings {
                out.push_str(&format!("WARN : [{}] {}\n", warn.code, warn.message));
            }
        }
        out
    }
}
