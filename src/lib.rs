//! Catalog Validator
//!
//! Validates Tekton-style catalog resources (Tasks, Pipelines, StepActions)
//! laid out as YAML manifests under a versioned directory tree.
//!
//! ## Features
//!
//! - **Two Versioning Policies**: versions from the directory path or from git tags
//! - **Structural Validation**: per-kind schema rules with exhaustive error collection
//! - **Consistency Checks**: manifest name, kind and version must match the catalog path
//! - **Linting**: advisory warnings for unpinned images, missing docs
//!
//! ## Architecture
//!
//! ```text
//! task/
//! ├── maven/
//! │   ├── 0.1/                    directory versioning
//! │   │   ├── maven.yaml
//! │   │   └── README.md
//! │   └── 0.2/
//! └── npm/                        git versioning (tag npm-v0.1)
//!     ├── npm.yaml
//!     └── README.md
//! ```

pub mod config;
pub mod discover;
pub mod error;
pub mod kind;
pub mod lint;
pub mod locator;
pub mod manifest;
pub mod report;
pub mod schema;
pub mod validator;
pub mod versioning;

pub use config::CatalogConfig;
pub use error::{CatalogError, LoadError, LocatorError, Result};
pub use kind::ResourceKind;
pub use lint::CatalogLinter;
pub use locator::{locate, CatalogPath, PathLayout, ResourceDescriptor};
pub use manifest::ManifestDocument;
pub use report::{ErrorKind, RunReport, ValidationError, ValidationResult, ValidationWarning, VersionConflict};
pub use schema::SchemaValidator;
pub use validator::CatalogValidator;
pub use versioning::{GitTagResolver, StaticVersionResolver, VersionResolver, VersioningPolicy};
