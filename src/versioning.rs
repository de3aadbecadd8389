//! Versioning policies and version reconciliation
//!
//! A catalog pins resource versions in one of two ways:
//!
//! ```text
//! directory:  task/maven/0.1/maven.yaml      version from the path
//! git:        task/maven/maven.yaml          version from a git tag (maven-v0.1)
//! ```
//!
//! In both cases the manifest declares its own version in the
//! `app.kubernetes.io/version` label, which must agree with the policy.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::sync::LazyLock;

use git2::{Oid, Repository};
use regex::Regex;
use semver::Version;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::locator::{PathLayout, ResourceDescriptor};
use crate::manifest::{type_name, ManifestDocument};
use crate::report::{ErrorKind, ValidationError, VersionConflict};

/// Default label carrying a resource's declared version
pub const DEFAULT_VERSION_LABEL: &str = "app.kubernetes.io/version";

static VERSION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^v?\d+(\.\d+){1,2}([-+][0-9A-Za-z.-]+)?$").expect("version pattern is valid")
});

/// Whether a path segment or tag suffix reads as a version (`0.1`, `v1.2.3`)
pub fn looks_like_version(s: &str) -> bool {
    VERSION_RE.is_match(s)
}

/// Parse catalog versions leniently: `0.1` is read as `0.1.0`
pub fn parse_lenient(s: &str) -> Option<Version> {
    let s = s.strip_prefix('v').unwrap_or(s);
    let split = s.find(['-', '+']).unwrap_or(s.len());
    let (core, rest) = s.split_at(split);
    let padded = match core.matches('.').count() {
        0 => format!("{core}.0.0"),
        1 => format!("{core}.0"),
        _ => core.to_string(),
    };
    Version::parse(&format!("{padded}{rest}")).ok()
}

/// How resource versions are addressed, fixed for a whole run
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum VersioningPolicy {
    /// `<kind>/<name>/<version>/<name>.yaml`
    #[default]
    Directory,
    /// `<kind>/<name>/<name>.yaml`, version from a git tag
    Git,
}

impl fmt::Display for VersioningPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersioningPolicy::Directory => f.write_str("directory"),
            VersioningPolicy::Git => f.write_str("git"),
        }
    }
}

/// Supplies the current version of a resource under git versioning
pub trait VersionResolver {
    /// Version for `name`, whose files live in `resource_dir`; `None` when
    /// no tag or ref applies
    fn resolve(&self, name: &str, resource_dir: &Path) -> Option<String>;
}

/// Fixed name → version table
#[derive(Debug, Clone, Default)]
pub struct StaticVersionResolver {
    versions: HashMap<String, String>,
}

impl StaticVersionResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, version: impl Into<String>) -> Self {
        self.versions.insert(name.into(), version.into());
        self
    }
}

impl From<HashMap<String, String>> for StaticVersionResolver {
    fn from(versions: HashMap<String, String>) -> Self {
        Self { versions }
    }
}

impl VersionResolver for StaticVersionResolver {
    fn resolve(&self, name: &str, _resource_dir: &Path) -> Option<String> {
        self.versions.get(name).cloned()
    }
}

/// Default tag prefixes; `{name}` is replaced with the resource name
pub fn default_tag_prefixes() -> Vec<String> {
    vec!["{name}-v".to_string(), "{name}/v".to_string(), "v".to_string()]
}

/// Reads versions from the tags of the repository enclosing a resource
#[derive(Debug, Clone)]
pub struct GitTagResolver {
    tag_prefixes: Vec<String>,
}

impl Default for GitTagResolver {
    fn default() -> Self {
        Self::new(default_tag_prefixes())
    }
}

struct TagCandidate {
    version: String,
    at_head: bool,
}

impl GitTagResolver {
    pub fn new(tag_prefixes: Vec<String>) -> Self {
        Self { tag_prefixes }
    }

    fn resolve_in_repo(&self, name: &str, resource_dir: &Path) -> Result<Option<String>, git2::Error> {
        let repo = match Repository::discover(resource_dir) {
            Ok(repo) => repo,
            Err(e) => {
                debug!(dir = %resource_dir.display(), error = %e, "no git repository");
                return Ok(None);
            }
        };
        let head = repo
            .head()
            .ok()
            .and_then(|h| h.peel_to_commit().ok())
            .map(|c| c.id());
        let tags = repo.tag_names(None)?;

        for pattern in &self.tag_prefixes {
            let prefix = pattern.replace("{name}", name);
            let mut candidates = Vec::new();
            for tag in tags.iter().flatten() {
                let Some(version) = tag.strip_prefix(prefix.as_str()) else {
                    continue;
                };
                if !looks_like_version(version) {
                    continue;
                }
                let target = tag_commit(&repo, tag);
                candidates.push(TagCandidate {
                    version: version.to_string(),
                    at_head: head.is_some() && target == head,
                });
            }
            if let Some(best) = pick_candidate(candidates) {
                debug!(name, prefix = %prefix, version = %best, "resolved version from git tag");
                return Ok(Some(best));
            }
        }
        Ok(None)
    }
}

fn tag_commit(repo: &Repository, tag: &str) -> Option<Oid> {
    repo.revparse_single(&format!("refs/tags/{tag}"))
        .and_then(|obj| obj.peel_to_commit())
        .map(|c| c.id())
        .ok()
}

fn pick_candidate(candidates: Vec<TagCandidate>) -> Option<String> {
    let any_at_head = candidates.iter().any(|c| c.at_head);
    candidates
        .into_iter()
        .filter(|c| c.at_head || !any_at_head)
        .max_by(|a, b| {
            parse_lenient(&a.version)
                .cmp(&parse_lenient(&b.version))
                .then_with(|| a.version.cmp(&b.version))
        })
        .map(|c| c.version)
}

impl VersionResolver for GitTagResolver {
    fn resolve(&self, name: &str, resource_dir: &Path) -> Option<String> {
        match self.resolve_in_repo(name, resource_dir) {
            Ok(version) => version,
            Err(e) => {
                warn!(name, error = %e, "failed to read git tags");
                None
            }
        }
    }
}

/// Declared version from the manifest's labels
fn declared_version(
    descriptor: &ResourceDescriptor,
    document: &ManifestDocument,
    label: &str,
    errors: &mut Vec<ValidationError>,
) -> Option<String> {
    let field = format!("metadata.labels.{label}");
    match document.label(label) {
        None => {
            errors.push(ValidationError::new(
                &descriptor.manifest_path,
                ErrorKind::MissingField { field },
            ));
            None
        }
        Some(serde_json::Value::String(v)) => Some(v.clone()),
        Some(other) => {
            errors.push(ValidationError::new(
                &descriptor.manifest_path,
                ErrorKind::TypeMismatch {
                    field,
                    expected: "a string",
                    found: type_name(other),
                },
            ));
            None
        }
    }
}

/// Check the declared version against the policy and the path layout
pub fn reconcile(
    descriptor: &ResourceDescriptor,
    document: &ManifestDocument,
    policy: VersioningPolicy,
    version_label: &str,
) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let declared = declared_version(descriptor, document, version_label, &mut errors);

    let conflict = match (policy, &descriptor.layout) {
        (VersioningPolicy::Directory, PathLayout::Versioned { version }) => declared
            .as_ref()
            .filter(|d| *d != version)
            .map(|_| VersionConflict::PathVersion {
                path_version: version.clone(),
            }),
        (VersioningPolicy::Directory, PathLayout::Unversioned) => {
            Some(VersionConflict::MissingPathSegment)
        }
        (VersioningPolicy::Git, PathLayout::Versioned { version }) => {
            Some(VersionConflict::UnexpectedPathSegment {
                segment: version.clone(),
            })
        }
        (VersioningPolicy::Git, PathLayout::Unversioned) => {
            match (&descriptor.version, &declared) {
                (Some(tag), Some(d)) if tag != d => Some(VersionConflict::TagVersion {
                    tag_version: tag.clone(),
                }),
                _ => None,
            }
        }
    };

    if let Some(conflict) = conflict {
        errors.push(ValidationError::new(
            &descriptor.manifest_path,
            ErrorKind::VersionMismatch { conflict, declared },
        ));
    }
    errors
}
