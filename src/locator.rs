//! Resource location
//!
//! Derives `{kind, name, version, manifest}` from a catalog path. The layout
//! of the path (whether it ends in a version segment) is detected first, so
//! a resource laid out for one policy still resolves to its manifest when
//! validated under the other; the reconciler then reports the mismatch.

use std::ffi::OsString;
use std::path::{Component, Path, PathBuf};

use tracing::debug;

use crate::error::LocatorError;
use crate::versioning::{looks_like_version, VersionResolver, VersioningPolicy};

/// An input location as given on the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogPath {
    path: PathBuf,
}

impl CatalogPath {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn as_path(&self) -> &Path {
        &self.path
    }

    /// Absolute form, resolved against the working directory with `.` and
    /// `..` removed lexically
    pub fn absolute(&self) -> PathBuf {
        let base = std::path::absolute(&self.path).unwrap_or_else(|_| self.path.clone());
        normalize(&base)
    }

    /// Normal segments of the absolute path
    pub fn segments(&self) -> Vec<OsString> {
        self.absolute()
            .components()
            .filter_map(|c| match c {
                Component::Normal(s) => Some(s.to_os_string()),
                _ => None,
            })
            .collect()
    }

    pub fn last_segment(&self) -> Option<String> {
        self.segments()
            .last()
            .map(|s| s.to_string_lossy().into_owned())
    }

    /// `<path>/<last segment>.yaml`, for attributing errors when location fails
    pub fn fallback_manifest_path(&self) -> PathBuf {
        match self.last_segment() {
            Some(last) => self.path.join(format!("{last}.yaml")),
            None => self.path.clone(),
        }
    }
}

/// Drop `.` and resolve `..` without touching the filesystem
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

impl From<&str> for CatalogPath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<PathBuf> for CatalogPath {
    fn from(p: PathBuf) -> Self {
        Self::new(p)
    }
}

/// Shape of a resource path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathLayout {
    /// `<kind>/<name>/<version>`
    Versioned { version: String },
    /// `<kind>/<name>`
    Unversioned,
}

/// Inferred identity of a catalog resource
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceDescriptor {
    /// Catalog directory segment naming the kind (`task`, `pipeline`)
    pub kind: String,
    pub name: String,
    /// Expected version under the active policy, when known
    pub version: Option<String>,
    pub layout: PathLayout,
    pub resource_dir: PathBuf,
    /// Always `<resource_dir>/<name>.yaml`
    pub manifest_path: PathBuf,
}

fn malformed(path: &CatalogPath, reason: &str) -> LocatorError {
    LocatorError::MalformedPath {
        path: path.as_path().to_path_buf(),
        reason: reason.to_string(),
    }
}

/// Derive the descriptor of the resource at `path`
pub fn locate(
    path: &CatalogPath,
    policy: VersioningPolicy,
    resolver: &dyn VersionResolver,
) -> Result<ResourceDescriptor, LocatorError> {
    let segments = path.segments();
    let tail = segments[segments.len().saturating_sub(3)..]
        .iter()
        .map(|s| {
            s.to_str()
                .ok_or_else(|| malformed(path, "path segment is not valid UTF-8"))
        })
        .collect::<Result<Vec<_>, _>>()?;
    let (kind, name, layout) = match tail.as_slice() {
        [.., kind, name, version] if looks_like_version(version) => (
            *kind,
            *name,
            PathLayout::Versioned {
                version: version.to_string(),
            },
        ),
        [_, version] if looks_like_version(version) => {
            return Err(malformed(path, "expected <kind>/<name>/<version>"));
        }
        [.., kind, name] => (*kind, *name, PathLayout::Unversioned),
        _ => return Err(malformed(path, "expected at least <kind>/<name>")),
    };

    let resource_dir = path.as_path().to_path_buf();
    let manifest_path = resource_dir.join(format!("{name}.yaml"));

    let version = match (policy, &layout) {
        (VersioningPolicy::Directory, PathLayout::Versioned { version }) => Some(version.clone()),
        (VersioningPolicy::Directory, PathLayout::Unversioned) => None,
        (VersioningPolicy::Git, layout) => {
            let resolved = resolver.resolve(name, &path.absolute());
            if resolved.is_none() && *layout == PathLayout::Unversioned {
                return Err(LocatorError::VersionUnresolved {
                    name: name.to_string(),
                    manifest_path,
                });
            }
            resolved
        }
    };

    debug!(
        path = %path.as_path().display(),
        kind,
        name,
        version = version.as_deref().unwrap_or("-"),
        "located resource"
    );

    Ok(ResourceDescriptor {
        kind: kind.to_string(),
        name: name.to_string(),
        version,
        layout,
        resource_dir,
        manifest_path,
    })
}
