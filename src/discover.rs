//! Catalog discovery
//!
//! Finds every resource directory under a catalog root: `<name>/` holding
//! `<name>.yaml` (git layout) or `<name>/<version>/` holding `<name>.yaml`
//! (directory layout).

use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use crate::error::{CatalogError, Result};

const SKIP_DIRS: [&str; 3] = [".git", "target", "node_modules"];

fn manifest_name(dir: &Path) -> Option<String> {
    let name = dir.file_name()?.to_str()?;
    let name = if crate::versioning::looks_like_version(name) {
        dir.parent()?.file_name()?.to_str()?
    } else {
        name
    };
    Some(format!("{name}.yaml"))
}

/// Resource directories under `root`, sorted
pub fn resource_paths(root: &Path) -> Result<Vec<PathBuf>> {
    if !root.is_dir() {
        return Err(CatalogError::RootNotFound(root.to_path_buf()));
    }

    let mut found = Vec::new();
    let walker = WalkDir::new(root).into_iter().filter_entry(|e| {
        !e.file_type().is_dir()
            || e.file_name()
                .to_str()
                .map_or(true, |n| !SKIP_DIRS.contains(&n))
    });
    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_dir() {
            continue;
        }
        let dir = entry.path();
        if let Some(manifest) = manifest_name(dir) {
            if dir.join(&manifest).is_file() {
                found.push(dir.to_path_buf());
            }
        }
    }
    found.sort();
    debug!(root = %root.display(), count = found.len(), "discovered catalog resources");
    Ok(found)
}
