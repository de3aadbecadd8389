//! Catalog linting
//!
//! Advisory checks that never fail a resource:
//! 1. **Image Tags**: container images should pin a tag or digest, not `latest`
//! 2. **Description**: `spec.description` should explain what the resource does
//! 3. **README**: every resource directory should carry a `README.md`

use serde_json::Value;
use std::path::Path;

use crate::config::LintConfig;
use crate::locator::ResourceDescriptor;
use crate::manifest::ManifestDocument;
use crate::report::ValidationWarning;

/// The catalog linter
#[derive(Debug, Clone)]
pub struct CatalogLinter {
    check_image_tags: bool,
    check_description: bool,
    check_readme: bool,
}

impl Default for CatalogLinter {
    fn default() -> Self {
        Self::from_config(&LintConfig::default())
    }
}

impl CatalogLinter {
    pub fn from_config(config: &LintConfig) -> Self {
        Self {
            check_image_tags: config.enabled && config.check_image_tags,
            check_description: config.enabled && config.check_description,
            check_readme: config.enabled && config.check_readme,
        }
    }

    /// Lint one located, loaded resource
    pub fn lint(&self, descriptor: &ResourceDescriptor, document: &ManifestDocument) -> Vec<ValidationWarning> {
        let mut warnings = Vec::new();
        let mut warn = |code: &'static str, message: String| {
            warnings.push(ValidationWarning {
                resource_path: descriptor.manifest_path.clone(),
                code,
                message,
            });
        };

        if self.check_image_tags {
            if let Some(spec) = document.get("spec") {
                let mut images = Vec::new();
                collect_images(spec, "spec", &mut images);
                for (path, image) in images {
                    if let Some(problem) = image_tag_problem(image) {
                        warn("image-tag", format!("{path}: image \"{image}\" {problem}"));
                    }
                }
            }
        }

        if self.check_description {
            let described = document
                .lookup("spec.description")
                .and_then(Value::as_str)
                .is_some_and(|d| !d.trim().is_empty());
            if !described {
                warn(
                    "missing-description",
                    "spec.description is missing or empty".to_string(),
                );
            }
        }

        if self.check_readme && !has_readme(&descriptor.resource_dir) {
            warn(
                "missing-readme",
                format!("no README.md in {}", descriptor.resource_dir.display()),
            );
        }

        warnings
    }
}

fn has_readme(dir: &Path) -> bool {
    dir.join("README.md").is_file()
}

/// Every string `image` value below `value`, with its field path
fn collect_images<'v>(value: &'v Value, path: &str, out: &mut Vec<(String, &'v str)>) {
    match value {
        Value::Object(obj) => {
            for (key, val) in obj {
                let child_path = format!("{}.{}", path, key);
                if key == "image" {
                    if let Some(image) = val.as_str() {
                        out.push((child_path, image));
                        continue;
                    }
                }
                collect_images(val, &child_path, out);
            }
        }
        Value::Array(arr) => {
            for (i, val) in arr.iter().enumerate() {
                collect_images(val, &format!("{}[{}]", path, i), out);
            }
        }
        _ => {}
    }
}

fn image_tag_problem(image: &str) -> Option<&'static str> {
    // parameterised images are resolved at runtime
    if image.contains("$(") || image.contains('@') {
        return None;
    }
    let name = image.rsplit('/').next().unwrap_or(image);
    match name.split_once(':') {
        None => Some("has no explicit tag"),
        Some((_, "latest")) => Some("uses the latest tag"),
        Some((_, "")) => Some("has an empty tag"),
        Some(_) => None,
    }
}
