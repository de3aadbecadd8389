//! Configuration management for the catalog validator
//!
//! Supports loading configuration from:
//! - Default values
//! - Config file (catalog.toml)
//! - Environment variables (CATALOG__*)
//!
//! ## Example config file (catalog.toml):
//! ```toml
//! [versioning]
//! policy = "git"
//! tag_prefixes = ["{name}-v", "v"]
//!
//! [versioning.pinned]
//! maven = "0.3"
//!
//! [validation]
//! version_label = "app.kubernetes.io/version"
//! require_min_version = true
//!
//! [lint]
//! check_readme = false
//! ```

use config_crate::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use crate::schema::DEFAULT_MIN_VERSION_ANNOTATION;
use crate::versioning::{default_tag_prefixes, VersioningPolicy, DEFAULT_VERSION_LABEL};

/// Main configuration for the validator
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Versioning settings
    #[serde(default)]
    pub versioning: VersioningConfig,

    /// Schema validation settings
    #[serde(default)]
    pub validation: ValidationConfig,

    /// Lint settings
    #[serde(default)]
    pub lint: LintConfig,
}

/// Versioning configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersioningConfig {
    /// Policy used when `--versioning` is not given
    #[serde(default)]
    pub policy: VersioningPolicy,

    /// Tag prefixes tried in order under git versioning
    #[serde(default = "default_tag_prefixes")]
    pub tag_prefixes: Vec<String>,

    /// Versions that override git tags, keyed by resource name
    #[serde(default)]
    pub pinned: HashMap<String, String>,
}

/// Validation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Label holding a resource's declared version
    #[serde(default = "default_version_label")]
    pub version_label: String,

    /// Annotation naming the minimum supported pipelines release
    #[serde(default = "default_min_version_annotation")]
    pub min_version_annotation: String,

    /// Fail resources that lack the min-version annotation
    #[serde(default = "default_true")]
    pub require_min_version: bool,
}

/// Lint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LintConfig {
    /// Master switch for all lints
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_true")]
    pub check_image_tags: bool,

    #[serde(default = "default_true")]
    pub check_description: bool,

    #[serde(default = "default_true")]
    pub check_readme: bool,
}

// Default value functions
fn default_true() -> bool {
    true
}

fn default_version_label() -> String {
    DEFAULT_VERSION_LABEL.to_string()
}

fn default_min_version_annotation() -> String {
    DEFAULT_MIN_VERSION_ANNOTATION.to_string()
}

impl Default for VersioningConfig {
    fn default() -> Self {
        Self {
            policy: VersioningPolicy::Directory,
            tag_prefixes: default_tag_prefixes(),
            pinned: HashMap::new(),
        }
    }
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            version_label: default_version_label(),
            min_version_annotation: default_min_version_annotation(),
            require_min_version: true,
        }
    }
}

impl Default for LintConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            check_image_tags: true,
            check_description: true,
            check_readme: true,
        }
    }
}

impl CatalogConfig {
    /// Load configuration from default locations
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(None)
    }

    /// Load configuration, adding a required file on top of the defaults
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        // Load from default locations
        let config_locations = ["catalog.toml", ".catalog.toml", "config/catalog.toml"];

        for location in config_locations {
            builder = builder.add_source(File::with_name(location).required(false));
        }

        // Load from XDG config directory
        if let Some(config_dir) = directories::ProjectDirs::from("dev", "tekton", "catalog") {
            let xdg_config = config_dir.config_dir().join("catalog.toml");
            if xdg_config.exists() {
                builder = builder.add_source(File::from(xdg_config).required(false));
            }
        }

        // Load from specified path
        if let Some(path) = config_path {
            builder = builder.add_source(File::from(path).required(true));
        }

        // Load from environment variables (CATALOG__*)
        builder = builder.add_source(
            Environment::with_prefix("CATALOG")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> crate::error::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Annotation the schema validator requires, if any
    pub fn required_min_version_annotation(&self) -> Option<String> {
        self.validation
            .require_min_version
            .then(|| self.validation.min_version_annotation.clone())
    }
}
