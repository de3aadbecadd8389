//! Validation orchestration
//!
//! Runs locate → load → reconcile → schema → lint for every input path, in
//! input order. A path that cannot be located or loaded stops there; the
//! remaining paths are still validated.

use tracing::{debug, info, warn};

use crate::config::CatalogConfig;
use crate::lint::CatalogLinter;
use crate::locator::{locate, CatalogPath};
use crate::manifest;
use crate::report::{RunReport, ValidationError, ValidationResult};
use crate::schema::SchemaValidator;
use crate::versioning::{
    reconcile, GitTagResolver, StaticVersionResolver, VersionResolver, VersioningPolicy,
    DEFAULT_VERSION_LABEL,
};

/// Pinned versions first, then git tags
struct PinnedThenGit {
    pinned: StaticVersionResolver,
    git: GitTagResolver,
}

impl VersionResolver for PinnedThenGit {
    fn resolve(&self, name: &str, resource_dir: &std::path::Path) -> Option<String> {
        self.pinned
            .resolve(name, resource_dir)
            .or_else(|| self.git.resolve(name, resource_dir))
    }
}

/// Validates catalog paths under one versioning policy
pub struct CatalogValidator {
    policy: VersioningPolicy,
    resolver: Box<dyn VersionResolver>,
    schema: SchemaValidator,
    linter: CatalogLinter,
    version_label: String,
}

impl CatalogValidator {
    /// Validator with default settings and git tag resolution
    pub fn new(policy: VersioningPolicy) -> Self {
        Self {
            policy,
            resolver: Box::new(GitTagResolver::default()),
            schema: SchemaValidator::default(),
            linter: CatalogLinter::default(),
            version_label: DEFAULT_VERSION_LABEL.to_string(),
        }
    }

    /// Validator configured from `config`; `policy` overrides the configured one
    pub fn from_config(config: &CatalogConfig, policy: Option<VersioningPolicy>) -> Self {
        let resolver = PinnedThenGit {
            pinned: StaticVersionResolver::from(config.versioning.pinned.clone()),
            git: GitTagResolver::new(config.versioning.tag_prefixes.clone()),
        };
        Self {
            policy: policy.unwrap_or(config.versioning.policy),
            resolver: Box::new(resolver),
            schema: SchemaValidator::new(config.required_min_version_annotation()),
            linter: CatalogLinter::from_config(&config.lint),
            version_label: config.validation.version_label.clone(),
        }
    }

    pub fn with_resolver(mut self, resolver: impl VersionResolver + 'static) -> Self {
        self.resolver = Box::new(resolver);
        self
    }

    pub fn with_linter(mut self, linter: CatalogLinter) -> Self {
        self.linter = linter;
        self
    }

    pub fn policy(&self) -> VersioningPolicy {
        self.policy
    }

    /// Validate every path, preserving input order
    pub fn run(&self, paths: &[CatalogPath]) -> RunReport {
        let results: Vec<_> = paths.iter().map(|p| self.validate_path(p)).collect();
        let report = RunReport { results };
        info!(
            policy = %self.policy,
            paths = paths.len(),
            errors = report.error_count(),
            warnings = report.warning_count(),
            "validation finished"
        );
        report
    }

    /// Validate a single path
    pub fn validate_path(&self, path: &CatalogPath) -> ValidationResult {
        let mut result = ValidationResult::new(path.as_path());

        let descriptor = match locate(path, self.policy, self.resolver.as_ref()) {
            Ok(descriptor) => descriptor,
            Err(e) => {
                let attributed = e
                    .manifest_path()
                    .cloned()
                    .unwrap_or_else(|| path.fallback_manifest_path());
                warn!(path = %attributed.display(), error = %e, "cannot locate resource");
                result.errors.push(ValidationError::from_locator(&attributed, &e));
                result.manifest_path = Some(attributed);
                return result;
            }
        };
        result.manifest_path = Some(descriptor.manifest_path.clone());

        let document = match manifest::load(&descriptor.manifest_path) {
            Ok(document) => document,
            Err(e) => {
                warn!(path = %descriptor.manifest_path.display(), error = %e, "cannot load manifest");
                result
                    .errors
                    .push(ValidationError::from_load(&descriptor.manifest_path, &e));
                return result;
            }
        };

        result.errors.extend(reconcile(
            &descriptor,
            &document,
            self.policy,
            &self.version_label,
        ));
        result.errors.extend(self.schema.validate(&descriptor, &document));
        result.warnings = self.linter.lint(&descriptor, &document);

        for err in &result.errors {
            warn!(code = err.kind.code(), "{err}");
        }
        for w in &result.warnings {
            debug!(code = w.code, path = %w.resource_path.display(), "{}", w.message);
        }
        result
    }
}
