//! Catalog resource kinds

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of catalog resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceKind {
    /// A sequence of steps run in one pod
    Task,
    /// A graph of tasks
    Pipeline,
    /// A reusable single step referenced from Task steps
    StepAction,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 3] = [
        ResourceKind::Task,
        ResourceKind::Pipeline,
        ResourceKind::StepAction,
    ];

    /// Value of the manifest's `kind` field
    pub fn kind_name(&self) -> &'static str {
        match self {
            ResourceKind::Task => "Task",
            ResourceKind::Pipeline => "Pipeline",
            ResourceKind::StepAction => "StepAction",
        }
    }

    /// Catalog directory holding resources of this kind
    pub fn dir_name(&self) -> &'static str {
        match self {
            ResourceKind::Task => "task",
            ResourceKind::Pipeline => "pipeline",
            ResourceKind::StepAction => "stepaction",
        }
    }

    /// Parse the manifest's `kind` field (case-sensitive)
    pub fn from_kind_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.kind_name() == name)
    }

    /// Parse a catalog directory segment
    pub fn from_dir_name(segment: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.dir_name() == segment)
    }

    /// `apiVersion` values accepted for this kind
    pub fn api_versions(&self) -> &'static [&'static str] {
        match self {
            ResourceKind::Task | ResourceKind::Pipeline => &["tekton.dev/v1beta1", "tekton.dev/v1"],
            ResourceKind::StepAction => &["tekton.dev/v1alpha1", "tekton.dev/v1beta1"],
        }
    }

    /// Field names allowed directly under `spec`
    pub fn spec_fields(&self) -> &'static [&'static str] {
        match self {
            ResourceKind::Task => &[
                "description",
                "displayName",
                "params",
                "results",
                "workspaces",
                "steps",
                "sidecars",
                "volumes",
                "stepTemplate",
            ],
            ResourceKind::Pipeline => &[
                "description",
                "displayName",
                "params",
                "results",
                "workspaces",
                "tasks",
                "finally",
            ],
            ResourceKind::StepAction => &[
                "description",
                "image",
                "command",
                "args",
                "script",
                "env",
                "params",
                "results",
                "workingDir",
                "securityContext",
                "volumeMounts",
            ],
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.kind_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_and_dir_names_round_trip() {
        for kind in ResourceKind::ALL {
            assert_eq!(ResourceKind::from_kind_name(kind.kind_name()), Some(kind));
            assert_eq!(ResourceKind::from_dir_name(kind.dir_name()), Some(kind));
        }
    }

    #[test]
    fn test_kind_name_is_case_sensitive() {
        assert_eq!(ResourceKind::from_kind_name("task"), None);
        assert_eq!(ResourceKind::from_dir_name("Task"), None);
        assert_eq!(ResourceKind::from_kind_name("ClusterTask"), None);
    }

    #[test]
    fn test_steps_only_allowed_on_tasks() {
        assert!(ResourceKind::Task.spec_fields().contains(&"steps"));
        assert!(!ResourceKind::Pipeline.spec_fields().contains(&"steps"));
        assert!(ResourceKind::Pipeline.spec_fields().contains(&"tasks"));
    }
}
