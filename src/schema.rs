//! Structural validation of catalog manifests
//!
//! Every rule runs; a manifest with several problems reports all of them.
//! Rule sets are selected by [`ResourceKind`]:
//!
//! - **Task**: non-empty `steps`, each with an `image` or a StepAction `ref`
//! - **Pipeline**: non-empty `tasks`, each with exactly one of `taskRef`/`taskSpec`
//! - **StepAction**: a single container `image`

use std::collections::HashSet;
use std::path::Path;

use serde_json::{Map, Value};

use crate::kind::ResourceKind;
use crate::locator::ResourceDescriptor;
use crate::manifest::{type_name, ManifestDocument};
use crate::report::{ErrorKind, ValidationError};

/// Default annotation naming the oldest supported pipelines release
pub const DEFAULT_MIN_VERSION_ANNOTATION: &str = "tekton.dev/pipelines.minVersion";

const PARAM_TYPES: [&str; 3] = ["string", "array", "object"];

/// Collects errors for one manifest
struct Checker<'a> {
    manifest: &'a Path,
    errors: Vec<ValidationError>,
}

impl<'a> Checker<'a> {
    fn new(manifest: &'a Path) -> Self {
        Self {
            manifest,
            errors: Vec::new(),
        }
    }

    fn push(&mut self, kind: ErrorKind) {
        self.errors.push(ValidationError::new(self.manifest, kind));
    }

    fn missing(&mut self, field: impl Into<String>) {
        self.push(ErrorKind::MissingField {
            field: field.into(),
        });
    }

    fn invalid(&mut self, field: impl Into<String>, reason: impl Into<String>) {
        self.push(ErrorKind::InvalidValue {
            field: field.into(),
            reason: reason.into(),
        });
    }

    fn wrong_type(&mut self, field: &str, expected: &'static str, value: &Value) {
        self.push(ErrorKind::TypeMismatch {
            field: field.to_string(),
            expected,
            found: type_name(value),
        });
    }

    fn string<'v>(&mut self, value: &'v Value, field: &str) -> Option<&'v str> {
        match value {
            Value::String(s) => Some(s),
            other => {
                self.wrong_type(field, "a string", other);
                None
            }
        }
    }

    fn mapping<'v>(&mut self, value: &'v Value, field: &str) -> Option<&'v Map<String, Value>> {
        match value {
            Value::Object(m) => Some(m),
            other => {
                self.wrong_type(field, "a mapping", other);
                None
            }
        }
    }

    fn sequence<'v>(&mut self, value: &'v Value, field: &str) -> Option<&'v Vec<Value>> {
        match value {
            Value::Array(items) => Some(items),
            other => {
                self.wrong_type(field, "a sequence", other);
                None
            }
        }
    }

    fn required<'v>(&mut self, parent: &'v Map<String, Value>, key: &str, field: &str) -> Option<&'v Value> {
        let value = parent.get(key);
        if value.is_none() {
            self.missing(field);
        }
        value
    }

    fn required_string<'v>(&mut self, parent: &'v Map<String, Value>, key: &str, field: &str) -> Option<&'v str> {
        let value = self.required(parent, key, field)?;
        self.string(value, field)
    }

    fn optional_string(&mut self, parent: &Map<String, Value>, key: &str, prefix: &str) {
        if let Some(value) = parent.get(key) {
            self.string(value, &format!("{prefix}.{key}"));
        }
    }

    fn optional_mapping(&mut self, parent: &Map<String, Value>, key: &str, prefix: &str) {
        if let Some(value) = parent.get(key) {
            self.mapping(value, &format!("{prefix}.{key}"));
        }
    }

    fn optional_sequence<'v>(
        &mut self,
        parent: &'v Map<String, Value>,
        key: &str,
        prefix: &str,
    ) -> Option<&'v Vec<Value>> {
        let value = parent.get(key)?;
        self.sequence(value, &format!("{prefix}.{key}"))
    }

    fn string_list(&mut self, parent: &Map<String, Value>, key: &str, prefix: &str) {
        let field = format!("{prefix}.{key}");
        if let Some(items) = self.optional_sequence(parent, key, prefix) {
            for (i, item) in items.iter().enumerate() {
                self.string(item, &format!("{field}[{i}]"));
            }
        }
    }

    /// Optional sequence of mappings that each carry a unique string `name`.
    /// Returns the well-formed items with their field paths.
    fn named_list<'v>(
        &mut self,
        parent: &'v Map<String, Value>,
        key: &str,
        prefix: &str,
    ) -> Vec<(&'v Map<String, Value>, String)> {
        let field = format!("{prefix}.{key}");
        let Some(items) = self.optional_sequence(parent, key, prefix) else {
            return Vec::new();
        };
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        for (i, item) in items.iter().enumerate() {
            let item_field = format!("{field}[{i}]");
            let Some(map) = self.mapping(item, &item_field) else {
                continue;
            };
            if let Some(name) = self.required_string(map, "name", &format!("{item_field}.name")) {
                if !seen.insert(name) {
                    self.invalid(&item_field, format!("duplicate name \"{name}\""));
                }
            }
            out.push((map, item_field));
        }
        out
    }
}

/// Validates manifests against the catalog schema of their kind
#[derive(Debug, Clone)]
pub struct SchemaValidator {
    min_version_annotation: Option<String>,
}

impl Default for SchemaValidator {
    fn default() -> Self {
        Self::new(Some(DEFAULT_MIN_VERSION_ANNOTATION.to_string()))
    }
}

impl SchemaValidator {
    /// `min_version_annotation` names a required annotation, or `None` to skip it
    pub fn new(min_version_annotation: Option<String>) -> Self {
        Self {
            min_version_annotation,
        }
    }

    /// All schema violations of `document`, in rule order
    pub fn validate(&self, descriptor: &ResourceDescriptor, document: &ManifestDocument) -> Vec<ValidationError> {
        let mut c = Checker::new(&descriptor.manifest_path);
        let root = document.root();

        let api_version = c.required_string(root, "apiVersion", "apiVersion");
        let kind = self.check_kind(&mut c, descriptor, root);

        if let (Some(kind), Some(api_version)) = (kind, api_version) {
            if !kind.api_versions().contains(&api_version) {
                c.invalid(
                    "apiVersion",
                    format!(
                        "\"{api_version}\" is not supported for {kind}, expected one of {}",
                        kind.api_versions().join(", ")
                    ),
                );
            }
        }

        self.check_metadata(&mut c, descriptor, root);

        if let Some(spec) = c.required(root, "spec", "spec") {
            if let (Some(spec), Some(kind)) = (c.mapping(spec, "spec"), kind) {
                check_spec(&mut c, kind, spec);
            }
        }

        c.errors
    }

    fn check_kind(
        &self,
        c: &mut Checker<'_>,
        descriptor: &ResourceDescriptor,
        root: &Map<String, Value>,
    ) -> Option<ResourceKind> {
        let path_kind = ResourceKind::from_dir_name(&descriptor.kind);
        if path_kind.is_none() {
            c.push(ErrorKind::UnknownKind {
                kind: descriptor.kind.clone(),
            });
        }

        // without a usable declared kind, the path's kind selects the rules
        let Some(declared) = c.required_string(root, "kind", "kind") else {
            return path_kind;
        };
        let Some(kind) = ResourceKind::from_kind_name(declared) else {
            c.push(ErrorKind::UnknownKind {
                kind: declared.to_string(),
            });
            return path_kind;
        };
        if let Some(path_kind) = path_kind {
            if path_kind != kind {
                c.push(ErrorKind::KindMismatch {
                    expected: descriptor.kind.clone(),
                    declared: declared.to_string(),
                });
            }
        }
        Some(kind)
    }

    fn check_metadata(&self, c: &mut Checker<'_>, descriptor: &ResourceDescriptor, root: &Map<String, Value>) {
        let Some(metadata) = c.required(root, "metadata", "metadata") else {
            return;
        };
        let Some(metadata) = c.mapping(metadata, "metadata") else {
            return;
        };

        if let Some(name) = c.required_string(metadata, "name", "metadata.name") {
            if name != descriptor.name {
                c.push(ErrorKind::NameMismatch {
                    expected: descriptor.name.clone(),
                    declared: name.to_string(),
                });
            }
        }

        c.optional_mapping(metadata, "labels", "metadata");

        let annotations = match metadata.get("annotations") {
            Some(value) => c.mapping(value, "metadata.annotations"),
            None => None,
        };
        if let Some(required) = &self.min_version_annotation {
            let field = format!("metadata.annotations.{required}");
            match annotations.and_then(|a| a.get(required.as_str())) {
                Some(value) => {
                    c.string(value, &field);
                }
                None if metadata.get("annotations").map_or(true, Value::is_object) => {
                    c.missing(field);
                }
                // already reported as a type mismatch
                None => {}
            }
        }
    }
}

fn check_spec(c: &mut Checker<'_>, kind: ResourceKind, spec: &Map<String, Value>) {
    let allowed = kind.spec_fields();
    for key in spec.keys() {
        if !allowed.contains(&key.as_str()) {
            c.push(ErrorKind::UnknownField {
                field: format!("spec.{key}"),
            });
        }
    }

    c.optional_string(spec, "description", "spec");
    check_params(c, spec);
    c.named_list(spec, "results", "spec");

    match kind {
        ResourceKind::Task => check_task(c, spec),
        ResourceKind::Pipeline => check_pipeline(c, spec),
        ResourceKind::StepAction => check_step_action(c, spec),
    }
}

fn check_params(c: &mut Checker<'_>, spec: &Map<String, Value>) {
    for (param, field) in c.named_list(spec, "params", "spec") {
        let Some(ty) = param.get("type") else {
            continue;
        };
        if let Some(ty) = c.string(ty, &format!("{field}.type")) {
            if !PARAM_TYPES.contains(&ty) {
                c.invalid(
                    format!("{field}.type"),
                    format!("\"{ty}\" is not one of {}", PARAM_TYPES.join(", ")),
                );
            }
        }
    }
}

fn check_container(c: &mut Checker<'_>, container: &Map<String, Value>, field: &str, allow_ref: bool) {
    c.optional_string(container, "name", field);
    c.optional_string(container, "script", field);
    c.optional_string(container, "workingDir", field);
    c.string_list(container, "command", field);
    c.string_list(container, "args", field);

    match container.get("ref") {
        Some(reference) if allow_ref => {
            c.mapping(reference, &format!("{field}.ref"));
            c.optional_string(container, "image", field);
        }
        _ => {
            c.required_string(container, "image", &format!("{field}.image"));
        }
    }
}

/// Non-empty required sequence of mappings
fn required_items<'v>(
    c: &mut Checker<'_>,
    spec: &'v Map<String, Value>,
    key: &str,
    what: &str,
) -> Vec<(&'v Map<String, Value>, String)> {
    let field = format!("spec.{key}");
    let Some(value) = c.required(spec, key, &field) else {
        return Vec::new();
    };
    let Some(items) = c.sequence(value, &field) else {
        return Vec::new();
    };
    if items.is_empty() {
        c.invalid(&field, format!("must contain at least one {what}"));
    }
    items
        .iter()
        .enumerate()
        .filter_map(|(i, item)| {
            let item_field = format!("{field}[{i}]");
            c.mapping(item, &item_field).map(|m| (m, item_field))
        })
        .collect()
}

fn check_task(c: &mut Checker<'_>, spec: &Map<String, Value>) {
    c.optional_string(spec, "displayName", "spec");
    c.named_list(spec, "workspaces", "spec");

    let mut step_names = HashSet::new();
    for (step, field) in required_items(c, spec, "steps", "step") {
        check_container(c, step, &field, true);
        if let Some(Value::String(name)) = step.get("name") {
            if !step_names.insert(name.as_str()) {
                c.invalid(&field, format!("duplicate step name \"{name}\""));
            }
        }
    }

    if let Some(sidecars) = c.optional_sequence(spec, "sidecars", "spec") {
        for (i, sidecar) in sidecars.iter().enumerate() {
            let field = format!("spec.sidecars[{i}]");
            if let Some(sidecar) = c.mapping(sidecar, &field) {
                check_container(c, sidecar, &field, false);
            }
        }
    }
    c.optional_sequence(spec, "volumes", "spec");
    c.optional_mapping(spec, "stepTemplate", "spec");
}

fn check_pipeline_task(c: &mut Checker<'_>, task: &Map<String, Value>, field: &str) {
    c.required_string(task, "name", &format!("{field}.name"));
    match (task.get("taskRef"), task.get("taskSpec")) {
        (Some(_), Some(_)) => c.invalid(field, "taskRef and taskSpec are mutually exclusive"),
        (Some(reference), None) => {
            c.mapping(reference, &format!("{field}.taskRef"));
        }
        (None, Some(inline)) => {
            c.mapping(inline, &format!("{field}.taskSpec"));
        }
        (None, None) => c.missing(format!("{field}.taskRef")),
    }
    c.string_list(task, "runAfter", field);
}

fn check_pipeline(c: &mut Checker<'_>, spec: &Map<String, Value>) {
    c.optional_string(spec, "displayName", "spec");
    c.named_list(spec, "workspaces", "spec");

    let tasks = required_items(c, spec, "tasks", "task");
    let finally: Vec<_> = match c.optional_sequence(spec, "finally", "spec") {
        Some(items) => items
            .iter()
            .enumerate()
            .filter_map(|(i, item)| {
                let field = format!("spec.finally[{i}]");
                c.mapping(item, &field).map(|m| (m, field))
            })
            .collect(),
        None => Vec::new(),
    };

    let mut names = HashSet::new();
    let mut task_names = HashSet::new();
    for (i, (task, field)) in tasks.iter().chain(finally.iter()).enumerate() {
        check_pipeline_task(c, task, field);
        if let Some(Value::String(name)) = task.get("name") {
            if !names.insert(name.as_str()) {
                c.invalid(field, format!("duplicate pipeline task name \"{name}\""));
            }
            if i < tasks.len() {
                task_names.insert(name.as_str());
            }
        }
    }

    // runAfter may only name entries of `tasks`
    for (task, field) in &tasks {
        let Some(Value::Array(after)) = task.get("runAfter") else {
            continue;
        };
        for (i, dep) in after.iter().enumerate() {
            if let Value::String(dep) = dep {
                if !task_names.contains(dep.as_str()) {
                    c.invalid(
                        format!("{field}.runAfter[{i}]"),
                        format!("unknown pipeline task \"{dep}\""),
                    );
                }
            }
        }
    }
    for (task, field) in &finally {
        if task.contains_key("runAfter") {
            c.invalid(
                format!("{field}.runAfter"),
                "finally tasks run after all pipeline tasks and cannot declare runAfter",
            );
        }
    }
}

fn check_step_action(c: &mut Checker<'_>, spec: &Map<String, Value>) {
    c.required_string(spec, "image", "spec.image");
    c.optional_string(spec, "script", "spec");
    c.optional_string(spec, "workingDir", "spec");
    c.string_list(spec, "command", "spec");
    c.string_list(spec, "args", "spec");
    c.optional_sequence(spec, "env", "spec");
    c.optional_sequence(spec, "volumeMounts", "spec");
    c.optional_mapping(spec, "securityContext", "spec");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locator::PathLayout;
    use std::path::PathBuf;

    fn descriptor(kind: &str, name: &str) -> ResourceDescriptor {
        ResourceDescriptor {
            kind: kind.into(),
            name: name.into(),
            version: Some("0.1".into()),
            layout: PathLayout::Versioned { version: "0.1".into() },
            resource_dir: PathBuf::from(format!("{kind}/{name}/0.1")),
            manifest_path: PathBuf::from(format!("{kind}/{name}/0.1/{name}.yaml")),
        }
    }

    fn validate(kind: &str, name: &str, yaml: &str) -> Vec<ErrorKind> {
        let doc = ManifestDocument::from_yaml_str(yaml).unwrap();
        SchemaValidator::default()
            .validate(&descriptor(kind, name), &doc)
            .into_iter()
            .map(|e| e.kind)
            .collect()
    }

    const HEADER: &str = r#"
metadata:
  name: maven
  labels:
    app.kubernetes.io/version: "0.1"
  annotations:
    tekton.dev/pipelines.minVersion: "0.12.1"
"#;

    fn task(spec: &str) -> String {
        format!("apiVersion: tekton.dev/v1beta1\nkind: Task{HEADER}spec:\n{spec}")
    }

    #[test]
    fn test_valid_task() {
        let yaml = task(
            r#"
  description: Build with maven
  params:
    - name: GOALS
      type: array
  workspaces:
    - name: source
  steps:
    - name: build
      image: maven:3.6-jdk-11
      args: ["$(params.GOALS)"]
"#,
        );
        assert_eq!(validate("task", "maven", &yaml), vec![]);
    }

    #[test]
    fn test_missing_top_level_fields_all_reported() {
        let errors = validate("task", "maven", "foo: bar\n");
        assert_eq!(
            errors,
            vec![
                ErrorKind::MissingField { field: "apiVersion".into() },
                ErrorKind::MissingField { field: "kind".into() },
                ErrorKind::MissingField { field: "metadata".into() },
                ErrorKind::MissingField { field: "spec".into() },
            ]
        );
    }

    #[test]
    fn test_name_and_kind_mismatch() {
        let yaml = task("  steps:\n    - image: alpine:3.18\n").replace("name: maven", "name: Maven");
        let errors = validate("pipeline", "maven", &yaml);
        assert!(errors.contains(&ErrorKind::NameMismatch {
            expected: "maven".into(),
            declared: "Maven".into(),
        }));
        assert!(errors.contains(&ErrorKind::KindMismatch {
            expected: "pipeline".into(),
            declared: "Task".into(),
        }));
    }

    #[test]
    fn test_unknown_kinds() {
        let yaml = task("  steps:\n    - image: alpine:3.18\n").replace("kind: Task", "kind: ClusterTask");
        let errors = validate("widget", "maven", &yaml);
        assert_eq!(
            errors,
            vec![
                ErrorKind::UnknownKind { kind: "widget".into() },
                ErrorKind::UnknownKind { kind: "ClusterTask".into() },
            ]
        );
    }

    #[test]
    fn test_unsupported_api_version() {
        let yaml = task("  steps:\n    - image: alpine:3.18\n").replace("tekton.dev/v1beta1", "tekton.dev/v1alpha1");
        let errors = validate("task", "maven", &yaml);
        assert!(matches!(&errors[..], [ErrorKind::InvalidValue { field, .. }] if field == "apiVersion"));
    }

    #[test]
    fn test_missing_min_version_annotation() {
        let yaml = task("  steps:\n    - image: alpine:3.18\n")
            .replace("tekton.dev/pipelines.minVersion", "tekton.dev/tags");
        assert_eq!(
            validate("task", "maven", &yaml),
            vec![ErrorKind::MissingField {
                field: "metadata.annotations.tekton.dev/pipelines.minVersion".into()
            }]
        );

        let doc = ManifestDocument::from_yaml_str(&yaml).unwrap();
        let lenient = SchemaValidator::new(None).validate(&descriptor("task", "maven"), &doc);
        assert!(lenient.is_empty());
    }

    #[test]
    fn test_steps_must_be_non_empty_sequence() {
        assert_eq!(
            validate("task", "maven", &task("  steps: []\n")),
            vec![ErrorKind::InvalidValue {
                field: "spec.steps".into(),
                reason: "must contain at least one step".into()
            }]
        );
        assert_eq!(
            validate("task", "maven", &task("  steps: build\n")),
            vec![ErrorKind::TypeMismatch {
                field: "spec.steps".into(),
                expected: "a sequence",
                found: "a string"
            }]
        );
        assert_eq!(
            validate("task", "maven", &task("  description: x\n")),
            vec![ErrorKind::MissingField { field: "spec.steps".into() }]
        );
    }

    #[test]
    fn test_step_shape() {
        let yaml = task(
            r#"
  steps:
    - name: build
      script: 42
    - name: build
      ref:
        name: git-clone
    - name: other
      image: alpine:3.18
      command: [sh, 1]
"#,
        );
        let errors = validate("task", "maven", &yaml);
        assert_eq!(
            errors,
            vec![
                ErrorKind::TypeMismatch {
                    field: "spec.steps[0].script".into(),
                    expected: "a string",
                    found: "a number"
                },
                ErrorKind::MissingField { field: "spec.steps[0].image".into() },
                ErrorKind::InvalidValue {
                    field: "spec.steps[1]".into(),
                    reason: "duplicate step name \"build\"".into()
                },
                ErrorKind::TypeMismatch {
                    field: "spec.steps[2].command[1]".into(),
                    expected: "a string",
                    found: "a number"
                },
            ]
        );
    }

    #[test]
    fn test_unknown_spec_field_and_bad_params() {
        let yaml = task(
            r#"
  steps:
    - image: alpine:3.18
  inputs:
    resources: []
  params:
    - name: a
      type: number
    - name: a
    - type: string
"#,
        );
        let errors = validate("task", "maven", &yaml);
        assert!(errors.contains(&ErrorKind::UnknownField { field: "spec.inputs".into() }));
        assert!(errors.contains(&ErrorKind::InvalidValue {
            field: "spec.params[0].type".into(),
            reason: "\"number\" is not one of string, array, object".into()
        }));
        assert!(errors.contains(&ErrorKind::InvalidValue {
            field: "spec.params[1]".into(),
            reason: "duplicate name \"a\"".into()
        }));
        assert!(errors.contains(&ErrorKind::MissingField { field: "spec.params[2].name".into() }));
    }

    fn pipeline(spec: &str) -> String {
        format!("apiVersion: tekton.dev/v1\nkind: Pipeline{HEADER}spec:\n{spec}")
    }

    #[test]
    fn test_valid_pipeline() {
        let yaml = pipeline(
            r#"
  workspaces:
    - name: shared
  tasks:
    - name: fetch
      taskRef:
        name: git-clone
    - name: build
      runAfter: [fetch]
      taskSpec:
        steps:
          - image: maven:3.6
  finally:
    - name: notify
      taskRef:
        name: send-to-channel-slack
"#,
        );
        assert_eq!(validate("pipeline", "maven", &yaml), vec![]);
    }

    #[test]
    fn test_pipeline_task_rules() {
        let yaml = pipeline(
            r#"
  tasks:
    - name: fetch
    - name: build
      runAfter: [compile]
      taskRef:
        name: maven
      taskSpec:
        steps: []
  finally:
    - name: fetch
      taskRef: git-clone
"#,
        );
        assert_eq!(
            validate("pipeline", "maven", &yaml),
            vec![
                ErrorKind::MissingField { field: "spec.tasks[0].taskRef".into() },
                ErrorKind::InvalidValue {
                    field: "spec.tasks[1]".into(),
                    reason: "taskRef and taskSpec are mutually exclusive".into()
                },
                ErrorKind::TypeMismatch {
                    field: "spec.finally[0].taskRef".into(),
                    expected: "a mapping",
                    found: "a string"
                },
                ErrorKind::InvalidValue {
                    field: "spec.finally[0]".into(),
                    reason: "duplicate pipeline task name \"fetch\"".into()
                },
                ErrorKind::InvalidValue {
                    field: "spec.tasks[1].runAfter[0]".into(),
                    reason: "unknown pipeline task \"compile\"".into()
                },
            ]
        );
    }

    #[test]
    fn test_run_after_is_scoped_to_pipeline_tasks() {
        let yaml = pipeline(
            r#"
  tasks:
    - name: build
      runAfter: [cleanup]
      taskRef:
        name: maven
  finally:
    - name: cleanup
      runAfter: [build]
      taskRef:
        name: cleanup
"#,
        );
        assert_eq!(
            validate("pipeline", "maven", &yaml),
            vec![
                ErrorKind::InvalidValue {
                    field: "spec.tasks[0].runAfter[0]".into(),
                    reason: "unknown pipeline task \"cleanup\"".into()
                },
                ErrorKind::InvalidValue {
                    field: "spec.finally[0].runAfter".into(),
                    reason: "finally tasks run after all pipeline tasks and cannot declare runAfter".into()
                },
            ]
        );
    }

    #[test]
    fn test_unknown_declared_kind_falls_back_to_path_kind() {
        let yaml = format!(
            "apiVersion: nope/v9\nkind: Tsk{HEADER}spec:\n  steps: []\n  bogus: 1\n"
        );
        assert_eq!(
            validate("task", "maven", &yaml),
            vec![
                ErrorKind::UnknownKind { kind: "Tsk".into() },
                ErrorKind::InvalidValue {
                    field: "apiVersion".into(),
                    reason: "\"nope/v9\" is not supported for Task, expected one of tekton.dev/v1beta1, tekton.dev/v1".into()
                },
                ErrorKind::UnknownField { field: "spec.bogus".into() },
                ErrorKind::InvalidValue {
                    field: "spec.steps".into(),
                    reason: "must contain at least one step".into()
                },
            ]
        );

        // no kind field at all
        let yaml = task("  steps: []\n").replace("kind: Task", "");
        let errors = validate("task", "maven", &yaml);
        assert_eq!(errors[0], ErrorKind::MissingField { field: "kind".into() });
        assert!(errors.contains(&ErrorKind::InvalidValue {
            field: "spec.steps".into(),
            reason: "must contain at least one step".into()
        }));
    }

    #[test]
    fn test_step_action() {
        let yaml = format!(
            "apiVersion: tekton.dev/v1alpha1\nkind: StepAction{HEADER}spec:\n  script: echo hi\n  steps: []\n"
        );
        assert_eq!(
            validate("stepaction", "maven", &yaml),
            vec![
                ErrorKind::UnknownField { field: "spec.steps".into() },
                ErrorKind::MissingField { field: "spec.image".into() },
            ]
        );
    }
}
