//! # Record Projection
//!
//! Loads a cached dataset and normalizes its raw, source-shaped records
//! into the caller-declared field set. The field set is configuration
//! driven and not known at compile time, so both the raw record and the
//! projected action are loosely-typed string-keyed mappings with explicit
//! null for declared-but-missing fields.
//!
//! Records whose resolved `project` field names a sandbox project are
//! excluded. The filter is applied identically to both source kinds and
//! never raises: a record with no resolvable project value is retained.

use std::collections::BTreeMap;
use std::path::Path;

use serde_json::{Map, Value};
use thiserror::Error;

use crate::sources::SourceKind;

/// Configuration mapping of canonical output field name to source record
/// key. An alias may contain one `.` to descend into a nested object
/// (`owner.gerrit_id`).
pub type FieldAliasMap = BTreeMap<String, String>;

/// A normalized record: canonical field names to values pulled by alias,
/// with `Value::Null` for aliases the raw record did not carry.
pub type ProjectedAction = Map<String, Value>;

/// The reserved alias used for the content-based exclusion filter.
pub const PROJECT_FIELD: &str = "project";

/// Substring marking a project as sandbox/test; matching records are
/// dropped from every report.
pub const SANDBOX_MARKER: &str = "sandbox";

/// Errors raised while reading or reshaping a cached dataset.
#[derive(Debug, Error)]
pub enum ProjectError {
    /// The cached file could not be read.
    #[error("I/O error occurred: {0}")]
    Io(#[from] std::io::Error),

    /// The cached file is not valid YAML.
    #[error("malformed cached payload: {0}")]
    Yaml(#[from] serde_yml::Error),

    /// The payload lacks the expected top-level key. Fatal: the file is
    /// authoritative, so re-fetching would not help.
    #[error("cached payload is missing the expected '{0}' key")]
    MissingKey(&'static str),

    /// The payload decoded but does not have the source's documented shape.
    #[error("cached payload has an unexpected shape: {0}")]
    Shape(String),
}

/// # Load Actions
///
/// Reads the cached dataset at `path`, extracts the raw record list for
/// `kind` (activity records live under the `activity` key; pending-review
/// payloads are the record list itself), and projects every surviving
/// record through `fields`.
pub fn load_actions(
    path: &Path,
    fields: &FieldAliasMap,
    kind: SourceKind,
) -> Result<Vec<ProjectedAction>, ProjectError> {
    let text = std::fs::read_to_string(path)?;
    let payload: Value = serde_yml::from_str(&text)?;
    let records = extract_records(&payload, kind)?;
    Ok(project_records(records, fields))
}

/// Pulls the raw record list out of a decoded payload.
fn extract_records(payload: &Value, kind: SourceKind) -> Result<&Vec<Value>, ProjectError> {
    match kind {
        SourceKind::Activity => payload
            .get("activity")
            .ok_or(ProjectError::MissingKey("activity"))?
            .as_array()
            .ok_or_else(|| ProjectError::Shape("'activity' is not a list".into())),
        SourceKind::PendingReview => payload
            .as_array()
            .ok_or_else(|| ProjectError::Shape("top-level value is not a list".into())),
    }
}

/// # Project Records
///
/// Applies the sandbox filter and the alias projection to `records`,
/// preserving input order. Exclusion is a pure filter; retained records are
/// reshaped but their values are untouched.
pub fn project_records(records: &[Value], fields: &FieldAliasMap) -> Vec<ProjectedAction> {
    records
        .iter()
        .filter(|record| !is_sandbox(record, fields))
        .map(|record| project_one(record, fields))
        .collect()
}

/// Whether the record's alias-resolved project value marks it as sandbox.
fn is_sandbox(record: &Value, fields: &FieldAliasMap) -> bool {
    let Some(alias) = fields.get(PROJECT_FIELD) else {
        return false;
    };
    matches!(
        resolve_alias(record, alias),
        Some(Value::String(project)) if project.contains(SANDBOX_MARKER)
    )
}

/// Builds one projected action, substituting null for missing aliases.
fn project_one(record: &Value, fields: &FieldAliasMap) -> ProjectedAction {
    fields
        .iter()
        .map(|(name, alias)| {
            let value = resolve_alias(record, alias).cloned().unwrap_or(Value::Null);
            (name.clone(), value)
        })
        .collect()
}

/// Resolves an alias against a record: a flat key lookup, or one level of
/// dotted descent into a nested object.
fn resolve_alias<'v>(record: &'v Value, alias: &str) -> Option<&'v Value> {
    match alias.split_once('.') {
        Some((head, tail)) => record.get(head)?.get(tail),
        None => record.get(alias),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn aliases(pairs: &[(&str, &str)]) -> FieldAliasMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn projection_maps_declared_aliases_exactly() {
        let fields = aliases(&[("type", "kind"), ("user", "owner_id")]);
        let records = vec![json!({"kind": "review", "owner_id": "alice", "noise": 1})];
        let projected = project_records(&records, &fields);
        assert_eq!(projected.len(), 1);
        assert_eq!(projected[0].get("type"), Some(&json!("review")));
        assert_eq!(projected[0].get("user"), Some(&json!("alice")));
        // unmapped raw keys are dropped
        assert_eq!(projected[0].len(), 2);
    }

    #[test]
    fn missing_alias_projects_to_explicit_null() {
        let fields = aliases(&[("type", "kind"), ("user", "owner_id")]);
        let records = vec![json!({"kind": "commit"})];
        let projected = project_records(&records, &fields);
        assert_eq!(projected[0].get("user"), Some(&Value::Null));
    }

    #[test]
    fn sandbox_records_are_excluded() {
        let fields = aliases(&[("type", "kind"), ("project", "module")]);
        let records = vec![
            json!({"kind": "review", "module": "nova"}),
            json!({"kind": "review", "module": "sandbox-test"}),
            json!({"kind": "commit", "module": "neutron"}),
        ];
        let projected = project_records(&records, &fields);
        assert_eq!(projected.len(), 2);
        assert_eq!(projected[0].get("project"), Some(&json!("nova")));
        assert_eq!(projected[1].get("project"), Some(&json!("neutron")));
    }

    #[test]
    fn record_without_project_key_is_retained() {
        let fields = aliases(&[("type", "kind"), ("project", "module")]);
        let records = vec![json!({"kind": "review"})];
        let projected = project_records(&records, &fields);
        assert_eq!(projected.len(), 1);
        assert_eq!(projected[0].get("project"), Some(&Value::Null));
    }

    #[test]
    fn exclusion_preserves_surviving_order() {
        let fields = aliases(&[("n", "n"), ("project", "module")]);
        let records: Vec<Value> = (0..6)
            .map(|n| {
                let module = if n % 2 == 0 { "real" } else { "sandbox" };
                json!({"n": n, "module": module})
            })
            .collect();
        let projected = project_records(&records, &fields);
        let order: Vec<i64> = projected
            .iter()
            .map(|a| a.get("n").and_then(Value::as_i64).unwrap())
            .collect();
        assert_eq!(order, vec![0, 2, 4]);
    }

    #[test]
    fn dotted_alias_descends_one_level() {
        let fields = aliases(&[("user", "owner.gerrit_id")]);
        let records = vec![json!({"owner": {"gerrit_id": "alice", "_account_id": 7}})];
        let projected = project_records(&records, &fields);
        assert_eq!(projected[0].get("user"), Some(&json!("alice")));
    }

    #[test]
    fn activity_payload_missing_key_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.yaml");
        std::fs::write(&path, "events: []\n").unwrap();
        let err = load_actions(&path, &FieldAliasMap::new(), SourceKind::Activity);
        assert!(matches!(err, Err(ProjectError::MissingKey("activity"))));
    }

    #[test]
    fn pending_payload_is_a_bare_list() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("alice.open.yaml");
        std::fs::write(&path, "- subject: fix thing\n  project: nova\n").unwrap();
        let fields = aliases(&[("subject", "subject")]);
        let projected = load_actions(&path, &fields, SourceKind::PendingReview).unwrap();
        assert_eq!(projected[0].get("subject"), Some(&json!("fix thing")));
    }
}
