//! # Summary Counting
//!
//! Folds the projected activity actions into a per-type count map, then
//! appends the number of pending-review items under the `wip` key. The map
//! is ordered so rendered output is reproducible run to run.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::report::actions::ProjectedAction;

/// Key under which the pending-review count is reported.
pub const WIP_KEY: &str = "wip";

/// Fallback bucket for actions whose projected `type` is absent or not a
/// string.
const UNKNOWN_TYPE: &str = "unknown";

/// Counts `actions` by their projected `type` field and records the size of
/// `pending` under [`WIP_KEY`].
pub fn summarize(
    actions: &[ProjectedAction],
    pending: &[ProjectedAction],
) -> BTreeMap<String, u64> {
    let mut summary = BTreeMap::new();
    for action in actions {
        let kind = action
            .get("type")
            .and_then(Value::as_str)
            .unwrap_or(UNKNOWN_TYPE)
            .to_string();
        *summary.entry(kind).or_insert(0) += 1;
    }
    summary.insert(WIP_KEY.to_string(), pending.len() as u64);
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn action(kind: Option<&str>) -> ProjectedAction {
        let mut map = ProjectedAction::new();
        match kind {
            Some(k) => map.insert("type".into(), json!(k)),
            None => map.insert("type".into(), Value::Null),
        };
        map
    }

    #[test]
    fn counts_by_type_and_appends_wip() {
        let actions = vec![
            action(Some("review")),
            action(Some("commit")),
            action(Some("review")),
        ];
        let pending = vec![action(Some("review"))];
        let summary = summarize(&actions, &pending);
        assert_eq!(summary.get("review"), Some(&2));
        assert_eq!(summary.get("commit"), Some(&1));
        assert_eq!(summary.get(WIP_KEY), Some(&1));
    }

    #[test]
    fn null_type_lands_in_the_unknown_bucket() {
        let summary = summarize(&[action(None)], &[]);
        assert_eq!(summary.get("unknown"), Some(&1));
        assert_eq!(summary.get(WIP_KEY), Some(&0));
    }
}
