//! Safe accessors over an untrusted workflow document.
//!
//! Every accessor returns `None` on a type mismatch instead of failing.

use super::types::BranchFilter;
use serde_yaml::Value;

/// Look up a string key in a mapping. Non-mappings yield `None`.
pub(crate) fn field<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
    value.as_mapping()?.get(key)
}

/// Whether a mapping contains `key`, regardless of its value (null included).
pub(crate) fn has_key(value: &Value, key: &str) -> bool {
    value
        .as_mapping()
        .is_some_and(|mapping| mapping.contains_key(key))
}

/// Iterate over the values of a mapping. Non-mappings yield nothing.
pub(crate) fn mapping_values(value: &Value) -> impl Iterator<Item = &Value> {
    value.as_mapping().into_iter().flat_map(|m| m.values())
}

/// Iterate over the items of a sequence. Non-sequences yield nothing.
pub(crate) fn sequence_items(value: &Value) -> impl Iterator<Item = &Value> {
    value.as_sequence().into_iter().flatten()
}

/// Read a trigger's `branches` field as a normalized filter.
///
/// `trigger` may be null or any other non-mapping, in which case every
/// branch is admitted.
pub(crate) fn branch_filter(trigger: &Value) -> BranchFilter {
    match field(trigger, "branches") {
        Some(Value::String(pattern)) => BranchFilter::Patterns(vec![pattern.clone()]),
        Some(Value::Sequence(items)) => BranchFilter::Patterns(
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect(),
        ),
        _ => BranchFilter::All,
    }
}

/// Whether a trigger carries an explicit string or sequence `branches` filter.
pub(crate) fn has_branch_filter(trigger: &Value) -> bool {
    matches!(
        field(trigger, "branches"),
        Some(Value::String(_)) | Some(Value::Sequence(_))
    )
}
