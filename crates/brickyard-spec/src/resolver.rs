//! Argument resolution
//!
//! Computes the argument list an intercepted call is finally made with.

use crate::brick::Args;
use crate::spec::ArgsStrategy;
use serde_json::Value;

/// Check whether a value is a key-value structure eligible for patching
///
/// `null`, arrays and scalars are not; arrays are replaced wholesale.
#[inline]
#[must_use]
pub fn is_plain_object(value: &Value) -> bool {
    value.is_object()
}

/// Merge registered arguments into call-time arguments
///
/// The result is as long as the longer of both lists. Per position:
/// - both sides objects: the call-time object is patched in place with every
///   registered key (registered keys win) and kept
/// - otherwise the registered value, unless it is missing or `null`, in
///   which case the call-time value (or `null` when that is missing too)
#[must_use]
pub fn merge_args(call: Args, overrides: &[Value]) -> Args {
    let len = call.len().max(overrides.len());
    let mut call = call.into_iter();

    (0..len)
        .map(|i| {
            let current = call.next();
            let registered = overrides.get(i);

            match (current, registered) {
                (Some(Value::Object(mut target)), Some(Value::Object(patch))) => {
                    for (key, value) in patch {
                        target.insert(key.clone(), value.clone());
                    }
                    Value::Object(target)
                }
                (_, Some(registered)) if !registered.is_null() => registered.clone(),
                (current, _) => current.unwrap_or(Value::Null),
            }
        })
        .collect()
}

/// Resolve the final argument list for `strategy`
#[must_use]
pub fn resolve_args(strategy: ArgsStrategy, call: Args, overrides: &[Value]) -> Args {
    match strategy {
        ArgsStrategy::Replace => overrides.to_vec(),
        ArgsStrategy::Merge => merge_args(call, overrides),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn scalar_override_wins() {
        let merged = merge_args(vec![json!("runtime")], &[json!("override")]);
        assert_eq!(merged, vec![json!("override")]);
    }

    #[test]
    fn object_is_patched() {
        let merged = merge_args(vec![json!({"x": 2, "y": 3})], &[json!({"x": 1})]);
        assert_eq!(merged, vec![json!({"x": 1, "y": 3})]);
    }

    #[test]
    fn patch_is_shallow() {
        let merged = merge_args(
            vec![json!({"nested": {"a": 1, "b": 2}})],
            &[json!({"nested": {"a": 9}})],
        );
        assert_eq!(merged, vec![json!({"nested": {"a": 9}})]);
    }

    #[test]
    fn longer_call_side_drives_length() {
        let merged = merge_args(vec![json!("a0"), json!("a1"), json!("a2")], &[json!("o0")]);
        assert_eq!(merged, vec![json!("o0"), json!("a1"), json!("a2")]);
    }

    #[test]
    fn longer_override_side_drives_length() {
        let merged = merge_args(vec![json!("a0")], &[json!(null), json!("o1"), json!(true)]);
        assert_eq!(merged, vec![json!("a0"), json!("o1"), json!(true)]);
    }

    #[test]
    fn null_override_falls_back() {
        let merged = merge_args(vec![json!(5)], &[Value::Null]);
        assert_eq!(merged, vec![json!(5)]);
    }

    #[test]
    fn null_override_past_call_end_is_null() {
        let merged = merge_args(Vec::new(), &[Value::Null]);
        assert_eq!(merged, vec![Value::Null]);
    }

    #[test]
    fn arrays_are_replaced_wholesale() {
        let merged = merge_args(vec![json!([1, 2, 3])], &[json!([9])]);
        assert_eq!(merged, vec![json!([9])]);
    }

    #[test]
    fn object_over_scalar_replaces() {
        let merged = merge_args(vec![json!(1)], &[json!({"x": 1})]);
        assert_eq!(merged, vec![json!({"x": 1})]);
    }

    #[test]
    fn scalar_over_object_replaces() {
        let merged = merge_args(vec![json!({"x": 1})], &[json!("flat")]);
        assert_eq!(merged, vec![json!("flat")]);
    }

    #[test]
    fn empty_both_sides() {
        assert!(merge_args(Vec::new(), &[]).is_empty());
    }

    #[test]
    fn replace_discards_call_arguments() {
        let resolved = resolve_args(
            ArgsStrategy::Replace,
            vec![json!("ignored"), json!(42)],
            &[json!("world")],
        );
        assert_eq!(resolved, vec![json!("world")]);
    }

    #[test]
    fn plain_object_classification() {
        assert!(is_plain_object(&json!({})));
        assert!(!is_plain_object(&json!([])));
        assert!(!is_plain_object(&Value::Null));
        assert!(!is_plain_object(&json!("s")));
    }

    fn scalar() -> impl Strategy<Value = Value> {
        prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::from),
            any::<i64>().prop_map(Value::from),
            "[a-z]{0,8}".prop_map(Value::from),
        ]
    }

    proptest! {
        #[test]
        fn merged_length_is_max(
            call in prop::collection::vec(scalar(), 0..8),
            overrides in prop::collection::vec(scalar(), 0..8),
        ) {
            let expected = call.len().max(overrides.len());
            prop_assert_eq!(merge_args(call, &overrides).len(), expected);
        }

        #[test]
        fn non_null_scalar_overrides_win(
            call in prop::collection::vec(scalar(), 0..8),
            overrides in prop::collection::vec(scalar(), 0..8),
        ) {
            let merged = merge_args(call.clone(), &overrides);
            for (i, value) in merged.iter().enumerate() {
                match overrides.get(i) {
                    Some(o) if !o.is_null() => prop_assert_eq!(value, o),
                    _ => prop_assert_eq!(value, call.get(i).unwrap_or(&Value::Null)),
                }
            }
        }

        #[test]
        fn merging_nothing_is_identity(call in prop::collection::vec(scalar(), 0..8)) {
            prop_assert_eq!(merge_args(call.clone(), &[]), call);
        }
    }
}
