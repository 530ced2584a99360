//! Enrollment Tests
//!
//! End-to-end behavior of registration followed by enrollment.

use brickyard_core::prelude::*;
use brickyard_test_utils::{args, echo, returns, CallRecorder};
use pretty_assertions::assert_eq;
use serde_json::json;

fn origin_fn() -> Brick {
    Brick::new(|_| json!("error!"))
}

#[test]
fn test_enrolled_app_works_without_changes() {
    let brickyard = initialize(Some(begin_registration().complete()));
    let reexport = brickyard.enroll([("origin_fn", origin_fn())]);

    assert_eq!(
        reexport.call("origin_fn", args!["http://localhost/will-fail", {}]),
        Some(json!("error!"))
    );
}

#[test]
fn test_enrolled_app_changes_implementation() {
    let token = begin_registration()
        .intercept("origin_fn", InterceptorSpec::func(returns(json!("success!"))))
        .and_then(|h| h.intercept("something", InterceptorSpec::replace_args(args!["no-such function"])))
        .unwrap()
        .complete();
    let reexport = initialize(Some(token)).enroll([("origin_fn", origin_fn())]);

    assert_eq!(
        reexport.call("origin_fn", args!["http://localhost/will-fail", {}]),
        Some(json!("success!"))
    );
}

#[test]
fn test_identity_passthrough() {
    let f = origin_fn();
    let token = begin_registration()
        .intercept("other", InterceptorSpec::func(returns(json!(1))))
        .unwrap()
        .complete();
    let enrolled = initialize(Some(token)).enroll([("origin_fn", f.clone())]);

    assert!(enrolled.get("origin_fn").unwrap().ptr_eq(&f));
}

#[test]
fn test_function_replace_precedence() {
    let f = CallRecorder::returning(json!("f"));
    let g = CallRecorder::returning(json!("g"));
    let g_brick = g.brick();

    let token = begin_registration()
        .intercept("id", InterceptorSpec::func(g_brick.clone()))
        .unwrap()
        .complete();
    let enrolled = initialize(Some(token)).enroll([("id", f.brick())]);
    let wrapped = enrolled.get("id").unwrap();

    assert!(wrapped.ptr_eq(&g_brick));
    assert_eq!(wrapped.call(args!["a", 1]), json!("g"));
    assert_eq!(f.call_count(), 0);
    assert_eq!(g.calls(), vec![args!["a", 1]]);
}

#[test]
fn test_replace_args_strategy() {
    let greet = CallRecorder::returning(json!("hi"));
    let token = begin_registration()
        .intercept("greet", InterceptorSpec::replace_args(args!["world"]))
        .unwrap()
        .complete();
    let enrolled = initialize(Some(token)).enroll([("greet", greet.brick())]);

    enrolled.call("greet", args!["ignored", 42]);
    enrolled.call("greet", Vec::new());

    assert_eq!(greet.calls(), vec![args!["world"], args!["world"]]);
}

#[test]
fn test_merge_args_scalar_override_wins() {
    let token = begin_registration()
        .intercept("f", InterceptorSpec::merge_args(args!["override"]))
        .unwrap()
        .complete();
    let enrolled = initialize(Some(token)).enroll([("f", echo())]);

    assert_eq!(enrolled.call("f", args!["runtime"]), Some(json!(["override"])));
}

#[test]
fn test_merge_args_object_patch() {
    let token = begin_registration()
        .intercept("f", InterceptorSpec::merge_args(args![{"x": 1}]))
        .unwrap()
        .complete();
    let enrolled = initialize(Some(token)).enroll([("f", echo())]);

    assert_eq!(
        enrolled.call("f", args![{"x": 2, "y": 3}]),
        Some(json!([{"x": 1, "y": 3}]))
    );
}

#[test]
fn test_merge_args_length_driven_by_longer_side() {
    let token = begin_registration()
        .intercept("f", InterceptorSpec::merge_args(args!["o0"]))
        .unwrap()
        .complete();
    let enrolled = initialize(Some(token)).enroll([("f", echo())]);

    assert_eq!(
        enrolled.call("f", args!["a0", "a1", "a2"]),
        Some(json!(["o0", "a1", "a2"]))
    );
}

#[test]
fn test_merge_with_replacement_function() {
    let replacement = CallRecorder::returning(json!("patched"));
    let token = begin_registration()
        .intercept(
            "connect",
            InterceptorSpec::merge_args(args![null, {"timeout": 5}]).with_function(replacement.brick()),
        )
        .unwrap()
        .complete();
    let enrolled = initialize(Some(token)).enroll([("connect", origin_fn())]);

    assert_eq!(
        enrolled.call("connect", args!["db://primary", {"timeout": 30, "tls": true}]),
        Some(json!("patched"))
    );
    assert_eq!(
        replacement.last_call(),
        Some(args!["db://primary", {"timeout": 5, "tls": true}])
    );
}

#[test]
fn test_uniqueness_fails_before_enrollment() {
    let result = begin_registration()
        .intercept("id", InterceptorSpec::func(echo()))
        .and_then(|h| h.intercept("id", InterceptorSpec::merge_args(args![1])));

    assert!(matches!(
        result,
        Err(ConfigurationError::DuplicateIdentifier { ref id }) if id == "id"
    ));
}

#[test]
fn test_isolation_between_registrations() {
    let first = begin_registration()
        .intercept("some_fn", InterceptorSpec::func(returns(json!("first"))))
        .unwrap()
        .complete();
    let second = begin_registration()
        .intercept("some_fn", InterceptorSpec::func(returns(json!("second"))))
        .unwrap()
        .complete();
    let untouched = begin_registration().complete();

    let candidate = || [("some_fn", returns(json!("origin")))];
    let a = initialize(Some(first)).enroll(candidate());
    let b = initialize(Some(second)).enroll(candidate());
    let c = initialize(Some(untouched)).enroll(candidate());

    assert_eq!(a.call("some_fn", Vec::new()), Some(json!("first")));
    assert_eq!(b.call("some_fn", Vec::new()), Some(json!("second")));
    assert_eq!(c.call("some_fn", Vec::new()), Some(json!("origin")));
}

#[test]
fn test_empty_registry_returns_candidates_unchanged() {
    let f = origin_fn();
    let g = echo();
    let enrolled = initialize(None).enroll([("f", f.clone()), ("g", g.clone())]);

    assert_eq!(enrolled.len(), 2);
    assert!(enrolled.get("f").unwrap().ptr_eq(&f));
    assert!(enrolled.get("g").unwrap().ptr_eq(&g));
}

#[test]
fn test_config_load_failure_falls_back() {
    let failing = |specifier: &str| -> Result<Option<CompletionToken>, ConfigLoadError> {
        Err(ConfigLoadError::NotFound(specifier.to_string()))
    };
    let f = origin_fn();

    let from_bad = initialize_with(&failing, "./no/such/interceptor.json").enroll([("f", f.clone())]);
    let from_none = initialize(None).enroll([("f", f.clone())]);

    assert!(from_bad.get("f").unwrap().ptr_eq(&f));
    assert!(from_none.get("f").unwrap().ptr_eq(&f));
}

#[test]
fn test_same_candidate_under_two_names() {
    let hi = CallRecorder::returning(json!("hi"));
    let token = begin_registration()
        .intercept("hi", InterceptorSpec::replace_args(args!["(merged args)"]))
        .unwrap()
        .complete();
    let bricks = initialize(Some(token)).enroll([("hi", hi.brick()), ("hi_origin", hi.brick())]);

    bricks.call("hi", args!["bob"]);
    bricks.call("hi_origin", args!["bob"]);

    assert_eq!(hi.calls(), vec![args!["(merged args)"], args!["bob"]]);
}

#[test]
fn test_repeated_name_keeps_last_candidate_in_first_position() {
    let first = returns(json!("first"));
    let last = returns(json!("last"));
    let enrolled = initialize(None).enroll([("f", first), ("g", echo()), ("f", last.clone())]);

    assert_eq!(enrolled.names(), vec!["f", "g"]);
    assert!(enrolled.get("f").unwrap().ptr_eq(&last));
    assert_eq!(enrolled.call("f", args![]), Some(json!("last")));
}

#[test]
fn test_enrolled_functions_cross_threads() {
    let token = begin_registration()
        .intercept("f", InterceptorSpec::merge_args(args![{"worker": true}]))
        .unwrap()
        .complete();
    let enrolled = initialize(Some(token)).enroll([("f", echo())]);
    let f = enrolled.get("f").unwrap().clone();

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let f = f.clone();
            std::thread::spawn(move || f.call(args![{ "id": i }]))
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        assert_eq!(handle.join().unwrap(), json!([{"id": i, "worker": true}]));
    }
}
