use super::*;

#[test]
fn disjoint_lists_are_all_added_and_removed() {
    let result = diff(&["a", "b"], &["c", "d"]).unwrap();
    assert_eq!(result.added, ["c", "d"]);
    assert_eq!(result.removed, ["a", "b"]);
    assert!(result.retained.is_empty());
}

#[test]
fn identical_lists_are_all_retained() {
    let result = diff(&[1, 2, 3], &[1, 2, 3]).unwrap();
    assert!(result.added.is_empty());
    assert!(result.removed.is_empty());
    assert_eq!(result.retained, [1, 2, 3]);
}

#[test]
fn added_and_retained_follow_next_order() {
    // "b" moved to the front; the diff reports order as supplied by `next`.
    let result = diff(&["a", "b"], &["b", "c", "a"]).unwrap();
    assert_eq!(result.added, ["c"]);
    assert_eq!(result.retained, ["b", "a"]);
}

#[test]
fn removed_follows_previous_order() {
    let result = diff(&["a", "b", "c", "d"], &["b"]).unwrap();
    assert_eq!(result.removed, ["a", "c", "d"]);
}

#[test]
fn empty_inputs_diff_cleanly() {
    let result = diff::<u32>(&[], &[]).unwrap();
    assert!(result.added.is_empty());
    assert!(result.removed.is_empty());
    assert!(result.retained.is_empty());
}

#[test]
fn duplicate_in_next_is_rejected() {
    let err = diff(&["a"], &["x", "x"]).unwrap_err();
    assert_eq!(
        err,
        TransitionError::DuplicateKey {
            key: "\"x\"".into()
        }
    );
}

#[test]
fn duplicate_in_previous_is_rejected() {
    assert!(matches!(
        diff(&["a", "a"], &[]),
        Err(TransitionError::DuplicateKey { .. })
    ));
}
