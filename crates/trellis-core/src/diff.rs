//! Keyed diffing of ordered child lists.
//!
//! One [`diff`] pass compares the previously tracked key list against the
//! next one supplied by the host and splits the keys into added, retained,
//! and removed sets. Added and retained keys preserve their relative order
//! from `next`; removed keys preserve their relative order from `previous`.
//! The function is pure: it never suspends and never touches coordinator
//! state.

use std::fmt;
use std::hash::Hash;

use crate::collections::map::HashSet;
use crate::error::TransitionError;

/// Result of one diff pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyedDiff<K> {
    /// Keys present in `next` but not `previous`, in `next` order.
    pub added: Vec<K>,
    /// Keys present in `previous` but not `next`, in `previous` order.
    pub removed: Vec<K>,
    /// Keys present in both, in `next` order.
    pub retained: Vec<K>,
}

/// Computes the added/retained/removed split between two ordered key lists.
///
/// Fails with [`TransitionError::DuplicateKey`] if any key appears more than
/// once within either input list.
pub fn diff<K>(previous: &[K], next: &[K]) -> Result<KeyedDiff<K>, TransitionError>
where
    K: Clone + Eq + Hash + fmt::Debug,
{
    let previous_set = unique_set(previous)?;
    let next_set = unique_set(next)?;

    let mut added = Vec::new();
    let mut retained = Vec::new();
    for key in next {
        if previous_set.contains(key) {
            retained.push(key.clone());
        } else {
            added.push(key.clone());
        }
    }

    let removed = previous
        .iter()
        .filter(|key| !next_set.contains(*key))
        .cloned()
        .collect();

    Ok(KeyedDiff {
        added,
        removed,
        retained,
    })
}

fn unique_set<K>(keys: &[K]) -> Result<HashSet<&K>, TransitionError>
where
    K: Eq + Hash + fmt::Debug,
{
    let mut set = HashSet::with_capacity(keys.len());
    for key in keys {
        if !set.insert(key) {
            return Err(TransitionError::duplicate_key(key));
        }
    }
    Ok(set)
}

#[cfg(test)]
#[path = "tests/diff_tests.rs"]
mod tests;
