//! Flat identity diff over enumerated ordered collections

use crate::change::{ChangeSet, ItemChanges, ItemPath, Move, SectionChanges};
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use thiserror::Error;

/// Two elements of one snapshot share an identity, making matches ambiguous.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("duplicate identity at positions {first} and {second}")]
pub struct DuplicateIdentity<P: fmt::Display + fmt::Debug> {
    pub first: P,
    pub second: P,
}

/// Checks that every element of an enumerated snapshot has a unique identity.
///
/// The diff is only well-defined under that precondition; with true
/// duplicates the pairing degenerates to first-available in iteration order.
/// Callers that want to reject duplicates outright can run this before
/// diffing.
pub fn ensure_unique<P, T>(pairs: &[(P, T)]) -> Result<(), DuplicateIdentity<P>>
where
    P: Copy + fmt::Display + fmt::Debug,
    T: Hash + Eq,
{
    let mut seen: HashMap<&T, P> = HashMap::with_capacity(pairs.len());
    for (position, element) in pairs {
        if let Some(first) = seen.insert(element, *position) {
            return Err(DuplicateIdentity {
                first,
                second: *position,
            });
        }
    }
    Ok(())
}

/// Identity diff of two enumerated collections, O(n) via hashing.
///
/// An element found in both inputs at the same position is reported as
/// nothing at all; at a different position it becomes a move. Deletes keep
/// the iteration order of `old`, inserts the iteration order of `new`.
pub fn diff<P, T>(old: &[(P, T)], new: &[(P, T)]) -> ChangeSet<P>
where
    P: Copy + PartialEq,
    T: Hash + Eq,
{
    let old_positions: HashMap<&T, P> = old
        .iter()
        .map(|(position, element)| (element, *position))
        .collect();
    let new_positions: HashMap<&T, P> = new
        .iter()
        .map(|(position, element)| (element, *position))
        .collect();

    let mut changes = ChangeSet::new();
    for (old_position, element) in old {
        match new_positions.get(element) {
            Some(&new_position) if new_position != *old_position => {
                changes.moves.push(Move::new(*old_position, new_position));
            }
            Some(_) => {}
            None => changes.deletes.push(*old_position),
        }
    }
    for (new_position, element) in new {
        if !old_positions.contains_key(element) {
            changes.inserts.push(*new_position);
        }
    }
    changes
}

/// Identity diff with a caller-supplied equality predicate, O(n·m).
///
/// For element types without `Hash + Eq`, or when equality is contextual.
/// Same contract as [`diff`] otherwise.
pub fn diff_by<P, T, F>(old: &[(P, T)], new: &[(P, T)], eq: F) -> ChangeSet<P>
where
    P: Copy + PartialEq,
    F: Fn(&T, &T) -> bool,
{
    let mut changes = ChangeSet::new();
    for (old_position, element) in old {
        match position_of(element, new, &eq) {
            Some(new_position) if new_position != *old_position => {
                changes.moves.push(Move::new(*old_position, new_position));
            }
            Some(_) => {}
            None => changes.deletes.push(*old_position),
        }
    }
    for (new_position, element) in new {
        if position_of(element, old, &eq).is_none() {
            changes.inserts.push(*new_position);
        }
    }
    changes
}

fn position_of<P, T, F>(element: &T, pairs: &[(P, T)], eq: &F) -> Option<P>
where
    P: Copy,
    F: Fn(&T, &T) -> bool,
{
    pairs
        .iter()
        .find(|(_, candidate)| eq(candidate, element))
        .map(|(position, _)| *position)
}

/// Pairs every element with its index, the enumerated form [`diff`] consumes.
pub fn enumerated<T>(elements: &[T]) -> Vec<(usize, &T)> {
    elements.iter().enumerate().collect()
}

/// Flattens nested item arrays into `(path, element)` pairs, section-major
/// then item-minor.
pub fn flatten<I, A: AsRef<[I]>>(sections: &[A]) -> Vec<(ItemPath, &I)> {
    sections
        .iter()
        .enumerate()
        .flat_map(|(section, items)| {
            items
                .as_ref()
                .iter()
                .enumerate()
                .map(move |(item, element)| (ItemPath::new(section, item), element))
        })
        .collect()
}

impl SectionChanges {
    /// Section-level diff of two ordered section lists.
    pub fn between<S: Hash + Eq>(old: &[S], new: &[S]) -> SectionChanges {
        diff(&enumerated(old), &enumerated(new))
    }

    /// Predicate flavor of `between`.
    pub fn between_by<S>(old: &[S], new: &[S], eq: impl Fn(&S, &S) -> bool) -> SectionChanges {
        diff_by(&enumerated(old), &enumerated(new), |a, b| eq(a, b))
    }
}

impl ItemChanges {
    /// Item-level diff of two nested snapshots, matched across sections by
    /// flattened identity.
    pub fn between<I, A, B>(old: &[A], new: &[B]) -> ItemChanges
    where
        I: Hash + Eq,
        A: AsRef<[I]>,
        B: AsRef<[I]>,
    {
        diff(&flatten(old), &flatten(new))
    }

    /// Predicate flavor of `between`.
    pub fn between_by<I, A, B>(old: &[A], new: &[B], eq: impl Fn(&I, &I) -> bool) -> ItemChanges
    where
        A: AsRef<[I]>,
        B: AsRef<[I]>,
    {
        diff_by(&flatten(old), &flatten(new), |a, b| eq(a, b))
    }
}
