//! Applies a section-level batch to the old per-section item arrays

use crate::change::SectionChanges;
use std::collections::{HashMap, HashSet};

/// Rebuilds the item-array layout as it stands after section changes have
/// been applied but before item changes have.
///
/// The result has the section cardinality and order of the new snapshot
/// while every surviving section still carries its old items: a moved
/// section brings its source array along, an inserted section starts empty,
/// and every other destination consumes the next old array (in ascending
/// original order) that was neither deleted nor used as a move source.
///
/// # Panics
///
/// Panics when `changes` does not account for every old section exactly
/// once. That cannot happen for a batch produced by
/// `SectionChanges::between` over the matching snapshots.
pub fn apply_section_changes<'a, I, A: AsRef<[I]>>(
    old: &'a [A],
    changes: &SectionChanges,
) -> Vec<&'a [I]> {
    let consumed: HashSet<usize> = changes
        .deletes
        .iter()
        .chain(changes.moves.iter().map(|m| &m.source))
        .copied()
        .collect();
    let moved_from: HashMap<usize, usize> = changes
        .moves
        .iter()
        .map(|m| (m.destination, m.source))
        .collect();
    let inserted: HashSet<usize> = changes.inserts.iter().copied().collect();

    let new_len = old.len() + changes.inserts.len() - changes.deletes.len();
    let mut carried = (0..old.len()).filter(|index| !consumed.contains(index));

    let mut patched: Vec<&[I]> = Vec::with_capacity(new_len);
    for destination in 0..new_len {
        if let Some(&source) = moved_from.get(&destination) {
            patched.push(old[source].as_ref());
        } else if inserted.contains(&destination) {
            patched.push(&[]);
        } else {
            let source = carried
                .next()
                .expect("batch inconsistency: no carried-over section left for destination");
            patched.push(old[source].as_ref());
        }
    }
    assert!(
        carried.next().is_none(),
        "batch inconsistency: old sections left unconsumed"
    );
    patched
}
