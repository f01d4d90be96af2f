//! Change representation for batch update operations

use serde::{Deserialize, Serialize};
use std::fmt;

/// Location of an item inside a nested snapshot, section-major.
///
/// Ordering is derived from field order: section first, then item, so sorting
/// a list of paths yields the enumeration order of the flattened snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ItemPath {
    pub section: usize,
    pub item: usize,
}

impl ItemPath {
    pub fn new(section: usize, item: usize) -> Self {
        Self { section, item }
    }
}

impl fmt::Display for ItemPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.section, self.item)
    }
}

/// An element present in both snapshots but at different positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move<P> {
    /// Position in the old snapshot.
    pub source: P,
    /// Position in the new snapshot.
    pub destination: P,
}

impl<P> Move<P> {
    pub fn new(source: P, destination: P) -> Self {
        Self {
            source,
            destination,
        }
    }
}

impl<P: fmt::Display> fmt::Display for Move<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} → {}", self.source, self.destination)
    }
}

/// The delete/insert/move batch turning one ordered collection into another.
///
/// `deletes` and move sources index the old collection; `inserts` and move
/// destinations index the new one. A position never appears in more than one
/// of {`deletes`, move sources}, nor in more than one of {`inserts`, move
/// destinations}. Elements whose position is identical in both snapshots are
/// not reported at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeSet<P> {
    pub deletes: Vec<P>,
    pub inserts: Vec<P>,
    pub moves: Vec<Move<P>>,
}

/// Section-level batch, positions are section indices.
pub type SectionChanges = ChangeSet<usize>;

/// Item-level batch, positions are [`ItemPath`]s.
pub type ItemChanges = ChangeSet<ItemPath>;

impl<P> ChangeSet<P> {
    pub fn new() -> Self {
        Self {
            deletes: Vec::new(),
            inserts: Vec::new(),
            moves: Vec::new(),
        }
    }

    /// True when the two snapshots already agree.
    pub fn is_empty(&self) -> bool {
        self.deletes.is_empty() && self.inserts.is_empty() && self.moves.is_empty()
    }

    /// Total number of recorded operations.
    pub fn len(&self) -> usize {
        self.deletes.len() + self.inserts.len() + self.moves.len()
    }
}

impl<P> Default for ChangeSet<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: fmt::Display> fmt::Display for ChangeSet<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "deletes: [{}]", join(&self.deletes))?;
        write!(f, ", inserts: [{}]", join(&self.inserts))?;
        write!(f, ", moves: [{}]", join(&self.moves))
    }
}

fn join<T: fmt::Display>(values: &[T]) -> String {
    values
        .iter()
        .map(T::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
