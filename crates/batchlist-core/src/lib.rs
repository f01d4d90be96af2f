//! Batchlist Core - identity diffing for sectioned collections
//!
//! This library computes the delete/insert/move batches that transform one
//! ordered collection into another, at the section level and at the
//! flattened item level, plus the section-patch step that keeps the two
//! levels consistent across a two-phase UI update.

pub mod change;
pub mod diff;
pub mod patch;

pub use change::{ChangeSet, ItemChanges, ItemPath, Move, SectionChanges};
pub use diff::{diff, diff_by, ensure_unique, enumerated, flatten, DuplicateIdentity};
pub use patch::apply_section_changes;
