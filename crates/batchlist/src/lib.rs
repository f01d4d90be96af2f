//! Batchlist - two-phase batch updates for sectioned list UIs
//!
//! Computes the delete/insert/move batches between two nested snapshots and
//! drives a consumer through the sections-then-items protocol that keeps a
//! table or grid widget's indices valid across both transactions: section
//! changes are applied first under an intermediate per-section item count,
//! item changes second over the fully updated snapshot.

pub mod source;

pub use batchlist_core::{
    apply_section_changes, diff, diff_by, ensure_unique, ChangeSet, DuplicateIdentity,
    ItemChanges, ItemPath, Move, SectionChanges,
};
pub use source::{BatchTarget, DataSource};
