//! Two-phase update coordinator for a sectioned data source

use batchlist_core::{apply_section_changes, ItemChanges, ItemPath, SectionChanges};
use std::hash::Hash;
use tracing::debug;

/// Consumer of the two batches produced by [`DataSource::update`].
///
/// Implemented by whatever owns the rendering surface, typically an adapter
/// around a table or grid widget. Each hook must be applied as one atomic
/// visual transaction on that surface; `source` answers count and content
/// queries valid for the phase it is passed in. Panics raised inside a hook
/// propagate to the `update` caller.
pub trait BatchTarget<S, I> {
    /// Applies section-level deletes/inserts/moves.
    ///
    /// `item_counts` is the per-section item count of the intermediate
    /// layout: section structure already matches the new snapshot, item
    /// content does not yet. Any count query the surface issues during this
    /// transaction must be answered from it — `source` does so too.
    fn apply_sections(
        &mut self,
        source: &DataSource<S, I>,
        changes: &SectionChanges,
        item_counts: &[usize],
    );

    /// Applies item-level deletes/inserts/moves. `source` now answers
    /// entirely from the new snapshot.
    fn apply_items(&mut self, source: &DataSource<S, I>, changes: &ItemChanges);
}

/// Holds the current nested snapshot and drives a [`BatchTarget`] through
/// the sections-then-items update protocol.
///
/// Everything is synchronous and single-threaded: both phases run to
/// completion inside [`DataSource::update`], on whichever thread owns the
/// consumer's rendering surface. `update` is not reentrant — hooks only see
/// a shared reference, so a nested `update` cannot even be expressed.
pub struct DataSource<S, I> {
    sections: Vec<(S, Vec<I>)>,
    midway_item_counts: Option<Vec<usize>>,
}

impl<S, I> DataSource<S, I> {
    pub fn new() -> Self {
        Self {
            sections: Vec::new(),
            midway_item_counts: None,
        }
    }

    /// Section count of the layout the consumer currently sees: the
    /// intermediate layout while the section phase is in flight, the live
    /// snapshot otherwise.
    pub fn number_of_sections(&self) -> usize {
        match &self.midway_item_counts {
            Some(counts) => counts.len(),
            None => self.sections.len(),
        }
    }

    /// Item count for one section, with the same dual-mode rule as
    /// [`DataSource::number_of_sections`].
    pub fn number_of_items(&self, section: usize) -> usize {
        match &self.midway_item_counts {
            Some(counts) => counts[section],
            None => self.sections[section].1.len(),
        }
    }

    /// Section value at `index` in the live snapshot.
    ///
    /// The sections list is replaced eagerly at the start of `update`, so
    /// from inside either hook this already is the new snapshot's section.
    pub fn section(&self, index: usize) -> &S {
        &self.sections[index].0
    }

    /// Item at `path` in the live snapshot.
    ///
    /// # Panics
    ///
    /// Panics during the section phase of an update: between the two
    /// transactions the item layout is neither old nor new, and no consumer
    /// is expected to read item content there.
    pub fn item(&self, path: ItemPath) -> &I {
        assert!(
            self.midway_item_counts.is_none(),
            "item {path} read during the section phase of a batch update"
        );
        &self.sections[path.section].1[path.item]
    }

    /// Runs both phases against `target`: section batch under the
    /// intermediate counts, then item batch over the live snapshot.
    fn run_phases<T>(
        &mut self,
        section_changes: SectionChanges,
        item_changes: ItemChanges,
        midway_counts: Vec<usize>,
        target: &mut T,
    ) where
        T: BatchTarget<S, I> + ?Sized,
    {
        debug!(
            deletes = section_changes.deletes.len(),
            inserts = section_changes.inserts.len(),
            moves = section_changes.moves.len(),
            "applying section changes"
        );
        self.midway_item_counts = Some(midway_counts);
        let counts = self.midway_item_counts.as_deref().unwrap_or(&[]);
        target.apply_sections(self, &section_changes, counts);
        self.midway_item_counts = None;

        debug!(
            deletes = item_changes.deletes.len(),
            inserts = item_changes.inserts.len(),
            moves = item_changes.moves.len(),
            "applying item changes"
        );
        target.apply_items(self, &item_changes);
    }
}

impl<S, I> Default for DataSource<S, I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, I> DataSource<S, I>
where
    S: Hash + Eq,
    I: Hash + Eq,
{
    /// Replaces the held snapshot with `new_sections` and drives `target`
    /// through both update phases.
    ///
    /// Identities must be unique within each snapshot level; with true
    /// duplicates the produced batches are unspecified (debug builds reject
    /// them outright).
    pub fn update<T>(&mut self, new_sections: Vec<(S, Vec<I>)>, target: &mut T)
    where
        T: BatchTarget<S, I> + ?Sized,
    {
        let old = std::mem::replace(&mut self.sections, new_sections);

        let old_keys: Vec<&S> = old.iter().map(|(section, _)| section).collect();
        let new_keys: Vec<&S> = self.sections.iter().map(|(section, _)| section).collect();
        let old_items: Vec<&[I]> = old.iter().map(|(_, items)| items.as_slice()).collect();
        let new_items: Vec<&[I]> = self
            .sections
            .iter()
            .map(|(_, items)| items.as_slice())
            .collect();

        #[cfg(debug_assertions)]
        {
            use batchlist_core::{ensure_unique, enumerated, flatten};
            if let Err(duplicate) = ensure_unique(&enumerated(&new_keys)) {
                panic!("sections with non-unique identity: {duplicate}");
            }
            if let Err(duplicate) = ensure_unique(&flatten(&new_items)) {
                panic!("items with non-unique identity: {duplicate}");
            }
        }

        let section_changes = SectionChanges::between(&old_keys, &new_keys);
        let patched = apply_section_changes(&old_items, &section_changes);
        let item_changes = ItemChanges::between(&patched, &new_items);
        let midway_counts = patched.iter().map(|items| items.len()).collect();

        self.run_phases(section_changes, item_changes, midway_counts, target);
    }
}

impl<S, I> DataSource<S, I> {
    /// [`DataSource::update`] for element types matched by caller-supplied
    /// equality predicates instead of `Hash + Eq`. Quadratic matching.
    pub fn update_by<T>(
        &mut self,
        new_sections: Vec<(S, Vec<I>)>,
        section_eq: impl Fn(&S, &S) -> bool,
        item_eq: impl Fn(&I, &I) -> bool,
        target: &mut T,
    ) where
        T: BatchTarget<S, I> + ?Sized,
    {
        let old = std::mem::replace(&mut self.sections, new_sections);

        let old_keys: Vec<&S> = old.iter().map(|(section, _)| section).collect();
        let new_keys: Vec<&S> = self.sections.iter().map(|(section, _)| section).collect();
        let old_items: Vec<&[I]> = old.iter().map(|(_, items)| items.as_slice()).collect();
        let new_items: Vec<&[I]> = self
            .sections
            .iter()
            .map(|(_, items)| items.as_slice())
            .collect();

        let section_changes =
            SectionChanges::between_by(&old_keys, &new_keys, |a, b| section_eq(a, b));
        let patched = apply_section_changes(&old_items, &section_changes);
        let item_changes = ItemChanges::between_by(&patched, &new_items, |a, b| item_eq(a, b));
        let midway_counts = patched.iter().map(|items| items.len()).collect();

        self.run_phases(section_changes, item_changes, midway_counts, target);
    }
}
