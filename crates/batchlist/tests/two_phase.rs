//! End-to-end application of both batches against a mock list widget

use batchlist::{BatchTarget, DataSource, ItemChanges, ItemPath, SectionChanges};

type Snapshot = Vec<(&'static str, Vec<char>)>;

/// Stand-in for a table widget: keeps its own copy of the rows and applies
/// each batch the way a UI list does — removals by descending source index,
/// insertions by ascending destination index, with inserted cell content
/// pulled from the data source at insertion time. Every index is checked
/// against the widget's own state at the moment it is used, which is exactly
/// what a real list view would crash on.
#[derive(Default)]
struct MockList {
    rows: Vec<Vec<char>>,
}

impl BatchTarget<&'static str, char> for MockList {
    fn apply_sections(
        &mut self,
        source: &DataSource<&'static str, char>,
        changes: &SectionChanges,
        item_counts: &[usize],
    ) {
        // capture moved sections before anything shifts
        let mut arriving: Vec<(usize, Vec<char>)> = changes
            .moves
            .iter()
            .map(|shift| (shift.destination, self.rows[shift.source].clone()))
            .collect();
        arriving.extend(
            changes
                .inserts
                .iter()
                .map(|&destination| (destination, Vec::new())),
        );

        let mut leaving: Vec<usize> = changes
            .deletes
            .iter()
            .chain(changes.moves.iter().map(|shift| &shift.source))
            .copied()
            .collect();
        leaving.sort_unstable();
        for &index in leaving.iter().rev() {
            assert!(index < self.rows.len(), "section removal out of bounds");
            self.rows.remove(index);
        }

        arriving.sort_by_key(|(destination, _)| *destination);
        for (destination, rows) in arriving {
            assert!(
                destination <= self.rows.len(),
                "section insertion out of bounds"
            );
            self.rows.insert(destination, rows);
        }

        // the widget must now agree with the intermediate layout
        assert_eq!(self.rows.len(), item_counts.len());
        for (section, rows) in self.rows.iter().enumerate() {
            assert_eq!(rows.len(), item_counts[section]);
            assert_eq!(rows.len(), source.number_of_items(section));
        }
    }

    fn apply_items(&mut self, source: &DataSource<&'static str, char>, changes: &ItemChanges) {
        let mut arriving: Vec<(ItemPath, char)> = changes
            .moves
            .iter()
            .map(|shift| {
                (
                    shift.destination,
                    self.rows[shift.source.section][shift.source.item],
                )
            })
            .collect();
        arriving.extend(changes.inserts.iter().map(|&path| (path, *source.item(path))));

        let mut leaving: Vec<ItemPath> = changes
            .deletes
            .iter()
            .chain(changes.moves.iter().map(|shift| &shift.source))
            .copied()
            .collect();
        leaving.sort_unstable();
        for path in leaving.iter().rev() {
            assert!(
                path.item < self.rows[path.section].len(),
                "item removal out of bounds"
            );
            self.rows[path.section].remove(path.item);
        }

        arriving.sort_by_key(|(path, _)| *path);
        for (path, value) in arriving {
            assert!(
                path.item <= self.rows[path.section].len(),
                "item insertion out of bounds"
            );
            self.rows[path.section].insert(path.item, value);
        }
    }
}

/// Updates the source, lets the widget apply both batches, then checks that
/// widget and accessors both landed on the new snapshot.
fn transition(
    source: &mut DataSource<&'static str, char>,
    widget: &mut MockList,
    new: Snapshot,
) {
    let expected = new.clone();
    source.update(new, widget);

    let expected_rows: Vec<Vec<char>> = expected.iter().map(|(_, items)| items.clone()).collect();
    assert_eq!(widget.rows, expected_rows);

    assert_eq!(source.number_of_sections(), expected.len());
    for (index, (section, items)) in expected.iter().enumerate() {
        assert_eq!(source.section(index), section);
        assert_eq!(source.number_of_items(index), items.len());
        for (item, value) in items.iter().enumerate() {
            assert_eq!(source.item(ItemPath::new(index, item)), value);
        }
    }
}

#[test]
fn test_populate_from_empty() {
    let mut source = DataSource::new();
    let mut widget = MockList::default();

    transition(
        &mut source,
        &mut widget,
        vec![("X", vec!['A', 'B']), ("Y", vec!['C'])],
    );
}

#[test]
fn test_section_swap_carries_items_across() {
    let mut source = DataSource::new();
    let mut widget = MockList::default();

    transition(
        &mut source,
        &mut widget,
        vec![("X", vec!['A', 'B']), ("Y", vec!['C'])],
    );
    // sections trade places and 'A' defects from X to Y
    transition(
        &mut source,
        &mut widget,
        vec![("Y", vec!['C', 'A']), ("X", vec!['B'])],
    );
}

#[test]
fn test_mixed_deletes_inserts_and_reorders() {
    let mut source = DataSource::new();
    let mut widget = MockList::default();

    transition(
        &mut source,
        &mut widget,
        vec![("X", vec!['A', 'B']), ("Y", vec!['C'])],
    );
    transition(
        &mut source,
        &mut widget,
        vec![("Y", vec!['C', 'A']), ("X", vec!['B'])],
    );
    // X goes away with its item, two fresh sections appear, Y reorders
    transition(
        &mut source,
        &mut widget,
        vec![
            ("Z", vec![]),
            ("Y", vec!['A', 'C']),
            ("W", vec!['D']),
        ],
    );
}

#[test]
fn test_clear_to_empty() {
    let mut source = DataSource::new();
    let mut widget = MockList::default();

    transition(
        &mut source,
        &mut widget,
        vec![("X", vec!['A', 'B']), ("Y", vec!['C'])],
    );
    transition(&mut source, &mut widget, vec![]);
}

#[test]
fn test_item_shuffle_within_one_section() {
    let mut source = DataSource::new();
    let mut widget = MockList::default();

    transition(&mut source, &mut widget, vec![("X", vec!['A', 'B', 'C', 'D'])]);
    transition(&mut source, &mut widget, vec![("X", vec!['D', 'B', 'A', 'C'])]);
}
