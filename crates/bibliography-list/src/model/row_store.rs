//! Insertion-ordered row store.
//!
//! `RowStore` is the authoritative collection of bibliography rows. It keeps
//! rows in the order they were added (the order snapshots are written in)
//! and hands out generational [`RowId`]s so callers can hold on to a row
//! across unrelated insertions and removals.

use parking_lot::RwLock;
use slotmap::{new_key_type, SlotMap};

use bibliography_list_core::logging::targets;

use super::index::ModelIndex;
use super::role::ItemRole;
use super::row::Row;
use super::traits::{ItemModel, ModelSignals};

new_key_type! {
    /// A stable handle to a row in a [`RowStore`].
    ///
    /// Unlike a [`ModelIndex`], a `RowId` keeps referring to the same row
    /// when other rows are inserted or removed. Once its row is removed the
    /// id resolves to nothing, and it is never reused for a different row.
    pub struct RowId;
}

#[derive(Default)]
struct StoreInner {
    rows: SlotMap<RowId, Row>,
    /// Insertion order.
    order: Vec<RowId>,
}

impl StoreInner {
    fn position(&self, id: RowId) -> Option<usize> {
        self.order.iter().position(|&candidate| candidate == id)
    }
}

/// The authoritative, insertion-ordered collection of rows.
///
/// There is no uniqueness constraint: the same row may be pushed twice.
/// [`find`](Self::find) returns the first match in insertion order.
///
/// Every mutation emits the matching [`ModelSignals`] after the store's lock
/// has been released, so slots may read the store.
///
/// # Example
///
/// ```
/// use bibliography_list::model::RowStore;
/// use bibliography_list::Row;
///
/// let store = RowStore::new();
/// let id = store.push(Row::new("Smith 2020", "book", "{}"));
///
/// assert_eq!(store.find(&Row::new("Smith 2020", "book", "{}")), Some(id));
/// assert_eq!(store.position(id), Some(0));
/// ```
pub struct RowStore {
    inner: RwLock<StoreInner>,
    signals: ModelSignals,
}

impl Default for RowStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RowStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(StoreInner::default()),
            signals: ModelSignals::new(),
        }
    }

    /// Returns the number of rows in the store.
    pub fn len(&self) -> usize {
        self.inner.read().order.len()
    }

    /// Returns `true` if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.inner.read().order.is_empty()
    }

    /// Appends a row to the end of the store.
    pub fn push(&self, row: Row) -> RowId {
        let (id, position) = {
            let mut inner = self.inner.write();
            let id = inner.rows.insert(row);
            inner.order.push(id);
            (id, inner.order.len() - 1)
        };
        tracing::trace!(target: targets::STORE, position, "row appended");
        self.signals.emit_row_inserted(position);
        id
    }

    /// Returns the id of the first row equal to `row`, in insertion order.
    pub fn find(&self, row: &Row) -> Option<RowId> {
        let inner = self.inner.read();
        inner
            .order
            .iter()
            .copied()
            .find(|&id| inner.rows.get(id) == Some(row))
    }

    /// Returns `true` if a row equal to `row` is present.
    pub fn contains(&self, row: &Row) -> bool {
        self.find(row).is_some()
    }

    /// Returns a copy of the row with the given id.
    pub fn get(&self, id: RowId) -> Option<Row> {
        self.inner.read().rows.get(id).cloned()
    }

    /// Returns the current insertion position of the row with the given id.
    pub fn position(&self, id: RowId) -> Option<usize> {
        self.inner.read().position(id)
    }

    /// Returns the id of the row at the given insertion position.
    pub fn id_at(&self, position: usize) -> Option<RowId> {
        self.inner.read().order.get(position).copied()
    }

    /// Returns a copy of the row at the given insertion position.
    pub fn row_at(&self, position: usize) -> Option<Row> {
        let inner = self.inner.read();
        inner
            .order
            .get(position)
            .and_then(|&id| inner.rows.get(id))
            .cloned()
    }

    /// Overwrites all three fields of the row with the given id, in place.
    ///
    /// The row keeps its insertion position. Returns the previous value, or
    /// `None` if the id no longer refers to a row.
    pub fn replace(&self, id: RowId, row: Row) -> Option<Row> {
        let (previous, position) = {
            let mut inner = self.inner.write();
            let position = inner.position(id)?;
            let slot = inner.rows.get_mut(id)?;
            (std::mem::replace(slot, row), position)
        };
        tracing::trace!(target: targets::STORE, position, "row replaced");
        self.signals.emit_row_changed(ModelIndex::new(position));
        Some(previous)
    }

    /// Removes the row with the given id.
    ///
    /// Returns the removed row, or `None` if the id no longer refers to a row.
    pub fn remove(&self, id: RowId) -> Option<Row> {
        let (removed, position) = {
            let mut inner = self.inner.write();
            let position = inner.position(id)?;
            inner.order.remove(position);
            (inner.rows.remove(id)?, position)
        };
        tracing::trace!(target: targets::STORE, position, "row removed");
        self.signals.emit_row_removed(position);
        Some(removed)
    }

    /// Returns independent copies of every row, in insertion order.
    pub fn rows(&self) -> Vec<Row> {
        let inner = self.inner.read();
        inner
            .order
            .iter()
            .filter_map(|&id| inner.rows.get(id))
            .cloned()
            .collect()
    }
}

impl ItemModel for RowStore {
    fn row_count(&self) -> usize {
        self.len()
    }

    fn data(&self, index: &ModelIndex, role: ItemRole) -> Option<String> {
        if !index.is_valid() {
            return None;
        }

        let inner = self.inner.read();
        let row = inner
            .order
            .get(index.row())
            .and_then(|&id| inner.rows.get(id))?;

        Some(match role {
            ItemRole::Display => row.text.clone(),
            ItemRole::Type => row.kind.clone(),
            ItemRole::Data => row.data.clone(),
        })
    }

    fn signals(&self) -> &ModelSignals {
        &self.signals
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    fn row(text: &str) -> Row {
        Row::new(text, "book", "{}")
    }

    #[test]
    fn test_push_keeps_insertion_order() {
        let store = RowStore::new();
        store.push(row("C"));
        store.push(row("A"));
        store.push(row("B"));

        let texts: Vec<String> = store.rows().into_iter().map(|r| r.text).collect();
        assert_eq!(texts, vec!["C", "A", "B"]);
        assert_eq!(store.row_count(), 3);
    }

    #[test]
    fn test_push_and_signals() {
        let store = RowStore::new();
        let inserted = Arc::new(Mutex::new(Vec::new()));

        let recv = inserted.clone();
        store
            .signals()
            .rows_inserted
            .connect(move |&(first, last)| recv.lock().push((first, last)));

        store.push(row("A"));
        store.push(row("B"));

        assert_eq!(*inserted.lock(), vec![(0, 0), (1, 1)]);
    }

    #[test]
    fn test_find_returns_first_duplicate() {
        let store = RowStore::new();
        let first = store.push(row("A"));
        let _second = store.push(row("A"));

        assert_eq!(store.find(&row("A")), Some(first));
        assert!(store.find(&row("Z")).is_none());
    }

    #[test]
    fn test_find_compares_every_field() {
        let store = RowStore::new();
        store.push(Row::new("A", "book", "{}"));

        assert!(!store.contains(&Row::new("A", "article", "{}")));
        assert!(!store.contains(&Row::new("A", "book", "[]")));
        assert!(store.contains(&Row::new("A", "book", "{}")));
    }

    #[test]
    fn test_remove_and_signals() {
        let store = RowStore::new();
        store.push(row("A"));
        let b = store.push(row("B"));
        store.push(row("C"));

        let removed = Arc::new(Mutex::new(Vec::new()));
        let recv = removed.clone();
        store
            .signals()
            .rows_removed
            .connect(move |&(first, last)| recv.lock().push((first, last)));

        assert_eq!(store.remove(b), Some(row("B")));
        assert_eq!(store.len(), 2);
        assert_eq!(*removed.lock(), vec![(1, 1)]);

        // A removed id stays dead.
        assert!(store.remove(b).is_none());
        assert!(store.get(b).is_none());
        assert_eq!(removed.lock().len(), 1);
    }

    #[test]
    fn test_ids_survive_other_mutations() {
        let store = RowStore::new();
        let a = store.push(row("A"));
        let b = store.push(row("B"));

        store.remove(a);
        store.push(row("C"));

        assert_eq!(store.position(b), Some(0));
        assert_eq!(store.get(b), Some(row("B")));
        assert_eq!(store.id_at(0), Some(b));
    }

    #[test]
    fn test_replace_in_place() {
        let store = RowStore::new();
        store.push(row("A"));
        let b = store.push(row("B"));
        store.push(row("C"));

        let changed = Arc::new(Mutex::new(Vec::new()));
        let recv = changed.clone();
        store
            .signals()
            .data_changed
            .connect(move |(index, _)| recv.lock().push(index.row()));

        let previous = store.replace(b, Row::new("B2", "article", "[]"));
        assert_eq!(previous, Some(row("B")));
        assert_eq!(store.row_at(1), Some(Row::new("B2", "article", "[]")));
        assert_eq!(*changed.lock(), vec![1]);
    }

    #[test]
    fn test_replace_dead_id() {
        let store = RowStore::new();
        let a = store.push(row("A"));
        store.remove(a);
        assert!(store.replace(a, row("X")).is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_rows_are_independent_copies() {
        let store = RowStore::new();
        store.push(row("A"));

        let mut snapshot = store.rows();
        snapshot[0].text = "changed".into();

        assert_eq!(store.row_at(0), Some(row("A")));
    }

    #[test]
    fn test_item_model_data() {
        let store = RowStore::new();
        store.push(Row::new("Smith 2020", "book", "{\"y\":2020}"));

        let index = store.index(0);
        assert_eq!(store.display_text(&index).as_deref(), Some("Smith 2020"));
        assert_eq!(store.data(&index, ItemRole::Type).as_deref(), Some("book"));
        assert_eq!(
            store.data(&index, ItemRole::Data).as_deref(),
            Some("{\"y\":2020}")
        );
        assert!(!store.index(1).is_valid());
        assert!(store.data(&ModelIndex::invalid(), ItemRole::Display).is_none());
    }

    #[test]
    fn test_slot_may_read_store() {
        let store = Arc::new(RowStore::new());
        let seen = Arc::new(Mutex::new(0));

        let weak = Arc::downgrade(&store);
        let recv = seen.clone();
        store.signals().rows_inserted.connect(move |_| {
            if let Some(store) = weak.upgrade() {
                *recv.lock() = store.len();
            }
        });

        store.push(row("A"));
        assert_eq!(*seen.lock(), 1);
    }
}
