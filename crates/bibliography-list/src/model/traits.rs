//! Core traits and signals for the model layer.

use bibliography_list_core::Signal;

use super::index::ModelIndex;
use super::role::ItemRole;

/// The interface views use to read a flat list of rows.
///
/// Both the [`RowStore`](super::RowStore) and the
/// [`SortedView`](super::SortedView) projection implement this trait, so the
/// same code can render either.
///
/// # Example
///
/// ```
/// use bibliography_list::model::{ItemModel, ItemRole, RowStore};
/// use bibliography_list::Row;
///
/// let store = RowStore::new();
/// store.push(Row::new("Smith 2020", "book", "{}"));
///
/// let index = store.index(0);
/// assert_eq!(store.data(&index, ItemRole::Type).as_deref(), Some("book"));
/// ```
pub trait ItemModel: Send + Sync {
    /// Returns the number of rows.
    fn row_count(&self) -> usize;

    /// Returns the data stored under the given role for the row at index.
    ///
    /// Returns `None` if the index is invalid or out of bounds.
    fn data(&self, index: &ModelIndex, role: ItemRole) -> Option<String>;

    /// Returns the signals for this model.
    ///
    /// Views connect to these signals to receive notifications about
    /// insertions, removals and data changes.
    fn signals(&self) -> &ModelSignals;

    /// Creates a model index for the given row.
    ///
    /// Returns `ModelIndex::invalid()` if the row is out of bounds.
    fn index(&self, row: usize) -> ModelIndex {
        if row < self.row_count() {
            ModelIndex::new(row)
        } else {
            ModelIndex::invalid()
        }
    }

    /// Returns the display text for a row (convenience for `data(index, Display)`).
    fn display_text(&self, index: &ModelIndex) -> Option<String> {
        self.data(index, ItemRole::Display)
    }
}

/// Collection of signals emitted by item models.
///
/// - **Row changes**: `rows_inserted` / `rows_removed` after the change
/// - **Data changes**: `data_changed` when an existing row is overwritten
/// - **Layout changes**: `layout_changed` when a projection reorders rows
pub struct ModelSignals {
    /// Emitted after rows have been inserted.
    /// Args: (first row, last row)
    pub rows_inserted: Signal<(usize, usize)>,

    /// Emitted after rows have been removed.
    /// Args: (first row, last row)
    pub rows_removed: Signal<(usize, usize)>,

    /// Emitted when the fields of an existing row change.
    /// Args: (index of the changed row, changed roles)
    pub data_changed: Signal<(ModelIndex, Vec<ItemRole>)>,

    /// Emitted after rows have been reordered.
    pub layout_changed: Signal<()>,
}

impl Default for ModelSignals {
    fn default() -> Self {
        Self::new()
    }
}

impl ModelSignals {
    /// Creates a new set of model signals.
    pub fn new() -> Self {
        Self {
            rows_inserted: Signal::new(),
            rows_removed: Signal::new(),
            data_changed: Signal::new(),
            layout_changed: Signal::new(),
        }
    }

    /// Emits `rows_inserted` for a single row.
    pub fn emit_row_inserted(&self, row: usize) {
        self.rows_inserted.emit((row, row));
    }

    /// Emits `rows_removed` for a single row.
    pub fn emit_row_removed(&self, row: usize) {
        self.rows_removed.emit((row, row));
    }

    /// Emits `data_changed` for every role of a single row.
    pub fn emit_row_changed(&self, index: ModelIndex) {
        self.data_changed.emit((index, ItemRole::ALL.to_vec()));
    }
}
