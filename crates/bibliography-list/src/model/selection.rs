//! Selection model for the list view.
//!
//! The list supports a single current row. The selection is stored in view
//! coordinates, so it is cleared whenever the view's layout changes.

use bibliography_list_core::Signal;
use parking_lot::Mutex;

use super::index::ModelIndex;

/// Tracks the row currently selected in a view.
///
/// # Signals
///
/// - `current_changed`: Emitted with `(new, previous)` when the current row changes
pub struct SelectionModel {
    current: Mutex<ModelIndex>,

    /// Emitted when the current row changes.
    /// Args: (new current index, previous current index)
    pub current_changed: Signal<(ModelIndex, ModelIndex)>,
}

impl Default for SelectionModel {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectionModel {
    /// Creates a selection model with nothing selected.
    pub fn new() -> Self {
        Self {
            current: Mutex::new(ModelIndex::invalid()),
            current_changed: Signal::new(),
        }
    }

    /// Returns the current index (invalid when nothing is selected).
    pub fn current_index(&self) -> ModelIndex {
        *self.current.lock()
    }

    /// Returns `true` if a row is selected.
    pub fn has_selection(&self) -> bool {
        self.current_index().is_valid()
    }

    /// Makes `index` the current row.
    ///
    /// Emits `current_changed` only if the current row actually changed.
    pub fn set_current_index(&self, index: ModelIndex) {
        let previous = {
            let mut current = self.current.lock();
            if *current == index {
                return;
            }
            std::mem::replace(&mut *current, index)
        };
        self.current_changed.emit((index, previous));
    }

    /// Clears the selection.
    pub fn clear(&self) {
        self.set_current_index(ModelIndex::invalid());
    }
}
