//! The bibliography list widget.
//!
//! [`BibliographyList`] binds a [`RowStore`] to a sorted display, runs the
//! edit handshake with an external editor, and keeps collaborating peers in
//! step by posting [`CollabMessage`]s to an injected [`CollaborationSink`].
//!
//! # Editing
//!
//! ```text
//!  context menu ─ Edit ─> edit(row) ──edit_requested(type, data)──> host editor
//!                                                                       │
//!  peers <── edit_item(path, row) ── edited(editor, row) <──────────────┘
//! ```
//!
//! # Failure handling
//!
//! Editing or deleting a row that has disappeared (typically because a peer
//! deleted it first) and committing with no edit pending are logged and
//! ignored. None of the interactive operations return an error or panic.

use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use static_assertions::assert_impl_all;

use bibliography_list_core::logging::{span_names, targets};
use bibliography_list_core::{ConnectionId, PerfSpan, Signal};

use super::edit::{EditSession, EditorSurface};
use super::item_menu::ItemMenu;
use crate::collab::{CollabMessage, CollaborationSink};
use crate::config::ListConfig;
use crate::error::{ListError, Result};
use crate::model::{ItemModel, ModelIndex, Row, RowId, RowStore, SelectionModel, SortedView};

/// A collaborative list of bibliography entries.
///
/// The list is always handled through an `Arc` so that context menus can
/// refer back to it weakly.
///
/// # Signals
///
/// - `edit_requested`: Emitted with the `(type, data)` of a row to open in the editor
/// - `row_deleted`: Emitted with the removed row after a delete
///
/// # Example
///
/// ```
/// use bibliography_list::collab::ChannelSink;
/// use bibliography_list::{BibliographyList, CollabMessage, ListConfig, Row};
/// use std::sync::Arc;
///
/// let (sink, outgoing) = ChannelSink::unbounded();
/// let list = BibliographyList::new(Arc::new(sink), ListConfig::default());
///
/// list.add("Smith 2020", "book", "{}");
/// list.load(vec![
///     Row::new("Smith 2020", "book", "{}"),
///     Row::new("Jones 2019", "article", "{}"),
/// ]);
///
/// // Only the row we did not already have is re-broadcast.
/// let posted: Vec<CollabMessage> = outgoing.try_iter().collect();
/// assert_eq!(posted, vec![CollabMessage::AddItem {
///     args: Row::new("Jones 2019", "article", "{}"),
/// }]);
/// assert_eq!(list.visible_rows(), vec!["Jones 2019", "Smith 2020"]);
/// ```
pub struct BibliographyList {
    store: Arc<RowStore>,
    view: Arc<SortedView<RowStore>>,
    selection: SelectionModel,
    session: Mutex<EditSession>,
    collab: Arc<dyn CollaborationSink>,
    config: ListConfig,
    weak_self: Weak<BibliographyList>,
    layout_connection: ConnectionId,

    /// Emitted when a row should be opened in the external editor.
    /// Args: (type, data)
    pub edit_requested: Signal<(String, String)>,

    /// Emitted after a row has been removed from the list.
    pub row_deleted: Signal<Row>,
}

assert_impl_all!(BibliographyList: Send, Sync);

impl BibliographyList {
    /// Creates an empty list that posts its changes to `collab`.
    pub fn new(collab: Arc<dyn CollaborationSink>, config: ListConfig) -> Arc<Self> {
        Arc::new_cyclic(|weak: &Weak<Self>| {
            let store = Arc::new(RowStore::new());
            let view = SortedView::with_options(store.clone(), config.sort_options());

            // The selection is in view coordinates; any re-sort invalidates it.
            let w = weak.clone();
            let layout_connection = view.signals().layout_changed.connect(move |_| {
                if let Some(list) = w.upgrade() {
                    list.selection.clear();
                }
            });

            Self {
                store,
                view,
                selection: SelectionModel::new(),
                session: Mutex::new(EditSession::Idle),
                collab,
                config,
                weak_self: weak.clone(),
                layout_connection,
                edit_requested: Signal::new(),
                row_deleted: Signal::new(),
            }
        })
    }

    /// The underlying store, in insertion order.
    pub fn store(&self) -> &Arc<RowStore> {
        &self.store
    }

    /// The sorted projection the list displays.
    pub fn view(&self) -> &Arc<SortedView<RowStore>> {
        &self.view
    }

    /// The view selection.
    pub fn selection(&self) -> &SelectionModel {
        &self.selection
    }

    /// The configuration this list was built with.
    pub fn config(&self) -> &ListConfig {
        &self.config
    }

    // =========================================================================
    // Rows
    // =========================================================================

    /// Appends a row. Peers are not notified.
    pub fn add(&self, text: impl Into<String>, kind: impl Into<String>, data: impl Into<String>) {
        self.store.push(Row::new(text, kind, data));
    }

    /// Returns copies of every row, in insertion order.
    pub fn all(&self) -> Vec<Row> {
        self.store.rows()
    }

    /// Display texts of every row, in display order.
    pub fn visible_rows(&self) -> Vec<String> {
        self.view.display_texts()
    }

    /// Reconciles a snapshot (from a resumed or joined activity) with the list.
    ///
    /// Rows already present are skipped. Every other row is appended and,
    /// unless disabled in the configuration, posted as `add_item` so peers
    /// whose snapshot lacked it pick it up. Presence is checked against the
    /// list as it grows, so a row repeated within `rows` is added once.
    ///
    /// Returns the number of rows added.
    pub fn load<I>(&self, rows: I) -> usize
    where
        I: IntoIterator<Item = Row>,
    {
        let _span = PerfSpan::new(span_names::LOAD);
        let mut added = 0;

        for row in rows {
            if self.store.contains(&row) {
                tracing::debug!(target: targets::MAIN_LIST, %row, "already present, skipping");
                continue;
            }

            self.store.push(row.clone());
            added += 1;

            if self.config.broadcast_missing_on_load {
                self.collab.post(CollabMessage::AddItem { args: row });
            }
        }

        tracing::debug!(target: targets::MAIN_LIST, added, total = self.store.len(), "snapshot reconciled");
        added
    }

    /// Parses a JSON snapshot and reconciles it with [`load`](Self::load).
    pub fn load_json(&self, json: &str) -> Result<usize> {
        let rows: Vec<Row> = serde_json::from_str(json)?;
        Ok(self.load(rows))
    }

    /// Serialises every row, in insertion order, as a JSON snapshot.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.all())?)
    }

    // =========================================================================
    // Editing
    // =========================================================================

    /// Starts editing the first row equal to `row`.
    ///
    /// On success the row becomes the pending edit (replacing any earlier
    /// one) and `edit_requested` is emitted with its type and data. If no
    /// such row exists the failure is logged, no edit is left pending, and
    /// `false` is returned.
    pub fn edit(&self, row: &Row) -> bool {
        let found = self.store.find(row);
        {
            let mut session = self.session.lock();
            match found {
                Some(id) => session.begin(id),
                None => *session = EditSession::Idle,
            }
        }

        if found.is_none() {
            tracing::error!(target: targets::MAIN_LIST, %row, "trying to edit a row that does not exist");
            return false;
        }

        self.edit_requested.emit(row.edit_payload());
        true
    }

    /// Returns `true` while an edit is waiting for the editor to return.
    pub fn is_editing(&self) -> bool {
        self.session.lock().is_pending()
    }

    /// Commits the editor's result to the pending row.
    ///
    /// The pending row is overwritten in place, peers receive an `edit_item`
    /// with the row's position, and the editor is hidden and detached.
    /// Without a pending edit, or if the pending row has since been deleted,
    /// nothing changes, the failure is logged, and `false` is returned. The
    /// session is closed either way.
    pub fn edited(&self, editor: &dyn EditorSurface, row: Row) -> bool {
        match self.commit_edit(row) {
            Ok(()) => {
                editor.hide();
                editor.detach();
                true
            }
            Err(err) => {
                tracing::error!(target: targets::MAIN_LIST, %err, "cannot commit edited row");
                false
            }
        }
    }

    fn commit_edit(&self, row: Row) -> Result<()> {
        let id = self.session.lock().take().ok_or(ListError::NoPendingEdit)?;
        let position = self.store.position(id).ok_or(ListError::RowNotFound)?;
        self.store
            .replace(id, row.clone())
            .ok_or(ListError::RowNotFound)?;

        self.collab.post(CollabMessage::EditItem {
            path: ModelIndex::new(position).path(),
            args: row,
        });
        Ok(())
    }

    /// Applies an edit made by a peer. Nothing is posted back.
    ///
    /// Returns `false` (and logs) if `path` does not name a row.
    pub fn apply_remote_edit(&self, path: &str, row: Row) -> bool {
        match self.resolve_path(path) {
            Ok(id) => self.store.replace(id, row).is_some(),
            Err(err) => {
                tracing::error!(target: targets::MAIN_LIST, %err, "cannot apply remote edit");
                false
            }
        }
    }

    fn resolve_path(&self, path: &str) -> Result<RowId> {
        let index = ModelIndex::from_path(path);
        if !index.is_valid() {
            return Err(ListError::InvalidPath(path.to_string()));
        }
        self.store
            .id_at(index.row())
            .ok_or_else(|| ListError::InvalidPath(path.to_string()))
    }

    // =========================================================================
    // Deleting
    // =========================================================================

    /// Removes the first row equal to `row` and emits `row_deleted`.
    ///
    /// Does nothing if no such row exists. Peers are not notified; use
    /// [`delete_and_broadcast`](Self::delete_and_broadcast) for a user delete.
    pub fn delete(&self, row: &Row) -> bool {
        let Some(removed) = self.store.find(row).and_then(|id| self.store.remove(id)) else {
            tracing::trace!(target: targets::MAIN_LIST, %row, "nothing to delete");
            return false;
        };
        self.row_deleted.emit(removed);
        true
    }

    /// Deletes `row` locally and posts `delete_row` to peers.
    ///
    /// The message is posted even if the row was already gone locally.
    pub fn delete_and_broadcast(&self, row: &Row) {
        self.delete(row);
        self.collab.post(CollabMessage::DeleteRow { args: row.clone() });
    }

    // =========================================================================
    // Peers
    // =========================================================================

    /// Applies a change received from a peer without posting it back.
    pub fn apply_remote(&self, message: CollabMessage) {
        tracing::debug!(target: targets::COLLAB, action = message.action(), "applying remote change");
        match message {
            CollabMessage::AddItem { args } => {
                self.store.push(args);
            }
            CollabMessage::EditItem { path, args } => {
                self.apply_remote_edit(&path, args);
            }
            CollabMessage::DeleteRow { args } => {
                self.delete(&args);
            }
        }
    }

    // =========================================================================
    // View interaction
    // =========================================================================

    /// Selects the row at the given display position.
    ///
    /// Returns `false` if there is no such row.
    pub fn select(&self, view_row: usize) -> bool {
        let index = self.view.index(view_row);
        if !index.is_valid() {
            return false;
        }
        self.selection.set_current_index(index);
        true
    }

    /// Returns a copy of the selected row.
    pub fn selected_row(&self) -> Option<Row> {
        let index = self.selection.current_index();
        if !index.is_valid() {
            return None;
        }
        self.row_at_view(index.row())
    }

    /// Builds the context menu for the row at the given display position.
    pub fn context_menu(&self, view_row: usize) -> Option<ItemMenu> {
        let row = self.row_at_view(view_row)?;
        Some(ItemMenu::new(row, self.weak_self.clone()))
    }

    /// Builds the context menu for the selected row.
    pub fn context_menu_for_selection(&self) -> Option<ItemMenu> {
        let row = self.selected_row()?;
        Some(ItemMenu::new(row, self.weak_self.clone()))
    }

    fn row_at_view(&self, view_row: usize) -> Option<Row> {
        let source = self.view.map_to_source(&self.view.index(view_row));
        if !source.is_valid() {
            return None;
        }
        self.store.row_at(source.row())
    }
}

impl Drop for BibliographyList {
    fn drop(&mut self) {
        self.view
            .signals()
            .layout_changed
            .disconnect(self.layout_connection);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collab::NullSink;
    use std::cell::Cell;

    fn recording_list() -> (Arc<BibliographyList>, Arc<Mutex<Vec<CollabMessage>>>) {
        let posted = Arc::new(Mutex::new(Vec::new()));
        let recv = posted.clone();
        let list = BibliographyList::new(
            Arc::new(move |message: CollabMessage| recv.lock().push(message)),
            ListConfig::default(),
        );
        (list, posted)
    }

    #[derive(Default)]
    struct FakeEditor {
        hidden: Cell<bool>,
        detached: Cell<bool>,
    }

    impl EditorSurface for FakeEditor {
        fn hide(&self) {
            self.hidden.set(true);
        }

        fn detach(&self) {
            self.detached.set(true);
        }
    }

    #[test]
    fn test_add_and_all() {
        let list = BibliographyList::new(Arc::new(NullSink), ListConfig::default());
        list.add("B", "book", "{}");
        list.add("A", "article", "{}");

        assert_eq!(
            list.all(),
            vec![Row::new("B", "book", "{}"), Row::new("A", "article", "{}")]
        );
        assert_eq!(list.visible_rows(), vec!["A", "B"]);
    }

    #[test]
    fn test_add_does_not_post() {
        let (list, posted) = recording_list();
        list.add("A", "book", "{}");
        assert!(posted.lock().is_empty());
    }

    #[test]
    fn test_load_without_broadcast() {
        let posted = Arc::new(Mutex::new(Vec::new()));
        let recv = posted.clone();
        let config = ListConfig {
            broadcast_missing_on_load: false,
            ..ListConfig::default()
        };
        let list = BibliographyList::new(
            Arc::new(move |message: CollabMessage| recv.lock().push(message)),
            config,
        );

        assert_eq!(list.load(vec![Row::new("A", "book", "{}")]), 1);
        assert_eq!(list.all().len(), 1);
        assert!(posted.lock().is_empty());
    }

    #[test]
    fn test_edit_missing_row_clears_pending_edit() {
        let list = BibliographyList::new(Arc::new(NullSink), ListConfig::default());
        list.add("A", "book", "{}");

        assert!(list.edit(&Row::new("A", "book", "{}")));
        assert!(list.is_editing());

        assert!(!list.edit(&Row::new("Z", "book", "{}")));
        assert!(!list.is_editing());
    }

    #[test]
    fn test_commit_closes_editor() {
        let (list, posted) = recording_list();
        list.add("A", "book", "{}");
        list.edit(&Row::new("A", "book", "{}"));

        let editor = FakeEditor::default();
        assert!(list.edited(&editor, Row::new("A2", "book", "{\"v\":2}")));

        assert!(editor.hidden.get());
        assert!(editor.detached.get());
        assert!(!list.is_editing());
        assert_eq!(posted.lock().len(), 1);
    }

    #[test]
    fn test_commit_after_row_deleted_fails_softly() {
        let (list, posted) = recording_list();
        list.add("A", "book", "{}");
        list.edit(&Row::new("A", "book", "{}"));

        // A peer deletes the row while the editor is open.
        list.apply_remote(CollabMessage::DeleteRow {
            args: Row::new("A", "book", "{}"),
        });

        let editor = FakeEditor::default();
        assert!(!list.edited(&editor, Row::new("A2", "book", "{}")));
        assert!(list.all().is_empty());
        assert!(posted.lock().is_empty());
        assert!(!editor.hidden.get());
        assert!(!list.is_editing());
    }

    #[test]
    fn test_edit_path_follows_insertion_order() {
        let (list, posted) = recording_list();
        list.add("C", "book", "{}");
        list.add("A", "book", "{}");
        list.add("B", "book", "{}");

        // "B" is displayed second but was inserted third.
        list.edit(&Row::new("B", "book", "{}"));
        list.edited(&FakeEditor::default(), Row::new("B2", "book", "{}"));

        assert_eq!(
            posted.lock()[0],
            CollabMessage::EditItem {
                path: "2".into(),
                args: Row::new("B2", "book", "{}"),
            }
        );
    }

    #[test]
    fn test_pending_edit_survives_earlier_delete() {
        let (list, posted) = recording_list();
        list.add("A", "book", "{}");
        list.add("B", "book", "{}");

        list.edit(&Row::new("B", "book", "{}"));
        list.delete(&Row::new("A", "book", "{}"));
        assert!(list.edited(&FakeEditor::default(), Row::new("B2", "book", "{}")));

        assert_eq!(list.all(), vec![Row::new("B2", "book", "{}")]);
        assert_eq!(
            posted.lock()[0],
            CollabMessage::EditItem {
                path: "0".into(),
                args: Row::new("B2", "book", "{}"),
            }
        );
    }

    #[test]
    fn test_apply_remote_edit_bad_paths() {
        let (list, posted) = recording_list();
        list.add("A", "book", "{}");

        assert!(!list.apply_remote_edit("1", Row::new("X", "book", "{}")));
        assert!(!list.apply_remote_edit("zero", Row::new("X", "book", "{}")));
        assert!(list.apply_remote_edit("0", Row::new("X", "book", "{}")));

        assert_eq!(list.all(), vec![Row::new("X", "book", "{}")]);
        assert!(posted.lock().is_empty());
    }

    #[test]
    fn test_apply_remote_add() {
        let (list, posted) = recording_list();
        list.apply_remote(CollabMessage::AddItem {
            args: Row::new("A", "book", "{}"),
        });
        assert_eq!(list.all(), vec![Row::new("A", "book", "{}")]);
        assert!(posted.lock().is_empty());
    }

    #[test]
    fn test_selection_and_context_menu() {
        let list = BibliographyList::new(Arc::new(NullSink), ListConfig::default());
        list.add("B", "book", "{}");
        list.add("A", "article", "{}");

        assert!(list.select(0));
        assert_eq!(list.selected_row(), Some(Row::new("A", "article", "{}")));

        let menu = list.context_menu_for_selection().unwrap();
        assert_eq!(menu.title(), "article");

        let menu = list.context_menu(1).unwrap();
        assert_eq!(menu.row(), &Row::new("B", "book", "{}"));

        assert!(list.context_menu(2).is_none());
        assert!(!list.select(2));
    }

    #[test]
    fn test_selection_cleared_on_change() {
        let list = BibliographyList::new(Arc::new(NullSink), ListConfig::default());
        list.add("B", "book", "{}");
        list.select(0);

        list.add("A", "book", "{}");
        assert!(list.selected_row().is_none());
        assert!(list.context_menu_for_selection().is_none());
    }

    #[test]
    fn test_descending_config() {
        let config = ListConfig::from_toml_str("sort_order = \"descending\"").unwrap();
        let list = BibliographyList::new(Arc::new(NullSink), config);
        list.add("A", "book", "{}");
        list.add("B", "book", "{}");

        assert_eq!(list.visible_rows(), vec!["B", "A"]);
        assert_eq!(list.context_menu(0).unwrap().row().text, "B");
    }

    #[test]
    fn test_json_snapshot() {
        let list = BibliographyList::new(Arc::new(NullSink), ListConfig::default());
        list.add("B", "book", "{\"a\":1}");
        list.add("A", "article", "{}");

        let json = list.to_json().unwrap();
        assert_eq!(
            json,
            r#"[["B","book","{\"a\":1}"],["A","article","{}"]]"#
        );

        let restored = BibliographyList::new(Arc::new(NullSink), ListConfig::default());
        assert_eq!(restored.load_json(&json).unwrap(), 2);
        assert_eq!(restored.all(), list.all());

        assert!(matches!(
            restored.load_json("not json"),
            Err(ListError::Snapshot(_))
        ));
        assert_eq!(restored.all().len(), 2);
    }

    #[test]
    fn test_slots_may_call_back_into_list() {
        let list = BibliographyList::new(Arc::new(NullSink), ListConfig::default());
        list.add("A", "book", "{}");
        list.add("B", "book", "{}");

        // Deleting one row cascades to the next from inside the slot.
        let weak = Arc::downgrade(&list);
        list.row_deleted.connect(move |row| {
            if row.text == "A" {
                if let Some(list) = weak.upgrade() {
                    list.delete(&Row::new("B", "book", "{}"));
                }
            }
        });

        assert!(list.delete(&Row::new("A", "book", "{}")));
        assert!(list.all().is_empty());
    }
}
