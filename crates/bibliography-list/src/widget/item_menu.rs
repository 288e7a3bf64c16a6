//! Per-row context menu.
//!
//! An [`ItemMenu`] is built fresh each time the user opens the context menu
//! on a row. It offers exactly two actions, Edit and Delete, both bound to
//! the row the menu was opened on.

use std::sync::{Arc, Weak};

use bibliography_list_core::Signal;

use super::action::Action;
use super::main_list::BibliographyList;
use crate::model::Row;

/// The entries of an [`ItemMenu`], in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuEntry {
    /// Ask the host to open the editor for this row.
    Edit,
    /// Delete this row locally and tell peers.
    Delete,
}

impl MenuEntry {
    /// All entries, in display order.
    pub const ALL: [MenuEntry; 2] = [MenuEntry::Edit, MenuEntry::Delete];

    fn label(self) -> &'static str {
        match self {
            MenuEntry::Edit => "Edit",
            MenuEntry::Delete => "Delete",
        }
    }

    fn icon_name(self) -> &'static str {
        match self {
            MenuEntry::Edit => "toolbar-edit",
            MenuEntry::Delete => "edit-delete",
        }
    }
}

/// Context menu for a single row.
///
/// The menu's title is the row's type. The actions hold only a weak
/// reference to the list, so a menu left open after the list is gone does
/// nothing when triggered.
///
/// # Signals
///
/// - `triggered`: Emitted with the entry after its action has run
pub struct ItemMenu {
    row: Row,
    actions: Vec<(MenuEntry, Arc<Action>)>,

    /// Emitted after an entry's action has run.
    pub triggered: Signal<MenuEntry>,
}

impl ItemMenu {
    pub(crate) fn new(row: Row, list: Weak<BibliographyList>) -> Self {
        let actions = MenuEntry::ALL
            .into_iter()
            .map(|entry| {
                let action = Arc::new(Action::new(entry.label(), entry.icon_name()));
                let list = list.clone();
                let target = row.clone();
                action.triggered.connect(move |_| {
                    let Some(list) = list.upgrade() else {
                        return;
                    };
                    match entry {
                        MenuEntry::Edit => {
                            list.edit(&target);
                        }
                        MenuEntry::Delete => list.delete_and_broadcast(&target),
                    }
                });
                (entry, action)
            })
            .collect();

        Self {
            row,
            actions,
            triggered: Signal::new(),
        }
    }

    /// The menu's primary text: the row's type.
    pub fn title(&self) -> &str {
        &self.row.kind
    }

    /// The row this menu acts on.
    pub fn row(&self) -> &Row {
        &self.row
    }

    /// Number of entries in the menu.
    pub fn item_count(&self) -> usize {
        self.actions.len()
    }

    /// The actions, in display order.
    pub fn actions(&self) -> impl Iterator<Item = &Arc<Action>> {
        self.actions.iter().map(|(_, action)| action)
    }

    /// The action behind an entry.
    pub fn action(&self, entry: MenuEntry) -> Option<&Arc<Action>> {
        self.actions
            .iter()
            .find(|(candidate, _)| *candidate == entry)
            .map(|(_, action)| action)
    }

    /// Trigger the given entry.
    ///
    /// Returns `false` if the entry's action is disabled.
    pub fn trigger(&self, entry: MenuEntry) -> bool {
        let fired = self.action(entry).is_some_and(|action| action.trigger());
        if fired {
            self.triggered.emit(entry);
        }
        fired
    }

    /// Trigger the entry at the given display position.
    pub fn trigger_item(&self, index: usize) -> bool {
        match self.actions.get(index) {
            Some(&(entry, _)) => self.trigger(entry),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collab::{CollabMessage, NullSink};
    use crate::config::ListConfig;
    use parking_lot::Mutex;

    fn list_with_recorder() -> (Arc<BibliographyList>, Arc<Mutex<Vec<CollabMessage>>>) {
        let posted = Arc::new(Mutex::new(Vec::new()));
        let recv = posted.clone();
        let list = BibliographyList::new(
            Arc::new(move |message: CollabMessage| recv.lock().push(message)),
            ListConfig::default(),
        );
        (list, posted)
    }

    #[test]
    fn test_menu_layout() {
        let list = BibliographyList::new(Arc::new(NullSink), ListConfig::default());
        let menu = ItemMenu::new(Row::new("Smith 2020", "book", "{}"), Arc::downgrade(&list));

        assert_eq!(menu.title(), "book");
        assert_eq!(menu.item_count(), 2);
        let labels: Vec<&str> = menu.actions().map(|a| a.text()).collect();
        assert_eq!(labels, vec!["Edit", "Delete"]);
        let icons: Vec<&str> = menu.actions().map(|a| a.icon_name()).collect();
        assert_eq!(icons, vec!["toolbar-edit", "edit-delete"]);
    }

    #[test]
    fn test_edit_entry_requests_edit() {
        let (list, posted) = list_with_recorder();
        list.add("Smith 2020", "book", "{\"y\":1}");

        let requested = Arc::new(Mutex::new(Vec::new()));
        let recv = requested.clone();
        list.edit_requested
            .connect(move |payload| recv.lock().push(payload.clone()));

        let menu = ItemMenu::new(Row::new("Smith 2020", "book", "{\"y\":1}"), Arc::downgrade(&list));
        assert!(menu.trigger(MenuEntry::Edit));

        assert_eq!(
            *requested.lock(),
            vec![("book".to_string(), "{\"y\":1}".to_string())]
        );
        assert!(posted.lock().is_empty());
    }

    #[test]
    fn test_delete_entry_deletes_and_posts() {
        let (list, posted) = list_with_recorder();
        list.add("Smith 2020", "book", "{}");

        let menu = ItemMenu::new(Row::new("Smith 2020", "book", "{}"), Arc::downgrade(&list));
        let fired = Arc::new(Mutex::new(Vec::new()));
        let recv = fired.clone();
        menu.triggered.connect(move |&entry| recv.lock().push(entry));

        assert!(menu.trigger_item(1));

        assert!(list.all().is_empty());
        assert_eq!(
            *posted.lock(),
            vec![CollabMessage::DeleteRow {
                args: Row::new("Smith 2020", "book", "{}")
            }]
        );
        assert_eq!(*fired.lock(), vec![MenuEntry::Delete]);
    }

    #[test]
    fn test_menu_outliving_list_is_inert() {
        let list = BibliographyList::new(Arc::new(NullSink), ListConfig::default());
        let menu = ItemMenu::new(Row::new("A", "book", "{}"), Arc::downgrade(&list));
        drop(list);

        assert!(menu.trigger(MenuEntry::Delete));
        assert!(!menu.trigger_item(5));
    }
}
