//! Widget layer: the bibliography list itself and its per-row context menu.
//!
//! - `BibliographyList`: owns the rows, the sorted display and the edit session
//! - `ItemMenu`: the Edit/Delete menu opened on a row
//! - `Action`: a labelled, triggerable menu command
//! - `EditorSurface`: the host's editor, closed after a successful commit

mod action;
mod edit;
mod item_menu;
mod main_list;

pub use action::Action;
pub use edit::{EditSession, EditorSurface};
pub use item_menu::{ItemMenu, MenuEntry};
pub use main_list::BibliographyList;
