//! A collaborative list of bibliography entries.
//!
//! Each entry is a [`Row`]: a display text, a type tag and an opaque data
//! payload. The list keeps rows in insertion order, displays them sorted by
//! text, hands rows to an external editor and writes the result back, and
//! deletes rows from a per-row context menu. Every local change that peers
//! must see is posted as a [`CollabMessage`] to a [`CollaborationSink`]
//! supplied by the host.
//!
//! # Example
//!
//! ```
//! use bibliography_list::collab::ChannelSink;
//! use bibliography_list::widget::MenuEntry;
//! use bibliography_list::{BibliographyList, CollabMessage, ListConfig, Row};
//! use std::sync::Arc;
//!
//! let (sink, outgoing) = ChannelSink::unbounded();
//! let list = BibliographyList::new(Arc::new(sink), ListConfig::default());
//! list.add("Smith 2020", "book", "{}");
//!
//! let menu = list.context_menu(0).unwrap();
//! menu.trigger(MenuEntry::Delete);
//!
//! assert!(list.all().is_empty());
//! assert_eq!(
//!     outgoing.try_recv().unwrap(),
//!     CollabMessage::DeleteRow { args: Row::new("Smith 2020", "book", "{}") }
//! );
//! ```

pub mod collab;
pub mod config;
mod error;
pub mod model;
pub mod widget;

pub use collab::{CollabMessage, CollaborationSink};
pub use config::ListConfig;
pub use error::{ListError, Result};
pub use model::Row;
pub use widget::BibliographyList;
