//! Model/View layer for the bibliography list.
//!
//! This module separates the row data from its display:
//!
//! - `RowStore`: the authoritative rows, in insertion order
//! - `SortedView`: a read-only projection of a model sorted by display text
//! - `SelectionModel`: the row currently selected in the view
//!
//! # Core Types
//!
//! - `Row`: one bibliography entry (text, type, data)
//! - `RowId`: a stable handle to a row in the store
//! - `ModelIndex`: a row position, convertible to the path sent to peers
//! - `ItemRole`: which field of a row to read
//! - `ItemModel`: the read interface shared by the store and the view
//! - `ModelSignals`: change notifications
//!
//! # Architecture Overview
//!
//! ```text
//! ┌─────────────┐  rows_inserted  ┌─────────────┐  layout_changed  ┌───────────┐
//! │  RowStore   │────────────────>│ SortedView  │─────────────────>│ Selection │
//! │ (insertion) │  rows_removed   │  (by text)  │                  │           │
//! └─────────────┘  data_changed   └─────────────┘                  └───────────┘
//! ```
//!
//! Snapshots and peer paths use store (insertion) order; the display uses
//! view order.

mod index;
mod role;
mod row;
mod row_store;
pub mod selection;
mod sorted_view;
mod traits;

pub use index::ModelIndex;
pub use role::ItemRole;
pub use row::Row;
pub use row_store::{RowId, RowStore};
pub use selection::SelectionModel;
pub use sorted_view::{SortOptions, SortOrder, SortedView};
pub use traits::{ItemModel, ModelSignals};
