//! Item roles for accessing the fields of a row.

/// Selects which field of a row an `ItemModel::data` call returns.
///
/// Views render [`Display`](Self::Display); the other roles expose the
/// remaining columns of the row for editors and context menus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemRole {
    /// The human-readable citation text (column 0).
    Display,
    /// The category label (column 1).
    Type,
    /// The serialized structured fields (column 2).
    Data,
}

impl ItemRole {
    /// All roles, in column order.
    pub const ALL: [ItemRole; 3] = [ItemRole::Display, ItemRole::Type, ItemRole::Data];
}
