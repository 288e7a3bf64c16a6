//! Model index for addressing rows in flat models.
//!
//! The `ModelIndex` type is the way views, selections and peers refer to a
//! row position. The list is flat, so an index is just a row number plus a
//! validity flag.

use std::fmt;

/// Represents a row position within an `ItemModel`.
///
/// # Index Validity
///
/// Model indices should be used immediately and not stored long-term.
/// After insertions or removals, previously obtained indices may point at a
/// different row or past the end. Long-lived references (such as a pending
/// edit) use [`RowId`](super::RowId) instead.
///
/// # Paths
///
/// [`path`](Self::path) renders the index as the textual position identifier
/// sent to peers with an `edit_item` message: the decimal row number within
/// the store's insertion order. [`from_path`](Self::from_path) parses one
/// back; anything that is not a plain row number yields an invalid index.
///
/// ```
/// use bibliography_list::model::ModelIndex;
///
/// let index = ModelIndex::new(3);
/// assert_eq!(index.path(), "3");
/// assert_eq!(ModelIndex::from_path("3"), index);
/// assert!(!ModelIndex::from_path("3:1").is_valid());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ModelIndex {
    row: usize,
    valid: bool,
}

impl Default for ModelIndex {
    fn default() -> Self {
        Self::invalid()
    }
}

impl ModelIndex {
    /// Creates an invalid (null) model index.
    ///
    /// An invalid index represents a non-existent or out-of-bounds row.
    #[inline]
    pub const fn invalid() -> Self {
        Self {
            row: 0,
            valid: false,
        }
    }

    /// Creates a new valid model index.
    #[inline]
    pub const fn new(row: usize) -> Self {
        Self { row, valid: true }
    }

    /// Parses a position identifier produced by [`path`](Self::path).
    pub fn from_path(path: &str) -> Self {
        match path.trim().parse::<usize>() {
            Ok(row) => Self::new(row),
            Err(_) => Self::invalid(),
        }
    }

    /// Returns `true` if this index refers to a row.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Returns the row number.
    ///
    /// Returns 0 for invalid indices.
    #[inline]
    pub fn row(&self) -> usize {
        self.row
    }

    /// Returns the textual position identifier for this index.
    ///
    /// Invalid indices render as an empty string.
    pub fn path(&self) -> String {
        if self.valid {
            self.row.to_string()
        } else {
            String::new()
        }
    }
}

impl fmt::Debug for ModelIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.valid {
            write!(f, "ModelIndex({})", self.row)
        } else {
            write!(f, "ModelIndex(invalid)")
        }
    }
}
