//! Edit session state and the external editor surface.

use crate::model::RowId;

/// The transient editor UI that the host opens on `edit_requested`.
///
/// After a successful commit the list asks the editor to hide and then to
/// detach itself from its container.
pub trait EditorSurface {
    /// Hides the editor.
    fn hide(&self);

    /// Removes the editor from its parent container.
    fn detach(&self);
}

/// Which row, if any, is waiting for the external editor to return.
///
/// ```text
///          begin(id)               take()
///   Idle ────────────> Pending(id) ──────> Idle
///    ^                    │  begin(other)
///    └── take() = None    └──────────────> Pending(other)
/// ```
///
/// The pending row is held by [`RowId`], so it survives unrelated
/// insertions and removals and resolves to nothing if the row itself is
/// deleted before the commit arrives.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EditSession {
    /// No edit in progress.
    #[default]
    Idle,
    /// The given row was sent to the editor.
    Pending(RowId),
}

impl EditSession {
    /// Starts editing `id`, replacing any edit already pending.
    pub fn begin(&mut self, id: RowId) {
        *self = EditSession::Pending(id);
    }

    /// Ends the session, returning the row that was pending.
    pub fn take(&mut self) -> Option<RowId> {
        match std::mem::take(self) {
            EditSession::Idle => None,
            EditSession::Pending(id) => Some(id),
        }
    }

    /// Returns `true` while an edit is pending.
    pub fn is_pending(&self) -> bool {
        matches!(self, EditSession::Pending(_))
    }
}
