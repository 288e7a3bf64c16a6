//! Actions for context menus.
//!
//! An [`Action`] is a non-visual user command: a label, an icon name and an
//! enabled flag, plus a `triggered` signal that fires when the user picks it.

use std::sync::atomic::{AtomicBool, Ordering};

use bibliography_list_core::Signal;

/// A non-visual object representing a user command.
///
/// # Example
///
/// ```
/// use bibliography_list::widget::Action;
/// use std::sync::atomic::{AtomicBool, Ordering};
/// use std::sync::Arc;
///
/// let action = Action::new("Delete", "edit-delete");
/// let fired = Arc::new(AtomicBool::new(false));
///
/// let flag = fired.clone();
/// action.triggered.connect(move |_| flag.store(true, Ordering::SeqCst));
///
/// action.trigger();
/// assert!(fired.load(Ordering::SeqCst));
/// ```
pub struct Action {
    text: String,
    icon_name: String,
    enabled: AtomicBool,

    /// Signal emitted when the action is activated.
    pub triggered: Signal<()>,
}

impl Action {
    /// Create a new enabled action.
    pub fn new(text: impl Into<String>, icon_name: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            icon_name: icon_name.into(),
            enabled: AtomicBool::new(true),
            triggered: Signal::new(),
        }
    }

    /// Get the action's label.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Get the themed icon name shown next to the label.
    pub fn icon_name(&self) -> &str {
        &self.icon_name
    }

    /// Check whether the action can be triggered.
    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }

    /// Enable or disable the action.
    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::SeqCst);
    }

    /// Activate the action.
    ///
    /// Emits `triggered` unless the action is disabled. Returns whether the
    /// action fired.
    pub fn trigger(&self) -> bool {
        if !self.is_enabled() {
            return false;
        }
        self.triggered.emit(());
        true
    }
}

impl std::fmt::Debug for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Action")
            .field("text", &self.text)
            .field("icon_name", &self.icon_name)
            .field("enabled", &self.is_enabled())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[test]
    fn test_disabled_action_does_not_fire() {
        let action = Action::new("Edit", "toolbar-edit");
        let count = Arc::new(Mutex::new(0));

        let recv = count.clone();
        action.triggered.connect(move |_| *recv.lock() += 1);

        action.set_enabled(false);
        assert!(!action.trigger());
        action.set_enabled(true);
        assert!(action.trigger());

        assert_eq!(*count.lock(), 1);
    }

    #[test]
    fn test_accessors() {
        let action = Action::new("Edit", "toolbar-edit");
        assert_eq!(action.text(), "Edit");
        assert_eq!(action.icon_name(), "toolbar-edit");
        assert!(action.is_enabled());
    }
}
