//! Signal/slot system for the bibliography list.
//!
//! This module provides a type-safe, Qt-inspired signal/slot mechanism for
//! communication between the list, its model layer, and the UI that hosts
//! it. Signals are emitted when state changes, and connected slots
//! (callbacks) are invoked in response.
//!
//! # Key Types
//!
//! - [`Signal<Args>`] - The main signal type for emitting notifications
//! - [`ConnectionId`] - Unique identifier returned when connecting a slot
//! - [`ConnectionGuard`] - RAII guard that disconnects when dropped
//!
//! # Delivery
//!
//! Delivery is synchronous: [`Signal::emit`] invokes every connected slot on
//! the calling thread, in connection order, before it returns. The list is
//! driven from a single cooperative UI loop, so there is no queued or
//! cross-thread delivery mode.
//!
//! Slots are snapshotted before invocation. A slot may therefore connect,
//! disconnect, or emit on the same signal (or call back into the object that
//! owns it) without deadlocking.
//!
//! # Example
//!
//! ```
//! use bibliography_list_core::Signal;
//!
//! // Create a signal that passes the (type, data) of a row to edit
//! let edit_requested = Signal::<(String, String)>::new();
//!
//! // Connect a slot (closure)
//! let conn_id = edit_requested.connect(|(kind, data)| {
//!     println!("Open editor for {kind}: {data}");
//! });
//!
//! // Emit the signal
//! edit_requested.emit(("book".to_string(), "{}".to_string()));
//!
//! // Disconnect when done
//! edit_requested.disconnect(conn_id);
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use slotmap::{new_key_type, SlotMap};
use static_assertions::assert_impl_all;

new_key_type! {
    /// A unique identifier for a signal-slot connection.
    ///
    /// Use this ID to disconnect a specific connection via [`Signal::disconnect`].
    /// The ID remains valid until the connection is explicitly disconnected or
    /// the signal is dropped.
    pub struct ConnectionId;
}

type Slot<Args> = Arc<dyn Fn(&Args) + Send + Sync>;
type Connections<Args> = Mutex<SlotMap<ConnectionId, Slot<Args>>>;

/// A type-safe signal that can have multiple connected slots.
///
/// Signals are the core of the observer pattern used by the list. When a
/// signal is emitted, all connected slots are invoked with the provided
/// arguments.
///
/// # Type Parameter
///
/// - `Args`: The argument type passed to connected slots. Use `()` for signals
///   with no arguments, or a tuple like `(String, String)` for multiple
///   arguments.
///
/// # Related Types
///
/// - [`ConnectionId`] - Returned by [`connect`](Self::connect), used to disconnect
/// - [`ConnectionGuard`] - RAII-style connection that auto-disconnects on drop
pub struct Signal<Args> {
    /// All active connections, shared weakly with any outstanding guards.
    connections: Arc<Connections<Args>>,
    /// Whether signal emission is temporarily blocked.
    blocked: AtomicBool,
}

assert_impl_all!(Signal<()>: Send, Sync);
assert_impl_all!(Signal<(String, String)>: Send, Sync);

impl<Args: 'static> Default for Signal<Args> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Args: 'static> Signal<Args> {
    /// Create a new signal with no connections.
    pub fn new() -> Self {
        Self {
            connections: Arc::new(Mutex::new(SlotMap::with_key())),
            blocked: AtomicBool::new(false),
        }
    }

    /// Connect a slot (closure) to this signal.
    ///
    /// Returns a `ConnectionId` that can be used to disconnect the slot later.
    ///
    /// # Example
    ///
    /// ```
    /// use bibliography_list_core::Signal;
    ///
    /// let signal = Signal::<String>::new();
    /// let id = signal.connect(|s| println!("Got: {}", s));
    /// signal.emit("Hello".to_string());
    /// ```
    pub fn connect<F>(&self, slot: F) -> ConnectionId
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        self.connections.lock().insert(Arc::new(slot))
    }

    /// Connect a slot with automatic disconnection when the guard is dropped.
    ///
    /// The guard only holds a weak reference to the connection table, so it
    /// may safely outlive the signal.
    pub fn connect_scoped<F>(&self, slot: F) -> ConnectionGuard<Args>
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        let id = self.connect(slot);
        ConnectionGuard {
            connections: Arc::downgrade(&self.connections),
            id,
        }
    }

    /// Disconnect a specific slot by its connection ID.
    ///
    /// Returns `true` if the connection was found and removed, `false` otherwise.
    pub fn disconnect(&self, id: ConnectionId) -> bool {
        self.connections.lock().remove(id).is_some()
    }

    /// Disconnect all slots from this signal.
    pub fn disconnect_all(&self) {
        self.connections.lock().clear();
    }

    /// Get the number of connected slots.
    pub fn connection_count(&self) -> usize {
        self.connections.lock().len()
    }

    /// Block signal emission temporarily.
    ///
    /// While blocked, calls to `emit()` will do nothing.
    pub fn set_blocked(&self, blocked: bool) {
        self.blocked.store(blocked, Ordering::SeqCst);
    }

    /// Check if signal emission is currently blocked.
    pub fn is_blocked(&self) -> bool {
        self.blocked.load(Ordering::SeqCst)
    }

    /// Emit the signal, invoking all connected slots.
    ///
    /// If the signal is blocked, this does nothing. Otherwise every slot that
    /// was connected when `emit` was called runs to completion on the current
    /// thread before `emit` returns.
    #[tracing::instrument(skip_all, target = "bibliography_list_core::signal", level = "trace")]
    pub fn emit(&self, args: Args) {
        if self.is_blocked() {
            tracing::trace!(target: "bibliography_list_core::signal", "signal blocked, skipping emit");
            return;
        }

        // Release the lock before invoking so slots may re-enter this signal.
        let slots: Vec<Slot<Args>> = self.connections.lock().values().cloned().collect();
        tracing::trace!(target: "bibliography_list_core::signal", connection_count = slots.len(), "emitting signal");

        for slot in slots {
            slot(&args);
        }
    }
}

/// A connection guard that automatically disconnects when dropped.
///
/// Created via [`Signal::connect_scoped`].
///
/// # Example
///
/// ```
/// use bibliography_list_core::Signal;
/// use std::sync::atomic::{AtomicI32, Ordering};
/// use std::sync::Arc;
///
/// let signal = Signal::<i32>::new();
/// let counter = Arc::new(AtomicI32::new(0));
/// {
///     let counter_clone = counter.clone();
///     let _guard = signal.connect_scoped(move |&n| {
///         counter_clone.fetch_add(n, Ordering::SeqCst);
///     });
///     signal.emit(42);  // counter = 42
/// }
/// signal.emit(43);  // Nothing happens - connection was dropped
/// assert_eq!(counter.load(Ordering::SeqCst), 42);
/// ```
pub struct ConnectionGuard<Args> {
    connections: Weak<Connections<Args>>,
    id: ConnectionId,
}

impl<Args> ConnectionGuard<Args> {
    /// The ID of the guarded connection.
    pub fn id(&self) -> ConnectionId {
        self.id
    }
}

impl<Args> Drop for ConnectionGuard<Args> {
    fn drop(&mut self) {
        if let Some(connections) = self.connections.upgrade() {
            connections.lock().remove(self.id);
        }
    }
}
