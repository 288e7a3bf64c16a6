//! Core systems for the bibliography list.
//!
//! This crate provides the foundational pieces the list widget is built on:
//!
//! - **Signal/Slot System**: Type-safe, synchronous observer registration
//! - **Logging**: `tracing` targets and span helpers shared by every subsystem
//!
//! # Signal/Slot Example
//!
//! ```
//! use bibliography_list_core::Signal;
//!
//! // Create a signal that notifies when a row is deleted
//! let deleted = Signal::<String>::new();
//!
//! // Connect a slot to handle the signal
//! let conn_id = deleted.connect(|text| {
//!     println!("Deleted: {}", text);
//! });
//!
//! // Emit the signal
//! deleted.emit("Smith 2020".to_string());
//!
//! // Disconnect when done
//! deleted.disconnect(conn_id);
//! ```

pub mod logging;
pub mod signal;

pub use logging::PerfSpan;
pub use signal::{ConnectionGuard, ConnectionId, Signal};
