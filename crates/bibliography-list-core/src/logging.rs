//! Logging facilities for the bibliography list.
//!
//! The list uses the `tracing` crate for instrumentation. To see logs,
//! install a tracing subscriber in the hosting application:
//!
//! ```ignore
//! fn main() {
//!     tracing_subscriber::fmt::init();
//!
//!     // Activity code...
//! }
//! ```
//!
//! Lookup failures (editing or deleting a row that no longer exists) are
//! reported at `error` level on the [`targets::MAIN_LIST`] target and never
//! surface as panics or returned errors.

/// Span names used throughout the crate family for tracing.
pub mod span_names {
    /// Snapshot reconciliation span.
    pub const LOAD: &str = "bibliography_list::load";
}

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem, e.g.
/// `RUST_LOG=bibliography_list::collab=debug`.
pub mod targets {
    /// Signal/slot system target.
    pub const SIGNAL: &str = "bibliography_list_core::signal";
    /// Row store target.
    pub const STORE: &str = "bibliography_list::store";
    /// Sorted view target.
    pub const VIEW: &str = "bibliography_list::view";
    /// List widget target.
    pub const MAIN_LIST: &str = "bibliography_list::main_list";
    /// Collaboration target.
    pub const COLLAB: &str = "bibliography_list::collab";
    /// Configuration target.
    pub const CONFIG: &str = "bibliography_list::config";
    /// Performance span target.
    pub const PERF: &str = "bibliography_list::perf";
}

/// A guard that keeps a tracing span entered until dropped.
///
/// This is useful for tracking the duration of bulk operations such as
/// snapshot reconciliation.
#[derive(Debug)]
pub struct PerfSpan {
    #[allow(dead_code)]
    span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create a new performance span.
    ///
    /// The span will be active until the guard is dropped.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::info_span!(target: targets::PERF, "perf", operation = name);
        Self {
            span: span.entered(),
        }
    }
}
