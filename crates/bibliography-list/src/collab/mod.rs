//! Collaboration layer.
//!
//! Local mutations that peers must see are posted to a
//! [`CollaborationSink`] as [`CollabMessage`]s. Messages arriving from peers
//! are applied with
//! [`BibliographyList::apply_remote`](crate::BibliographyList::apply_remote),
//! which never posts back, so changes do not echo between peers.

mod message;
mod sink;

pub use message::CollabMessage;
pub use sink::{ChannelSink, CollaborationSink, NullSink};
