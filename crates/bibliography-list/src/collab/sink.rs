//! Collaboration sinks: where local changes are posted for peers.

use crossbeam_channel::{Receiver, Sender};

use bibliography_list_core::logging::targets;

use super::message::CollabMessage;

/// The capability to broadcast local changes to remote peers.
///
/// The list only ever calls [`post`](Self::post); transporting the message
/// is the sink's business. Sinks are handed to the list at construction, so
/// the same list can be wired to a live session, a queue, or nothing.
///
/// Any `Fn(CollabMessage) + Send + Sync` closure is a sink.
pub trait CollaborationSink: Send + Sync {
    /// Broadcasts a change.
    fn post(&self, message: CollabMessage);
}

impl<F> CollaborationSink for F
where
    F: Fn(CollabMessage) + Send + Sync,
{
    fn post(&self, message: CollabMessage) {
        self(message)
    }
}

/// A sink that discards every message, for activities that are not shared.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl CollaborationSink for NullSink {
    fn post(&self, message: CollabMessage) {
        tracing::trace!(target: targets::COLLAB, action = message.action(), "not shared, dropping message");
    }
}

/// A sink that queues messages on a channel for the transport to drain.
///
/// ```
/// use bibliography_list::collab::{ChannelSink, CollaborationSink};
/// use bibliography_list::{CollabMessage, Row};
///
/// let (sink, outgoing) = ChannelSink::unbounded();
/// sink.post(CollabMessage::AddItem { args: Row::new("A", "book", "{}") });
///
/// assert_eq!(outgoing.try_recv().unwrap().action(), "add_item");
/// ```
#[derive(Debug, Clone)]
pub struct ChannelSink {
    sender: Sender<CollabMessage>,
}

impl ChannelSink {
    /// Creates a sink feeding the given sender.
    pub fn new(sender: Sender<CollabMessage>) -> Self {
        Self { sender }
    }

    /// Creates a sink together with the receiving end of an unbounded queue.
    pub fn unbounded() -> (Self, Receiver<CollabMessage>) {
        let (sender, receiver) = crossbeam_channel::unbounded();
        (Self::new(sender), receiver)
    }
}

impl CollaborationSink for ChannelSink {
    fn post(&self, message: CollabMessage) {
        let action = message.action();
        match self.sender.send(message) {
            Ok(()) => tracing::debug!(target: targets::COLLAB, action, "message queued"),
            Err(_) => {
                tracing::warn!(target: targets::COLLAB, action, "collaboration queue closed, message dropped")
            }
        }
    }
}
