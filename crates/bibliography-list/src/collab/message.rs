//! Messages exchanged with collaborating peers.

use serde::{Deserialize, Serialize};

use crate::model::Row;

/// A change to the list, as broadcast to (or received from) peers.
///
/// Serialised as a JSON object tagged by `action`:
///
/// ```
/// use bibliography_list::{CollabMessage, Row};
///
/// let message = CollabMessage::EditItem {
///     path: "2".into(),
///     args: Row::new("Smith 2021", "book", "{}"),
/// };
/// assert_eq!(
///     serde_json::to_string(&message).unwrap(),
///     r#"{"action":"edit_item","path":"2","args":["Smith 2021","book","{}"]}"#,
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum CollabMessage {
    /// A row was added by a peer, or was found missing from a peer's snapshot.
    AddItem {
        /// The added row.
        args: Row,
    },
    /// The row at `path` was overwritten.
    EditItem {
        /// Insertion position of the edited row, as produced by
        /// [`ModelIndex::path`](crate::model::ModelIndex::path).
        path: String,
        /// The new field values.
        args: Row,
    },
    /// A row was deleted.
    DeleteRow {
        /// The deleted row.
        args: Row,
    },
}

impl CollabMessage {
    /// The `action` name this message is tagged with.
    pub fn action(&self) -> &'static str {
        match self {
            CollabMessage::AddItem { .. } => "add_item",
            CollabMessage::EditItem { .. } => "edit_item",
            CollabMessage::DeleteRow { .. } => "delete_row",
        }
    }

    /// The row carried by this message.
    pub fn row(&self) -> &Row {
        match self {
            CollabMessage::AddItem { args }
            | CollabMessage::EditItem { args, .. }
            | CollabMessage::DeleteRow { args } => args,
        }
    }

    /// Parses a message received from the transport.
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialises this message for the transport.
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_item_wire_format() {
        let message = CollabMessage::AddItem {
            args: Row::new("A", "book", "{}"),
        };
        assert_eq!(
            message.to_json().unwrap(),
            r#"{"action":"add_item","args":["A","book","{}"]}"#
        );
        assert_eq!(message.action(), "add_item");
    }

    #[test]
    fn test_parse_delete_row() {
        let message =
            CollabMessage::from_json(r#"{"action":"delete_row","args":["A","book","{}"]}"#)
                .unwrap();
        assert_eq!(
            message,
            CollabMessage::DeleteRow {
                args: Row::new("A", "book", "{}")
            }
        );
        assert_eq!(message.row().text, "A");
    }

    #[test]
    fn test_unknown_action_is_rejected() {
        let result = CollabMessage::from_json(r#"{"action":"rename","args":["A","b","c"]}"#);
        assert!(matches!(result, Err(crate::ListError::Snapshot(_))));
    }
}
