//! The bibliography row value type.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One bibliography entry.
///
/// A row is a value: two rows are the same row exactly when all three fields
/// are equal. There is no separate key, so lookup, deletion and edit
/// matching all compare the full triple.
///
/// On the wire and in snapshots a row is a 3-element array
/// `[text, type, data]`:
///
/// ```
/// use bibliography_list::Row;
///
/// let row = Row::new("Smith, J. (2020). Rust.", "book", "[\"Smith\"]");
/// let json = serde_json::to_string(&row).unwrap();
/// assert_eq!(json, r#"["Smith, J. (2020). Rust.","book","[\"Smith\"]"]"#);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "(String, String, String)", into = "(String, String, String)")]
pub struct Row {
    /// Human-readable citation shown in the list.
    pub text: String,
    /// Category label, e.g. `"book"` or `"article"`.
    pub kind: String,
    /// Serialized structured fields, typically JSON.
    pub data: String,
}

impl Row {
    /// Creates a row from its three fields.
    pub fn new(text: impl Into<String>, kind: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: kind.into(),
            data: data.into(),
        }
    }

    /// The `(type, data)` pair handed to an external editor.
    ///
    /// The display text is left out: editors derive it from these fields.
    pub fn edit_payload(&self) -> (String, String) {
        (self.kind.clone(), self.data.clone())
    }
}

impl From<(String, String, String)> for Row {
    fn from((text, kind, data): (String, String, String)) -> Self {
        Self { text, kind, data }
    }
}

impl From<Row> for (String, String, String) {
    fn from(row: Row) -> Self {
        (row.text, row.kind, row.data)
    }
}

impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:?}, {:?}, {:?}]", self.text, self.kind, self.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_tuple_equality() {
        let a = Row::new("Smith 2020", "book", "{}");
        assert_eq!(a, Row::new("Smith 2020", "book", "{}"));
        assert_ne!(a, Row::new("Smith 2020", "article", "{}"));
        assert_ne!(a, Row::new("Smith 2020", "book", "{\"a\":1}"));
    }

    #[test]
    fn test_deserialize_from_array() {
        let row: Row = serde_json::from_str(r#"["A","book","{}"]"#).unwrap();
        assert_eq!(row, Row::new("A", "book", "{}"));
    }

    #[test]
    fn test_rejects_wrong_arity() {
        assert!(serde_json::from_str::<Row>(r#"["A","book"]"#).is_err());
    }

    #[test]
    fn test_edit_payload_excludes_text() {
        let row = Row::new("Jones 2019", "article", "[1]");
        assert_eq!(row.edit_payload(), ("article".to_string(), "[1]".to_string()));
    }
}
