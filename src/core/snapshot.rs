//! Deterministic snapshot generation
//!
//! Snapshots capture the document rows and cursor in a serializable format
//! for testing and debugging. Replaying the same commands must produce
//! identical snapshots.

use serde::{Deserialize, Serialize};

use super::cursor::Cursor;
use super::document::Document;

/// A complete snapshot of the document state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Number of rows
    pub line_count: usize,
    /// Row contents, invalid UTF-8 replaced
    pub rows: Vec<String>,
    /// Cursor state
    pub cursor: CursorSnapshot,
}

/// Snapshot of the cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CursorSnapshot {
    pub row: usize,
    pub col: usize,
    /// Byte under the cursor, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub under: Option<u8>,
}

impl From<Cursor> for CursorSnapshot {
    fn from(cursor: Cursor) -> Self {
        CursorSnapshot {
            row: cursor.row,
            col: cursor.col,
            under: None,
        }
    }
}

impl Snapshot {
    /// Create a snapshot from the current document state
    pub fn from_document(doc: &Document) -> Self {
        let mut cursor = CursorSnapshot::from(doc.cursor());
        cursor.under = doc.char_under_cursor();
        Snapshot {
            line_count: doc.line_count(),
            rows: doc.lines().map(|line| line.to_string_lossy()).collect(),
            cursor,
        }
    }

    /// Convert snapshot to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Parse snapshot from JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Plain text view: a cursor header followed by one numbered row per line
    pub fn to_text(&self) -> String {
        let mut result = format!("cursor: ({}, {})\n", self.cursor.row, self.cursor.col);
        for (i, row) in self.rows.iter().enumerate() {
            let marker = if i == self.cursor.row { '>' } else { ' ' };
            result.push_str(&format!("{}{:4} | {}\n", marker, i + 1, row));
        }
        result
    }
}
