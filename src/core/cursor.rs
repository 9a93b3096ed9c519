//! Cursor state
//!
//! The cursor is a plain (row, column) index pair into the document, never
//! a reference into line storage. Rows can disappear under it, so it is
//! re-clamped whenever the document reads through it.

use serde::{Deserialize, Serialize};

/// Edit position: 0-based row and 0-based byte column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Cursor {
    /// Row index
    pub row: usize,
    /// Byte offset into the row
    pub col: usize,
}

impl Cursor {
    /// Create a cursor at the given position
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Cursor at (0, 0)
    pub fn home() -> Self {
        Self::default()
    }

    /// Pull the row back inside `rows` rows. Leaves the row alone when there are none.
    pub fn clamp_row(&mut self, rows: usize) {
        if rows > 0 && self.row >= rows {
            self.row = rows - 1;
        }
    }

    /// Pull the column back inside a line of `len` bytes
    pub fn clamp_col(&mut self, len: usize) {
        self.col = self.col.min(len);
    }

    /// Step one column left, stopping at column 0
    pub fn move_left(&mut self) {
        self.col = self.col.saturating_sub(1);
    }

    /// Step one column right, stopping at `len`
    pub fn move_right(&mut self, len: usize) {
        if self.col < len {
            self.col += 1;
        }
    }
}
