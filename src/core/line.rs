//! Line buffer
//!
//! A line is one row of raw bytes with no embedded newline. Every edit
//! takes the column as `&mut usize`: the column is clamped to the line
//! before use and left where the cursor should land afterwards.

use std::fmt;

use super::growth::{grow_vec, LINE_INIT_CAPACITY};

/// A growable row of bytes
#[derive(Clone)]
pub struct Line {
    /// Used bytes; spare capacity lives in the Vec allocation
    bytes: Vec<u8>,
    /// First allocation size when growing from empty
    initial_capacity: usize,
}

impl Line {
    /// Create an empty line with no allocation
    pub fn new() -> Self {
        Self::with_initial_capacity(LINE_INIT_CAPACITY)
    }

    /// Create an empty line that allocates `initial_capacity` bytes on first growth
    pub fn with_initial_capacity(initial_capacity: usize) -> Self {
        Self {
            bytes: Vec::new(),
            initial_capacity: initial_capacity.max(1),
        }
    }

    /// Create a line holding a copy of `bytes`
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut line = Self::new();
        line.append(bytes);
        line
    }

    /// Number of used bytes
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// True if the line holds no bytes
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Number of bytes the line can hold without reallocating
    pub fn capacity(&self) -> usize {
        self.bytes.capacity()
    }

    /// The used bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Byte at `col`, if inside the line
    pub fn get(&self, col: usize) -> Option<u8> {
        self.bytes.get(col).copied()
    }

    /// Line content as text, replacing invalid UTF-8
    pub fn to_string_lossy(&self) -> String {
        String::from_utf8_lossy(&self.bytes).into_owned()
    }

    /// Make room for `n` more bytes, doubling capacity as needed
    pub fn grow(&mut self, n: usize) {
        grow_vec(&mut self.bytes, n, self.initial_capacity);
    }

    /// Insert `text` before `col`, leaving `col` just past the inserted text
    pub fn insert_before(&mut self, text: &[u8], col: &mut usize) {
        let at = self.clamp(col);
        self.grow(text.len());
        self.bytes.splice(at..at, text.iter().copied());
        *col = at + text.len();
    }

    /// Append `text` to the end of the line
    pub fn append(&mut self, text: &[u8]) {
        let mut col = self.len();
        self.insert_before(text, &mut col);
    }

    /// Remove the byte before `col` and step `col` back by one
    pub fn backspace(&mut self, col: &mut usize) {
        let at = self.clamp(col);
        if at > 0 {
            self.bytes.remove(at - 1);
            *col = at - 1;
        }
    }

    /// Remove the byte at `col`; `col` stays put
    pub fn delete(&mut self, col: &mut usize) {
        let at = self.clamp(col);
        if at < self.bytes.len() {
            self.bytes.remove(at);
        }
    }

    fn clamp(&self, col: &mut usize) -> usize {
        if *col > self.bytes.len() {
            *col = self.bytes.len();
        }
        *col
    }
}

impl Default for Line {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for Line {
    fn eq(&self, other: &Self) -> bool {
        self.bytes == other.bytes
    }
}

impl Eq for Line {}

impl fmt::Debug for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Line")
            .field("text", &self.to_string_lossy())
            .field("capacity", &self.capacity())
            .finish()
    }
}
