//! Document buffer
//!
//! The document owns every line and the single cursor that all edits go
//! through. Byte-level edits are delegated to the active line; row-level
//! edits (new row, row removal) happen here.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Read, Write};
use std::path::Path;

use super::command::Command;
use super::cursor::Cursor;
use super::error::{BufferError, BufferResult};
use super::growth::grow_vec;
use super::line::Line;
use crate::app::{Config, MAX_TAB_WIDTH};

/// The text being edited: a sequence of lines plus a cursor
#[derive(Debug, Clone)]
pub struct Document {
    /// Rows in order
    lines: Vec<Line>,
    /// Edit position
    cursor: Cursor,
    /// Spaces inserted by `tab`
    tab_width: usize,
    /// First allocation for new lines
    line_initial_capacity: usize,
    /// First allocation for the row sequence
    row_initial_capacity: usize,
}

impl Document {
    /// Create an empty document with the default configuration
    pub fn new() -> Self {
        Self::with_config(&Config::default())
    }

    /// Create an empty document with a custom configuration
    pub fn with_config(config: &Config) -> Self {
        Self {
            lines: Vec::new(),
            cursor: Cursor::home(),
            tab_width: config.tab_width.min(MAX_TAB_WIDTH),
            line_initial_capacity: config.line_initial_capacity.max(1),
            row_initial_capacity: config.row_initial_capacity.max(1),
        }
    }

    /// Create a document loaded from `text`
    pub fn from_text(text: &str) -> Self {
        let mut doc = Self::new();
        // Reading from a slice into an empty document cannot fail
        let result = doc.load(text.as_bytes());
        debug_assert!(result.is_ok(), "loading from a slice failed: {result:?}");
        doc
    }

    /// Number of rows
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// True if the document has no rows at all
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of rows the document can hold without reallocating
    pub fn capacity(&self) -> usize {
        self.lines.capacity()
    }

    /// Line at `row`, if it exists
    pub fn line(&self, row: usize) -> Option<&Line> {
        self.lines.get(row)
    }

    /// Iterate over all rows in order
    pub fn lines(&self) -> impl Iterator<Item = &Line> {
        self.lines.iter()
    }

    /// Current cursor position
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Move the cursor, clamping it into the document
    pub fn set_cursor(&mut self, row: usize, col: usize) {
        self.cursor = Cursor::new(row, col);
        if self.lines.is_empty() {
            self.cursor = Cursor::home();
            return;
        }
        self.cursor.clamp_row(self.lines.len());
        self.cursor.clamp_col(self.lines[self.cursor.row].len());
    }

    /// Whole content with rows joined by newlines, invalid UTF-8 replaced
    pub fn text(&self) -> String {
        self.lines
            .iter()
            .map(Line::to_string_lossy)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Make room for `n` more rows, doubling capacity as needed
    pub fn grow(&mut self, n: usize) {
        grow_vec(&mut self.lines, n, self.row_initial_capacity);
    }

    /// Make sure the cursor row names an existing line.
    ///
    /// Clamps the row when it runs past the end, or creates the first empty
    /// line when the document has none.
    pub fn ensure_active_line(&mut self) {
        if self.cursor.row < self.lines.len() {
            return;
        }
        if self.lines.is_empty() {
            self.grow(1);
            let line = self.new_line();
            self.lines.push(line);
            self.cursor.row = 0;
        } else {
            self.cursor.clamp_row(self.lines.len());
        }
    }

    /// Open a fresh empty row below the cursor row and move onto it
    pub fn insert_new_line(&mut self) {
        self.ensure_active_line();
        self.grow(1);
        let row = self.cursor.row + 1;
        let line = self.new_line();
        self.lines.insert(row, line);
        self.cursor = Cursor::new(row, 0);
        tracing::debug!(row, rows = self.lines.len(), "inserted row");
    }

    /// Insert `text` before the cursor and move past it
    pub fn insert_text_before_cursor(&mut self, text: &[u8]) {
        self.ensure_active_line();
        let line = &mut self.lines[self.cursor.row];
        line.insert_before(text, &mut self.cursor.col);
    }

    /// Remove the byte before the cursor
    pub fn backspace(&mut self) {
        self.ensure_active_line();
        let line = &mut self.lines[self.cursor.row];
        line.backspace(&mut self.cursor.col);
    }

    /// Remove the byte under the cursor
    pub fn delete(&mut self) {
        self.ensure_active_line();
        let line = &mut self.lines[self.cursor.row];
        line.delete(&mut self.cursor.col);
    }

    /// Insert `tab_width` spaces before the cursor
    pub fn tab(&mut self) {
        let spaces = vec![b' '; self.tab_width];
        self.insert_text_before_cursor(&spaces);
    }

    /// Remove the cursor row when it is empty and the cursor sits at its start.
    ///
    /// The cursor lands at the end of the previous row. Returns whether a row
    /// was removed. The first row is never removed, and non-empty rows are
    /// never joined.
    pub fn remove_current_line_if_empty(&mut self) -> bool {
        if self.lines.is_empty() {
            return false;
        }
        self.cursor.clamp_row(self.lines.len());
        let row = self.cursor.row;
        if self.cursor.col != 0 || row == 0 || !self.lines[row].is_empty() {
            return false;
        }

        self.lines.remove(row);
        self.cursor.row = row - 1;
        self.cursor.col = self.lines[row - 1].len();
        tracing::debug!(row, rows = self.lines.len(), "removed empty row");
        true
    }

    /// Byte under the cursor, or `None` when the cursor is past the end
    pub fn char_under_cursor(&self) -> Option<u8> {
        self.lines
            .get(self.cursor.row)
            .and_then(|line| line.get(self.cursor.col))
    }

    /// Move one byte left
    pub fn move_left(&mut self) {
        self.cursor.move_left();
    }

    /// Move one byte right, up to the end of the row
    pub fn move_right(&mut self) {
        if self.lines.is_empty() {
            return;
        }
        self.cursor.clamp_row(self.lines.len());
        let len = self.lines[self.cursor.row].len();
        self.cursor.move_right(len);
    }

    /// Move one row up, snapping the column to the end of a shorter row
    pub fn move_up(&mut self) {
        if self.lines.is_empty() {
            return;
        }
        self.cursor.clamp_row(self.lines.len());
        if self.cursor.row > 0 {
            self.cursor.row -= 1;
            self.cursor.clamp_col(self.lines[self.cursor.row].len());
        }
    }

    /// Move one row down, snapping the column to the end of a shorter row
    pub fn move_down(&mut self) {
        if self.lines.is_empty() {
            return;
        }
        self.cursor.clamp_row(self.lines.len());
        if self.cursor.row + 1 < self.lines.len() {
            self.cursor.row += 1;
            self.cursor.clamp_col(self.lines[self.cursor.row].len());
        }
    }

    /// Apply a single edit command
    pub fn apply(&mut self, command: &Command) {
        match command {
            Command::InsertText(text) => self.insert_text_before_cursor(text),
            Command::NewLine => self.insert_new_line(),
            Command::Backspace => {
                self.backspace();
                self.remove_current_line_if_empty();
            },
            Command::Delete => self.delete(),
            Command::Tab => self.tab(),
            Command::MoveLeft => self.move_left(),
            Command::MoveRight => self.move_right(),
            Command::MoveUp => self.move_up(),
            Command::MoveDown => self.move_down(),
            Command::RemoveLineIfEmpty => {
                self.remove_current_line_if_empty();
            },
        }
    }

    /// Write every row followed by a newline byte
    pub fn save<W: Write>(&self, mut sink: W) -> BufferResult<()> {
        for line in &self.lines {
            sink.write_all(line.as_bytes()).map_err(BufferError::Write)?;
            sink.write_all(b"\n").map_err(BufferError::Write)?;
        }
        tracing::debug!(rows = self.lines.len(), "saved document");
        Ok(())
    }

    /// Replace the rows of an empty document with the content of `source`.
    ///
    /// Rows are split on `\n`; a trailing segment without a terminator still
    /// becomes a row, so an empty source yields one empty row. The document
    /// is left untouched if reading fails.
    pub fn load<R: Read>(&mut self, source: R) -> BufferResult<()> {
        self.check_empty()?;

        let mut reader = BufReader::new(source);
        let mut rows: Vec<Line> = Vec::new();
        let mut current = self.new_line();
        let mut chunk = Vec::new();
        loop {
            chunk.clear();
            let n = reader
                .read_until(b'\n', &mut chunk)
                .map_err(BufferError::Read)?;
            if n == 0 {
                break;
            }
            match chunk.split_last() {
                Some((b'\n', content)) => {
                    current.append(content);
                    let next = self.new_line();
                    grow_vec(&mut rows, 1, self.row_initial_capacity);
                    rows.push(std::mem::replace(&mut current, next));
                },
                _ => current.append(&chunk),
            }
        }
        grow_vec(&mut rows, 1, self.row_initial_capacity);
        rows.push(current);

        tracing::debug!(rows = rows.len(), "loaded document");
        self.lines = rows;
        self.cursor = Cursor::home();
        Ok(())
    }

    /// Load the file at `path` into this empty document
    pub fn load_from_file(&mut self, path: impl AsRef<Path>) -> BufferResult<()> {
        let path = path.as_ref();
        self.check_empty()?;
        let file = File::open(path).map_err(|source| BufferError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        self.load(file)
    }

    /// Save this document to the file at `path`, replacing its content
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> BufferResult<()> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|source| BufferError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let mut writer = BufWriter::new(file);
        self.save(&mut writer)?;
        writer.flush().map_err(BufferError::Write)
    }

    fn check_empty(&self) -> BufferResult<()> {
        if self.lines.is_empty() {
            Ok(())
        } else {
            tracing::warn!(rows = self.lines.len(), "refusing to load into a non-empty document");
            Err(BufferError::NotEmpty {
                rows: self.lines.len(),
            })
        }
    }

    fn new_line(&self) -> Line {
        Line::with_initial_capacity(self.line_initial_capacity)
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(doc: &Document) -> Vec<String> {
        doc.lines().map(Line::to_string_lossy).collect()
    }

    fn doc_at(text: &str, row: usize, col: usize) -> Document {
        let mut doc = Document::from_text(text);
        doc.set_cursor(row, col);
        doc
    }

    #[test]
    fn test_new_document_is_empty() {
        let doc = Document::new();
        assert!(doc.is_empty());
        assert_eq!(doc.line_count(), 0);
        assert_eq!(doc.capacity(), 0);
        assert_eq!(doc.cursor(), Cursor::home());
        assert_eq!(doc.char_under_cursor(), None);
    }

    #[test]
    fn test_insert_into_empty_document() {
        let mut doc = Document::new();
        doc.insert_text_before_cursor(b"hi");
        assert_eq!(rows(&doc), vec!["hi"]);
        assert_eq!(doc.cursor(), Cursor::new(0, 2));
        assert!(doc.capacity() >= 128);
    }

    #[test]
    fn test_ensure_active_line() {
        let mut doc = Document::new();
        doc.ensure_active_line();
        assert_eq!(doc.line_count(), 1);
        doc.ensure_active_line();
        assert_eq!(doc.line_count(), 1);

        let mut doc = Document::from_text("a\nb");
        doc.cursor.row = 9;
        doc.ensure_active_line();
        assert_eq!(doc.cursor().row, 1);
        assert_eq!(doc.line_count(), 2);
    }

    #[test]
    fn test_insert_new_line_at_end() {
        let mut doc = doc_at("hello", 0, 5);
        doc.insert_new_line();
        assert_eq!(rows(&doc), vec!["hello", ""]);
        assert_eq!(doc.cursor(), Cursor::new(1, 0));
    }

    #[test]
    fn test_insert_new_line_does_not_split() {
        let mut doc = doc_at("hello\nworld", 0, 2);
        doc.insert_new_line();
        assert_eq!(rows(&doc), vec!["hello", "", "world"]);
        assert_eq!(doc.cursor(), Cursor::new(1, 0));
    }

    #[test]
    fn test_insert_new_line_on_empty_document() {
        let mut doc = Document::new();
        doc.insert_new_line();
        assert_eq!(rows(&doc), vec!["", ""]);
        assert_eq!(doc.cursor(), Cursor::new(1, 0));
    }

    #[test]
    fn test_remove_empty_line() {
        let mut doc = doc_at("ab\n", 1, 0);
        assert_eq!(rows(&doc), vec!["ab", ""]);
        assert!(doc.remove_current_line_if_empty());
        assert_eq!(rows(&doc), vec!["ab"]);
        assert_eq!(doc.cursor(), Cursor::new(0, 2));
    }

    #[test]
    fn test_remove_line_keeps_following_rows() {
        let mut doc = doc_at("a\n\nc", 1, 0);
        assert!(doc.remove_current_line_if_empty());
        assert_eq!(rows(&doc), vec!["a", "c"]);
        assert_eq!(doc.cursor(), Cursor::new(0, 1));
    }

    #[test]
    fn test_remove_line_preconditions() {
        // Non-empty row
        let mut doc = doc_at("ab\ncd", 1, 0);
        assert!(!doc.remove_current_line_if_empty());
        assert_eq!(doc.line_count(), 2);

        // First row
        let mut doc = doc_at("\nx", 0, 0);
        assert!(!doc.remove_current_line_if_empty());
        assert_eq!(doc.line_count(), 2);

        // No rows
        let mut doc = Document::new();
        assert!(!doc.remove_current_line_if_empty());
        assert!(doc.is_empty());
    }

    #[test]
    fn test_delete_under_cursor() {
        let mut doc = doc_at("abc", 0, 1);
        doc.delete();
        assert_eq!(rows(&doc), vec!["ac"]);
        assert_eq!(doc.cursor(), Cursor::new(0, 1));
    }

    #[test]
    fn test_backspace() {
        let mut doc = doc_at("abc", 0, 3);
        doc.backspace();
        assert_eq!(rows(&doc), vec!["ab"]);
        assert_eq!(doc.cursor(), Cursor::new(0, 2));

        doc.set_cursor(0, 0);
        doc.backspace();
        assert_eq!(rows(&doc), vec!["ab"]);
        assert_eq!(doc.cursor(), Cursor::new(0, 0));
    }

    #[test]
    fn test_backspace_on_empty_document_materializes_line() {
        let mut doc = Document::new();
        doc.backspace();
        assert_eq!(rows(&doc), vec![""]);
        doc.delete();
        assert_eq!(rows(&doc), vec![""]);
    }

    #[test]
    fn test_tab() {
        let mut doc = Document::new();
        doc.tab();
        doc.insert_text_before_cursor(b"x");
        assert_eq!(rows(&doc), vec!["    x"]);
        assert_eq!(doc.cursor(), Cursor::new(0, 5));
    }

    #[test]
    fn test_tab_width_from_config() {
        let config = Config {
            tab_width: 2,
            ..Config::default()
        };
        let mut doc = Document::with_config(&config);
        doc.tab();
        assert_eq!(rows(&doc), vec!["  "]);
    }

    #[test]
    fn test_tab_width_is_capped() {
        let config = Config {
            tab_width: usize::MAX,
            ..Config::default()
        };
        let mut doc = Document::with_config(&config);
        doc.tab();
        assert_eq!(doc.line(0).unwrap().len(), MAX_TAB_WIDTH);
        assert_eq!(doc.cursor(), Cursor::new(0, MAX_TAB_WIDTH));
    }

    #[test]
    fn test_from_text_matches_load() {
        let mut loaded = Document::new();
        loaded.load(&b"one\n\nthree\n"[..]).unwrap();
        let doc = Document::from_text("one\n\nthree\n");
        assert_eq!(rows(&doc), rows(&loaded));
        assert_eq!(rows(&doc), vec!["one", "", "three", ""]);
        assert_eq!(doc.cursor(), Cursor::home());

        assert_eq!(rows(&Document::from_text("")), vec![""]);
    }

    #[test]
    fn test_char_under_cursor() {
        let mut doc = doc_at("abc\nd", 0, 1);
        assert_eq!(doc.char_under_cursor(), Some(b'b'));
        doc.set_cursor(0, 3);
        assert_eq!(doc.char_under_cursor(), None);
        doc.set_cursor(1, 0);
        assert_eq!(doc.char_under_cursor(), Some(b'd'));
    }

    #[test]
    fn test_horizontal_movement() {
        let mut doc = doc_at("ab", 0, 0);
        doc.move_left();
        assert_eq!(doc.cursor().col, 0);
        doc.move_right();
        doc.move_right();
        doc.move_right();
        assert_eq!(doc.cursor().col, 2);
        doc.move_left();
        assert_eq!(doc.cursor().col, 1);
    }

    #[test]
    fn test_vertical_movement_snaps_column() {
        let mut doc = doc_at("long line\nab\nlonger line", 0, 8);
        doc.move_down();
        assert_eq!(doc.cursor(), Cursor::new(1, 2));
        doc.move_down();
        assert_eq!(doc.cursor(), Cursor::new(2, 2));
        doc.move_down();
        assert_eq!(doc.cursor(), Cursor::new(2, 2));
        doc.move_up();
        doc.move_up();
        assert_eq!(doc.cursor(), Cursor::new(0, 2));
        doc.move_up();
        assert_eq!(doc.cursor(), Cursor::new(0, 2));
    }

    #[test]
    fn test_navigation_on_empty_document() {
        let mut doc = Document::new();
        doc.move_up();
        doc.move_down();
        doc.move_left();
        doc.move_right();
        assert!(doc.is_empty());
        assert_eq!(doc.cursor(), Cursor::home());
    }

    #[test]
    fn test_set_cursor_clamps() {
        let mut doc = Document::from_text("abc\nde");
        doc.set_cursor(7, 7);
        assert_eq!(doc.cursor(), Cursor::new(1, 2));

        let mut empty = Document::new();
        empty.set_cursor(3, 3);
        assert_eq!(empty.cursor(), Cursor::home());
    }

    #[test]
    fn test_apply_backspace_joins_empty_row() {
        let mut doc = Document::new();
        doc.apply(&Command::InsertText(b"ab".to_vec()));
        doc.apply(&Command::NewLine);
        doc.apply(&Command::Backspace);
        assert_eq!(rows(&doc), vec!["ab"]);
        assert_eq!(doc.cursor(), Cursor::new(0, 2));
    }

    #[test]
    fn test_apply_sequence() {
        let mut doc = Document::new();
        for command in [
            Command::InsertText(b"fn main".to_vec()),
            Command::NewLine,
            Command::Tab,
            Command::InsertText(b"x".to_vec()),
            Command::MoveUp,
            Command::MoveLeft,
            Command::Delete,
            Command::MoveDown,
            Command::MoveRight,
            Command::RemoveLineIfEmpty,
        ] {
            doc.apply(&command);
        }
        assert_eq!(rows(&doc), vec!["fn min", "    x"]);
        assert_eq!(doc.cursor(), Cursor::new(1, 5));
    }

    #[test]
    fn test_load_splits_rows() {
        let mut doc = Document::new();
        doc.load(&b"a\nb\n"[..]).unwrap();
        assert_eq!(rows(&doc), vec!["a", "b", ""]);
        assert_eq!(doc.cursor(), Cursor::home());
    }

    #[test]
    fn test_load_without_trailing_newline() {
        let mut doc = Document::new();
        doc.load(&b"one\ntwo"[..]).unwrap();
        assert_eq!(rows(&doc), vec!["one", "two"]);
    }

    #[test]
    fn test_load_empty_source() {
        let mut doc = Document::new();
        doc.load(&b""[..]).unwrap();
        assert_eq!(rows(&doc), vec![""]);
        assert_eq!(doc.cursor(), Cursor::home());
    }

    #[test]
    fn test_load_into_non_empty_is_rejected() {
        let mut doc = Document::from_text("keep");
        doc.set_cursor(0, 2);
        let err = doc.load(&b"other"[..]).unwrap_err();
        assert!(matches!(err, BufferError::NotEmpty { rows: 1 }));
        assert_eq!(rows(&doc), vec!["keep"]);
        assert_eq!(doc.cursor(), Cursor::new(0, 2));
    }

    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::Other, "disk gone"))
        }
    }

    #[test]
    fn test_load_failure_leaves_document_empty() {
        let mut doc = Document::new();
        let err = doc.load(FailingReader).unwrap_err();
        assert!(matches!(err, BufferError::Read(_)));
        assert!(doc.is_empty());
    }

    #[test]
    fn test_save_writes_terminator_per_row() {
        let doc = Document::from_text("a\n\nb");
        let mut out = Vec::new();
        doc.save(&mut out).unwrap();
        assert_eq!(out, b"a\n\nb\n");

        let mut out = Vec::new();
        Document::new().save(&mut out).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_text() {
        let doc = Document::from_text("x\ny\n");
        assert_eq!(doc.text(), "x\ny\n");
    }

    #[test]
    fn test_row_growth_doubles() {
        let config = Config {
            row_initial_capacity: 2,
            ..Config::default()
        };
        let mut doc = Document::with_config(&config);
        doc.insert_text_before_cursor(b"0");
        assert_eq!(doc.capacity(), 2);
        doc.insert_new_line();
        assert_eq!(doc.capacity(), 2);
        doc.insert_new_line();
        assert_eq!(doc.capacity(), 4);
        assert_eq!(rows(&doc), vec!["0", "", ""]);
    }
}
