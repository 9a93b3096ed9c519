//! Grive Editor Buffer Library
//!
//! The in-memory text engine behind a minimal editor: a growable sequence of
//! byte lines plus a single cursor that every edit reads and moves.
//!
//! - `core`: line and document buffers, cursor, commands, snapshots
//! - `app`: configuration
//!
//! # Example
//!
//! ```
//! use grive::core::{Cursor, Document};
//!
//! let mut doc = Document::new();
//! doc.insert_text_before_cursor(b"hello");
//! doc.insert_new_line();
//! doc.tab();
//!
//! assert_eq!(doc.line_count(), 2);
//! assert_eq!(doc.cursor(), Cursor::new(1, 4));
//!
//! let mut out = Vec::new();
//! doc.save(&mut out).unwrap();
//! assert_eq!(out, b"hello\n    \n");
//! ```

pub mod app;
pub mod core;

pub use crate::app::Config;
pub use crate::core::{BufferError, BufferResult, Command, Cursor, Document, Line, Snapshot};
