//! Buffer Core Module
//!
//! Platform-independent editing state. This module contains:
//! - Line buffers (one growable byte row each)
//! - The document: owned rows plus the single edit cursor
//! - Named edit commands and their dispatch
//! - Deterministic snapshot generation
//!
//! The core is single-threaded and deterministic: the same sequence of
//! commands always produces the same document.

mod command;
mod cursor;
mod document;
mod error;
mod growth;
mod line;
mod snapshot;

pub use command::{Command, ParseCommandError};
pub use cursor::Cursor;
pub use document::Document;
pub use error::{BufferError, BufferResult};
pub use growth::{grown_capacity, DOCUMENT_INIT_CAPACITY, LINE_INIT_CAPACITY};
pub use line::Line;
pub use snapshot::{CursorSnapshot, Snapshot};
