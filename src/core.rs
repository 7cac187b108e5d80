//! Core runtime logic for dualpane.
//!
//! This module contains the non-UI "engine" pieces used by the application:
//! - [width]: display column widths, padding and truncation of cell text.
//! - [highlight]: the single pass syntax highlighting tokenizer and its language rule sets.
//! - [input]: byte sources and the escape sequence aware key decoder.
//! - [viewport]: the scroll model and the terminal [viewport::Layout].
//! - [fm]: directory traversal and file metadata (see [browse_dir], [FileEntry]).
//! - [formatter]: sorting, size/time formatting and reading files for the viewer.
//! - [fileops]: copy, move and delete between the panels.
//! - [terminal]: terminal setup/teardown and the main event loop.

pub mod fileops;
pub mod fm;
pub mod formatter;
pub mod highlight;
pub mod input;
pub mod terminal;
pub mod viewport;
pub mod width;

pub use fm::{FileEntry, browse_dir};
pub use formatter::{Formatter, format_mtime, format_size};
