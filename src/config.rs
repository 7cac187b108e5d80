//! Configuration for dualpane.
//!
//! - [general]: sorting, hidden files, deletion mode, input timings and logging.
//! - [input]: key bindings of the file manager and the text viewer.
//! - [theme]: colours of every screen element and highlight category.
//! - [load]: locating, parsing and generating `dualpane.toml`.

pub mod general;
pub mod input;
pub mod load;
pub mod theme;

pub(crate) use general::{General, InternalGeneral};
pub(crate) use input::{Keys, ViewerKeys};
pub(crate) use load::Config;
pub use theme::Theme;
