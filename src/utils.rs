//! Miscellaneous utility functions for dualpane.
//!
//! [helpers] holds colour parsing, recursive copy and home path handling.
//! [cli] parses the command line of the `dp` binary.

pub mod cli;
pub mod helpers;

pub use helpers::{copy_recursive, expand_home_path, get_home, join_input_path, parse_color};
