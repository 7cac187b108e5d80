//! Sorting, filtering, and display formatting for dualpane.
//!
//! The [Formatter] struct holds the sorting and filtering rules from the `[general]` config
//! section and turns a raw directory read into the list a panel shows.
//!
//! Also formats sizes and modification times for the panel rows, loads files for the text
//! viewer and renders the hex dump shown for binary files.

use crate::core::{FileEntry, browse_dir};

use chrono::{DateTime, Local};
use humansize::BINARY;

use std::cmp::Ordering;
use std::fs;
use std::io;
use std::path::Path;
use std::time::SystemTime;

/// Largest file the viewer loads (10 MiB).
pub const MAX_VIEW_SIZE: u64 = 10 * 1024 * 1024;
/// Bytes shown in the hex dump of a binary file.
pub const HEX_DUMP_LIMIT: usize = 512;
const HEX_ROW: usize = 16;

const KIB: u64 = 1024;
const MIB: u64 = KIB * 1024;
const GIB: u64 = MIB * 1024;

/// Formatter struct to handle sorting and filtering of file entries based on user
/// preferences.
#[derive(Debug, Clone, Copy)]
pub struct Formatter {
    dirs_first: bool,
    show_hidden: bool,
    case_insensitive: bool,
}

impl Formatter {
    pub fn new(dirs_first: bool, show_hidden: bool, case_insensitive: bool) -> Self {
        Self {
            dirs_first,
            show_hidden,
            case_insensitive,
        }
    }

    /// Sorts the given file entries in place: `..` first, then directories (when
    /// `dirs_first`), then by name.
    pub fn sort_entries(&self, entries: &mut [FileEntry]) {
        entries.sort_by(|a, b| {
            match (a.is_parent_link(), b.is_parent_link()) {
                (true, false) => return Ordering::Less,
                (false, true) => return Ordering::Greater,
                _ => {}
            }
            if self.dirs_first {
                match (a.is_dir(), b.is_dir()) {
                    (true, false) => return Ordering::Less,
                    (false, true) => return Ordering::Greater,
                    _ => {}
                }
            }
            if self.case_insensitive {
                a.lowercase_name().cmp(b.lowercase_name())
            } else {
                a.name_str().cmp(&b.name_str())
            }
        });
    }

    /// Drops hidden entries unless configured otherwise, then sorts.
    pub fn filter_entries(&self, entries: &mut Vec<FileEntry>) {
        if !self.show_hidden {
            entries.retain(|e| !e.is_hidden());
        }
        self.sort_entries(entries);
    }

    /// Reads `path` and returns the list a panel displays, `..` included unless `path` is the
    /// filesystem root.
    pub fn list_dir(&self, path: &Path) -> io::Result<Vec<FileEntry>> {
        let mut entries = browse_dir(path)?;
        self.filter_entries(&mut entries);
        if path.parent().is_some() {
            entries.insert(0, FileEntry::parent_link());
        }
        Ok(entries)
    }
}

/// Right aligned seven column size: plain bytes below 1 KiB, otherwise one decimal and a
/// K/M/G suffix.
#[allow(clippy::cast_precision_loss)]
pub fn format_size(size: u64) -> String {
    let (value, unit) = match size {
        s if s < KIB => return format!("{:>7}", s),
        s if s < MIB => (s as f64 / KIB as f64, 'K'),
        s if s < GIB => (s as f64 / MIB as f64, 'M'),
        s => (s as f64 / GIB as f64, 'G'),
    };
    format!("{:>6.1}{}", value, unit)
}

/// Human readable size with binary units, used by the viewer header.
pub fn human_size(size: u64) -> String {
    humansize::format_size(size, BINARY)
}

/// Local modification time as `Mon DD HH:MM`, or empty when unknown.
pub fn format_mtime(modified: Option<SystemTime>) -> String {
    modified
        .map(|mtime| {
            let dt: DateTime<Local> = DateTime::from(mtime);
            dt.format("%b %d %H:%M").to_string()
        })
        .unwrap_or_default()
}

/// File contents as the viewer consumes them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileContent {
    Text(String),
    Binary(Vec<u8>),
}

/// Reads a file for viewing. Content that is not valid UTF-8 is returned as binary.
pub fn read_for_view(path: &Path) -> io::Result<FileContent> {
    let meta = fs::metadata(path)?;
    if !meta.is_file() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "not a regular file",
        ));
    }
    if meta.len() > MAX_VIEW_SIZE {
        return Err(io::Error::new(
            io::ErrorKind::FileTooLarge,
            format!("file too large to view ({})", human_size(meta.len())),
        ));
    }

    let bytes = fs::read(path)?;
    Ok(match String::from_utf8(bytes) {
        Ok(text) => FileContent::Text(text),
        Err(e) => FileContent::Binary(e.into_bytes()),
    })
}

/// Classic hex dump of the first `limit` bytes: offset, sixteen hex bytes split in two
/// groups of eight, then the printable ASCII column.
pub fn hex_dump(bytes: &[u8], limit: usize) -> Vec<String> {
    let shown = &bytes[..bytes.len().min(limit)];
    let mut lines = Vec::with_capacity(shown.len().div_ceil(HEX_ROW));

    for (row, chunk) in shown.chunks(HEX_ROW).enumerate() {
        let mut hex = String::with_capacity(HEX_ROW * 3 + 1);
        let mut ascii = String::with_capacity(HEX_ROW);

        for i in 0..HEX_ROW {
            match chunk.get(i) {
                Some(b) => {
                    hex.push_str(&format!("{:02X} ", b));
                    ascii.push(if (32..127).contains(b) {
                        char::from(*b)
                    } else {
                        '.'
                    });
                }
                None => hex.push_str("   "),
            }
            if i == 7 {
                hex.push(' ');
            }
        }

        lines.push(format!("{:08X}  {} |{}|", row * HEX_ROW, hex, ascii));
    }
    lines
}
