//! Directory browsing logic for dualpane.
//!
//! Provides the [FileEntry] struct shown in both panels and [browse_dir], which reads one
//! directory into entries. Sorting and hidden-file filtering happen in
//! [crate::core::formatter::Formatter].

use std::borrow::Cow;
use std::ffi::{OsStr, OsString};
use std::fs;
use std::io;
use std::path::Path;
use std::time::SystemTime;

/// Name of the synthetic entry leading to the parent directory.
pub const PARENT_LINK: &str = "..";

/// A single entry in a directory listing.
#[derive(Debug, Clone)]
pub struct FileEntry {
    name: Box<OsStr>,
    lowercase_name: String,
    flags: u8,
    size: u64,
    modified: Option<SystemTime>,
}

impl FileEntry {
    pub(crate) const IS_DIR: u8 = 1 << 0;
    pub(crate) const IS_HIDDEN: u8 = 1 << 1;
    pub(crate) const IS_PARENT_LINK: u8 = 1 << 2;

    pub fn new(name: OsString, flags: u8, size: u64, modified: Option<SystemTime>) -> Self {
        let lowercase_name = name.to_string_lossy().to_lowercase();
        FileEntry {
            name: name.into_boxed_os_str(),
            lowercase_name,
            flags,
            size,
            modified,
        }
    }

    /// The `..` entry heading every non-root listing.
    pub fn parent_link() -> Self {
        Self::new(
            OsString::from(PARENT_LINK),
            Self::IS_DIR | Self::IS_PARENT_LINK,
            0,
            None,
        )
    }

    // Accessors

    #[inline]
    pub fn name(&self) -> &OsStr {
        &self.name
    }

    #[inline]
    pub fn name_str(&self) -> Cow<'_, str> {
        self.name.to_string_lossy()
    }

    #[inline]
    pub fn lowercase_name(&self) -> &str {
        &self.lowercase_name
    }

    #[inline]
    pub fn size(&self) -> u64 {
        self.size
    }

    #[inline]
    pub fn modified(&self) -> Option<SystemTime> {
        self.modified
    }

    #[inline]
    pub fn is_dir(&self) -> bool {
        self.flags & Self::IS_DIR != 0
    }

    #[inline]
    pub fn is_hidden(&self) -> bool {
        self.flags & Self::IS_HIDDEN != 0
    }

    #[inline]
    pub fn is_parent_link(&self) -> bool {
        self.flags & Self::IS_PARENT_LINK != 0
    }
}

/// Reads the contents of `path` into entries, unsorted and without the `..` entry.
///
/// Entries that vanish or cannot be inspected while reading are skipped.
pub fn browse_dir(path: &Path) -> io::Result<Vec<FileEntry>> {
    let mut entries = Vec::with_capacity(256);

    for entry in fs::read_dir(path)? {
        let Ok(entry) = entry else {
            continue;
        };
        let Ok(ft) = entry.file_type() else {
            continue;
        };

        let name = entry.file_name();
        let mut flags = 0u8;

        // follow symlinks so a link to a directory is browsable
        let metadata = if ft.is_symlink() {
            fs::metadata(entry.path()).ok()
        } else {
            entry.metadata().ok()
        };

        let is_dir = metadata.as_ref().map_or(ft.is_dir(), |md| md.is_dir());
        if is_dir {
            flags |= FileEntry::IS_DIR;
        }

        if name.to_string_lossy().starts_with('.') {
            flags |= FileEntry::IS_HIDDEN;
        }

        let size = match &metadata {
            Some(md) if !is_dir => md.len(),
            _ => 0,
        };
        let modified = metadata.as_ref().and_then(|md| md.modified().ok());

        entries.push(FileEntry::new(name, flags, size, modified));
    }
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn file_entry_flags() {
        let fe_file = FileEntry::new(OsString::from("File.TXT"), 0, 12, None);
        assert!(!fe_file.is_dir());
        assert_eq!(fe_file.name_str(), "File.TXT");
        assert_eq!(fe_file.lowercase_name(), "file.txt");

        let flags = FileEntry::IS_DIR | FileEntry::IS_HIDDEN;
        let fe_dir = FileEntry::new(OsString::from(".hidden_folder"), flags, 0, None);
        assert!(fe_dir.is_dir());
        assert!(fe_dir.is_hidden());
        assert!(!fe_dir.is_parent_link());

        let up = FileEntry::parent_link();
        assert!(up.is_dir() && up.is_parent_link());
        assert_eq!(up.name_str(), "..");
    }

    #[test]
    fn browse_reads_metadata() -> Result<(), Box<dyn std::error::Error>> {
        let tmp = TempDir::new()?;
        let mut file = File::create(tmp.path().join("hello.txt"))?;
        write!(file, "abc123")?;
        fs::create_dir(tmp.path().join("sub"))?;
        File::create(tmp.path().join(".dotfile"))?;

        let mut entries = browse_dir(tmp.path())?;
        entries.sort_by(|a, b| a.name().cmp(b.name()));
        assert_eq!(entries.len(), 3);

        let hello = entries
            .iter()
            .find(|e| e.name() == "hello.txt")
            .ok_or("hello.txt missing")?;
        assert_eq!(hello.size(), 6);
        assert!(hello.modified().is_some());

        let sub = entries
            .iter()
            .find(|e| e.name() == "sub")
            .ok_or("sub missing")?;
        assert!(sub.is_dir());
        assert_eq!(sub.size(), 0);

        assert!(entries.iter().any(|e| e.is_hidden()));
        Ok(())
    }

    #[test]
    fn browse_nonexistent() {
        let path = PathBuf::from("/path/does/not/exist");
        assert!(browse_dir(&path).is_err());
    }
}
