//! Panel state and file list logic for dualpane.
//!
//! A [Panel] owns one directory listing, its cursor/scroll [Viewport] and its name filter.
//! All cursor movement goes through the viewport so the scroll invariant holds after every
//! action.

use crate::core::viewport::Viewport;
use crate::core::{FileEntry, Formatter};

use std::ffi::{OsStr, OsString};
use std::io;
use std::path::{Path, PathBuf};

/// One of the two file panels.
#[derive(Debug)]
pub(crate) struct Panel {
    path: PathBuf,
    entries: Vec<FileEntry>,
    view: Viewport,
    filter: String,
}

impl Panel {
    pub(crate) fn new(path: PathBuf) -> Self {
        Self {
            path,
            entries: Vec::new(),
            view: Viewport::default(),
            filter: String::new(),
        }
    }

    // Getters / Accessors

    #[inline]
    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    #[inline]
    pub(crate) fn entries(&self) -> &[FileEntry] {
        &self.entries
    }

    #[inline]
    pub(crate) fn filter(&self) -> &str {
        &self.filter
    }

    #[inline]
    pub(crate) fn cursor(&self) -> usize {
        self.view.cursor()
    }

    #[inline]
    pub(crate) fn scroll(&self) -> usize {
        self.view.scroll()
    }

    /// Entries matching the filter. `..` is always shown.
    pub(crate) fn shown_entries(&self) -> Box<dyn Iterator<Item = &FileEntry> + '_> {
        if self.filter.is_empty() {
            Box::new(self.entries.iter())
        } else {
            let filter_lower = self.filter.to_lowercase();
            Box::new(self.entries.iter().filter(move |e| {
                e.is_parent_link() || e.lowercase_name().contains(&filter_lower)
            }))
        }
    }

    #[inline]
    pub(crate) fn shown_len(&self) -> usize {
        self.shown_entries().count()
    }

    pub(crate) fn selected_entry(&self) -> Option<&FileEntry> {
        self.shown_entries().nth(self.view.cursor())
    }

    /// Full path of the selected entry. `None` for an empty list and for `..`.
    pub(crate) fn selected_path(&self) -> Option<PathBuf> {
        self.selected_entry()
            .filter(|e| !e.is_parent_link())
            .map(|e| self.path.join(e.name()))
    }

    // Loading

    /// Re-reads the current directory. On failure the previous entries are kept.
    pub(crate) fn load(&mut self, formatter: &Formatter, visible: usize) -> io::Result<()> {
        let entries = formatter.list_dir(&self.path).inspect_err(|e| {
            log::warn!("cannot read {}: {}", self.path.display(), e);
        })?;
        self.entries = entries;
        self.sync(visible);
        Ok(())
    }

    /// Switches to `path`, clearing the filter. When `focus` names an entry of the new
    /// listing the cursor lands on it, otherwise on the first row.
    ///
    /// Nothing changes when the new directory cannot be read.
    pub(crate) fn change_dir(
        &mut self,
        path: PathBuf,
        formatter: &Formatter,
        focus: Option<&OsStr>,
        visible: usize,
    ) -> io::Result<()> {
        let entries = formatter.list_dir(&path).inspect_err(|e| {
            log::warn!("cannot enter {}: {}", path.display(), e);
        })?;
        log::debug!("panel at {}", path.display());

        self.path = path;
        self.entries = entries;
        self.filter.clear();
        self.view.reset();
        if let Some(name) = focus {
            self.select_name(name, visible);
        }
        Ok(())
    }

    // Navigation functions

    /// Moves the cursor by `delta` rows without wrapping.
    pub(crate) fn navigate(&mut self, delta: isize, visible: usize) -> bool {
        let total = self.shown_len();
        self.view.step(delta, visible, total)
    }

    pub(crate) fn page(&mut self, direction: isize, visible: usize) {
        let total = self.shown_len();
        self.view.page(direction, visible, total);
    }

    pub(crate) fn to_start(&mut self) {
        self.view.to_start();
    }

    pub(crate) fn to_end(&mut self, visible: usize) {
        let total = self.shown_len();
        self.view.to_end(visible, total);
    }

    /// Puts the cursor on the shown entry called `name`.
    pub(crate) fn select_name(&mut self, name: &OsStr, visible: usize) -> bool {
        let total = self.shown_len();
        let found = self.shown_entries().position(|e| e.name() == name);
        match found {
            Some(idx) => {
                self.view.select(idx, visible, total);
                true
            }
            None => false,
        }
    }

    /// Re-establishes the scroll invariant, e.g. after a resize.
    pub(crate) fn sync(&mut self, visible: usize) {
        let total = self.shown_len();
        self.view.sync(visible, total);
    }

    // Filter

    /// Applies a name filter and moves the cursor to the top.
    pub(crate) fn set_filter(&mut self, filter: String) {
        self.filter = filter;
        self.view.reset();
    }

    pub(crate) fn clear_filter(&mut self) {
        self.filter.clear();
        self.view.reset();
    }

    /// Advances to the next filtered entry. Returns `true` when it wrapped to the first one.
    pub(crate) fn next_match(&mut self, visible: usize) -> bool {
        let total = self.shown_len();
        if self.view.cursor() + 1 >= total {
            self.view.select(0, visible, total);
            true
        } else {
            self.view.step(1, visible, total);
            false
        }
    }

    /// Name of the directory this panel is in, used to focus it after going up.
    pub(crate) fn dir_name(&self) -> Option<OsString> {
        self.path.file_name().map(OsStr::to_os_string)
    }
}
