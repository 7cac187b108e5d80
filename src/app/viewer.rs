//! Text viewer state for dualpane.
//!
//! Holds the lines of the opened file, the top-line scroll offset and the search results.
//! Binary files get a hex dump instead of text and close on any key.

use crate::core::formatter::{FileContent, HEX_DUMP_LIMIT, hex_dump, read_for_view};
use crate::core::highlight::{LanguageRules, language_for_path, rules_for};
use crate::core::viewport::{max_scroll, page_move};

use std::io;
use std::ops::Range;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub(crate) enum ViewerContent {
    Text {
        lines: Vec<String>,
        rules: Option<&'static LanguageRules>,
    },
    Binary {
        dump: Vec<String>,
    },
}

#[derive(Debug)]
pub(crate) struct Viewer {
    path: PathBuf,
    name: String,
    content: ViewerContent,
    top: usize,
    search: String,
    matches: Vec<usize>,
    current: Option<usize>,
}

impl Viewer {
    /// Reads `path` for viewing. Fails for unreadable, non-regular and oversized files.
    pub(crate) fn open(path: &Path) -> io::Result<Self> {
        let content = match read_for_view(path)? {
            FileContent::Text(text) => ViewerContent::Text {
                lines: text.split('\n').map(str::to_string).collect(),
                rules: language_for_path(path).and_then(rules_for),
            },
            FileContent::Binary(bytes) => ViewerContent::Binary {
                dump: hex_dump(&bytes, HEX_DUMP_LIMIT),
            },
        };
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        log::info!("viewing {}", path.display());

        Ok(Self {
            path: path.to_path_buf(),
            name,
            content,
            top: 0,
            search: String::new(),
            matches: Vec::new(),
            current: None,
        })
    }

    // Getters / accessors

    #[inline]
    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    #[inline]
    pub(crate) fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub(crate) fn content(&self) -> &ViewerContent {
        &self.content
    }

    #[inline]
    pub(crate) fn is_binary(&self) -> bool {
        matches!(self.content, ViewerContent::Binary { .. })
    }

    #[inline]
    pub(crate) fn top(&self) -> usize {
        self.top
    }

    #[inline]
    pub(crate) fn search(&self) -> &str {
        &self.search
    }

    pub(crate) fn total(&self) -> usize {
        match &self.content {
            ViewerContent::Text { lines, .. } => lines.len(),
            ViewerContent::Binary { dump } => dump.len(),
        }
    }

    /// Column width of the line number gutter: digits of the line count plus one.
    pub(crate) fn gutter_width(&self) -> usize {
        self.total().to_string().len() + 1
    }

    /// `Line a-b/total` for the header.
    pub(crate) fn line_range(&self, height: usize) -> String {
        let total = self.total();
        format!(
            "Line {}-{}/{}",
            self.top + 1,
            (self.top + height).min(total),
            total
        )
    }

    /// Footer text while a search is active.
    pub(crate) fn search_status(&self) -> Option<String> {
        if self.search.is_empty() {
            return None;
        }
        Some(match self.current {
            Some(current) if !self.matches.is_empty() => format!(
                "Search: '{}' ({}/{} matches)",
                self.search,
                current + 1,
                self.matches.len()
            ),
            _ => format!("Search: '{}' (no matches)", self.search),
        })
    }

    // Scrolling

    pub(crate) fn scroll_up(&mut self) {
        self.top = self.top.saturating_sub(1);
    }

    pub(crate) fn scroll_down(&mut self) {
        if self.top + 1 < self.total() {
            self.top += 1;
        }
    }

    pub(crate) fn page(&mut self, direction: isize, height: usize) {
        self.top = page_move(self.top, direction, height, self.total());
    }

    pub(crate) fn to_top(&mut self) {
        self.top = 0;
    }

    pub(crate) fn to_bottom(&mut self, height: usize) {
        self.top = max_scroll(self.total(), height);
    }

    /// Jumps to a 1-based line number. Input that is not a number is ignored.
    pub(crate) fn go_to_line(&mut self, input: &str) -> bool {
        let Ok(line) = input.trim().parse::<i64>() else {
            return false;
        };
        let last = self.total().saturating_sub(1);
        self.top = usize::try_from(line.saturating_sub(1))
            .unwrap_or(0)
            .min(last);
        true
    }

    // Search

    /// Collects the lines containing `query` (ASCII case-insensitive) and jumps to the first.
    /// An empty query clears the search.
    pub(crate) fn set_search(&mut self, query: String) {
        self.matches.clear();
        self.current = None;
        self.search = query;
        if self.search.is_empty() {
            return;
        }

        if let ViewerContent::Text { lines, .. } = &self.content {
            let needle = self.search.to_ascii_lowercase();
            self.matches = lines
                .iter()
                .enumerate()
                .filter(|(_, line)| line.to_ascii_lowercase().contains(&needle))
                .map(|(idx, _)| idx)
                .collect();
        }
        log::debug!("search {:?}: {} matches", self.search, self.matches.len());

        if let Some(&first) = self.matches.first() {
            self.current = Some(0);
            self.top = first;
        }
    }

    pub(crate) fn next_match(&mut self) {
        self.cycle_match(1);
    }

    pub(crate) fn prev_match(&mut self) {
        self.cycle_match(-1);
    }

    fn cycle_match(&mut self, step: isize) {
        let count = self.matches.len();
        if count == 0 {
            return;
        }
        let current = self.current.unwrap_or(0);
        let next = (current + count).wrapping_add_signed(step) % count;
        self.current = Some(next);
        self.top = self.matches[next];
    }
}

/// Byte ranges of every non-overlapping ASCII case-insensitive occurrence of `query`.
pub(crate) fn match_ranges(line: &str, query: &str) -> Vec<Range<usize>> {
    if query.is_empty() {
        return Vec::new();
    }
    let haystack = line.to_ascii_lowercase();
    let needle = query.to_ascii_lowercase();
    haystack
        .match_indices(&needle)
        .map(|(start, m)| start..start + m.len())
        .collect()
}
