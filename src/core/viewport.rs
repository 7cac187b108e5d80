//! Scroll model for the panel lists and the text viewer.
//!
//! All functions here are pure: they take the cursor, the current scroll offset, the number of
//! visible rows and the item count and return the new values. [Viewport] bundles the two
//! mutable values for the owners (panels) and [Layout] derives every row/column budget from the
//! terminal geometry.

/// Returns the scroll offset that keeps `cursor` inside the visible window.
///
/// The result always satisfies `scroll <= cursor < scroll + visible` and never exceeds
/// `total - visible`. A zero sized window is treated as one row.
pub fn adjust(cursor: usize, scroll: usize, visible: usize, total: usize) -> usize {
    let visible = visible.max(1);
    let scroll = if cursor < scroll {
        cursor
    } else if cursor >= scroll + visible {
        cursor + 1 - visible
    } else {
        scroll
    };
    scroll.min(max_scroll(total, visible))
}

/// Largest valid scroll offset for a list of `total` items.
#[inline]
pub fn max_scroll(total: usize, visible: usize) -> usize {
    total.saturating_sub(visible.max(1))
}

/// Cursor and scroll for "jump to start".
#[inline]
pub fn jump_to_start() -> (usize, usize) {
    (0, 0)
}

/// Cursor and scroll for "jump to end": the cursor lands on the last item and the scroll is
/// recomputed with [adjust].
pub fn jump_to_end(scroll: usize, visible: usize, total: usize) -> (usize, usize) {
    let cursor = total.saturating_sub(1);
    (cursor, adjust(cursor, scroll, visible, total))
}

/// Moves `cursor` by one page in `direction` (negative is up), clamped to `[0, total - 1]`.
pub fn page_move(cursor: usize, direction: isize, visible: usize, total: usize) -> usize {
    let last = total.saturating_sub(1);
    let step = visible.saturating_mul(direction.unsigned_abs());
    if direction < 0 {
        cursor.saturating_sub(step).min(last)
    } else {
        cursor.saturating_add(step).min(last)
    }
}

/// Cursor and scroll offset of a single list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Viewport {
    cursor: usize,
    scroll: usize,
}

impl Viewport {
    #[inline]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    #[inline]
    pub fn scroll(&self) -> usize {
        self.scroll
    }

    pub fn reset(&mut self) {
        (self.cursor, self.scroll) = jump_to_start();
    }

    /// Moves one row when the target exists, otherwise stays put.
    pub fn step(&mut self, delta: isize, visible: usize, total: usize) -> bool {
        let Some(next) = self.cursor.checked_add_signed(delta) else {
            return false;
        };
        if next >= total {
            return false;
        }
        self.cursor = next;
        self.sync(visible, total);
        true
    }

    pub fn page(&mut self, direction: isize, visible: usize, total: usize) {
        self.cursor = page_move(self.cursor, direction, visible, total);
        self.sync(visible, total);
    }

    pub fn to_start(&mut self) {
        self.reset();
    }

    pub fn to_end(&mut self, visible: usize, total: usize) {
        (self.cursor, self.scroll) = jump_to_end(self.scroll, visible, total);
    }

    /// Places the cursor on `index`, clamped to the list.
    pub fn select(&mut self, index: usize, visible: usize, total: usize) {
        self.cursor = index.min(total.saturating_sub(1));
        self.sync(visible, total);
    }

    /// Re-establishes the scroll invariant after the window or the list changed.
    pub fn sync(&mut self, visible: usize, total: usize) {
        self.cursor = self.cursor.min(total.saturating_sub(1));
        self.scroll = adjust(self.cursor, self.scroll, visible, total);
    }
}

/// Row and column budgets derived from the terminal size.
///
/// Recomputed from scratch whenever the geometry changes, never mutated in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub columns: u16,
    pub rows: u16,
    /// Outer width of one panel including its border.
    pub panel_width: usize,
    /// Inner height of a panel: header, separator and list rows.
    pub content_height: usize,
    /// Number of list rows per panel.
    pub list_rows: usize,
    /// Width of the name column in a panel row.
    pub name_width: usize,
    /// Number of text rows in the viewer.
    pub viewer_height: usize,
}

/// Fixed columns of a panel row besides the name: icon cell, spacing, size and date.
const ROW_FIXED_COLUMNS: usize = 27;

impl Layout {
    pub const FALLBACK_COLUMNS: u16 = 80;
    pub const FALLBACK_ROWS: u16 = 24;

    pub fn new(columns: u16, rows: u16) -> Self {
        let columns = if columns == 0 {
            Self::FALLBACK_COLUMNS
        } else {
            columns
        };
        let rows = if rows == 0 { Self::FALLBACK_ROWS } else { rows };

        let panel_width = usize::from(columns).saturating_sub(3) / 2;
        let content_height = usize::from(rows).saturating_sub(6);

        Self {
            columns,
            rows,
            panel_width,
            content_height,
            list_rows: content_height.saturating_sub(2),
            name_width: panel_width.saturating_sub(ROW_FIXED_COLUMNS),
            viewer_height: usize::from(rows).saturating_sub(4),
        }
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self::new(Self::FALLBACK_COLUMNS, Self::FALLBACK_ROWS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adjust_scenarios() {
        assert_eq!(adjust(0, 5, 10, 50), 0);
        assert_eq!(adjust(24, 0, 10, 50), 15);
        assert_eq!(adjust(12, 10, 10, 50), 10);
    }

    #[test]
    fn adjust_clamps_to_list_end() {
        // list shrank below the old scroll offset
        assert_eq!(adjust(8, 5, 10, 12), 2);
        assert_eq!(adjust(3, 0, 10, 4), 0);
    }

    #[test]
    fn adjust_holds_invariant() {
        for total in 1..40 {
            for visible in 1..12 {
                for cursor in 0..total {
                    for scroll in 0..total {
                        let s = adjust(cursor, scroll, visible, total);
                        assert!(s <= cursor && cursor < s + visible);
                        assert!(s <= max_scroll(total, visible));
                    }
                }
            }
        }
    }

    #[test]
    fn page_moves_clamp() {
        assert_eq!(page_move(5, -1, 10, 50), 0);
        assert_eq!(page_move(5, 1, 10, 50), 15);
        assert_eq!(page_move(45, 1, 10, 50), 49);
        assert_eq!(page_move(0, 1, 10, 0), 0);
    }

    #[test]
    fn jumps() {
        assert_eq!(jump_to_start(), (0, 0));
        assert_eq!(jump_to_end(0, 10, 50), (49, 40));
        assert_eq!(jump_to_end(0, 10, 3), (2, 0));
        assert_eq!(jump_to_end(0, 10, 0), (0, 0));
    }

    #[test]
    fn viewport_steps() {
        let mut vp = Viewport::default();
        assert!(!vp.step(-1, 5, 10));
        for _ in 0..7 {
            assert!(vp.step(1, 5, 10));
        }
        assert_eq!((vp.cursor(), vp.scroll()), (7, 3));
        vp.to_end(5, 10);
        assert!(!vp.step(1, 5, 10));
        assert_eq!((vp.cursor(), vp.scroll()), (9, 5));
        vp.page(-1, 5, 10);
        assert_eq!((vp.cursor(), vp.scroll()), (4, 4));
        vp.to_start();
        assert_eq!((vp.cursor(), vp.scroll()), (0, 0));
    }

    #[test]
    fn viewport_sync_after_shrink() {
        let mut vp = Viewport::default();
        vp.select(30, 10, 40);
        assert_eq!((vp.cursor(), vp.scroll()), (30, 21));
        vp.sync(10, 5);
        assert_eq!((vp.cursor(), vp.scroll()), (4, 0));
    }

    #[test]
    fn layout_from_geometry() {
        let layout = Layout::new(80, 24);
        assert_eq!(layout.panel_width, 38);
        assert_eq!(layout.content_height, 18);
        assert_eq!(layout.list_rows, 16);
        assert_eq!(layout.name_width, 11);
        assert_eq!(layout.viewer_height, 20);

        let tiny = Layout::new(10, 4);
        assert_eq!(tiny.list_rows, 0);
        assert_eq!(tiny.name_width, 0);

        assert_eq!(Layout::new(0, 0), Layout::default());
    }
}
