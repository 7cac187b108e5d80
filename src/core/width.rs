//! Display width engine for dualpane.
//!
//! Classifies every Unicode scalar value as occupying zero, one or two terminal columns and
//! builds fixed-width cells out of arbitrary text for the panel grid and the text viewer.
//!
//! Emoji handling follows the ranges terminals actually draw double-wide (misc symbols,
//! dingbats and the supplementary emoji blocks). Everything else defers to `unicode-width`
//! for East Asian wide and combining characters, and falls back to a single column.

use unicode_width::UnicodeWidthChar;

/// Marker appended by [truncate] when text is cut.
pub const ELLIPSIS: &str = "...";

/// Column width of the icon cell in the panel grid.
pub const ICON_COLUMNS: usize = 2;

const ZWJ: char = '\u{200D}';
const VS15: char = '\u{FE0E}';
const VS16: char = '\u{FE0F}';

/// Number of terminal columns a single code point occupies.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum WidthClass {
    Zero,
    Narrow,
    Wide,
}

impl WidthClass {
    #[inline]
    pub fn columns(self) -> usize {
        match self {
            WidthClass::Zero => 0,
            WidthClass::Narrow => 1,
            WidthClass::Wide => 2,
        }
    }
}

/// Classifies a code point. Pure and total over all scalar values.
pub fn classify(c: char) -> WidthClass {
    if matches!(c, ZWJ | VS15 | VS16) {
        return WidthClass::Zero;
    }

    let cp = c as u32;
    if (0x2600..=0x27BF).contains(&cp) || (0x1F000..=0x1FAFF).contains(&cp) {
        return WidthClass::Wide;
    }

    match c.width() {
        Some(0) if !c.is_control() => WidthClass::Zero,
        Some(2) => WidthClass::Wide,
        _ => WidthClass::Narrow,
    }
}

/// Width of a single code point in columns.
#[inline]
pub fn width(c: char) -> usize {
    classify(c).columns()
}

/// Sum of [width] over every code point of `text`.
pub fn display_width(text: &str) -> usize {
    text.chars().map(width).sum()
}

/// Appends spaces until `text` fills `target` columns. Never truncates.
pub fn pad_to(text: &str, target: usize) -> String {
    let padding = target.saturating_sub(display_width(text));
    let mut out = String::with_capacity(text.len() + padding);
    out.push_str(text);
    out.extend(std::iter::repeat_n(' ', padding));
    out
}

/// Pads an icon glyph to exactly [ICON_COLUMNS] columns.
///
/// Glyphs already two or more columns wide pass through untouched, even when wider.
pub fn pad_icon(glyph: &str) -> String {
    pad_to(glyph, ICON_COLUMNS)
}

/// Byte oriented truncation: when `text` is longer than `max_bytes` bytes it is cut to
/// `max_bytes - 3` bytes and [ELLIPSIS] is appended.
///
/// The cut lands on the nearest char boundary at or below the byte limit. This is not
/// width aware; callers that need an exact column count must size `max_bytes` themselves.
pub fn truncate(text: &str, max_bytes: usize) -> String {
    if text.len() <= max_bytes {
        return text.to_string();
    }

    let mut cut = max_bytes.saturating_sub(ELLIPSIS.len());
    while !text.is_char_boundary(cut) {
        cut -= 1;
    }

    let mut out = String::with_capacity(cut + ELLIPSIS.len());
    out.push_str(&text[..cut]);
    out.push_str(ELLIPSIS);
    out
}

/// Returns the longest prefix of `text` that fits into `columns` display columns.
///
/// Zero-width code points trailing a kept character stay attached to it.
pub fn take_columns(text: &str, columns: usize) -> &str {
    let mut used = 0;
    for (idx, c) in text.char_indices() {
        let w = width(c);
        if used + w > columns {
            return &text[..idx];
        }
        used += w;
    }
    text
}
