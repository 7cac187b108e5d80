//! Module for mapping file names to emoji icons.
//!
//! [file_icon] picks the glyph for a [FileEntry] and [padded_icon] pads it to the fixed two
//! column icon cell of a panel row.

use crate::core::FileEntry;
use crate::core::width::pad_icon;

use phf::phf_map;

/// File extension to icon mapping, keys are lowercase.
static EXT_ICON_MAP: phf::Map<&'static str, &'static str> = phf_map! {
    // programming
    "php" => "🐘",
    "py" => "🐍",
    "js" => "📜",
    "ts" => "📘",
    "jsx" => "⚛️",
    "tsx" => "⚛️",
    "rb" => "💎",
    "go" => "🔷",
    "rs" => "🦀",
    "c" => "🔧",
    "cpp" => "🔧",
    "h" => "📑",
    "java" => "☕",
    "swift" => "🍎",
    // web
    "html" => "🌐",
    "css" => "🎨",
    "scss" => "🎨",
    // data
    "json" => "📋",
    "xml" => "📄",
    "yaml" => "📝",
    "yml" => "📝",
    "sql" => "🗄️",
    "csv" => "📊",
    // documents
    "md" => "📖",
    "txt" => "📄",
    "pdf" => "📕",
    "doc" => "📘",
    "docx" => "📘",
    // images
    "jpg" => "🖼️",
    "jpeg" => "🖼️",
    "png" => "🖼️",
    "gif" => "🖼️",
    "svg" => "🎭",
    // media
    "mp3" => "🎵",
    "wav" => "🎵",
    "mp4" => "🎬",
    "mov" => "🎬",
    // archives
    "zip" => "📦",
    "tar" => "📦",
    "gz" => "📦",
    "rar" => "📦",
    // config
    "env" => "⚙️",
    "ini" => "⚙️",
    "conf" => "⚙️",
    "toml" => "⚙️",
    // shell
    "sh" => "🐚",
    "bash" => "🐚",
    "zsh" => "🐚",
    "gitignore" => "🙈",
    "lock" => "🔒",
};

pub const PARENT_ICON: &str = "⬆️";
pub const DIR_ICON: &str = "📂";
pub const FILE_ICON: &str = "📄";

/// Returns the icon of an entry. Dotfiles such as `.gitignore` or `.env` resolve through
/// the part after the dot.
pub fn file_icon(entry: &FileEntry) -> &'static str {
    if entry.is_parent_link() {
        return PARENT_ICON;
    }
    if entry.is_dir() {
        return DIR_ICON;
    }

    let name = entry.lowercase_name();
    name.rsplit_once('.')
        .and_then(|(_, ext)| EXT_ICON_MAP.get(ext).copied())
        .unwrap_or(FILE_ICON)
}

/// [file_icon] padded to the two column icon cell.
#[inline]
pub fn padded_icon(entry: &FileEntry) -> String {
    pad_icon(file_icon(entry))
}
