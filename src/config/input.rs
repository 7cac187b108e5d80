//! Input configuration options for dualpane
//!
//! This module defines the key binding tables read from the `[keys]` (file manager) and
//! `[viewer_keys]` (text viewer) sections of dualpane.toml.
//!
//! Key names: single characters (`"j"`, `"$"`), `Up`, `Down`, `Left`, `Right`, `PageUp`,
//! `PageDown`, `Home`, `End`, `Enter`, `Esc`, `Tab`, `Backspace`, `Space` and `Ctrl+<letter>`.

use serde::Deserialize;

/// File manager bindings.
#[derive(Deserialize, Debug)]
#[serde(default)]
pub(crate) struct Keys {
    go_up: Vec<String>,
    go_down: Vec<String>,
    page_up: Vec<String>,
    page_down: Vec<String>,
    go_to_top: Vec<String>,
    go_to_bottom: Vec<String>,
    open: Vec<String>,
    go_parent: Vec<String>,
    switch_panel: Vec<String>,
    left_panel: Vec<String>,
    right_panel: Vec<String>,
    go_to_path: Vec<String>,
    filter: Vec<String>,
    next_match: Vec<String>,
    clear_filter: Vec<String>,
    copy: Vec<String>,
    move_file: Vec<String>,
    delete: Vec<String>,
    refresh: Vec<String>,
    quit: Vec<String>,
}

/// Text viewer bindings.
#[derive(Deserialize, Debug)]
#[serde(default)]
pub(crate) struct ViewerKeys {
    scroll_up: Vec<String>,
    scroll_down: Vec<String>,
    page_up: Vec<String>,
    page_down: Vec<String>,
    go_to_top: Vec<String>,
    go_to_bottom: Vec<String>,
    search: Vec<String>,
    next_match: Vec<String>,
    prev_match: Vec<String>,
    go_to_line: Vec<String>,
    close: Vec<String>,
}

macro_rules! accessor {
    ($ty:ident; $($name:ident),+ $(,)?) => {
        impl $ty {
            $(
                #[inline]
                pub(crate) fn $name(&self) -> &[String] {
                    &self.$name
                }
            )+
        }
    };
}

accessor!(
    Keys;
    go_up,
    go_down,
    page_up,
    page_down,
    go_to_top,
    go_to_bottom,
    open,
    go_parent,
    switch_panel,
    left_panel,
    right_panel,
    go_to_path,
    filter,
    next_match,
    clear_filter,
    copy,
    move_file,
    delete,
    refresh,
    quit,
);

accessor!(
    ViewerKeys;
    scroll_up,
    scroll_down,
    page_up,
    page_down,
    go_to_top,
    go_to_bottom,
    search,
    next_match,
    prev_match,
    go_to_line,
    close,
);

fn keys(list: &[&str]) -> Vec<String> {
    list.iter().map(|k| k.to_string()).collect()
}

impl Default for Keys {
    fn default() -> Self {
        Keys {
            go_up: keys(&["k", "Up"]),
            go_down: keys(&["j", "Down"]),
            page_up: keys(&["u", "PageUp", "Ctrl+u"]),
            page_down: keys(&["d", "PageDown", "Ctrl+d"]),
            go_to_top: keys(&["0", "Home"]),
            go_to_bottom: keys(&["$", "End"]),
            open: keys(&["Enter"]),
            go_parent: keys(&["Backspace", "-"]),
            switch_panel: keys(&["Tab"]),
            left_panel: keys(&["h", "Left"]),
            right_panel: keys(&["l", "Right"]),
            go_to_path: keys(&["p", "P"]),
            filter: keys(&["/"]),
            next_match: keys(&["n", "N"]),
            clear_filter: keys(&["Esc"]),
            copy: keys(&["c", "C"]),
            move_file: keys(&["m", "M"]),
            delete: keys(&["x", "X"]),
            refresh: keys(&["r", "R"]),
            quit: keys(&["q", "Q"]),
        }
    }
}

impl Default for ViewerKeys {
    fn default() -> Self {
        ViewerKeys {
            scroll_up: keys(&["k", "Up"]),
            scroll_down: keys(&["j", "Down"]),
            page_up: keys(&["u", "PageUp", "Ctrl+u"]),
            page_down: keys(&["d", "PageDown", "Ctrl+d"]),
            go_to_top: keys(&["g", "Home"]),
            go_to_bottom: keys(&["G", "End"]),
            search: keys(&["/"]),
            next_match: keys(&["n"]),
            prev_match: keys(&["N"]),
            go_to_line: keys(&[":"]),
            close: keys(&["q", "Q", "Esc"]),
        }
    }
}
