//! Key mapping and action dispatch system for dualpane
//!
//! Translates the key names of the `[keys]` and `[viewer_keys]` config sections into
//! decoded [Key]s and maps them to the actions of the file manager and the text viewer.

use crate::config::Config;
use crate::core::input::Key;

use std::collections::HashMap;

/// Represents any action of the file manager screen: navigation, file, or system.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Action {
    Nav(NavAction),
    File(FileAction),
    System(SystemAction),
}

/// Navigation actions (cursor movement, panels, filter, go to path)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum NavAction {
    GoUp,
    GoDown,
    PageUp,
    PageDown,
    GoToTop,
    GoToBottom,
    Open,
    GoParent,
    SwitchPanel,
    LeftPanel,
    RightPanel,
    GoToPath,
    Filter,
    NextMatch,
    ClearFilter,
}

/// File actions between the two panels
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum FileAction {
    Copy,
    Move,
    Delete,
}

/// System actions (refresh, quit)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum SystemAction {
    Refresh,
    Quit,
}

/// Actions of the text viewer screen.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum ViewerAction {
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,
    Top,
    Bottom,
    Search,
    NextMatch,
    PrevMatch,
    GoToLine,
    Close,
}

/// Stores the mapping from Key to action, which is built in the config
#[derive(Debug)]
pub(crate) struct Keymap {
    map: HashMap<Key, Action>,
    viewer: HashMap<Key, ViewerAction>,
}

impl Keymap {
    /// Builds the keymap from the config
    #[rustfmt::skip]
    pub(crate) fn from_config(config: &Config) -> Self {
        let mut map = HashMap::new();
        let mut viewer = HashMap::new();
        let keys = config.keys();
        let vkeys = config.viewer_keys();

        macro_rules! bind {
            ($keys:expr, $action:expr) => {
                bind($keys, $action, &mut map);
            };
        }

        macro_rules! bind_viewer {
            ($keys:expr, $action:expr) => {
                bind($keys, $action, &mut viewer);
            };
        }

        use NavAction as N;
        use FileAction as F;
        use SystemAction as S;
        use ViewerAction as V;

        // NavActions
        bind!(keys.go_up(),             Action::Nav(N::GoUp));
        bind!(keys.go_down(),           Action::Nav(N::GoDown));
        bind!(keys.page_up(),           Action::Nav(N::PageUp));
        bind!(keys.page_down(),         Action::Nav(N::PageDown));
        bind!(keys.go_to_top(),         Action::Nav(N::GoToTop));
        bind!(keys.go_to_bottom(),      Action::Nav(N::GoToBottom));
        bind!(keys.open(),              Action::Nav(N::Open));
        bind!(keys.go_parent(),         Action::Nav(N::GoParent));
        bind!(keys.switch_panel(),      Action::Nav(N::SwitchPanel));
        bind!(keys.left_panel(),        Action::Nav(N::LeftPanel));
        bind!(keys.right_panel(),       Action::Nav(N::RightPanel));
        bind!(keys.go_to_path(),        Action::Nav(N::GoToPath));
        bind!(keys.filter(),            Action::Nav(N::Filter));
        bind!(keys.next_match(),        Action::Nav(N::NextMatch));
        bind!(keys.clear_filter(),      Action::Nav(N::ClearFilter));

        // FileActions
        bind!(keys.copy(),              Action::File(F::Copy));
        bind!(keys.move_file(),         Action::File(F::Move));
        bind!(keys.delete(),            Action::File(F::Delete));

        // SystemActions
        bind!(keys.refresh(),           Action::System(S::Refresh));
        bind!(keys.quit(),              Action::System(S::Quit));

        // Viewer
        bind_viewer!(vkeys.scroll_up(),     V::ScrollUp);
        bind_viewer!(vkeys.scroll_down(),   V::ScrollDown);
        bind_viewer!(vkeys.page_up(),       V::PageUp);
        bind_viewer!(vkeys.page_down(),     V::PageDown);
        bind_viewer!(vkeys.go_to_top(),     V::Top);
        bind_viewer!(vkeys.go_to_bottom(),  V::Bottom);
        bind_viewer!(vkeys.search(),        V::Search);
        bind_viewer!(vkeys.next_match(),    V::NextMatch);
        bind_viewer!(vkeys.prev_match(),    V::PrevMatch);
        bind_viewer!(vkeys.go_to_line(),    V::GoToLine);
        bind_viewer!(vkeys.close(),         V::Close);

        Keymap { map, viewer }
    }

    /// Looks up the file manager action for a decoded key
    pub(crate) fn lookup(&self, key: &Key) -> Option<Action> {
        self.map.get(&normalize(key)).copied()
    }

    /// Looks up the viewer action for a decoded key
    pub(crate) fn lookup_viewer(&self, key: &Key) -> Option<ViewerAction> {
        self.viewer.get(&normalize(key)).copied()
    }
}

/// Folds the byte variants terminals send for the same key: LF for Enter and BS for Backspace.
fn normalize(key: &Key) -> Key {
    match key {
        Key::Byte(b'\n') => Key::Byte(b'\r'),
        Key::Byte(0x08) => Key::Byte(0x7F),
        other => other.clone(),
    }
}

fn bind<A: Copy>(key_list: &[String], action: A, map: &mut HashMap<Key, A>) {
    for k in key_list {
        match parse_key(k) {
            Some(key) => {
                map.insert(key, action);
            }
            None => eprintln!("Ignoring unknown key binding: {:?}", k),
        }
    }
}

/// Parses a key name from the config into a [Key].
///
/// Single characters are case sensitive, named keys are not.
pub(crate) fn parse_key(s: &str) -> Option<Key> {
    let mut chars = s.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return c.is_ascii().then(|| Key::Byte(c as u8));
    }

    let lower = s.trim().to_ascii_lowercase();
    if let Some(letter) = lower
        .strip_prefix("ctrl+")
        .or_else(|| lower.strip_prefix("<c-").and_then(|r| r.strip_suffix('>')))
    {
        return match letter.as_bytes() {
            [b] if b.is_ascii_alphabetic() => Some(Key::ctrl(*b)),
            _ => None,
        };
    }

    let key = match lower.as_str() {
        "up" => Key::Up,
        "down" => Key::Down,
        "left" => Key::Left,
        "right" => Key::Right,
        "pageup" | "pgup" => Key::PageUp,
        "pagedown" | "pgdn" => Key::PageDown,
        "home" => Key::Home,
        "end" => Key::End,
        "enter" | "return" => Key::Byte(b'\r'),
        "esc" | "escape" => Key::Escape,
        "tab" => Key::Byte(b'\t'),
        "backspace" => Key::Byte(0x7F),
        "space" => Key::Byte(b' '),
        _ => return None,
    };
    Some(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_named_and_single_keys() {
        assert_eq!(parse_key("j"), Some(Key::Byte(b'j')));
        assert_eq!(parse_key("G"), Some(Key::Byte(b'G')));
        assert_eq!(parse_key("$"), Some(Key::Byte(b'$')));
        assert_eq!(parse_key("Up"), Some(Key::Up));
        assert_eq!(parse_key("PageDown"), Some(Key::PageDown));
        assert_eq!(parse_key("Enter"), Some(Key::Byte(b'\r')));
        assert_eq!(parse_key("Esc"), Some(Key::Escape));
        assert_eq!(parse_key("Backspace"), Some(Key::Byte(0x7F)));
        assert_eq!(parse_key("Ctrl+u"), Some(Key::Byte(0x15)));
        assert_eq!(parse_key("<C-d>"), Some(Key::Byte(0x04)));
        assert_eq!(parse_key("é"), None);
        assert_eq!(parse_key("Hyper+x"), None);
    }

    #[test]
    fn default_bindings() {
        let config = Config::default();
        let keymap = Keymap::from_config(&config);

        assert_eq!(
            keymap.lookup(&Key::Byte(b'j')),
            Some(Action::Nav(NavAction::GoDown))
        );
        assert_eq!(keymap.lookup(&Key::Up), Some(Action::Nav(NavAction::GoUp)));
        assert_eq!(
            keymap.lookup(&Key::Byte(b'\t')),
            Some(Action::Nav(NavAction::SwitchPanel))
        );
        assert_eq!(
            keymap.lookup(&Key::ctrl(b'd')),
            Some(Action::Nav(NavAction::PageDown))
        );
        assert_eq!(
            keymap.lookup(&Key::Byte(b'X')),
            Some(Action::File(FileAction::Delete))
        );
        assert_eq!(
            keymap.lookup(&Key::Byte(b'q')),
            Some(Action::System(SystemAction::Quit))
        );
        assert_eq!(keymap.lookup(&Key::Byte(b'z')), None);

        assert_eq!(keymap.lookup_viewer(&Key::Byte(b'G')), Some(ViewerAction::Bottom));
        assert_eq!(keymap.lookup_viewer(&Key::Byte(b'N')), Some(ViewerAction::PrevMatch));
        assert_eq!(keymap.lookup_viewer(&Key::Escape), Some(ViewerAction::Close));
    }

    #[test]
    fn lf_and_bs_are_folded() {
        let keymap = Keymap::from_config(&Config::default());
        assert_eq!(
            keymap.lookup(&Key::Byte(b'\n')),
            Some(Action::Nav(NavAction::Open))
        );
        assert_eq!(
            keymap.lookup(&Key::Byte(0x08)),
            Some(Action::Nav(NavAction::GoParent))
        );
    }
}
