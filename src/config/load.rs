//! The main config loading module for dualpane.
//!
//! Handles loading and deserializing settings from `dualpane.toml`.
//!
//! Provides the main [Config] struct, as well as the internal [RawConfig] used for parsing.
//! Also implements default config generation for `dp --init`.

use crate::config::{General, InternalGeneral, Keys, Theme, ViewerKeys};
use crate::utils::get_home;

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::{fs, io};

/// Environment variable overriding the config path.
pub const CONFIG_ENV: &str = "DUALPANE_CONFIG";

/// Raw configuration as read from the toml file.
/// Converted into the main [Config] struct after parsing.
#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub(crate) struct RawConfig {
    general: General,
    keys: Keys,
    viewer_keys: ViewerKeys,
    theme: Theme,
}

/// Main configuration struct for dualpane
#[derive(Debug)]
pub(crate) struct Config {
    general: InternalGeneral,
    keys: Keys,
    viewer_keys: ViewerKeys,
    theme: Theme,
}

impl From<RawConfig> for Config {
    fn from(raw: RawConfig) -> Self {
        Self {
            general: InternalGeneral::from(raw.general),
            keys: raw.keys,
            viewer_keys: raw.viewer_keys,
            theme: raw.theme,
        }
    }
}

impl Config {
    /// Load configuration from the default path.
    /// If the file does not exist or fails to parse, returns the default configuration.
    pub(crate) fn load() -> Self {
        Self::load_from(&Self::default_path())
    }

    pub(crate) fn load_from(path: &Path) -> Self {
        if !path.exists() {
            eprintln!(
                "No dualpane.toml config file found. Using internal defaults. (Tip: run 'dp --init' to generate a config file.)"
            );
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(content) => Self::parse(&content).unwrap_or_else(|e| {
                eprintln!("Error parsing config: {}", e);
                Self::default()
            }),
            Err(e) => {
                eprintln!("Error reading config {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Parses a config from TOML text.
    pub(crate) fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str::<RawConfig>(content).map(Config::from)
    }

    // Getters

    #[inline]
    pub(crate) fn general(&self) -> &InternalGeneral {
        &self.general
    }

    #[inline]
    pub(crate) fn keys(&self) -> &Keys {
        &self.keys
    }

    #[inline]
    pub(crate) fn viewer_keys(&self) -> &ViewerKeys {
        &self.viewer_keys
    }

    #[inline]
    pub(crate) fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Determine the default configuration file path.
    /// Checks the DUALPANE_CONFIG environment variable first,
    /// then XDG_CONFIG_HOME, then ~/.config/dualpane/dualpane.toml.
    pub(crate) fn default_path() -> PathBuf {
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            return PathBuf::from(path);
        }

        if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg_config).join("dualpane/dualpane.toml");
        }

        if let Some(home) = get_home() {
            return home.join(".config/dualpane/dualpane.toml");
        }
        PathBuf::from("dualpane.toml")
    }

    /// Generate a default configuration file at the specified path.
    /// If the file already exists, returns an error.
    pub(crate) fn generate_default(path: &Path) -> io::Result<()> {
        if path.exists() {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("Config file already exists at {:?}", path),
            ));
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, DEFAULT_TOML)?;
        println!("Default config generated at {:?}", path);
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        RawConfig::default().into()
    }
}

const DEFAULT_TOML: &str = r##"# dualpane.toml - default configuration for dualpane

# Note:
# Commented values are the internal defaults of dualpane
# Use hex codes (eg. "#RRGGBB"), 256-colour indices ("208") or terminal colors ("cyan")

[general]
dirs_first = true
show_hidden = true
# case_insensitive = true
# move_to_trash = false
# poll_interval_ms = 100      # 10..=1000
# escape_timeout_ms = 50      # 1..=1000
# log_file = ""               # empty disables logging, unset logs to the cache directory
# log_level = "info"          # off, error, warn, info, debug, trace

# [keys]
# go_up = ["k", "Up"]
# go_down = ["j", "Down"]
# page_up = ["u", "PageUp", "Ctrl+u"]
# page_down = ["d", "PageDown", "Ctrl+d"]
# go_to_top = ["0", "Home"]
# go_to_bottom = ["$", "End"]
# open = ["Enter"]
# go_parent = ["Backspace", "-"]
# switch_panel = ["Tab"]
# left_panel = ["h", "Left"]
# right_panel = ["l", "Right"]
# go_to_path = ["p", "P"]
# filter = ["/"]
# next_match = ["n", "N"]
# clear_filter = ["Esc"]
# copy = ["c", "C"]
# move_file = ["m", "M"]
# delete = ["x", "X"]
# refresh = ["r", "R"]
# quit = ["q", "Q"]

# [viewer_keys]
# scroll_up = ["k", "Up"]
# scroll_down = ["j", "Down"]
# page_up = ["u", "PageUp", "Ctrl+u"]
# page_down = ["d", "PageDown", "Ctrl+d"]
# go_to_top = ["g", "Home"]
# go_to_bottom = ["G", "End"]
# search = ["/"]
# next_match = ["n"]
# prev_match = ["N"]
# go_to_line = [":"]
# close = ["q", "Q", "Esc"]

# [theme.active_border]
# fg = "cyan"

# [theme.panel]
# fg = "230"
# bg = "236"

# [theme.selection]
# fg = "236"
# bg = "230"

# [theme.inactive_selection]
# fg = "white"
# bg = "darkgray"

# [theme.directory]
# fg = "cyan"

# [theme.status]
# fg = "white"
# bg = "blue"

# [theme.search_match]
# fg = "black"
# bg = "yellow"

# [theme.syntax]
# comment.fg = "darkgray"
# string.fg = "green"
# keyword.fg = "magenta"
# number.fg = "208"
# call.fg = "lightcyan"
# operator.fg = "yellow"
# variable.fg = "lightblue"
"##;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error;
    use std::time::Duration;
    use tempfile::tempdir;

    #[test]
    fn generated_config_parses() -> Result<(), Box<dyn error::Error>> {
        let dir = tempdir()?;
        let path = dir.path().join("nested/dualpane.toml");
        Config::generate_default(&path)?;
        assert!(path.exists());

        let config = Config::parse(&fs::read_to_string(&path)?)?;
        assert!(config.general().dirs_first());
        assert_eq!(config.keys().quit(), ["q", "Q"]);

        // never overwrites
        let err = Config::generate_default(&path)
            .err()
            .ok_or("second init must fail")?;
        assert_eq!(err.kind(), io::ErrorKind::AlreadyExists);
        Ok(())
    }

    #[test]
    fn partial_sections_keep_defaults() -> Result<(), Box<dyn error::Error>> {
        let config = Config::parse(
            r#"
            [general]
            poll_interval_ms = 250

            [viewer_keys]
            close = ["x"]
            "#,
        )?;
        assert_eq!(config.general().poll_interval(), Duration::from_millis(250));
        assert!(config.general().show_hidden());
        assert_eq!(config.viewer_keys().close(), ["x"]);
        assert_eq!(config.viewer_keys().search(), ["/"]);
        assert_eq!(config.keys().filter(), ["/"]);
        Ok(())
    }

    #[test]
    fn invalid_file_falls_back() -> Result<(), Box<dyn error::Error>> {
        let dir = tempdir()?;
        let path = dir.path().join("dualpane.toml");
        fs::write(&path, "[general\nbroken")?;
        let config = Config::load_from(&path);
        assert!(config.general().dirs_first());

        let missing = Config::load_from(&dir.path().join("missing.toml"));
        assert_eq!(missing.keys().quit(), ["q", "Q"]);
        Ok(())
    }
}
