//! The general configuration settings for dualpane.
//!
//! This module defines the [General] struct for deserializing the `[general]` table of
//! dualpane.toml and the [InternalGeneral] struct used at runtime, with timings clamped and the
//! log settings resolved.

use serde::Deserialize;

use log::LevelFilter;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_POLL_INTERVAL_MS: u64 = 100;
pub const MIN_POLL_INTERVAL_MS: u64 = 10;
pub const MAX_POLL_INTERVAL_MS: u64 = 1000;

pub const DEFAULT_ESCAPE_TIMEOUT_MS: u64 = 50;
pub const MIN_ESCAPE_TIMEOUT_MS: u64 = 1;
pub const MAX_ESCAPE_TIMEOUT_MS: u64 = 1000;

const LOG_FILE_NAME: &str = "dualpane.log";

#[derive(Deserialize, Debug)]
#[serde(default)]
pub(crate) struct General {
    dirs_first: bool,
    show_hidden: bool,
    case_insensitive: bool,
    move_to_trash: bool,
    poll_interval_ms: u64,
    escape_timeout_ms: u64,
    /// `None` picks the cache directory, an empty string disables logging.
    log_file: Option<String>,
    log_level: String,
}

impl Default for General {
    fn default() -> Self {
        General {
            dirs_first: true,
            show_hidden: true,
            case_insensitive: true,
            move_to_trash: false,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            escape_timeout_ms: DEFAULT_ESCAPE_TIMEOUT_MS,
            log_file: None,
            log_level: "info".into(),
        }
    }
}

#[derive(Debug)]
pub(crate) struct InternalGeneral {
    dirs_first: bool,
    show_hidden: bool,
    case_insensitive: bool,
    move_to_trash: bool,
    poll_interval: Duration,
    escape_timeout: Duration,
    log_file: Option<PathBuf>,
    log_level: LevelFilter,
}

impl From<General> for InternalGeneral {
    fn from(g: General) -> Self {
        let log_file = match g.log_file {
            Some(path) if path.trim().is_empty() => None,
            Some(path) => Some(PathBuf::from(path)),
            None => default_log_file(),
        };

        Self {
            dirs_first: g.dirs_first,
            show_hidden: g.show_hidden,
            case_insensitive: g.case_insensitive,
            move_to_trash: g.move_to_trash,
            poll_interval: Duration::from_millis(clamp_ms(
                "poll_interval_ms",
                g.poll_interval_ms,
                MIN_POLL_INTERVAL_MS,
                MAX_POLL_INTERVAL_MS,
            )),
            escape_timeout: Duration::from_millis(clamp_ms(
                "escape_timeout_ms",
                g.escape_timeout_ms,
                MIN_ESCAPE_TIMEOUT_MS,
                MAX_ESCAPE_TIMEOUT_MS,
            )),
            log_file,
            log_level: parse_level(&g.log_level),
        }
    }
}

impl InternalGeneral {
    #[inline]
    pub(crate) fn dirs_first(&self) -> bool {
        self.dirs_first
    }

    #[inline]
    pub(crate) fn show_hidden(&self) -> bool {
        self.show_hidden
    }

    #[inline]
    pub(crate) fn case_insensitive(&self) -> bool {
        self.case_insensitive
    }

    #[inline]
    pub(crate) fn move_to_trash(&self) -> bool {
        self.move_to_trash
    }

    #[inline]
    pub(crate) fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    #[inline]
    pub(crate) fn escape_timeout(&self) -> Duration {
        self.escape_timeout
    }

    #[inline]
    pub(crate) fn log_file(&self) -> Option<&PathBuf> {
        self.log_file.as_ref()
    }

    #[inline]
    pub(crate) fn log_level(&self) -> LevelFilter {
        self.log_level
    }
}

/// Clamps a millisecond setting, warning on stderr when the value was out of range.
fn clamp_ms(key: &str, value: u64, min: u64, max: u64) -> u64 {
    let clamped = value.clamp(min, max);
    if clamped != value {
        eprintln!(
            "[Warning] {}={} out of range ({}..={}), clamped to {}",
            key, value, min, max, clamped
        );
    }
    clamped
}

fn parse_level(s: &str) -> LevelFilter {
    s.trim().parse().unwrap_or_else(|_| {
        eprintln!("[Warning] unknown log_level '{}', using info", s.trim());
        LevelFilter::Info
    })
}

fn default_log_file() -> Option<PathBuf> {
    dirs::cache_dir().map(|dir| dir.join("dualpane").join(LOG_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let g = InternalGeneral::from(General::default());
        assert!(g.dirs_first());
        assert!(g.show_hidden());
        assert!(g.case_insensitive());
        assert!(!g.move_to_trash());
        assert_eq!(g.poll_interval(), Duration::from_millis(100));
        assert_eq!(g.escape_timeout(), Duration::from_millis(50));
        assert_eq!(g.log_level(), LevelFilter::Info);
    }

    #[test]
    fn timings_are_clamped() -> Result<(), Box<dyn std::error::Error>> {
        let raw: General = toml::from_str("poll_interval_ms = 0\nescape_timeout_ms = 99999")?;
        let g = InternalGeneral::from(raw);
        assert_eq!(g.poll_interval(), Duration::from_millis(MIN_POLL_INTERVAL_MS));
        assert_eq!(
            g.escape_timeout(),
            Duration::from_millis(MAX_ESCAPE_TIMEOUT_MS)
        );
        Ok(())
    }

    #[test]
    fn log_settings() -> Result<(), Box<dyn std::error::Error>> {
        let raw: General = toml::from_str("log_file = \"\"\nlog_level = \"DEBUG\"")?;
        let g = InternalGeneral::from(raw);
        assert!(g.log_file().is_none());
        assert_eq!(g.log_level(), LevelFilter::Debug);

        let raw: General = toml::from_str("log_file = \"/tmp/dp.log\"\nlog_level = \"loud\"")?;
        let g = InternalGeneral::from(raw);
        assert_eq!(g.log_file(), Some(&PathBuf::from("/tmp/dp.log")));
        assert_eq!(g.log_level(), LevelFilter::Info);
        Ok(())
    }

    #[test]
    fn log_level_names() {
        assert_eq!(parse_level(" Trace "), LevelFilter::Trace);
        assert_eq!(parse_level("warn"), LevelFilter::Warn);
        assert_eq!(parse_level("OFF"), LevelFilter::Off);
        assert_eq!(parse_level("verbose"), LevelFilter::Info);
    }
}
