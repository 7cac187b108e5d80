//! Application State and main controller module for dualpane.
//!
//! This module defines the overall [AppState] struct, which holds all major application
//! information and passes it to the UI and terminal functions:
//! - Configuration and the keymaps built from it
//! - The two [Panel]s and which one is active
//! - The current [Layout], recomputed from the terminal geometry
//! - The status line, the inline [Prompt] and the open [Viewer]
//!
//! Key handling lives in [crate::app::handlers]; this module routes a decoded key to the
//! screen that owns it: prompt first, then viewer, then the file manager keymap.

use crate::app::keymap::{Action, Keymap};
use crate::app::panel::Panel;
use crate::app::prompt::Prompt;
use crate::app::viewer::Viewer;
use crate::config::Config;
use crate::core::Formatter;
use crate::core::input::Key;
use crate::core::viewport::Layout;

use std::io;
use std::path::Path;

pub(crate) const WELCOME: &str = "Welcome to DualPane File Manager! Press 'q' to quit.";

/// Enumeration for each individual keypress result processed.
///
/// Tells the event loop whether and how to redraw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum KeypressResult {
    /// Nothing changed.
    Continue,
    /// State changed, draw the next frame.
    Consumed,
    /// Stop the event loop.
    Quit,
    /// The screen switched, clear the terminal before drawing.
    Redraw,
}

/// Main struct which holds the central application state of dualpane.
pub(crate) struct AppState<'a> {
    pub(super) config: &'a Config,
    pub(super) keymap: Keymap,
    pub(super) formatter: Formatter,
    pub(super) layout: Layout,

    pub(super) panels: [Panel; 2],
    pub(super) active: usize,

    pub(super) status: String,
    pub(super) prompt: Option<Prompt>,
    pub(super) viewer: Option<Viewer>,
    pub(super) running: bool,
}

impl<'a> AppState<'a> {
    /// Opens both panels at `path`.
    pub(crate) fn new(config: &'a Config, path: &Path) -> io::Result<Self> {
        let general = config.general();
        let formatter = Formatter::new(
            general.dirs_first(),
            general.show_hidden(),
            general.case_insensitive(),
        );
        let layout = Layout::default();

        let mut panels = [Panel::new(path.to_path_buf()), Panel::new(path.to_path_buf())];
        for panel in &mut panels {
            panel.load(&formatter, layout.list_rows)?;
        }
        log::info!("started in {}", path.display());

        Ok(Self {
            config,
            keymap: Keymap::from_config(config),
            formatter,
            layout,
            panels,
            active: 0,
            status: WELCOME.to_string(),
            prompt: None,
            viewer: None,
            running: true,
        })
    }

    // Getters/ accessors

    #[inline]
    pub(crate) fn config(&self) -> &Config {
        self.config
    }

    #[inline]
    pub(crate) fn layout(&self) -> &Layout {
        &self.layout
    }

    #[inline]
    pub(crate) fn panel(&self, idx: usize) -> &Panel {
        &self.panels[idx]
    }

    #[inline]
    pub(crate) fn active(&self) -> usize {
        self.active
    }

    #[inline]
    pub(crate) fn active_panel(&self) -> &Panel {
        &self.panels[self.active]
    }

    #[inline]
    pub(crate) fn status(&self) -> &str {
        &self.status
    }

    #[inline]
    pub(crate) fn prompt(&self) -> Option<&Prompt> {
        self.prompt.as_ref()
    }

    #[inline]
    pub(crate) fn viewer(&self) -> Option<&Viewer> {
        self.viewer.as_ref()
    }

    #[inline]
    pub(crate) fn is_running(&self) -> bool {
        self.running
    }

    /// Replaces the layout and re-clamps both panel viewports to it.
    pub(crate) fn set_layout(&mut self, layout: Layout) {
        self.layout = layout;
        for panel in &mut self.panels {
            panel.sync(layout.list_rows);
        }
    }

    /// Applies a new terminal geometry. Returns `true` when the layout changed.
    pub(crate) fn resize(&mut self, columns: u16, rows: u16) -> bool {
        let layout = Layout::new(columns, rows);
        if layout == self.layout {
            return false;
        }
        log::debug!("terminal resized to {}x{}", layout.columns, layout.rows);
        self.set_layout(layout);
        self.status = format!("Terminal resized to {}x{}", layout.columns, layout.rows);
        true
    }

    /// Central key handler.
    pub(crate) fn handle_key(&mut self, key: Key) -> KeypressResult {
        match &key {
            Key::Timeout => return KeypressResult::Continue,
            Key::Unknown(raw) => {
                log::debug!("ignoring unknown escape sequence {:?}", raw);
                return KeypressResult::Continue;
            }
            _ => {}
        }

        if self.prompt.is_some() {
            return self.handle_prompt_key(&key);
        }

        if self.viewer.is_some() {
            return self.handle_viewer_key(&key);
        }

        match self.keymap.lookup(&key) {
            Some(Action::Nav(nav_act)) => self.handle_nav_action(nav_act),
            Some(Action::File(file_act)) => self.handle_file_action(file_act),
            Some(Action::System(sys_act)) => self.handle_sys_action(sys_act),
            None => KeypressResult::Continue,
        }
    }

    pub(super) fn set_status(&mut self, message: impl Into<String>) {
        self.status = message.into();
    }

    /// Re-reads one panel. A failure is reported in the status line.
    pub(super) fn reload_panel(&mut self, idx: usize) {
        let visible = self.layout.list_rows;
        if self.panels[idx].load(&self.formatter, visible).is_err() {
            self.status = format!(
                "Cannot read directory: {}",
                self.panels[idx].path().display()
            );
        }
    }
}
