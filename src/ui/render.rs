//! UI renderer implementation.
//!
//! Contains the top-level `render` entry point used by the terminal loop. The file manager
//! screen is the two panels followed by the status bar, the key help and the filter line;
//! an open viewer takes over the whole screen.
//!
//! This module should stay "pure rendering": it reads state + config and produces widgets,
//! without owning dualpane core logic.

use crate::app::AppState;
use crate::ui::panes::draw_panel;
use crate::ui::viewer::draw_viewer;
use crate::ui::widgets::{draw_bar, draw_line, draw_prompt};

use ratatui::{Frame, text::Line};

pub(crate) const PANEL_HELP: &str = " Arrows/jk:Nav  Tab/hl:Panel  u/d:Page  0/$:Jump  p:Path  /:Find  c:Copy  m:Move  x:Del  q:Quit";

/// Renders the entire terminal UI for dualpane on each frame.
pub(crate) fn render(frame: &mut Frame, app: &AppState) {
    if let Some(viewer) = app.viewer() {
        draw_viewer(frame, app, viewer);
        return;
    }

    draw_panel(frame, app, 0);
    draw_panel(frame, app, 1);

    let theme = app.config().theme();
    let rows = frame.area().height;
    let status_y = rows.saturating_sub(3);

    match app.prompt() {
        Some(prompt) => draw_prompt(frame, status_y, prompt, theme.prompt_style()),
        None => draw_bar(frame, status_y, app.status(), theme.status_style()),
    }
    draw_bar(frame, rows.saturating_sub(2), PANEL_HELP, theme.help_style());

    let filter = app.active_panel().filter();
    if !filter.is_empty() {
        let width = frame.area().width;
        let text = format!(" Filter: {}", filter);
        draw_line(
            frame,
            0,
            rows.saturating_sub(1),
            width,
            Line::styled(text, theme.filter_style()),
        );
    }
}
