//! UI pane drawing module for dualpane.
//!
//! Draws the two file panels: a rounded box titled with the panel path, the column header,
//! a separator and one row per visible entry. Row text is laid out with the width engine
//! so the name, size and date columns line up even with emoji icons and wide names.
//!
//! Used internally by ui::render

use crate::app::{AppState, Panel};
use crate::config::Theme;
use crate::core::viewport::Layout;
use crate::core::width::{display_width, pad_to, truncate};
use crate::core::{FileEntry, format_mtime, format_size};
use crate::ui::icons::padded_icon;
use crate::ui::widgets::{clip, draw_line};

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders},
};

/// Columns taken by the panel title decoration and the corners.
const TITLE_DECORATION: usize = 7;

/// Left column of panel `idx`.
#[inline]
pub(crate) fn panel_x(layout: &Layout, idx: usize) -> u16 {
    if idx == 0 {
        0
    } else {
        u16::try_from(layout.panel_width + 1).unwrap_or(u16::MAX)
    }
}

/// Draws panel `idx` of the app.
pub(crate) fn draw_panel(frame: &mut Frame, app: &AppState, idx: usize) {
    let layout = app.layout();
    let theme = app.config().theme();
    let panel = app.panel(idx);
    let is_active = idx == app.active();

    let width = u16::try_from(layout.panel_width).unwrap_or(u16::MAX);
    let height = u16::try_from(layout.content_height + 2).unwrap_or(u16::MAX);
    let x = panel_x(layout, idx);
    let Some(area) = clip(frame, Rect::new(x, 0, width, height)) else {
        return;
    };

    let path = panel.path().display().to_string();
    let title = truncate(&path, layout.panel_width.saturating_sub(TITLE_DECORATION));
    let border_style = theme.border_style(is_active);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border_style)
        .style(theme.panel_style())
        .title(Line::from(vec![
            Span::styled("── ", border_style),
            Span::styled(title, border_style.add_modifier(Modifier::BOLD)),
            Span::styled(" ─", border_style),
        ]));
    frame.render_widget(block, area);

    let inner_x = x.saturating_add(1);
    let inner_width = width.saturating_sub(2);

    draw_line(
        frame,
        inner_x,
        1,
        inner_width,
        Line::styled(header_row(layout.name_width), theme.header_style()),
    );

    let separator = format!("├{}┤", "─".repeat(layout.panel_width.saturating_sub(2)));
    draw_line(frame, x, 2, width, Line::styled(separator, border_style));

    for (row, (pos, entry)) in panel
        .shown_entries()
        .enumerate()
        .skip(panel.scroll())
        .take(layout.list_rows)
        .enumerate()
    {
        let style = row_style(theme, panel, entry, pos, is_active);
        let text = entry_row(entry, layout);
        let y = u16::try_from(3 + row).unwrap_or(u16::MAX);
        draw_line(frame, inner_x, y, inner_width, Line::styled(text, style));
    }
}

fn row_style(theme: &Theme, panel: &Panel, entry: &FileEntry, idx: usize, active: bool) -> Style {
    let base = theme.panel_style();
    if idx == panel.cursor() {
        base.patch(theme.selection_style(active))
    } else if entry.is_dir() {
        base.patch(theme.directory_style())
    } else {
        base
    }
}

/// Column header aligned with [entry_row].
pub(crate) fn header_row(name_width: usize) -> String {
    format!(
        "   {:<nw$} {:>7}  {:<12}",
        "Name",
        "Size",
        "Modified",
        nw = name_width
    )
}

/// One panel row: icon cell, name column, size and date, padded to the inner panel width.
pub(crate) fn entry_row(entry: &FileEntry, layout: &Layout) -> String {
    let name_width = layout.name_width;
    let name = truncate(&entry.name_str(), name_width);
    let size = if entry.is_dir() {
        "<DIR>".to_string()
    } else {
        format_size(entry.size())
    };

    let content = format!(
        "{} {:>7}  {:<12}",
        pad_to(&name, name_width),
        size,
        format_mtime(entry.modified())
    );

    let line = format!("{} {}", padded_icon(entry), content);
    let used = 3 + display_width(&content);
    let padding = layout.panel_width.saturating_sub(2).saturating_sub(used);
    pad_to(&line, display_width(&line) + padding)
}
