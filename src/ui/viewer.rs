//! Viewer screen drawing: header, numbered and highlighted text lines, footer and help.
//!
//! Binary files get a fixed hex dump page instead.

use crate::app::viewer::match_ranges;
use crate::app::{AppState, Viewer, ViewerContent};
use crate::config::Theme;
use crate::core::formatter::HEX_DUMP_LIMIT;
use crate::core::highlight::{LanguageRules, highlight};
use crate::core::width::{display_width, take_columns, truncate};
use crate::ui::widgets::{draw_bar, draw_line, draw_prompt};

use ratatui::{
    Frame,
    style::{Modifier, Style},
    text::{Line, Span},
};

pub(crate) const VIEWER_HELP: &str =
    " Arrows/jk:Scroll  u/d:Page  g/G:Start/End  /:Search  n/N:Match  ::Line  q:Close";

const TAB: &str = "    ";

/// Draws the whole viewer screen for the open file.
pub(crate) fn draw_viewer(frame: &mut Frame, app: &AppState, viewer: &Viewer) {
    let theme = app.config().theme();
    match viewer.content() {
        ViewerContent::Binary { dump } => draw_binary(frame, theme, viewer, dump),
        ViewerContent::Text { lines, rules } => {
            draw_text(frame, app, viewer, lines, *rules);
        }
    }
}

fn draw_text(
    frame: &mut Frame,
    app: &AppState,
    viewer: &Viewer,
    lines: &[String],
    rules: Option<&LanguageRules>,
) {
    let theme = app.config().theme();
    let layout = app.layout();
    let columns = usize::from(frame.area().width);
    let height = layout.viewer_height;

    draw_bar(frame, 0, &header_text(viewer, columns, height), theme.viewer_header_style());

    let gutter = viewer.gutter_width();
    let text_columns = columns.saturating_sub(gutter + 2);
    let width = frame.area().width;

    for row in 0..height {
        let y = u16::try_from(row + 1).unwrap_or(u16::MAX);
        let line = match lines.get(viewer.top() + row) {
            Some(text) => {
                let number = format!("{:>w$} ", viewer.top() + row + 1, w = gutter);
                let expanded = text.replace('\t', TAB);
                let visible = take_columns(&expanded, text_columns);

                let mut spans = vec![Span::styled(number, theme.line_number_style())];
                spans.extend(content_spans(theme, visible, viewer.search(), rules));
                Line::from(spans)
            }
            None => Line::styled("~", theme.line_number_style()),
        };
        draw_line(frame, 0, y, width, line);
    }

    let rows = frame.area().height;
    let footer_y = rows.saturating_sub(2);
    match app.prompt() {
        Some(prompt) => draw_prompt(frame, footer_y, prompt, theme.viewer_footer_style()),
        None => {
            let footer = viewer
                .search_status()
                .unwrap_or_else(|| viewer.path().display().to_string());
            draw_bar(frame, footer_y, &format!(" {}", footer), theme.viewer_footer_style());
        }
    }
    draw_bar(frame, rows.saturating_sub(1), VIEWER_HELP, theme.help_style());
}

/// ` File: <name>` on the left and `Line a-b/total` on the right.
pub(crate) fn header_text(viewer: &Viewer, columns: usize, height: usize) -> String {
    let name = format!(" File: {}", truncate(viewer.name(), columns.saturating_sub(30)));
    let gap = columns.saturating_sub(display_width(&name) + 20);
    format!("{}{}{} ", name, " ".repeat(gap), viewer.line_range(height))
}

/// Spans of one visible line: search hits take precedence over syntax colours.
fn content_spans(
    theme: &Theme,
    text: &str,
    query: &str,
    rules: Option<&LanguageRules>,
) -> Vec<Span<'static>> {
    if !query.is_empty() {
        let ranges = match_ranges(text, query);
        if !ranges.is_empty() {
            let mut spans = Vec::with_capacity(ranges.len() * 2 + 1);
            let mut pos = 0;
            for range in ranges {
                if range.start > pos {
                    spans.push(Span::raw(text[pos..range.start].to_string()));
                }
                spans.push(Span::styled(
                    text[range.clone()].to_string(),
                    theme.search_match_style(),
                ));
                pos = range.end;
            }
            if pos < text.len() {
                spans.push(Span::raw(text[pos..].to_string()));
            }
            return spans;
        }
    }

    if rules.is_some() {
        highlight(text, rules)
            .into_iter()
            .map(|span| Span::styled(span.text.to_string(), theme.token_style(span.kind)))
            .collect()
    } else {
        vec![Span::raw(text.to_string())]
    }
}

fn draw_binary(frame: &mut Frame, theme: &Theme, viewer: &Viewer, dump: &[String]) {
    let area = frame.area();
    let columns = usize::from(area.width);

    let mut lines: Vec<Line> = vec![
        Line::styled(
            format!("Binary File: {}", viewer.path().display()),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Line::raw("-".repeat(columns)),
        Line::styled("[Binary file - showing hex dump]", theme.filter_style()),
        Line::raw(""),
    ];
    lines.extend(dump.iter().map(|row| Line::raw(row.clone())));
    lines.push(Line::raw(""));
    lines.push(Line::raw(format!("(Showing first {} bytes)", HEX_DUMP_LIMIT)));
    lines.push(Line::raw(""));
    lines.push(Line::styled(
        " Press any key to continue... ",
        Style::default().add_modifier(Modifier::REVERSED),
    ));

    for (row, line) in lines.into_iter().enumerate().take(usize::from(area.height)) {
        let y = u16::try_from(row).unwrap_or(u16::MAX);
        draw_line(frame, 0, y, area.width, line);
    }
}
