//! Small drawing helpers shared by the file manager and the viewer screens.
//!
//! Every helper clips its target rectangle to the frame, so a terminal smaller than the
//! layout assumes never makes ratatui write outside the buffer.

use crate::app::Prompt;
use crate::core::width::{display_width, pad_to};

use ratatui::{
    Frame,
    layout::{Position, Rect},
    style::Style,
    text::Line,
    widgets::Paragraph,
};

/// `rect` clipped to the frame, `None` when nothing of it is visible.
pub(crate) fn clip(frame: &Frame, rect: Rect) -> Option<Rect> {
    let area = rect.intersection(frame.area());
    (!area.is_empty()).then_some(area)
}

/// Draws `line` on row `y` starting at column `x`.
pub(crate) fn draw_line(frame: &mut Frame, x: u16, y: u16, width: u16, line: Line<'_>) {
    if let Some(area) = clip(frame, Rect::new(x, y, width, 1)) {
        frame.render_widget(Paragraph::new(line), area);
    }
}

/// Draws `text` padded to the full terminal width, e.g. status and footer bars.
pub(crate) fn draw_bar(frame: &mut Frame, y: u16, text: &str, style: Style) {
    let width = frame.area().width;
    let padded = pad_to(text, usize::from(width));
    draw_line(frame, 0, y, width, Line::styled(padded, style));
}

/// Draws the prompt label and the typed text on row `y` and puts the cursor after it.
pub(crate) fn draw_prompt(frame: &mut Frame, y: u16, prompt: &Prompt, style: Style) {
    let text = format!("{}{}", prompt.label(), prompt.buffer());
    draw_bar(frame, y, &text, style);

    let area = frame.area();
    let x = u16::try_from(display_width(&text)).unwrap_or(u16::MAX);
    if y < area.bottom() {
        frame.set_cursor_position(Position::new(x.min(area.right().saturating_sub(1)), y));
    }
}
