//! Terminal rendering and event loop for dualpane.
//!
//! Handles setup/teardown of raw mode, alternate screen, redraws,
//! and feeds decoded keys to the app logic. Resizes are detected by polling the terminal
//! size whenever the key decoder times out.

use crate::app::{AppState, KeypressResult};
use crate::core::input::{ByteSource, Key, KeyDecoder, StdinSource};
use crate::core::viewport::Layout;
use crate::ui;

use crossterm::{
    cursor::{Hide, Show},
    execute,
    terminal::{
        EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode, size,
    },
};
use ratatui::Terminal;
use ratatui::backend::{Backend, CrosstermBackend};
use std::{io, time::Duration};

/// Initializes the terminal in raw mode and alternate screen and runs the main event loop.
///
/// Blocks until quit.
/// Returns an std::io::Error if terminal setup or teardown fails.
pub(crate) fn run_terminal(app: &mut AppState) -> io::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, Hide)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let (columns, rows) = size().unwrap_or((Layout::FALLBACK_COLUMNS, Layout::FALLBACK_ROWS));
    app.set_layout(Layout::new(columns, rows));

    let general = app.config().general();
    let poll = general.poll_interval();
    let mut decoder = KeyDecoder::new(StdinSource::spawn(general.escape_timeout()));

    let result = event_loop(&mut terminal, app, &mut decoder, poll);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, Show)?;
    if let Err(e) = &result {
        log::error!("event loop stopped: {}", e);
    }
    result
}

/// Main event loop of dualpane: draws the UI when something changed, waits for the next key
/// and dispatches it to the app. Returns on quit.
fn event_loop<B: Backend, S: ByteSource>(
    terminal: &mut Terminal<B>,
    app: &mut AppState,
    decoder: &mut KeyDecoder<S>,
    poll: Duration,
) -> io::Result<()>
where
    io::Error: From<<B as Backend>::Error>,
{
    let mut dirty = true;

    while app.is_running() {
        if dirty {
            terminal.draw(|f| ui::render(f, app))?;
            dirty = false;
        }

        let key = decoder.next_key(poll)?;

        // no input: check the geometry
        if key == Key::Timeout {
            if let Ok((columns, rows)) = size()
                && app.resize(columns, rows)
            {
                terminal.clear()?;
                dirty = true;
            }
            continue;
        }

        match app.handle_key(key) {
            KeypressResult::Quit => break,
            KeypressResult::Redraw => {
                // full clear/reset
                terminal.clear()?;
                dirty = true;
            }
            KeypressResult::Consumed => dirty = true,
            KeypressResult::Continue => {}
        }
    }
    Ok(())
}
