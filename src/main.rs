//! main.rs
//! Entry point for dualpane

pub(crate) mod app;
pub(crate) mod config;
pub(crate) mod core;
pub(crate) mod ui;
pub(crate) mod utils;

use crate::app::AppState;
use crate::config::Config;
use crate::core::terminal;
use crate::utils::cli::{CliAction, handle_args};
use crate::utils::expand_home_path;

use simplelog::{ConfigBuilder, WriteLogger};
use std::fs::{self, File};
use std::path::{Path, PathBuf};

fn main() -> std::io::Result<()> {
    std::panic::set_hook(Box::new(|info| {
        let _ = crossterm::terminal::disable_raw_mode();
        let mut stdout = std::io::stdout();
        let _ = crossterm::execute!(
            stdout,
            crossterm::terminal::LeaveAlternateScreen,
            crossterm::cursor::Show
        );

        eprintln!("\n[dualpane] Error occurred: {}", info);

        #[cfg(debug_assertions)]
        {
            let bt = std::backtrace::Backtrace::force_capture();
            eprintln!("\nStack Backtrace:\n{}", bt);
        }
    }));

    let action = handle_args();

    let initial_path = match action {
        CliAction::Exit => return Ok(()),
        CliAction::RunApp => std::env::current_dir()?,
        CliAction::RunAppAtPath(path_arg) => match resolve_dir(&path_arg) {
            Some(path) => path,
            None => {
                eprintln!("\n[dualpane] Error: Path '{}' cannot be opened.", path_arg);
                std::process::exit(1);
            }
        },
    };

    let config = Config::load();
    init_logging(&config);
    log::info!("dualpane starting in {}", initial_path.display());

    let mut app = AppState::new(&config, &initial_path)?;
    terminal::run_terminal(&mut app)?;
    log::info!("dualpane exiting");

    println!("Thanks for using DualPane File Manager!");
    Ok(())
}

/// Canonical form of the path argument, `None` unless it names a readable directory.
fn resolve_dir(arg: &str) -> Option<PathBuf> {
    let path = fs::canonicalize(expand_home_path(arg)).ok()?;
    (path.is_dir() && fs::read_dir(&path).is_ok()).then_some(path)
}

/// Starts the file logger. An empty `log_file` setting turns logging off.
fn init_logging(config: &Config) {
    let general = config.general();
    let Some(path) = general.log_file() else {
        return;
    };

    let result = open_log(path).and_then(|file| {
        let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
        WriteLogger::init(general.log_level(), log_config, file).map_err(std::io::Error::other)
    });
    if let Err(e) = result {
        eprintln!("[dualpane] Warning: cannot log to {}: {}", path.display(), e);
    }
}

fn open_log(path: &Path) -> std::io::Result<File> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    File::create(path)
}
