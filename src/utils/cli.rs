//! Command-line argument parsing and help for dualpane.
//!
//! When invoked with no args (dp), dualpane opens both panels in the current directory.

use crate::config::Config;

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum CliAction {
    RunApp,
    RunAppAtPath(String),
    Exit,
}

pub(crate) fn handle_args() -> CliAction {
    let args: Vec<String> = std::env::args().skip(1).collect();
    parse_args(&args)
}

fn parse_args(args: &[String]) -> CliAction {
    let Some(arg) = args.first() else {
        return CliAction::RunApp;
    };

    if args.len() > 1 {
        eprintln!("Error: dualpane accepts only one argument at a time.");
        eprintln!("Usage: dp [PATH] or dp [OPTION]");
        return CliAction::Exit;
    }

    match arg.as_str() {
        "--version" | "-v" => {
            print_version();
            CliAction::Exit
        }
        "-h" | "--help" => {
            print_help();
            CliAction::Exit
        }
        "--keybinds" | "--keys" => {
            print_keybinds();
            CliAction::Exit
        }
        "--init" => {
            if let Err(e) = Config::generate_default(&Config::default_path()) {
                eprintln!("Error: {}", e);
            }
            CliAction::Exit
        }
        arg if !arg.starts_with('-') && !arg.trim().is_empty() => {
            CliAction::RunAppAtPath(arg.to_string())
        }
        arg => {
            eprintln!("Unknown argument: {}", arg);
            eprintln!("Try --help for available options");
            CliAction::Exit
        }
    }
}

fn print_version() {
    println!("dualpane {}", env!("CARGO_PKG_VERSION"));
}

fn print_help() {
    println!(
        r#"dualpane - A two-panel terminal file manager with a built-in text viewer

USAGE:
  dp [PATH]

PATH:
  Directory to open in both panels (defaults to current directory)

OPTIONS:
      --init              Generate the default configuration file
      --keybinds          Display all the default keybinds
  -h, --help              Print help information
  -v, --version           Display the current installed version of dualpane

ENVIRONMENT:
  DUALPANE_CONFIG         Override the default config path
"#
    );
}

const KEYBINDS_TEXT: &str = r##"
=========================
 File Manager  [keys]
=========================
  go_up / go_down           ["k", "Up"] / ["j", "Down"]
  page_up / page_down       ["u", "PageUp", "Ctrl+u"] / ["d", "PageDown", "Ctrl+d"]
  go_to_top / go_to_bottom  ["0", "Home"] / ["$", "End"]
  open                      ["Enter"]       (directory: enter, file: view)
  go_parent                 ["Backspace", "-"]
  switch_panel              ["Tab"]
  left_panel / right_panel  ["h", "Left"] / ["l", "Right"]
  go_to_path                ["p", "P"]
  filter                    ["/"]
  next_match                ["n", "N"]
  clear_filter              ["Esc"]
  copy                      ["c", "C"]      (into the other panel)
  move_file                 ["m", "M"]      (into the other panel)
  delete                    ["x", "X"]      (asks for confirmation)
  refresh                   ["r", "R"]
  quit                      ["q", "Q"]

=========================
 Text Viewer  [viewer_keys]
=========================
  scroll_up / scroll_down   ["k", "Up"] / ["j", "Down"]
  page_up / page_down       ["u", "PageUp", "Ctrl+u"] / ["d", "PageDown", "Ctrl+d"]
  go_to_top / go_to_bottom  ["g", "Home"] / ["G", "End"]
  search                    ["/"]
  next_match / prev_match   ["n"] / ["N"]
  go_to_line                [":"]
  close                     ["q", "Q", "Esc"]

  Syntax Reference:
    Single characters, "Up", "Down", "Left", "Right", "PageUp", "PageDown",
    "Home", "End", "Enter", "Esc", "Tab", "Backspace", "Space", "Ctrl+x"
"##;

fn print_keybinds() {
    println!("{}", KEYBINDS_TEXT);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn no_args_runs_app() {
        assert_eq!(parse_args(&[]), CliAction::RunApp);
    }

    #[test]
    fn path_argument() {
        assert_eq!(
            parse_args(&args(&["/tmp"])),
            CliAction::RunAppAtPath("/tmp".into())
        );
    }

    #[test]
    fn rejects_extra_and_unknown() {
        assert_eq!(parse_args(&args(&["a", "b"])), CliAction::Exit);
        assert_eq!(parse_args(&args(&["--bogus"])), CliAction::Exit);
        assert_eq!(parse_args(&args(&["--version"])), CliAction::Exit);
    }
}
