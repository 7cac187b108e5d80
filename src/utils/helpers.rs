//! Helpers for dualpane.
//!
//! - Color parsing from names, 256-colour indices or hex codes
//! - Recursive copying for the copy and cross-device move operations
//! - Home directory lookup and `~` expansion
//! - Joining a typed path onto a panel directory

use ratatui::style::Color;
use std::path::{MAIN_SEPARATOR, Path, PathBuf};
use std::{fs, io};

/// Parses a string (color name, 256-colour index or hex) into a ratatui::style::Color
///
/// Supports standard names (red, green, etc.) as well as hex values (#RRGGBB or #RGB)
pub fn parse_color(s: &str) -> Color {
    match s.to_lowercase().as_str() {
        "default" | "reset" => Color::Reset,
        "yellow" => Color::Yellow,
        "red" => Color::Red,
        "blue" => Color::Blue,
        "green" => Color::Green,
        "magenta" => Color::Magenta,
        "cyan" => Color::Cyan,
        "white" => Color::White,
        "black" => Color::Black,
        "gray" | "grey" => Color::Gray,
        "darkgray" | "darkgrey" => Color::DarkGray,
        "lightred" => Color::LightRed,
        "lightgreen" => Color::LightGreen,
        "lightyellow" => Color::LightYellow,
        "lightblue" => Color::LightBlue,
        "lightmagenta" => Color::LightMagenta,
        "lightcyan" => Color::LightCyan,
        other => {
            if let Ok(idx) = other.parse::<u8>() {
                return Color::Indexed(idx);
            }
            if let Some(color) = s.strip_prefix('#') {
                match color.len() {
                    6 => {
                        if let Ok(rgb) = u32::from_str_radix(color, 16) {
                            return rgb_color(rgb);
                        }
                    }
                    3 => {
                        let expanded = color
                            .chars()
                            .map(|c| format!("{}{}", c, c))
                            .collect::<String>();
                        if let Ok(rgb) = u32::from_str_radix(&expanded, 16) {
                            return rgb_color(rgb);
                        }
                    }
                    _ => {}
                }
            }
            // fallback
            Color::Reset
        }
    }
}

fn rgb_color(rgb: u32) -> Color {
    Color::Rgb(
        ((rgb >> 16) & 0xFF) as u8,
        ((rgb >> 8) & 0xFF) as u8,
        (rgb & 0xFF) as u8,
    )
}

/// Recursively copies files and directories from `src` to `dest`.
///
/// If `src` is a directory, it creates the directory at `dest` and copies all its contents recursively.
pub fn copy_recursive(src: &Path, dest: &Path) -> io::Result<()> {
    if src.is_dir() {
        fs::create_dir_all(dest)?;
        for entry in fs::read_dir(src)? {
            let entry = entry?;
            let entry_path = entry.path();
            let dest_path = dest.join(entry.file_name());
            copy_recursive(&entry_path, &dest_path)?;
        }
    } else {
        fs::copy(src, dest)?;
    }
    Ok(())
}

#[inline]
pub fn get_home() -> Option<PathBuf> {
    dirs::home_dir()
}

/// Replaces a leading `~` with the home directory. Other input is returned unchanged.
pub fn expand_home_path(input: &str) -> PathBuf {
    if let Some(rest) = input.strip_prefix('~')
        && (rest.is_empty() || rest.starts_with(MAIN_SEPARATOR) || rest.starts_with('/'))
        && let Some(home) = get_home()
    {
        let rest = rest.trim_start_matches(['/', MAIN_SEPARATOR]);
        return if rest.is_empty() {
            home
        } else {
            home.join(rest)
        };
    }
    PathBuf::from(input)
}

/// Turns typed input into a path: `~` is expanded and relative input is taken relative to
/// `base`. The result is not checked for existence.
pub fn join_input_path(input: &str, base: &Path) -> PathBuf {
    let expanded = expand_home_path(input.trim());
    if expanded.is_absolute() {
        expanded
    } else {
        base.join(expanded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::error;
    use std::fs::File;
    use tempfile::tempdir;

    #[test]
    fn test_parse_color() {
        assert_eq!(parse_color("Cyan"), Color::Cyan);
        assert_eq!(parse_color("208"), Color::Indexed(208));
        assert_eq!(parse_color("#ff8000"), Color::Rgb(255, 128, 0));
        assert_eq!(parse_color("#f80"), Color::Rgb(255, 136, 0));
        assert_eq!(parse_color("#12"), Color::Reset);
        assert_eq!(parse_color("not-a-color"), Color::Reset);
    }

    #[test]
    fn test_expand_home() {
        if let Some(home) = get_home() {
            assert_eq!(expand_home_path("~"), home);
            assert_eq!(expand_home_path("~/docs"), home.join("docs"));
        }
        assert_eq!(expand_home_path("~user/x"), PathBuf::from("~user/x"));
        assert_eq!(expand_home_path("/tmp"), PathBuf::from("/tmp"));
    }

    #[test]
    fn test_join_relative_and_absolute() -> Result<(), Box<dyn error::Error>> {
        let dir = tempdir()?;
        let base = fs::canonicalize(dir.path())?;
        fs::create_dir(base.join("sub"))?;
        File::create(base.join("sub/file.txt"))?;

        assert_eq!(join_input_path("sub", &base), base.join("sub"));
        let joined = join_input_path(" sub/../sub/file.txt ", &base);
        assert_eq!(fs::canonicalize(joined)?, base.join("sub/file.txt"));
        assert_eq!(join_input_path("/etc", &base), PathBuf::from("/etc"));
        Ok(())
    }

    #[test]
    fn test_copy_recursive() -> Result<(), Box<dyn error::Error>> {
        let dir = tempdir()?;
        let src = dir.path().join("src");
        fs::create_dir_all(src.join("a/b"))?;
        fs::write(src.join("a/b/c.txt"), "c")?;
        copy_recursive(&src, &dir.path().join("dst"))?;
        assert_eq!(fs::read_to_string(dir.path().join("dst/a/b/c.txt"))?, "c");
        Ok(())
    }
}
