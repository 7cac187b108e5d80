//! Theme configuration options for dualpane
//!
//! This module defines the `[theme]` table of dualpane.toml: colour pairs for the panels, the
//! status area, the viewer chrome and one entry per syntax highlight category.
//!
//! Every colour left at `"default"` falls back to the internal default theme, which mirrors the
//! classic warm-grey palette of dualpane.

use crate::core::highlight::TokenKind;
use crate::utils::parse_color;

use ratatui::style::{Color, Modifier, Style};
use serde::Deserialize;

use std::sync::LazyLock;

/// Theme configuration options
/// # Examples
/// ```toml
/// [theme.panel]
/// fg = "#ffffd7"
/// bg = "#303030"
/// [theme.syntax.keyword]
/// fg = "magenta"
/// ```
#[derive(Deserialize, Debug)]
#[serde(default)]
pub struct Theme {
    /// Border and title of the active panel.
    active_border: ColorPair,
    /// Border and title of the inactive panel.
    border: ColorPair,
    /// Panel body.
    panel: ColorPair,
    /// Column header row.
    header: ColorPair,
    directory: ColorPair,
    /// Cursor row in the active panel.
    selection: ColorPair,
    /// Cursor row in the inactive panel.
    inactive_selection: ColorPair,
    status: ColorPair,
    help: ColorPair,
    filter: ColorPair,
    prompt: ColorPair,
    viewer_header: ColorPair,
    viewer_footer: ColorPair,
    line_number: ColorPair,
    search_match: ColorPair,
    syntax: SyntaxTheme,
}

const CREAM: Color = Color::Indexed(230);
const WARM_BG: Color = Color::Indexed(236);
const ORANGE: Color = Color::Indexed(208);

impl Default for Theme {
    fn default() -> Self {
        Theme {
            active_border: ColorPair::fg(Color::Cyan),
            border: ColorPair::fg(CREAM),
            panel: ColorPair::new(CREAM, WARM_BG),
            header: ColorPair::new(CREAM, WARM_BG),
            directory: ColorPair::fg(Color::Cyan),
            selection: ColorPair::new(WARM_BG, CREAM),
            inactive_selection: ColorPair::new(Color::White, Color::DarkGray),
            status: ColorPair::new(Color::White, Color::Blue),
            help: ColorPair::fg(Color::DarkGray),
            filter: ColorPair::fg(Color::Yellow),
            prompt: ColorPair::new(Color::White, Color::Blue),
            viewer_header: ColorPair::new(Color::White, Color::Blue),
            viewer_footer: ColorPair::new(Color::White, Color::DarkGray),
            line_number: ColorPair::fg(Color::DarkGray),
            search_match: ColorPair::new(Color::Black, Color::Yellow),
            syntax: SyntaxTheme::default(),
        }
    }
}

impl Theme {
    /// Internal default theme, used as the fallback for colours left at Reset.
    pub fn internal_defaults() -> &'static Self {
        static DEFAULT: LazyLock<Theme> = LazyLock::new(Theme::default);
        &DEFAULT
    }

    pub fn border_style(&self, active: bool) -> Style {
        let defaults = Theme::internal_defaults();
        if active {
            self.active_border
                .style_or(&defaults.active_border)
                .add_modifier(Modifier::BOLD)
        } else {
            self.border.style_or(&defaults.border)
        }
    }

    pub fn panel_style(&self) -> Style {
        self.panel.style_or(&Theme::internal_defaults().panel)
    }

    pub fn header_style(&self) -> Style {
        self.header
            .style_or(&Theme::internal_defaults().header)
            .add_modifier(Modifier::DIM)
    }

    pub fn directory_style(&self) -> Style {
        self.directory
            .style_or(&Theme::internal_defaults().directory)
    }

    pub fn selection_style(&self, active: bool) -> Style {
        let defaults = Theme::internal_defaults();
        if active {
            self.selection
                .style_or(&defaults.selection)
                .add_modifier(Modifier::BOLD)
        } else {
            self.inactive_selection
                .style_or(&defaults.inactive_selection)
        }
    }

    pub fn status_style(&self) -> Style {
        self.status.style_or(&Theme::internal_defaults().status)
    }

    pub fn help_style(&self) -> Style {
        self.help.style_or(&Theme::internal_defaults().help)
    }

    pub fn filter_style(&self) -> Style {
        self.filter.style_or(&Theme::internal_defaults().filter)
    }

    pub fn prompt_style(&self) -> Style {
        self.prompt.style_or(&Theme::internal_defaults().prompt)
    }

    pub fn viewer_header_style(&self) -> Style {
        self.viewer_header
            .style_or(&Theme::internal_defaults().viewer_header)
            .add_modifier(Modifier::BOLD)
    }

    pub fn viewer_footer_style(&self) -> Style {
        self.viewer_footer
            .style_or(&Theme::internal_defaults().viewer_footer)
    }

    pub fn line_number_style(&self) -> Style {
        self.line_number
            .style_or(&Theme::internal_defaults().line_number)
    }

    pub fn search_match_style(&self) -> Style {
        self.search_match
            .style_or(&Theme::internal_defaults().search_match)
    }

    /// Style of one highlight category. Plain text keeps the terminal colours.
    pub fn token_style(&self, kind: TokenKind) -> Style {
        let defaults = &Theme::internal_defaults().syntax;
        let syntax = &self.syntax;
        match kind {
            TokenKind::Plain => Style::default(),
            TokenKind::Comment => syntax
                .comment
                .style_or(&defaults.comment)
                .add_modifier(Modifier::DIM),
            TokenKind::String => syntax.string.style_or(&defaults.string),
            TokenKind::Keyword => syntax
                .keyword
                .style_or(&defaults.keyword)
                .add_modifier(Modifier::BOLD),
            TokenKind::Number => syntax.number.style_or(&defaults.number),
            TokenKind::Call => syntax.call.style_or(&defaults.call),
            TokenKind::Operator => syntax.operator.style_or(&defaults.operator),
            TokenKind::Variable => syntax.variable.style_or(&defaults.variable),
        }
    }
}

/// Colours of the syntax highlight categories, `[theme.syntax]`.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct SyntaxTheme {
    comment: ColorPair,
    string: ColorPair,
    keyword: ColorPair,
    number: ColorPair,
    call: ColorPair,
    operator: ColorPair,
    variable: ColorPair,
}

impl Default for SyntaxTheme {
    fn default() -> Self {
        Self {
            comment: ColorPair::fg(Color::DarkGray),
            string: ColorPair::fg(Color::Green),
            keyword: ColorPair::fg(Color::Magenta),
            number: ColorPair::fg(ORANGE),
            call: ColorPair::fg(Color::LightCyan),
            operator: ColorPair::fg(Color::Yellow),
            variable: ColorPair::fg(Color::LightBlue),
        }
    }
}

/// ColorPair struct to hold foreground and background colors.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct ColorPair {
    #[serde(default, deserialize_with = "deserialize_color_field")]
    fg: Color,
    #[serde(default, deserialize_with = "deserialize_color_field")]
    bg: Color,
}

impl Default for ColorPair {
    fn default() -> Self {
        Self {
            fg: Color::Reset,
            bg: Color::Reset,
        }
    }
}

impl ColorPair {
    const fn new(fg: Color, bg: Color) -> Self {
        Self { fg, bg }
    }

    const fn fg(fg: Color) -> Self {
        Self::new(fg, Color::Reset)
    }

    /// Resolves the ColorPair by replacing Reset colors with those from another ColorPair.
    pub fn resolve(&self, other: &ColorPair) -> Self {
        Self {
            fg: if self.fg == Color::Reset {
                other.fg
            } else {
                self.fg
            },
            bg: if self.bg == Color::Reset {
                other.bg
            } else {
                self.bg
            },
        }
    }

    /// Converts the ColorPair to a Style, falling back to `fallback` for Reset colors.
    pub fn style_or(&self, fallback: &ColorPair) -> Style {
        let resolved = self.resolve(fallback);
        Style::default().fg(resolved.fg).bg(resolved.bg)
    }
}

fn deserialize_color_field<'de, D>(deserializer: D) -> Result<Color, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    Ok(parse_color(&s))
}
