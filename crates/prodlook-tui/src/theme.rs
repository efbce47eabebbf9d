//! Colour theme for the prodlook TUI.
//!
//! Themes are defined as TOML files. Both built-in themes are embedded in the
//! binary via [`include_str!`] so the application works without any files on
//! disk. Call [`Theme::by_name`] at startup and pass the result through the
//! application as a shared reference.

use config::{Config, File, FileFormat};
use ratatui::style::{Color, Modifier, Style};
use serde::Deserialize;

use crate::widgets::notice::NoticeKind;

const DEFAULT_THEME_SRC: &str = include_str!("themes/default.toml");
const GRUVBOX_DARK_THEME_SRC: &str = include_str!("themes/gruvbox_dark.toml");

// ---------------------------------------------------------------------------
// Raw (serde) types: mirror the TOML structure
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct RawStyle {
    fg: Option<String>,
    bg: Option<String>,
    #[serde(default)]
    bold: bool,
    #[serde(default)]
    dim: bool,
    #[serde(default)]
    italic: bool,
    #[serde(default)]
    underlined: bool,
}

impl RawStyle {
    fn into_style(self) -> Style {
        let mut style = Style::default();
        if let Some(c) = self.fg.as_deref().and_then(parse_color) {
            style = style.fg(c);
        }
        if let Some(c) = self.bg.as_deref().and_then(parse_color) {
            style = style.bg(c);
        }
        if self.bold {
            style = style.add_modifier(Modifier::BOLD);
        }
        if self.dim {
            style = style.add_modifier(Modifier::DIM);
        }
        if self.italic {
            style = style.add_modifier(Modifier::ITALIC);
        }
        if self.underlined {
            style = style.add_modifier(Modifier::UNDERLINED);
        }
        style
    }
}

#[derive(Debug, Deserialize)]
struct RawBorders {
    focused: RawStyle,
    command_bar: RawStyle,
    unfocused: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawTable {
    header: RawStyle,
    selected: RawStyle,
    sequence: RawStyle,
    price: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawNotices {
    info: RawStyle,
    warn: RawStyle,
    error: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawBanner {
    logo: RawStyle,
    title: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawTheme {
    borders: RawBorders,
    table: RawTable,
    notices: RawNotices,
    banner: RawBanner,
}

// ---------------------------------------------------------------------------
// Public Theme type
// ---------------------------------------------------------------------------

/// Application colour theme. All styles are pre-resolved ratatui [`Style`]
/// values, so rendering never allocates for styling.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Border style for the currently focused pane.
    pub border_focused: Style,
    /// Border style for the command bar pane
    pub border_command_bar: Style,
    /// Border style for unfocused panes.
    pub border_unfocused: Style,

    pub table_header: Style,
    /// Highlight for the cursor row of the results table.
    pub table_selected: Style,
    pub table_sequence: Style,
    pub table_price: Style,

    pub notice_info: Style,
    pub notice_warn: Style,
    pub notice_error: Style,

    pub banner_logo: Style,
    pub banner_title: Style,
}

impl Theme {
    /// Load and parse the embedded default theme.
    ///
    /// # Panics
    ///
    /// Panics if the embedded TOML is malformed.
    pub fn load_default() -> Self {
        Self::from_toml_str(DEFAULT_THEME_SRC).expect("embedded default theme must be valid TOML")
    }

    /// Load and parse the embedded Gruvbox Dark theme.
    ///
    /// # Panics
    ///
    /// Panics if the embedded TOML is malformed.
    pub fn load_gruvbox_dark() -> Self {
        Self::from_toml_str(GRUVBOX_DARK_THEME_SRC)
            .expect("embedded gruvbox dark theme must be valid TOML")
    }

    /// Resolve a theme name from config or the `:theme` command.
    /// Unknown names fall back to the default theme.
    pub fn by_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "gruvbox" | "gruvbox_dark" | "gruvbox-dark" => Self::load_gruvbox_dark(),
            "default" => Self::load_default(),
            other => {
                tracing::debug!(theme = other, "unknown theme, using default");
                Self::load_default()
            }
        }
    }

    /// Parse a theme from a TOML string.
    ///
    /// Unknown keys are ignored so user themes stay forward-compatible.
    pub fn from_toml_str(src: &str) -> anyhow::Result<Self> {
        let raw: RawTheme = Config::builder()
            .add_source(File::from_str(src, FileFormat::Toml))
            .build()?
            .try_deserialize()?;

        Ok(Self {
            border_focused: raw.borders.focused.into_style(),
            border_command_bar: raw.borders.command_bar.into_style(),
            border_unfocused: raw.borders.unfocused.into_style(),
            table_header: raw.table.header.into_style(),
            table_selected: raw.table.selected.into_style(),
            table_sequence: raw.table.sequence.into_style(),
            table_price: raw.table.price.into_style(),
            notice_info: raw.notices.info.into_style(),
            notice_warn: raw.notices.warn.into_style(),
            notice_error: raw.notices.error.into_style(),
            banner_logo: raw.banner.logo.into_style(),
            banner_title: raw.banner.title.into_style(),
        })
    }

    pub fn notice_style(&self, kind: NoticeKind) -> Style {
        match kind {
            NoticeKind::Info => self.notice_info,
            NoticeKind::Warn => self.notice_warn,
            NoticeKind::Error => self.notice_error,
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Parse a colour name into a ratatui [`Color`].
///
/// Accepts:
/// - Named terminal colours (case-insensitive): `red`, `dark_gray`, etc.
/// - Hex RGB: `#rrggbb`
/// - 256-colour indexed: `indexed:N`
fn parse_color(s: &str) -> Option<Color> {
    match s.to_ascii_lowercase().as_str() {
        "black" => Some(Color::Black),
        "red" => Some(Color::Red),
        "green" => Some(Color::Green),
        "yellow" => Some(Color::Yellow),
        "blue" => Some(Color::Blue),
        "magenta" => Some(Color::Magenta),
        "cyan" => Some(Color::Cyan),
        "gray" | "grey" => Some(Color::Gray),
        "dark_gray" | "darkgray" | "dark_grey" | "darkgrey" => Some(Color::DarkGray),
        "light_red" => Some(Color::LightRed),
        "light_green" => Some(Color::LightGreen),
        "light_yellow" => Some(Color::LightYellow),
        "light_blue" => Some(Color::LightBlue),
        "light_magenta" => Some(Color::LightMagenta),
        "light_cyan" => Some(Color::LightCyan),
        "white" => Some(Color::White),
        s if s.starts_with('#') && s.len() == 7 => {
            let r = u8::from_str_radix(&s[1..3], 16).ok()?;
            let g = u8::from_str_radix(&s[3..5], 16).ok()?;
            let b = u8::from_str_radix(&s[5..7], 16).ok()?;
            Some(Color::Rgb(r, g, b))
        }
        s if s.starts_with("indexed:") => {
            let n: u8 = s["indexed:".len()..].parse().ok()?;
            Some(Color::Indexed(n))
        }
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_theme_loads() {
        let theme = Theme::load_default();
        assert_ne!(theme.border_focused, Style::default());
        assert_ne!(theme.table_header, Style::default());
        assert_ne!(theme.notice_error, Style::default());
    }

    #[test]
    fn gruvbox_dark_theme_loads() {
        let theme = Theme::load_gruvbox_dark();
        assert_eq!(theme.table_price.fg, Some(Color::Rgb(0xb8, 0xbb, 0x26)));
        assert_ne!(theme.notice_warn, Style::default());
    }

    #[test]
    fn by_name_falls_back_to_default() {
        let unknown = Theme::by_name("solarized");
        let default = Theme::load_default();
        assert_eq!(unknown.border_focused, default.border_focused);
        assert_eq!(
            Theme::by_name("Gruvbox").table_price,
            Theme::load_gruvbox_dark().table_price
        );
    }

    #[test]
    fn notice_styles_differ_by_kind() {
        let theme = Theme::load_default();
        assert_ne!(
            theme.notice_style(NoticeKind::Warn),
            theme.notice_style(NoticeKind::Error)
        );
    }

    #[test]
    fn parse_hex_color() {
        assert_eq!(parse_color("#ff0080"), Some(Color::Rgb(255, 0, 128)));
    }

    #[test]
    fn parse_indexed_color() {
        assert_eq!(parse_color("indexed:42"), Some(Color::Indexed(42)));
    }

    #[test]
    fn parse_unknown_color_returns_none() {
        assert_eq!(parse_color("chartreuse"), None);
    }
}
