use ratatui::style::Color;
use serde::Deserialize;

/// All semantic color slots for the pairdiff UI.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub name: String,

    // General UI
    pub accent: Color,
    pub text: Color,
    pub text_muted: Color,
    pub surface: Color,

    // Diff
    pub file_header_fg: Color,
    pub diff_add_bg: Color,
    pub diff_del_bg: Color,
    pub diff_add_fg: Color,
    pub diff_del_fg: Color,
    pub diff_context_fg: Color,
    pub diff_hunk_header_fg: Color,
    pub line_number_fg: Color,

    // Status indicators
    pub warning: Color,
}

pub const THEME_NAMES: &[&str] = &["one-dark", "github-dark", "dracula", "solarized-dark"];

impl Theme {
    pub fn from_name(name: &str) -> Self {
        match name {
            "github-dark" => github_dark(),
            "dracula" => dracula(),
            "solarized-dark" => solarized_dark(),
            _ => one_dark(),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        one_dark()
    }
}

pub fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#').unwrap_or(hex);
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

/// The `[colors]` table of the config file: hex strings keyed by theme slot.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ThemeOverrides {
    pub accent: Option<String>,
    pub text: Option<String>,
    pub text_muted: Option<String>,
    pub surface: Option<String>,
    pub file_header_fg: Option<String>,
    pub diff_add_bg: Option<String>,
    pub diff_del_bg: Option<String>,
    pub diff_add_fg: Option<String>,
    pub diff_del_fg: Option<String>,
    pub diff_context_fg: Option<String>,
    pub diff_hunk_header_fg: Option<String>,
    pub line_number_fg: Option<String>,
    pub warning: Option<String>,
}

/// Apply hex color overrides; unparsable values are logged and skipped.
pub fn apply_overrides(theme: &mut Theme, overrides: &ThemeOverrides) {
    macro_rules! apply {
        ($field:ident) => {
            if let Some(ref hex) = overrides.$field {
                match parse_hex_color(hex) {
                    Some(c) => theme.$field = c,
                    None => tracing::warn!(
                        "Ignoring invalid color {hex:?} for {}",
                        stringify!($field)
                    ),
                }
            }
        };
    }
    apply!(accent);
    apply!(text);
    apply!(text_muted);
    apply!(surface);
    apply!(file_header_fg);
    apply!(diff_add_bg);
    apply!(diff_del_bg);
    apply!(diff_add_fg);
    apply!(diff_del_fg);
    apply!(diff_context_fg);
    apply!(diff_hunk_header_fg);
    apply!(line_number_fg);
    apply!(warning);
}

fn one_dark() -> Theme {
    Theme {
        name: "one-dark".to_string(),
        accent: Color::Cyan,
        text: Color::White,
        text_muted: Color::DarkGray,
        surface: Color::Rgb(30, 30, 30),
        file_header_fg: Color::Rgb(97, 175, 239),
        diff_add_bg: Color::Rgb(0, 30, 0),
        diff_del_bg: Color::Rgb(40, 0, 0),
        diff_add_fg: Color::Green,
        diff_del_fg: Color::Red,
        diff_context_fg: Color::Rgb(171, 178, 191),
        diff_hunk_header_fg: Color::Magenta,
        line_number_fg: Color::Rgb(92, 99, 112),
        warning: Color::Yellow,
    }
}

fn github_dark() -> Theme {
    Theme {
        name: "github-dark".to_string(),
        accent: Color::Rgb(88, 166, 255),
        text: Color::Rgb(230, 237, 243),
        text_muted: Color::Rgb(125, 133, 144),
        surface: Color::Rgb(22, 27, 34),
        file_header_fg: Color::Rgb(88, 166, 255),
        diff_add_bg: Color::Rgb(18, 40, 24),
        diff_del_bg: Color::Rgb(50, 18, 18),
        diff_add_fg: Color::Rgb(63, 185, 80),
        diff_del_fg: Color::Rgb(248, 81, 73),
        diff_context_fg: Color::Rgb(230, 237, 243),
        diff_hunk_header_fg: Color::Rgb(188, 140, 255),
        line_number_fg: Color::Rgb(110, 118, 129),
        warning: Color::Rgb(210, 153, 34),
    }
}

fn dracula() -> Theme {
    Theme {
        name: "dracula".to_string(),
        accent: Color::Rgb(139, 233, 253),
        text: Color::Rgb(248, 248, 242),
        text_muted: Color::Rgb(98, 114, 164),
        surface: Color::Rgb(40, 42, 54),
        file_header_fg: Color::Rgb(189, 147, 249),
        diff_add_bg: Color::Rgb(15, 40, 15),
        diff_del_bg: Color::Rgb(45, 10, 10),
        diff_add_fg: Color::Rgb(80, 250, 123),
        diff_del_fg: Color::Rgb(255, 85, 85),
        diff_context_fg: Color::Rgb(248, 248, 242),
        diff_hunk_header_fg: Color::Rgb(255, 121, 198),
        line_number_fg: Color::Rgb(98, 114, 164),
        warning: Color::Rgb(241, 250, 140),
    }
}

fn solarized_dark() -> Theme {
    Theme {
        name: "solarized-dark".to_string(),
        accent: Color::Rgb(38, 139, 210),
        text: Color::Rgb(147, 161, 161),
        text_muted: Color::Rgb(88, 110, 117),
        surface: Color::Rgb(0, 34, 43),
        file_header_fg: Color::Rgb(38, 139, 210),
        diff_add_bg: Color::Rgb(0, 30, 10),
        diff_del_bg: Color::Rgb(40, 5, 5),
        diff_add_fg: Color::Rgb(133, 153, 0),
        diff_del_fg: Color::Rgb(220, 50, 47),
        diff_context_fg: Color::Rgb(147, 161, 161),
        diff_hunk_header_fg: Color::Rgb(211, 54, 130),
        line_number_fg: Color::Rgb(88, 110, 117),
        warning: Color::Rgb(181, 137, 0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#ff8000"), Some(Color::Rgb(255, 128, 0)));
        assert_eq!(parse_hex_color("00ff00"), Some(Color::Rgb(0, 255, 0)));
        assert_eq!(parse_hex_color("#fff"), None);
        assert_eq!(parse_hex_color("#gggggg"), None);
    }

    #[test]
    fn test_unknown_theme_falls_back() {
        assert_eq!(Theme::from_name("nope").name, "one-dark");
        for name in THEME_NAMES {
            assert_eq!(Theme::from_name(name).name, *name);
        }
    }

    #[test]
    fn test_apply_overrides_skips_invalid() {
        let mut theme = Theme::default();
        let before = theme.diff_del_bg;
        let overrides = ThemeOverrides {
            diff_add_bg: Some("#010203".to_string()),
            diff_del_bg: Some("not-a-color".to_string()),
            ..Default::default()
        };
        apply_overrides(&mut theme, &overrides);
        assert_eq!(theme.diff_add_bg, Color::Rgb(1, 2, 3));
        assert_eq!(theme.diff_del_bg, before);
    }
}
