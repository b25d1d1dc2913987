//! Terminal styling primitives.
//!
//! Every renderer goes through a [`Styler`] so that colored and plain output
//! share one code path. [`AnsiStyler`] emits SGR sequences through crossterm
//! and OSC 8 hyperlinks; [`PlainStyler`] returns text untouched.

use crossterm::style::{Attribute, Color, SetAttribute, SetBackgroundColor, SetForegroundColor};
use jt_core::{PanelType, StatusColor};
use url::Url;

/// Text styling operations used by the renderers.
pub trait Styler {
    fn bold(&self, text: &str) -> String;
    fn dim(&self, text: &str) -> String;
    fn italic(&self, text: &str) -> String;
    fn underline(&self, text: &str) -> String;
    fn strike(&self, text: &str) -> String;
    fn fg(&self, color: Color, text: &str) -> String;
    fn bg(&self, color: Color, text: &str) -> String;
    /// Make `label` a clickable link to `url`.
    fn hyperlink(&self, label: &str, url: &str) -> String;
}

/// ANSI escape output.
///
/// Each style closes with its own reset code (22, 23, 24, 29, 39, 49) rather
/// than a full reset, and re-opens itself after any nested close or full
/// reset inside `text`, so an outer style survives inner ones.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnsiStyler;

/// Unstyled output. Hyperlinks degrade to their label.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainStyler;

pub(crate) static ANSI: AnsiStyler = AnsiStyler;
pub(crate) static PLAIN: PlainStyler = PlainStyler;

/// Styler for the given color setting.
#[must_use]
pub fn styler_for(color: bool) -> &'static dyn Styler {
    if color { &ANSI } else { &PLAIN }
}

const FULL_RESETS: [&str; 2] = ["\x1b[0m", "\x1b[m"];

fn enclose(text: &str, open: &str, close: &str) -> String {
    let mut body = text.replace(close, &format!("{close}{open}"));
    for reset in FULL_RESETS {
        if reset != close && body.contains(reset) {
            body = body.replace(reset, &format!("{reset}{open}"));
        }
    }
    format!("{open}{body}{close}")
}

fn attribute(text: &str, on: Attribute, off: Attribute) -> String {
    enclose(
        text,
        &SetAttribute(on).to_string(),
        &SetAttribute(off).to_string(),
    )
}

/// OSC 8 target for `url`: controls dropped, then percent-encoded so the
/// sequence holds no spaces or other bytes a line wrapper would split on.
fn link_target(url: &str) -> String {
    let cleaned: String = url.chars().filter(|ch| !ch.is_control()).collect();
    match Url::parse(cleaned.trim()) {
        Ok(parsed) => parsed.into(),
        Err(_) => percent_encode(&cleaned),
    }
}

/// Percent-encode everything outside printable ASCII, and spaces.
fn percent_encode(raw: &str) -> String {
    let mut encoded = String::with_capacity(raw.len());
    for byte in raw.bytes() {
        if byte.is_ascii_graphic() {
            encoded.push(char::from(byte));
        } else {
            encoded.push_str(&format!("%{byte:02X}"));
        }
    }
    encoded
}

impl Styler for AnsiStyler {
    fn bold(&self, text: &str) -> String {
        attribute(text, Attribute::Bold, Attribute::NormalIntensity)
    }

    fn dim(&self, text: &str) -> String {
        attribute(text, Attribute::Dim, Attribute::NormalIntensity)
    }

    fn italic(&self, text: &str) -> String {
        attribute(text, Attribute::Italic, Attribute::NoItalic)
    }

    fn underline(&self, text: &str) -> String {
        attribute(text, Attribute::Underlined, Attribute::NoUnderline)
    }

    fn strike(&self, text: &str) -> String {
        attribute(text, Attribute::CrossedOut, Attribute::NotCrossedOut)
    }

    fn fg(&self, color: Color, text: &str) -> String {
        enclose(
            text,
            &SetForegroundColor(color).to_string(),
            &SetForegroundColor(Color::Reset).to_string(),
        )
    }

    fn bg(&self, color: Color, text: &str) -> String {
        enclose(
            text,
            &SetBackgroundColor(color).to_string(),
            &SetBackgroundColor(Color::Reset).to_string(),
        )
    }

    fn hyperlink(&self, label: &str, url: &str) -> String {
        format!("\x1b]8;;{}\x1b\\{label}\x1b]8;;\x1b\\", link_target(url))
    }
}

impl Styler for PlainStyler {
    fn bold(&self, text: &str) -> String {
        text.to_string()
    }

    fn dim(&self, text: &str) -> String {
        text.to_string()
    }

    fn italic(&self, text: &str) -> String {
        text.to_string()
    }

    fn underline(&self, text: &str) -> String {
        text.to_string()
    }

    fn strike(&self, text: &str) -> String {
        text.to_string()
    }

    fn fg(&self, _color: Color, text: &str) -> String {
        text.to_string()
    }

    fn bg(&self, _color: Color, text: &str) -> String {
        text.to_string()
    }

    fn hyperlink(&self, label: &str, _url: &str) -> String {
        label.to_string()
    }
}

/// Parse `#rrggbb` or `#rgb` into a truecolor value.
#[must_use]
pub fn parse_hex_color(input: &str) -> Option<Color> {
    let hex = input.trim().strip_prefix('#')?;
    if !hex.chars().all(|ch| ch.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |digits: &str| u8::from_str_radix(digits, 16).ok();
    match hex.len() {
        6 => Some(Color::Rgb {
            r: channel(&hex[0..2])?,
            g: channel(&hex[2..4])?,
            b: channel(&hex[4..6])?,
        }),
        3 => {
            let expand = |index: usize| channel(&hex[index..=index]).map(|value| value * 17);
            Some(Color::Rgb {
                r: expand(0)?,
                g: expand(1)?,
                b: expand(2)?,
            })
        }
        _ => None,
    }
}

/// Fixed colors of the renderer.
pub mod palette {
    use crossterm::style::Color;

    pub const CODE_FG: Color = Color::Rgb {
        r: 0xFF,
        g: 0xA5,
        b: 0x00,
    };
    pub const CODE_BG: Color = Color::DarkGrey;
    pub const CODE_BLOCK_BG: Color = Color::Rgb {
        r: 0x26,
        g: 0x28,
        b: 0x2E,
    };
    pub const LINK: Color = Color::Blue;
    pub const MENTION: Color = Color::Rgb {
        r: 0x4C,
        g: 0x9A,
        b: 0xFF,
    };
    pub const MEDIA_FG: Color = Color::White;
    pub const MEDIA_BG: Color = Color::Rgb {
        r: 0x3B,
        g: 0x41,
        b: 0x4B,
    };
    pub const DATE: Color = Color::Cyan;
}

/// Foreground and background of a status lozenge.
#[must_use]
pub const fn status_colors(color: StatusColor) -> (Color, Color) {
    match color {
        StatusColor::Neutral => (Color::White, Color::DarkGrey),
        StatusColor::Purple => (
            Color::White,
            Color::Rgb {
                r: 0x64,
                g: 0x54,
                b: 0xC0,
            },
        ),
        StatusColor::Blue => (
            Color::White,
            Color::Rgb {
                r: 0x00,
                g: 0x52,
                b: 0xCC,
            },
        ),
        StatusColor::Red => (
            Color::White,
            Color::Rgb {
                r: 0xDE,
                g: 0x35,
                b: 0x0B,
            },
        ),
        StatusColor::Yellow => (
            Color::Black,
            Color::Rgb {
                r: 0xFF,
                g: 0x99,
                b: 0x1F,
            },
        ),
        StatusColor::Green => (
            Color::White,
            Color::Rgb {
                r: 0x00,
                g: 0x87,
                b: 0x5A,
            },
        ),
    }
}

/// Row background of a panel.
#[must_use]
pub const fn panel_background(panel: PanelType) -> Color {
    match panel {
        PanelType::Info => Color::Rgb {
            r: 0x1C,
            g: 0x2B,
            b: 0x41,
        },
        PanelType::Note => Color::Rgb {
            r: 0x2B,
            g: 0x27,
            b: 0x3F,
        },
        PanelType::Warning => Color::Rgb {
            r: 0x53,
            g: 0x3F,
            b: 0x04,
        },
        PanelType::Success => Color::Rgb {
            r: 0x1C,
            g: 0x3B,
            b: 0x2C,
        },
        PanelType::Error => Color::Rgb {
            r: 0x5D,
            g: 0x1F,
            b: 0x1A,
        },
        PanelType::Custom => Color::Rgb {
            r: 0x2C,
            g: 0x33,
            b: 0x3A,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ansi::{strip_ansi, visible_width};

    #[test]
    fn ansi_styles_use_targeted_closes() {
        assert_eq!(ANSI.bold("x"), "\x1b[1mx\x1b[22m");
        assert_eq!(ANSI.italic("x"), "\x1b[3mx\x1b[23m");
        assert_eq!(ANSI.underline("x"), "\x1b[4mx\x1b[24m");
        assert_eq!(ANSI.strike("x"), "\x1b[9mx\x1b[29m");
        assert_eq!(ANSI.fg(Color::Blue, "x"), "\x1b[38;5;12mx\x1b[39m");
    }

    #[test]
    fn outer_style_reopens_after_nested_close() {
        let inner = ANSI.dim("a");
        let outer = ANSI.bold(&format!("{inner}b"));
        assert_eq!(outer, "\x1b[1m\x1b[2ma\x1b[22m\x1b[1mb\x1b[22m");
    }

    #[test]
    fn background_reopens_after_full_reset() {
        let styled = ANSI.bg(Color::DarkGrey, "a\x1b[0mb");
        let open = SetBackgroundColor(Color::DarkGrey).to_string();
        assert_eq!(styled, format!("{open}a\x1b[0m{open}b\x1b[49m"));
    }

    #[test]
    fn hyperlink_wraps_label_in_osc8() {
        let link = ANSI.hyperlink("site", "https://example.com/\x07x");
        assert_eq!(
            link,
            "\x1b]8;;https://example.com/x\x1b\\site\x1b]8;;\x1b\\"
        );
        assert_eq!(visible_width(&link), 4);
        assert_eq!(strip_ansi(&link), "site");
    }

    #[test]
    fn link_targets_are_percent_encoded() {
        assert_eq!(
            link_target("https://a.com/x y?q=a b"),
            "https://a.com/x%20y?q=a%20b"
        );
        assert_eq!(link_target("https://a.com/%20done"), "https://a.com/%20done");
        assert_eq!(link_target("docs/read me.md"), "docs/read%20me.md");
        assert_eq!(link_target("/caf\u{e9}"), "/caf%C3%A9");
    }

    #[test]
    fn plain_styler_is_identity() {
        assert_eq!(PLAIN.bold("x"), "x");
        assert_eq!(PLAIN.bg(Color::Red, "x"), "x");
        assert_eq!(PLAIN.hyperlink("label", "https://a.b"), "label");
    }

    #[test]
    fn parses_hex_colors() {
        assert_eq!(
            parse_hex_color("#ff5630"),
            Some(Color::Rgb {
                r: 0xFF,
                g: 0x56,
                b: 0x30
            })
        );
        assert_eq!(
            parse_hex_color("#0af"),
            Some(Color::Rgb {
                r: 0x00,
                g: 0xAA,
                b: 0xFF
            })
        );
        assert_eq!(parse_hex_color("ff5630"), None);
        assert_eq!(parse_hex_color("#ff56"), None);
        assert_eq!(parse_hex_color("#gggggg"), None);
        assert_eq!(parse_hex_color("#é12"), None);
    }
}
