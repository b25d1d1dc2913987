//! Mark application for text runs.

use jt_core::{Mark, SubSupKind};
use tracing::debug;

use crate::ansi::map_visible;
use crate::config::RenderContext;
use crate::style::{Styler, palette, parse_hex_color};

/// Fold `marks` over `text` in list order; later marks wrap earlier ones.
#[must_use]
pub fn apply_marks(text: &str, marks: &[Mark], ctx: &RenderContext<'_>) -> String {
    marks
        .iter()
        .fold(text.to_string(), |styled, mark| apply_mark(&styled, mark, ctx))
}

fn apply_mark(text: &str, mark: &Mark, ctx: &RenderContext<'_>) -> String {
    let styler = ctx.styler;
    match mark {
        Mark::Underline => styler.underline(text),
        Mark::Strong => styler.bold(text),
        Mark::Em => styler.italic(text),
        Mark::Strike => styler.strike(text),
        Mark::TextColor { attrs } => match parse_hex_color(&attrs.color) {
            Some(color) => styler.fg(color, text),
            None => {
                debug!(color = %attrs.color, "ignoring unparseable text color");
                text.to_string()
            }
        },
        Mark::BackgroundColor { attrs } => match parse_hex_color(&attrs.color) {
            Some(color) => styler.bg(color, text),
            None => {
                debug!(color = %attrs.color, "ignoring unparseable background color");
                text.to_string()
            }
        },
        Mark::Code => styler.bg(palette::CODE_BG, &styler.fg(palette::CODE_FG, text)),
        Mark::Link { attrs } => styler.hyperlink(&link_label(styler, text), &attrs.href),
        Mark::Subsup { attrs } => match attrs.kind {
            SubSupKind::Sup => map_visible(text, superscript),
            SubSupKind::Sub => map_visible(text, subscript),
        },
        Mark::Unknown => text.to_string(),
    }
}

/// Link-colored, underlined label.
pub(crate) fn link_label(styler: &dyn Styler, label: &str) -> String {
    styler.fg(palette::LINK, &styler.underline(label))
}

/// Superscript form of `ch`, or `ch` when none exists.
#[must_use]
pub fn superscript(ch: char) -> char {
    match ch {
        '0' => '⁰',
        '1' => '¹',
        '2' => '²',
        '3' => '³',
        '4' => '⁴',
        '5' => '⁵',
        '6' => '⁶',
        '7' => '⁷',
        '8' => '⁸',
        '9' => '⁹',
        '+' => '⁺',
        '-' => '⁻',
        '=' => '⁼',
        '(' => '⁽',
        ')' => '⁾',
        'i' => 'ⁱ',
        'n' => 'ⁿ',
        other => other,
    }
}

/// Subscript form of `ch`, or `ch` when none exists.
#[must_use]
pub fn subscript(ch: char) -> char {
    match ch {
        '0' => '₀',
        '1' => '₁',
        '2' => '₂',
        '3' => '₃',
        '4' => '₄',
        '5' => '₅',
        '6' => '₆',
        '7' => '₇',
        '8' => '₈',
        '9' => '₉',
        '+' => '₊',
        '-' => '₋',
        '=' => '₌',
        '(' => '₍',
        ')' => '₎',
        'a' => 'ₐ',
        'e' => 'ₑ',
        'o' => 'ₒ',
        'x' => 'ₓ',
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ansi::{strip_ansi, visible_width};
    use crate::config::RenderConfig;
    use crate::text::wrap;
    use jt_core::{ColorAttrs, LinkAttrs, SubSupAttrs};

    fn color(value: &str) -> ColorAttrs {
        ColorAttrs {
            color: value.to_string(),
        }
    }

    #[test]
    fn marks_nest_in_list_order() {
        let config = RenderConfig::default();
        let ctx = RenderContext::root(&config);
        let styled = apply_marks("x", &[Mark::Strong, Mark::Em], &ctx);
        assert_eq!(styled, "\x1b[3m\x1b[1mx\x1b[22m\x1b[23m");
    }

    #[test]
    fn invalid_colors_leave_text_unchanged() {
        let config = RenderConfig::default();
        let ctx = RenderContext::root(&config);
        let marks = [
            Mark::TextColor {
                attrs: color("red"),
            },
            Mark::BackgroundColor {
                attrs: color("#12"),
            },
        ];
        assert_eq!(apply_marks("x", &marks, &ctx), "x");
    }

    #[test]
    fn link_is_clickable_and_keeps_width() {
        let config = RenderConfig::default();
        let ctx = RenderContext::root(&config);
        let marks = [Mark::Link {
            attrs: LinkAttrs {
                href: "https://example.com".to_string(),
                ..LinkAttrs::default()
            },
        }];
        let styled = apply_marks("click", &marks, &ctx);
        assert!(styled.contains("\x1b]8;;https://example.com/\x1b\\"));
        assert_eq!(visible_width(&styled), 5);
        assert_eq!(strip_ansi(&styled), "click");
    }

    #[test]
    fn spaced_href_survives_wrapping() {
        let config = RenderConfig::default();
        let ctx = RenderContext::root(&config);
        let marks = [Mark::Link {
            attrs: LinkAttrs {
                href: "https://a.com/x y".to_string(),
                ..LinkAttrs::default()
            },
        }];
        let text = format!("see {}", apply_marks("click", &marks, &ctx));

        let fits = wrap(&text, 10);
        assert_eq!(fits.len(), 1);
        assert_eq!(strip_ansi(&fits[0]), "see click");
        assert!(fits[0].contains("\x1b]8;;https://a.com/x%20y\x1b\\"));

        let broken = wrap(&text, 4);
        let plain: Vec<String> = broken
            .iter()
            .map(|line| strip_ansi(line).into_owned())
            .collect();
        assert_eq!(plain, vec!["see", "click"]);
        assert!(broken[1].contains("https://a.com/x%20y"));
    }

    #[test]
    fn subsup_maps_visible_characters() {
        let config = RenderConfig::default();
        let ctx = RenderContext::root(&config);
        let sup = Mark::Subsup {
            attrs: SubSupAttrs {
                kind: SubSupKind::Sup,
            },
        };
        let sub = Mark::Subsup {
            attrs: SubSupAttrs {
                kind: SubSupKind::Sub,
            },
        };
        assert_eq!(apply_marks("x2", &[sup.clone()], &ctx), "x²");
        assert_eq!(apply_marks("H2O", &[sub], &ctx), "H₂O");
        let styled = apply_marks("12", &[Mark::Strong, sup], &ctx);
        assert_eq!(strip_ansi(&styled), "¹²");
    }

    #[test]
    fn plain_output_drops_styles() {
        let config = RenderConfig::plain();
        let ctx = RenderContext::root(&config);
        let marks = [Mark::Code, Mark::Strong, Mark::Unknown];
        assert_eq!(apply_marks("let x", &marks, &ctx), "let x");
    }
}
