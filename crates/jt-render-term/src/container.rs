//! Container blocks: panels, blockquotes and expands.

use jt_core::{Blockquote, Expand, Panel};

use crate::ansi::{sanitize_text, visible_width};
use crate::blocks::{elided, render_block_children, render_blocks};
use crate::config::RenderContext;
use crate::style::panel_background;
use crate::text::{indent, pad, prefix_lines, trim_trailing_blank};

/// Columns a panel takes from its content: a two-column gutter each side.
pub const PANEL_WIDTH_REDUCTION: usize = 4;
const PANEL_GUTTER: &str = "  ";
/// Columns a blockquote takes from its content: the `> ` marker.
pub const BLOCKQUOTE_WIDTH_REDUCTION: usize = 2;
pub const EXPAND_WIDTH_REDUCTION: usize = 4;
pub const EXPAND_INDENT: usize = 2;
pub const NESTED_EXPAND_WIDTH_REDUCTION: usize = 3;
pub const NESTED_EXPAND_INDENT: usize = 3;
const DEFAULT_EXPAND_TITLE: &str = "Expand";

/// Icon header plus content, every row on the panel background and padded
/// to the full width.
#[must_use]
pub fn render_panel(panel: &Panel, ctx: &RenderContext<'_>) -> Vec<String> {
    let Some(inner) = ctx.child(PANEL_WIDTH_REDUCTION) else {
        return elided(ctx);
    };
    let styler = ctx.styler;
    let kind = panel.attrs.panel_type;
    let header = format!(
        "{} {}",
        ctx.glyphs.panel_icon(kind),
        styler.bold(kind.title())
    );
    let mut rows = vec![header];
    rows.extend(trim_trailing_blank(render_blocks(&panel.content, &inner)));
    let content_width = rows
        .iter()
        .map(|row| visible_width(row))
        .fold(inner.width, usize::max);
    let background = panel_background(kind);
    rows.iter()
        .map(|row| {
            let body = format!("{PANEL_GUTTER}{}{PANEL_GUTTER}", pad(row, content_width));
            styler.bg(background, &body)
        })
        .collect()
}

/// Content narrowed by two columns, each line behind a dim `>` marker.
#[must_use]
pub fn render_blockquote(quote: &Blockquote, ctx: &RenderContext<'_>) -> Vec<String> {
    let Some(inner) = ctx.child(BLOCKQUOTE_WIDTH_REDUCTION) else {
        return elided(ctx);
    };
    let marker = format!("{} ", ctx.styler.dim(&ctx.glyphs.quote.to_string()));
    let lines = trim_trailing_blank(render_blocks(&quote.content, &inner));
    prefix_lines(lines, &marker, &marker)
}

#[must_use]
pub fn render_expand(expand: &Expand, ctx: &RenderContext<'_>) -> Vec<String> {
    render_expandable(expand, ctx, EXPAND_WIDTH_REDUCTION, EXPAND_INDENT)
}

#[must_use]
pub fn render_nested_expand(expand: &Expand, ctx: &RenderContext<'_>) -> Vec<String> {
    render_expandable(
        expand,
        ctx,
        NESTED_EXPAND_WIDTH_REDUCTION,
        NESTED_EXPAND_INDENT,
    )
}

/// Chevron and bold title, then the indented content. Always shown expanded.
fn render_expandable(
    expand: &Expand,
    ctx: &RenderContext<'_>,
    width_reduction: usize,
    indent_columns: usize,
) -> Vec<String> {
    let Some(inner) = ctx.child(width_reduction) else {
        return elided(ctx);
    };
    let title = expand
        .attrs
        .title
        .as_deref()
        .map(str::trim)
        .filter(|title| !title.is_empty())
        .unwrap_or(DEFAULT_EXPAND_TITLE);
    let title = sanitize_text(title);
    let header = format!("{} {}", ctx.glyphs.chevron, ctx.styler.bold(&title));
    let mut lines = vec![header];
    let body = trim_trailing_blank(render_block_children(&expand.content, &inner));
    lines.extend(indent(body, indent_columns));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ansi::strip_ansi;
    use crate::blocks::render_block;
    use crate::config::RenderConfig;
    use jt_core::{TopLevelNode, parse_document};

    fn plain_lines(json: &str, config: &RenderConfig) -> Vec<String> {
        let document = parse_document(json).expect("document decodes");
        let ctx = RenderContext::root(config);
        render_blocks(&document.content, &ctx)
            .iter()
            .map(|line| strip_ansi(line).into_owned())
            .collect()
    }

    #[test]
    fn panel_rows_share_one_width() {
        let config = RenderConfig::new(40, 0, "");
        let lines = plain_lines(
            r#"[{"type":"panel","attrs":{"panelType":"warning"},"content":[
                {"type":"paragraph","content":[{"type":"text","text":"Careful now"}]}
            ]}]"#,
            &config,
        );
        let row = |text: &str| format!("  {text:<36}  ");
        assert_eq!(
            lines,
            vec![row("⚠ Warning"), row("Careful now"), String::new()]
        );
        assert!(lines[..2].iter().all(|line| visible_width(line) == 40));
    }

    #[test]
    fn panel_background_covers_every_row() {
        let config = RenderConfig::new(40, 0, "");
        let ctx = RenderContext::root(&config);
        let document = parse_document(
            r#"[{"type":"panel","attrs":{"panelType":"info"},"content":[
                {"type":"paragraph","content":[{"type":"text","text":"a"}]}
            ]}]"#,
        )
        .expect("decode");
        let lines = render_block(&document.content[0], &ctx);
        for row in &lines[..2] {
            assert!(row.starts_with("\x1b[48;2;28;43;65m"), "row {row:?}");
            assert!(row.ends_with("\x1b[49m"), "row {row:?}");
        }
    }

    #[test]
    fn panel_content_wraps_inside_gutters() {
        let config = RenderConfig::new(12, 0, "");
        let lines = plain_lines(
            r#"[{"type":"panel","attrs":{"panelType":"custom"},"content":[
                {"type":"paragraph","content":[{"type":"text","text":"aaaa bbbb cccc"}]}
            ]}]"#,
            &config,
        );
        assert_eq!(
            lines,
            vec![
                "  ◆ Custom  ",
                "  aaaa      ",
                "  bbbb      ",
                "  cccc      ",
                ""
            ]
        );
        assert!(lines.iter().all(|line| visible_width(line) <= 12));
    }

    #[test]
    fn blockquote_prefixes_each_line() {
        let config = RenderConfig::new(10, 0, "");
        let lines = plain_lines(
            r#"[{"type":"blockquote","content":[
                {"type":"paragraph","content":[{"type":"text","text":"one two three"}]},
                {"type":"rule"}
            ]}]"#,
            &config,
        );
        assert_eq!(lines, vec!["> one two", "> three", ">         ", ""]);
    }

    #[test]
    fn nested_blockquotes_stack_markers() {
        let config = RenderConfig::new(20, 0, "");
        let lines = plain_lines(
            r#"[{"type":"blockquote","content":[{"type":"blockquote","content":[
                {"type":"paragraph","content":[{"type":"text","text":"deep"}]}
            ]}]}]"#,
            &config,
        );
        assert_eq!(lines, vec!["> > deep", ""]);
    }

    #[test]
    fn expand_shows_title_and_indented_content() {
        let config = RenderConfig::new(40, 0, "");
        let lines = plain_lines(
            r#"[{"type":"expand","attrs":{"title":"Details"},"content":[
                {"type":"paragraph","content":[{"type":"text","text":"body"}]},
                {"type":"nestedExpand","attrs":{},"content":[
                    {"type":"paragraph","content":[{"type":"text","text":"inner"}]}
                ]}
            ]}]"#,
            &config,
        );
        assert_eq!(
            lines,
            vec!["▾ Details", "  body", "  ▾ Expand", "     inner", ""]
        );
    }

    #[test]
    fn ascii_glyphs_replace_unicode_markers() {
        let config = RenderConfig::plain();
        let lines = plain_lines(
            r#"[{"type":"expand","content":[]},
                {"type":"panel","attrs":{"panelType":"success"},"content":[]}]"#,
            &config,
        );
        let success = format!("  {:<115}  ", "+ Success");
        assert_eq!(
            lines,
            vec!["v Expand".to_string(), String::new(), success, String::new()]
        );
    }

    #[test]
    fn depth_guard_elides_deep_containers() {
        let config = RenderConfig {
            max_depth: 2,
            ..RenderConfig::new(40, 0, "")
        };
        let mut json = String::from(r#"{"type":"paragraph","content":[{"type":"text","text":"x"}]}"#);
        for _ in 0..5 {
            json = format!(r#"{{"type":"blockquote","content":[{json}]}}"#);
        }
        let lines = plain_lines(&format!("[{json}]"), &config);
        assert_eq!(lines, vec!["> > …", ""]);
    }

    #[test]
    fn empty_blockquote_renders_nothing() {
        let config = RenderConfig::new(40, 0, "");
        let ctx = RenderContext::root(&config);
        let quote = TopLevelNode::Blockquote(Blockquote::default());
        assert!(render_block(&quote, &ctx).is_empty());
    }
}
