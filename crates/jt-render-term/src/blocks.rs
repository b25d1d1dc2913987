//! Block dispatch and leaf block renderers.
//!
//! Body renderers return their lines without trailing blanks. Separation is
//! added here: every block except paragraphs is followed by exactly one blank
//! line. Tables and unknown blocks produce nothing.

use jt_core::{BlockChild, ChildBlockNode, CodeBlock, Heading, TopLevelNode};
use tracing::{debug, warn};

use crate::ansi::{sanitize_text, visible_width};
use crate::config::RenderContext;
use crate::container::{render_blockquote, render_expand, render_nested_expand, render_panel};
use crate::inline::render_inline;
use crate::list::{render_bullet_list, render_ordered_list};
use crate::marks::apply_marks;
use crate::style::palette;
use crate::text::{pad, pad_left, wrap};

/// Render a sequence of blocks with inter-block separation.
#[must_use]
pub fn render_blocks(nodes: &[TopLevelNode], ctx: &RenderContext<'_>) -> Vec<String> {
    nodes.iter().flat_map(|node| render_block(node, ctx)).collect()
}

/// Render one block followed by its separator line, if it takes one.
#[must_use]
pub fn render_block(node: &TopLevelNode, ctx: &RenderContext<'_>) -> Vec<String> {
    let mut lines = render_block_body(node, ctx);
    if takes_separator(node) && !lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

/// Render expand or table-cell content, where `nestedExpand` may appear.
#[must_use]
pub fn render_block_children(children: &[BlockChild], ctx: &RenderContext<'_>) -> Vec<String> {
    let mut lines = Vec::new();
    for child in children {
        match child {
            BlockChild::Block(node) => lines.extend(render_block(node, ctx)),
            BlockChild::NestedExpand(expand) => {
                let body = render_nested_expand(expand, ctx);
                if !body.is_empty() {
                    lines.extend(body);
                    lines.push(String::new());
                }
            }
        }
    }
    lines
}

const fn takes_separator(node: &TopLevelNode) -> bool {
    !matches!(
        node,
        TopLevelNode::Paragraph(_) | TopLevelNode::Table(_) | TopLevelNode::Unknown
    )
}

/// Render a block's own lines, without the trailing separator.
#[must_use]
pub fn render_block_body(node: &TopLevelNode, ctx: &RenderContext<'_>) -> Vec<String> {
    match node {
        TopLevelNode::Paragraph(paragraph) => wrap(&render_inline(&paragraph.content, ctx), ctx.width),
        TopLevelNode::Heading(heading) => render_heading(heading, ctx),
        TopLevelNode::Rule => vec![render_rule(ctx)],
        TopLevelNode::CodeBlock(block) => render_code_block(block, ctx),
        TopLevelNode::BulletList(list) => render_bullet_list(list, ctx),
        TopLevelNode::OrderedList(list) => render_ordered_list(list, ctx),
        TopLevelNode::Blockquote(quote) => render_blockquote(quote, ctx),
        TopLevelNode::Panel(panel) => render_panel(panel, ctx),
        TopLevelNode::Expand(expand) => render_expand(expand, ctx),
        TopLevelNode::MediaGroup(group) => render_media(&group.content, ctx),
        TopLevelNode::MediaSingle(single) => render_media(&single.content, ctx),
        TopLevelNode::Table(_) => {
            debug!("tables are not rendered");
            Vec::new()
        }
        TopLevelNode::Unknown => {
            debug!("skipping unknown block node");
            Vec::new()
        }
    }
}

/// Line shown in place of content cut off by the depth guard.
pub(crate) fn elided(ctx: &RenderContext<'_>) -> Vec<String> {
    warn!(
        depth = ctx.depth,
        max_depth = ctx.max_depth,
        "nesting too deep, eliding content"
    );
    vec![ctx.styler.dim(ctx.glyphs.ellipsis)]
}

fn render_heading(heading: &Heading, ctx: &RenderContext<'_>) -> Vec<String> {
    let level = usize::from(heading.attrs.level.clamp(1, 6));
    let text = format!("{} {}", "#".repeat(level), render_inline(&heading.content, ctx));
    wrap(&text, ctx.width)
}

fn render_rule(ctx: &RenderContext<'_>) -> String {
    let styler = ctx.styler;
    styler.dim(&styler.strike(&" ".repeat(ctx.width)))
}

/// Line-numbered, background-highlighted rows padded to the longest line.
fn render_code_block(block: &CodeBlock, ctx: &RenderContext<'_>) -> Vec<String> {
    let source = sanitize_text(&block.source()).into_owned();
    let mut rows: Vec<&str> = source.split('\n').collect();
    if rows.len() > 1 && rows.last().is_some_and(|row| row.is_empty()) {
        rows.pop();
    }
    let number_width = rows.len().to_string().len();
    let content_width = rows.iter().map(|row| visible_width(row)).max().unwrap_or(0);
    let styler = ctx.styler;
    rows.iter()
        .enumerate()
        .map(|(index, row)| {
            let number = styler.dim(&pad_left(&(index + 1).to_string(), number_width));
            let body = format!(" {number} {} ", pad(row, content_width));
            styler.bg(palette::CODE_BLOCK_BG, &body)
        })
        .collect()
}

/// One highlighted placeholder line per media item.
fn render_media(children: &[ChildBlockNode], ctx: &RenderContext<'_>) -> Vec<String> {
    let styler = ctx.styler;
    children
        .iter()
        .filter_map(|child| match child {
            ChildBlockNode::Media(media) => {
                let label = sanitize_text(media.label());
                let label = apply_marks(&format!(" {label} "), &media.marks, ctx);
                Some(styler.bg(palette::MEDIA_BG, &styler.fg(palette::MEDIA_FG, &label)))
            }
            other => {
                debug!(node = other.as_str(), "skipping non-media child of media block");
                None
            }
        })
        .collect()
}
