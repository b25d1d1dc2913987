//! Bullet and ordered list rendering.
//!
//! Nesting level lives only in the recursion: each nested list adds one dim
//! depth marker in front of its item markers and keeps the full width, so
//! the content column shrinks as the prefix grows.

use jt_core::{BulletList, ChildBlockNode, ListItem, OrderedList, TopLevelNode};
use tracing::debug;

use crate::ansi::visible_width;
use crate::blocks::{elided, render_block_body};
use crate::config::RenderContext;
use crate::inline::render_inline;
use crate::text::{is_blank, trim_trailing_blank, wrap};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListKind {
    Bullet,
    Ordered { start: u32 },
}

#[must_use]
pub fn render_bullet_list(list: &BulletList, ctx: &RenderContext<'_>) -> Vec<String> {
    render_list(&list.content, ListKind::Bullet, 0, ctx)
}

#[must_use]
pub fn render_ordered_list(list: &OrderedList, ctx: &RenderContext<'_>) -> Vec<String> {
    let kind = ListKind::Ordered {
        start: list.start(),
    };
    render_list(&list.content, kind, 0, ctx)
}

fn render_list(
    items: &[ChildBlockNode],
    kind: ListKind,
    level: usize,
    ctx: &RenderContext<'_>,
) -> Vec<String> {
    let Some(inner) = ctx.nested() else {
        return elided(ctx);
    };
    let mut lines = Vec::new();
    let mut ordinal: u64 = 0;
    for child in items {
        let ChildBlockNode::ListItem(item) = child else {
            debug!(node = child.as_str(), "skipping non-item child of list");
            continue;
        };
        let prefix = item_prefix(kind, ordinal, level, &inner);
        ordinal += 1;
        lines.extend(render_item(item, &prefix, level, &inner));
    }
    lines
}

/// Dim depth markers, then the bullet or number.
fn item_prefix(kind: ListKind, ordinal: u64, level: usize, ctx: &RenderContext<'_>) -> String {
    let mut prefix = String::new();
    if level > 0 {
        let markers: String = std::iter::repeat_n(ctx.glyphs.depth_marker, level).collect();
        prefix.push_str(&ctx.styler.dim(&markers));
    }
    match kind {
        ListKind::Bullet => {
            prefix.push(ctx.glyphs.bullet);
            prefix.push(' ');
        }
        ListKind::Ordered { start } => {
            prefix.push_str(&format!("{}. ", u64::from(start) + ordinal));
        }
    }
    prefix
}

fn render_item(
    item: &ListItem,
    prefix: &str,
    level: usize,
    ctx: &RenderContext<'_>,
) -> Vec<String> {
    let continuation = " ".repeat(visible_width(prefix));
    let body_ctx = ctx.narrowed(visible_width(prefix));
    let mut lines: Vec<String> = Vec::new();
    let mut prefix_used = false;
    for block in &item.content {
        let nested = match block {
            TopLevelNode::BulletList(list) => Some((&list.content, ListKind::Bullet)),
            TopLevelNode::OrderedList(list) => Some((
                &list.content,
                ListKind::Ordered {
                    start: list.start(),
                },
            )),
            _ => None,
        };
        if let Some((items, kind)) = nested {
            if !prefix_used {
                lines.push(prefix.to_string());
                prefix_used = true;
            }
            lines.extend(render_list(items, kind, level + 1, ctx));
            continue;
        }

        let body = match block {
            TopLevelNode::Paragraph(paragraph) => {
                wrap(&render_inline(&paragraph.content, &body_ctx), body_ctx.width)
            }
            other => trim_trailing_blank(render_block_body(other, &body_ctx)),
        };
        for line in body {
            let lead = if prefix_used { continuation.as_str() } else { prefix };
            prefix_used = true;
            if is_blank(&line) && lead.trim().is_empty() {
                lines.push(String::new());
            } else {
                lines.push(format!("{lead}{line}"));
            }
        }
    }
    if !prefix_used {
        lines.push(prefix.to_string());
    }
    lines
}
