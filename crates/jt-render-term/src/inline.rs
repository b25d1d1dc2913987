//! Inline node rendering.
//!
//! Inline content renders to one string; `hardBreak` becomes `\n`, which the
//! block renderers treat as a forced line break when wrapping.

use jt_core::{InlineCardAttrs, InlineNode, MentionAttrs, StatusAttrs, Timestamp};
use time::OffsetDateTime;
use time::macros::format_description;
use tracing::debug;
use url::Url;

use crate::ansi::sanitize_text;
use crate::config::RenderContext;
use crate::marks::{apply_marks, link_label};
use crate::style::{palette, status_colors};
use crate::text::normalize_quotes;

/// Render a run of inline nodes to a single styled string.
#[must_use]
pub fn render_inline(nodes: &[InlineNode], ctx: &RenderContext<'_>) -> String {
    nodes.iter().map(|node| render_inline_node(node, ctx)).collect()
}

fn render_inline_node(node: &InlineNode, ctx: &RenderContext<'_>) -> String {
    match node {
        InlineNode::Text { text, marks } => {
            let clean = document_text(text, ctx);
            apply_marks(&clean, marks, ctx)
        }
        InlineNode::HardBreak => "\n".to_string(),
        InlineNode::Emoji { attrs } => {
            let glyph = [attrs.text.as_deref(), attrs.short_name.as_deref()]
                .into_iter()
                .flatten()
                .find(|candidate| !candidate.is_empty())
                .unwrap_or_default();
            document_text(glyph, ctx)
        }
        InlineNode::Mention { attrs } => render_mention(attrs, ctx),
        InlineNode::Status { attrs } => render_status(attrs, ctx),
        InlineNode::Date { attrs } => {
            let label = format_timestamp(&attrs.timestamp);
            ctx.styler.fg(palette::DATE, &label)
        }
        InlineNode::InlineCard { attrs } => render_inline_card(attrs, ctx),
        InlineNode::Unknown => {
            debug!("skipping unknown inline node");
            String::new()
        }
    }
}

/// Sanitized, optionally quote-normalized document text.
fn document_text(text: &str, ctx: &RenderContext<'_>) -> String {
    let clean = sanitize_text(text);
    if ctx.normalize_quotes {
        normalize_quotes(&clean).into_owned()
    } else {
        clean.into_owned()
    }
}

fn render_mention(attrs: &MentionAttrs, ctx: &RenderContext<'_>) -> String {
    let label = match attrs.text.as_deref() {
        Some(text) if !text.is_empty() => document_text(text, ctx),
        _ => format!("@{}", document_text(&attrs.id, ctx)),
    };
    ctx.styler.fg(palette::MENTION, &label)
}

fn render_status(attrs: &StatusAttrs, ctx: &RenderContext<'_>) -> String {
    let (fg, bg) = status_colors(attrs.color);
    let badge = format!(" {} ", document_text(&attrs.text, ctx));
    ctx.styler.bg(bg, &ctx.styler.fg(fg, &badge))
}

/// `Nov 14, 2023` for a valid millisecond timestamp, the raw value otherwise.
#[must_use]
pub fn format_timestamp(timestamp: &Timestamp) -> String {
    let format = format_description!("[month repr:short] [day padding:none], [year]");
    timestamp
        .millis()
        .and_then(|millis| {
            OffsetDateTime::from_unix_timestamp_nanos(i128::from(millis) * 1_000_000).ok()
        })
        .and_then(|moment| moment.format(format).ok())
        .unwrap_or_else(|| {
            debug!(%timestamp, "date timestamp is not a valid instant");
            sanitize_text(&timestamp.to_string()).into_owned()
        })
}

fn render_inline_card(attrs: &InlineCardAttrs, ctx: &RenderContext<'_>) -> String {
    let Some(raw) = attrs.url.as_deref() else {
        debug!("inline card without url");
        return String::new();
    };
    match smart_link_label(raw, ctx.own_host) {
        Some(label) => {
            let label = document_text(&label, ctx);
            ctx.styler.hyperlink(&link_label(ctx.styler, &label), raw)
        }
        None => {
            debug!(url = raw, "inline card url does not parse");
            document_text(raw, ctx)
        }
    }
}

/// Display label of a smart link.
///
/// Links into the user's own site show their last non-empty path segment
/// (an issue key, usually); other links show their host without `www.`.
/// Returns `None` when the url does not parse or has no host.
#[must_use]
pub fn smart_link_label(raw: &str, own_host: Option<&str>) -> Option<String> {
    let url = Url::parse(raw.trim()).ok()?;
    let host = url.host_str()?;
    if own_host.is_some_and(|own| own.eq_ignore_ascii_case(host))
        && let Some(segment) = url
            .path_segments()
            .and_then(|mut segments| segments.rfind(|segment| !segment.is_empty()))
    {
        return Some(segment.to_string());
    }
    Some(host.strip_prefix("www.").unwrap_or(host).to_string())
}
