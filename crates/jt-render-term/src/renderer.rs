//! Top-level document renderer.

use jt_core::TopLevelNode;
use tracing::debug;

use crate::ansi::visible_width;
use crate::blocks::render_blocks;
use crate::config::{RenderConfig, RenderContext};
use crate::text::pad;

/// Result of rendering a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderResult {
    /// Rows, each padded to `width` columns.
    pub lines: Vec<String>,
    /// Rows produced by the document before blank-line filling.
    pub content_lines: usize,
    /// Padded width in columns.
    pub width: usize,
    /// Rows wider than `width`: tokens and code lines that do not fit.
    pub overflow_lines: usize,
}

/// Document renderer bound to one configuration.
#[derive(Debug, Clone)]
pub struct AdfRenderer {
    config: RenderConfig,
}

impl AdfRenderer {
    #[must_use]
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Render `document` to fixed-width rows, at least `minimum_lines` of them.
    #[must_use]
    pub fn render(&self, document: &[TopLevelNode]) -> RenderResult {
        let ctx = RenderContext::root(&self.config);
        let width = ctx.width;
        let content = render_blocks(document, &ctx);
        let content_lines = content.len();

        let mut overflow_lines = 0;
        let mut lines: Vec<String> = content
            .iter()
            .map(|line| {
                if visible_width(line) > width {
                    overflow_lines += 1;
                }
                pad(line, width)
            })
            .collect();
        if lines.len() < self.config.minimum_lines {
            let blank = " ".repeat(width);
            lines.resize(self.config.minimum_lines, blank);
        }

        debug!(
            blocks = document.len(),
            content_lines,
            total_lines = lines.len(),
            overflow_lines,
            width,
            "rendered document"
        );
        RenderResult {
            lines,
            content_lines,
            width,
            overflow_lines,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ansi::strip_ansi;
    use jt_core::parse_document;
    use proptest::prelude::*;

    fn scenario_a() -> Vec<TopLevelNode> {
        parse_document(
            r#"[{"type":"heading","attrs":{"level":2},"content":[{"type":"text","text":"Title"}]},
                {"type":"paragraph","content":[{"type":"text","text":"A "},
                  {"type":"text","text":"bold","marks":[{"type":"strong"}]}]}]"#,
        )
        .expect("decode")
        .content
    }

    #[test]
    fn heading_then_paragraph_fills_five_rows() {
        let renderer = AdfRenderer::new(RenderConfig::new(20, 5, ""));
        let result = renderer.render(&scenario_a());
        assert_eq!(result.lines.len(), 5);
        assert_eq!(result.content_lines, 3);
        assert!(result.lines.iter().all(|line| visible_width(line) == 20));
        assert_eq!(strip_ansi(&result.lines[0]), format!("{:<20}", "## Title"));
        assert_eq!(result.lines[1], " ".repeat(20));
        assert!(result.lines[2].contains("\x1b[1mbold\x1b[22m"));
        assert_eq!(strip_ansi(&result.lines[2]), format!("{:<20}", "A bold"));
        assert_eq!(result.lines[3], " ".repeat(20));
        assert_eq!(result.lines[4], " ".repeat(20));
    }

    #[test]
    fn empty_document_is_all_blank_rows() {
        let renderer = AdfRenderer::new(RenderConfig::new(4, 3, ""));
        let result = renderer.render(&[]);
        assert_eq!(result.lines, vec!["    "; 3]);
        assert_eq!(result.content_lines, 0);
    }

    #[test]
    fn overflowing_rows_are_counted_not_truncated() {
        let document = parse_document(
            r#"[{"type":"paragraph","content":[{"type":"text","text":"abcdefghij"}]}]"#,
        )
        .expect("decode");
        let result = AdfRenderer::new(RenderConfig::new(4, 0, "")).render(&document.content);
        assert_eq!(result.lines, vec!["abcdefghij"]);
        assert_eq!(result.overflow_lines, 1);
    }

    fn arb_paragraphs() -> impl Strategy<Value = Vec<TopLevelNode>> {
        proptest::collection::vec(
            proptest::collection::vec("[a-z]{1,6}", 0..12)
                .prop_map(|words| TopLevelNode::text_paragraph(words.join(" "))),
            0..6,
        )
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_rows_are_exactly_line_width(document in arb_paragraphs(), width in 6usize..80, min in 0usize..40) {
            let result = AdfRenderer::new(RenderConfig::new(width, min, "")).render(&document);
            for line in &result.lines {
                prop_assert_eq!(visible_width(line), width);
            }
            prop_assert!(result.lines.len() >= min);
        }

        #[test]
        fn prop_rendering_is_idempotent(document in arb_paragraphs(), width in 1usize..80) {
            let renderer = AdfRenderer::new(RenderConfig::new(width, 10, "example.com"));
            prop_assert_eq!(renderer.render(&document), renderer.render(&document));
        }
    }
}
