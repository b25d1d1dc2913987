//! Structural checks that never reject a document.
//!
//! Decoding is lenient: unknown node types, out-of-range heading levels and
//! broken link targets all survive into the tree and degrade at render time.
//! `validate` reports those spots so tooling can surface them.

use url::Url;

use crate::marks::Mark;
use crate::nodes::{BlockChild, ChildBlockNode, Expand, InlineNode, TopLevelNode};
use crate::{Document, DocumentWarning, WarningCode};

/// Container depth beyond which a warning is raised.
pub const DEEP_NESTING_THRESHOLD: usize = 32;

/// Walk the document and collect non-fatal warnings in document order.
#[must_use]
pub fn validate(document: &Document) -> Vec<DocumentWarning> {
    let mut walker = Walker::default();
    for (index, node) in document.content.iter().enumerate() {
        walker.block(node, &format!("content[{index}]"), 0);
    }
    walker.warnings
}

#[derive(Default)]
struct Walker {
    warnings: Vec<DocumentWarning>,
    deep_reported: bool,
}

impl Walker {
    fn warn(&mut self, code: WarningCode, path: &str, message: String) {
        self.warnings.push(DocumentWarning {
            code,
            message,
            path: path.to_string(),
        });
    }

    fn enter(&mut self, path: &str, depth: usize) -> bool {
        if depth > DEEP_NESTING_THRESHOLD {
            if !self.deep_reported {
                self.deep_reported = true;
                self.warn(
                    WarningCode::DeepNesting,
                    path,
                    format!("nesting depth exceeds {DEEP_NESTING_THRESHOLD}"),
                );
            }
            return false;
        }
        true
    }

    fn block(&mut self, node: &TopLevelNode, path: &str, depth: usize) {
        match node {
            TopLevelNode::Blockquote(quote) => {
                self.blocks(&quote.content, path, depth + 1);
            }
            TopLevelNode::BulletList(list) => {
                self.children(&list.content, path, depth + 1);
            }
            TopLevelNode::OrderedList(list) => {
                self.children(&list.content, path, depth + 1);
            }
            TopLevelNode::CodeBlock(block) => {
                self.inlines(&block.content, path);
            }
            TopLevelNode::Expand(expand) => {
                self.expand(expand, path, depth + 1);
            }
            TopLevelNode::Heading(heading) => {
                if !(1..=6).contains(&heading.attrs.level) {
                    self.warn(
                        WarningCode::HeadingLevel,
                        path,
                        format!("heading level {} is outside 1..=6", heading.attrs.level),
                    );
                }
                self.inlines(&heading.content, path);
            }
            TopLevelNode::MediaGroup(group) => {
                self.children(&group.content, path, depth);
            }
            TopLevelNode::MediaSingle(single) => {
                self.children(&single.content, path, depth);
            }
            TopLevelNode::Panel(panel) => {
                self.blocks(&panel.content, path, depth + 1);
            }
            TopLevelNode::Paragraph(paragraph) => {
                self.inlines(&paragraph.content, path);
            }
            TopLevelNode::Rule => {}
            TopLevelNode::Table(_) => {
                self.warn(
                    WarningCode::UnsupportedTable,
                    path,
                    "tables are not rendered".to_string(),
                );
            }
            TopLevelNode::Unknown => {
                self.warn(
                    WarningCode::UnknownNode,
                    path,
                    "unknown block node type".to_string(),
                );
            }
        }
    }

    fn blocks(&mut self, nodes: &[TopLevelNode], path: &str, depth: usize) {
        if !self.enter(path, depth) {
            return;
        }
        for (index, node) in nodes.iter().enumerate() {
            self.block(node, &format!("{path}.content[{index}]"), depth);
        }
    }

    fn expand(&mut self, expand: &Expand, path: &str, depth: usize) {
        if !self.enter(path, depth) {
            return;
        }
        for (index, child) in expand.content.iter().enumerate() {
            let child_path = format!("{path}.content[{index}]");
            match child {
                BlockChild::Block(node) => self.block(node, &child_path, depth),
                BlockChild::NestedExpand(nested) => self.expand(nested, &child_path, depth + 1),
            }
        }
    }

    fn children(&mut self, nodes: &[ChildBlockNode], path: &str, depth: usize) {
        if !self.enter(path, depth) {
            return;
        }
        for (index, child) in nodes.iter().enumerate() {
            let child_path = format!("{path}.content[{index}]");
            match child {
                ChildBlockNode::ListItem(item) => self.blocks(&item.content, &child_path, depth),
                ChildBlockNode::Media(media) => self.marks(&media.marks, &child_path),
                ChildBlockNode::NestedExpand(nested) => {
                    self.expand(nested, &child_path, depth + 1);
                }
                ChildBlockNode::TableCell(_)
                | ChildBlockNode::TableHeader(_)
                | ChildBlockNode::TableRow(_) => {
                    self.warn(
                        WarningCode::UnsupportedTable,
                        &child_path,
                        format!("{} outside a rendered table", child.as_str()),
                    );
                }
                ChildBlockNode::Unknown => {
                    self.warn(
                        WarningCode::UnknownNode,
                        &child_path,
                        "unknown child node type".to_string(),
                    );
                }
            }
        }
    }

    fn inlines(&mut self, nodes: &[InlineNode], path: &str) {
        for (index, node) in nodes.iter().enumerate() {
            let node_path = format!("{path}.content[{index}]");
            match node {
                InlineNode::Text { marks, .. } => self.marks(marks, &node_path),
                InlineNode::InlineCard { attrs } => {
                    if let Some(url) = &attrs.url
                        && Url::parse(url).is_err()
                    {
                        self.warn(
                            WarningCode::MalformedUrl,
                            &node_path,
                            format!("smart link url '{url}' does not parse"),
                        );
                    }
                }
                InlineNode::Unknown => {
                    self.warn(
                        WarningCode::UnknownNode,
                        &node_path,
                        "unknown inline node type".to_string(),
                    );
                }
                _ => {}
            }
        }
    }

    fn marks(&mut self, marks: &[Mark], path: &str) {
        for mark in marks {
            if let Mark::Link { attrs } = mark
                && Url::parse(&attrs.href).is_err()
            {
                self.warn(
                    WarningCode::MalformedUrl,
                    path,
                    format!("link href '{}' does not parse", attrs.href),
                );
            }
        }
    }
}
