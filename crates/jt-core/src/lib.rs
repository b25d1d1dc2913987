#![forbid(unsafe_code)]

mod marks;
mod nodes;
mod validate;

pub use marks::{ColorAttrs, LinkAttrs, Mark, SubSupAttrs, SubSupKind};
pub use nodes::{
    BlockChild, Blockquote, BulletList, ChildBlockNode, CodeBlock, CodeBlockAttrs, DateAttrs,
    EmojiAttrs, Expand, ExpandAttrs, Heading, HeadingAttrs, InlineCardAttrs, InlineNode, ListItem,
    Media, MediaAttrs, MediaGroup, MediaSingle, MediaSingleAttrs, MentionAttrs, OrderedList,
    OrderedListAttrs, Panel, PanelAttrs, PanelType, Paragraph, StatusAttrs, StatusColor, Table,
    TableCell, TableRow, Timestamp, TopLevelNode,
};
pub use validate::{DEEP_NESTING_THRESHOLD, validate};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Text of the document shown when an issue has no usable description.
pub const FALLBACK_TEXT: &str = "No description.";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum AdfErrorCode {
    #[default]
    Json,
    NotADocument,
}

impl AdfErrorCode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Json => "adf/error/json",
            Self::NotADocument => "adf/error/not-a-document",
        }
    }
}

/// Fatal input errors: the payload is not a document tree at all.
#[derive(Debug, Clone, Serialize, Deserialize, Error, PartialEq, Eq)]
pub enum AdfError {
    #[error("invalid document JSON at {line}:{column}: {message}")]
    Json {
        message: String,
        line: usize,
        column: usize,
    },
    #[error("expected a `doc` object or an array of nodes, found {found}")]
    NotADocument { found: String },
}

impl AdfError {
    #[must_use]
    pub fn code(&self) -> AdfErrorCode {
        match self {
            Self::Json { .. } => AdfErrorCode::Json,
            Self::NotADocument { .. } => AdfErrorCode::NotADocument,
        }
    }
}

impl From<serde_json::Error> for AdfError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json {
            message: err.to_string(),
            line: err.line(),
            column: err.column(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum WarningCode {
    UnknownNode,
    UnsupportedTable,
    HeadingLevel,
    MalformedUrl,
    DeepNesting,
}

impl WarningCode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::UnknownNode => "adf/warn/unknown-node",
            Self::UnsupportedTable => "adf/warn/unsupported-table",
            Self::HeadingLevel => "adf/warn/heading-level",
            Self::MalformedUrl => "adf/warn/malformed-url",
            Self::DeepNesting => "adf/warn/deep-nesting",
        }
    }
}

/// Non-fatal finding reported by [`validate`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DocumentWarning {
    pub code: WarningCode,
    pub message: String,
    /// JSON-ish path of the offending node, e.g. `content[2].content[0]`.
    pub path: String,
}

/// Root of a document tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub content: Vec<TopLevelNode>,
}

const fn default_version() -> u32 {
    1
}

impl Default for Document {
    fn default() -> Self {
        Self {
            version: default_version(),
            content: Vec::new(),
        }
    }
}

impl Document {
    #[must_use]
    pub fn new(content: Vec<TopLevelNode>) -> Self {
        Self {
            version: default_version(),
            content,
        }
    }

    /// Single-paragraph document holding `text`.
    #[must_use]
    pub fn from_text(text: impl Into<String>) -> Self {
        Self::new(vec![TopLevelNode::text_paragraph(text)])
    }

    /// The "No description." placeholder document.
    #[must_use]
    pub fn fallback() -> Self {
        Self::from_text(FALLBACK_TEXT)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    #[must_use]
    pub fn stats(&self) -> DocumentStats {
        let mut stats = DocumentStats::default();
        for node in &self.content {
            stats.visit_block(node, 0);
        }
        stats
    }
}

/// Node counts gathered by [`Document::stats`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct DocumentStats {
    pub blocks: usize,
    pub inline_nodes: usize,
    pub max_depth: usize,
}

impl DocumentStats {
    fn visit_block(&mut self, node: &TopLevelNode, depth: usize) {
        self.blocks += 1;
        self.max_depth = self.max_depth.max(depth);
        match node {
            TopLevelNode::Blockquote(quote) => self.visit_blocks(&quote.content, depth + 1),
            TopLevelNode::Panel(panel) => self.visit_blocks(&panel.content, depth + 1),
            TopLevelNode::BulletList(list) => self.visit_children(&list.content, depth + 1),
            TopLevelNode::OrderedList(list) => self.visit_children(&list.content, depth + 1),
            TopLevelNode::MediaGroup(group) => self.visit_children(&group.content, depth + 1),
            TopLevelNode::MediaSingle(single) => self.visit_children(&single.content, depth + 1),
            TopLevelNode::Table(table) => self.visit_children(&table.content, depth + 1),
            TopLevelNode::Expand(expand) => self.visit_expand(expand, depth + 1),
            TopLevelNode::CodeBlock(block) => self.inline_nodes += block.content.len(),
            TopLevelNode::Heading(heading) => self.inline_nodes += heading.content.len(),
            TopLevelNode::Paragraph(paragraph) => self.inline_nodes += paragraph.content.len(),
            TopLevelNode::Rule | TopLevelNode::Unknown => {}
        }
    }

    fn visit_blocks(&mut self, nodes: &[TopLevelNode], depth: usize) {
        for node in nodes {
            self.visit_block(node, depth);
        }
    }

    fn visit_expand(&mut self, expand: &Expand, depth: usize) {
        self.visit_block_children(&expand.content, depth);
    }

    fn visit_block_children(&mut self, children: &[BlockChild], depth: usize) {
        for child in children {
            match child {
                BlockChild::Block(node) => self.visit_block(node, depth),
                BlockChild::NestedExpand(nested) => {
                    self.blocks += 1;
                    self.max_depth = self.max_depth.max(depth);
                    self.visit_expand(nested, depth + 1);
                }
            }
        }
    }

    fn visit_children(&mut self, children: &[ChildBlockNode], depth: usize) {
        for child in children {
            self.blocks += 1;
            self.max_depth = self.max_depth.max(depth);
            match child {
                ChildBlockNode::ListItem(item) => self.visit_blocks(&item.content, depth + 1),
                ChildBlockNode::NestedExpand(nested) => self.visit_expand(nested, depth + 1),
                ChildBlockNode::TableRow(row) => self.visit_children(&row.content, depth + 1),
                ChildBlockNode::TableCell(cell) | ChildBlockNode::TableHeader(cell) => {
                    self.visit_block_children(&cell.content, depth + 1);
                }
                ChildBlockNode::Media(_) | ChildBlockNode::Unknown => {}
            }
        }
    }
}

/// Decode a document from JSON.
///
/// Accepts a full document object (`{"type":"doc","content":[...]}`) or a
/// bare array of top-level nodes. Anything else is a fatal input error.
///
/// # Errors
///
/// Returns [`AdfError::Json`] for malformed JSON or nodes that do not fit the
/// schema, and [`AdfError::NotADocument`] when the root has the wrong shape.
pub fn parse_document(input: &str) -> Result<Document, AdfError> {
    let value: Value = serde_json::from_str(input)?;
    document_from_value(value)
}

/// Decode a document from an already-parsed JSON value.
///
/// # Errors
///
/// Same as [`parse_document`].
pub fn document_from_value(value: Value) -> Result<Document, AdfError> {
    if value.is_array() {
        let content = Vec::<TopLevelNode>::deserialize(value)?;
        return Ok(Document::new(content));
    }
    if value.get("type").and_then(Value::as_str) == Some("doc") {
        return Ok(Document::deserialize(value)?);
    }
    Err(AdfError::NotADocument {
        found: describe(&value),
    })
}

fn describe(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(_) => "a boolean".to_string(),
        Value::Number(_) => "a number".to_string(),
        Value::String(_) => "a string".to_string(),
        Value::Array(_) => "an array".to_string(),
        Value::Object(object) => match object.get("type").and_then(Value::as_str) {
            Some(kind) => format!("a `{kind}` node"),
            None => "an untyped object".to_string(),
        },
    }
}
