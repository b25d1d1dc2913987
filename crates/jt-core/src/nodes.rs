//! Block and inline node families.

use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::marks::Mark;

/// Node allowed directly under the document root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum TopLevelNode {
    Blockquote(Blockquote),
    BulletList(BulletList),
    CodeBlock(CodeBlock),
    Expand(Expand),
    Heading(Heading),
    MediaGroup(MediaGroup),
    MediaSingle(MediaSingle),
    OrderedList(OrderedList),
    Panel(Panel),
    Paragraph(Paragraph),
    Rule,
    Table(Table),
    #[serde(other)]
    Unknown,
}

impl TopLevelNode {
    /// Wire name of the node type.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Blockquote(_) => "blockquote",
            Self::BulletList(_) => "bulletList",
            Self::CodeBlock(_) => "codeBlock",
            Self::Expand(_) => "expand",
            Self::Heading(_) => "heading",
            Self::MediaGroup(_) => "mediaGroup",
            Self::MediaSingle(_) => "mediaSingle",
            Self::OrderedList(_) => "orderedList",
            Self::Panel(_) => "panel",
            Self::Paragraph(_) => "paragraph",
            Self::Rule => "rule",
            Self::Table(_) => "table",
            Self::Unknown => "unknown",
        }
    }

    /// Convenience constructor for a paragraph holding one plain text run.
    #[must_use]
    pub fn text_paragraph(text: impl Into<String>) -> Self {
        Self::Paragraph(Paragraph {
            content: vec![InlineNode::text(text)],
        })
    }
}

/// Node that only appears under a specific parent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ChildBlockNode {
    ListItem(ListItem),
    Media(Media),
    NestedExpand(Expand),
    TableCell(TableCell),
    TableHeader(TableCell),
    TableRow(TableRow),
    #[serde(other)]
    Unknown,
}

impl ChildBlockNode {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ListItem(_) => "listItem",
            Self::Media(_) => "media",
            Self::NestedExpand(_) => "nestedExpand",
            Self::TableCell(_) => "tableCell",
            Self::TableHeader(_) => "tableHeader",
            Self::TableRow(_) => "tableRow",
            Self::Unknown => "unknown",
        }
    }
}

/// Content of `expand`, `tableCell` and `tableHeader`: any top-level block,
/// or a `nestedExpand`.
#[derive(Debug, Clone, PartialEq)]
pub enum BlockChild {
    Block(TopLevelNode),
    NestedExpand(Expand),
}

impl<'de> Deserialize<'de> for BlockChild {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        if value.get("type").and_then(Value::as_str) == Some("nestedExpand") {
            Expand::deserialize(value)
                .map(Self::NestedExpand)
                .map_err(de::Error::custom)
        } else {
            TopLevelNode::deserialize(value)
                .map(Self::Block)
                .map_err(de::Error::custom)
        }
    }
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
enum NestedExpandRef<'a> {
    NestedExpand(&'a Expand),
}

impl Serialize for BlockChild {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Block(node) => node.serialize(serializer),
            Self::NestedExpand(expand) => NestedExpandRef::NestedExpand(expand).serialize(serializer),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Blockquote {
    #[serde(default)]
    pub content: Vec<TopLevelNode>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BulletList {
    #[serde(default)]
    pub content: Vec<ChildBlockNode>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OrderedList {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attrs: Option<OrderedListAttrs>,
    #[serde(default)]
    pub content: Vec<ChildBlockNode>,
}

impl OrderedList {
    /// First item number; `attrs.order` when present, else 1.
    #[must_use]
    pub fn start(&self) -> u32 {
        self.attrs.as_ref().and_then(|attrs| attrs.order).unwrap_or(1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OrderedListAttrs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ListItem {
    #[serde(default)]
    pub content: Vec<TopLevelNode>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CodeBlock {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attrs: Option<CodeBlockAttrs>,
    #[serde(default)]
    pub content: Vec<InlineNode>,
}

impl CodeBlock {
    /// Concatenated source text of the block's `text` children.
    #[must_use]
    pub fn source(&self) -> String {
        self.content
            .iter()
            .filter_map(|node| match node {
                InlineNode::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    #[must_use]
    pub fn language(&self) -> Option<&str> {
        self.attrs.as_ref()?.language.as_deref()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CodeBlockAttrs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

/// `expand` and `nestedExpand` share one shape.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Expand {
    #[serde(default)]
    pub attrs: ExpandAttrs,
    #[serde(default)]
    pub content: Vec<BlockChild>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ExpandAttrs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Heading {
    #[serde(default)]
    pub attrs: HeadingAttrs,
    #[serde(default)]
    pub content: Vec<InlineNode>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeadingAttrs {
    pub level: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_id: Option<String>,
}

impl Default for HeadingAttrs {
    fn default() -> Self {
        Self {
            level: 1,
            local_id: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MediaGroup {
    #[serde(default)]
    pub content: Vec<ChildBlockNode>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MediaSingle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attrs: Option<MediaSingleAttrs>,
    #[serde(default)]
    pub content: Vec<ChildBlockNode>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaSingleAttrs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Media {
    #[serde(default)]
    pub attrs: MediaAttrs,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub marks: Vec<Mark>,
}

impl Media {
    /// Placeholder text shown in place of the media: alt text, then id,
    /// then the literal `MEDIA`.
    #[must_use]
    pub fn label(&self) -> &str {
        [self.attrs.alt.as_deref(), self.attrs.id.as_deref()]
            .into_iter()
            .flatten()
            .find(|candidate| !candidate.trim().is_empty())
            .unwrap_or("MEDIA")
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaAttrs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Panel {
    pub attrs: PanelAttrs,
    #[serde(default)]
    pub content: Vec<TopLevelNode>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelAttrs {
    pub panel_type: PanelType,
}

/// Panel flavor. Values outside the known set decode as `Custom`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PanelType {
    Info,
    Note,
    Warning,
    Success,
    Error,
    Custom,
}

impl PanelType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Note => "note",
            Self::Warning => "warning",
            Self::Success => "success",
            Self::Error => "error",
            Self::Custom => "custom",
        }
    }

    /// Display title, the type name capitalized.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Info => "Info",
            Self::Note => "Note",
            Self::Warning => "Warning",
            Self::Success => "Success",
            Self::Error => "Error",
            Self::Custom => "Custom",
        }
    }
}

impl From<String> for PanelType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "info" => Self::Info,
            "note" => Self::Note,
            "warning" => Self::Warning,
            "success" => Self::Success,
            "error" => Self::Error,
            _ => Self::Custom,
        }
    }
}

impl From<PanelType> for String {
    fn from(value: PanelType) -> Self {
        value.as_str().to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Paragraph {
    #[serde(default)]
    pub content: Vec<InlineNode>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Table {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attrs: Option<Value>,
    #[serde(default)]
    pub content: Vec<ChildBlockNode>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TableRow {
    #[serde(default)]
    pub content: Vec<ChildBlockNode>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TableCell {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attrs: Option<Value>,
    #[serde(default)]
    pub content: Vec<BlockChild>,
}

/// Inline content of paragraphs and headings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum InlineNode {
    Date {
        attrs: DateAttrs,
    },
    Emoji {
        attrs: EmojiAttrs,
    },
    HardBreak,
    InlineCard {
        #[serde(default)]
        attrs: InlineCardAttrs,
    },
    Mention {
        attrs: MentionAttrs,
    },
    Status {
        attrs: StatusAttrs,
    },
    Text {
        text: String,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        marks: Vec<Mark>,
    },
    #[serde(other)]
    Unknown,
}

impl InlineNode {
    /// Unmarked text run.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text {
            text: text.into(),
            marks: Vec::new(),
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Date { .. } => "date",
            Self::Emoji { .. } => "emoji",
            Self::HardBreak => "hardBreak",
            Self::InlineCard { .. } => "inlineCard",
            Self::Mention { .. } => "mention",
            Self::Status { .. } => "status",
            Self::Text { .. } => "text",
            Self::Unknown => "unknown",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateAttrs {
    pub timestamp: Timestamp,
}

/// Millisecond UNIX timestamp, sent either as a string or a number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Timestamp {
    Millis(i64),
    Text(String),
}

impl Timestamp {
    #[must_use]
    pub fn millis(&self) -> Option<i64> {
        match self {
            Self::Millis(millis) => Some(*millis),
            Self::Text(text) => text.trim().parse().ok(),
        }
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Millis(millis) => write!(f, "{millis}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmojiAttrs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct InlineCardAttrs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MentionAttrs {
    #[serde(default)]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_level: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusAttrs {
    pub text: String,
    pub color: StatusColor,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_id: Option<String>,
}

/// Lozenge color of a `status` node. Unknown values decode as `Neutral`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum StatusColor {
    Neutral,
    Purple,
    Blue,
    Red,
    Yellow,
    Green,
}

impl StatusColor {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Neutral => "neutral",
            Self::Purple => "purple",
            Self::Blue => "blue",
            Self::Red => "red",
            Self::Yellow => "yellow",
            Self::Green => "green",
        }
    }
}

impl From<String> for StatusColor {
    fn from(value: String) -> Self {
        match value.as_str() {
            "purple" => Self::Purple,
            "blue" => Self::Blue,
            "red" => Self::Red,
            "yellow" => Self::Yellow,
            "green" => Self::Green,
            _ => Self::Neutral,
        }
    }
}

impl From<StatusColor> for String {
    fn from(value: StatusColor) -> Self {
        value.as_str().to_string()
    }
}
