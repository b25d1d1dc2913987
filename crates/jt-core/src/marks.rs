//! Inline marks attached to `text` nodes.

use serde::{Deserialize, Serialize};

/// Formatting mark on a text node.
///
/// Marks are applied in list order: each one wraps the result of the
/// previous, so the last mark in the list is the outermost style.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Mark {
    BackgroundColor { attrs: ColorAttrs },
    Code,
    Em,
    Link { attrs: LinkAttrs },
    Strike,
    Strong,
    Subsup { attrs: SubSupAttrs },
    TextColor { attrs: ColorAttrs },
    Underline,
    #[serde(other)]
    Unknown,
}

impl Mark {
    /// Wire name of the mark type.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::BackgroundColor { .. } => "backgroundColor",
            Self::Code => "code",
            Self::Em => "em",
            Self::Link { .. } => "link",
            Self::Strike => "strike",
            Self::Strong => "strong",
            Self::Subsup { .. } => "subsup",
            Self::TextColor { .. } => "textColor",
            Self::Underline => "underline",
            Self::Unknown => "unknown",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorAttrs {
    /// Hex color, `#rrggbb` or `#rgb`.
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkAttrs {
    pub href: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub occurrence_key: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubSupAttrs {
    #[serde(rename = "type")]
    pub kind: SubSupKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubSupKind {
    Sub,
    Sup,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_attribute_marks() {
        let marks: Vec<Mark> = serde_json::from_str(
            r##"[
                {"type":"strong"},
                {"type":"textColor","attrs":{"color":"#ff5630"}},
                {"type":"link","attrs":{"href":"https://example.com"}},
                {"type":"subsup","attrs":{"type":"sup"}}
            ]"##,
        )
        .expect("marks decode");

        assert_eq!(marks[0], Mark::Strong);
        assert_eq!(
            marks[1],
            Mark::TextColor {
                attrs: ColorAttrs {
                    color: "#ff5630".to_string()
                }
            }
        );
        assert!(matches!(&marks[2], Mark::Link { attrs } if attrs.href == "https://example.com"));
        assert_eq!(
            marks[3],
            Mark::Subsup {
                attrs: SubSupAttrs {
                    kind: SubSupKind::Sup
                }
            }
        );
    }

    #[test]
    fn unknown_mark_type_degrades() {
        let mark: Mark =
            serde_json::from_str(r#"{"type":"annotation","attrs":{"id":"x"}}"#).expect("decode");
        assert_eq!(mark, Mark::Unknown);
        assert_eq!(mark.as_str(), "unknown");
    }
}
