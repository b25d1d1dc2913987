//! Unicode and ASCII glyph sets for list bullets, panel icons and markers.
//!
//! Every glyph occupies exactly one terminal column in both sets.

use jt_core::PanelType;

use crate::config::GlyphMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyphs {
    /// Bullet of an unordered list item.
    pub bullet: char,
    /// Repeated once per nesting level in front of list markers.
    pub depth_marker: char,
    /// Leading marker of an expand header.
    pub chevron: char,
    /// Blockquote gutter.
    pub quote: char,
    /// Stand-in for content cut off by the depth guard.
    pub ellipsis: &'static str,
    pub info: char,
    pub note: char,
    pub warning: char,
    pub success: char,
    pub error: char,
    pub custom: char,
}

impl Glyphs {
    pub const UNICODE: Self = Self {
        bullet: '•',
        depth_marker: '◦',
        chevron: '▾',
        quote: '>',
        ellipsis: "…",
        info: 'ℹ',
        note: '✎',
        warning: '⚠',
        success: '✔',
        error: '✖',
        custom: '◆',
    };

    pub const ASCII: Self = Self {
        bullet: '*',
        depth_marker: '-',
        chevron: 'v',
        quote: '>',
        ellipsis: "...",
        info: 'i',
        note: 'n',
        warning: '!',
        success: '+',
        error: 'x',
        custom: '*',
    };

    #[must_use]
    pub const fn for_mode(mode: GlyphMode) -> Self {
        match mode {
            GlyphMode::Unicode => Self::UNICODE,
            GlyphMode::Ascii => Self::ASCII,
        }
    }

    #[must_use]
    pub const fn panel_icon(&self, panel: PanelType) -> char {
        match panel {
            PanelType::Info => self.info,
            PanelType::Note => self.note,
            PanelType::Warning => self.warning,
            PanelType::Success => self.success,
            PanelType::Error => self.error,
            PanelType::Custom => self.custom,
        }
    }
}
