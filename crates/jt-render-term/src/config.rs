//! Renderer configuration and the per-call rendering context.

use serde::{Deserialize, Serialize};

use crate::glyphs::Glyphs;
use crate::style::{Styler, styler_for};

/// Columns of the issue viewer's description pane.
pub const DEFAULT_LINE_WIDTH: usize = 119;
/// Rows of the issue viewer's description pane.
pub const DEFAULT_MINIMUM_LINES: usize = 33;
/// Container nesting beyond which content is elided.
pub const DEFAULT_MAX_DEPTH: usize = 32;

/// Glyph set used for bullets, icons and markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GlyphMode {
    #[default]
    Unicode,
    Ascii,
}

/// Configuration for document rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Width in columns every output line is padded to.
    pub line_width: usize,
    /// Output is padded with blank lines up to this many lines.
    pub minimum_lines: usize,
    /// Host of the user's own Jira site; smart links to it show their last
    /// path segment instead of the host.
    pub own_host: Option<String>,
    pub glyph_mode: GlyphMode,
    /// Emit ANSI styling. When off, output is plain text.
    pub color: bool,
    /// Replace typographic quotes with their ASCII forms.
    pub normalize_quotes: bool,
    /// Container nesting depth rendered before eliding.
    pub max_depth: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            line_width: DEFAULT_LINE_WIDTH,
            minimum_lines: DEFAULT_MINIMUM_LINES,
            own_host: None,
            glyph_mode: GlyphMode::Unicode,
            color: true,
            normalize_quotes: true,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl RenderConfig {
    /// Configuration with the given geometry and own host. An empty host
    /// disables own-site detection.
    #[must_use]
    pub fn new(line_width: usize, minimum_lines: usize, own_host: &str) -> Self {
        Self {
            line_width,
            minimum_lines,
            ..Self::default()
        }
        .with_own_host(own_host)
    }

    /// Plain ASCII output without escape sequences, for pipes and logs.
    #[must_use]
    pub fn plain() -> Self {
        Self {
            glyph_mode: GlyphMode::Ascii,
            color: false,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_own_host(mut self, own_host: &str) -> Self {
        let host = own_host.trim();
        self.own_host = (!host.is_empty()).then(|| host.to_ascii_lowercase());
        self
    }

    /// Effective line width; at least one column.
    #[must_use]
    pub fn effective_width(&self) -> usize {
        self.line_width.max(1)
    }
}

/// Immutable state threaded through the renderers.
///
/// Containers derive child contexts with [`RenderContext::child`], which
/// narrows the width and counts nesting depth.
#[derive(Clone, Copy)]
pub struct RenderContext<'a> {
    /// Columns available to the current block.
    pub width: usize,
    /// Container nesting depth, 0 at the document root.
    pub depth: usize,
    pub own_host: Option<&'a str>,
    pub normalize_quotes: bool,
    pub max_depth: usize,
    pub glyphs: Glyphs,
    pub styler: &'a dyn Styler,
}

impl<'a> RenderContext<'a> {
    #[must_use]
    pub fn root(config: &'a RenderConfig) -> Self {
        Self {
            width: config.effective_width(),
            depth: 0,
            own_host: config.own_host.as_deref(),
            normalize_quotes: config.normalize_quotes,
            max_depth: config.max_depth,
            glyphs: Glyphs::for_mode(config.glyph_mode),
            styler: styler_for(config.color),
        }
    }

    /// Same context with `columns` fewer columns, never below one.
    #[must_use]
    pub fn narrowed(&self, columns: usize) -> Self {
        Self {
            width: self.width.saturating_sub(columns).max(1),
            ..*self
        }
    }

    /// Context one container level deeper, or `None` past the depth limit.
    #[must_use]
    pub fn nested(&self) -> Option<Self> {
        let depth = self.depth + 1;
        (depth <= self.max_depth).then_some(Self { depth, ..*self })
    }

    /// Narrowed and nested in one step.
    #[must_use]
    pub fn child(&self, columns: usize) -> Option<Self> {
        self.nested().map(|ctx| ctx.narrowed(columns))
    }
}

impl std::fmt::Debug for RenderContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderContext")
            .field("width", &self.width)
            .field("depth", &self.depth)
            .field("own_host", &self.own_host)
            .field("normalize_quotes", &self.normalize_quotes)
            .field("max_depth", &self.max_depth)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_viewer_pane() {
        let config = RenderConfig::default();
        assert_eq!(config.line_width, 119);
        assert_eq!(config.minimum_lines, 33);
        assert!(config.color);
        assert_eq!(config.own_host, None);
    }

    #[test]
    fn empty_own_host_is_none() {
        assert_eq!(RenderConfig::new(80, 0, "  ").own_host, None);
        assert_eq!(
            RenderConfig::new(80, 0, "Acme.Atlassian.net").own_host.as_deref(),
            Some("acme.atlassian.net")
        );
    }

    #[test]
    fn narrowing_never_reaches_zero() {
        let config = RenderConfig::new(3, 0, "");
        let ctx = RenderContext::root(&config);
        assert_eq!(ctx.narrowed(2).width, 1);
        assert_eq!(ctx.narrowed(10).width, 1);
        assert_eq!(RenderContext::root(&RenderConfig::new(0, 0, "")).width, 1);
    }

    #[test]
    fn nesting_stops_at_max_depth() {
        let config = RenderConfig {
            max_depth: 1,
            ..RenderConfig::default()
        };
        let root = RenderContext::root(&config);
        let first = root.child(2).expect("first level allowed");
        assert_eq!(first.depth, 1);
        assert_eq!(first.width, 117);
        assert!(first.nested().is_none());
    }

    #[test]
    fn glyph_mode_uses_lowercase_names() {
        let mode: GlyphMode = serde_json::from_str("\"ascii\"").expect("decode");
        assert_eq!(mode, GlyphMode::Ascii);
    }
}
