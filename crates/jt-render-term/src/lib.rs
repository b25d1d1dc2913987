#![forbid(unsafe_code)]

//! Fixed-width terminal rendering of Atlassian Document Format trees.
//!
//! [`render`] turns a list of top-level nodes into rows that are each exactly
//! `line_width` visible columns wide, with ANSI styling and OSC 8 hyperlinks
//! embedded, padded with blank rows up to a minimum count. The engine is pure:
//! unsupported nodes degrade to nothing, and it never fails for a decoded tree.

pub mod ansi;
pub mod blocks;
pub mod config;
pub mod container;
pub mod glyphs;
pub mod inline;
pub mod list;
pub mod marks;
pub mod renderer;
pub mod style;
pub mod text;

pub use ansi::{strip_ansi, visible_width};
pub use config::{GlyphMode, RenderConfig, RenderContext};
pub use glyphs::Glyphs;
pub use renderer::{AdfRenderer, RenderResult};
pub use style::{AnsiStyler, PlainStyler, Styler};

use jt_core::TopLevelNode;

/// Render `document` into `line_width`-column rows, at least
/// `minimum_line_count` of them. `own_host` is the host of the user's own
/// Jira site, or empty.
#[must_use]
pub fn render(
    document: &[TopLevelNode],
    line_width: usize,
    minimum_line_count: usize,
    own_host: &str,
) -> Vec<String> {
    let config = RenderConfig::new(line_width, minimum_line_count, own_host);
    render_with_config(document, &config).lines
}

/// Render with a full configuration.
#[must_use]
pub fn render_with_config(document: &[TopLevelNode], config: &RenderConfig) -> RenderResult {
    AdfRenderer::new(config.clone()).render(document)
}
