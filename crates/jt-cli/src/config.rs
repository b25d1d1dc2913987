//! Optional TOML configuration file.
//!
//! ```toml
//! [render]
//! width = 119
//! min_lines = 33
//! glyphs = "unicode"   # or "ascii"
//! color = true
//! normalize_quotes = true
//! max_depth = 32
//!
//! [jira]
//! base_url = "https://acme.atlassian.net"
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use jt_render_term::{GlyphMode, RenderConfig};
use serde::Deserialize;
use tracing::debug;
use url::Url;

const APP_DIR: &str = "jiratime";
const FILE_NAME: &str = "config.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub render: RenderSection,
    pub jira: JiraSection,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderSection {
    pub width: Option<usize>,
    pub min_lines: Option<usize>,
    pub glyphs: Option<GlyphMode>,
    pub color: Option<bool>,
    pub normalize_quotes: Option<bool>,
    pub max_depth: Option<usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct JiraSection {
    pub base_url: Option<String>,
}

impl FileConfig {
    /// Load `explicit`, or the per-user file when no path is given.
    ///
    /// A missing per-user file yields defaults; a missing explicit file or a
    /// malformed file is an error.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::read(path),
            None => match default_path() {
                Some(path) if path.exists() => Self::read(&path),
                _ => {
                    debug!("no config file, using defaults");
                    Ok(Self::default())
                }
            },
        }
    }

    fn read(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config = Self::parse(&text)
            .with_context(|| format!("Invalid config file: {}", path.display()))?;
        debug!(path = %path.display(), "loaded config file");
        Ok(config)
    }

    pub fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Overlay the file's render settings on `config`.
    pub fn apply(&self, config: &mut RenderConfig) {
        let render = &self.render;
        if let Some(width) = render.width {
            config.line_width = width;
        }
        if let Some(min_lines) = render.min_lines {
            config.minimum_lines = min_lines;
        }
        if let Some(glyphs) = render.glyphs {
            config.glyph_mode = glyphs;
        }
        if let Some(color) = render.color {
            config.color = color;
        }
        if let Some(normalize_quotes) = render.normalize_quotes {
            config.normalize_quotes = normalize_quotes;
        }
        if let Some(max_depth) = render.max_depth {
            config.max_depth = max_depth;
        }
    }
}

/// `$XDG_CONFIG_HOME/jiratime/config.toml`, else `~/.config/jiratime/config.toml`.
fn default_path() -> Option<PathBuf> {
    let base = std::env::var_os("XDG_CONFIG_HOME")
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
        .or_else(|| {
            std::env::var_os("HOME")
                .filter(|value| !value.is_empty())
                .map(|home| PathBuf::from(home).join(".config"))
        })?;
    Some(base.join(APP_DIR).join(FILE_NAME))
}

/// Host part of a Jira base URL. Bare hosts (`acme.atlassian.net`) pass
/// through; anything unparseable yields `None`.
#[must_use]
pub fn host_of(base_url: &str) -> Option<String> {
    let trimmed = base_url.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return None;
    }
    let candidate = if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    };
    let url = Url::parse(&candidate).ok()?;
    url.host_str().map(str::to_ascii_lowercase)
}
