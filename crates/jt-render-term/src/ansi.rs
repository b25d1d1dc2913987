//! Escape-sequence scanning and visible-width measurement.
//!
//! Recognizes CSI sequences (`ESC [` or the 8-bit `0x9B` introducer),
//! string sequences (OSC/DCS/APC/PM/SOS, terminated by BEL, `ESC \` or
//! `0x9C`) and two-character `ESC x` escapes. Everything else is visible text,
//! measured with `unicode-width`.

use std::borrow::Cow;

use unicode_width::UnicodeWidthStr;

const ESC: char = '\u{1b}';
const BEL: char = '\u{07}';
const CSI_8BIT: char = '\u{9b}';
const OSC_8BIT: char = '\u{9d}';
const DCS_8BIT: char = '\u{90}';
const ST_8BIT: char = '\u{9c}';

/// A run of visible text or one complete escape sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    Text(&'a str),
    Escape(&'a str),
}

/// Iterator over the segments of a string.
#[derive(Debug, Clone)]
pub struct Segments<'a> {
    rest: &'a str,
}

/// Split `input` into visible text runs and escape sequences.
#[must_use]
pub fn segments(input: &str) -> Segments<'_> {
    Segments { rest: input }
}

impl<'a> Iterator for Segments<'a> {
    type Item = Segment<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.rest.is_empty() {
            return None;
        }
        let len = escape_len(self.rest);
        if len > 0 {
            let (escape, rest) = self.rest.split_at(len);
            self.rest = rest;
            return Some(Segment::Escape(escape));
        }
        let text_len = self
            .rest
            .char_indices()
            .find(|&(_, ch)| is_introducer(ch))
            .map_or(self.rest.len(), |(index, _)| index);
        let (text, rest) = self.rest.split_at(text_len);
        self.rest = rest;
        Some(Segment::Text(text))
    }
}

const fn is_introducer(ch: char) -> bool {
    matches!(ch, ESC | CSI_8BIT | OSC_8BIT | DCS_8BIT)
}

/// Byte length of the escape sequence at the start of `input`, or 0.
fn escape_len(input: &str) -> usize {
    let mut chars = input.char_indices();
    let Some((_, first)) = chars.next() else {
        return 0;
    };
    match first {
        CSI_8BIT => csi_len(input, first.len_utf8()),
        OSC_8BIT | DCS_8BIT => string_len(input, first.len_utf8()),
        ESC => match chars.next() {
            None => first.len_utf8(),
            Some((index, '[')) => csi_len(input, index + 1),
            Some((index, ']' | 'P' | '_' | '^' | 'X')) => string_len(input, index + 1),
            Some((index, second)) => index + second.len_utf8(),
        },
        _ => 0,
    }
}

/// Parameter and intermediate bytes, then one final byte in `0x40..=0x7E`.
/// A malformed sequence ends just before the offending character.
fn csi_len(input: &str, body_start: usize) -> usize {
    for (index, ch) in input[body_start..].char_indices() {
        match ch {
            '\u{20}'..='\u{3f}' => {}
            '\u{40}'..='\u{7e}' => return body_start + index + 1,
            _ => return body_start + index,
        }
    }
    input.len()
}

/// Control string terminated by BEL, `ESC \` or the 8-bit ST.
/// An unterminated string runs to the end of the input.
fn string_len(input: &str, body_start: usize) -> usize {
    let body = &input[body_start..];
    let mut chars = body.char_indices().peekable();
    while let Some((index, ch)) = chars.next() {
        match ch {
            BEL | ST_8BIT => return body_start + index + ch.len_utf8(),
            ESC => {
                if let Some(&(next_index, '\\')) = chars.peek() {
                    return body_start + next_index + 1;
                }
            }
            _ => {}
        }
    }
    input.len()
}

/// Remove every escape sequence, keeping visible text.
#[must_use]
pub fn strip_ansi(input: &str) -> Cow<'_, str> {
    if !input.contains(is_introducer) {
        return Cow::Borrowed(input);
    }
    let mut out = String::with_capacity(input.len());
    for segment in segments(input) {
        if let Segment::Text(text) = segment {
            out.push_str(text);
        }
    }
    Cow::Owned(out)
}

/// Terminal columns occupied by `input` once escape sequences are removed.
#[must_use]
pub fn visible_width(input: &str) -> usize {
    segments(input)
        .map(|segment| match segment {
            Segment::Text(text) => text.width(),
            Segment::Escape(_) => 0,
        })
        .sum()
}

/// Rewrite visible characters with `map`, leaving escape sequences intact.
#[must_use]
pub fn map_visible(input: &str, map: impl Fn(char) -> char) -> String {
    let mut out = String::with_capacity(input.len());
    for segment in segments(input) {
        match segment {
            Segment::Text(text) => out.extend(text.chars().map(&map)),
            Segment::Escape(escape) => out.push_str(escape),
        }
    }
    out
}

/// Drop control characters (escape introducers included) from document text
/// and expand tabs to four spaces. Newlines survive.
#[must_use]
pub fn sanitize_text(input: &str) -> Cow<'_, str> {
    if !input.chars().any(|ch| ch.is_control() && ch != '\n') {
        return Cow::Borrowed(input);
    }
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '\t' => out.push_str("    "),
            '\n' => out.push('\n'),
            ch if ch.is_control() => {}
            ch => out.push(ch),
        }
    }
    Cow::Owned(out)
}

/// SGR attributes and hyperlink target active at some point of a string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct StyleState {
    bold: bool,
    dim: bool,
    italic: bool,
    underline: bool,
    strike: bool,
    fg: Option<String>,
    bg: Option<String>,
    link: Option<String>,
}

impl StyleState {
    fn has_sgr(&self) -> bool {
        self.bold
            || self.dim
            || self.italic
            || self.underline
            || self.strike
            || self.fg.is_some()
            || self.bg.is_some()
    }

    pub(crate) fn is_plain(&self) -> bool {
        !self.has_sgr() && self.link.is_none()
    }

    /// Fold every escape sequence of `line` into the state.
    pub(crate) fn advance(&mut self, line: &str) {
        for segment in segments(line) {
            if let Segment::Escape(escape) = segment {
                self.apply(escape);
            }
        }
    }

    fn apply(&mut self, escape: &str) {
        if let Some(params) = sgr_params(escape) {
            self.apply_sgr(params);
        } else if let Some(target) = hyperlink_target(escape) {
            self.link = (!target.is_empty()).then(|| target.to_string());
        }
    }

    fn apply_sgr(&mut self, params: &str) {
        let codes: Vec<&str> = params.split(';').collect();
        let mut index = 0;
        while index < codes.len() {
            let code = codes[index]
                .split(':')
                .next()
                .and_then(|head| head.parse::<u16>().ok())
                .unwrap_or(0);
            match code {
                0 => {
                    let link = self.link.take();
                    *self = Self {
                        link,
                        ..Self::default()
                    };
                }
                1 => self.bold = true,
                2 => self.dim = true,
                3 => self.italic = true,
                4 => self.underline = true,
                9 => self.strike = true,
                22 => {
                    self.bold = false;
                    self.dim = false;
                }
                23 => self.italic = false,
                24 => self.underline = false,
                29 => self.strike = false,
                30..=37 | 90..=97 => self.fg = Some(code.to_string()),
                39 => self.fg = None,
                40..=47 | 100..=107 => self.bg = Some(code.to_string()),
                49 => self.bg = None,
                38 | 48 => {
                    let take = match codes.get(index + 1).copied() {
                        Some("5") => 2,
                        Some("2") => 4,
                        _ => 0,
                    };
                    let end = (index + 1 + take).min(codes.len());
                    let color = codes[index..end].join(";");
                    if code == 38 {
                        self.fg = Some(color);
                    } else {
                        self.bg = Some(color);
                    }
                    index = end;
                    continue;
                }
                _ => {}
            }
            index += 1;
        }
    }

    /// Sequence that re-establishes this state from a clean terminal.
    pub(crate) fn open_sequence(&self) -> String {
        let mut out = String::new();
        if self.has_sgr() {
            let mut codes: Vec<&str> = Vec::new();
            if self.bold {
                codes.push("1");
            }
            if self.dim {
                codes.push("2");
            }
            if self.italic {
                codes.push("3");
            }
            if self.underline {
                codes.push("4");
            }
            if self.strike {
                codes.push("9");
            }
            if let Some(fg) = &self.fg {
                codes.push(fg);
            }
            if let Some(bg) = &self.bg {
                codes.push(bg);
            }
            out.push_str(&format!("\x1b[{}m", codes.join(";")));
        }
        if let Some(link) = &self.link {
            out.push_str(&format!("\x1b]8;;{link}\x1b\\"));
        }
        out
    }

    /// Sequence that returns the terminal to a clean state.
    pub(crate) fn close_sequence(&self) -> String {
        let mut out = String::new();
        if self.link.is_some() {
            out.push_str("\x1b]8;;\x1b\\");
        }
        if self.has_sgr() {
            out.push_str("\x1b[0m");
        }
        out
    }
}

/// Parameters of an SGR (`... m`) sequence.
fn sgr_params(escape: &str) -> Option<&str> {
    let body = escape
        .strip_prefix("\x1b[")
        .or_else(|| escape.strip_prefix(CSI_8BIT))?;
    body.strip_suffix('m')
}

/// Target of an OSC 8 hyperlink sequence; empty for the closing form.
fn hyperlink_target(escape: &str) -> Option<&str> {
    let body = escape
        .strip_prefix("\x1b]8;")
        .or_else(|| escape.strip_prefix("\u{9d}8;"))?;
    let body = body
        .strip_suffix("\x1b\\")
        .or_else(|| body.strip_suffix(BEL))
        .or_else(|| body.strip_suffix(ST_8BIT))
        .unwrap_or(body);
    let (_params, target) = body.split_once(';')?;
    Some(target)
}

/// Make every line self-contained: styles still open at the end of a line
/// are closed there and re-opened at the start of the next one.
#[must_use]
pub fn balance_lines(lines: Vec<String>) -> Vec<String> {
    let mut state = StyleState::default();
    lines
        .into_iter()
        .map(|line| {
            let open = state.open_sequence();
            state.advance(&line);
            if open.is_empty() && state.is_plain() {
                return line;
            }
            format!("{open}{line}{}", state.close_sequence())
        })
        .collect()
}
