//! Line-level text utilities: padding, word wrapping and prefixing.

use std::borrow::Cow;

use crate::ansi::{balance_lines, strip_ansi, visible_width};

/// Append spaces until `text` is `width` columns wide. Never truncates.
#[must_use]
pub fn pad(text: &str, width: usize) -> String {
    let current = visible_width(text);
    if current >= width {
        return text.to_string();
    }
    let mut out = String::with_capacity(text.len() + width - current);
    out.push_str(text);
    out.extend(std::iter::repeat_n(' ', width - current));
    out
}

/// Right-align `text` in a field of `width` columns.
#[must_use]
pub fn pad_left(text: &str, width: usize) -> String {
    let current = visible_width(text);
    if current >= width {
        return text.to_string();
    }
    format!("{}{text}", " ".repeat(width - current))
}

/// Greedy word wrap to `max_width` visible columns.
///
/// Newlines force a break, spaces are break opportunities and runs of spaces
/// collapse. A word wider than the limit sits alone on its own line. An empty
/// segment yields an empty line, so `""` wraps to `[""]`. Styles open at a
/// line break are closed at the end of the line and re-opened on the next.
#[must_use]
pub fn wrap(text: &str, max_width: usize) -> Vec<String> {
    let max_width = max_width.max(1);
    let mut lines = Vec::new();
    for segment in text.split('\n') {
        let mut current = String::new();
        let mut current_width = 0;
        for word in segment.split(' ').filter(|word| !word.is_empty()) {
            let word_width = visible_width(word);
            if current.is_empty() {
                current.push_str(word);
                current_width = word_width;
            } else if current_width + word_width + 1 <= max_width {
                current.push(' ');
                current.push_str(word);
                current_width += word_width + 1;
            } else if current_width == 0 {
                // Only escapes so far: keep them on the word's line.
                current.push_str(word);
                current_width = word_width;
            } else {
                lines.push(std::mem::take(&mut current));
                current.push_str(word);
                current_width = word_width;
            }
        }
        lines.push(current);
    }
    balance_lines(lines)
}

/// Prefix the first line with `first` and the rest with `rest`.
#[must_use]
pub fn prefix_lines(lines: Vec<String>, first: &str, rest: &str) -> Vec<String> {
    lines
        .into_iter()
        .enumerate()
        .map(|(index, line)| {
            let prefix = if index == 0 { first } else { rest };
            format!("{prefix}{line}")
        })
        .collect()
}

/// Indent every non-blank line by `columns` spaces.
#[must_use]
pub fn indent(lines: Vec<String>, columns: usize) -> Vec<String> {
    let margin = " ".repeat(columns);
    lines
        .into_iter()
        .map(|line| {
            if is_blank(&line) {
                line
            } else {
                format!("{margin}{line}")
            }
        })
        .collect()
}

/// True for separator lines: nothing but escape sequences.
#[must_use]
pub fn is_blank(line: &str) -> bool {
    strip_ansi(line).is_empty()
}

/// Drop trailing separator lines.
#[must_use]
pub fn trim_trailing_blank(mut lines: Vec<String>) -> Vec<String> {
    while lines.last().is_some_and(|line| is_blank(line)) {
        lines.pop();
    }
    lines
}

/// Replace typographic quotes with ASCII quotes.
#[must_use]
pub fn normalize_quotes(text: &str) -> Cow<'_, str> {
    const DOUBLE: [char; 4] = ['\u{201C}', '\u{201D}', '\u{201E}', '\u{201F}'];
    const SINGLE: [char; 4] = ['\u{2018}', '\u{2019}', '\u{201A}', '\u{201B}'];
    if !text.contains(|ch| DOUBLE.contains(&ch) || SINGLE.contains(&ch)) {
        return Cow::Borrowed(text);
    }
    Cow::Owned(
        text.chars()
            .map(|ch| {
                if DOUBLE.contains(&ch) {
                    '"'
                } else if SINGLE.contains(&ch) {
                    '\''
                } else {
                    ch
                }
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn pad_fills_and_never_truncates() {
        assert_eq!(pad("ab", 5), "ab   ");
        assert_eq!(pad("abcdef", 3), "abcdef");
        assert_eq!(visible_width(&pad("\x1b[1mab\x1b[22m", 4)), 4);
    }

    #[test]
    fn pad_left_aligns_right() {
        assert_eq!(pad_left("7", 3), "  7");
        assert_eq!(pad_left("1234", 3), "1234");
    }

    #[test]
    fn wraps_greedily() {
        assert_eq!(wrap("aa bb cc", 5), vec!["aa bb", "cc"]);
        assert_eq!(wrap("aa bb cc", 8), vec!["aa bb cc"]);
    }

    #[test]
    fn long_word_sits_alone() {
        assert_eq!(wrap("a abcdefgh b", 4), vec!["a", "abcdefgh", "b"]);
    }

    #[test]
    fn newlines_force_breaks() {
        assert_eq!(wrap("a\nb", 10), vec!["a", "b"]);
        assert_eq!(wrap("a\n\nb", 10), vec!["a", "", "b"]);
        assert_eq!(wrap("", 10), vec![""]);
    }

    #[test]
    fn spaces_collapse() {
        assert_eq!(wrap("  a   b  ", 10), vec!["a b"]);
    }

    #[test]
    fn zero_width_is_treated_as_one() {
        assert_eq!(wrap("a b", 0), vec!["a", "b"]);
    }

    #[test]
    fn escapes_do_not_count_toward_width() {
        let bold = "\x1b[1mab\x1b[22m cd";
        assert_eq!(wrap(bold, 5), vec![bold.to_string()]);
    }

    #[test]
    fn spaces_after_escape_only_tokens_are_kept() {
        let badge = "\x1b[44m ok \x1b[49m done";
        let lines = wrap(badge, 20);
        assert_eq!(lines, vec![badge]);
        assert_eq!(strip_ansi(&lines[0]), " ok  done");
    }

    #[test]
    fn wrapped_styles_are_reopened() {
        let lines = wrap("\x1b[1maa bb\x1b[22m", 2);
        assert_eq!(lines, vec!["\x1b[1maa\x1b[0m", "\x1b[1mbb\x1b[22m"]);
    }

    #[test]
    fn prefixes_and_indents() {
        let lines = prefix_lines(vec!["a".into(), "b".into()], "- ", "  ");
        assert_eq!(lines, vec!["- a", "  b"]);
        assert_eq!(indent(vec!["x".into(), String::new()], 2), vec!["  x", ""]);
    }

    #[test]
    fn trims_trailing_blank_lines() {
        let lines = vec!["a".to_string(), "  ".to_string(), String::new(), String::new()];
        assert_eq!(trim_trailing_blank(lines), vec!["a", "  "]);
    }

    #[test]
    fn normalizes_smart_quotes() {
        assert_eq!(normalize_quotes("\u{201C}hi\u{201D} it\u{2019}s"), "\"hi\" it's");
        assert!(matches!(normalize_quotes("plain"), Cow::Borrowed(_)));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_wrapped_lines_fit(words in proptest::collection::vec("[a-z]{1,8}", 0..30), width in 8usize..60) {
            let text = words.join(" ");
            for line in wrap(&text, width) {
                prop_assert!(visible_width(&line) <= width, "line {line:?} exceeds {width}");
            }
        }

        #[test]
        fn prop_wrap_preserves_words(words in proptest::collection::vec("[a-z]{1,8}", 1..30), width in 1usize..40) {
            let text = words.join(" ");
            let rejoined: Vec<String> = wrap(&text, width)
                .iter()
                .flat_map(|line| line.split(' ').map(str::to_string).collect::<Vec<_>>())
                .collect();
            prop_assert_eq!(rejoined, words);
        }

        #[test]
        fn prop_pad_reaches_width(text in "[a-z ]{0,20}", width in 0usize..40) {
            let padded = pad(&text, width);
            prop_assert_eq!(visible_width(&padded), width.max(text.chars().count()));
        }
    }
}
