#![no_main]

use libfuzzer_sys::fuzz_target;
use jt_render_term::{RenderConfig, render_with_config, visible_width};

fuzz_target!(|data: &[u8]| {
    let Some((&geometry, rest)) = data.split_first() else {
        return;
    };
    let Ok(input) = std::str::from_utf8(rest) else {
        return;
    };
    let Ok(document) = jt_core::parse_document(input) else {
        return;
    };

    let width = usize::from(geometry % 120) + 20;
    let config = RenderConfig::new(width, usize::from(geometry % 8), "example.atlassian.net");
    let result = render_with_config(&document.content, &config);
    assert!(result.lines.len() >= config.minimum_lines);
    for line in &result.lines {
        // Rows only exceed the width when a single token does not fit.
        assert!(visible_width(line) >= width);
    }
});
