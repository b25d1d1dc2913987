#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        if let Ok(document) = jt_core::parse_document(input) {
            let _ = jt_core::validate(&document);
            let _ = document.stats();
        }
    }
});
