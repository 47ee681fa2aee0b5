#![no_main]

use citing_authors::client::xml;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        let _ = xml::parse_esummary(text);
    }
});
