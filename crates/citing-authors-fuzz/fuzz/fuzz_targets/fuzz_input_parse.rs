#![no_main]

use citing_authors::models::CitingAuthorsInput;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Deserialization and validation may fail but never panic
    if let Ok(input) = serde_json::from_slice::<CitingAuthorsInput>(data) {
        let _ = input.to_request();
    }
});
