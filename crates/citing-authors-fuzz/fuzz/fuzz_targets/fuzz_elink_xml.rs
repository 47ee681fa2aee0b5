#![no_main]

use citing_authors::client::{align_link_sets, xml};
use citing_authors::models::Pmid;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        // Alignment must hand back one list per requested id whatever the sets say
        if let Ok(sets) = xml::parse_elink(text, xml::CITED_IN) {
            let ids = [Pmid::from("1"), Pmid::from("2")];
            assert_eq!(align_link_sets(&ids, sets).len(), ids.len());
        }
    }
});
