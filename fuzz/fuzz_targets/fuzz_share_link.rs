//! Fuzz target for share-link file-id extraction.

#![no_main]

use libfuzzer_sys::fuzz_target;
use rl_source::share_link::extract_file_id;

fuzz_target!(|data: &str| {
    if let Ok(id) = extract_file_id(data) {
        // A successfully extracted id is always non-empty
        assert!(!id.is_empty());
    }
});
