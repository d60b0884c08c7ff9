//! Fuzz target for CSV dataset parsing.
//!
//! Tests that `Dataset::from_csv_bytes` handles arbitrary input without
//! panicking.

#![no_main]

use libfuzzer_sys::fuzz_target;
use rl_common::Dataset;

fuzz_target!(|data: &[u8]| {
    // The parser should never panic, only return an error for malformed input
    let _ = Dataset::from_csv_bytes(data);
});
