//! Fuzz target for report configuration parsing.
//!
//! Tests that JSON report configuration parsing handles arbitrary input
//! without panicking.

#![no_main]

use libfuzzer_sys::fuzz_target;
use rl_report::ReportConfig;

fuzz_target!(|data: &[u8]| {
    // Try to parse as JSON - should never panic, only return an error
    let _ = serde_json::from_slice::<ReportConfig>(data);
});
