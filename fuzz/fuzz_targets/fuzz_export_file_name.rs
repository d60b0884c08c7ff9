//! Fuzz target for export file-name derivation.

#![no_main]

use libfuzzer_sys::fuzz_target;
use rl_report::export_file_name;

fuzz_target!(|data: &str| {
    let name = export_file_name(Some(data));
    assert!(name.ends_with("_data_report.html"));
});
