//! Fuzz target for the data parser.
//!
//! This fuzzer tests that the CSV/TSV parser:
//! 1. Never panics on malformed input
//! 2. Handles all delimiter combinations
//! 3. Always yields rows as wide as the header

#![no_main]

use biaslens::Parser;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Only process reasonable-sized inputs to avoid OOM
    if data.len() > 100_000 {
        return;
    }

    if let Ok((dataset, _)) = Parser::new().parse_bytes("fuzz.csv", data) {
        for row in dataset.rows() {
            assert_eq!(row.len(), dataset.column_count());
        }
    }
});
