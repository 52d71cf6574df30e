//! Fuzz target for bias analysis.
//!
//! Parses arbitrary bytes and analyzes every column, checking that the
//! engine either fails with a named error or produces in-range metrics.

#![no_main]

use biaslens::{BiasEngine, Parser};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 100_000 {
        return;
    }

    let Ok((dataset, _)) = Parser::new().parse_bytes("fuzz.csv", data) else {
        return;
    };

    let engine = BiasEngine::new();
    for column in dataset.columns() {
        if let Ok(result) = engine.analyze(&dataset, column) {
            // Rounding to 3 places can reach the closed bounds for extreme imbalance
            assert!((0.0..=1.0).contains(&result.disparate_impact));
            assert!((0.0..=1.0).contains(&result.statistical_parity_difference));
            assert_eq!(result.eligible_rows + result.excluded_rows, result.total_rows);
        }
    }
});
