//! Disparity metrics derived from a group distribution.

use serde::{Deserialize, Serialize};

use super::distribution::GroupDistribution;

/// Decimal places kept on reported metrics.
pub const METRIC_DECIMALS: i32 = 3;

/// Disparate impact and statistical parity difference of one distribution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DisparityMetrics {
    /// Smallest share divided by largest share, in `(0, 1]`.
    pub disparate_impact: f64,
    /// Largest share minus smallest share, in `[0, 1)`.
    pub statistical_parity_difference: f64,
}

impl DisparityMetrics {
    /// Compute both metrics from a single distribution snapshot.
    ///
    /// Each metric is rounded on its own, so on large datasets a small
    /// imbalance can round SPD to zero while DI stays below one.
    pub fn from_distribution(distribution: &GroupDistribution) -> Self {
        let min = distribution.min_share();
        let max = distribution.max_share();

        let disparate_impact = if distribution.group_count() <= 1 {
            1.0
        } else {
            round_to(min / max, METRIC_DECIMALS)
        };

        Self {
            disparate_impact,
            statistical_parity_difference: round_to(max - min, METRIC_DECIMALS),
        }
    }
}

/// Round half away from zero to `decimals` places.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
