//! Rule-based bias assessment and explanation text.

use serde::{Deserialize, Serialize};

use super::metrics::DisparityMetrics;

/// DI below this is high bias.
pub const HIGH_BIAS_DI: f64 = 0.6;
/// SPD above this is high bias.
pub const HIGH_BIAS_SPD: f64 = 0.2;
/// DI below this (and not high) is potential bias. Mirrors the four-fifths rule.
pub const POTENTIAL_BIAS_DI: f64 = 0.8;
/// SPD above this (and not high) is potential bias.
pub const POTENTIAL_BIAS_SPD: f64 = 0.1;

/// Fixed text used when the text generator fails or times out.
pub const GENERATION_FALLBACK: &str =
    "AI explanation unavailable at the moment. Please rely on the computed fairness metrics.";

/// Severity of the detected imbalance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BiasTier {
    High,
    Potential,
    None,
}

impl BiasTier {
    /// Classify a pair of metrics.
    pub fn classify(metrics: &DisparityMetrics) -> Self {
        let di = metrics.disparate_impact;
        let spd = metrics.statistical_parity_difference;

        if di < HIGH_BIAS_DI || spd > HIGH_BIAS_SPD {
            BiasTier::High
        } else if di < POTENTIAL_BIAS_DI || spd > POTENTIAL_BIAS_SPD {
            BiasTier::Potential
        } else {
            BiasTier::None
        }
    }

    /// Short human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            BiasTier::High => "high bias",
            BiasTier::Potential => "potential bias",
            BiasTier::None => "no significant bias",
        }
    }

    pub fn is_biased(&self) -> bool {
        !matches!(self, BiasTier::None)
    }

    /// Fixed explanation naming the sensitive attribute.
    pub fn explanation(&self, attribute: &str) -> String {
        match self {
            BiasTier::High => format!(
                "High bias detected: groups of '{}' are strongly imbalanced. \
                 The smallest group is heavily under-represented relative to the largest, \
                 so models trained on this data are likely to favour the majority group.",
                attribute
            ),
            BiasTier::Potential => format!(
                "Potential bias detected: groups of '{}' are moderately imbalanced. \
                 The disparity falls below the four-fifths guideline and should be reviewed \
                 before the data is used for training or decisions.",
                attribute
            ),
            BiasTier::None => format!(
                "No significant bias detected: groups of '{}' are reasonably balanced \
                 according to disparate impact and statistical parity difference.",
                attribute
            ),
        }
    }

    /// Mitigation steps for this tier.
    pub fn recommendations(&self, attribute: &str, minority_group: &str) -> Vec<String> {
        match self {
            BiasTier::High => vec![
                format!(
                    "Rebalance the dataset: collect or oversample records for '{}' = '{}'.",
                    attribute, minority_group
                ),
                "Consider reweighting samples so each group contributes equally during training."
                    .to_string(),
                format!(
                    "Review how '{}' was recorded to rule out collection bias.",
                    attribute
                ),
            ],
            BiasTier::Potential => vec![
                format!(
                    "Monitor outcomes per '{}' group after training.",
                    attribute
                ),
                "Consider reweighting or stratified sampling to narrow the gap.".to_string(),
            ],
            BiasTier::None => vec!["No major bias detected.".to_string()],
        }
    }
}

/// Mitigation step for a feature that tracks membership in `minority_group`.
pub fn proxy_recommendation(
    feature: &str,
    correlation: f64,
    attribute: &str,
    minority_group: &str,
) -> String {
    format!(
        "Remove proxy feature: {} (correlation {:.3} with '{}' = '{}').",
        feature, correlation, attribute, minority_group
    )
}

/// Where the explanation text came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExplanationSource {
    /// Fixed tier template.
    Rules,
    /// Produced by the configured text generator.
    Generated,
    /// Text generator failed; fixed fallback used.
    Fallback,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics(di: f64, spd: f64) -> DisparityMetrics {
        DisparityMetrics {
            disparate_impact: di,
            statistical_parity_difference: spd,
        }
    }

    #[test]
    fn test_classify_tiers() {
        assert_eq!(BiasTier::classify(&metrics(0.333, 0.5)), BiasTier::High);
        assert_eq!(BiasTier::classify(&metrics(0.59, 0.05)), BiasTier::High);
        assert_eq!(BiasTier::classify(&metrics(0.9, 0.21)), BiasTier::High);
        assert_eq!(BiasTier::classify(&metrics(0.7, 0.05)), BiasTier::Potential);
        assert_eq!(BiasTier::classify(&metrics(0.9, 0.15)), BiasTier::Potential);
        assert_eq!(BiasTier::classify(&metrics(0.9, 0.05)), BiasTier::None);
        assert_eq!(BiasTier::classify(&metrics(1.0, 0.0)), BiasTier::None);
    }

    #[test]
    fn test_thresholds_are_exclusive() {
        assert_eq!(BiasTier::classify(&metrics(0.6, 0.2)), BiasTier::Potential);
        assert_eq!(BiasTier::classify(&metrics(0.8, 0.1)), BiasTier::None);
    }

    #[test]
    fn test_explanation_names_attribute() {
        for tier in [BiasTier::High, BiasTier::Potential, BiasTier::None] {
            assert!(tier.explanation("gender").contains("'gender'"));
        }
    }

    #[test]
    fn test_recommendations() {
        let recs = BiasTier::High.recommendations("gender", "F");
        assert!(recs[0].contains("'F'"));
        assert_eq!(
            BiasTier::None.recommendations("gender", "F"),
            vec!["No major bias detected.".to_string()]
        );
    }

    #[test]
    fn test_proxy_recommendation() {
        assert_eq!(
            proxy_recommendation("zip", -0.8123, "gender", "F"),
            "Remove proxy feature: zip (correlation -0.812 with 'gender' = 'F')."
        );
    }
}
