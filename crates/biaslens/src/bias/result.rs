//! Analysis result record.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::explain::{BiasTier, ExplanationSource};

/// How group labels were derived from the sensitive attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeKind {
    /// Raw values are the groups.
    Categorical,
    /// Numeric values grouped by a bucket policy.
    NumericBucketed,
}

impl AttributeKind {
    pub fn label(&self) -> &'static str {
        match self {
            AttributeKind::Categorical => "categorical",
            AttributeKind::NumericBucketed => "numeric (bucketed)",
        }
    }
}

/// Outcome of one bias analysis.
///
/// Holds no timestamps or other ambient state, so analysing the same data
/// twice yields identical results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Name of the sensitive attribute column.
    pub sensitive_attribute: String,
    pub attribute_kind: AttributeKind,
    /// Human-readable form of `attribute_kind`.
    pub attribute_type: String,
    /// Rows in the dataset.
    pub total_rows: usize,
    /// Rows that contributed to the distribution.
    pub eligible_rows: usize,
    /// Rows dropped because the value was missing or fell in no bucket.
    pub excluded_rows: usize,
    /// Eligible rows per group.
    pub group_counts: IndexMap<String, usize>,
    /// Share of eligible rows per group.
    pub distribution: IndexMap<String, f64>,
    pub disparate_impact: f64,
    pub statistical_parity_difference: f64,
    pub bias_tier: BiasTier,
    pub bias_detected: bool,
    /// Largest group.
    pub dominant_group: String,
    /// Smallest group.
    pub minority_group: String,
    pub explanation: String,
    pub explanation_source: ExplanationSource,
    pub recommendations: Vec<String>,
    /// Correlation of each other numeric column with minority-group
    /// membership.
    #[serde(default)]
    pub feature_correlations: IndexMap<String, f64>,
    /// Feature most likely acting as a proxy for the sensitive attribute.
    #[serde(default)]
    pub main_bias_driver: Option<String>,
}
