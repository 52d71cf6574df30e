//! Bias metric computation pipeline.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::error::{BiasLensError, Result};
use crate::input::{Dataset, Value};
use crate::llm::{ExplanationContext, LlmConfig, TextGenerator};

use super::bucket::BucketPolicy;
use super::distribution::GroupDistribution;
use super::explain::{BiasTier, ExplanationSource, GENERATION_FALLBACK, proxy_recommendation};
use super::metrics::DisparityMetrics;
use super::proxy::ProxyScan;
use super::result::{AttributeKind, AnalysisResult};

/// Computes group-fairness statistics for one sensitive attribute.
///
/// The engine holds only immutable configuration, so a single instance can
/// be shared across threads and reused for any number of datasets.
#[derive(Clone, Default)]
pub struct BiasEngine {
    buckets: BucketPolicy,
    generator: Option<Arc<dyn TextGenerator>>,
}

impl BiasEngine {
    /// Create an engine with the default age brackets and rule-based
    /// explanations.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different bucketing policy for numeric attributes.
    pub fn with_buckets(mut self, buckets: BucketPolicy) -> Self {
        self.buckets = buckets;
        self
    }

    /// Generate explanations with a text generator.
    pub fn with_generator(mut self, generator: impl TextGenerator + 'static) -> Self {
        self.generator = Some(Arc::new(generator));
        self
    }

    /// Share an existing generator.
    pub fn with_shared_generator(mut self, generator: Arc<dyn TextGenerator>) -> Self {
        self.generator = Some(generator);
        self
    }

    pub fn buckets(&self) -> &BucketPolicy {
        &self.buckets
    }

    /// Name of the configured generator, if any.
    pub fn generator_name(&self) -> Option<&str> {
        self.generator.as_deref().map(|g| g.name())
    }

    /// Settings of the configured generator, if any.
    pub fn generator_config(&self) -> Option<&LlmConfig> {
        self.generator.as_deref().map(|g| g.config())
    }

    /// Analyze `column` of `dataset`.
    ///
    /// # Errors
    ///
    /// - [`BiasLensError::MalformedInput`] if the dataset has no rows.
    /// - [`BiasLensError::ColumnNotFound`] if `column` is not a column.
    /// - [`BiasLensError::EmptyGroupDistribution`] if no row has an
    ///   eligible value.
    pub fn analyze(&self, dataset: &Dataset, column: &str) -> Result<AnalysisResult> {
        if dataset.is_empty() {
            return Err(BiasLensError::MalformedInput(
                "Dataset has no rows".to_string(),
            ));
        }

        let index = dataset
            .column_index(column)
            .ok_or_else(|| BiasLensError::ColumnNotFound {
                column: column.to_string(),
            })?;
        let values: Vec<&Value> = dataset.rows().iter().map(|row| &row[index]).collect();

        let kind = detect_kind(&values);
        let labels = self.row_labels(&values, kind);

        let distribution = GroupDistribution::from_labels(labels.iter().flatten().cloned())
            .ok_or_else(|| BiasLensError::EmptyGroupDistribution {
                column: column.to_string(),
            })?;

        let total_rows = values.len();
        let eligible_rows = distribution.total();
        debug!(
            column,
            kind = kind.label(),
            total_rows,
            eligible_rows,
            groups = distribution.group_count(),
            "computed group distribution"
        );

        // Both metrics come from this one snapshot
        let metrics = DisparityMetrics::from_distribution(&distribution);
        let tier = BiasTier::classify(&metrics);

        let (explanation, explanation_source) =
            self.explain(column, &distribution, &metrics, tier);

        let dominant_group = distribution.dominant_group().0.to_string();
        let minority_group = distribution.minority_group().0.to_string();

        let membership: Vec<Option<bool>> = labels
            .iter()
            .map(|label| label.as_ref().map(|l| *l == minority_group))
            .collect();
        let proxies = ProxyScan::run(dataset, index, &membership);

        let mut recommendations = tier.recommendations(column, &minority_group);
        if let (Some(driver), Some(r)) = (&proxies.main_driver, proxies.driver_correlation()) {
            debug!(column, driver = %driver, correlation = r, "proxy feature found");
            if !tier.is_biased() {
                recommendations.clear();
            }
            recommendations.push(proxy_recommendation(driver, r, column, &minority_group));
        }

        Ok(AnalysisResult {
            sensitive_attribute: column.to_string(),
            attribute_kind: kind,
            attribute_type: kind.label().to_string(),
            total_rows,
            eligible_rows,
            excluded_rows: total_rows - eligible_rows,
            group_counts: distribution.counts().clone(),
            distribution: distribution.proportions().clone(),
            disparate_impact: metrics.disparate_impact,
            statistical_parity_difference: metrics.statistical_parity_difference,
            bias_tier: tier,
            bias_detected: tier.is_biased(),
            dominant_group,
            minority_group,
            explanation,
            explanation_source,
            recommendations,
            feature_correlations: proxies.correlations,
            main_bias_driver: proxies.main_driver,
        })
    }

    /// Group label per row; `None` for rows that are not eligible.
    fn row_labels(&self, values: &[&Value], kind: AttributeKind) -> Vec<Option<String>> {
        match kind {
            AttributeKind::Categorical => values.iter().map(|v| v.label()).collect(),
            AttributeKind::NumericBucketed => values
                .iter()
                .map(|v| {
                    v.as_number()
                        .and_then(|n| self.buckets.assign(n))
                        .map(str::to_string)
                })
                .collect(),
        }
    }

    fn explain(
        &self,
        column: &str,
        distribution: &GroupDistribution,
        metrics: &DisparityMetrics,
        tier: BiasTier,
    ) -> (String, ExplanationSource) {
        let Some(generator) = self.generator.as_deref() else {
            return (tier.explanation(column), ExplanationSource::Rules);
        };

        let context = ExplanationContext {
            attribute: column.to_string(),
            distribution: distribution.proportions().clone(),
            disparate_impact: metrics.disparate_impact,
            statistical_parity_difference: metrics.statistical_parity_difference,
        };

        let config = generator.config();
        match generator.generate(&context) {
            Ok(text) if !text.trim().is_empty() => (text, ExplanationSource::Generated),
            Ok(_) => {
                warn!(
                    generator = generator.name(),
                    model = %config.model,
                    "generator returned empty text, using fallback"
                );
                (GENERATION_FALLBACK.to_string(), ExplanationSource::Fallback)
            }
            Err(e) => {
                warn!(
                    generator = generator.name(),
                    model = %config.model,
                    timeout_secs = config.timeout.as_secs(),
                    error = %e,
                    "explanation generation failed, using fallback"
                );
                (GENERATION_FALLBACK.to_string(), ExplanationSource::Fallback)
            }
        }
    }
}

/// Numeric only if every present value is a number.
fn detect_kind(values: &[&Value]) -> AttributeKind {
    let mut present = values.iter().filter(|v| !v.is_missing()).peekable();
    if present.peek().is_none() {
        return AttributeKind::Categorical;
    }
    if present.all(|v| matches!(v, Value::Number { .. })) {
        AttributeKind::NumericBucketed
    } else {
        AttributeKind::Categorical
    }
}
