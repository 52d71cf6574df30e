//! Group-fairness metrics for a sensitive attribute.
//!
//! The pipeline is: detect the attribute kind over the whole column, derive
//! a group label per row (raw value, or bucket for numeric columns), count
//! eligible rows per group, and derive disparate impact and statistical
//! parity difference from that single distribution. Other numeric columns
//! are then correlated with minority-group membership to flag proxies.

mod bucket;
mod distribution;
mod engine;
mod explain;
mod metrics;
mod proxy;
mod result;

pub use bucket::{AGE_BRACKET_EDGES, AGE_BRACKET_LABELS, Bucket, BucketPolicy};
pub use distribution::GroupDistribution;
pub use engine::BiasEngine;
pub use explain::{
    BiasTier, ExplanationSource, GENERATION_FALLBACK, HIGH_BIAS_DI, HIGH_BIAS_SPD,
    POTENTIAL_BIAS_DI, POTENTIAL_BIAS_SPD, proxy_recommendation,
};
pub use metrics::{DisparityMetrics, METRIC_DECIMALS, round_to};
pub use proxy::{MIN_CORRELATION_ROWS, PROXY_CORRELATION_THRESHOLD, ProxyScan};
pub use result::{AnalysisResult, AttributeKind};
