//! Numeric bucketing policy.
//!
//! Numeric sensitive attributes are grouped by assigning each value to one
//! of a small table of labelled intervals. The default table is shaped for
//! ages; it is applied to every numeric column unless the caller supplies
//! another policy, so a non-age attribute (income, score) gets age brackets
//! unless overridden.

use serde::{Deserialize, Serialize};

use crate::error::{BiasLensError, Result};

/// Default interval edges: `[0, 30]`, `(30, 45]`, `(45, 100]`.
pub const AGE_BRACKET_EDGES: [f64; 4] = [0.0, 30.0, 45.0, 100.0];

/// Labels for [`AGE_BRACKET_EDGES`].
pub const AGE_BRACKET_LABELS: [&str; 3] = ["18–30", "31–45", "46+"];

/// A single labelled interval.
///
/// The upper bound is always inclusive; the lower bound is inclusive only
/// when `lower_inclusive` is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bucket {
    pub lower: f64,
    pub upper: f64,
    pub label: String,
    #[serde(default)]
    pub lower_inclusive: bool,
}

impl Bucket {
    pub fn new(lower: f64, upper: f64, label: impl Into<String>, lower_inclusive: bool) -> Self {
        Self {
            lower,
            upper,
            label: label.into(),
            lower_inclusive,
        }
    }

    /// Check whether a value falls in this interval.
    pub fn contains(&self, value: f64) -> bool {
        let above_lower = if self.lower_inclusive {
            value >= self.lower
        } else {
            value > self.lower
        };
        above_lower && value <= self.upper
    }
}

/// Ordered, non-overlapping set of buckets used to group numeric values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BucketPolicy {
    buckets: Vec<Bucket>,
}

impl BucketPolicy {
    /// Build a policy from explicit buckets.
    ///
    /// Buckets must be non-empty, sorted by bound, non-overlapping and
    /// carry distinct non-empty labels.
    pub fn new(buckets: Vec<Bucket>) -> Result<Self> {
        if buckets.is_empty() {
            return Err(BiasLensError::InvalidBucketPolicy(
                "at least one bucket is required".to_string(),
            ));
        }

        for (idx, bucket) in buckets.iter().enumerate() {
            if !bucket.lower.is_finite() || !bucket.upper.is_finite() {
                return Err(BiasLensError::InvalidBucketPolicy(format!(
                    "bucket '{}' has a non-finite bound",
                    bucket.label
                )));
            }
            if bucket.lower > bucket.upper
                || (bucket.lower == bucket.upper && !bucket.lower_inclusive)
            {
                return Err(BiasLensError::InvalidBucketPolicy(format!(
                    "bucket '{}' is empty ({} .. {})",
                    bucket.label, bucket.lower, bucket.upper
                )));
            }
            if bucket.label.trim().is_empty() {
                return Err(BiasLensError::InvalidBucketPolicy(format!(
                    "bucket {} has an empty label",
                    idx + 1
                )));
            }
            if buckets[..idx].iter().any(|b| b.label == bucket.label) {
                return Err(BiasLensError::InvalidBucketPolicy(format!(
                    "duplicate label '{}'",
                    bucket.label
                )));
            }
        }

        for pair in buckets.windows(2) {
            let (prev, next) = (&pair[0], &pair[1]);
            let overlaps = next.lower < prev.upper
                || (next.lower == prev.upper && next.lower_inclusive);
            if overlaps {
                return Err(BiasLensError::InvalidBucketPolicy(format!(
                    "buckets '{}' and '{}' overlap or are out of order",
                    prev.label, next.label
                )));
            }
        }

        Ok(Self { buckets })
    }

    /// Build a policy from contiguous edges.
    ///
    /// `edges` has one more entry than `labels`. The first interval is
    /// closed on both ends; later intervals are open below and closed above.
    pub fn from_edges(edges: &[f64], labels: &[&str]) -> Result<Self> {
        if edges.len() != labels.len() + 1 {
            return Err(BiasLensError::InvalidBucketPolicy(format!(
                "{} edges cannot delimit {} labels",
                edges.len(),
                labels.len()
            )));
        }

        let buckets = edges
            .windows(2)
            .zip(labels)
            .enumerate()
            .map(|(idx, (pair, label))| Bucket::new(pair[0], pair[1], *label, idx == 0))
            .collect();

        Self::new(buckets)
    }

    /// The default age-shaped brackets.
    pub fn age_brackets() -> Self {
        let buckets = AGE_BRACKET_EDGES
            .windows(2)
            .zip(AGE_BRACKET_LABELS)
            .enumerate()
            .map(|(idx, (pair, label))| Bucket::new(pair[0], pair[1], label, idx == 0))
            .collect();
        Self { buckets }
    }

    pub fn buckets(&self) -> &[Bucket] {
        &self.buckets
    }

    /// Label of the bucket containing `value`, if any.
    pub fn assign(&self, value: f64) -> Option<&str> {
        self.buckets
            .iter()
            .find(|b| b.contains(value))
            .map(|b| b.label.as_str())
    }
}

impl Default for BucketPolicy {
    fn default() -> Self {
        Self::age_brackets()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_age_brackets_boundaries() {
        let policy = BucketPolicy::age_brackets();
        assert_eq!(policy.assign(0.0), Some("18–30"));
        assert_eq!(policy.assign(30.0), Some("18–30"));
        assert_eq!(policy.assign(30.0001), Some("31–45"));
        assert_eq!(policy.assign(45.0), Some("31–45"));
        assert_eq!(policy.assign(45.0001), Some("46+"));
        assert_eq!(policy.assign(100.0), Some("46+"));
    }

    #[test]
    fn test_out_of_range_is_unassigned() {
        let policy = BucketPolicy::age_brackets();
        assert_eq!(policy.assign(-0.5), None);
        assert_eq!(policy.assign(100.5), None);
        assert_eq!(policy.assign(f64::INFINITY), None);
    }

    #[test]
    fn test_from_edges_matches_default() {
        let policy = BucketPolicy::from_edges(&AGE_BRACKET_EDGES, &AGE_BRACKET_LABELS).unwrap();
        assert_eq!(policy, BucketPolicy::age_brackets());
    }

    #[test]
    fn test_from_edges_custom() {
        let policy = BucketPolicy::from_edges(&[0.0, 50_000.0, 1e9], &["low", "high"]).unwrap();
        assert_eq!(policy.assign(50_000.0), Some("low"));
        assert_eq!(policy.assign(50_001.0), Some("high"));
    }

    #[test]
    fn test_rejects_edge_label_mismatch() {
        assert!(BucketPolicy::from_edges(&[0.0, 1.0], &["a", "b"]).is_err());
    }

    #[test]
    fn test_rejects_unordered_edges() {
        let err = BucketPolicy::from_edges(&[0.0, 50.0, 40.0], &["a", "b"]).unwrap_err();
        assert!(matches!(err, BiasLensError::InvalidBucketPolicy(_)));
    }

    #[test]
    fn test_rejects_overlap() {
        let buckets = vec![
            Bucket::new(0.0, 10.0, "a", true),
            Bucket::new(10.0, 20.0, "b", true),
        ];
        assert!(BucketPolicy::new(buckets).is_err());
    }

    #[test]
    fn test_rejects_empty_and_duplicate_labels() {
        assert!(BucketPolicy::new(Vec::new()).is_err());
        assert!(BucketPolicy::from_edges(&[0.0, 1.0, 2.0], &["a", "a"]).is_err());
        assert!(BucketPolicy::from_edges(&[0.0, 1.0], &[" "]).is_err());
    }

    #[test]
    fn test_allows_gaps() {
        let buckets = vec![
            Bucket::new(0.0, 10.0, "child", true),
            Bucket::new(60.0, 120.0, "senior", false),
        ];
        let policy = BucketPolicy::new(buckets).unwrap();
        assert_eq!(policy.assign(30.0), None);
    }
}
