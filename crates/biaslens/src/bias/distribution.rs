//! Group distribution over eligible rows.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Normalized group shares with the counts they were derived from.
///
/// Groups are ordered by descending count; ties keep first-appearance order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupDistribution {
    counts: IndexMap<String, usize>,
    proportions: IndexMap<String, f64>,
    total: usize,
}

impl GroupDistribution {
    /// Count labels and normalize by the number of labels seen.
    ///
    /// Returns `None` when the iterator yields nothing; an empty distribution
    /// has no meaningful min/max share.
    pub fn from_labels<I, S>(labels: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut counts: IndexMap<String, usize> = IndexMap::new();
        for label in labels {
            *counts.entry(label.into()).or_insert(0) += 1;
        }

        let total: usize = counts.values().sum();
        if total == 0 {
            return None;
        }

        // Stable sort keeps insertion order among equal counts
        counts.sort_by(|_, a, _, b| b.cmp(a));

        let proportions = counts
            .iter()
            .map(|(label, &count)| (label.clone(), count as f64 / total as f64))
            .collect();

        Some(Self {
            counts,
            proportions,
            total,
        })
    }

    /// Per-group row counts.
    pub fn counts(&self) -> &IndexMap<String, usize> {
        &self.counts
    }

    /// Per-group share of eligible rows.
    pub fn proportions(&self) -> &IndexMap<String, f64> {
        &self.proportions
    }

    /// Number of eligible rows the shares were computed over.
    pub fn total(&self) -> usize {
        self.total
    }

    pub fn group_count(&self) -> usize {
        self.counts.len()
    }

    /// Smallest group share.
    pub fn min_share(&self) -> f64 {
        self.proportions.values().copied().fold(f64::INFINITY, f64::min)
    }

    /// Largest group share.
    pub fn max_share(&self) -> f64 {
        self.proportions.values().copied().fold(f64::NEG_INFINITY, f64::max)
    }

    /// The largest group and its share.
    pub fn dominant_group(&self) -> (&str, f64) {
        // Non-empty by construction and sorted by count
        self.proportions
            .first()
            .map(|(l, s)| (l.as_str(), *s))
            .unwrap_or(("", 0.0))
    }

    /// The smallest group and its share.
    pub fn minority_group(&self) -> (&str, f64) {
        self.proportions
            .last()
            .map(|(l, s)| (l.as_str(), *s))
            .unwrap_or(("", 0.0))
    }
}
