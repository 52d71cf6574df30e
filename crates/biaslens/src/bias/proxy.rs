//! Proxy-feature detection.
//!
//! A proxy is another column that tracks membership in the under-represented
//! group closely enough to reintroduce the sensitive attribute after it is
//! dropped. Each numeric column is correlated (Pearson) with a 0/1 indicator
//! of minority-group membership over the rows where both are present.

use indexmap::IndexMap;

use crate::input::{Dataset, Value};

use super::metrics::{METRIC_DECIMALS, round_to};

/// Absolute correlation at which a feature is reported as a proxy.
pub const PROXY_CORRELATION_THRESHOLD: f64 = 0.5;

/// Fewest complete rows a correlation is computed over. With two points the
/// coefficient is always +/-1.
pub const MIN_CORRELATION_ROWS: usize = 3;

/// Correlation of each numeric feature with minority-group membership.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProxyScan {
    /// Feature name to rounded correlation, in column order.
    pub correlations: IndexMap<String, f64>,
    /// Feature with the strongest correlation at or above the threshold.
    pub main_driver: Option<String>,
}

impl ProxyScan {
    /// Scan every numeric column other than `sensitive_index`.
    ///
    /// `membership[i]` is `Some(true)` when row `i` belongs to the minority
    /// group, `Some(false)` for any other group and `None` for rows that are
    /// not eligible.
    pub fn run(dataset: &Dataset, sensitive_index: usize, membership: &[Option<bool>]) -> Self {
        let mut correlations = IndexMap::new();

        for (index, name) in dataset.columns().iter().enumerate() {
            if index == sensitive_index || !is_numeric_column(dataset, index) {
                continue;
            }

            let pairs: Vec<(f64, f64)> = dataset
                .rows()
                .iter()
                .zip(membership)
                .filter_map(|(row, member)| {
                    let x = row[index].as_number().filter(|x| x.is_finite())?;
                    let y = if (*member)? { 1.0 } else { 0.0 };
                    Some((x, y))
                })
                .collect();

            if let Some(r) = pearson(&pairs) {
                correlations.insert(name.clone(), r);
            }
        }

        // First column wins ties
        let main_driver = correlations
            .iter()
            .filter(|(_, r)| r.abs() >= PROXY_CORRELATION_THRESHOLD)
            .fold(None::<(&String, f64)>, |best, (name, r)| match best {
                Some((_, best_r)) if best_r >= r.abs() => best,
                _ => Some((name, r.abs())),
            })
            .map(|(name, _)| name.clone());

        Self {
            correlations,
            main_driver,
        }
    }

    /// Correlation of the main driver, if there is one.
    pub fn driver_correlation(&self) -> Option<f64> {
        self.main_driver
            .as_ref()
            .and_then(|name| self.correlations.get(name).copied())
    }
}

/// All present values are numbers, and at least one is present.
fn is_numeric_column(dataset: &Dataset, index: usize) -> bool {
    let mut present = dataset
        .rows()
        .iter()
        .map(|row| &row[index])
        .filter(|v| !v.is_missing())
        .peekable();
    present.peek().is_some() && present.all(|v| matches!(v, Value::Number { .. }))
}

/// Pearson correlation rounded to the metric precision. `None` when there are
/// too few rows or either side is constant.
fn pearson(pairs: &[(f64, f64)]) -> Option<f64> {
    if pairs.len() < MIN_CORRELATION_ROWS
        || is_constant(pairs.iter().map(|p| p.0))
        || is_constant(pairs.iter().map(|p| p.1))
    {
        return None;
    }

    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|p| p.0).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|p| p.1).sum::<f64>() / n;

    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    for &(x, y) in pairs {
        let dx = x - mean_x;
        let dy = y - mean_y;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }

    let r = sxy / (sxx.sqrt() * syy.sqrt());
    r.is_finite().then(|| round_to(r.clamp(-1.0, 1.0), METRIC_DECIMALS))
}

fn is_constant(mut values: impl Iterator<Item = f64>) -> bool {
    match values.next() {
        Some(first) => values.all(|v| v == first),
        None => true,
    }
}
